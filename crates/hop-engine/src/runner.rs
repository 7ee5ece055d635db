use crate::api::game::{EngineContext, Game, GameConfig};
use crate::core::time::FixedTimestep;
use crate::input::queue::{InputEvent, InputQueue, KeyboardState};

/// Events published while dispatching can publish more events; this bounds
/// one step's dispatch loop.
const MAX_EVENTS_PER_STEP: usize = 4096;

/// Generic game runner that wires up the engine loop.
///
/// Headless: the host pushes input and calls `tick` with frame time;
/// rendering reads `ctx().scene` afterwards.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    keyboard: KeyboardState,
    timestep: FixedTimestep,
    config: GameConfig,
    initialized: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let timestep = FixedTimestep::with_max_steps(config.fixed_dt, config.max_steps_per_frame);

        Self {
            game,
            ctx: EngineContext::new(),
            input: InputQueue::new(),
            keyboard: KeyboardState::new(),
            timestep,
            config,
            initialized: false,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.config = self.game.config();
        self.timestep = FixedTimestep::with_max_steps(self.config.fixed_dt, self.config.max_steps_per_frame);
        self.game.init(&mut self.ctx);
        self.dispatch();
        self.initialized = true;
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: fold input, then as many fixed steps as the frame time allows.
    /// Returns the number of steps run.
    pub fn tick(&mut self, dt: f32) -> u32 {
        if !self.initialized {
            return 0;
        }

        self.keyboard.apply(self.input.drain());

        let steps = self.timestep.accumulate(dt);
        for _ in 0..steps {
            self.step();
            // Presses are only visible to the first step of a frame.
            self.keyboard.end_frame();
        }
        steps
    }

    /// Run exactly one fixed step.
    ///
    /// Order: tweens, tween callbacks, timers, game update, event dispatch.
    pub fn step(&mut self) {
        let dt = self.timestep.dt();

        self.ctx.tweens.tick(self.timestep.dt_ms(), &mut self.ctx.scene);
        for done in self.ctx.tweens.drain_completed() {
            self.game.on_tween_complete(&mut self.ctx, done);
        }

        self.ctx.timers.tick(dt, &mut self.ctx.events);

        self.game.update(&mut self.ctx, &self.keyboard);

        self.dispatch();
    }

    /// Route every pending event through the engine, then the game.
    fn dispatch(&mut self) {
        let mut handled = 0;
        while let Some(event) = self.ctx.events.pop() {
            self.ctx.route(&event);
            self.game.on_event(&mut self.ctx, &event);

            handled += 1;
            if handled >= MAX_EVENTS_PER_STEP {
                log::warn!("event dispatch limit reached, {} events deferred", self.ctx.events.len());
                break;
            }
        }
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    pub fn ctx(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn ctx_mut(&mut self) -> &mut EngineContext {
        &mut self.ctx
    }

    /// How far the host frame sits between the last step and the next,
    /// for interpolating what it draws.
    pub fn alpha(&self) -> f32 {
        self.timestep.alpha()
    }

    pub fn keyboard(&self) -> &KeyboardState {
        &self.keyboard
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}
