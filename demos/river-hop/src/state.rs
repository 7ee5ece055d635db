use hop_engine::*;

/// Name of the timer that ends the camera intro.
pub const CAMERA_SWITCH: &str = "Camera Switch";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outcome {
    #[default]
    Playing,
    Won,
    Lost,
}

/// Score, outcome and level-start bookkeeping, driven by game-state events.
#[derive(Debug, Default)]
pub struct GameStateManager {
    stars: u32,
    outcome: Outcome,
    player: Option<EntityId>,
    intro_delay_secs: f32,
}

impl GameStateManager {
    pub fn new(intro_delay_secs: f32) -> Self {
        Self {
            intro_delay_secs,
            ..Self::default()
        }
    }

    pub fn stars(&self) -> u32 {
        self.stars
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn player(&self) -> Option<EntityId> {
        self.player
    }

    /// A level was loaded: reset the round, announce play and schedule the
    /// end of the camera intro, which activates the player.
    pub fn begin_level(&mut self, ctx: &mut EngineContext) {
        self.stars = 0;
        self.outcome = Outcome::Playing;
        ctx.publish(GameEvent::Menu(MenuAction::Play));

        // A restart replaces any intro still running.
        ctx.timers.cancel(CAMERA_SWITCH);
        if let Some(player) = self.player {
            ctx.timers.schedule_once(
                CAMERA_SWITCH,
                self.intro_delay_secs,
                Box::new(move |events: &mut EventDispatcher| events.publish(GameEvent::Activate(player))),
            );
        }
    }

    pub fn handle(&mut self, ctx: &mut EngineContext, event: &GameEvent) {
        match event {
            GameEvent::Spawn(id) => self.player = Some(*id),
            GameEvent::Pickup(_) => {
                self.stars += 1;
                ctx.publish(GameEvent::PlaySound("pickup".into()));
            }
            GameEvent::Win => self.finish(ctx, Outcome::Won),
            GameEvent::Lose => self.finish(ctx, Outcome::Lost),
            GameEvent::Activate(id) => {
                if let Some(entity) = ctx.scene.get_mut(*id) {
                    entity.active = true;
                    entity.drawn = true;
                }
            }
            _ => {}
        }
    }

    /// Only the first outcome of a round counts.
    fn finish(&mut self, ctx: &mut EngineContext, outcome: Outcome) {
        if self.outcome != Outcome::Playing {
            return;
        }
        self.outcome = outcome;
        log::info!("round over: {:?} with {} stars", outcome, self.stars);
        let menu = match outcome {
            Outcome::Won => MenuAction::Win,
            _ => MenuAction::Lose,
        };
        ctx.publish(GameEvent::Menu(menu));
    }
}
