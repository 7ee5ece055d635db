use std::collections::{HashMap, HashSet};
use hop_engine::*;

use crate::callbacks;
use crate::config::HopConfig;
use crate::level;
use crate::player::PlayerController;
use crate::sound::SoundLog;
use crate::spawner::ObstacleSpawner;
use crate::state::{GameStateManager, Outcome};
use crate::turret::{self, Turret};

/// River Hop: cross roads and rivers to the win zone.
pub struct RiverHop {
    config: HopConfig,
    first_level: String,
    state: GameStateManager,
    player: Option<PlayerController>,
    spawners: HashMap<EntityId, ObstacleSpawner>,
    turrets: HashMap<EntityId, Turret>,
    projectiles: HashSet<EntityId>,
}

impl RiverHop {
    pub fn new(config: HopConfig) -> Self {
        Self {
            state: GameStateManager::new(config.intro_delay_secs),
            config,
            first_level: level::LEVELS[0].0.to_string(),
            player: None,
            spawners: HashMap::new(),
            turrets: HashMap::new(),
            projectiles: HashSet::new(),
        }
    }

    pub fn state(&self) -> &GameStateManager {
        &self.state
    }

    pub fn player(&self) -> Option<&PlayerController> {
        self.player.as_ref()
    }

    pub fn spawners(&self) -> impl Iterator<Item = &ObstacleSpawner> {
        self.spawners.values()
    }

    pub fn projectiles(&self) -> &HashSet<EntityId> {
        &self.projectiles
    }

    /// Tear down the current world and build level `id` in its place.
    fn start_level(&mut self, ctx: &mut EngineContext, id: &str) -> Result<()> {
        let info = ctx.levels.load_level(id)?.clone();

        ctx.clear_world();
        self.player = None;
        self.spawners.clear();
        self.turrets.clear();
        self.projectiles.clear();

        let loaded = level::build(ctx, &info, &self.config)?;
        self.spawners = loaded.spawners.into_iter().map(|s| (s.id, s)).collect();
        self.turrets = loaded.turrets.into_iter().map(|t| (t.id, t)).collect();

        match loaded.player {
            Some(player) => {
                self.player = Some(PlayerController::new(player, self.config.clone()));
                ctx.publish(GameEvent::Spawn(player));
            }
            None => log::warn!("level '{}' has no player", id),
        }
        log::info!("started level '{}'", id);
        Ok(())
    }

    fn forget(&mut self, id: EntityId) {
        self.projectiles.remove(&id);
        self.turrets.remove(&id);
        self.spawners.remove(&id);
        for spawner in self.spawners.values_mut() {
            spawner.forget(id);
        }
    }
}

impl Default for RiverHop {
    fn default() -> Self {
        Self::new(HopConfig::default())
    }
}

impl Game for RiverHop {
    fn init(&mut self, ctx: &mut EngineContext) {
        match ArchetypeManifest::from_json(level::ARCHETYPES) {
            Ok(manifest) => ctx.archetypes = ArchetypeRegistry::from_manifest(&manifest),
            Err(err) => log::error!("failed to load archetypes: {}", err),
        }
        for (id, json) in level::LEVELS {
            match LevelInfo::from_json(json) {
                Ok(info) => {
                    ctx.levels.add_level(*id, info);
                }
                Err(err) => log::error!("failed to load level '{}': {}", id, err),
            }
        }
        ctx.add_listener(Box::new(SoundLog::new()));
        ctx.publish(GameEvent::Start(self.first_level.clone()));
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &KeyboardState) {
        if self.state.outcome() != Outcome::Playing {
            return;
        }
        if let Some(player) = self.player.as_mut() {
            player.update(ctx, input);
        }
        for &id in &self.projectiles {
            turret::update_projectile(ctx, id);
        }
    }

    fn on_tween_complete(&mut self, ctx: &mut EngineContext, done: TweenCompleted) {
        match done.callback {
            callbacks::HOP_PHASE | callbacks::FALL => {
                let Some(player) = self.player.as_mut().filter(|p| p.id == done.target) else {
                    return;
                };
                if done.callback == callbacks::HOP_PHASE {
                    player.on_hop_phase(ctx);
                } else {
                    player.on_fall_complete(ctx);
                }
            }
            callbacks::RESET_OBSTACLE => {
                if let Some(spawner) = self.spawners.values_mut().find(|s| s.owns(done.target)) {
                    spawner.reset(ctx, done.target);
                }
                if let Some(player) = self.player.as_mut() {
                    player.on_platform_reset(ctx, done.target);
                }
            }
            callbacks::LAUNCH_PROJECTILES => {
                let Some(turret) = self.turrets.get(&done.target) else {
                    return;
                };
                match turret.launch(ctx) {
                    Ok(launched) => self.projectiles.extend(launched),
                    Err(err) => log::error!("turret {:?} failed to launch: {}", done.target, err),
                }
            }
            callbacks::PROJECTILE_SPENT => ctx.publish(GameEvent::RemoveActor(done.target)),
            other => log::warn!("unhandled tween callback {:?}", other),
        }
    }

    fn on_event(&mut self, ctx: &mut EngineContext, event: &GameEvent) {
        match event {
            GameEvent::Start(id) => {
                if let Err(err) = self.start_level(ctx, id) {
                    log::error!("failed to start level '{}': {}", id, err);
                }
            }
            GameEvent::Spawn(_) => {
                self.state.handle(ctx, event);
                self.state.begin_level(ctx);
            }
            GameEvent::RemoveActor(id) => self.forget(*id),
            _ => self.state.handle(ctx, event),
        }
    }
}
