use glam::Vec3;
use hop_engine::*;

use crate::callbacks;
use crate::config::HopConfig;

const SPIN_MS: u32 = 2000;
const SPIN_DEGREES: f32 = 45.0;
const PULSE_MS: u32 = 1000;
const PULSE_SCALE: f32 = 1.5;

/// Spins in place and fires a projectile in four directions per spin.
#[derive(Debug, Clone)]
pub struct Turret {
    pub id: EntityId,
    projectile: String,
    /// Fixed at attach time; the spin is cosmetic.
    directions: [Vec3; 4],
    range: f32,
    unit_time_ms: u32,
}

impl Turret {
    /// Start the spin and pulse tweens on an existing entity.
    pub fn attach(
        ctx: &mut EngineContext,
        id: EntityId,
        projectile: impl Into<String>,
        config: &HopConfig,
    ) -> Result<Self> {
        let entity = ctx.scene.get(id).ok_or(EngineError::MissingEntity(id))?;
        let right = entity.transform.right();
        let look = entity.transform.look();

        let spin = Tween::rotation(entity, SPIN_MS, Vec3::new(0.0, SPIN_DEGREES, 0.0), true)
            .with_loop(TweenLoop::Repeat)
            .with_on_complete(callbacks::LAUNCH_PROJECTILES);
        let pulse = Tween::scale(entity, PULSE_MS, Vec3::splat(PULSE_SCALE), false)
            .with_loop(TweenLoop::ReverseAndRepeat);
        ctx.publish(GameEvent::AddTweens(vec![spin, pulse]));

        Ok(Self {
            id,
            projectile: projectile.into(),
            directions: [right, -right, look, -look],
            range: config.projectile_range,
            unit_time_ms: config.projectile_unit_time_ms,
        })
    }

    pub fn directions(&self) -> &[Vec3; 4] {
        &self.directions
    }

    /// Publish one projectile per direction. Returns their IDs.
    pub fn launch(&self, ctx: &mut EngineContext) -> Result<Vec<EntityId>> {
        let origin = ctx
            .scene
            .get(self.id)
            .map(Entity::pos)
            .ok_or(EngineError::MissingEntity(self.id))?;
        let duration_ms = (self.range * self.unit_time_ms as f32).round() as u32;

        let mut launched = Vec::with_capacity(self.directions.len());
        for direction in self.directions {
            let id = ctx.next_id();
            let projectile = ctx.archetypes.instantiate(&self.projectile, id, origin)?;
            let flight = Tween::translation(&projectile, duration_ms, direction * self.range, true)
                .with_easing(Easing::EaseIn)
                .with_on_complete(callbacks::PROJECTILE_SPENT);

            ctx.publish(GameEvent::AddActor(projectile));
            ctx.publish(GameEvent::add_tween(flight));
            launched.push(id);
        }
        ctx.publish(GameEvent::PlaySound("launch".into()));
        Ok(launched)
    }
}

/// A projectile removes itself when it touches the player or an obstacle.
/// Returns true if it did.
pub fn update_projectile(ctx: &mut EngineContext, id: EntityId) -> bool {
    let hit = check_all_collisions(&ctx.scene, id, Vec3::ZERO).map(|e| e.kind);
    match hit {
        Some(ActorKind::Player | ActorKind::BlockingObstacle | ActorKind::Obstacle) => {
            ctx.publish(GameEvent::CancelTweens(id));
            ctx.publish(GameEvent::RemoveActor(id));
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (EngineContext, EntityId) {
        let mut ctx = EngineContext::new();
        ctx.archetypes.register(
            "projectile",
            Archetype::new(ActorKind::Projectile, "projectile")
                .with_half_extents(Vec3::splat(0.2))
                .with_layer(RenderLayer::Transparent),
        );
        let id = ctx.next_id();
        ctx.spawn(
            Entity::new(id)
                .with_kind(ActorKind::Turret)
                .with_pos(Vec3::new(2.0, 1.0, 2.0))
                .with_collider(BoxCollider::new(Vec3::splat(0.4))),
        );
        (ctx, id)
    }

    #[test]
    fn attach_to_missing_entity_fails_fast() {
        let mut ctx = EngineContext::new();
        let err = Turret::attach(&mut ctx, EntityId(42), "projectile", &HopConfig::default()).unwrap_err();
        assert!(matches!(err, EngineError::MissingEntity(EntityId(42))));
        assert!(ctx.events.is_empty());
    }

    #[test]
    fn attach_starts_spin_and_pulse() {
        let (mut ctx, id) = setup();
        let turret = Turret::attach(&mut ctx, id, "projectile", &HopConfig::default()).unwrap();

        let events = ctx.events.drain();
        let GameEvent::AddTweens(tweens) = &events[0] else {
            panic!("expected tweens");
        };
        assert_eq!(tweens.len(), 2);
        assert_eq!(tweens[0].property(), TweenProperty::Rotation);
        assert_eq!(tweens[0].loop_mode(), TweenLoop::Repeat);
        assert_eq!(tweens[0].on_complete(), Some(callbacks::LAUNCH_PROJECTILES));
        assert_eq!(tweens[1].property(), TweenProperty::Scale);
        assert_eq!(tweens[1].loop_mode(), TweenLoop::ReverseAndRepeat);

        let dirs = turret.directions();
        assert!((dirs[0] - Vec3::X).length() < 1e-5);
        assert!((dirs[2] - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn launch_fires_four_projectiles() {
        let (mut ctx, id) = setup();
        let turret = Turret::attach(&mut ctx, id, "projectile", &HopConfig::default()).unwrap();
        ctx.events.clear();

        let launched = turret.launch(&mut ctx).unwrap();
        assert_eq!(launched.len(), 4);

        let events = ctx.events.drain();
        let actors = events.iter().filter(|e| matches!(e, GameEvent::AddActor(_))).count();
        assert_eq!(actors, 4);

        let flights: Vec<&Tween> = events
            .iter()
            .filter_map(|e| match e {
                GameEvent::AddTweens(t) => Some(t),
                _ => None,
            })
            .flatten()
            .collect();
        assert_eq!(flights.len(), 4);
        assert!(flights.iter().all(|t| t.duration_ms() == 22_500 && t.easing() == Easing::EaseIn));
        let ends: Vec<Vec3> = flights.iter().map(|t| t.destination()).collect();
        assert!(ends.iter().any(|d| (*d - Vec3::new(17.0, 1.0, 2.0)).length() < 1e-3));
        assert!(ends.iter().any(|d| (*d - Vec3::new(2.0, 1.0, -13.0)).length() < 1e-3));
    }

    #[test]
    fn projectile_removes_itself_on_player() {
        let (mut ctx, _) = setup();
        let shot = ctx.archetypes.instantiate("projectile", EntityId(10), Vec3::new(5.0, 1.0, 5.0)).unwrap();
        ctx.spawn(shot);
        assert!(!update_projectile(&mut ctx, EntityId(10)));

        ctx.spawn(
            Entity::new(EntityId(11))
                .with_kind(ActorKind::Player)
                .with_pos(Vec3::new(5.2, 1.0, 5.0))
                .with_collider(BoxCollider::new(Vec3::splat(0.4))),
        );
        assert!(update_projectile(&mut ctx, EntityId(10)));
        assert_eq!(
            ctx.events.drain(),
            vec![GameEvent::CancelTweens(EntityId(10)), GameEvent::RemoveActor(EntityId(10))]
        );
    }
}
