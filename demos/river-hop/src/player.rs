use glam::Vec3;
use hop_engine::*;

use crate::callbacks;
use crate::config::HopConfig;
use crate::hop::HopChain;

/// Movement directions, in the same order as `HopConfig::move_keys`.
const DIRECTIONS: [Vec3; 4] = [Vec3::NEG_Z, Vec3::Z, Vec3::NEG_X, Vec3::X];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    /// Standing on solid ground, accepting input.
    Idle,
    /// A hop is in flight; input is ignored.
    Moving,
    /// Nothing underfoot; the fall tween ends in death.
    Falling,
    /// Riding a floating platform, accepting input.
    Attached,
    Dead,
}

impl PlayerState {
    pub fn accepts_input(self) -> bool {
        matches!(self, PlayerState::Idle | PlayerState::Attached)
    }
}

/// Drives the player entity: input, collision response, hops, landing.
///
/// Every effect on other systems is a published event.
#[derive(Debug, Clone)]
pub struct PlayerController {
    pub id: EntityId,
    config: HopConfig,
    state: PlayerState,
    /// Platform the player is currently riding.
    platform: Option<EntityId>,
    hop: Option<HopChain>,
}

impl PlayerController {
    pub fn new(id: EntityId, config: HopConfig) -> Self {
        Self {
            id,
            config,
            state: PlayerState::Idle,
            platform: None,
            hop: None,
        }
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn platform(&self) -> Option<EntityId> {
        self.platform
    }

    /// First held movement key in binding order.
    fn intent(&self, input: &KeyboardState) -> Option<Vec3> {
        self.config
            .move_keys
            .iter()
            .zip(DIRECTIONS)
            .find(|(key, _)| input.is_key_down(**key))
            .map(|(_, direction)| direction)
    }

    pub fn update(&mut self, ctx: &mut EngineContext, input: &KeyboardState) {
        if matches!(self.state, PlayerState::Dead | PlayerState::Falling) {
            return;
        }
        if !ctx.scene.get(self.id).is_some_and(|p| p.active) {
            return;
        }

        // Anything lethal that moved into the player, standing or mid-hop.
        let touching = check_all_collisions(&ctx.scene, self.id, Vec3::ZERO).map(|e| e.kind.response());
        if touching == Some(CollisionResponse::Kill) {
            self.die(ctx);
            return;
        }

        if !self.state.accepts_input() {
            return;
        }
        let Some(direction) = self.intent(input) else {
            return;
        };

        let delta = direction * self.config.hop_distance;
        let hit = check_all_collisions(&ctx.scene, self.id, delta).map(|e| (e.id, e.kind.response()));

        match hit {
            Some((_, CollisionResponse::Block)) => return,
            Some((_, CollisionResponse::Kill)) => {
                self.die(ctx);
                return;
            }
            Some((item, CollisionResponse::Pickup)) => {
                ctx.publish(GameEvent::RemoveActor(item));
                ctx.publish(GameEvent::Pickup(item));
            }
            Some((_, CollisionResponse::Win)) => {
                ctx.publish(GameEvent::Win);
            }
            Some((_, CollisionResponse::PassThrough)) | None => {}
        }

        self.start_chain(ctx, HopChain::arc(delta, self.config.hop_height, self.config.move_time_ms));
        self.state = PlayerState::Moving;
        ctx.publish(GameEvent::PlaySound("hop".into()));
    }

    /// Publish the first phase of `chain` and keep the rest.
    fn start_chain(&mut self, ctx: &mut EngineContext, mut chain: HopChain) {
        let Some(player) = ctx.scene.get(self.id) else {
            return;
        };
        if let Some(phase) = chain.advance() {
            let tween = phase.tween(player, callbacks::HOP_PHASE);
            ctx.publish(GameEvent::add_tween(tween));
        }
        self.hop = Some(chain);
    }

    /// A hop phase finished: play the next one, or land.
    pub fn on_hop_phase(&mut self, ctx: &mut EngineContext) {
        if self.state != PlayerState::Moving {
            return;
        }
        let next = self.hop.as_mut().and_then(HopChain::advance);
        let tween = match (next, ctx.scene.get(self.id)) {
            (Some(phase), Some(player)) => Some(phase.tween(player, callbacks::HOP_PHASE)),
            _ => None,
        };
        match tween {
            Some(tween) => ctx.publish(GameEvent::add_tween(tween)),
            None => self.land(ctx),
        }
    }

    /// The fall tween finished.
    pub fn on_fall_complete(&mut self, ctx: &mut EngineContext) {
        if self.state == PlayerState::Falling {
            self.die(ctx);
        }
    }

    /// The platform being ridden was teleported back to its spawn point.
    pub fn on_platform_reset(&mut self, ctx: &mut EngineContext, platform: EntityId) {
        if self.platform == Some(platform) && self.state == PlayerState::Attached {
            log::debug!("platform {:?} left with the player aboard", platform);
            self.platform = None;
            self.land(ctx);
        }
    }

    /// Probe below the player and react to what is (or isn't) there.
    fn land(&mut self, ctx: &mut EngineContext) {
        self.hop = None;
        let Some(origin) = ctx.scene.get(self.id).map(Entity::pos) else {
            return;
        };

        let ground = raycast(&ctx.scene, self.id, origin, Vec3::NEG_Y, self.config.ground_probe_distance)
            .map(|e| (e.id, e.kind, e.pos()));

        match ground {
            None => self.fall(ctx),
            Some((_, kind, _)) if kind.response() == CollisionResponse::Kill => self.die(ctx),
            Some((platform, ActorKind::WaterPlatform, platform_pos)) => {
                self.attach(ctx, platform, platform_pos);
            }
            Some(_) => {
                self.leave_platform(ctx);
                self.state = PlayerState::Idle;
            }
        }
    }

    fn attach(&mut self, ctx: &mut EngineContext, platform: EntityId, platform_pos: Vec3) {
        if self.platform != Some(platform) {
            self.leave_platform(ctx);
            ctx.publish(GameEvent::AddTweenChild { target: platform, child: self.id });
            self.platform = Some(platform);
            log::debug!("player attached to platform {:?}", platform);
        }
        if let Some(player) = ctx.scene.get_mut(self.id) {
            player.transform.translation.x = platform_pos.x;
            player.transform.translation.z = platform_pos.z;
        }
        self.state = PlayerState::Attached;
    }

    fn leave_platform(&mut self, ctx: &mut EngineContext) {
        if let Some(previous) = self.platform.take() {
            ctx.publish(GameEvent::RemoveTweenChild { target: previous, child: self.id });
            log::debug!("player left platform {:?}", previous);
        }
    }

    fn fall(&mut self, ctx: &mut EngineContext) {
        self.leave_platform(ctx);
        self.state = PlayerState::Falling;
        let phase = HopChain::fall(self.config.fall_depth, self.config.fall_time_ms).advance();
        let tween = match (phase, ctx.scene.get(self.id)) {
            (Some(phase), Some(player)) => phase.tween(player, callbacks::FALL),
            _ => return,
        };
        ctx.publish(GameEvent::add_tween(tween));
    }

    /// Publish lose + removal exactly once.
    pub fn die(&mut self, ctx: &mut EngineContext) {
        if self.state == PlayerState::Dead {
            return;
        }
        self.leave_platform(ctx);
        self.state = PlayerState::Dead;
        self.hop = None;
        log::info!("player {:?} died", self.id);
        ctx.publish(GameEvent::Lose);
        ctx.publish(GameEvent::RemoveActor(self.id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAYER: EntityId = EntityId(1);

    fn player_at(pos: Vec3) -> Entity {
        Entity::new(PLAYER)
            .with_kind(ActorKind::Player)
            .with_pos(pos)
            .with_collider(BoxCollider::new(Vec3::splat(0.4)))
    }

    fn block(id: u32, kind: ActorKind, pos: Vec3) -> Entity {
        Entity::new(EntityId(id))
            .with_kind(kind)
            .with_pos(pos)
            .with_collider(BoxCollider::unit())
    }

    fn pressed(key: u32) -> KeyboardState {
        let mut kb = KeyboardState::new();
        kb.apply([InputEvent::KeyDown { key_code: key }]);
        kb
    }

    /// Route queued events the way the runner does and return them.
    fn dispatch(ctx: &mut EngineContext) -> Vec<GameEvent> {
        let events = ctx.events.drain();
        for event in &events {
            ctx.route(event);
        }
        events
    }

    /// Tick tweens and feed callbacks back to the controller until it settles.
    fn run(ctx: &mut EngineContext, player: &mut PlayerController, steps: usize) -> Vec<GameEvent> {
        let mut seen = dispatch(ctx);
        for _ in 0..steps {
            ctx.tweens.tick(50.0, &mut ctx.scene);
            for done in ctx.tweens.drain_completed() {
                if done.target != player.id {
                    continue;
                }
                match done.callback {
                    callbacks::HOP_PHASE => player.on_hop_phase(ctx),
                    callbacks::FALL => player.on_fall_complete(ctx),
                    _ => {}
                }
            }
            seen.extend(dispatch(ctx));
        }
        seen
    }

    fn ground_row(ctx: &mut EngineContext) {
        for (i, z) in [0.0, -1.0, -2.0].into_iter().enumerate() {
            ctx.spawn(block(10 + i as u32, ActorKind::GrassTile, Vec3::new(0.0, 0.0, z)));
        }
    }

    #[test]
    fn hop_lands_one_unit_forward() {
        let mut ctx = EngineContext::new();
        ground_row(&mut ctx);
        ctx.spawn(player_at(Vec3::new(0.0, 1.0, 0.0)));
        let mut player = PlayerController::new(PLAYER, HopConfig::default());

        player.update(&mut ctx, &pressed(keys::W));
        assert_eq!(player.state(), PlayerState::Moving);

        // Held key is ignored mid-hop.
        player.update(&mut ctx, &pressed(keys::W));
        run(&mut ctx, &mut player, 10);

        let pos = ctx.scene.get(PLAYER).unwrap().pos();
        assert!((pos - Vec3::new(0.0, 1.0, -1.0)).length() < 1e-4);
        assert_eq!(player.state(), PlayerState::Idle);
    }

    #[test]
    fn arc_peaks_above_the_line() {
        let mut ctx = EngineContext::new();
        ground_row(&mut ctx);
        ctx.spawn(player_at(Vec3::new(0.0, 1.0, 0.0)));
        let mut player = PlayerController::new(PLAYER, HopConfig::default());

        player.update(&mut ctx, &pressed(keys::W));
        // Up phase: 150ms, three 50ms ticks after activation.
        run(&mut ctx, &mut player, 3);
        let pos = ctx.scene.get(PLAYER).unwrap().pos();
        assert!((pos - Vec3::new(0.0, 1.5, -0.5)).length() < 1e-4);
    }

    #[test]
    fn blocking_obstacle_cancels_move() {
        let mut ctx = EngineContext::new();
        ground_row(&mut ctx);
        ctx.spawn(player_at(Vec3::new(0.0, 1.0, 0.0)));
        ctx.spawn(block(20, ActorKind::BlockingObstacle, Vec3::new(0.0, 1.0, -1.0)));
        let mut player = PlayerController::new(PLAYER, HopConfig::default());

        player.update(&mut ctx, &pressed(keys::W));
        assert_eq!(player.state(), PlayerState::Idle);
        assert!(ctx.events.is_empty());
    }

    #[test]
    fn obstacle_kills_without_moving() {
        let mut ctx = EngineContext::new();
        ground_row(&mut ctx);
        ctx.spawn(player_at(Vec3::new(0.0, 1.0, 0.0)));
        ctx.spawn(block(20, ActorKind::Obstacle, Vec3::new(1.0, 1.0, 0.0)));
        let mut player = PlayerController::new(PLAYER, HopConfig::default());

        player.update(&mut ctx, &pressed(keys::D));
        assert_eq!(player.state(), PlayerState::Dead);
        let events = ctx.events.drain();
        assert_eq!(events, vec![GameEvent::Lose, GameEvent::RemoveActor(PLAYER)]);

        player.update(&mut ctx, &pressed(keys::D));
        assert!(ctx.events.is_empty());
    }

    #[test]
    fn pickup_is_collected_and_move_proceeds() {
        let mut ctx = EngineContext::new();
        ground_row(&mut ctx);
        ctx.spawn(player_at(Vec3::new(0.0, 1.0, 0.0)));
        ctx.spawn(
            Entity::new(EntityId(30))
                .with_kind(ActorKind::Pickup)
                .with_pos(Vec3::new(0.0, 1.0, -1.0))
                .with_layer(RenderLayer::Transparent)
                .with_collider(BoxCollider::new(Vec3::splat(0.3))),
        );
        let mut player = PlayerController::new(PLAYER, HopConfig::default());

        player.update(&mut ctx, &pressed(keys::W));
        assert_eq!(player.state(), PlayerState::Moving);
        let events: Vec<_> = ctx.events.iter().cloned().collect();
        assert_eq!(events[0], GameEvent::RemoveActor(EntityId(30)));
        assert_eq!(events[1], GameEvent::Pickup(EntityId(30)));
    }

    #[test]
    fn win_zone_publishes_win_and_moves() {
        let mut ctx = EngineContext::new();
        ground_row(&mut ctx);
        ctx.spawn(player_at(Vec3::new(0.0, 1.0, 0.0)));
        ctx.spawn(block(40, ActorKind::WinZone, Vec3::new(0.0, 1.0, -1.0)).with_layer(RenderLayer::Transparent));
        let mut player = PlayerController::new(PLAYER, HopConfig::default());

        player.update(&mut ctx, &pressed(keys::W));
        assert!(ctx.events.iter().any(|e| *e == GameEvent::Win));
        assert_eq!(player.state(), PlayerState::Moving);
    }

    #[test]
    fn car_driving_through_idle_player_kills_it() {
        let mut ctx = EngineContext::new();
        ctx.spawn(block(10, ActorKind::RoadTile, Vec3::ZERO));
        ctx.spawn(player_at(Vec3::new(0.0, 1.0, 0.0)));
        let car = Entity::new(EntityId(20))
            .with_kind(ActorKind::Obstacle)
            .with_pos(Vec3::new(-3.0, 1.0, 0.0))
            .with_collider(BoxCollider::new(Vec3::new(0.45, 0.4, 0.4)));
        let drive = Tween::translation(&car, 600, Vec3::new(3.0, 1.0, 0.0), false);
        ctx.spawn(car);
        ctx.tweens.add(drive);
        let mut player = PlayerController::new(PLAYER, HopConfig::default());

        let idle = KeyboardState::new();
        let mut loses = 0;
        for _ in 0..20 {
            ctx.tweens.tick(50.0, &mut ctx.scene);
            player.update(&mut ctx, &idle);
            loses += dispatch(&mut ctx).iter().filter(|e| **e == GameEvent::Lose).count();
        }

        assert_eq!(loses, 1);
        assert_eq!(player.state(), PlayerState::Dead);
        assert!(!ctx.scene.contains(PLAYER));
    }

    #[test]
    fn projectile_touching_idle_player_kills_it() {
        let mut ctx = EngineContext::new();
        ground_row(&mut ctx);
        ctx.spawn(player_at(Vec3::new(0.0, 1.0, 0.0)));
        ctx.spawn(
            Entity::new(EntityId(30))
                .with_kind(ActorKind::Projectile)
                .with_pos(Vec3::new(0.3, 1.0, 0.0))
                .with_layer(RenderLayer::Transparent)
                .with_collider(BoxCollider::new(Vec3::splat(0.2))),
        );
        let mut player = PlayerController::new(PLAYER, HopConfig::default());

        player.update(&mut ctx, &KeyboardState::new());
        assert_eq!(player.state(), PlayerState::Dead);
        assert_eq!(ctx.events.drain(), vec![GameEvent::Lose, GameEvent::RemoveActor(PLAYER)]);
    }

    #[test]
    fn car_hits_player_mid_hop() {
        let mut ctx = EngineContext::new();
        ground_row(&mut ctx);
        ctx.spawn(player_at(Vec3::new(0.0, 1.0, 0.0)));
        let mut player = PlayerController::new(PLAYER, HopConfig::default());
        player.update(&mut ctx, &pressed(keys::W));
        run(&mut ctx, &mut player, 2);
        assert_eq!(player.state(), PlayerState::Moving);

        let at = ctx.scene.get(PLAYER).unwrap().pos();
        ctx.spawn(block(20, ActorKind::Obstacle, at));
        player.update(&mut ctx, &KeyboardState::new());
        assert_eq!(player.state(), PlayerState::Dead);
    }

    #[test]
    fn inactive_player_ignores_input() {
        let mut ctx = EngineContext::new();
        ground_row(&mut ctx);
        ctx.spawn(player_at(Vec3::new(0.0, 1.0, 0.0)).inactive());
        let mut player = PlayerController::new(PLAYER, HopConfig::default());
        player.update(&mut ctx, &pressed(keys::W));
        assert_eq!(player.state(), PlayerState::Idle);
        assert!(ctx.events.is_empty());
    }

    #[test]
    fn bind_order_decides_between_held_keys() {
        let mut kb = KeyboardState::new();
        kb.apply([
            InputEvent::KeyDown { key_code: keys::D },
            InputEvent::KeyDown { key_code: keys::S },
        ]);
        let player = PlayerController::new(PLAYER, HopConfig::default());
        assert_eq!(player.intent(&kb), Some(Vec3::Z));
    }

    #[test]
    fn no_ground_falls_and_dies_once() {
        let mut ctx = EngineContext::new();
        // Only the starting tile; the hop lands over nothing.
        ctx.spawn(block(10, ActorKind::GrassTile, Vec3::ZERO));
        ctx.spawn(player_at(Vec3::new(0.0, 1.0, 0.0)));
        let mut player = PlayerController::new(PLAYER, HopConfig::default());

        player.update(&mut ctx, &pressed(keys::W));
        let events = run(&mut ctx, &mut player, 20);

        let fall_tweens = events
            .iter()
            .filter_map(|e| match e {
                GameEvent::AddTweens(t) => Some(t),
                _ => None,
            })
            .flatten()
            .filter(|t| t.on_complete() == Some(callbacks::FALL))
            .count();
        assert_eq!(fall_tweens, 1);

        let loses = events.iter().filter(|e| **e == GameEvent::Lose).count();
        assert_eq!(loses, 1);
        assert!(events.contains(&GameEvent::RemoveActor(PLAYER)));
        assert_eq!(player.state(), PlayerState::Dead);
        assert!(!ctx.scene.contains(PLAYER));
    }

    #[test]
    fn platform_to_platform_detaches_then_attaches() {
        let mut ctx = EngineContext::new();
        let p1 = EntityId(50);
        let p2 = EntityId(51);
        ctx.spawn(block(50, ActorKind::WaterPlatform, Vec3::ZERO));
        ctx.spawn(block(51, ActorKind::WaterPlatform, Vec3::new(0.3, 0.0, -1.0)));
        ctx.spawn(player_at(Vec3::new(0.0, 1.0, 0.0)));
        let mut player = PlayerController::new(PLAYER, HopConfig::default());

        // Land on P1 first.
        player.land(&mut ctx);
        assert_eq!(player.state(), PlayerState::Attached);
        assert_eq!(player.platform(), Some(p1));
        dispatch(&mut ctx);

        player.update(&mut ctx, &pressed(keys::W));
        let events = run(&mut ctx, &mut player, 10);

        let couplings: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, GameEvent::AddTweenChild { .. } | GameEvent::RemoveTweenChild { .. }))
            .cloned()
            .collect();
        assert_eq!(
            couplings,
            vec![
                GameEvent::RemoveTweenChild { target: p1, child: PLAYER },
                GameEvent::AddTweenChild { target: p2, child: PLAYER },
            ]
        );
        assert_eq!(player.platform(), Some(p2));

        // Snapped onto the platform's XZ.
        let pos = ctx.scene.get(PLAYER).unwrap().pos();
        assert!((pos.x - 0.3).abs() < 1e-4);
        assert!((pos.z + 1.0).abs() < 1e-4);
    }

    #[test]
    fn riding_a_platform_moves_the_player() {
        let mut ctx = EngineContext::new();
        ctx.spawn(block(50, ActorKind::WaterPlatform, Vec3::ZERO));
        ctx.spawn(player_at(Vec3::new(0.0, 1.0, 0.0)));
        let mut player = PlayerController::new(PLAYER, HopConfig::default());

        let platform = ctx.scene.get(EntityId(50)).unwrap().clone();
        ctx.tweens.add(Tween::translation(&platform, 1000, Vec3::new(2.0, 0.0, 0.0), true));
        ctx.tweens.tick(0.0, &mut ctx.scene);

        player.land(&mut ctx);
        dispatch(&mut ctx);
        ctx.tweens.tick(500.0, &mut ctx.scene);

        let pos = ctx.scene.get(PLAYER).unwrap().pos();
        assert!((pos - Vec3::new(1.0, 1.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn platform_reset_drops_the_rider() {
        let mut ctx = EngineContext::new();
        ctx.spawn(block(50, ActorKind::WaterPlatform, Vec3::ZERO));
        ctx.spawn(player_at(Vec3::new(0.0, 1.0, 0.0)));
        let mut player = PlayerController::new(PLAYER, HopConfig::default());
        player.land(&mut ctx);
        dispatch(&mut ctx);

        // Platform teleports away from under the player.
        ctx.scene.get_mut(EntityId(50)).unwrap().transform.translation = Vec3::new(-9.0, 0.0, 0.0);
        player.on_platform_reset(&mut ctx, EntityId(50));
        assert_eq!(player.state(), PlayerState::Falling);
        assert_eq!(player.platform(), None);
    }
}
