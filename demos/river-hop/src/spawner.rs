use glam::Vec3;
use hop_engine::*;

use crate::callbacks;

/// Sends obstacles (cars, logs) across a row and recycles them on arrival.
#[derive(Debug, Clone)]
pub struct ObstacleSpawner {
    pub id: EntityId,
    archetype: String,
    direction: Vec3,
    /// Shift applied to the spawn point and to pre-placed obstacles.
    spawn_offset: Vec3,
    /// Where obstacles (re)enter the row.
    spawn_point: Vec3,
    /// Where they leave it.
    destination: Vec3,
    obstacles: Vec<EntityId>,
}

impl ObstacleSpawner {
    /// `level_width` is how far obstacles travel along `direction`.
    pub fn new(
        spawner: &Entity,
        archetype: impl Into<String>,
        direction: Vec3,
        level_width: f32,
        spawn_offset: Vec3,
    ) -> Self {
        let spawn_point = spawner.pos() + spawn_offset;
        Self {
            id: spawner.id,
            archetype: archetype.into(),
            direction,
            spawn_offset,
            spawn_point,
            destination: spawn_point + direction * level_width,
            obstacles: Vec::new(),
        }
    }

    pub fn archetype(&self) -> &str {
        &self.archetype
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn obstacles(&self) -> &[EntityId] {
        &self.obstacles
    }

    pub fn owns(&self, obstacle: EntityId) -> bool {
        self.obstacles.contains(&obstacle)
    }

    /// Adopt obstacles placed by the level, shift them by the spawn offset
    /// and start them moving.
    pub fn start(&mut self, ctx: &mut EngineContext, obstacles: &[EntityId]) {
        for &id in obstacles {
            if self.owns(id) {
                continue;
            }
            if let Some(entity) = ctx.scene.get_mut(id) {
                entity.transform.translate_by(self.spawn_offset);
            }
            self.obstacles.push(id);
            self.send(ctx, id);
        }
    }

    /// Create a fresh obstacle at the spawn point and start it moving.
    pub fn spawn(&mut self, ctx: &mut EngineContext) -> Result<EntityId> {
        let id = ctx.spawn_archetype(&self.archetype, self.spawn_point)?;
        self.obstacles.push(id);
        self.send(ctx, id);
        Ok(id)
    }

    /// Obstacle reached the far side: put it back at the spawn point and resend.
    pub fn reset(&mut self, ctx: &mut EngineContext, obstacle: EntityId) {
        if !self.owns(obstacle) {
            return;
        }
        if let Some(entity) = ctx.scene.get_mut(obstacle) {
            let y = entity.transform.translation.y;
            entity.transform.translation = Vec3::new(self.spawn_point.x, y, self.spawn_point.z);
        }
        self.send(ctx, obstacle);
    }

    pub fn forget(&mut self, obstacle: EntityId) {
        self.obstacles.retain(|&o| o != obstacle);
    }

    /// Publish a tween carrying the obstacle to the destination, at one
    /// second per whole world unit. Obstacles keep their own height.
    fn send(&self, ctx: &mut EngineContext, obstacle: EntityId) {
        let Some(entity) = ctx.scene.get(obstacle) else {
            log::warn!("spawner {:?} lost obstacle {:?}", self.id, obstacle);
            return;
        };
        let start = entity.pos();
        let destination = Vec3::new(self.destination.x, start.y, self.destination.z);
        let duration_ms = 1000 * ((destination - start).length() as u32).max(1);

        let tween = Tween::translation(entity, duration_ms, destination, false)
            .with_on_complete(callbacks::RESET_OBSTACLE);
        ctx.publish(GameEvent::add_tween(tween));
    }
}
