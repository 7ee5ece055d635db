// core/collision.rs
//
// Collision queries over the scene's opaque and transparent lists.
//
// Both queries are stateless, walk opaque entities before transparent ones,
// skip the mover itself, and return the first hit in that order.

use glam::Vec3;
use crate::api::types::EntityId;
use crate::components::collider::Ray;
use crate::components::entity::Entity;
use crate::core::scene::Scene;

/// Find the first entity the mover would intersect after moving by `delta`.
///
/// Returns `None` when the mover has no collider or is not in the scene.
pub fn check_all_collisions(scene: &Scene, mover: EntityId, delta: Vec3) -> Option<&Entity> {
    let bounds = scene.get(mover)?.bounds()?;

    scene
        .opaque()
        .iter()
        .chain(scene.transparent())
        .filter(|candidate| candidate.id != mover)
        .find(|candidate| {
            candidate
                .bounds()
                .is_some_and(|other| bounds.intersects(&other, delta))
        })
}

/// Find the first entity whose box the ray hits within `max_distance`.
/// `mover` is excluded so a probe cast from inside its own box ignores itself.
pub fn raycast(
    scene: &Scene,
    mover: EntityId,
    origin: Vec3,
    direction: Vec3,
    max_distance: f32,
) -> Option<&Entity> {
    let ray = Ray::new(origin, direction);

    scene
        .opaque()
        .iter()
        .chain(scene.transparent())
        .filter(|candidate| candidate.id != mover)
        .find(|candidate| {
            candidate
                .bounds()
                .and_then(|b| b.intersects_ray(&ray))
                .is_some_and(|distance| distance <= max_distance)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::ActorKind;
    use crate::components::collider::BoxCollider;
    use crate::components::layer::RenderLayer;

    fn body(id: u32, pos: Vec3) -> Entity {
        Entity::new(EntityId(id))
            .with_pos(pos)
            .with_collider(BoxCollider::new(Vec3::splat(0.4)))
    }

    #[test]
    fn empty_scene_has_no_hits() {
        let mut scene = Scene::new();
        scene.spawn(body(1, Vec3::ZERO));
        assert!(check_all_collisions(&scene, EntityId(1), Vec3::X).is_none());
        assert!(raycast(&scene, EntityId(1), Vec3::ZERO, Vec3::NEG_Y, 10.0).is_none());
    }

    #[test]
    fn finds_opaque_hit_along_delta() {
        let mut scene = Scene::new();
        scene.spawn(body(1, Vec3::ZERO));
        scene.spawn(body(2, Vec3::new(0.0, 0.0, -1.0)).with_kind(ActorKind::Obstacle));

        assert!(check_all_collisions(&scene, EntityId(1), Vec3::ZERO).is_none());
        let hit = check_all_collisions(&scene, EntityId(1), Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(hit.map(|e| e.id), Some(EntityId(2)));
    }

    #[test]
    fn opaque_wins_over_transparent() {
        let mut scene = Scene::new();
        let target = Vec3::new(1.0, 0.0, 0.0);
        // Transparent trigger registered first, opaque blocker second.
        scene.spawn(body(3, target).with_layer(RenderLayer::Transparent));
        scene.spawn(body(1, Vec3::ZERO));
        scene.spawn(body(2, target).with_kind(ActorKind::BlockingObstacle));

        let hit = check_all_collisions(&scene, EntityId(1), Vec3::X);
        assert_eq!(hit.map(|e| e.id), Some(EntityId(2)));
    }

    #[test]
    fn transparent_only_hit_is_found() {
        let mut scene = Scene::new();
        scene.spawn(body(1, Vec3::ZERO));
        scene.spawn(body(3, Vec3::X).with_layer(RenderLayer::Transparent));
        let hit = check_all_collisions(&scene, EntityId(1), Vec3::X);
        assert_eq!(hit.map(|e| e.id), Some(EntityId(3)));
    }

    #[test]
    fn entities_without_colliders_are_ignored() {
        let mut scene = Scene::new();
        scene.spawn(body(1, Vec3::ZERO));
        scene.spawn(Entity::new(EntityId(2)).with_pos(Vec3::X));
        assert!(check_all_collisions(&scene, EntityId(1), Vec3::X).is_none());
    }

    #[test]
    fn raycast_respects_max_distance() {
        let mut scene = Scene::new();
        scene.spawn(body(1, Vec3::new(0.0, 1.0, 0.0)));
        scene.spawn(
            Entity::new(EntityId(2))
                .with_pos(Vec3::ZERO)
                .with_collider(BoxCollider::unit())
                .with_kind(ActorKind::GrassTile),
        );

        let origin = Vec3::new(0.0, 1.0, 0.0);
        let hit = raycast(&scene, EntityId(1), origin, Vec3::NEG_Y, 1.0);
        assert_eq!(hit.map(|e| e.id), Some(EntityId(2)));
        // Tile top is 0.5 below the origin.
        assert!(raycast(&scene, EntityId(1), origin, Vec3::NEG_Y, 0.25).is_none());
    }

    #[test]
    fn raycast_skips_self() {
        let mut scene = Scene::new();
        scene.spawn(body(1, Vec3::ZERO));
        assert!(raycast(&scene, EntityId(1), Vec3::ZERO, Vec3::NEG_Y, 5.0).is_none());
    }
}
