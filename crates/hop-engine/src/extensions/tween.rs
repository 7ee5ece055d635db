// extensions/tween.rs
//
// Tween system: time-bounded interpolation of one transform property.
// Tweens apply deltas (never absolute writes) so several tweens can drive
// the same entity, and child entities ride along by receiving the same delta.
//
// Usage:
//   let mut tweens = TweenState::new();
//   tweens.add(Tween::translation(&entity, 300, Vec3::NEG_Z, true));
//   tweens.tick(dt_ms, &mut scene);  // flushes buffers, advances all tweens
//   for done in tweens.drain_completed() { ... }

use std::collections::HashMap;
use glam::Vec3;
use crate::api::types::{CallbackId, EntityId};
use crate::components::entity::Entity;
use crate::components::transform::Transform3D;
use crate::core::scene::Scene;
use super::easing::{Easing, lerp_vec3};

/// Which transform property a tween animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TweenProperty {
    Translation,
    Scale,
    /// Euler rotation in degrees.
    Rotation,
}

impl TweenProperty {
    fn read(self, transform: &Transform3D) -> Vec3 {
        match self {
            TweenProperty::Translation => transform.translation,
            TweenProperty::Scale => transform.scale,
            TweenProperty::Rotation => transform.rotation_degrees,
        }
    }

    fn add(self, transform: &mut Transform3D, delta: Vec3) {
        match self {
            TweenProperty::Translation => transform.translate_by(delta),
            TweenProperty::Scale => transform.scale_by(delta),
            TweenProperty::Rotation => transform.rotate_by(delta),
        }
    }
}

/// What happens when a tween reaches its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TweenLoop {
    /// Invoke the callback and stop.
    #[default]
    PlayOnce,
    /// Play forward, then back once, then stop.
    PlayOnceAndReverse,
    /// Restart every cycle. Relative tweens keep stepping by the same delta.
    Repeat,
    /// Ping-pong between origin and destination forever.
    ReverseAndRepeat,
}

/// Completion record produced each time a tween invokes its callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TweenCompleted {
    pub target: EntityId,
    pub callback: CallbackId,
}

/// A single tween animation.
#[derive(Debug, Clone)]
pub struct Tween {
    target: EntityId,
    property: TweenProperty,
    duration_ms: u32,
    easing: Easing,
    loop_mode: TweenLoop,
    relative: bool,
    on_complete: Option<CallbackId>,
    /// Resolved destination (`origin + requested` when relative).
    destination: Vec3,
    /// Destination as requested; used to re-base relative repeats.
    requested: Vec3,
    origin: Vec3,
    /// Value last written by this tween.
    previous: Vec3,
    remaining_ms: f32,
    /// For PlayOnceAndReverse: whether the return leg is playing.
    returning: bool,
    children: Vec<EntityId>,
}

impl Tween {
    /// Create a tween that animates `property` of `target` from its current
    /// value toward `destination`. When `relative`, `destination` is an offset
    /// from the current value.
    pub fn new(
        property: TweenProperty,
        target: &Entity,
        duration_ms: u32,
        destination: Vec3,
        relative: bool,
    ) -> Self {
        let origin = property.read(&target.transform);
        let resolved = if relative { origin + destination } else { destination };
        Self {
            target: target.id,
            property,
            duration_ms,
            easing: Easing::Linear,
            loop_mode: TweenLoop::PlayOnce,
            relative,
            on_complete: None,
            destination: resolved,
            requested: destination,
            origin,
            previous: origin,
            remaining_ms: duration_ms as f32,
            returning: false,
            children: Vec::new(),
        }
    }

    /// Create a translation tween.
    pub fn translation(target: &Entity, duration_ms: u32, destination: Vec3, relative: bool) -> Self {
        Self::new(TweenProperty::Translation, target, duration_ms, destination, relative)
    }

    /// Create a scale tween.
    pub fn scale(target: &Entity, duration_ms: u32, destination: Vec3, relative: bool) -> Self {
        Self::new(TweenProperty::Scale, target, duration_ms, destination, relative)
    }

    /// Create a rotation tween (degrees).
    pub fn rotation(target: &Entity, duration_ms: u32, destination: Vec3, relative: bool) -> Self {
        Self::new(TweenProperty::Rotation, target, duration_ms, destination, relative)
    }

    // -- Builder methods --

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_loop(mut self, mode: TweenLoop) -> Self {
        self.loop_mode = mode;
        self
    }

    pub fn with_on_complete(mut self, callback: CallbackId) -> Self {
        self.on_complete = Some(callback);
        self
    }

    pub fn with_child(mut self, child: EntityId) -> Self {
        self.add_child(child);
        self
    }

    // -- Accessors --

    pub fn target(&self) -> EntityId {
        self.target
    }

    pub fn property(&self) -> TweenProperty {
        self.property
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    pub fn destination(&self) -> Vec3 {
        self.destination
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn loop_mode(&self) -> TweenLoop {
        self.loop_mode
    }

    pub fn is_relative(&self) -> bool {
        self.relative
    }

    pub fn on_complete(&self) -> Option<CallbackId> {
        self.on_complete
    }

    pub fn remaining_ms(&self) -> f32 {
        self.remaining_ms
    }

    pub fn children(&self) -> &[EntityId] {
        &self.children
    }

    /// Start carrying `child` along with the target. Adding twice is a no-op.
    pub fn add_child(&mut self, child: EntityId) {
        if child != self.target && !self.children.contains(&child) {
            self.children.push(child);
        }
    }

    pub fn remove_child(&mut self, child: EntityId) {
        self.children.retain(|&c| c != child);
    }

    /// Advance by `dt_ms`. Returns true once the tween is finished for good.
    ///
    /// A tween whose target is missing or inactive is frozen: no time passes
    /// and nothing is applied.
    pub fn advance(&mut self, dt_ms: f32, scene: &mut Scene, completed: &mut Vec<TweenCompleted>) -> bool {
        match scene.get(self.target) {
            Some(entity) if entity.active => {}
            _ => return false,
        }

        self.remaining_ms -= dt_ms;

        if self.remaining_ms <= 0.0 {
            // Snap so the target and every child land exactly on the destination.
            self.apply(self.destination - self.previous, scene);
            self.previous = self.destination;
            return self.finish_cycle(scene, completed);
        }

        let progress = 1.0 - self.remaining_ms / self.duration_ms as f32;
        let next = lerp_vec3(self.origin, self.destination, self.easing.apply(progress));
        let delta = next - self.previous;
        self.previous = next;
        self.apply(delta, scene);
        false
    }

    fn apply(&self, delta: Vec3, scene: &mut Scene) {
        if let Some(entity) = scene.get_mut(self.target) {
            self.property.add(&mut entity.transform, delta);
        }
        for &child in &self.children {
            if let Some(entity) = scene.get_mut(child) {
                self.property.add(&mut entity.transform, delta);
            }
        }
    }

    fn finish_cycle(&mut self, scene: &mut Scene, completed: &mut Vec<TweenCompleted>) -> bool {
        if let Some(callback) = self.on_complete {
            completed.push(TweenCompleted { target: self.target, callback });
        }

        match self.loop_mode {
            TweenLoop::PlayOnce => true,
            TweenLoop::PlayOnceAndReverse => {
                if self.returning {
                    return true;
                }
                self.returning = true;
                self.restart_reversed();
                false
            }
            TweenLoop::ReverseAndRepeat => {
                self.restart_reversed();
                false
            }
            TweenLoop::Repeat => {
                self.remaining_ms = self.duration_ms as f32;
                if self.relative {
                    self.origin = self.destination;
                    self.destination += self.requested;
                } else {
                    self.apply(self.origin - self.destination, scene);
                    self.previous = self.origin;
                }
                false
            }
        }
    }

    fn restart_reversed(&mut self) {
        self.remaining_ms = self.duration_ms as f32;
        std::mem::swap(&mut self.origin, &mut self.destination);
    }
}

/// Two tweens are equal when they would animate the same thing the same way:
/// target, property, duration, destination, easing, loop mode, relativity
/// and callback. Progress and children do not count.
impl PartialEq for Tween {
    fn eq(&self, other: &Self) -> bool {
        self.target == other.target
            && self.property == other.property
            && self.duration_ms == other.duration_ms
            && self.destination == other.destination
            && self.easing == other.easing
            && self.loop_mode == other.loop_mode
            && self.relative == other.relative
            && self.on_complete == other.on_complete
    }
}

/// Handle to a live tween.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TweenId(pub u32);

/// Manages all live tweens.
///
/// Additions and cancellations are buffered and applied at the start of the
/// next `tick`, so a tween added this frame first advances next frame and
/// the live set is never mutated while it is being iterated.
/// Iteration order over live tweens is unspecified.
#[derive(Debug, Default)]
pub struct TweenState {
    tweens: HashMap<TweenId, Tween>,
    pending_add: Vec<Tween>,
    pending_remove: Vec<TweenId>,
    next_id: u32,
    /// Completion callbacks to be polled.
    completed: Vec<TweenCompleted>,
}

impl TweenState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a tween. It becomes live on the next tick unless an equal tween
    /// is already live.
    pub fn add(&mut self, tween: Tween) {
        self.pending_add.push(tween);
    }

    /// Forward `add_child` to every live or pending tween targeting `target`.
    pub fn attach_child(&mut self, target: EntityId, child: EntityId) {
        for tween in self.tweens_for_mut(target) {
            tween.add_child(child);
        }
    }

    /// Forward `remove_child` to every live or pending tween targeting `target`.
    pub fn detach_child(&mut self, target: EntityId, child: EntityId) {
        for tween in self.tweens_for_mut(target) {
            tween.remove_child(child);
        }
    }

    /// Cancel every tween targeting `entity` and stop carrying it as a child.
    /// Live tweens are dropped at the start of the next tick.
    pub fn cancel_all_for(&mut self, entity: EntityId) {
        self.pending_add.retain(|t| t.target != entity);
        for (&id, tween) in self.tweens.iter() {
            if tween.target == entity && !self.pending_remove.contains(&id) {
                self.pending_remove.push(id);
            }
        }
        for tween in self.tweens.values_mut().chain(self.pending_add.iter_mut()) {
            tween.remove_child(entity);
        }
    }

    /// Flush buffers, then advance all live tweens by `dt_ms`.
    /// Tweens that finish are removed before returning.
    /// Returns the number of tweens that finished this tick.
    pub fn tick(&mut self, dt_ms: f32, scene: &mut Scene) -> usize {
        for id in self.pending_remove.drain(..) {
            self.tweens.remove(&id);
        }

        for tween in std::mem::take(&mut self.pending_add) {
            if self.tweens.values().any(|live| *live == tween) {
                log::debug!("tween for {:?} already scheduled, skipping", tween.target);
                continue;
            }
            let id = TweenId(self.next_id);
            self.next_id += 1;
            self.tweens.insert(id, tween);
        }

        let mut finished = Vec::new();
        for (&id, tween) in self.tweens.iter_mut() {
            if tween.advance(dt_ms, scene, &mut self.completed) {
                finished.push(id);
            }
        }

        let count = finished.len();
        for id in finished {
            self.tweens.remove(&id);
        }
        count
    }

    /// Drain completion records (callback invocations) from previous ticks.
    pub fn drain_completed(&mut self) -> Vec<TweenCompleted> {
        std::mem::take(&mut self.completed)
    }

    /// Live tweens targeting `entity`.
    pub fn tweens_for(&self, entity: EntityId) -> impl Iterator<Item = &Tween> {
        self.tweens.values().filter(move |t| t.target == entity)
    }

    fn tweens_for_mut(&mut self, entity: EntityId) -> impl Iterator<Item = &mut Tween> {
        self.tweens
            .values_mut()
            .chain(self.pending_add.iter_mut())
            .filter(move |t| t.target == entity)
    }

    /// Whether an equal tween is live.
    pub fn contains(&self, tween: &Tween) -> bool {
        self.tweens.values().any(|t| t == tween)
    }

    /// Number of live tweens.
    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    /// Whether there are no live tweens.
    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    /// Number of tweens waiting for the next tick.
    pub fn pending(&self) -> usize {
        self.pending_add.len()
    }

    /// Clear all tweens and buffers.
    pub fn clear(&mut self) {
        self.tweens.clear();
        self.pending_add.clear();
        self.pending_remove.clear();
        self.completed.clear();
    }
}
