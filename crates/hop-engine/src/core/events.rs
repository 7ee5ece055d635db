use std::collections::VecDeque;
use crate::api::types::EntityId;
use crate::components::entity::Entity;
use crate::extensions::tween::Tween;

/// Broad grouping used by listeners to subscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventCategory {
    Object,
    Tween,
    GameState,
    Menu,
    Sound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuAction {
    Play,
    Win,
    Lose,
}

/// Notifications published by gameplay code.
/// Publishers never call subsystems directly; the runner routes these.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    // Object
    AddActor(Entity),
    RemoveActor(EntityId),
    // Tween
    AddTweens(Vec<Tween>),
    AddTweenChild { target: EntityId, child: EntityId },
    RemoveTweenChild { target: EntityId, child: EntityId },
    CancelTweens(EntityId),
    // GameState
    Lose,
    Win,
    Pickup(EntityId),
    Spawn(EntityId),
    Start(String),
    Activate(EntityId),
    // Menu
    Menu(MenuAction),
    // Sound
    PlaySound(String),
}

impl GameEvent {
    pub fn category(&self) -> EventCategory {
        match self {
            GameEvent::AddActor(_) | GameEvent::RemoveActor(_) => EventCategory::Object,
            GameEvent::AddTweens(_)
            | GameEvent::AddTweenChild { .. }
            | GameEvent::RemoveTweenChild { .. }
            | GameEvent::CancelTweens(_) => EventCategory::Tween,
            GameEvent::Lose
            | GameEvent::Win
            | GameEvent::Pickup(_)
            | GameEvent::Spawn(_)
            | GameEvent::Start(_)
            | GameEvent::Activate(_) => EventCategory::GameState,
            GameEvent::Menu(_) => EventCategory::Menu,
            GameEvent::PlaySound(_) => EventCategory::Sound,
        }
    }

    /// Convenience for publishing a single tween.
    pub fn add_tween(tween: Tween) -> Self {
        GameEvent::AddTweens(vec![tween])
    }
}

/// Subscriber to one or more event categories.
///
/// A listener only observes; it cannot veto or roll back the publisher.
pub trait EventListener {
    fn categories(&self) -> &[EventCategory];

    fn handle(&mut self, event: &GameEvent);

    fn wants(&self, category: EventCategory) -> bool {
        self.categories().contains(&category)
    }
}

/// FIFO queue of published events, drained once per step.
#[derive(Debug, Default)]
pub struct EventDispatcher {
    queue: VecDeque<GameEvent>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&mut self, event: GameEvent) {
        self.queue.push_back(event);
    }

    /// Take the oldest event.
    pub fn pop(&mut self) -> Option<GameEvent> {
        self.queue.pop_front()
    }

    /// Drain all pending events in publish order.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        self.queue.drain(..).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.queue.iter()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }
}
