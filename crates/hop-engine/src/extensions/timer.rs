// extensions/timer.rs
//
// Named one-shot delayed callbacks.
//
// Usage:
//   timers.schedule_once("intro", 9.0, Box::new(|events| events.publish(GameEvent::Activate(id))));
//   timers.tick(dt_secs, &mut events);
//
// Like tweens, additions and cancellations are buffered until the next tick.

use std::collections::HashMap;
use crate::core::events::EventDispatcher;

/// Callback run once when a timer expires. It may only publish events.
pub type TimerCallback = Box<dyn FnOnce(&mut EventDispatcher)>;

struct Timer {
    delay_secs: f32,
    elapsed_secs: f32,
    paused: bool,
    callback: Option<TimerCallback>,
}

impl Timer {
    fn new(delay_secs: f32, callback: TimerCallback) -> Self {
        Self {
            delay_secs,
            elapsed_secs: 0.0,
            paused: false,
            callback: Some(callback),
        }
    }
}

#[derive(Default)]
pub struct TimerState {
    timers: HashMap<String, Timer>,
    pending_add: Vec<(String, Timer)>,
    pending_remove: Vec<String>,
}

impl TimerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `callback` to run after `delay_secs` of unpaused time.
    /// Returns false (and does nothing) if a timer with this name is already
    /// live or pending; the first registration wins.
    pub fn schedule_once(&mut self, name: impl Into<String>, delay_secs: f32, callback: TimerCallback) -> bool {
        let name = name.into();
        if self.is_scheduled(&name) {
            log::debug!("timer '{}' already scheduled, ignoring", name);
            return false;
        }
        self.pending_add.push((name, Timer::new(delay_secs, callback)));
        true
    }

    /// Stop accumulating time for `name`.
    pub fn pause(&mut self, name: &str) {
        self.set_paused(name, true);
    }

    pub fn resume(&mut self, name: &str) {
        self.set_paused(name, false);
    }

    fn set_paused(&mut self, name: &str, paused: bool) {
        if let Some(timer) = self.timers.get_mut(name) {
            timer.paused = paused;
        }
        for (pending, timer) in self.pending_add.iter_mut() {
            if pending == name {
                timer.paused = paused;
            }
        }
    }

    /// Cancel `name`. A live timer is dropped at the start of the next tick.
    pub fn cancel(&mut self, name: &str) {
        self.pending_add.retain(|(pending, _)| pending != name);
        if self.timers.contains_key(name) && !self.pending_remove.iter().any(|n| n == name) {
            self.pending_remove.push(name.to_string());
        }
    }

    /// Flush removals, flush additions, then advance every unpaused timer.
    /// Returns the number of callbacks fired.
    pub fn tick(&mut self, dt_secs: f32, events: &mut EventDispatcher) -> usize {
        for name in self.pending_remove.drain(..) {
            self.timers.remove(&name);
        }

        for (name, timer) in self.pending_add.drain(..) {
            self.timers.entry(name).or_insert(timer);
        }

        let mut fired = 0;
        for (name, timer) in self.timers.iter_mut() {
            // Fired timers wait here until the removal flush.
            if timer.paused || timer.callback.is_none() {
                continue;
            }
            timer.elapsed_secs += dt_secs;
            if timer.elapsed_secs >= timer.delay_secs {
                if let Some(callback) = timer.callback.take() {
                    callback(events);
                    fired += 1;
                }
                self.pending_remove.push(name.clone());
            }
        }
        fired
    }

    /// Whether a timer with this name is pending, or live and neither fired
    /// nor cancelled.
    pub fn is_scheduled(&self, name: &str) -> bool {
        let live = self.timers.get(name).is_some_and(|t| t.callback.is_some())
            && !self.pending_remove.iter().any(|n| n == name);
        live || self.pending_add.iter().any(|(pending, _)| pending == name)
    }

    pub fn is_paused(&self, name: &str) -> bool {
        self.timers.get(name).is_some_and(|t| t.paused)
            || self.pending_add.iter().any(|(pending, t)| pending == name && t.paused)
    }

    /// Number of live timers.
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    pub fn clear(&mut self) {
        self.timers.clear();
        self.pending_add.clear();
        self.pending_remove.clear();
    }
}
