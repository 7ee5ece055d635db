use glam::Vec3;
use hop_engine::*;

/// One leg of a chained animation: a relative translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HopPhase {
    pub offset: Vec3,
    pub duration_ms: u32,
    pub easing: Easing,
}

impl HopPhase {
    /// Translation tween for `entity` that fires `callback` on arrival.
    pub fn tween(&self, entity: &Entity, callback: CallbackId) -> Tween {
        Tween::translation(entity, self.duration_ms, self.offset, true)
            .with_easing(self.easing)
            .with_on_complete(callback)
    }
}

/// Ordered list of phases played back to back.
///
/// The player publishes the first phase, then calls `advance` from each
/// completion callback until the chain runs out.
#[derive(Debug, Clone, PartialEq)]
pub struct HopChain {
    phases: Vec<HopPhase>,
    next: usize,
}

impl HopChain {
    pub fn new(phases: Vec<HopPhase>) -> Self {
        Self { phases, next: 0 }
    }

    /// Arched hop along `step`: rise to half way plus `height`, then drop to
    /// the end. The two offsets sum to exactly `step`.
    pub fn arc(step: Vec3, height: f32, total_ms: u32) -> Self {
        let rise = total_ms / 2;
        let lift = Vec3::Y * height;
        Self::new(vec![
            HopPhase { offset: step * 0.5 + lift, duration_ms: rise, easing: Easing::EaseOut },
            HopPhase { offset: step * 0.5 - lift, duration_ms: total_ms - rise, easing: Easing::EaseIn },
        ])
    }

    /// Straight drop.
    pub fn fall(depth: f32, duration_ms: u32) -> Self {
        Self::new(vec![HopPhase {
            offset: Vec3::NEG_Y * depth,
            duration_ms,
            easing: Easing::EaseIn,
        }])
    }

    /// Take the next phase, or `None` once every phase has played.
    pub fn advance(&mut self) -> Option<HopPhase> {
        let phase = self.phases.get(self.next).copied()?;
        self.next += 1;
        Some(phase)
    }

    pub fn is_finished(&self) -> bool {
        self.next >= self.phases.len()
    }

    pub fn phases(&self) -> &[HopPhase] {
        &self.phases
    }
}
