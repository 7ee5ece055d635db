use hop_engine::*;

/// Logs sound cues. A host with audio output swaps this for a real mixer.
#[derive(Debug, Default)]
pub struct SoundLog {
    played: Vec<String>,
}

impl SoundLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cues heard so far, oldest first.
    pub fn played(&self) -> &[String] {
        &self.played
    }
}

impl EventListener for SoundLog {
    fn categories(&self) -> &[EventCategory] {
        &[EventCategory::Sound]
    }

    fn handle(&mut self, event: &GameEvent) {
        if let GameEvent::PlaySound(cue) = event {
            log::debug!("sound: {}", cue);
            self.played.push(cue.clone());
        }
    }
}
