use serde::{Deserialize, Serialize};

/// Render layer: decides which scene list an entity lives in.
///
/// Opaque entities are drawn (and collision-tested) before transparent ones,
/// so an opaque blocker always wins over a transparent trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum RenderLayer {
    #[default]
    Opaque = 0,
    Transparent = 1,
}

impl RenderLayer {
    /// Total number of render layers.
    pub const COUNT: usize = 2;

    /// Convert from a u8 value to a RenderLayer.
    /// Returns None if the value is out of range.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Opaque),
            1 => Some(Self::Transparent),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }
}
