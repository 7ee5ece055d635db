use serde::{Deserialize, Serialize};
use hop_engine::*;

/// Gameplay tuning. Every field has a default, so a JSON file only needs
/// the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HopConfig {
    /// Duration of one whole hop (both arc phases).
    pub move_time_ms: u32,
    /// Distance covered by one hop.
    pub hop_distance: f32,
    /// How far above the straight line the arc peaks.
    pub hop_height: f32,
    /// Length of the downward ground probe after landing.
    pub ground_probe_distance: f32,
    pub fall_time_ms: u32,
    pub fall_depth: f32,
    /// Camera intro length before the player is activated.
    pub intro_delay_secs: f32,
    /// Key codes for forward (-Z), backward (+Z), left (-X), right (+X).
    pub move_keys: [u32; 4],
    /// How far a turret projectile travels.
    pub projectile_range: f32,
    /// Projectile travel time per world unit.
    pub projectile_unit_time_ms: u32,
}

impl Default for HopConfig {
    fn default() -> Self {
        Self {
            move_time_ms: 300,
            hop_distance: 1.0,
            hop_height: 0.5,
            ground_probe_distance: 1.0,
            fall_time_ms: 250,
            fall_depth: 2.0,
            intro_delay_secs: 9.0,
            move_keys: [keys::W, keys::S, keys::A, keys::D],
            projectile_range: 15.0,
            projectile_unit_time_ms: 1500,
        }
    }
}

impl HopConfig {
    /// Parse a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = HopConfig::from_json(r#"{ "move_time_ms": 400, "move_keys": [38, 40, 37, 39] }"#).unwrap();
        assert_eq!(config.move_time_ms, 400);
        assert_eq!(config.move_keys, [keys::UP, keys::DOWN, keys::LEFT, keys::RIGHT]);
        assert_eq!(config.hop_distance, 1.0);
        assert_eq!(config.projectile_unit_time_ms, 1500);
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = HopConfig::from_json(r#"{ "move_time_ms": "slow" }"#).unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }
}
