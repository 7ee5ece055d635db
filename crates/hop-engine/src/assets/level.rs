use std::collections::HashMap;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use crate::error::{EngineError, Result};

/// Glyph that marks an empty cell.
pub const EMPTY_CELL: char = '.';

/// Description of one level: stacked text layers, one glyph per grid cell.
///
/// Row `r`, column `c` of layer `l` sits at
/// `offset + (c * x_scale, l * layer_height, r * z_scale)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelInfo {
    pub name: String,
    /// Layers from the ground up; each is a list of rows.
    pub layers: Vec<Vec<String>>,
    #[serde(default = "default_scale")]
    pub x_scale: f32,
    #[serde(default = "default_scale")]
    pub z_scale: f32,
    #[serde(default = "default_scale")]
    pub layer_height: f32,
    #[serde(default)]
    pub offset: Vec3,
}

fn default_scale() -> f32 {
    1.0
}

/// One non-empty cell of a level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelCell {
    pub glyph: char,
    pub layer: usize,
    pub row: usize,
    pub column: usize,
    pub position: Vec3,
}

impl LevelInfo {
    pub fn new(name: impl Into<String>, layers: Vec<Vec<String>>) -> Self {
        Self {
            name: name.into(),
            layers,
            x_scale: 1.0,
            z_scale: 1.0,
            layer_height: 1.0,
            offset: Vec3::ZERO,
        }
    }

    /// Parse a level from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Number of columns in the widest row of any layer.
    pub fn columns(&self) -> usize {
        self.layers
            .iter()
            .flatten()
            .map(|row| row.chars().count())
            .max()
            .unwrap_or(0)
    }

    /// Extent of the level along X in world units.
    pub fn width(&self) -> f32 {
        self.columns() as f32 * self.x_scale
    }

    /// Every non-empty cell, layer by layer, row by row.
    pub fn cells(&self) -> impl Iterator<Item = LevelCell> + '_ {
        self.layers.iter().enumerate().flat_map(move |(layer, rows)| {
            rows.iter().enumerate().flat_map(move |(row, line)| {
                line.chars()
                    .enumerate()
                    .filter(|&(_, glyph)| glyph != EMPTY_CELL && !glyph.is_whitespace())
                    .map(move |(column, glyph)| LevelCell {
                        glyph,
                        layer,
                        row,
                        column,
                        position: self.offset
                            + Vec3::new(
                                column as f32 * self.x_scale,
                                layer as f32 * self.layer_height,
                                row as f32 * self.z_scale,
                            ),
                    })
            })
        })
    }
}

/// Registered levels by ID, plus the one loaded last.
#[derive(Debug, Default)]
pub struct LevelManager {
    levels: HashMap<String, LevelInfo>,
    current: Option<String>,
}

impl LevelManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a level. Returns false if the ID is taken (the first one stays).
    pub fn add_level(&mut self, id: impl Into<String>, level: LevelInfo) -> bool {
        let id = id.into();
        if self.levels.contains_key(&id) {
            log::debug!("level '{}' already registered", id);
            return false;
        }
        self.levels.insert(id, level);
        true
    }

    /// Look up a level and make it current.
    pub fn load_level(&mut self, id: &str) -> Result<&LevelInfo> {
        let level = self
            .levels
            .get(id)
            .ok_or_else(|| EngineError::UnknownLevel(id.to_string()))?;
        log::info!("loading level '{}' ({})", id, level.name);
        self.current = Some(id.to_string());
        Ok(level)
    }

    /// The level most recently loaded, if any.
    pub fn current(&self) -> Option<&LevelInfo> {
        self.current.as_deref().and_then(|id| self.levels.get(id))
    }

    pub fn current_id(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.levels.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}
