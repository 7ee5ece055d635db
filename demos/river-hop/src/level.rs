use std::collections::HashMap;
use glam::Vec3;
use hop_engine::*;

use crate::config::HopConfig;
use crate::spawner::ObstacleSpawner;
use crate::turret::Turret;

/// Bundled archetype definitions.
pub const ARCHETYPES: &str = include_str!("../assets/archetypes.json");
/// Bundled levels as (id, JSON).
pub const LEVELS: &[(&str, &str)] = &[("Level 1", include_str!("../assets/level_1.json"))];

pub const PROJECTILE: &str = "projectile";

/// Archetype drawn for a level glyph.
pub fn glyph_archetype(glyph: char) -> Option<&'static str> {
    match glyph {
        '#' => Some("grass"),
        '=' => Some("road"),
        '~' => Some("water"),
        'l' => Some("log"),
        'L' => Some("log_spawner"),
        'c' => Some("car"),
        'S' => Some("car_spawner"),
        'P' => Some("player"),
        '*' => Some("star"),
        'B' => Some("tree"),
        'T' => Some("turret"),
        'W' => Some("win_zone"),
        _ => None,
    }
}

/// What a spawner glyph sends across its row.
fn spawned_by(glyph: char) -> Option<&'static str> {
    match glyph {
        'S' => Some("car"),
        'L' => Some("log"),
        _ => None,
    }
}

/// Controllers created while building a level.
#[derive(Debug, Default)]
pub struct LoadedLevel {
    pub player: Option<EntityId>,
    pub spawners: Vec<ObstacleSpawner>,
    pub turrets: Vec<Turret>,
}

/// Instantiate every cell of `level` into the scene and wire up spawners
/// and turrets. Obstacles belong to the spawner of their kind in the same row.
pub fn build(ctx: &mut EngineContext, level: &LevelInfo, config: &HopConfig) -> Result<LoadedLevel> {
    let width = level.width();
    let middle = level.offset.x + width * 0.5;

    let mut loaded = LoadedLevel::default();
    let mut row_obstacles: HashMap<(usize, &str), Vec<EntityId>> = HashMap::new();
    let mut spawner_cells = Vec::new();
    let mut turret_cells = Vec::new();

    for cell in level.cells() {
        let Some(archetype) = glyph_archetype(cell.glyph) else {
            log::warn!("level '{}': unknown glyph '{}' at row {}, column {}", level.name, cell.glyph, cell.row, cell.column);
            continue;
        };
        let id = ctx.spawn_archetype(archetype, cell.position)?;

        match cell.glyph {
            'P' => {
                if loaded.player.replace(id).is_some() {
                    log::warn!("level '{}' places more than one player", level.name);
                }
            }
            'c' | 'l' => row_obstacles.entry((cell.row, archetype)).or_default().push(id),
            'T' => turret_cells.push(id),
            glyph => {
                if let Some(obstacle) = spawned_by(glyph) {
                    spawner_cells.push((id, cell.row, obstacle));
                }
            }
        }
    }

    for (id, row, obstacle) in spawner_cells {
        let Some(entity) = ctx.scene.get(id) else {
            continue;
        };
        let direction = if entity.pos().x < middle { Vec3::X } else { Vec3::NEG_X };
        let mut spawner = ObstacleSpawner::new(entity, obstacle, direction, width, Vec3::ZERO);

        match row_obstacles.remove(&(row, obstacle)) {
            Some(obstacles) => spawner.start(ctx, &obstacles),
            None => {
                spawner.spawn(ctx)?;
            }
        }
        loaded.spawners.push(spawner);
    }

    for id in turret_cells {
        loaded.turrets.push(Turret::attach(ctx, id, PROJECTILE, config)?);
    }

    log::info!(
        "built level '{}': {} entities, {} spawners, {} turrets",
        level.name,
        ctx.scene.len(),
        loaded.spawners.len(),
        loaded.turrets.len()
    );
    Ok(loaded)
}
