/// Fleet formation: grid layout, edge detection and lock-step movement.
///
/// Like the rest of the core, each function borrows a `Fleet` and returns a
/// new one.

use crate::entities::{Fleet, Rect, Target};
use crate::settings::Settings;

/// Grid dimensions `(columns, rows)` that fit on screen.
///
/// Targets sit on every other cell so neighbours are one target-width apart,
/// and the bottom band above the player is kept clear.
pub fn grid_size(settings: &Settings) -> (usize, usize) {
    let w = settings.target_width;
    let h = settings.target_height;

    let space_x = settings.screen_width - 2.0 * w;
    let columns = (space_x / (2.0 * w)).floor().max(0.0) as usize;

    let space_y = settings.screen_height - h - settings.player_height;
    let rows = (space_y / (2.0 * h)).floor().max(0.0) as usize;

    (columns, rows)
}

/// Build a full, freshly-aligned fleet.  Deterministic for a given
/// configuration; the new fleet always heads right.
pub fn populate(settings: &Settings) -> Fleet {
    let (columns, rows) = grid_size(settings);
    let w = settings.target_width;
    let h = settings.target_height;

    let targets = (0..rows)
        .flat_map(|row| {
            (0..columns).map(move |col| Target {
                rect: Rect::new(
                    w + 2.0 * w * col as f32,
                    h + 2.0 * h * row as f32,
                    w,
                    h,
                ),
            })
        })
        .collect();

    Fleet { targets, direction: 1.0 }
}

/// True if any target touches or passes a side of the screen.
pub fn edge_check(fleet: &Fleet, screen_width: f32) -> bool {
    fleet
        .targets
        .iter()
        .any(|t| t.rect.right() >= screen_width || t.rect.left() <= 0.0)
}

/// Drop every target by `drop_distance` and flip the direction once.
pub fn reverse_and_drop(fleet: &Fleet, drop_distance: f32) -> Fleet {
    let targets = fleet
        .targets
        .iter()
        .map(|t| Target {
            rect: Rect { y: t.rect.y + drop_distance, ..t.rect },
        })
        .collect();
    Fleet {
        targets,
        direction: -fleet.direction,
    }
}

/// Shift every target sideways by `speed` in the fleet's direction.
pub fn advance(fleet: &Fleet, speed: f32) -> Fleet {
    let dx = speed * fleet.direction;
    let targets = fleet
        .targets
        .iter()
        .map(|t| Target {
            rect: Rect { x: t.rect.x + dx, ..t.rect },
        })
        .collect();
    Fleet {
        targets,
        direction: fleet.direction,
    }
}

/// One tick of fleet motion: reverse-and-drop if the formation is at an edge,
/// then slide horizontally.
pub fn update(fleet: &Fleet, settings: &Settings, speed: f32) -> Fleet {
    if fleet.is_empty() {
        return fleet.clone();
    }
    let fleet = if edge_check(fleet, settings.screen_width) {
        reverse_and_drop(fleet, settings.drop_distance)
    } else {
        fleet.clone()
    };
    advance(&fleet, speed)
}
