/// Per-tick game logic.
///
/// Every public function takes an immutable reference to the current
/// `GameState` and returns a brand-new `GameState`.  The only side effect is
/// logging.

use log::debug;

use crate::collision;
use crate::entities::{Fleet, GameState, GameStatus, InputEvent, Key, Player, Projectile, Rect};
use crate::fleet;
use crate::state;

/// Whether the frame loop should keep going after a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

// ── Difficulty-scaled speeds ─────────────────────────────────────────────────

pub fn player_speed(state: &GameState) -> f32 {
    state.settings.player_speed * state.difficulty.multiplier
}

pub fn projectile_speed(state: &GameState) -> f32 {
    state.settings.projectile_speed * state.difficulty.multiplier
}

pub fn target_speed(state: &GameState) -> f32 {
    state.settings.target_speed * state.difficulty.multiplier
}

// ── Input-driven state transitions ──────────────────────────────────────────

/// Apply one input event.  Quit requests are reported through `Flow`.
pub fn handle_event(state: &GameState, event: &InputEvent) -> (GameState, Flow) {
    match *event {
        InputEvent::Quit | InputEvent::KeyDown(Key::Quit) => (state.clone(), Flow::Quit),
        InputEvent::KeyDown(Key::Left) => (set_intent(state, Some(true), None), Flow::Continue),
        InputEvent::KeyDown(Key::Right) => (set_intent(state, None, Some(true)), Flow::Continue),
        InputEvent::KeyUp(Key::Left) => (set_intent(state, Some(false), None), Flow::Continue),
        InputEvent::KeyUp(Key::Right) => (set_intent(state, None, Some(false)), Flow::Continue),
        InputEvent::KeyDown(Key::Fire) if state.stats.status == GameStatus::Active => {
            (fire(state), Flow::Continue)
        }
        InputEvent::KeyDown(Key::Start) => (state::start_game(state), Flow::Continue),
        InputEvent::Click { x, y } => (state::click(state, x, y), Flow::Continue),
        _ => (state.clone(), Flow::Continue),
    }
}

fn set_intent(state: &GameState, left: Option<bool>, right: Option<bool>) -> GameState {
    GameState {
        player: Player {
            moving_left: left.unwrap_or(state.player.moving_left),
            moving_right: right.unwrap_or(state.player.moving_right),
            ..state.player.clone()
        },
        ..state.clone()
    }
}

/// Slide the player according to its intent flags, staying on screen.
pub fn move_player(state: &GameState) -> GameState {
    let speed = player_speed(state);
    let width = state.settings.screen_width;
    let p = &state.player;

    let mut x = p.rect.x;
    if p.moving_right && p.rect.right() < width {
        x += speed;
    }
    if p.moving_left && p.rect.left() > 0.0 {
        x -= speed;
    }
    let x = x.clamp(0.0, (width - p.rect.w).max(0.0));

    GameState {
        player: Player {
            rect: Rect { x, ..p.rect },
            ..p.clone()
        },
        ..state.clone()
    }
}

/// Launch a projectile from the player's nose, unless the limit is reached.
pub fn fire(state: &GameState) -> GameState {
    let settings = &state.settings;
    if state.projectiles.len() >= settings.projectile_limit {
        debug!("fire refused, {} projectiles in flight", state.projectiles.len());
        return state.clone();
    }
    let projectile = Projectile {
        rect: Rect::new(
            state.player.rect.center_x() - settings.projectile_width / 2.0,
            state.player.rect.top(),
            settings.projectile_width,
            settings.projectile_height,
        ),
    };
    let mut projectiles = state.projectiles.clone();
    projectiles.push(projectile);
    GameState {
        projectiles,
        ..state.clone()
    }
}

/// Move projectiles up and discard the ones that left the top of the screen.
pub fn advance_projectiles(state: &GameState) -> GameState {
    let dy = projectile_speed(state);
    let projectiles = state
        .projectiles
        .iter()
        .map(|p| Projectile {
            rect: Rect { y: p.rect.y - dy, ..p.rect },
        })
        .filter(|p| p.rect.bottom() > 0.0)
        .collect();
    GameState {
        projectiles,
        ..state.clone()
    }
}

// ── Per-frame tick ──────────────────────────────────────────────────────────

/// Resolve projectile hits, score them, and roll over to a new wave if the
/// fleet is gone.
pub fn resolve_hits(state: &GameState) -> GameState {
    let hits = collision::resolve_projectile_hits(&state.projectiles, &state.fleet.targets);
    let stats = collision::apply_score(&state.stats, hits.removed, state.settings.points_per_target);

    let mut next = GameState {
        projectiles: hits.projectiles,
        fleet: Fleet {
            targets: hits.targets,
            direction: state.fleet.direction,
        },
        stats,
        ..state.clone()
    };
    if next.fleet.is_empty() {
        next = state::on_fleet_cleared(&next);
    }
    next
}

/// Advance the simulation by one frame.
///
/// Input events are applied first, in order.  A quit request returns at once
/// without touching the rest of the frame.
pub fn tick(state: &GameState, events: &[InputEvent]) -> (GameState, Flow) {
    let mut next = GameState {
        frame: state.frame + 1,
        ..state.clone()
    };

    for event in events {
        let (updated, flow) = handle_event(&next, event);
        if flow == Flow::Quit {
            return (updated, Flow::Quit);
        }
        next = updated;
    }

    match next.stats.status {
        GameStatus::Inactive => (next, Flow::Continue),
        GameStatus::Stunned { .. } => (state::tick_stun(&next), Flow::Continue),
        GameStatus::Active => {
            let next = move_player(&next);
            let next = advance_projectiles(&next);
            let next = resolve_hits(&next);
            let next = GameState {
                fleet: fleet::update(&next.fleet, &next.settings, target_speed(&next)),
                ..next
            };
            let hit = collision::player_hit(
                &next.player,
                &next.fleet.targets,
                next.settings.screen_height,
            );
            if hit {
                (state::on_player_hit(&next), Flow::Continue)
            } else {
                (next, Flow::Continue)
            }
        }
    }
}
