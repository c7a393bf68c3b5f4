/// Game lifecycle: new game, player hit, wave cleared, stun countdown.
///
/// Inactive --start--> Active --hit--> Stunned --timer--> Active
///                       |                                  |
///                       +------- lives exhausted ----------+--> Inactive

use log::{debug, info};

use crate::entities::{
    Difficulty, GameState, GameStats, GameStatus, Player, Rect,
};
use crate::fleet;
use crate::settings::Settings;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Player rect centred horizontally, resting on the bottom edge.
pub fn centered_player(settings: &Settings) -> Player {
    Player {
        rect: Rect::new(
            (settings.screen_width - settings.player_width) / 2.0,
            settings.screen_height - settings.player_height,
            settings.player_width,
            settings.player_height,
        ),
        moving_left: false,
        moving_right: false,
    }
}

/// Back to the centre, keeping whatever movement keys are still held.
fn recentered(state: &GameState) -> Player {
    Player {
        moving_left: state.player.moving_left,
        moving_right: state.player.moving_right,
        ..centered_player(&state.settings)
    }
}

pub fn start_button_rect(settings: &Settings) -> Rect {
    Rect::new(
        (settings.screen_width - settings.button_width) / 2.0,
        (settings.screen_height - settings.button_height) / 2.0,
        settings.button_width,
        settings.button_height,
    )
}

fn fresh_stats(settings: &Settings, high_score: u32, status: GameStatus) -> GameStats {
    GameStats {
        lives: settings.initial_lives,
        score: 0,
        level: 1,
        high_score,
        status,
    }
}

/// The start-screen state: a full fleet on display, waiting for a start action.
pub fn init_state(settings: Settings) -> GameState {
    GameState {
        player: centered_player(&settings),
        fleet: fleet::populate(&settings),
        projectiles: Vec::new(),
        stats: fresh_stats(&settings, 0, GameStatus::Inactive),
        difficulty: Difficulty::default(),
        frame: 0,
        settings,
    }
}

// ── Transitions ──────────────────────────────────────────────────────────────

/// Begin a new game.  A no-op unless the game is inactive.
pub fn start_game(state: &GameState) -> GameState {
    if state.stats.is_active() {
        return state.clone();
    }
    info!("new game (high score {})", state.stats.high_score);
    GameState {
        player: recentered(state),
        fleet: fleet::populate(&state.settings),
        projectiles: Vec::new(),
        stats: fresh_stats(&state.settings, state.stats.high_score, GameStatus::Active),
        difficulty: Difficulty::default(),
        ..state.clone()
    }
}

/// Handle a start-button click; clicks outside the button are ignored.
pub fn click(state: &GameState, x: f32, y: f32) -> GameState {
    if start_button_rect(&state.settings).contains_point(x, y) {
        start_game(state)
    } else {
        state.clone()
    }
}

/// The player was hit: lose a life, then either respawn after a pause or end
/// the game.
pub fn on_player_hit(state: &GameState) -> GameState {
    let lives = state.stats.lives.saturating_sub(1);

    if lives == 0 {
        info!("game over with score {}", state.stats.score);
        return GameState {
            stats: GameStats {
                lives,
                status: GameStatus::Inactive,
                ..state.stats.clone()
            },
            ..state.clone()
        };
    }

    info!("player hit, {lives} lives left");
    let ticks_remaining = state.settings.stun_ticks();
    let status = if ticks_remaining == 0 {
        GameStatus::Active
    } else {
        GameStatus::Stunned { ticks_remaining }
    };
    GameState {
        player: recentered(state),
        fleet: fleet::populate(&state.settings),
        projectiles: Vec::new(),
        stats: GameStats {
            lives,
            status,
            ..state.stats.clone()
        },
        ..state.clone()
    }
}

/// Every target is gone: next wave, one level up, everything a bit faster.
pub fn on_fleet_cleared(state: &GameState) -> GameState {
    let level = state.stats.level + 1;
    let multiplier = state.difficulty.multiplier * state.settings.speedup_scale;
    info!("wave cleared, level {level}, speed x{multiplier:.2}");
    GameState {
        fleet: fleet::populate(&state.settings),
        projectiles: Vec::new(),
        stats: GameStats {
            level,
            ..state.stats.clone()
        },
        difficulty: Difficulty { multiplier },
        ..state.clone()
    }
}

/// Count down the post-hit pause.  Other statuses pass through untouched.
pub fn tick_stun(state: &GameState) -> GameState {
    let status = match state.stats.status {
        GameStatus::Stunned { ticks_remaining } if ticks_remaining <= 1 => {
            debug!("stun over");
            GameStatus::Active
        }
        GameStatus::Stunned { ticks_remaining } => GameStatus::Stunned {
            ticks_remaining: ticks_remaining - 1,
        },
        other => other,
    };
    GameState {
        stats: GameStats {
            status,
            ..state.stats.clone()
        },
        ..state.clone()
    }
}
