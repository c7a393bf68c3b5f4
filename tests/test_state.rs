use star_ship::entities::*;
use star_ship::fleet;
use star_ship::settings::Settings;
use star_ship::state::*;

fn active_state() -> GameState {
    start_game(&init_state(Settings::default()))
}

// ── init_state ────────────────────────────────────────────────────────────────

#[test]
fn init_state_waits_for_start() {
    let s = init_state(Settings::default());
    assert_eq!(s.stats.status, GameStatus::Inactive);
    assert!(!s.stats.is_active());
    assert_eq!(s.stats.lives, 3);
    assert_eq!(s.stats.score, 0);
    assert_eq!(s.stats.level, 1);
    assert_eq!(s.stats.high_score, 0);
    assert_eq!(s.difficulty.multiplier, 1.0);
    assert!(s.projectiles.is_empty());
    assert_eq!(s.fleet.len(), 77);
}

#[test]
fn init_state_centres_player_on_floor() {
    let s = init_state(Settings::default());
    assert_eq!(s.player.rect.x, 570.0); // (1200 - 60) / 2
    assert_eq!(s.player.rect.bottom(), 800.0);
}

#[test]
fn start_button_is_centred() {
    let r = start_button_rect(&Settings::default());
    assert_eq!(r, Rect::new(500.0, 375.0, 200.0, 50.0));
}

// ── start_game ────────────────────────────────────────────────────────────────

#[test]
fn start_resets_everything_but_high_score() {
    let mut s = init_state(Settings::default());
    s.stats.lives = 0;
    s.stats.score = 900;
    s.stats.level = 4;
    s.stats.high_score = 1200;
    s.difficulty.multiplier = 1.331;
    s.projectiles.push(Projectile { rect: Rect::new(10.0, 10.0, 3.0, 15.0) });
    s.fleet.targets.truncate(3);
    s.player.rect.x = 5.0;

    let s2 = start_game(&s);
    assert_eq!(s2.stats.status, GameStatus::Active);
    assert_eq!(s2.stats.lives, 3);
    assert_eq!(s2.stats.score, 0);
    assert_eq!(s2.stats.level, 1);
    assert_eq!(s2.stats.high_score, 1200);
    assert_eq!(s2.difficulty.multiplier, 1.0);
    assert!(s2.projectiles.is_empty());
    assert_eq!(s2.fleet, fleet::populate(&s2.settings));
    assert_eq!(s2.player.rect.x, 570.0);
}

#[test]
fn start_keeps_held_movement_keys() {
    let mut s = init_state(Settings::default());
    s.player.moving_left = true;
    s.player.rect.x = 200.0;
    let s2 = start_game(&s);
    assert!(s2.player.moving_left);
    assert!(!s2.player.moving_right);
    assert_eq!(s2.player.rect.x, 570.0);
}

#[test]
fn start_while_active_is_noop() {
    let mut s = active_state();
    s.stats.score = 300;
    s.stats.lives = 2;
    let s2 = start_game(&s);
    assert_eq!(s2.stats, s.stats);
}

#[test]
fn start_while_stunned_is_noop() {
    let mut s = active_state();
    s.stats.status = GameStatus::Stunned { ticks_remaining: 5 };
    s.stats.lives = 2;
    let s2 = start_game(&s);
    assert_eq!(s2.stats, s.stats);
}

#[test]
fn click_on_button_starts() {
    let s = init_state(Settings::default());
    let s2 = click(&s, 600.0, 400.0);
    assert_eq!(s2.stats.status, GameStatus::Active);
}

#[test]
fn click_off_button_is_ignored() {
    let s = init_state(Settings::default());
    let s2 = click(&s, 10.0, 10.0);
    assert_eq!(s2.stats.status, GameStatus::Inactive);
}

// ── on_player_hit ─────────────────────────────────────────────────────────────

#[test]
fn hit_with_lives_left_respawns_and_stuns() {
    let mut s = active_state();
    s.fleet.targets.truncate(2);
    s.projectiles.push(Projectile { rect: Rect::new(10.0, 10.0, 3.0, 15.0) });
    s.player.rect.x = 100.0;
    s.player.moving_left = true;

    let s2 = on_player_hit(&s);
    assert_eq!(s2.stats.lives, 2);
    assert_eq!(s2.stats.status, GameStatus::Stunned { ticks_remaining: 30 });
    assert!(s2.stats.is_active());
    assert_eq!(s2.fleet.len(), 77);
    assert!(s2.projectiles.is_empty());
    assert_eq!(s2.player.rect.x, 570.0);
    // Held keys survive the respawn
    assert!(s2.player.moving_left);
}

#[test]
fn hit_on_last_life_ends_game_without_respawn() {
    let mut s = active_state();
    s.stats.lives = 1;
    s.fleet.targets.truncate(2);
    s.projectiles.push(Projectile { rect: Rect::new(10.0, 10.0, 3.0, 15.0) });

    let s2 = on_player_hit(&s);
    assert_eq!(s2.stats.lives, 0);
    assert_eq!(s2.stats.status, GameStatus::Inactive);
    assert_eq!(s2.fleet.len(), 2);
    assert_eq!(s2.projectiles.len(), 1);
}

#[test]
fn hit_without_pause_resumes_immediately() {
    let settings = Settings { hit_pause_ms: 0, ..Settings::default() };
    let s = start_game(&init_state(settings));
    let s2 = on_player_hit(&s);
    assert_eq!(s2.stats.status, GameStatus::Active);
}

#[test]
fn game_over_then_restart_restores_lives() {
    let mut s = active_state();
    s.stats.lives = 1;
    s.stats.score = 400;
    s.stats.high_score = 400;
    let over = on_player_hit(&s);
    let again = start_game(&over);
    assert_eq!(again.stats.lives, 3);
    assert_eq!(again.stats.score, 0);
    assert_eq!(again.stats.high_score, 400);
}

// ── on_fleet_cleared ──────────────────────────────────────────────────────────

#[test]
fn fleet_cleared_advances_wave() {
    let mut s = active_state();
    s.fleet.targets.clear();
    s.projectiles.push(Projectile { rect: Rect::new(10.0, 10.0, 3.0, 15.0) });

    let s2 = on_fleet_cleared(&s);
    assert_eq!(s2.stats.level, 2);
    assert!((s2.difficulty.multiplier - 1.1).abs() < 1e-6);
    assert!(s2.projectiles.is_empty());
    assert_eq!(s2.fleet, fleet::populate(&s2.settings));
}

#[test]
fn speedup_compounds() {
    let s = active_state();
    let s2 = on_fleet_cleared(&on_fleet_cleared(&s));
    assert_eq!(s2.stats.level, 3);
    assert!((s2.difficulty.multiplier - 1.21).abs() < 1e-6);
}

// ── tick_stun ─────────────────────────────────────────────────────────────────

#[test]
fn stun_counts_down_to_active() {
    let mut s = active_state();
    s.stats.status = GameStatus::Stunned { ticks_remaining: 2 };
    let s = tick_stun(&s);
    assert_eq!(s.stats.status, GameStatus::Stunned { ticks_remaining: 1 });
    let s = tick_stun(&s);
    assert_eq!(s.stats.status, GameStatus::Active);
}

#[test]
fn tick_stun_leaves_other_statuses() {
    let s = init_state(Settings::default());
    assert_eq!(tick_stun(&s).stats.status, GameStatus::Inactive);
    let s = active_state();
    assert_eq!(tick_stun(&s).stats.status, GameStatus::Active);
}
