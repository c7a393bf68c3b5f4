use star_ship::collision::*;
use star_ship::entities::*;

fn target_at(x: f32, y: f32) -> Target {
    Target { rect: Rect::new(x, y, 50.0, 50.0) }
}

fn shot_at(x: f32, y: f32) -> Projectile {
    Projectile { rect: Rect::new(x, y, 3.0, 15.0) }
}

fn player_at(x: f32) -> Player {
    Player {
        rect: Rect::new(x, 752.0, 60.0, 48.0),
        moving_left: false,
        moving_right: false,
    }
}

fn stats(score: u32, high_score: u32) -> GameStats {
    GameStats {
        lives: 3,
        score,
        level: 1,
        high_score,
        status: GameStatus::Active,
    }
}

// ── resolve_projectile_hits ──────────────────────────────────────────────────

#[test]
fn miss_leaves_everything() {
    let r = resolve_projectile_hits(&[shot_at(10.0, 10.0)], &[target_at(500.0, 100.0)]);
    assert_eq!(r.removed, 0);
    assert_eq!(r.projectiles.len(), 1);
    assert_eq!(r.targets.len(), 1);
}

#[test]
fn single_hit_removes_both() {
    let r = resolve_projectile_hits(&[shot_at(520.0, 120.0)], &[target_at(500.0, 100.0)]);
    assert_eq!(r.removed, 1);
    assert!(r.projectiles.is_empty());
    assert!(r.targets.is_empty());
}

#[test]
fn one_projectile_overlapping_two_targets_takes_one() {
    // Targets overlap each other so the shot touches both
    let targets = [target_at(500.0, 100.0), target_at(510.0, 110.0)];
    let r = resolve_projectile_hits(&[shot_at(520.0, 120.0)], &targets);
    assert_eq!(r.removed, 1);
    assert_eq!(r.targets.len(), 1);
    // First collision wins
    assert_eq!(r.targets[0].rect.x, 510.0);
}

#[test]
fn two_projectiles_on_one_target_only_one_used() {
    let shots = [shot_at(510.0, 120.0), shot_at(530.0, 120.0)];
    let r = resolve_projectile_hits(&shots, &[target_at(500.0, 100.0)]);
    assert_eq!(r.removed, 1);
    assert_eq!(r.projectiles.len(), 1);
    assert_eq!(r.projectiles[0].rect.x, 530.0);
}

#[test]
fn independent_hits_in_one_tick() {
    let shots = [shot_at(120.0, 120.0), shot_at(320.0, 120.0), shot_at(900.0, 500.0)];
    let targets = [target_at(100.0, 100.0), target_at(300.0, 100.0), target_at(700.0, 100.0)];
    let r = resolve_projectile_hits(&shots, &targets);
    assert_eq!(r.removed, 2);
    assert_eq!(r.projectiles.len(), 1);
    assert_eq!(r.targets.len(), 1);
    assert_eq!(r.removed, targets.len() - r.targets.len());
}

#[test]
fn touching_edges_is_not_a_hit() {
    // Shot bottom sits exactly on target top
    let r = resolve_projectile_hits(&[shot_at(520.0, 85.0)], &[target_at(500.0, 100.0)]);
    assert_eq!(r.removed, 0);
}

// ── apply_score ──────────────────────────────────────────────────────────────

#[test]
fn three_kills_at_fifty_points() {
    let s = apply_score(&stats(0, 100), 3, 50);
    assert_eq!(s.score, 150);
    assert_eq!(s.high_score, 150);
}

#[test]
fn high_score_is_never_lowered() {
    let s = apply_score(&stats(0, 1000), 2, 50);
    assert_eq!(s.score, 100);
    assert_eq!(s.high_score, 1000);
}

#[test]
fn zero_kills_changes_nothing() {
    let before = stats(250, 300);
    assert_eq!(apply_score(&before, 0, 50), before);
}

#[test]
fn score_saturates_instead_of_overflowing() {
    let s = apply_score(&stats(u32::MAX - 10, 0), 3, 50);
    assert_eq!(s.score, u32::MAX);
    assert_eq!(s.high_score, u32::MAX);
    let s = apply_score(&stats(0, 0), 2, u32::MAX);
    assert_eq!(s.score, u32::MAX);
}

// ── player_hit ───────────────────────────────────────────────────────────────

#[test]
fn player_hit_by_overlapping_target() {
    assert!(player_hit(&player_at(570.0), &[target_at(560.0, 720.0)], 800.0));
}

#[test]
fn player_not_hit_by_distant_target() {
    assert!(!player_hit(&player_at(570.0), &[target_at(100.0, 100.0)], 800.0));
}

#[test]
fn target_reaching_bottom_counts_as_hit() {
    // Far away from the player, but touching the floor
    assert!(player_hit(&player_at(570.0), &[target_at(100.0, 750.0)], 800.0));
}

#[test]
fn player_hit_no_targets() {
    assert!(!player_hit(&player_at(570.0), &[], 800.0));
}
