/// Collision resolution and scoring.

use crate::entities::{GameStats, Player, Projectile, Target};

/// What survived a round of projectile-vs-target resolution.
#[derive(Clone, Debug)]
pub struct HitResolution {
    pub projectiles: Vec<Projectile>,
    pub targets: Vec<Target>,
    /// Targets destroyed this tick.
    pub removed: usize,
}

/// Pair projectiles with targets they overlap and remove both.
///
/// Each projectile claims the first still-standing target it overlaps, so no
/// projectile or target takes part in more than one removal.
pub fn resolve_projectile_hits(projectiles: &[Projectile], targets: &[Target]) -> HitResolution {
    let mut killed_targets = vec![false; targets.len()];
    let mut used_projectiles = vec![false; projectiles.len()];

    for (pi, projectile) in projectiles.iter().enumerate() {
        let hit = targets
            .iter()
            .enumerate()
            .find(|(ti, t)| !killed_targets[*ti] && projectile.rect.intersects(&t.rect));
        if let Some((ti, _)) = hit {
            killed_targets[ti] = true;
            used_projectiles[pi] = true;
        }
    }

    let projectiles: Vec<Projectile> = projectiles
        .iter()
        .zip(&used_projectiles)
        .filter(|(_, used)| !**used)
        .map(|(p, _)| p.clone())
        .collect();

    let targets: Vec<Target> = targets
        .iter()
        .zip(&killed_targets)
        .filter(|(_, killed)| !**killed)
        .map(|(t, _)| t.clone())
        .collect();

    let removed = killed_targets.iter().filter(|k| **k).count();

    HitResolution {
        projectiles,
        targets,
        removed,
    }
}

/// Award points for destroyed targets and raise the high score if beaten.
pub fn apply_score(stats: &GameStats, removed: usize, points_per_target: u32) -> GameStats {
    let gained = points_per_target.saturating_mul(u32::try_from(removed).unwrap_or(u32::MAX));
    let score = stats.score.saturating_add(gained);
    GameStats {
        score,
        high_score: stats.high_score.max(score),
        ..stats.clone()
    }
}

/// True if a target touches the player or any target reached the bottom.
pub fn player_hit(player: &Player, targets: &[Target], screen_height: f32) -> bool {
    targets
        .iter()
        .any(|t| t.rect.intersects(&player.rect) || t.rect.bottom() >= screen_height)
}
