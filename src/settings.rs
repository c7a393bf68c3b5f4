/// Static game configuration.
///
/// Read once at start-up.  Every field has a default, so a JSON file only
/// needs to name the options it wants to change.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    // ── Screen ───────────────────────────────────────────────────────────────
    pub screen_width: f32,
    pub screen_height: f32,
    /// RGB background colour.
    pub bg_color: (u8, u8, u8),

    // ── Player ───────────────────────────────────────────────────────────────
    pub player_width: f32,
    pub player_height: f32,
    pub player_speed: f32,
    pub initial_lives: u32,

    // ── Projectiles ──────────────────────────────────────────────────────────
    pub projectile_width: f32,
    pub projectile_height: f32,
    pub projectile_speed: f32,
    /// Maximum projectiles in flight at once.
    pub projectile_limit: usize,

    // ── Fleet ────────────────────────────────────────────────────────────────
    pub target_width: f32,
    pub target_height: f32,
    pub target_speed: f32,
    /// Vertical distance the fleet drops on each direction reversal.
    pub drop_distance: f32,
    pub points_per_target: u32,

    // ── Pacing ───────────────────────────────────────────────────────────────
    /// Speed multiplier applied each time a fleet is cleared.
    pub speedup_scale: f32,
    /// Pause after the player is hit, in milliseconds.
    pub hit_pause_ms: u64,
    pub tick_rate_hz: u32,

    // ── Start button ─────────────────────────────────────────────────────────
    pub button_width: f32,
    pub button_height: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: 1200.0,
            screen_height: 800.0,
            bg_color: (230, 230, 230),
            player_width: 60.0,
            player_height: 48.0,
            player_speed: 1.5,
            initial_lives: 3,
            projectile_width: 3.0,
            projectile_height: 15.0,
            projectile_speed: 3.0,
            projectile_limit: 4,
            target_width: 50.0,
            target_height: 50.0,
            target_speed: 1.0,
            drop_distance: 10.0,
            points_per_target: 50,
            speedup_scale: 1.1,
            hit_pause_ms: 500,
            tick_rate_hz: 60,
            button_width: 200.0,
            button_height: 50.0,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file.  Missing keys keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("player_speed", self.player_speed),
            ("projectile_width", self.projectile_width),
            ("projectile_height", self.projectile_height),
            ("projectile_speed", self.projectile_speed),
            ("target_width", self.target_width),
            ("target_height", self.target_height),
            ("target_speed", self.target_speed),
            ("button_width", self.button_width),
            ("button_height", self.button_height),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(SettingsError::Invalid(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if self.drop_distance < 0.0 {
            return Err(SettingsError::Invalid(format!(
                "drop_distance must not be negative, got {}",
                self.drop_distance
            )));
        }
        if self.speedup_scale < 1.0 {
            return Err(SettingsError::Invalid(format!(
                "speedup_scale must be at least 1.0, got {}",
                self.speedup_scale
            )));
        }
        if self.tick_rate_hz == 0 {
            return Err(SettingsError::Invalid("tick_rate_hz must be non-zero".into()));
        }
        if self.projectile_limit == 0 {
            return Err(SettingsError::Invalid("projectile_limit must be non-zero".into()));
        }
        if self.initial_lives == 0 {
            return Err(SettingsError::Invalid("initial_lives must be non-zero".into()));
        }
        let (columns, rows) = crate::fleet::grid_size(self);
        if columns == 0 || rows == 0 {
            return Err(SettingsError::Invalid(format!(
                "screen {}x{} fits no fleet ({columns} columns, {rows} rows)",
                self.screen_width, self.screen_height
            )));
        }
        Ok(())
    }

    /// Number of ticks the post-hit pause lasts (rounded up).
    pub fn stun_ticks(&self) -> u32 {
        let ticks = self
            .hit_pause_ms
            .saturating_mul(self.tick_rate_hz as u64)
            .div_ceil(1000);
        u32::try_from(ticks).unwrap_or(u32::MAX)
    }

    /// Duration of one tick, for the frame loop.
    pub fn frame_duration(&self) -> std::time::Duration {
        std::time::Duration::from_micros(1_000_000 / self.tick_rate_hz.max(1) as u64)
    }
}
