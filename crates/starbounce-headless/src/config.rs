use serde::{Deserialize, Serialize};

use starbounce_sandbox::config::ConfigError;

/// Frame driver settings, loaded from TOML with env var overrides.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HeadlessConfig {
    /// Number of frames to run before exiting.
    pub frames: u64,
    /// Fixed timestep in seconds. Also the frame budget when `realtime` is set.
    pub frame_dt: f32,
    /// Pace frames against the wall clock and feed measured dt to the scene.
    pub realtime: bool,
    /// Send a reset input every N frames.
    pub reset_every: Option<u64>,
    /// Maximum platform speed of the autopilot in units/s.
    pub platform_speed: f32,
    /// Print the run summary as JSON on stdout when finished.
    pub summary_json: bool,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            frames: 600,
            frame_dt: 1.0 / 60.0,
            realtime: false,
            reset_every: None,
            platform_speed: 1.5,
            summary_json: false,
        }
    }
}

impl HeadlessConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let cfg = toml::from_str::<HeadlessConfig>(content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load config from `STARBOUNCE_HEADLESS_CONFIG` or `config/headless.toml`
    /// if it exists, then apply env var overrides.
    pub fn load() -> Self {
        let path = std::env::var("STARBOUNCE_HEADLESS_CONFIG")
            .unwrap_or_else(|_| "config/headless.toml".to_string());
        let mut config = match std::fs::read_to_string(&path) {
            Ok(content) => match Self::from_toml_str(&content) {
                Ok(cfg) => {
                    tracing::info!(%path, "Loaded headless configuration");
                    cfg
                },
                Err(e) => {
                    tracing::warn!("Failed to load {path}: {e}, using defaults");
                    HeadlessConfig::default()
                },
            },
            Err(_) => HeadlessConfig::default(),
        };

        if let Ok(frames) = std::env::var("STARBOUNCE_FRAMES")
            && !frames.is_empty()
        {
            config.apply_frames_override(&frames);
        }
        config
    }

    /// Override `frames` from a string. Unparseable values are logged and ignored.
    pub fn apply_frames_override(&mut self, value: &str) {
        match value.trim().parse::<u64>() {
            Ok(frames) => self.frames = frames,
            Err(e) => tracing::warn!(value, "Ignoring invalid STARBOUNCE_FRAMES: {e}"),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.frame_dt.is_finite() || self.frame_dt <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "frame_dt must be finite and > 0, got {}",
                self.frame_dt
            )));
        }
        if !self.platform_speed.is_finite() || self.platform_speed < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "platform_speed must be finite and >= 0, got {}",
                self.platform_speed
            )));
        }
        if self.reset_every == Some(0) {
            return Err(ConfigError::Invalid("reset_every must be > 0".to_string()));
        }
        Ok(())
    }
}
