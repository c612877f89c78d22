use serde::{Deserialize, Serialize};

use starbounce_core::geometry::Vec2;

use crate::obstacle::PLATFORM_RESET_POSITION;
use crate::star::{
    BounceTuning, GRAVITY, PLATFORM_REST_SPEED, STAR_RESET_POSITION, STAR_RESET_VELOCITY,
    STAR_SIZE, WALL_RESTITUTION, WALL_REST_SPEED, WALL_SEPARATION,
};

/// Default platform size (width, height).
pub const PLATFORM_SIZE: Vec2 = Vec2::new(1.0, 0.05);
/// Default wall size (width, height).
pub const WALL_SIZE: Vec2 = Vec2::new(0.05, 2.0);
/// Visual spin of the star sprite in radians per second.
pub const SPIN_RATE: f32 = 2.0;

/// Error raised when a config file cannot be used.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML syntax or type mismatch.
    Parse(String),
    /// Well-formed but physically meaningless values.
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(m) => write!(f, "config parse error: {m}"),
            Self::Invalid(m) => write!(f, "invalid config: {m}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

/// Integration and bounce-response parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SandboxPhysicsConfig {
    /// Downward acceleration magnitude (units/s^2).
    pub gravity: f32,
    /// Post-bounce vertical speed below which the star comes to rest.
    pub platform_rest_speed: f32,
    /// Fraction of horizontal speed kept after a wall bounce.
    pub wall_restitution: f32,
    /// Gap left between the star and a wall after a bounce.
    pub wall_separation: f32,
    /// Post-bounce horizontal speed below which the star stops.
    pub wall_rest_speed: f32,
    /// Also catch falls that pass through the platform within one tick.
    pub swept_platform: bool,
}

impl Default for SandboxPhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            platform_rest_speed: PLATFORM_REST_SPEED,
            wall_restitution: WALL_RESTITUTION,
            wall_separation: WALL_SEPARATION,
            wall_rest_speed: WALL_REST_SPEED,
            swept_platform: false,
        }
    }
}

impl SandboxPhysicsConfig {
    pub fn tuning(&self) -> BounceTuning {
        BounceTuning {
            platform_rest_speed: self.platform_rest_speed,
            wall_restitution: self.wall_restitution,
            wall_separation: self.wall_separation,
            wall_rest_speed: self.wall_rest_speed,
            swept_platform: self.swept_platform,
        }
    }
}

/// Star spawn state. Also the state a reset returns to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StarConfig {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: Vec2,
}

impl Default for StarConfig {
    fn default() -> Self {
        Self {
            position: STAR_RESET_POSITION,
            velocity: STAR_RESET_VELOCITY,
            size: STAR_SIZE,
        }
    }
}

/// Placement of a platform or wall.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ObstacleConfig {
    pub position: Vec2,
    pub size: Vec2,
}

fn default_platform() -> ObstacleConfig {
    ObstacleConfig {
        position: PLATFORM_RESET_POSITION,
        size: PLATFORM_SIZE,
    }
}

fn default_walls() -> Vec<ObstacleConfig> {
    vec![
        ObstacleConfig {
            position: Vec2::new(-1.0, 0.0),
            size: WALL_SIZE,
        },
        ObstacleConfig {
            position: Vec2::new(0.95, 0.0),
            size: WALL_SIZE,
        },
    ]
}

/// Top-level sandbox configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SandboxConfig {
    pub physics: SandboxPhysicsConfig,
    pub star: StarConfig,
    pub platform: ObstacleConfig,
    pub walls: Vec<ObstacleConfig>,
    pub spin_rate: f32,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            physics: SandboxPhysicsConfig::default(),
            star: StarConfig::default(),
            platform: default_platform(),
            walls: default_walls(),
            spin_rate: SPIN_RATE,
        }
    }
}

impl SandboxConfig {
    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let cfg = toml::from_str::<SandboxConfig>(content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load config from a TOML file. Falls back to defaults if the file is missing
    /// or unusable.
    pub fn load() -> Self {
        let path = std::env::var("STARBOUNCE_SANDBOX_CONFIG")
            .unwrap_or_else(|_| "config/sandbox.toml".to_string());
        match std::fs::read_to_string(&path) {
            Ok(content) => match Self::from_toml_str(&content) {
                Ok(cfg) => {
                    tracing::info!(%path, "Loaded sandbox configuration");
                    cfg
                },
                Err(e) => {
                    tracing::warn!("Failed to load {path}: {e}, using defaults");
                    SandboxConfig::default()
                },
            },
            Err(_) => SandboxConfig::default(),
        }
    }

    /// Check physical sanity of every field, reporting the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.physics;
        if !p.gravity.is_finite() || p.gravity < 0.0 {
            return Err(invalid(format!(
                "physics.gravity must be finite and >= 0, got {}",
                p.gravity
            )));
        }
        if !(0.0..=1.0).contains(&p.wall_restitution) {
            return Err(invalid(format!(
                "physics.wall_restitution must be within [0, 1], got {}",
                p.wall_restitution
            )));
        }
        for (name, value) in [
            ("physics.platform_rest_speed", p.platform_rest_speed),
            ("physics.wall_separation", p.wall_separation),
            ("physics.wall_rest_speed", p.wall_rest_speed),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(format!("{name} must be finite and >= 0, got {value}")));
            }
        }

        check_point("star.position", self.star.position)?;
        check_point("star.velocity", self.star.velocity)?;
        check_size("star.size", self.star.size)?;
        check_point("platform.position", self.platform.position)?;
        check_size("platform.size", self.platform.size)?;
        for (i, wall) in self.walls.iter().enumerate() {
            check_point(&format!("walls[{i}].position"), wall.position)?;
            check_size(&format!("walls[{i}].size"), wall.size)?;
        }

        if !self.spin_rate.is_finite() {
            return Err(invalid("spin_rate must be finite".to_string()));
        }
        Ok(())
    }
}

fn invalid(message: String) -> ConfigError {
    ConfigError::Invalid(message)
}

fn check_point(name: &str, v: Vec2) -> Result<(), ConfigError> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be finite, got {v:?}")))
    }
}

fn check_size(name: &str, v: Vec2) -> Result<(), ConfigError> {
    if v.is_finite() && v.x >= 0.0 && v.y >= 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be finite and >= 0, got {v:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = SandboxConfig::default();
        assert_eq!(cfg.physics.gravity, GRAVITY);
        assert_eq!(cfg.physics.wall_restitution, 0.8);
        assert_eq!(cfg.physics.platform_rest_speed, 1.0);
        assert!(!cfg.physics.swept_platform);
        assert_eq!(cfg.star.position, Vec2::new(0.0, 1.0));
        assert_eq!(cfg.star.velocity, Vec2::new(0.1, -0.1));
        assert_eq!(cfg.platform.position, Vec2::new(0.0, 0.9));
        assert_eq!(cfg.walls.len(), 2);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn parse_minimal_toml() {
        let toml_str = r#"
spin_rate = 0.5

[physics]
gravity = 9.8
"#;
        let cfg = SandboxConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(cfg.physics.gravity, 9.8);
        assert_eq!(cfg.spin_rate, 0.5);
        // Untouched sections keep defaults
        assert_eq!(cfg.physics.wall_restitution, WALL_RESTITUTION);
        assert_eq!(cfg.star, StarConfig::default());
        assert_eq!(cfg.walls.len(), 2);
    }

    #[test]
    fn parse_full_toml() {
        let toml_str = r#"
spin_rate = 1.0

[physics]
gravity = 3.0
platform_rest_speed = 0.5
wall_restitution = 0.6
wall_separation = 0.01
wall_rest_speed = 0.002
swept_platform = true

[star]
position = { x = 0.25, y = 1.5 }
velocity = { x = -0.3, y = 0.0 }
size = { x = 0.1, y = 0.1 }

[platform]
position = { x = -0.5, y = -0.8 }
size = { x = 1.0, y = 0.05 }

[[walls]]
position = { x = -2.0, y = -1.0 }
size = { x = 0.1, y = 3.0 }
"#;
        let cfg = SandboxConfig::from_toml_str(toml_str).unwrap();
        assert!(cfg.physics.swept_platform);
        assert_eq!(cfg.physics.wall_restitution, 0.6);
        assert_eq!(cfg.star.position, Vec2::new(0.25, 1.5));
        assert_eq!(cfg.star.size, Vec2::new(0.1, 0.1));
        assert_eq!(cfg.platform.position, Vec2::new(-0.5, -0.8));
        assert_eq!(cfg.walls.len(), 1);
        assert_eq!(cfg.walls[0].size, Vec2::new(0.1, 3.0));
    }

    #[test]
    fn empty_walls_allowed() {
        let cfg = SandboxConfig::from_toml_str("walls = []").unwrap();
        assert!(cfg.walls.is_empty());
    }

    #[test]
    fn syntax_error_is_parse_error() {
        let err = SandboxConfig::from_toml_str("[physics\ngravity = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)), "got {err}");
    }

    #[test]
    fn negative_gravity_rejected() {
        let err = SandboxConfig::from_toml_str("[physics]\ngravity = -9.8").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("physics.gravity"));
    }

    #[test]
    fn restitution_above_one_rejected() {
        let err = SandboxConfig::from_toml_str("[physics]\nwall_restitution = 1.5").unwrap_err();
        assert!(err.to_string().contains("wall_restitution"));
    }

    #[test]
    fn negative_wall_size_rejected() {
        let cfg = SandboxConfig {
            walls: vec![ObstacleConfig {
                position: Vec2::ZERO,
                size: Vec2::new(-0.1, 1.0),
            }],
            ..SandboxConfig::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("walls[0].size"), "got {err}");
    }

    #[test]
    fn nan_star_position_rejected() {
        let mut cfg = SandboxConfig::default();
        cfg.star.position = Vec2::new(f32::NAN, 0.0);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn tuning_mirrors_physics_section() {
        let physics = SandboxPhysicsConfig {
            wall_restitution: 0.5,
            swept_platform: true,
            ..SandboxPhysicsConfig::default()
        };
        let tuning = physics.tuning();
        assert_eq!(tuning.wall_restitution, 0.5);
        assert!(tuning.swept_platform);
        assert_eq!(tuning.platform_rest_speed, PLATFORM_REST_SPEED);
    }

    #[test]
    fn shipped_config_matches_defaults() {
        let cfg =
            SandboxConfig::from_toml_str(include_str!("../../../config/sandbox.toml")).unwrap();
        assert_eq!(cfg, SandboxConfig::default());
    }
}
