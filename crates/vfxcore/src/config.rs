use crate::error::ConfigError;
use glam::Vec4;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which of the renderer's materials receive the per-tick dissolve writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialScope {
    First,
    All,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolkitConfig {
    pub dissolve: DissolveConfig,
    pub vologram_dissolve: VologramDissolveConfig,
    pub mesh_trail: MeshTrailConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DissolveConfig {
    /// Progress added per tick. Only the magnitude matters, the direction comes from `reverse`.
    pub rate: f32,
    pub noise_scale: f32,
    /// Seconds between two ticks of a running dissolve.
    pub tick_interval: f32,
    pub model_color: Vec4,
    pub effect_color: Vec4,
    pub use_distinct_colors: bool,
    pub play_on_start: bool,
    /// Materialize (1 -> 0) instead of dissolve (0 -> 1).
    pub reverse: bool,
    pub play_vfx: bool,
    pub material_scope: MaterialScope,
    pub particle_duration_divisor: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VologramDissolveConfig {
    pub dissolve: DissolveConfig,
    pub target_frame: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshTrailConfig {
    pub play_on_start: bool,
    /// Length of a spawning window in seconds.
    pub active_time: f32,
    pub spawn_interval: f32,
    pub target_frame: u32,
    pub play_if_moving: bool,
    pub motion_threshold: f32,
    pub trail_color: Vec4,
    pub fresnel_power: f32,
    pub initial_alpha: f32,
    pub fade_rate: f32,
    pub fade_interval: f32,
    pub destroy_delay: f32,
}

impl Default for DissolveConfig {
    fn default() -> Self {
        Self {
            rate: 0.05,
            noise_scale: 100.0,
            tick_interval: 0.05,
            model_color: Vec4::new(0.0, 2.5, 4.0, 1.0),
            effect_color: Vec4::new(4.0, 1.5, 0.0, 1.0),
            use_distinct_colors: false,
            play_on_start: false,
            reverse: false,
            play_vfx: true,
            material_scope: MaterialScope::First,
            particle_duration_divisor: 25.0,
        }
    }
}

impl Default for VologramDissolveConfig {
    fn default() -> Self {
        Self {
            dissolve: DissolveConfig {
                material_scope: MaterialScope::All,
                ..DissolveConfig::default()
            },
            target_frame: 0,
        }
    }
}

impl Default for MeshTrailConfig {
    fn default() -> Self {
        Self {
            play_on_start: false,
            active_time: 2.0,
            spawn_interval: 0.1,
            target_frame: 0,
            play_if_moving: false,
            motion_threshold: 0.05,
            trail_color: Vec4::new(0.3, 1.2, 3.0, 1.0),
            fresnel_power: 2.0,
            initial_alpha: 1.0,
            fade_rate: 0.1,
            fade_interval: 0.05,
            destroy_delay: 0.5,
        }
    }
}

impl Default for ToolkitConfig {
    fn default() -> Self {
        Self {
            dissolve: DissolveConfig::default(),
            vologram_dissolve: VologramDissolveConfig::default(),
            mesh_trail: MeshTrailConfig::default(),
        }
    }
}

impl ToolkitConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: ToolkitConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.dissolve.validate()?;
        self.vologram_dissolve.dissolve.validate()?;
        self.mesh_trail.validate()
    }
}

impl DissolveConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        // a zero rate never leaves [0, 1]
        positive("dissolve.rate", self.rate.abs())?;
        positive("dissolve.tick_interval", self.tick_interval)?;
        positive(
            "dissolve.particle_duration_divisor",
            self.particle_duration_divisor,
        )?;
        finite("dissolve.noise_scale", self.noise_scale)
    }
}

impl MeshTrailConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        finite("mesh_trail.active_time", self.active_time)?;
        positive("mesh_trail.spawn_interval", self.spawn_interval)?;
        positive("mesh_trail.fade_rate", self.fade_rate)?;
        positive("mesh_trail.fade_interval", self.fade_interval)?;
        positive("mesh_trail.destroy_delay", self.destroy_delay)?;
        finite("mesh_trail.motion_threshold", self.motion_threshold)?;
        finite("mesh_trail.fresnel_power", self.fresnel_power)
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("{value} is not finite")))
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("{value} must be greater than zero")))
    }
}
