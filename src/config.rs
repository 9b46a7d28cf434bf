//! Configuration for the firefly pool.
//!
//! Every tuning constant of the simulation lives in [`GlowConfig`]. The
//! struct serializes to JSON so scenes can ship their own tuning file, and
//! every section has `#[serde(default)]` so a file only needs the keys it
//! overrides.
//!
//! # Example
//!
//! ```ignore
//! let config = GlowConfig::default()
//!     .with_capacity(500)
//!     .with_hex_color("#9fe8ff")?
//!     .with_ambient_spawn_chance(0.2);
//! config.validate()?;
//! ```
//!
//! Ranges are sampled uniformly as `start + u * (end - start)`, so a range
//! with `start == end` yields a constant.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::ops::Range;
use std::path::Path;

/// Complete simulation configuration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GlowConfig {
    /// Number of slots in the pool. Fixed for the lifetime of a simulator.
    pub capacity: usize,
    /// Base particle colour (linear RGB, 0.0-1.0).
    pub color: [f32; 3],
    /// Base sphere radius; each particle multiplies it by its own scale.
    pub size: f32,
    /// Frame rate the per-frame velocities were tuned for.
    pub reference_frame_rate: f32,
    pub personality: PersonalityConfig,
    pub ambient: AmbientConfig,
    pub burst: BurstConfig,
    pub click: ClickConfig,
    pub shading: ShadingConfig,
}

/// Per-slot parameters rolled once when the pool is created.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PersonalityConfig {
    pub scale: Range<f32>,
    pub time_offset: Range<f32>,
    pub lifespan: Range<f32>,
    pub base_intensity: Range<f32>,
    pub pulse_factor: Range<f32>,
    pub pulse_speed: Range<f32>,
    pub direction_change_interval: Range<f32>,
}

/// Background spawning and wander steering.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AmbientConfig {
    /// Probability of one ambient spawn per non-empty frame.
    pub spawn_chance: f32,
    /// Radius band of the spawn shell around the scene origin.
    pub shell_radius: Range<f32>,
    /// Polar angle band, measured from the horizontal plane.
    pub polar_angle: Range<f32>,
    /// Extra vertical offset added to the shell point (result clamped at 0).
    pub height_jitter: Range<f32>,
    /// Full width of the per-axis random offset used for new targets.
    pub wander_offset: f32,
    /// Full width of the per-axis random initial velocity.
    pub initial_speed: f32,
    /// Wander targets never go below this height.
    pub min_height: f32,
    /// Speed cap, per reference frame.
    pub max_speed: f32,
    /// Acceleration toward the target, per reference frame.
    pub steering: f32,
    /// Full width of the per-axis velocity jitter, per reference frame.
    pub jitter: f32,
    /// Distance under which the target counts as reached.
    pub arrival_radius: f32,
}

/// Click-triggered burst spawning.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BurstConfig {
    /// Count used for object clicks that do not specify one.
    pub default_count: usize,
    pub lifespan: Range<f32>,
    /// Per-axis radial speed, per reference frame.
    pub speed: Range<f32>,
    /// Multiplier on the vertical speed component.
    pub upward_bias: Range<f32>,
    pub base_intensity: Range<f32>,
    pub pulse_factor: Range<f32>,
}

/// Direct clicks on a particle.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClickConfig {
    /// Repeated clicks on the same slot inside this window are ignored (seconds).
    pub cooldown: f32,
    /// How long the flash override stays on (seconds).
    pub flash_duration: f32,
    pub flash_scale: f32,
    pub flash_color: [f32; 3],
    /// Secondary particles spawned around the clicked one.
    pub scatter_count: usize,
    pub scatter_speed: f32,
    pub scatter_lifespan: f32,
    /// Name handed to the [`SoundPlayer`](crate::SoundPlayer).
    pub sound: String,
}

/// Material outputs and the central glow light.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShadingConfig {
    pub opacity_scale: f32,
    pub emissive_scale: f32,
    pub light_speed: f32,
    pub light_base: f32,
    pub light_gain: f32,
}

impl Default for GlowConfig {
    fn default() -> Self {
        Self {
            capacity: 2000,
            // #ffed97
            color: [1.0, 237.0 / 255.0, 151.0 / 255.0],
            size: 0.015,
            reference_frame_rate: 60.0,
            personality: PersonalityConfig::default(),
            ambient: AmbientConfig::default(),
            burst: BurstConfig::default(),
            click: ClickConfig::default(),
            shading: ShadingConfig::default(),
        }
    }
}

impl Default for PersonalityConfig {
    fn default() -> Self {
        Self {
            scale: 0.5..1.0,
            time_offset: 0.0..100.0,
            lifespan: 5.0..13.0,
            base_intensity: 0.5..1.0,
            pulse_factor: 0.1..0.25,
            pulse_speed: 1.0..3.0,
            direction_change_interval: 2.0..5.0,
        }
    }
}

impl Default for AmbientConfig {
    fn default() -> Self {
        Self {
            spawn_chance: 0.1,
            shell_radius: 2.5..4.5,
            polar_angle: -std::f32::consts::FRAC_PI_2..std::f32::consts::FRAC_PI_2,
            height_jitter: -0.5..1.0,
            wander_offset: 1.5,
            initial_speed: 0.01,
            min_height: 0.2,
            max_speed: 0.015,
            steering: 0.0005,
            jitter: 0.0005,
            arrival_radius: 0.1,
        }
    }
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            default_count: 8,
            lifespan: 2.0..5.0,
            speed: 0.01..0.03,
            upward_bias: 0.5..1.0,
            base_intensity: 0.7..1.5,
            pulse_factor: 0.2..0.4,
        }
    }
}

impl Default for ClickConfig {
    fn default() -> Self {
        Self {
            cooldown: 0.3,
            flash_duration: 0.3,
            flash_scale: 3.0,
            flash_color: [1.0, 1.0, 1.0],
            scatter_count: 3,
            scatter_speed: 0.05,
            scatter_lifespan: 1.0,
            sound: "particle-click".to_string(),
        }
    }
}

impl Default for ShadingConfig {
    fn default() -> Self {
        Self {
            opacity_scale: 0.7,
            emissive_scale: 0.5,
            light_speed: 0.3,
            light_base: 1.5,
            light_gain: 0.5,
        }
    }
}

impl GlowConfig {
    /// Set the pool capacity.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the base particle colour.
    pub fn with_color(mut self, color: [f32; 3]) -> Self {
        self.color = color;
        self
    }

    /// Set the base particle colour from a `#rrggbb` string.
    pub fn with_hex_color(mut self, hex: &str) -> Result<Self, ConfigError> {
        self.color = parse_hex_color(hex)?;
        Ok(self)
    }

    /// Set the base sphere radius.
    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Set the per-frame ambient spawn probability.
    pub fn with_ambient_spawn_chance(mut self, chance: f32) -> Self {
        self.ambient.spawn_chance = chance;
        self
    }

    /// Set the wander speed cap (per reference frame).
    pub fn with_max_speed(mut self, speed: f32) -> Self {
        self.ambient.max_speed = speed;
        self
    }

    /// Set the per-slot click cooldown in seconds.
    pub fn with_click_cooldown(mut self, seconds: f32) -> Self {
        self.click.cooldown = seconds;
        self
    }

    /// Parse a config from a JSON string and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the config to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        fs::write(path, self.to_json_string()?)?;
        Ok(())
    }

    /// Check every setting against its allowed domain.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        positive("size", self.size)?;
        positive("reference_frame_rate", self.reference_frame_rate)?;

        let p = &self.personality;
        range("personality.scale", &p.scale)?;
        range("personality.time_offset", &p.time_offset)?;
        lifespan_range("personality.lifespan", &p.lifespan)?;
        range("personality.base_intensity", &p.base_intensity)?;
        range("personality.pulse_factor", &p.pulse_factor)?;
        range("personality.pulse_speed", &p.pulse_speed)?;
        range("personality.direction_change_interval", &p.direction_change_interval)?;

        let a = &self.ambient;
        probability("ambient.spawn_chance", a.spawn_chance)?;
        range("ambient.shell_radius", &a.shell_radius)?;
        range("ambient.polar_angle", &a.polar_angle)?;
        range("ambient.height_jitter", &a.height_jitter)?;
        non_negative("ambient.wander_offset", a.wander_offset)?;
        non_negative("ambient.initial_speed", a.initial_speed)?;
        finite("ambient.min_height", a.min_height)?;
        positive("ambient.max_speed", a.max_speed)?;
        non_negative("ambient.steering", a.steering)?;
        non_negative("ambient.jitter", a.jitter)?;
        non_negative("ambient.arrival_radius", a.arrival_radius)?;

        let b = &self.burst;
        lifespan_range("burst.lifespan", &b.lifespan)?;
        range("burst.speed", &b.speed)?;
        range("burst.upward_bias", &b.upward_bias)?;
        range("burst.base_intensity", &b.base_intensity)?;
        range("burst.pulse_factor", &b.pulse_factor)?;

        let c = &self.click;
        non_negative("click.cooldown", c.cooldown)?;
        non_negative("click.flash_duration", c.flash_duration)?;
        positive("click.flash_scale", c.flash_scale)?;
        non_negative("click.scatter_speed", c.scatter_speed)?;
        positive("click.scatter_lifespan", c.scatter_lifespan)?;

        let s = &self.shading;
        non_negative("shading.opacity_scale", s.opacity_scale)?;
        non_negative("shading.emissive_scale", s.emissive_scale)?;
        finite("shading.light_speed", s.light_speed)?;
        finite("shading.light_base", s.light_base)?;
        finite("shading.light_gain", s.light_gain)?;

        Ok(())
    }
}

/// Parse a `#rrggbb` colour into linear 0.0-1.0 channels.
pub fn parse_hex_color(hex: &str) -> Result<[f32; 3], ConfigError> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ConfigError::InvalidColor(hex.to_string()));
    }

    let mut rgb = [0.0; 3];
    for (i, channel) in rgb.iter_mut().enumerate() {
        let byte = u8::from_str_radix(&digits[i * 2..i * 2 + 2], 16)
            .map_err(|_| ConfigError::InvalidColor(hex.to_string()))?;
        *channel = byte as f32 / 255.0;
    }
    Ok(rgb)
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::OutOfBounds { field, expected: "finite", value })
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfBounds { field, expected: "> 0", value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfBounds { field, expected: ">= 0", value })
    }
}

fn probability(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfBounds { field, expected: "within 0..=1", value })
    }
}

fn range(field: &'static str, r: &Range<f32>) -> Result<(), ConfigError> {
    if r.start.is_finite() && r.end.is_finite() && r.start <= r.end {
        Ok(())
    } else {
        Err(ConfigError::InvalidRange { field, start: r.start, end: r.end })
    }
}

// Lifespans divide life progress, so zero is not allowed.
fn lifespan_range(field: &'static str, r: &Range<f32>) -> Result<(), ConfigError> {
    range(field, r)?;
    positive(field, r.start)
}
