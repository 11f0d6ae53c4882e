//! Runtime-tunable settings.
//!
//! Every field has a default, so an override JSON only needs the keys it
//! changes: `{"controls": {"zoom_step": 0.2}, "motion": {"orbit_rate": 20}}`.

use std::f32::consts::FRAC_PI_2;

use serde::Deserialize;
use thiserror::Error;

/// Why an override was rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{field} = {value} is out of range ({expected})")]
    OutOfRange {
        field: &'static str,
        value: f32,
        expected: &'static str,
    },
    #[error("min_distance {min} exceeds max_distance {max}")]
    DistanceBounds { min: f32, max: f32 },
}

fn check(field: &'static str, value: f32, ok: bool, expected: &'static str) -> Result<(), ConfigError> {
    if ok && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value, expected })
    }
}

/// Pointer sensitivities and camera limits.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// Radians of azimuth/polar change per pixel dragged.
    pub orbit_sensitivity: f32,
    /// Scene units of pan per pixel dragged.
    pub pan_sensitivity: f32,
    /// Fractional distance change per wheel tick.
    pub zoom_step: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Closest the polar angle may come to either pole, in radians.
    pub polar_margin: f32,
}

impl ControlConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check("orbit_sensitivity", self.orbit_sensitivity, true, "finite")?;
        check("pan_sensitivity", self.pan_sensitivity, true, "finite")?;
        check("zoom_step", self.zoom_step, self.zoom_step > 0.0 && self.zoom_step < 1.0, "0 < x < 1")?;
        check("min_distance", self.min_distance, self.min_distance > 0.0, "x > 0")?;
        check("max_distance", self.max_distance, true, "finite")?;
        if self.min_distance > self.max_distance {
            return Err(ConfigError::DistanceBounds {
                min: self.min_distance,
                max: self.max_distance,
            });
        }
        check(
            "polar_margin",
            self.polar_margin,
            self.polar_margin > 0.0 && self.polar_margin < FRAC_PI_2,
            "0 < x < pi/2",
        )
    }
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            orbit_sensitivity: 0.005,
            pan_sensitivity: 0.5,
            zoom_step: 0.1,
            min_distance: 30.0,
            max_distance: 1500.0,
            polar_margin: 0.1,
        }
    }
}

/// Animation rates and camera-target smoothing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Multiplier applied to each body's angular speed per second.
    pub orbit_rate: f32,
    /// Self-rotation in radians per second, shared by all bodies.
    pub spin_rate: f32,
    /// Per-frame lerp factor toward the focused body.
    pub focus_smoothing: f32,
    /// Per-frame lerp factor back toward the origin when nothing is focused.
    pub home_smoothing: f32,
}

impl MotionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check("orbit_rate", self.orbit_rate, true, "finite")?;
        check("spin_rate", self.spin_rate, true, "finite")?;
        let unit = |x: f32| (0.0..=1.0).contains(&x);
        check("focus_smoothing", self.focus_smoothing, unit(self.focus_smoothing), "0 <= x <= 1")?;
        check("home_smoothing", self.home_smoothing, unit(self.home_smoothing), "0 <= x <= 1")
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            orbit_rate: 10.0,
            spin_rate: 0.5,
            focus_smoothing: 0.1,
            home_smoothing: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StarfieldConfig {
    pub count: usize,
    /// Side of the cube the stars are scattered over.
    pub spread: f32,
    pub size: f32,
    pub seed: u64,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            count: 15_000,
            spread: 3000.0,
            size: 0.8,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SolarConfig {
    pub controls: ControlConfig,
    pub motion: MotionConfig,
    pub starfield: StarfieldConfig,
    /// Camera position used at startup and by reset view.
    pub home_position: [f32; 3],
    /// Segments per orbit ring.
    pub ring_segments: usize,
}

impl Default for SolarConfig {
    fn default() -> Self {
        Self {
            controls: ControlConfig::default(),
            motion: MotionConfig::default(),
            starfield: StarfieldConfig::default(),
            home_position: [0.0, 150.0, 400.0],
            ring_segments: 128,
        }
    }
}

impl SolarConfig {
    /// Parse an override and reject values the controller cannot work with.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.controls.validate()?;
        self.motion.validate()?;
        check("starfield.spread", self.starfield.spread, self.starfield.spread >= 0.0, "x >= 0")?;
        check("starfield.size", self.starfield.size, self.starfield.size >= 0.0, "x >= 0")?;
        for (field, value) in ["home_position.x", "home_position.y", "home_position.z"]
            .into_iter()
            .zip(self.home_position)
        {
            check(field, value, true, "finite")?;
        }
        check(
            "ring_segments",
            self.ring_segments as f32,
            self.ring_segments >= 3,
            "at least 3",
        )
    }
}
