//! Simulation settings
//!
//! Every physical constant the engine needs lives here and is handed to
//! [`TableState`](crate::sim::TableState) at construction. Persisted as JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Cloth speed presets (how quickly balls lose speed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ClothSpeed {
    Fast,
    #[default]
    Standard,
    Slow,
}

impl ClothSpeed {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClothSpeed::Fast => "Fast",
            ClothSpeed::Standard => "Standard",
            ClothSpeed::Slow => "Slow",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "fast" => Some(ClothSpeed::Fast),
            "standard" | "std" => Some(ClothSpeed::Standard),
            "slow" => Some(ClothSpeed::Slow),
            _ => None,
        }
    }

    /// Drag coefficient for this cloth
    pub fn friction(&self) -> f32 {
        match self {
            ClothSpeed::Fast => 0.6,
            ClothSpeed::Standard => FRICTION,
            ClothSpeed::Slow => 1.2,
        }
    }
}

/// Engine configuration
///
/// Radius and mass are shared by every ball on the table. Zero or negative
/// radius/mass is undefined behavior; [`Settings::validate`] only reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Cloth preset the friction was derived from
    pub cloth: ClothSpeed,

    // === Balls ===
    pub ball_radius: f32,
    pub ball_mass: f32,
    /// Linear drag coefficient
    pub friction: f32,
    /// Speed (units/s) under which a ball snaps to rest
    pub stop_threshold: f32,

    // === Stepping ===
    /// Integration substeps per frame (0 is treated as 1)
    pub substeps: u32,
    /// Frame deltas above this are clamped
    pub max_frame_dt: f32,
    /// Run the ball-ball pass after every substep instead of once per frame
    pub ball_pass_every_substep: bool,

    // === Geometry ===
    /// Slack on the cushion on-segment test
    pub cushion_epsilon: f32,
    /// Gap between neighbouring balls in a fresh rack
    pub rack_clearance: f32,

    // === Cue ===
    /// Cue strike multiplier
    pub strike_power: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cloth: ClothSpeed::Standard,

            ball_radius: BALL_RADIUS,
            ball_mass: BALL_MASS,
            friction: FRICTION,
            stop_threshold: STOP_THRESHOLD,

            substeps: SUBSTEPS,
            max_frame_dt: MAX_FRAME_DT,
            ball_pass_every_substep: false,

            cushion_epsilon: CUSHION_EPSILON,
            rack_clearance: RACK_CLEARANCE,

            strike_power: STRIKE_POWER,
        }
    }
}

impl Settings {
    /// Create settings from a cloth preset
    pub fn from_preset(cloth: ClothSpeed) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(cloth);
        settings
    }

    /// Apply a cloth preset (overrides friction)
    pub fn apply_preset(&mut self, cloth: ClothSpeed) {
        self.cloth = cloth;
        self.friction = cloth.friction();
    }

    /// Substep count actually used by the step driver
    pub fn effective_substeps(&self) -> u32 {
        self.substeps.max(1)
    }

    /// Half-width of one rack slot
    pub fn rack_ball_size(&self) -> f32 {
        self.ball_radius + self.rack_clearance / 2.0
    }

    /// Log every violated precondition; returns true if none were violated.
    ///
    /// The engine runs regardless, so callers decide what to do with a false.
    pub fn validate(&self) -> bool {
        let mut ok = true;
        if !(self.ball_radius > 0.0) {
            log::warn!("ball_radius must be positive (got {})", self.ball_radius);
            ok = false;
        }
        if !(self.ball_mass > 0.0) {
            log::warn!("ball_mass must be positive (got {})", self.ball_mass);
            ok = false;
        }
        if self.friction < 0.0 {
            log::warn!("friction must not be negative (got {})", self.friction);
            ok = false;
        }
        if self.stop_threshold < 0.0 {
            log::warn!("stop_threshold must not be negative (got {})", self.stop_threshold);
            ok = false;
        }
        if self.substeps == 0 {
            log::warn!("substeps is 0, running 1 substep per frame");
            ok = false;
        }
        ok
    }

    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("Invalid settings in {}: {}, using defaults", path.display(), err);
                    Self::default()
                }
            },
            Err(err) => {
                log::info!("No settings at {} ({}), using defaults", path.display(), err);
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = self.to_json().map_err(std::io::Error::other)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }
}
