//! Ball state and per-substep motion integration

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::vector::{distance, magnitude};
use crate::settings::Settings;

/// Ball category, derived from its number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallKind {
    Cue,
    Solid,
    Eight,
    Stripe,
}

impl BallKind {
    pub fn from_number(number: u8) -> Self {
        match number {
            0 => BallKind::Cue,
            8 => BallKind::Eight,
            9..=15 => BallKind::Stripe,
            _ => BallKind::Solid,
        }
    }
}

/// A ball on the table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    /// Stable arena index (never reused while the table lives)
    pub id: u32,
    /// 0 = cue, 1-7 solids, 8 black, 9-15 stripes
    pub number: u8,
    pub is_striped: bool,
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub mass: f32,
    /// Linear drag coefficient
    pub friction: f32,
    /// Speed under which the ball snaps to rest
    pub stop_threshold: f32,
    /// Cached rest state, refreshed every update
    pub is_moving: bool,
    /// Cleared by the host once the ball is pocketed; such balls are skipped
    #[serde(default = "default_in_play")]
    pub in_play: bool,
}

fn default_in_play() -> bool {
    true
}

impl Ball {
    pub fn new(id: u32, number: u8, position: Vec2, settings: &Settings) -> Self {
        Self {
            id,
            number,
            is_striped: BallKind::from_number(number) == BallKind::Stripe,
            position,
            velocity: Vec2::ZERO,
            radius: settings.ball_radius,
            mass: settings.ball_mass,
            friction: settings.friction,
            stop_threshold: settings.stop_threshold,
            is_moving: false,
            in_play: true,
        }
    }

    pub fn kind(&self) -> BallKind {
        BallKind::from_number(self.number)
    }

    pub fn is_cue(&self) -> bool {
        self.number == 0
    }

    pub fn speed(&self) -> f32 {
        magnitude(self.velocity)
    }

    /// Whether the current speed is at or above the stop threshold
    pub fn moving(&self) -> bool {
        self.speed() >= self.stop_threshold
    }

    /// Whether `point` lies on the ball (host-side picking)
    pub fn within(&self, point: Vec2) -> bool {
        distance(point, self.position) <= self.radius
    }

    /// Advance by `dt` seconds under linear drag
    ///
    /// Drag decays speed exponentially and never reaches zero on its own, so
    /// anything under the stop threshold is snapped to exactly zero.
    pub fn update(&mut self, dt: f32) {
        let acceleration = self.velocity * self.friction * -1.0;

        self.position += self.velocity * dt + acceleration * dt * dt / 2.0;
        self.velocity += acceleration * dt;

        if self.moving() {
            self.is_moving = true;
        } else {
            if self.is_moving {
                log::trace!("ball {} came to rest at {:?}", self.number, self.position);
            }
            self.velocity = Vec2::ZERO;
            self.is_moving = false;
        }
    }

    /// Cue strike: velocity = (target - position) * power
    pub fn strike(&mut self, target: Vec2, power: f32) {
        self.velocity = (target - self.position) * power;
        self.is_moving = self.moving();
        log::debug!(
            "ball {} struck toward {:?}, speed {:.1}",
            self.number,
            target,
            self.speed()
        );
    }

    /// Stop the ball where it stands
    pub fn halt(&mut self) {
        self.velocity = Vec2::ZERO;
        self.is_moving = false;
    }
}
