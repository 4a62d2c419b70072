//! Deterministic simulation module
//!
//! All table physics lives here. This module must be pure and deterministic:
//! - Caller-supplied frame time only
//! - Seeded RNG only
//! - Stable iteration order (by ball id)
//! - No rendering or platform dependencies

pub mod ball;
pub mod collision;
pub mod cushion;
pub mod rack;
pub mod state;
pub mod tick;
pub mod vector;

pub use ball::{Ball, BallKind};
pub use collision::{
    ball_ball_collision, ball_cushion_collision, elastic_1d, min_separation, overlapping_pairs,
    resolve_ball_collisions, resolve_cushion_collisions,
};
pub use cushion::{Cushion, TableGeometry};
pub use rack::{CENTER_SLOT, RACK_SIZE, RackSlot, SlotKind, rack, rack_from_numbers, slot_positions};
pub use state::TableState;
pub use tick::{StepReport, run_until_settled, step};
pub use vector::{angle, distance, dot, magnitude, reflect, unit};
