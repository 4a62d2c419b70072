//! Billiards - a deterministic pool table simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (integration, cushions, ball collisions, racking)
//! - `settings`: Physical constants gathered into one serializable config
//!
//! Rendering, input and audio belong to the host. The engine only consumes
//! frame time plus a static table geometry and exposes ball positions and
//! rest state.

pub mod settings;
pub mod sim;

pub use settings::{ClothSpeed, Settings};
pub use sim::{Ball, BallKind, Cushion, StepReport, TableGeometry, TableState, step};

/// Default physical constants (source units: pixels, seconds)
pub mod consts {
    /// Host frame timestep used by the demo and tests (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Integration substeps per frame (prevents tunneling through cushions)
    pub const SUBSTEPS: u32 = 8;
    /// Largest frame delta accepted before clamping (host stalls, debugger breaks)
    pub const MAX_FRAME_DT: f32 = 0.25;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 20.0;
    pub const BALL_MASS: f32 = 100.0;
    /// Linear drag coefficient (acceleration = -velocity * friction)
    pub const FRICTION: f32 = 0.9;
    /// Speed below which a ball is snapped to rest (units/s)
    pub const STOP_THRESHOLD: f32 = 10.0;

    /// Slack on the "foot lies on the segment" test
    pub const CUSHION_EPSILON: f32 = 0.01;
    /// Cue strike: velocity = (target - cue position) * STRIKE_POWER
    pub const STRIKE_POWER: f32 = 5.0;
    /// Gap left between neighbouring balls in a fresh rack
    pub const RACK_CLEARANCE: f32 = 0.1;

    /// Standard table (playing surface inside the cushions), long axis vertical
    pub const TABLE_WIDTH: f32 = 560.0;
    pub const TABLE_HEIGHT: f32 = 1120.0;
    /// Opening of each pocket between the cushion noses
    pub const POCKET_MOUTH: f32 = 90.0;
}
