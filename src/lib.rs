//! Dino Dash - A side-scrolling runner with skills and an upgrade shop
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, skills, economy)
//! - `tuning`: Data-driven game balance
//! - `input`: Key/touch mapping to player intents
//! - `hud`: Status display values derived from state
//! - `timestep`: Fixed-step accumulator for the frame loop
//! - `renderer`: Scene building, viewport fitting and the canvas backend

#[cfg(target_arch = "wasm32")]
pub mod assets;
#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod hud;
pub mod input;
pub mod renderer;
pub mod sim;
pub mod timestep;
pub mod tuning;

pub use hud::HudSnapshot;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one display frame at 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Longest real frame delta fed to the accumulator (tab switches etc.)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Logical playfield dimensions
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 400.0;
    /// Y of the floor; everything stands on top of this line
    pub const GROUND_Y: f32 = 320.0;

    /// Player defaults
    pub const PLAYER_X: f32 = 50.0;
    pub const PLAYER_SIZE: f32 = 70.0;

    /// Ground obstacle (cactus)
    pub const GROUND_OBSTACLE_W: f32 = 30.0;
    pub const GROUND_OBSTACLE_H: f32 = 50.0;
    /// Airborne obstacle (bird), top sits 100-160 above the ground line
    pub const AIR_OBSTACLE_W: f32 = 40.0;
    pub const AIR_OBSTACLE_H: f32 = 30.0;
    pub const AIR_OBSTACLE_MIN_ALT: f32 = 100.0;
    pub const AIR_OBSTACLE_MAX_ALT: f32 = 160.0;

    /// Coins, top sits 100-150 above the ground line
    pub const COIN_SIZE: f32 = 20.0;
    pub const COIN_MIN_ALT: f32 = 100.0;
    pub const COIN_MAX_ALT: f32 = 150.0;

    /// Background scrolls at this fraction of the foreground speed
    pub const BACKGROUND_PARALLAX: f32 = 0.5;
}
