//! Rendering module
//!
//! `scene` turns game state into a draw list, `canvas` paints it with the
//! browser's 2D context.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;
pub mod viewport;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use scene::{DrawCmd, Fallback, SpriteId, build_scene};
pub use viewport::Viewport;
