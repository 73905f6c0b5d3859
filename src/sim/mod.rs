//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only enters through `tick`'s `dt`
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod economy;
pub mod player;
pub mod skills;
pub mod state;
pub mod tick;

pub use collision::Rect;
pub use economy::{Economy, PurchaseOutcome, UpgradeKind};
pub use player::{Player, PlayerPhase};
pub use skills::{SkillId, SkillState, Skills};
pub use state::{Coin, GameEvent, GameState, Obstacle, ObstacleKind, RunState};
pub use tick::{TickInput, tick};
