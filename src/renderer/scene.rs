//! Scene building
//!
//! Converts `GameState` into an ordered list of draw commands. This is the
//! whole of the rendering logic; backends only execute the list.

use glam::Vec2;

use crate::consts::*;
use crate::sim::{GameState, ObstacleKind, Rect, SkillId};

/// Images the game can draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteId {
    Player,
    GroundObstacle,
    AirObstacle,
    Background,
}

impl SpriteId {
    pub const ALL: [SpriteId; 4] = [
        SpriteId::Player,
        SpriteId::GroundObstacle,
        SpriteId::AirObstacle,
        SpriteId::Background,
    ];

    /// Asset path relative to the page
    pub fn path(&self) -> &'static str {
        match self {
            SpriteId::Player => "assets/dino.png",
            SpriteId::GroundObstacle => "assets/cactus.png",
            SpriteId::AirObstacle => "assets/bird.png",
            SpriteId::Background => "assets/background.png",
        }
    }
}

/// What to draw when a sprite is not (yet) available
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fallback {
    /// Solid rectangle over the sprite bounds
    Fill(&'static str),
    /// Downward-pointing wing shape spanning the sprite bounds
    Wings(&'static str),
}

/// One drawing operation in logical (800x400) coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Wipe the surface
    Clear,
    /// Tiled background scrolled left by `scroll` units; flat color if missing
    Background { scroll: f64, fallback: &'static str },
    FillRect { rect: Rect, color: &'static str },
    StrokeRect { rect: Rect, color: &'static str, width: f32 },
    Sprite { sprite: SpriteId, rect: Rect, fallback: Fallback },
    /// Gold coin with a `$` mark
    Coin { center: Vec2, radius: f32 },
}

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: &str = "#f7f7f7";
    pub const GROUND: &str = "#333";
    pub const PLAYER: &str = "red";
    pub const GROUND_OBSTACLE: &str = "green";
    pub const AIR_OBSTACLE: &str = "gray";
    pub const COIN_FILL: &str = "#ffd700";
    pub const COIN_EDGE: &str = "#daa520";
    pub const COIN_MARK: &str = "#000";
    pub const SHIELD: &str = "gold";
    pub const TIME_SLOW_TINT: &str = "rgba(0, 200, 255, 0.2)";
}

/// Build the frame's draw list, back to front
pub fn build_scene(state: &GameState) -> Vec<DrawCmd> {
    let mut cmds = Vec::with_capacity(8 + state.obstacles.len() + state.coins.len());

    cmds.push(DrawCmd::Clear);
    cmds.push(DrawCmd::Background {
        scroll: state.economy.distance * BACKGROUND_PARALLAX as f64,
        fallback: colors::BACKGROUND,
    });
    cmds.push(DrawCmd::FillRect {
        rect: Rect::new(0.0, GROUND_Y, CANVAS_WIDTH, 2.0),
        color: colors::GROUND,
    });

    let player = state.player.rect();
    cmds.push(DrawCmd::Sprite {
        sprite: SpriteId::Player,
        rect: player,
        fallback: Fallback::Fill(colors::PLAYER),
    });

    for obstacle in &state.obstacles {
        let (sprite, fallback) = match obstacle.kind {
            ObstacleKind::Ground => (
                SpriteId::GroundObstacle,
                Fallback::Fill(colors::GROUND_OBSTACLE),
            ),
            ObstacleKind::Airborne => (
                SpriteId::AirObstacle,
                Fallback::Wings(colors::AIR_OBSTACLE),
            ),
        };
        cmds.push(DrawCmd::Sprite {
            sprite,
            rect: obstacle.rect,
            fallback,
        });
    }

    for coin in &state.coins {
        cmds.push(DrawCmd::Coin {
            center: coin.rect.pos + coin.rect.size * 0.5,
            radius: coin.rect.size.x * 0.5,
        });
    }

    // Skill overlays
    if state.skills.is_active(SkillId::Invincible) {
        cmds.push(DrawCmd::StrokeRect {
            rect: Rect {
                pos: player.pos - Vec2::splat(5.0),
                size: player.size + Vec2::splat(10.0),
            },
            color: colors::SHIELD,
            width: 3.0,
        });
    }
    if state.skills.is_active(SkillId::TimeSlow) {
        cmds.push(DrawCmd::FillRect {
            rect: Rect::new(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT),
            color: colors::TIME_SLOW_TINT,
        });
    }

    cmds
}
