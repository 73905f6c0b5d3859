//! Input mapping
//!
//! Turns raw keyboard codes and touch positions into player intents. Kept free
//! of `web-sys` so the zone math can be tested natively.

use crate::sim::{SkillId, TickInput};

/// Share of the canvas height (from the top) that acts as the jump zone
pub const JUMP_ZONE_FRACTION: f32 = 0.75;

/// A discrete player action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Jump,
    Skill(SkillId),
}

impl Intent {
    /// Queue this intent for the next simulation step
    pub fn apply_to(self, input: &mut TickInput) {
        match self {
            Intent::Jump => input.jump = true,
            Intent::Skill(id) => input.skills.push(id),
        }
    }
}

/// Map a `KeyboardEvent.code` to an intent
pub fn key_intent(code: &str) -> Option<Intent> {
    match code {
        "Space" | "ArrowUp" => Some(Intent::Jump),
        "Digit1" | "Numpad1" => Some(Intent::Skill(SkillId::TimeSlow)),
        "Digit2" | "Numpad2" => Some(Intent::Skill(SkillId::Invincible)),
        "Digit3" | "Numpad3" => Some(Intent::Skill(SkillId::ClearAhead)),
        _ => None,
    }
}

/// Map a touch at (x, y), relative to the canvas' top-left corner, to an intent.
///
/// The top 75% of the canvas jumps; the bottom strip is split into three
/// equal skill buttons. Touches outside the canvas (or a degenerate canvas)
/// map to nothing.
pub fn touch_intent(x: f32, y: f32, width: f32, height: f32) -> Option<Intent> {
    if !(width > 0.0 && height > 0.0) {
        return None;
    }
    if !(0.0..width).contains(&x) || !(0.0..height).contains(&y) {
        return None;
    }

    if y < height * JUMP_ZONE_FRACTION {
        return Some(Intent::Jump);
    }

    let zone_width = width / 3.0;
    let slot = if x < zone_width {
        0
    } else if x < zone_width * 2.0 {
        1
    } else {
        2
    };
    SkillId::from_slot(slot).map(Intent::Skill)
}
