//! Status display values
//!
//! Everything the HUD shows, recomputed from `GameState` each frame.

use serde::Serialize;

use crate::sim::{GameState, RunState, SkillId};

/// Cooldown bar for one skill
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SkillGauge {
    pub id: SkillId,
    /// Remaining cooldown as a percentage of the effective cooldown (0 = ready)
    pub cooldown_pct: f32,
    pub active: bool,
}

/// One frame's worth of HUD values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudSnapshot {
    pub score: u64,
    pub currency: u64,
    /// Whole seconds until the next rest stop
    pub rest_countdown: u32,
    pub stamina_pct: f32,
    pub skills: [SkillGauge; 3],
    pub run_state: RunState,
}

impl HudSnapshot {
    pub fn from_state(state: &GameState) -> Self {
        let multiplier = state.cooldown_multiplier();
        let skills = SkillId::ALL.map(|id| {
            let skill = state.skills.get(id);
            SkillGauge {
                id,
                cooldown_pct: skill.cooldown_fraction(multiplier) * 100.0,
                active: skill.is_active(),
            }
        });

        Self {
            score: state.economy.score,
            currency: state.economy.currency,
            rest_countdown: state.time_to_rest().round() as u32,
            stamina_pct: state.player.stamina_fraction() * 100.0,
            skills,
            run_state: state.run_state,
        }
    }

    pub fn gauge(&self, id: SkillId) -> &SkillGauge {
        &self.skills[id.index()]
    }
}
