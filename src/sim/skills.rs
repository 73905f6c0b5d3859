//! Player skills: cooldown-gated effects
//!
//! Duration skills carry an explicit expiry timestamp on the simulation
//! clock instead of a deferred callback. The tick expires them at the start
//! of the first step whose clock has reached the timestamp.

use serde::{Deserialize, Serialize};

use crate::tuning::{SkillTuning, Tuning};

/// Skill identifiers, in hotkey order (1, 2, 3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillId {
    /// Halves effective speed while active
    TimeSlow,
    /// Obstacles pass through the player while active
    Invincible,
    /// Instantly removes obstacles in front of the player
    ClearAhead,
}

impl SkillId {
    pub const ALL: [SkillId; 3] = [SkillId::TimeSlow, SkillId::Invincible, SkillId::ClearAhead];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            SkillId::TimeSlow => 0,
            SkillId::Invincible => 1,
            SkillId::ClearAhead => 2,
        }
    }

    /// Skill for hotkey slot 0..3
    pub fn from_slot(slot: usize) -> Option<Self> {
        Self::ALL.get(slot).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SkillId::TimeSlow => "Time Slow",
            SkillId::Invincible => "Invincible",
            SkillId::ClearAhead => "Clear Ahead",
        }
    }
}

/// Runtime state of one skill
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillState {
    /// Upgrade level; scales clear-ahead range
    pub level: u32,
    /// Active duration in seconds (0 = instantaneous)
    pub duration: f32,
    /// Cooldown before reduction
    pub base_cooldown: f32,
    /// Seconds until the skill can fire again
    pub remaining_cooldown: f32,
    /// Simulation time at which an active duration skill switches off
    pub active_until: Option<f64>,
}

impl SkillState {
    pub fn new(tuning: &SkillTuning) -> Self {
        Self {
            level: 1,
            duration: tuning.duration,
            base_cooldown: tuning.cooldown,
            remaining_cooldown: 0.0,
            active_until: None,
        }
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.remaining_cooldown <= 0.0
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active_until.is_some()
    }

    /// Cooldown after reduction
    pub fn effective_cooldown(&self, multiplier: f32) -> f32 {
        self.base_cooldown * multiplier
    }

    /// Start the skill at simulation time `now`. No-op while cooling down.
    pub fn trigger(&mut self, now: f64, cooldown_multiplier: f32) -> bool {
        if !self.is_ready() {
            return false;
        }
        if self.duration > 0.0 {
            self.active_until = Some(now + self.duration as f64);
        }
        self.remaining_cooldown = self.effective_cooldown(cooldown_multiplier);
        true
    }

    /// Switch off once `now` reaches the expiry. Returns true if it just expired.
    pub fn expire(&mut self, now: f64) -> bool {
        match self.active_until {
            Some(until) if now >= until => {
                self.active_until = None;
                true
            }
            _ => false,
        }
    }

    pub fn cool_down(&mut self, dt: f32) {
        if self.remaining_cooldown > 0.0 {
            self.remaining_cooldown = (self.remaining_cooldown - dt).max(0.0);
        }
    }

    /// Remaining cooldown as a fraction of the effective cooldown (0 = ready)
    pub fn cooldown_fraction(&self, multiplier: f32) -> f32 {
        let full = self.effective_cooldown(multiplier);
        if self.remaining_cooldown <= 0.0 || full <= 0.0 {
            return 0.0;
        }
        (self.remaining_cooldown / full).clamp(0.0, 1.0)
    }
}

/// All three skills, indexed by `SkillId`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skills {
    states: [SkillState; 3],
}

impl Skills {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            states: [
                SkillState::new(&tuning.time_slow),
                SkillState::new(&tuning.invincible),
                SkillState::new(&tuning.clear_ahead),
            ],
        }
    }

    #[inline]
    pub fn get(&self, id: SkillId) -> &SkillState {
        &self.states[id.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, id: SkillId) -> &mut SkillState {
        &mut self.states[id.index()]
    }

    #[inline]
    pub fn is_active(&self, id: SkillId) -> bool {
        self.get(id).is_active()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SkillId, &SkillState)> {
        SkillId::ALL.into_iter().zip(self.states.iter())
    }

    /// Expire finished duration skills, returning the ones that switched off
    pub fn expire_all(&mut self, now: f64) -> Vec<SkillId> {
        SkillId::ALL
            .into_iter()
            .filter(|&id| self.get_mut(id).expire(now))
            .collect()
    }

    pub fn cool_down_all(&mut self, dt: f32) {
        for state in &mut self.states {
            state.cool_down(dt);
        }
    }
}
