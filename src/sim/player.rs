//! The runner: jump physics and stamina

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;
use crate::tuning::Tuning;

/// Vertical movement phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerPhase {
    /// Standing on the ground line, may jump
    Grounded,
    /// In the air, gravity applies
    Airborne,
}

/// The player-controlled character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner (screen space, y down)
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity, negative is up
    pub vel_y: f32,
    pub phase: PlayerPhase,
    pub stamina: f32,
    pub max_stamina: f32,
}

impl Player {
    pub fn new(max_stamina: f32) -> Self {
        Self {
            pos: Vec2::new(PLAYER_X, GROUND_Y - PLAYER_SIZE),
            size: Vec2::splat(PLAYER_SIZE),
            vel_y: 0.0,
            phase: PlayerPhase::Grounded,
            stamina: max_stamina,
            max_stamina,
        }
    }

    /// Resting y of the top edge
    #[inline]
    pub fn ground_top(&self) -> f32 {
        GROUND_Y - self.size.y
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    pub fn is_grounded(&self) -> bool {
        self.phase == PlayerPhase::Grounded
    }

    /// Try to jump. Returns false (and changes nothing) when airborne or
    /// short on stamina.
    pub fn jump(&mut self, tuning: &Tuning) -> bool {
        if !self.is_grounded() || self.stamina < tuning.jump_stamina_cost {
            return false;
        }
        self.stamina -= tuning.jump_stamina_cost;
        self.vel_y = -tuning.jump_impulse;
        self.phase = PlayerPhase::Airborne;
        true
    }

    /// Advance one frame of vertical motion and stamina regen
    pub fn step(&mut self, tuning: &Tuning) {
        self.pos.y += self.vel_y;

        if self.pos.y < self.ground_top() {
            self.vel_y += tuning.gravity;
            self.phase = PlayerPhase::Airborne;
        } else {
            self.pos.y = self.ground_top();
            self.vel_y = 0.0;
            self.phase = PlayerPhase::Grounded;
        }

        if self.stamina < self.max_stamina {
            self.stamina = (self.stamina + tuning.stamina_regen).min(self.max_stamina);
        }
    }

    /// Raise max stamina (shop upgrade). Current stamina is left as is.
    pub fn grow_max_stamina(&mut self, amount: f32) {
        self.max_stamina += amount;
    }

    /// Stamina as a fraction of max, for the HUD
    pub fn stamina_fraction(&self) -> f32 {
        if self.max_stamina <= 0.0 {
            return 0.0;
        }
        (self.stamina / self.max_stamina).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_starts_grounded_and_full() {
        let tuning = Tuning::default();
        let player = Player::new(tuning.base_max_stamina);
        assert!(player.is_grounded());
        assert_eq!(player.pos.y, GROUND_Y - PLAYER_SIZE);
        assert_eq!(player.stamina, 100.0);
    }

    #[test]
    fn test_jump_consumes_cost() {
        let tuning = Tuning::default();
        let mut player = Player::new(tuning.base_max_stamina);
        assert!(player.jump(&tuning));
        assert_eq!(player.stamina, 80.0);
        assert_eq!(player.vel_y, -12.0);
        assert_eq!(player.phase, PlayerPhase::Airborne);
    }

    #[test]
    fn test_no_double_jump() {
        let tuning = Tuning::default();
        let mut player = Player::new(tuning.base_max_stamina);
        assert!(player.jump(&tuning));
        player.step(&tuning);
        let before = player.clone();
        assert!(!player.jump(&tuning));
        assert_eq!(player.stamina, before.stamina);
        assert_eq!(player.vel_y, before.vel_y);
    }

    #[test]
    fn test_jump_rejected_without_stamina() {
        let tuning = Tuning::default();
        let mut player = Player::new(tuning.base_max_stamina);
        player.stamina = 19.9;
        assert!(!player.jump(&tuning));
        assert!(player.is_grounded());
        assert_eq!(player.stamina, 19.9);

        player.stamina = 20.0;
        assert!(player.jump(&tuning));
        assert_eq!(player.stamina, 0.0);
    }

    #[test]
    fn test_jump_lands() {
        let tuning = Tuning::default();
        let mut player = Player::new(tuning.base_max_stamina);
        player.jump(&tuning);

        let mut peak = player.pos.y;
        let mut frames = 0;
        while !player.is_grounded() || frames == 0 {
            player.step(&tuning);
            peak = peak.min(player.pos.y);
            frames += 1;
            assert!(frames < 200, "player never landed");
        }

        assert_eq!(player.pos.y, player.ground_top());
        assert_eq!(player.vel_y, 0.0);
        // 12 impulse at 0.6 gravity clears roughly 120 units
        assert!(player.ground_top() - peak > 100.0);
    }

    #[test]
    fn test_stamina_regen_clamps() {
        let tuning = Tuning::default();
        let mut player = Player::new(tuning.base_max_stamina);
        player.stamina = 99.95;
        player.step(&tuning);
        assert_eq!(player.stamina, 100.0);

        player.stamina = 50.0;
        player.step(&tuning);
        assert_eq!(player.stamina, 50.125);
    }

    proptest! {
        #[test]
        fn prop_never_below_ground_and_stamina_in_range(
            actions in prop::collection::vec(any::<bool>(), 1..600),
        ) {
            let tuning = Tuning::default();
            let mut player = Player::new(tuning.base_max_stamina);
            for jump in actions {
                if jump {
                    let before = player.stamina;
                    if player.jump(&tuning) {
                        prop_assert_eq!(before - player.stamina, tuning.jump_stamina_cost);
                    }
                }
                player.step(&tuning);
                prop_assert!(player.pos.y <= player.ground_top());
                prop_assert!(player.stamina >= 0.0);
                prop_assert!(player.stamina <= player.max_stamina);
                if player.is_grounded() {
                    prop_assert_eq!(player.pos.y, player.ground_top());
                }
            }
        }
    }
}
