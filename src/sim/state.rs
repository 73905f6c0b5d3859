//! Game state and core simulation types
//!
//! Everything a run needs lives in `GameState`; a new run is a new value.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::economy::{Economy, PurchaseOutcome, UpgradeKind};
use super::player::Player;
use super::skills::{SkillId, Skills};
use crate::consts::*;
use crate::tuning::Tuning;

/// Whether the simulation advances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    /// Active gameplay
    Running,
    /// Rest stop; simulation paused until the shop is closed
    Shop,
    /// Run ended, state frozen for display
    GameOver,
}

/// Things that happened during a step, for audio and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    CoinCollected { amount: u64 },
    SkillActivated(SkillId),
    SkillExpired(SkillId),
    ObstaclesCleared { count: usize },
    ShopOpened,
    ShopClosed,
    Purchased(UpgradeKind),
    PurchaseRejected(UpgradeKind),
    Crashed,
}

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Stands on the ground line (cactus)
    Ground,
    /// Flies at head height (bird)
    Airborne,
}

/// An obstacle entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub rect: Rect,
    /// Fully scrolled off the left edge
    pub offscreen: bool,
}

/// A collectible coin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub id: u32,
    pub rect: Rect,
    pub offscreen: bool,
}

/// Move a box left and flag it once its right edge passes x = 0
#[inline]
pub(crate) fn scroll_left(rect: &mut Rect, speed: f32) -> bool {
    rect.pos.x -= speed;
    rect.right() < 0.0
}

/// Complete game state for one run (deterministic given seed and inputs)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub run_state: RunState,
    /// Simulation frames elapsed while running
    pub frame: u64,
    /// Seconds of simulated running time (skill expiries use this clock)
    pub clock: f64,
    /// Seconds since the last rest stop
    pub rest_timer: f32,
    pub player: Player,
    /// Active obstacles (spawn order)
    pub obstacles: Vec<Obstacle>,
    /// Active coins (spawn order)
    pub coins: Vec<Coin>,
    pub skills: Skills,
    pub economy: Economy,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
    rng: Pcg32,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new run with default balance
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a new run with custom balance
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            run_state: RunState::Running,
            frame: 0,
            clock: 0.0,
            rest_timer: 0.0,
            player: Player::new(tuning.base_max_stamina),
            obstacles: Vec::new(),
            coins: Vec::new(),
            skills: Skills::new(&tuning),
            economy: Economy::default(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            tuning,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Base speed plus upgrades, halved (by default) during time-slow
    pub fn effective_speed(&self) -> f32 {
        let level = self.economy.level(UpgradeKind::Speed) as f32;
        let mut speed = self.tuning.base_speed + level * self.tuning.speed_per_level;
        if self.skills.is_active(SkillId::TimeSlow) {
            speed *= self.tuning.time_slow_factor;
        }
        speed
    }

    /// Frames between obstacle spawns at a given speed
    pub fn spawn_interval(&self, speed: f32) -> u64 {
        ((self.tuning.spawn_distance / speed).floor() as u64).max(1)
    }

    pub fn cooldown_multiplier(&self) -> f32 {
        self.tuning
            .cooldown_multiplier(self.economy.level(UpgradeKind::CooldownReduction))
    }

    /// Seconds until the next rest stop
    pub fn time_to_rest(&self) -> f32 {
        (self.tuning.rest_interval - self.rest_timer).max(0.0)
    }

    // === Player actions ===

    /// Jump intent. Returns whether the jump happened.
    pub fn jump(&mut self) -> bool {
        if self.run_state != RunState::Running {
            return false;
        }
        let jumped = self.player.jump(&self.tuning);
        if jumped {
            self.events.push(GameEvent::Jumped);
        }
        jumped
    }

    /// Skill intent. No-op unless running and off cooldown.
    pub fn activate_skill(&mut self, id: SkillId) -> bool {
        if self.run_state != RunState::Running {
            return false;
        }
        let multiplier = self.cooldown_multiplier();
        let now = self.clock;
        if !self.skills.get_mut(id).trigger(now, multiplier) {
            log::trace!("{} still cooling down", id.as_str());
            return false;
        }

        if id == SkillId::ClearAhead {
            self.clear_ahead();
        }

        log::debug!("Skill {} activated at t={:.2}", id.as_str(), now);
        self.events.push(GameEvent::SkillActivated(id));
        true
    }

    /// Drop every obstacle up to the clear range in front of the player
    fn clear_ahead(&mut self) {
        let level = self.skills.get(SkillId::ClearAhead).level;
        let reach = self.player.pos.x + self.tuning.clear_range(level);
        let before = self.obstacles.len();
        self.obstacles.retain(|o| o.rect.left() > reach);
        let count = before - self.obstacles.len();
        self.events.push(GameEvent::ObstaclesCleared { count });
    }

    // === Shop ===

    pub fn open_shop(&mut self) {
        self.run_state = RunState::Shop;
        self.events.push(GameEvent::ShopOpened);
        log::info!(
            "Rest stop reached: score {}, currency {}",
            self.economy.score,
            self.economy.currency
        );
    }

    /// Leave the shop: resets the rest timer and resumes running
    pub fn close_shop(&mut self) {
        if self.run_state != RunState::Shop {
            return;
        }
        self.rest_timer = 0.0;
        self.run_state = RunState::Running;
        self.events.push(GameEvent::ShopClosed);
        log::info!("Back on the road");
    }

    /// Buy an upgrade. Only valid while the shop is open.
    pub fn purchase(&mut self, kind: UpgradeKind) -> PurchaseOutcome {
        if self.run_state != RunState::Shop {
            return PurchaseOutcome::NotInShop;
        }

        let outcome = self.economy.buy(kind, &self.tuning);
        if !outcome.is_bought() {
            log::debug!("Purchase of {:?} rejected: {:?}", kind, outcome);
            self.events.push(GameEvent::PurchaseRejected(kind));
            return outcome;
        }

        match kind {
            UpgradeKind::Speed | UpgradeKind::CooldownReduction => {}
            UpgradeKind::Stamina => self.player.grow_max_stamina(self.tuning.stamina_per_level),
            UpgradeKind::SlowDuration => {
                let skill = self.skills.get_mut(SkillId::TimeSlow);
                skill.duration += self.tuning.duration_per_level;
                skill.level += 1;
            }
            UpgradeKind::InvincibleDuration => {
                let skill = self.skills.get_mut(SkillId::Invincible);
                skill.duration += self.tuning.duration_per_level;
                skill.level += 1;
            }
            UpgradeKind::ClearRange => self.skills.get_mut(SkillId::ClearAhead).level += 1,
        }

        log::info!(
            "Bought {:?} level {} ({:?})",
            kind,
            self.economy.level(kind),
            outcome
        );
        self.events.push(GameEvent::Purchased(kind));
        outcome
    }

    /// End the run
    pub fn crash(&mut self) {
        self.run_state = RunState::GameOver;
        self.events.push(GameEvent::Crashed);
        log::info!(
            "Game over: score {}, currency {}, {:.1}s survived",
            self.economy.score,
            self.economy.currency,
            self.clock
        );
    }

    // === Spawning ===

    /// Seeded coin flip
    pub(crate) fn rng_roll(&mut self, chance: f32) -> bool {
        self.rng.random_bool(chance as f64)
    }

    /// Spawn an obstacle at the right edge; ~30% airborne
    pub fn spawn_obstacle(&mut self) {
        let kind = if self.rng.random_bool(self.tuning.airborne_chance as f64) {
            ObstacleKind::Airborne
        } else {
            ObstacleKind::Ground
        };

        let rect = match kind {
            ObstacleKind::Ground => Rect::new(
                CANVAS_WIDTH,
                GROUND_Y - GROUND_OBSTACLE_H,
                GROUND_OBSTACLE_W,
                GROUND_OBSTACLE_H,
            ),
            ObstacleKind::Airborne => {
                let altitude = self
                    .rng
                    .random_range(AIR_OBSTACLE_MIN_ALT..AIR_OBSTACLE_MAX_ALT);
                Rect::new(
                    CANVAS_WIDTH,
                    GROUND_Y - altitude,
                    AIR_OBSTACLE_W,
                    AIR_OBSTACLE_H,
                )
            }
        };

        let id = self.next_entity_id();
        self.obstacles.push(Obstacle {
            id,
            kind,
            rect,
            offscreen: false,
        });
    }

    /// Spawn a coin at the right edge, floating 100-150 above ground
    pub fn spawn_coin(&mut self) {
        let altitude = self.rng.random_range(COIN_MIN_ALT..COIN_MAX_ALT);
        let id = self.next_entity_id();
        self.coins.push(Coin {
            id,
            rect: Rect::new(CANVAS_WIDTH, GROUND_Y - altitude, COIN_SIZE, COIN_SIZE),
            offscreen: false,
        });
    }

    /// Place an obstacle directly (scripted scenarios)
    pub fn insert_obstacle(&mut self, kind: ObstacleKind, pos: Vec2, size: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.obstacles.push(Obstacle {
            id,
            kind,
            rect: Rect { pos, size },
            offscreen: false,
        });
        id
    }

    /// Place a coin directly (scripted scenarios)
    pub fn insert_coin(&mut self, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.coins.push(Coin {
            id,
            rect: Rect {
                pos,
                size: Vec2::splat(COIN_SIZE),
            },
            offscreen: false,
        });
        id
    }
}
