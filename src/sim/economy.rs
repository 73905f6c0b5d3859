//! Currency, upgrade levels and shop prices

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Upgrades sold at the rest stop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeKind {
    /// Faster scrolling (more score per second)
    Speed,
    /// Larger stamina pool
    Stamina,
    /// Shorter cooldowns on every skill (capped)
    CooldownReduction,
    /// Longer time-slow
    SlowDuration,
    /// Longer invincibility
    InvincibleDuration,
    /// Wider clear-ahead reach
    ClearRange,
}

impl UpgradeKind {
    pub const ALL: [UpgradeKind; 6] = [
        UpgradeKind::Speed,
        UpgradeKind::Stamina,
        UpgradeKind::CooldownReduction,
        UpgradeKind::SlowDuration,
        UpgradeKind::InvincibleDuration,
        UpgradeKind::ClearRange,
    ];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            UpgradeKind::Speed => 0,
            UpgradeKind::Stamina => 1,
            UpgradeKind::CooldownReduction => 2,
            UpgradeKind::SlowDuration => 3,
            UpgradeKind::InvincibleDuration => 4,
            UpgradeKind::ClearRange => 5,
        }
    }

    /// Price before any purchase
    pub fn base_price(self) -> u64 {
        match self {
            UpgradeKind::Speed => 100,
            UpgradeKind::Stamina => 100,
            UpgradeKind::CooldownReduction => 200,
            UpgradeKind::SlowDuration => 300,
            UpgradeKind::InvincibleDuration => 500,
            UpgradeKind::ClearRange => 400,
        }
    }

    /// Stable key used for DOM ids (`buy-speed`, `cost-speed`, ...)
    pub fn key(&self) -> &'static str {
        match self {
            UpgradeKind::Speed => "speed",
            UpgradeKind::Stamina => "stamina",
            UpgradeKind::CooldownReduction => "cdr",
            UpgradeKind::SlowDuration => "skillTime",
            UpgradeKind::InvincibleDuration => "skillInvincible",
            UpgradeKind::ClearRange => "skillClear",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }
}

/// Result of a shop purchase attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseOutcome {
    /// Bought; carries the price paid
    Bought { price: u64 },
    InsufficientFunds { price: u64, balance: u64 },
    /// Upgrade has hit its cap
    MaxLevel,
    /// Shop is closed
    NotInShop,
}

impl PurchaseOutcome {
    pub fn is_bought(&self) -> bool {
        matches!(self, PurchaseOutcome::Bought { .. })
    }
}

/// Score, wallet and upgrade bookkeeping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Economy {
    /// Cumulative distance scrolled
    pub distance: f64,
    /// floor(distance / 10)
    pub score: u64,
    pub currency: u64,
    levels: [u32; 6],
    prices: [u64; 6],
}

impl Default for Economy {
    fn default() -> Self {
        Self {
            distance: 0.0,
            score: 0,
            currency: 0,
            levels: [0; 6],
            prices: UpgradeKind::ALL.map(UpgradeKind::base_price),
        }
    }
}

impl Economy {
    /// Add scrolled distance and refresh the score
    pub fn advance(&mut self, distance: f32) {
        self.distance += distance as f64;
        self.score = (self.distance / 10.0).floor() as u64;
    }

    pub fn earn(&mut self, amount: u64) {
        self.currency = self.currency.saturating_add(amount);
    }

    #[inline]
    pub fn level(&self, kind: UpgradeKind) -> u32 {
        self.levels[kind.index()]
    }

    #[inline]
    pub fn price(&self, kind: UpgradeKind) -> u64 {
        self.prices[kind.index()]
    }

    /// Level ceiling for an upgrade, if any
    pub fn cap(kind: UpgradeKind, tuning: &Tuning) -> Option<u32> {
        match kind {
            UpgradeKind::CooldownReduction => Some(tuning.cooldown_reduction_cap),
            _ => None,
        }
    }

    /// Pay for an upgrade and bump its level and price.
    ///
    /// Effects on the player and skills are applied by the caller.
    pub fn buy(&mut self, kind: UpgradeKind, tuning: &Tuning) -> PurchaseOutcome {
        if Self::cap(kind, tuning).is_some_and(|cap| self.level(kind) >= cap) {
            return PurchaseOutcome::MaxLevel;
        }

        let price = self.price(kind);
        if self.currency < price {
            return PurchaseOutcome::InsufficientFunds {
                price,
                balance: self.currency,
            };
        }

        self.currency -= price;
        self.levels[kind.index()] += 1;
        self.prices[kind.index()] = next_price(price, tuning.price_growth);
        PurchaseOutcome::Bought { price }
    }
}

/// floor(price x growth), always at least one more than the old price
pub fn next_price(price: u64, growth: f32) -> u64 {
    let grown = (price as f64 * growth as f64).floor() as u64;
    grown.max(price + 1)
}
