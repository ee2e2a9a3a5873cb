//! Momentum and threat pools for the Dune 2d20 economy.
//!
//! A pool is a pair of counters that never drop below zero. Players bank
//! surplus successes as momentum; complications feed the gamemaster's
//! threat. [`MomentumStore`] keeps one pool per caller-chosen scope
//! (a table, a channel, a scene). Nothing here is persisted.

use std::collections::HashMap;
use std::hash::Hash;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::DuneTestResult;

/// A shared momentum and threat pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MomentumPool {
    /// Momentum available to the players.
    pub momentum: u32,
    /// Threat available to the gamemaster.
    pub threat: u32,
}

impl MomentumPool {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adjust momentum by `delta`, flooring at zero. Returns the new value.
    pub fn adjust_momentum(&mut self, delta: i32) -> u32 {
        self.momentum = saturating_adjust(self.momentum, delta);
        self.momentum
    }

    /// Adjust threat by `delta`, flooring at zero. Returns the new value.
    pub fn adjust_threat(&mut self, delta: i32) -> u32 {
        self.threat = saturating_adjust(self.threat, delta);
        self.threat
    }

    /// Spend up to `amount` momentum. Returns how much was actually spent.
    pub fn spend_momentum(&mut self, amount: u32) -> u32 {
        let spent = amount.min(self.momentum);
        self.momentum -= spent;
        spent
    }

    /// Bank the momentum and threat generated by a test.
    pub fn apply_test(&mut self, result: &DuneTestResult) {
        self.momentum = self.momentum.saturating_add(result.momentum);
        self.threat = self.threat.saturating_add(result.threat);
    }

    /// Empty both counters.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Returns true if both counters are zero.
    pub fn is_empty(&self) -> bool {
        self.momentum == 0 && self.threat == 0
    }
}

impl std::fmt::Display for MomentumPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Momentum: {} | Threat: {}", self.momentum, self.threat)
    }
}

fn saturating_adjust(value: u32, delta: i32) -> u32 {
    if delta >= 0 {
        value.saturating_add(delta.unsigned_abs())
    } else {
        value.saturating_sub(delta.unsigned_abs())
    }
}

/// Momentum pools keyed by scope.
#[derive(Debug, Clone)]
pub struct MomentumStore<K> {
    pools: HashMap<K, MomentumPool>,
}

impl<K> Default for MomentumStore<K> {
    fn default() -> Self {
        Self {
            pools: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + std::fmt::Debug> MomentumStore<K> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The pool for `scope`; an unknown scope reads as an empty pool.
    pub fn get(&self, scope: &K) -> MomentumPool {
        self.pools.get(scope).copied().unwrap_or_default()
    }

    /// Adjust both counters of a scope's pool, creating it if needed.
    pub fn adjust(&mut self, scope: K, momentum: i32, threat: i32) -> MomentumPool {
        debug!(?scope, momentum, threat, "adjusting momentum pool");
        let pool = self.pools.entry(scope).or_default();
        pool.adjust_momentum(momentum);
        pool.adjust_threat(threat);
        *pool
    }

    /// Bank a test result into a scope's pool.
    pub fn apply_test(&mut self, scope: K, result: &DuneTestResult) -> MomentumPool {
        let pool = self.pools.entry(scope).or_default();
        pool.apply_test(result);
        *pool
    }

    /// Reset a scope's pool to zero.
    pub fn reset(&mut self, scope: K) -> MomentumPool {
        debug!(?scope, "resetting momentum pool");
        let pool = self.pools.entry(scope).or_default();
        pool.reset();
        *pool
    }

    /// Iterate over every scope that has a pool.
    pub fn scopes(&self) -> impl Iterator<Item = (&K, &MomentumPool)> {
        self.pools.iter()
    }
}
