//! Dune: Adventures in the Imperium (2d20).
//!
//! Two resolution flavours live here:
//!
//! - [`dune_2d20_roll`]: the quick roll. Two d20s against a target number;
//!   with bonus dice only the two lowest count and the rest are shown for
//!   reference.
//! - [`DuneTest`]: the full skill test. Every die counts, low rolls score
//!   critical hits, surplus successes become momentum and complications
//!   become threat.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{DiceLimits, MAX_DUNE_DIFFICULTY, MAX_DUNE_TARGET};
use crate::error::ValidationError;
use crate::result::{MainDice, RollDetails, RollResult, SystemKind};
use crate::rng::DieSource;

/// Faces on a Dune die.
pub const DUNE_DIE: u32 = 20;

/// Dice in a base Dune pool.
pub const BASE_POOL: u32 = 2;

/// Roll `2 + bonus_dice` d20s against `target` (1-20).
///
/// Without bonus dice both dice count. With bonus dice the two numerically
/// lowest values form the main pair (ties go to the earlier die) and only
/// they decide `successes` and `complications`; the unrestricted counts are
/// kept in [`MainDice`]. `rolls` stays in draw order either way.
///
/// Parameters are not validated here; a pool is one die per bonus die, so
/// callers should bound `bonus_dice` first (see [`DiceLimits::validate_bonus`]).
pub fn dune_2d20_roll<R: DieSource + ?Sized>(
    target: u32,
    bonus_dice: u32,
    rng: &mut R,
) -> RollResult {
    let rolls = rng.roll_dice(pool_size(bonus_dice), DUNE_DIE);

    let all_successes = count_successes(&rolls, target);
    let all_complications = count_complications(&rolls);

    let (successes, complications, main) = if bonus_dice == 0 {
        (all_successes, all_complications, None)
    } else {
        let indices = lowest_pair(&rolls);
        let pair = [rolls[indices[0]], rolls[indices[1]]];
        let main = MainDice {
            rolls: pair,
            indices,
            all_successes,
            all_complications,
        };
        (
            count_successes(&pair, target),
            count_complications(&pair),
            Some(main),
        )
    };

    let total = rolls.iter().map(|&v| i64::from(v)).sum();
    debug!(
        target_number = target,
        bonus_dice,
        successes,
        complications,
        "dune 2d20 roll"
    );

    RollResult {
        rolls,
        total,
        successes,
        complications,
        botch: false,
        exploded_dice: Vec::new(),
        system: SystemKind::Dune2d20,
        details: RollDetails::Dune {
            target,
            bonus_dice,
            main,
        },
    }
}

/// Dice in a pool with `bonus_dice` extra dice.
fn pool_size(bonus_dice: u32) -> u32 {
    BASE_POOL.saturating_add(bonus_dice)
}

fn count_successes(rolls: &[u32], target: u32) -> u32 {
    rolls.iter().filter(|&&v| v <= target).count() as u32
}

fn count_complications(rolls: &[u32]) -> u32 {
    rolls.iter().filter(|&&v| v == DUNE_DIE).count() as u32
}

/// Positions of the two lowest values, ascending by value. The sort is
/// stable, so equal values keep draw order. Needs at least two rolls.
fn lowest_pair(rolls: &[u32]) -> [usize; 2] {
    let mut order: Vec<usize> = (0..rolls.len()).collect();
    order.sort_by_key(|&i| rolls[i]);
    [order[0], order[1]]
}

/// A full Dune skill test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DuneTest {
    /// Attribute plus skill: roll at or under this to succeed.
    pub target: u32,
    /// Successes needed to pass (0-5).
    pub difficulty: u32,
    /// Extra d20s from momentum, assets, determination or assistance.
    pub bonus_dice: u32,
    /// Dice at or above this face are complications.
    pub complication_range: u32,
    /// Dice at or under this face score a critical hit (two successes).
    pub critical_threshold: u32,
}

impl Default for DuneTest {
    fn default() -> Self {
        Self {
            target: 10,
            difficulty: 1,
            bonus_dice: 0,
            complication_range: DUNE_DIE,
            critical_threshold: 1,
        }
    }
}

/// Whether a test passed, and by how much.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TestOutcome {
    /// Enough successes; `margin` is the surplus.
    Success {
        /// Successes beyond the difficulty.
        margin: u32,
    },
    /// Too few successes; `shortfall` is how many were missing.
    Failure {
        /// Successes still needed.
        shortfall: u32,
    },
}

impl std::fmt::Display for TestOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success { margin } => write!(f, "Success (margin {margin})"),
            Self::Failure { shortfall } => write!(f, "Failure (short by {shortfall})"),
        }
    }
}

/// The result of a [`DuneTest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuneTestResult {
    /// Die values in draw order.
    pub rolls: Vec<u32>,
    /// Successes, critical hits counted twice.
    pub successes: u32,
    /// Dice that landed at or under the critical threshold.
    pub critical_hits: u32,
    /// Dice that landed in the complication range.
    pub complications: u32,
    /// Pass or fail against the difficulty.
    pub outcome: TestOutcome,
    /// Surplus successes generated for the momentum pool.
    pub momentum: u32,
    /// Threat generated for the gamemaster's pool.
    pub threat: u32,
}

impl DuneTestResult {
    /// Returns true if the test passed.
    pub fn passed(&self) -> bool {
        matches!(self.outcome, TestOutcome::Success { .. })
    }
}

impl DuneTest {
    /// A test against `target` with default difficulty and no bonus dice.
    pub fn new(target: u32) -> Self {
        Self {
            target,
            ..Self::default()
        }
    }

    /// Set the difficulty.
    pub fn with_difficulty(mut self, difficulty: u32) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Set the number of bonus dice.
    pub fn with_bonus_dice(mut self, bonus_dice: u32) -> Self {
        self.bonus_dice = bonus_dice;
        self
    }

    /// Set the lowest face that counts as a complication.
    pub fn with_complication_range(mut self, range: u32) -> Self {
        self.complication_range = range;
        self
    }

    /// Check every parameter against its allowed range.
    pub fn validate(&self, limits: &DiceLimits) -> Result<(), ValidationError> {
        if !(1..=MAX_DUNE_TARGET).contains(&self.target) {
            return Err(ValidationError::TargetOutOfRange {
                target: self.target,
                min: 1,
                max: MAX_DUNE_TARGET,
            });
        }
        if self.difficulty > MAX_DUNE_DIFFICULTY {
            return Err(ValidationError::TestDifficultyOutOfRange {
                difficulty: self.difficulty,
                max: MAX_DUNE_DIFFICULTY,
            });
        }
        if !(1..=DUNE_DIE).contains(&self.complication_range) {
            return Err(ValidationError::ComplicationRangeOutOfRange {
                range: self.complication_range,
                min: 1,
                max: DUNE_DIE,
            });
        }
        limits.validate_bonus(self.bonus_dice)
    }

    /// Roll the test. Parameters are assumed valid; see [`DuneTest::validate`].
    pub fn roll<R: DieSource + ?Sized>(&self, rng: &mut R) -> DuneTestResult {
        let rolls = rng.roll_dice(pool_size(self.bonus_dice), DUNE_DIE);

        let mut successes = 0;
        let mut critical_hits = 0;
        let mut complications = 0;
        for &value in &rolls {
            if value <= self.target {
                successes += 1;
                if value <= self.critical_threshold {
                    critical_hits += 1;
                    successes += 1;
                }
            }
            if value >= self.complication_range {
                complications += 1;
            }
        }

        let (outcome, momentum) = if successes >= self.difficulty {
            let margin = successes - self.difficulty;
            (TestOutcome::Success { margin }, margin)
        } else {
            let shortfall = self.difficulty - successes;
            (TestOutcome::Failure { shortfall }, 0)
        };
        debug!(
            target_number = self.target,
            difficulty = self.difficulty,
            successes,
            critical_hits,
            complications,
            %outcome,
            "dune test"
        );

        DuneTestResult {
            rolls,
            successes,
            critical_hits,
            complications,
            outcome,
            momentum,
            threat: complications,
        }
    }
}
