//! Policy bounds and engine settings.
//!
//! The defaults reproduce the limits the command layer has always enforced
//! (1-100 dice, 2-1000 sides, up to 5 Dune bonus dice). Callers may load a
//! different [`DiceConfig`] from any serde format.

use serde::{Deserialize, Serialize};

use crate::engine::world_of_darkness::DEFAULT_DIFFICULTY;
use crate::error::{DiceError, DiceResult, ValidationError};

/// Highest World of Darkness difficulty (the face count of a d10).
pub const MAX_WOD_DIFFICULTY: u32 = 10;
/// Highest Dune target number (the face count of a d20).
pub const MAX_DUNE_TARGET: u32 = 20;
/// Highest Dune test difficulty.
pub const MAX_DUNE_DIFFICULTY: u32 = 5;

/// Inclusive bounds applied to parsed roll requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiceLimits {
    /// Fewest dice allowed in one roll.
    pub min_count: u32,
    /// Most dice allowed in one roll.
    pub max_count: u32,
    /// Fewest faces allowed on a die.
    pub min_sides: u32,
    /// Most faces allowed on a die.
    pub max_sides: u32,
    /// Most bonus dice allowed on a Dune roll.
    pub max_bonus_dice: u32,
}

impl Default for DiceLimits {
    fn default() -> Self {
        Self {
            min_count: 1,
            max_count: 100,
            min_sides: 2,
            max_sides: 1000,
            max_bonus_dice: 5,
        }
    }
}

impl DiceLimits {
    /// Check a dice count and face count against these bounds.
    pub fn validate(&self, count: u32, sides: u32) -> Result<(), ValidationError> {
        self.validate_count(count)?;
        if !(self.min_sides..=self.max_sides).contains(&sides) {
            return Err(ValidationError::SidesOutOfRange {
                sides,
                min: self.min_sides,
                max: self.max_sides,
            });
        }
        Ok(())
    }

    /// Check a dice count alone, for pools whose die size is fixed.
    pub fn validate_count(&self, count: u32) -> Result<(), ValidationError> {
        if !(self.min_count..=self.max_count).contains(&count) {
            return Err(ValidationError::CountOutOfRange {
                count,
                min: self.min_count,
                max: self.max_count,
            });
        }
        Ok(())
    }

    /// Check a number of Dune bonus dice.
    pub fn validate_bonus(&self, bonus_dice: u32) -> Result<(), ValidationError> {
        if bonus_dice > self.max_bonus_dice {
            return Err(ValidationError::BonusDiceOutOfRange {
                bonus_dice,
                max: self.max_bonus_dice,
            });
        }
        Ok(())
    }
}

/// Engine-wide configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiceConfig {
    /// Bounds for count, sides and bonus dice.
    pub limits: DiceLimits,
    /// Difficulty used for World of Darkness rolls when none is given.
    pub default_difficulty: u32,
    /// Longest explosion chain a single die may produce. `None` is unbounded.
    pub max_explosion_chain: Option<u32>,
}

impl Default for DiceConfig {
    fn default() -> Self {
        Self {
            limits: DiceLimits::default(),
            default_difficulty: DEFAULT_DIFFICULTY,
            max_explosion_chain: None,
        }
    }
}

impl DiceConfig {
    /// Replace the dice bounds.
    pub fn with_limits(mut self, limits: DiceLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Set the default World of Darkness difficulty (clamped to 1-10).
    pub fn with_default_difficulty(mut self, difficulty: u32) -> Self {
        self.default_difficulty = difficulty.clamp(1, MAX_WOD_DIFFICULTY);
        self
    }

    /// Cap every explosion chain at `max` re-rolls.
    pub fn with_max_explosion_chain(mut self, max: u32) -> Self {
        self.max_explosion_chain = Some(max);
        self
    }

    /// Reject configurations the engine cannot honour.
    ///
    /// Deserialized configs skip the builder clamps, so callers loading one
    /// from a file should check it before building an engine.
    pub fn check(&self) -> DiceResult<()> {
        let l = &self.limits;
        if l.min_count == 0 || l.min_count > l.max_count {
            return Err(DiceError::InvalidConfig(format!(
                "count bounds {}..={} are empty or start at zero",
                l.min_count, l.max_count
            )));
        }
        // A one-sided die would explode forever.
        if l.min_sides < 2 || l.min_sides > l.max_sides {
            return Err(DiceError::InvalidConfig(format!(
                "sides bounds {}..={} must start at 2 or more",
                l.min_sides, l.max_sides
            )));
        }
        if !(1..=MAX_WOD_DIFFICULTY).contains(&self.default_difficulty) {
            return Err(DiceError::InvalidConfig(format!(
                "default difficulty {} is outside 1..={MAX_WOD_DIFFICULTY}",
                self.default_difficulty
            )));
        }
        Ok(())
    }
}
