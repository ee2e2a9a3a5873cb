//! Resolution engine: one algorithm per dice system.
//!
//! - **Standard**: sum the dice and add a modifier
//! - **Exploding**: maximum faces roll again and add
//! - **World of Darkness**: count d10s at or above a difficulty, with botches
//! - **Dune 2d20**: count d20s at or under a target, with complications
//!
//! [`combat`] adds the Dune conflict helpers (assistance, initiative, range
//! and cover, damage).
//!
//! The free functions roll whatever they are given. [`DiceEngine`] checks a
//! [`RollSpec`] against the configured bounds first and then dispatches.

pub mod combat;
pub mod dune;
pub mod exploding;
pub mod extended;
pub mod standard;
pub mod world_of_darkness;

pub use combat::{
    Cover, DamageRoll, InitiativeRoll, Range, RangeModifiers, WeaponQuality, assistance_dice,
    range_modifiers, roll_damage, roll_initiative,
};
pub use dune::{DuneTest, DuneTestResult, TestOutcome, dune_2d20_roll};
pub use exploding::{exploding_roll, exploding_roll_capped};
pub use extended::{ExtendedProgress, ExtendedTest};
pub use standard::standard_roll;
pub use world_of_darkness::world_of_darkness_roll;

use serde::{Deserialize, Serialize};

use crate::config::{DiceConfig, MAX_DUNE_TARGET, MAX_WOD_DIFFICULTY};
use crate::error::{DiceError, DiceResult, ValidationError};
use crate::notation::{self, RollRequest};
use crate::result::{RollResult, SystemKind};
use crate::rng::DieSource;

/// A fully specified roll for one of the supported systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "system", rename_all = "kebab-case")]
pub enum RollSpec {
    /// Sum `count` dice of `sides` faces plus `modifier`.
    Standard {
        /// Number of dice.
        count: u32,
        /// Faces per die.
        sides: u32,
        /// Flat amount added to the total.
        modifier: i32,
    },
    /// Like `Standard`, but maximum faces explode.
    Exploding {
        /// Number of dice.
        count: u32,
        /// Faces per die.
        sides: u32,
        /// Flat amount added to the total.
        modifier: i32,
    },
    /// A pool of d10s against a difficulty.
    WorldOfDarkness {
        /// Number of d10s.
        count: u32,
        /// Lowest face that counts as a success (1-10).
        difficulty: u32,
        /// Tens count double and ones cancel nothing.
        specialty: bool,
    },
    /// Two d20s plus bonus dice against a target number.
    #[serde(rename = "dune-2d20")]
    Dune2d20 {
        /// Highest face that counts as a success (1-20).
        target: u32,
        /// Extra dice; only the lowest two count.
        bonus_dice: u32,
    },
}

impl RollSpec {
    /// The system this spec resolves with.
    pub fn system(&self) -> SystemKind {
        match self {
            Self::Standard { .. } => SystemKind::Standard,
            Self::Exploding { .. } => SystemKind::Exploding,
            Self::WorldOfDarkness { .. } => SystemKind::WorldOfDarkness,
            Self::Dune2d20 { .. } => SystemKind::Dune2d20,
        }
    }
}

/// Validates and resolves rolls under a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct DiceEngine {
    config: DiceConfig,
}

impl DiceEngine {
    /// Create an engine from a configuration.
    pub fn new(config: DiceConfig) -> DiceResult<Self> {
        config.check()?;
        Ok(Self { config })
    }

    /// The configuration this engine enforces.
    pub fn config(&self) -> &DiceConfig {
        &self.config
    }

    /// Check a spec against the configured bounds.
    pub fn validate(&self, spec: &RollSpec) -> Result<(), ValidationError> {
        let limits = &self.config.limits;
        match *spec {
            RollSpec::Standard { count, sides, .. } | RollSpec::Exploding { count, sides, .. } => {
                limits.validate(count, sides)
            }
            RollSpec::WorldOfDarkness {
                count, difficulty, ..
            } => {
                // The d10 is fixed; sides bounds only police notation input.
                limits.validate_count(count)?;
                if !(1..=MAX_WOD_DIFFICULTY).contains(&difficulty) {
                    return Err(ValidationError::DifficultyOutOfRange {
                        difficulty,
                        min: 1,
                        max: MAX_WOD_DIFFICULTY,
                    });
                }
                Ok(())
            }
            RollSpec::Dune2d20 { target, bonus_dice } => {
                if !(1..=MAX_DUNE_TARGET).contains(&target) {
                    return Err(ValidationError::TargetOutOfRange {
                        target,
                        min: 1,
                        max: MAX_DUNE_TARGET,
                    });
                }
                limits.validate_bonus(bonus_dice)
            }
        }
    }

    /// Validate a spec and roll it.
    pub fn roll<R: DieSource + ?Sized>(
        &self,
        spec: &RollSpec,
        rng: &mut R,
    ) -> Result<RollResult, ValidationError> {
        self.validate(spec)?;
        Ok(self.resolve(spec, rng))
    }

    /// Parse `notation`, validate it, and roll it under `system`.
    ///
    /// World of Darkness takes its pool size from the notation and uses the
    /// configured default difficulty; the sides and modifier are ignored and
    /// only the count is checked against the limits.
    /// Dune rolls have no notation form and are built as a [`RollSpec`].
    pub fn roll_notation<R: DieSource + ?Sized>(
        &self,
        notation: &str,
        system: SystemKind,
        rng: &mut R,
    ) -> DiceResult<RollResult> {
        let request = notation::parse(notation)?;
        let spec = self.spec_for(request, system)?;
        Ok(self.roll(&spec, rng)?)
    }

    /// Map a parsed request to the [`RollSpec`] it means under `system`.
    pub fn spec_for(&self, request: RollRequest, system: SystemKind) -> DiceResult<RollSpec> {
        let RollRequest {
            count,
            sides,
            modifier,
        } = request;
        match system {
            SystemKind::Standard => Ok(RollSpec::Standard {
                count,
                sides,
                modifier,
            }),
            SystemKind::Exploding => Ok(RollSpec::Exploding {
                count,
                sides,
                modifier,
            }),
            SystemKind::WorldOfDarkness => Ok(RollSpec::WorldOfDarkness {
                count,
                difficulty: self.config.default_difficulty,
                specialty: false,
            }),
            SystemKind::Dune2d20 => Err(DiceError::NotationUnsupported(system)),
        }
    }

    /// Validate and run a full Dune skill test.
    pub fn dune_test<R: DieSource + ?Sized>(
        &self,
        test: &DuneTest,
        rng: &mut R,
    ) -> Result<DuneTestResult, ValidationError> {
        test.validate(&self.config.limits)?;
        Ok(test.roll(rng))
    }

    fn resolve<R: DieSource + ?Sized>(&self, spec: &RollSpec, rng: &mut R) -> RollResult {
        match *spec {
            RollSpec::Standard {
                count,
                sides,
                modifier,
            } => standard_roll(count, sides, modifier, rng),
            RollSpec::Exploding {
                count,
                sides,
                modifier,
            } => exploding_roll_capped(
                count,
                sides,
                modifier,
                self.config.max_explosion_chain,
                rng,
            ),
            RollSpec::WorldOfDarkness {
                count,
                difficulty,
                specialty,
            } => world_of_darkness_roll(count, difficulty, specialty, rng),
            RollSpec::Dune2d20 { target, bonus_dice } => dune_2d20_roll(target, bonus_dice, rng),
        }
    }
}
