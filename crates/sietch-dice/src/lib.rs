//! Dice notation parsing and multi-system TTRPG roll resolution.
//!
//! Parses notation such as `3d6+2`, validates it against configurable
//! bounds, and resolves rolls under four systems: standard sums, exploding
//! dice, World of Darkness success pools and Dune 2d20. Also runs full
//! Dune skill tests, extended tests, conflict helpers (assistance,
//! initiative, range and cover, damage) and momentum/threat pools.
//!
//! Randomness is injected through [`DieSource`], so any `rand::Rng` works
//! and [`ScriptedDice`] replays fixed faces in tests.

pub mod config;
pub mod engine;
pub mod error;
pub mod momentum;
pub mod notation;
pub mod result;
pub mod rng;

pub use config::{DiceConfig, DiceLimits};
pub use engine::{
    Cover, DamageRoll, DiceEngine, DuneTest, DuneTestResult, ExtendedProgress, ExtendedTest,
    InitiativeRoll, Range, RangeModifiers, RollSpec, TestOutcome, WeaponQuality, assistance_dice,
    dune_2d20_roll, exploding_roll, exploding_roll_capped, range_modifiers, roll_damage,
    roll_initiative, standard_roll, world_of_darkness_roll,
};
pub use error::{DiceError, DiceResult, NotationField, ParseError, ValidationError};
pub use momentum::{MomentumPool, MomentumStore};
pub use notation::{RollRequest, parse, validate};
pub use result::{MainDice, RollDetails, RollResult, SystemKind};
pub use rng::{DieSource, ScriptedDice};
