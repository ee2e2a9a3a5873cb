//! The common result shape shared by every resolution system.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which resolution algorithm produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SystemKind {
    /// Flat sum plus modifier.
    Standard,
    /// Maximum faces re-roll and add.
    Exploding,
    /// d10 success counting against a difficulty, with botches.
    WorldOfDarkness,
    /// Two d20s against a target number, with complications.
    #[serde(rename = "dune-2d20")]
    Dune2d20,
}

impl SystemKind {
    /// All systems, in display order.
    pub const ALL: [Self; 4] = [
        Self::Standard,
        Self::Exploding,
        Self::WorldOfDarkness,
        Self::Dune2d20,
    ];
}

impl std::fmt::Display for SystemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::Exploding => write!(f, "exploding"),
            Self::WorldOfDarkness => write!(f, "world-of-darkness"),
            Self::Dune2d20 => write!(f, "dune-2d20"),
        }
    }
}

impl FromStr for SystemKind {
    type Err = String;

    /// Accepts the canonical names plus the short `wod` and `dune` aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "exploding" => Ok(Self::Exploding),
            "world-of-darkness" | "wod" => Ok(Self::WorldOfDarkness),
            "dune-2d20" | "dune" | "2d20" => Ok(Self::Dune2d20),
            other => Err(format!("unknown dice system: {other}")),
        }
    }
}

/// The two dice that decide a Dune roll made with bonus dice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainDice {
    /// The two lowest values, ascending.
    pub rolls: [u32; 2],
    /// Positions of those dice in [`RollResult::rolls`].
    pub indices: [usize; 2],
    /// Successes counted over every die, bonus dice included.
    pub all_successes: u32,
    /// Complications counted over every die, bonus dice included.
    pub all_complications: u32,
}

/// System-specific numbers that accompany a roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RollDetails {
    /// Standard roll.
    Standard {
        /// Modifier added to the total.
        modifier: i32,
    },
    /// Exploding roll.
    Exploding {
        /// Modifier added to the total.
        modifier: i32,
        /// Number of draws that triggered a re-roll.
        exploded_count: u32,
        /// Dice whose chain was cut short by the configured cap.
        capped_chains: u32,
    },
    /// World of Darkness roll.
    WorldOfDarkness {
        /// Lowest face that counts as a success.
        difficulty: u32,
        /// Ones that were not successes.
        ones: u32,
        /// Successes before ones are subtracted.
        raw_successes: u32,
        /// Whether tens counted double.
        specialty: bool,
    },
    /// Dune 2d20 roll.
    Dune {
        /// Highest face that counts as a success.
        target: u32,
        /// Extra dice beyond the base two.
        bonus_dice: u32,
        /// The selected pair, present when bonus dice were rolled.
        main: Option<MainDice>,
    },
}

/// The outcome of one resolution call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResult {
    /// Die values in the order they were generated.
    pub rolls: Vec<u32>,
    /// Sum of `rolls`, plus the modifier where the system has one.
    pub total: i64,
    /// Net successes (World of Darkness, Dune).
    pub successes: u32,
    /// Dice on the maximum face (Dune).
    pub complications: u32,
    /// Zero successes with at least one 1 (World of Darkness).
    pub botch: bool,
    /// Draws that triggered a re-roll (exploding).
    pub exploded_dice: Vec<u32>,
    /// The system that produced this result.
    pub system: SystemKind,
    /// System-specific numbers.
    pub details: RollDetails,
}

impl RollResult {
    /// Sum of the die values alone, without any modifier.
    pub fn dice_sum(&self) -> i64 {
        self.rolls.iter().map(|&v| i64::from(v)).sum()
    }

    /// The modifier applied to the total, or 0 for systems without one.
    pub fn modifier(&self) -> i32 {
        match self.details {
            RollDetails::Standard { modifier } | RollDetails::Exploding { modifier, .. } => {
                modifier
            }
            _ => 0,
        }
    }

    /// The dice that decide a Dune roll: the main pair when bonus dice were
    /// rolled, otherwise every die.
    pub fn deciding_rolls(&self) -> Vec<u32> {
        match &self.details {
            RollDetails::Dune {
                main: Some(main), ..
            } => main.rolls.to_vec(),
            _ => self.rolls.clone(),
        }
    }
}

impl std::fmt::Display for RollResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let values: Vec<String> = self.rolls.iter().map(u32::to_string).collect();
        write!(f, "[{}]", values.join(", "))?;
        match self.system {
            SystemKind::Standard | SystemKind::Exploding => {
                match self.modifier() {
                    0 => {}
                    m if m > 0 => write!(f, " + {m}")?,
                    m => write!(f, " - {}", m.unsigned_abs())?,
                }
                write!(f, " = {}", self.total)
            }
            SystemKind::WorldOfDarkness => {
                write!(f, " {} successes", self.successes)?;
                if self.botch {
                    write!(f, " (botch)")?;
                }
                Ok(())
            }
            SystemKind::Dune2d20 => write!(
                f,
                " {} successes, {} complications",
                self.successes, self.complications
            ),
        }
    }
}
