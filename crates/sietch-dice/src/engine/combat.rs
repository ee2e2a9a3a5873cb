//! Dune conflict helpers: assistance, initiative, range and cover, damage.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::rng::DieSource;

use super::dune::DUNE_DIE;

/// Most bonus dice a test can gain from assisting characters.
pub const MAX_ASSISTANCE_DICE: u32 = 3;

/// Faces on a damage or effects die.
pub const DAMAGE_DIE: u32 = 6;

/// Base difficulty of a ranged attack before range and cover.
pub const BASE_RANGED_DIFFICULTY: u32 = 1;

/// Bonus dice granted by assisting characters.
///
/// `assistant_skills` holds each helper's rating in the assisted skill (0 if
/// they lack it). Every helper with a positive rating adds one die, up to
/// [`MAX_ASSISTANCE_DICE`].
pub fn assistance_dice(assistant_skills: impl IntoIterator<Item = u32>) -> u32 {
    let helpers = assistant_skills.into_iter().filter(|&skill| skill > 0).count();
    u32::try_from(helpers)
        .unwrap_or(u32::MAX)
        .min(MAX_ASSISTANCE_DICE)
}

/// An initiative roll: one d20 plus a skill rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitiativeRoll {
    /// The d20 face.
    pub roll: u32,
    /// The skill rating added to it.
    pub skill: u32,
    /// `roll + skill`; higher acts first.
    pub total: u32,
}

/// Roll initiative for a character with `skill` in battle, discipline or move.
pub fn roll_initiative<R: DieSource + ?Sized>(skill: u32, rng: &mut R) -> InitiativeRoll {
    let roll = rng.roll_die(DUNE_DIE);
    InitiativeRoll {
        roll,
        skill,
        total: roll.saturating_add(skill),
    }
}

impl std::fmt::Display for InitiativeRoll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] + {} = {}", self.roll, self.skill, self.total)
    }
}

/// Distance band between attacker and target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Range {
    /// No extra difficulty.
    Close,
    /// +1 difficulty.
    Medium,
    /// +2 difficulty.
    Long,
    /// +3 difficulty.
    Extreme,
}

impl Range {
    fn penalty(self) -> u32 {
        match self {
            Self::Close => 0,
            Self::Medium => 1,
            Self::Long => 2,
            Self::Extreme => 3,
        }
    }
}

impl std::fmt::Display for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Close => write!(f, "Close range"),
            other => write!(f, "{other:?} range (+{} difficulty)", other.penalty()),
        }
    }
}

impl FromStr for Range {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "close" => Ok(Self::Close),
            "medium" => Ok(Self::Medium),
            "long" => Ok(Self::Long),
            "extreme" => Ok(Self::Extreme),
            other => Err(format!("unknown range: {other}")),
        }
    }
}

/// How much the target is hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cover {
    /// No extra difficulty.
    None,
    /// +1 difficulty.
    Light,
    /// +2 difficulty.
    Heavy,
    /// +3 difficulty.
    Total,
}

impl Cover {
    fn penalty(self) -> u32 {
        match self {
            Self::None => 0,
            Self::Light => 1,
            Self::Heavy => 2,
            Self::Total => 3,
        }
    }
}

impl FromStr for Cover {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "light" => Ok(Self::Light),
            "heavy" => Ok(Self::Heavy),
            "total" => Ok(Self::Total),
            other => Err(format!("unknown cover: {other}")),
        }
    }
}

/// Difficulty of an attack after range and cover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeModifiers {
    /// Base difficulty plus both penalties (1-7).
    pub difficulty: u32,
    /// Human-readable breakdown, e.g. `Long range (+2 difficulty), light cover (+1 difficulty)`.
    pub description: String,
}

/// Combine range and cover into an attack difficulty.
///
/// The result is not clamped: extreme range into total cover gives 7, above
/// what a [`DuneTest`](super::DuneTest) accepts, and callers decide how to
/// treat an impossible shot.
pub fn range_modifiers(range: Range, cover: Cover) -> RangeModifiers {
    let difficulty = BASE_RANGED_DIFFICULTY + range.penalty() + cover.penalty();
    let mut description = range.to_string();
    if cover != Cover::None {
        let name = format!("{cover:?}").to_lowercase();
        description.push_str(&format!(
            ", {name} cover (+{} difficulty)",
            cover.penalty()
        ));
    }
    RangeModifiers {
        difficulty,
        description,
    }
}

/// A weapon quality that changes a damage roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeaponQuality {
    /// +1 damage when the damage die shows 5 or 6.
    Vicious,
    /// +1 effect when the effects die shows 5 or 6.
    Intense,
    /// Ignores armour.
    Piercing,
}

impl WeaponQuality {
    /// What the quality did, for display.
    pub fn effect(self) -> &'static str {
        match self {
            Self::Vicious => "Vicious effect triggered",
            Self::Intense => "Intense effect triggered",
            Self::Piercing => "Piercing - ignores armor",
        }
    }
}

impl FromStr for WeaponQuality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "vicious" => Ok(Self::Vicious),
            "intense" => Ok(Self::Intense),
            "piercing" => Ok(Self::Piercing),
            other => Err(format!("unknown weapon quality: {other}")),
        }
    }
}

/// The outcome of a damage roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageRoll {
    /// The d6 added to damage.
    pub damage_die: u32,
    /// The d6 added to effects.
    pub effects_die: u32,
    /// Base damage plus the damage die and any quality bonus.
    pub damage: u32,
    /// Base effects plus the effects die and any quality bonus.
    pub effects: u32,
    /// Qualities that fired, in the order they were listed.
    pub triggered: Vec<WeaponQuality>,
}

/// Roll damage: one d6 for damage, then one d6 for effects.
///
/// Vicious adds 1 damage and Intense adds 1 effect when their die shows 5 or
/// more. Piercing always fires. A quality listed twice applies twice.
pub fn roll_damage<R: DieSource + ?Sized>(
    base_damage: u32,
    base_effects: u32,
    qualities: &[WeaponQuality],
    rng: &mut R,
) -> DamageRoll {
    let damage_die = rng.roll_die(DAMAGE_DIE);
    let effects_die = rng.roll_die(DAMAGE_DIE);
    let mut damage = base_damage.saturating_add(damage_die);
    let mut effects = base_effects.saturating_add(effects_die);
    let mut triggered = Vec::new();

    for &quality in qualities {
        let fired = match quality {
            WeaponQuality::Vicious => damage_die >= 5,
            WeaponQuality::Intense => effects_die >= 5,
            WeaponQuality::Piercing => true,
        };
        if !fired {
            continue;
        }
        match quality {
            WeaponQuality::Vicious => damage = damage.saturating_add(1),
            WeaponQuality::Intense => effects = effects.saturating_add(1),
            WeaponQuality::Piercing => {}
        }
        triggered.push(quality);
    }
    debug!(damage_die, effects_die, damage, effects, "damage roll");

    DamageRoll {
        damage_die,
        effects_die,
        damage,
        effects,
        triggered,
    }
}
