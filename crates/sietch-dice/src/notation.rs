//! Dice notation parsing (`3d6+2`, `d20`, `2d10-1`).

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::DiceLimits;
use crate::error::{NotationField, ParseError, ValidationError};

/// A parsed `NdS±M` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RollRequest {
    /// Number of dice to roll.
    pub count: u32,
    /// Faces per die.
    pub sides: u32,
    /// Flat amount added to the total.
    pub modifier: i32,
}

impl RollRequest {
    /// Create a request.
    pub fn new(count: u32, sides: u32, modifier: i32) -> Self {
        Self {
            count,
            sides,
            modifier,
        }
    }

    /// Check this request against `limits`.
    pub fn validate(&self, limits: &DiceLimits) -> Result<(), ValidationError> {
        limits.validate(self.count, self.sides)
    }
}

impl FromStr for RollRequest {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

impl std::fmt::Display for RollRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)?;
        match self.modifier {
            0 => Ok(()),
            m if m > 0 => write!(f, "+{m}"),
            m => write!(f, "{m}"),
        }
    }
}

/// Parse dice notation into a [`RollRequest`].
///
/// Whitespace is ignored and the separator is case-insensitive. An omitted
/// count means one die. Only a single trailing modifier is supported; a
/// notation mixing `+` and `-` is rejected.
pub fn parse(notation: &str) -> Result<RollRequest, ParseError> {
    let folded: String = notation
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();
    if folded.is_empty() {
        return Err(ParseError::Empty);
    }

    let (dice, modifier) = split_modifier(&folded)?;

    let (count_str, sides_str) = dice.split_once('d').ok_or(ParseError::MissingSeparator)?;
    let count = if count_str.is_empty() {
        1
    } else {
        parse_number(count_str, NotationField::Count)?
    };
    let sides = parse_number(sides_str, NotationField::Sides)?;

    Ok(RollRequest {
        count,
        sides,
        modifier,
    })
}

/// Check a count and face count against the default bounds.
pub fn validate(count: u32, sides: u32) -> Result<(), ValidationError> {
    DiceLimits::default().validate(count, sides)
}

fn split_modifier(notation: &str) -> Result<(&str, i32), ParseError> {
    match (notation.split_once('+'), notation.split_once('-')) {
        (Some(_), Some(_)) => Err(ParseError::AmbiguousModifier),
        (Some((dice, m)), None) => Ok((dice, parse_modifier(m)?)),
        (None, Some((dice, m))) => Ok((dice, -parse_modifier(m)?)),
        (None, None) => Ok((notation, 0)),
    }
}

fn parse_modifier(s: &str) -> Result<i32, ParseError> {
    let magnitude = parse_number(s, NotationField::Modifier)?;
    i32::try_from(magnitude).map_err(|_| invalid(s, NotationField::Modifier))
}

// `u32::from_str` accepts a leading '+', which is never part of a fragment
// here, so digits-only is checked explicitly.
fn parse_number(s: &str, field: NotationField) -> Result<u32, ParseError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(s, field));
    }
    s.parse().map_err(|_| invalid(s, field))
}

fn invalid(s: &str, field: NotationField) -> ParseError {
    ParseError::InvalidNumber {
        field,
        value: s.to_string(),
    }
}
