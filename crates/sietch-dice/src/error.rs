//! Error types for notation parsing and roll validation.

use thiserror::Error;

use crate::result::SystemKind;

/// Convenience result type for dice operations.
pub type DiceResult<T> = Result<T, DiceError>;

/// Errors raised while parsing dice notation such as `3d6+2`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The notation was empty after stripping whitespace.
    #[error("empty dice notation")]
    Empty,

    /// The notation has no `d` between count and sides.
    #[error("missing die separator")]
    MissingSeparator,

    /// A count, sides or modifier fragment is not a valid integer.
    #[error("invalid {field}: '{value}'")]
    InvalidNumber {
        /// Which part of the notation failed to parse.
        field: NotationField,
        /// The offending text.
        value: String,
    },

    /// The notation contains both `+` and `-`.
    #[error("notation may contain either '+' or '-', not both")]
    AmbiguousModifier,
}

/// The part of a dice notation an [`ParseError::InvalidNumber`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotationField {
    /// The number of dice (left of `d`).
    Count,
    /// The number of faces (right of `d`).
    Sides,
    /// The trailing `+N` / `-N` modifier.
    Modifier,
}

impl std::fmt::Display for NotationField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Count => write!(f, "dice count"),
            Self::Sides => write!(f, "dice sides"),
            Self::Modifier => write!(f, "modifier"),
        }
    }
}

/// Errors raised when roll parameters fall outside their allowed bounds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Too few or too many dice.
    #[error("dice count must be between {min} and {max}")]
    CountOutOfRange {
        /// The rejected count.
        count: u32,
        /// Smallest allowed count.
        min: u32,
        /// Largest allowed count.
        max: u32,
    },

    /// A die with too few or too many faces.
    #[error("dice sides must be between {min} and {max}")]
    SidesOutOfRange {
        /// The rejected number of sides.
        sides: u32,
        /// Smallest allowed number of sides.
        min: u32,
        /// Largest allowed number of sides.
        max: u32,
    },

    /// World of Darkness difficulty outside 1-10.
    #[error("difficulty must be between {min} and {max}")]
    DifficultyOutOfRange {
        /// The rejected difficulty.
        difficulty: u32,
        /// Smallest allowed difficulty.
        min: u32,
        /// Largest allowed difficulty.
        max: u32,
    },

    /// Dune target number outside 1-20.
    #[error("target must be between {min} and {max}")]
    TargetOutOfRange {
        /// The rejected target number.
        target: u32,
        /// Smallest allowed target.
        min: u32,
        /// Largest allowed target.
        max: u32,
    },

    /// More bonus dice than the configured maximum.
    #[error("bonus dice must be between 0 and {max}")]
    BonusDiceOutOfRange {
        /// The rejected number of bonus dice.
        bonus_dice: u32,
        /// Largest allowed number of bonus dice.
        max: u32,
    },

    /// Dune test difficulty outside 0-5.
    #[error("test difficulty must be between 0 and {max}")]
    TestDifficultyOutOfRange {
        /// The rejected difficulty.
        difficulty: u32,
        /// Largest allowed difficulty.
        max: u32,
    },

    /// Dune complication range outside 1-20.
    #[error("complication range must be between {min} and {max}")]
    ComplicationRangeOutOfRange {
        /// The rejected complication range.
        range: u32,
        /// Smallest allowed range.
        min: u32,
        /// Largest allowed range.
        max: u32,
    },
}

/// Any error produced by this crate.
#[derive(Debug, Error)]
pub enum DiceError {
    /// Malformed dice notation.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Roll parameters outside the configured bounds.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The system has no dice-notation form.
    #[error("{0} rolls cannot be written in dice notation")]
    NotationUnsupported(SystemKind),

    /// A configuration value is unusable.
    #[error("invalid dice config: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_messages() {
        assert_eq!(
            ParseError::MissingSeparator.to_string(),
            "missing die separator"
        );
        let err = ParseError::InvalidNumber {
            field: NotationField::Sides,
            value: "x".to_string(),
        };
        assert_eq!(err.to_string(), "invalid dice sides: 'x'");
    }

    #[test]
    fn validation_messages_match_default_bounds() {
        let err = ValidationError::CountOutOfRange {
            count: 0,
            min: 1,
            max: 100,
        };
        assert_eq!(err.to_string(), "dice count must be between 1 and 100");
        let err = ValidationError::SidesOutOfRange {
            sides: 1,
            min: 2,
            max: 1000,
        };
        assert_eq!(err.to_string(), "dice sides must be between 2 and 1000");
    }

    #[test]
    fn umbrella_is_transparent() {
        let err: DiceError = ParseError::AmbiguousModifier.into();
        assert_eq!(
            err.to_string(),
            "notation may contain either '+' or '-', not both"
        );
        assert!(matches!(err, DiceError::Parse(_)));
    }
}
