//! World of Darkness success counting.
//!
//! Roll a pool of d10s. Each die at or above the difficulty is a success;
//! ones cancel successes. A pool with no successes and at least one 1 is a
//! botch. With a specialty, tens count twice and ones cancel nothing.

use tracing::debug;

use crate::result::{RollDetails, RollResult, SystemKind};
use crate::rng::DieSource;

/// Faces on a World of Darkness die.
pub const WOD_DIE: u32 = 10;

/// Difficulty used when none is given.
pub const DEFAULT_DIFFICULTY: u32 = 6;

/// Roll `count` d10s against `difficulty` (1-10).
pub fn world_of_darkness_roll<R: DieSource + ?Sized>(
    count: u32,
    difficulty: u32,
    specialty: bool,
    rng: &mut R,
) -> RollResult {
    let rolls = rng.roll_dice(count, WOD_DIE);

    let mut raw_successes: u32 = 0;
    let mut ones: u32 = 0;
    for &value in &rolls {
        if value >= difficulty {
            raw_successes += 1;
            if specialty && value == WOD_DIE {
                raw_successes += 1;
            }
        } else if value == 1 {
            ones += 1;
        }
    }

    let successes = if specialty {
        raw_successes
    } else {
        raw_successes.saturating_sub(ones)
    };
    let botch = raw_successes == 0 && ones > 0;
    let total = rolls.iter().map(|&v| i64::from(v)).sum();
    debug!(
        count,
        difficulty,
        specialty,
        raw_successes,
        ones,
        successes,
        botch,
        "world of darkness roll"
    );

    RollResult {
        rolls,
        total,
        successes,
        complications: 0,
        botch,
        exploded_dice: Vec::new(),
        system: SystemKind::WorldOfDarkness,
        details: RollDetails::WorldOfDarkness {
            difficulty,
            ones,
            raw_successes,
            specialty,
        },
    }
}
