//! Flat-sum resolution: roll, add, apply the modifier.

use tracing::debug;

use crate::result::{RollDetails, RollResult, SystemKind};
use crate::rng::DieSource;

/// Roll `count` dice of `sides` faces and add `modifier` to their sum.
pub fn standard_roll<R: DieSource + ?Sized>(
    count: u32,
    sides: u32,
    modifier: i32,
    rng: &mut R,
) -> RollResult {
    let rolls = rng.roll_dice(count, sides);
    let total = rolls.iter().map(|&v| i64::from(v)).sum::<i64>() + i64::from(modifier);
    debug!(count, sides, modifier, total, "standard roll");

    RollResult {
        rolls,
        total,
        successes: 0,
        complications: 0,
        botch: false,
        exploded_dice: Vec::new(),
        system: SystemKind::Standard,
        details: RollDetails::Standard { modifier },
    }
}
