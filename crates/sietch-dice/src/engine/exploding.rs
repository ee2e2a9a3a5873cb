//! Exploding dice: a die showing its maximum face is rolled again and the
//! new value added to the same die, for as long as the maximum recurs.
//!
//! Chains are unbounded unless a cap is given. Each extra draw is only
//! `1/sides` likely, so uncapped chains terminate with probability one.

use tracing::{debug, trace, warn};

use crate::result::{RollDetails, RollResult, SystemKind};
use crate::rng::DieSource;

/// Roll `count` exploding dice and add `modifier` to the sum of their totals.
///
/// `rolls` holds one collapsed total per die; `exploded_dice` holds every
/// draw that triggered a re-roll. `sides` must be at least 2.
pub fn exploding_roll<R: DieSource + ?Sized>(
    count: u32,
    sides: u32,
    modifier: i32,
    rng: &mut R,
) -> RollResult {
    exploding_roll_capped(count, sides, modifier, None, rng)
}

/// Like [`exploding_roll`], but a die stops exploding after `max_chain`
/// re-rolls. The number of dice cut short is reported as `capped_chains`.
pub fn exploding_roll_capped<R: DieSource + ?Sized>(
    count: u32,
    sides: u32,
    modifier: i32,
    max_chain: Option<u32>,
    rng: &mut R,
) -> RollResult {
    let mut rolls = Vec::with_capacity(count as usize);
    let mut exploded = Vec::new();
    let mut capped_chains = 0;

    for _ in 0..count {
        let mut die_total: u64 = 0;
        let mut rerolls: u32 = 0;
        loop {
            let value = rng.roll_die(sides);
            die_total += u64::from(value);
            if value != sides {
                break;
            }
            if max_chain.is_some_and(|max| rerolls >= max) {
                warn!(sides, rerolls, "explosion chain hit the configured cap");
                capped_chains += 1;
                break;
            }
            exploded.push(value);
            rerolls += 1;
            trace!(sides, rerolls, die_total, "die exploded");
        }
        rolls.push(u32::try_from(die_total).unwrap_or(u32::MAX));
    }

    let total = rolls.iter().map(|&v| i64::from(v)).sum::<i64>() + i64::from(modifier);
    let exploded_count = exploded.len() as u32;
    debug!(count, sides, modifier, total, exploded_count, "exploding roll");

    RollResult {
        rolls,
        total,
        successes: 0,
        complications: 0,
        botch: false,
        exploded_dice: exploded,
        system: SystemKind::Exploding,
        details: RollDetails::Exploding {
            modifier,
            exploded_count,
            capped_chains,
        },
    }
}
