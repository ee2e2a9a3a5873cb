use colored::Colorize;
use serde::Serialize;
use sietch_dice::{
    DuneTest, DuneTestResult, ExtendedProgress, ExtendedTest, MomentumPool, MomentumStore,
};

use super::{Session, format_rolls};

const SCOPE: &str = "extended";

#[derive(Serialize)]
struct Report<'a> {
    tests: &'a [DuneTestResult],
    progress: ExtendedProgress,
    pool: MomentumPool,
}

pub fn run(
    session: &mut Session,
    target: u32,
    successes: u32,
    difficulty: u32,
    bonus: u32,
    time_limit: u32,
) -> Result<(), String> {
    if successes == 0 {
        return Err("--successes must be at least 1".into());
    }
    let test = DuneTest::new(target)
        .with_difficulty(difficulty)
        .with_bonus_dice(bonus);
    test.validate(&session.engine.config().limits)
        .map_err(|e| e.to_string())?;
    let mut extended = ExtendedTest::new(successes).with_time_limit(time_limit);
    let mut pools = MomentumStore::new();

    while !extended.progress().complete && !extended.is_out_of_time() {
        let result = session
            .engine
            .dune_test(&test, &mut session.rng)
            .map_err(|e| e.to_string())?;
        pools.apply_test(SCOPE, &result);
        extended.record(result);
    }

    let progress = extended.progress();
    let pool = pools.get(&SCOPE);

    if session.json {
        return super::print_json(&Report {
            tests: extended.results(),
            progress,
            pool,
        });
    }

    println!(
        "  {} {successes} successes at target {target} {}",
        "Extended test:".bold(),
        format!("(limit {time_limit} tests)").dimmed()
    );
    for (i, result) in extended.results().iter().enumerate() {
        println!(
            "  {:>3}. {} {} successes, {}",
            i + 1,
            format_rolls(&result.rolls),
            result.successes,
            result.outcome
        );
    }
    println!();
    println!(
        "  Progress: {}/{} ({:.0}%)",
        progress.total_successes, successes, progress.progress
    );
    if progress.complete {
        println!("  {}", "Complete".green().bold());
    } else {
        println!("  {}", "Out of time".red().bold());
    }
    println!("  {pool}");
    Ok(())
}
