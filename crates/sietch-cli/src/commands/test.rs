use colored::Colorize;
use sietch_dice::{DuneTest, MomentumPool};

use super::{Session, format_rolls};

pub fn run(
    session: &mut Session,
    target: u32,
    difficulty: u32,
    bonus: u32,
    complication_range: u32,
) -> Result<(), String> {
    let test = DuneTest::new(target)
        .with_difficulty(difficulty)
        .with_bonus_dice(bonus)
        .with_complication_range(complication_range);
    let result = session
        .engine
        .dune_test(&test, &mut session.rng)
        .map_err(|e| e.to_string())?;

    if session.json {
        return super::print_json(&result);
    }

    let mut pool = MomentumPool::new();
    pool.apply_test(&result);

    println!(
        "  {} target {target}, difficulty {difficulty}",
        "Test".bold()
    );
    println!("  Rolls: {}", format_rolls(&result.rolls));
    println!(
        "  Successes: {} {}",
        result.successes,
        format!("({} critical)", result.critical_hits).dimmed()
    );
    if result.complications > 0 {
        println!("  Complications: {}", result.complications.to_string().red());
    } else {
        println!("  Complications: 0");
    }
    let outcome = result.outcome.to_string();
    if result.passed() {
        println!("  {}", outcome.green().bold());
    } else {
        println!("  {}", outcome.red().bold());
    }
    println!("  {pool}");
    Ok(())
}
