use colored::Colorize;
use sietch_dice::{RollDetails, RollSpec};

use super::{Session, format_rolls};

pub fn run(session: &mut Session, target: u32, bonus: u32) -> Result<(), String> {
    let spec = RollSpec::Dune2d20 {
        target,
        bonus_dice: bonus,
    };
    let result = session
        .engine
        .roll(&spec, &mut session.rng)
        .map_err(|e| e.to_string())?;

    if session.json {
        return super::print_json(&result);
    }

    let bonus_label = if bonus > 0 {
        format!(" +{bonus} bonus")
    } else {
        String::new()
    };
    println!(
        "  {} 2d20{bonus_label} against target {target}",
        "Rolling".bold()
    );
    println!("  {result}");

    if let RollDetails::Dune {
        main: Some(main), ..
    } = &result.details
    {
        println!(
            "  {} {} {}",
            "Main dice".bold(),
            format_rolls(&main.rolls),
            format!(
                "(all dice: {} successes, {} complications)",
                main.all_successes, main.all_complications
            )
            .dimmed()
        );
    }
    Ok(())
}
