use colored::Colorize;
use sietch_dice::engine::world_of_darkness::WOD_DIE;
use sietch_dice::{RollDetails, RollSpec, SystemKind};

use super::Session;

pub fn run(
    session: &mut Session,
    notation: &str,
    system: SystemKind,
    difficulty: Option<u32>,
    specialty: bool,
) -> Result<(), String> {
    let request = sietch_dice::parse(notation).map_err(|e| e.to_string())?;

    let mut spec = session
        .engine
        .spec_for(request, system)
        .map_err(|e| e.to_string())?;
    match &mut spec {
        RollSpec::WorldOfDarkness {
            difficulty: d,
            specialty: s,
            ..
        } => {
            if let Some(value) = difficulty {
                *d = value;
            }
            *s = specialty;
        }
        _ if difficulty.is_some() || specialty => {
            return Err(format!(
                "--difficulty and --specialty only apply to wod rolls, not {system}"
            ));
        }
        _ => {}
    }

    let result = session
        .engine
        .roll(&spec, &mut session.rng)
        .map_err(|e| e.to_string())?;

    if session.json {
        return super::print_json(&result);
    }

    println!(
        "  {} {request} {}",
        "Rolling".bold(),
        format!("({system})").dimmed()
    );
    match &result.details {
        RollDetails::Exploding {
            exploded_count,
            capped_chains,
            ..
        } => {
            println!("  {result}");
            if *exploded_count > 0 {
                println!(
                    "  {} {exploded_count} {}",
                    "Exploded".yellow(),
                    if *exploded_count == 1 { "time" } else { "times" }
                );
            }
            if *capped_chains > 0 {
                println!("  {} {capped_chains} chain(s) hit the cap", "Capped".dimmed());
            }
        }
        RollDetails::WorldOfDarkness {
            difficulty, ones, ..
        } => {
            if request.sides != WOD_DIE || request.modifier != 0 {
                println!(
                    "  {}",
                    format!(
                        "wod pools always roll d{WOD_DIE}; sides and modifier in {request} are ignored"
                    )
                    .dimmed()
                );
            }
            let line = result.to_string();
            if result.botch {
                println!("  {}", line.red().bold());
            } else if result.successes > 0 {
                println!("  {}", line.green());
            } else {
                println!("  {line}");
            }
            println!(
                "  {}",
                format!("difficulty {difficulty}, {ones} ones").dimmed()
            );
        }
        _ => println!("  {result}"),
    }
    Ok(())
}
