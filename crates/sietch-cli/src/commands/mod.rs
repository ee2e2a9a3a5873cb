pub mod dune;
pub mod extended;
pub mod roll;
pub mod test;

use std::fs;
use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use sietch_dice::{DiceConfig, DiceEngine};
use tracing::debug;

/// Everything a command needs: the engine, a random source, and output mode.
pub struct Session {
    pub engine: DiceEngine,
    pub rng: StdRng,
    pub json: bool,
}

impl Session {
    /// Build the engine from an optional TOML config and seed the RNG.
    pub fn open(config: Option<&Path>, seed: Option<u64>, json: bool) -> Result<Self, String> {
        let config = match config {
            Some(path) => load_config(path)?,
            None => DiceConfig::default(),
        };
        let engine = DiceEngine::new(config).map_err(|e| e.to_string())?;
        let rng = match seed {
            Some(seed) => {
                debug!(seed, "using seeded rng");
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_os_rng(),
        };
        Ok(Self { engine, rng, json })
    }
}

fn load_config(path: &Path) -> Result<DiceConfig, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("cannot read config '{}': {e}", path.display()))?;
    let config: DiceConfig = toml::from_str(&text)
        .map_err(|e| format!("invalid config '{}': {e}", path.display()))?;
    debug!(path = %path.display(), ?config, "loaded dice config");
    Ok(config)
}

/// Print any result as pretty JSON on stdout.
fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let out = serde_json::to_string_pretty(value).map_err(|e| format!("serialization failed: {e}"))?;
    println!("{out}");
    Ok(())
}

/// Format a list of die faces as `[a, b, c]`.
fn format_rolls(rolls: &[u32]) -> String {
    let values: Vec<String> = rolls.iter().map(u32::to_string).collect();
    format!("[{}]", values.join(", "))
}
