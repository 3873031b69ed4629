pub mod check;
pub mod roll;
pub mod save_table;

use std::path::Path;

use nf_mechanics::DiceRules;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber. `--verbose` wins over `RUST_LOG`.
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// A seeded RNG, or one seeded from the OS when no seed is given.
fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Load dice rules from a JSON file, or the defaults.
fn load_rules(path: Option<&Path>) -> Result<DiceRules, String> {
    let Some(path) = path else {
        return Ok(DiceRules::default());
    };
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let rules = DiceRules::from_json(&json).map_err(|e| e.to_string())?;
    tracing::debug!(path = %path.display(), ?rules, "loaded rules");
    Ok(rules)
}
