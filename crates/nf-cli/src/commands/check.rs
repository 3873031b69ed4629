use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use nf_mechanics::{CheckRequest, CheckResolver, CheckResult};

pub fn run(path: &Path, seed: Option<u64>, rules: Option<&Path>, json: bool) -> Result<(), String> {
    let rules = super::load_rules(rules)?;
    let source = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let request: CheckRequest = serde_json::from_str(&source)
        .map_err(|e| format!("malformed request {}: {e}", path.display()))?;

    let mut rng = super::make_rng(seed);
    let result = CheckResolver::new(rules)
        .resolve(&request, &mut rng)
        .map_err(|e| e.to_string())?;

    if json {
        let out = serde_json::to_string_pretty(&result).map_err(|e| e.to_string())?;
        println!("{out}");
    } else {
        print_result(&result);
    }
    Ok(())
}

fn print_result(result: &CheckResult) {
    println!("  {}", result.kind.to_string().bold());
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Field", "Value"]);

    table.add_row(vec!["Formula".to_string(), result.formula.to_string()]);
    table.add_row(vec!["Roll".to_string(), result.roll.to_string()]);
    table.add_row(vec!["Total".to_string(), result.total.to_string()]);
    table.add_row(vec![
        "Skill".to_string(),
        format!("{} ({})", result.skill_name, result.skill_level),
    ]);
    if let Some(name) = &result.trait_name {
        table.add_row(vec![
            "Trait".to_string(),
            format!("{name} ({:+})", result.trait_level),
        ]);
    }
    if let Some(dt) = result.damage_type {
        table.add_row(vec!["Damage type".to_string(), dt.to_string()]);
    }
    if let Some(damage) = result.weapon_damage {
        table.add_row(vec!["Weapon damage".to_string(), damage.to_string()]);
    }
    if let Some(excess) = result.excess {
        table.add_row(vec!["Excess".to_string(), excess.to_string()]);
    }
    if let Some(lethality) = result.lethality {
        table.add_row(vec!["Lethality".to_string(), lethality.to_string()]);
    }
    if let Some(mitigated) = result.mitigated_lethality {
        table.add_row(vec!["After protection".to_string(), mitigated.to_string()]);
    }
    if let Some(tag) = result.outcome {
        table.add_row(vec!["Outcome".to_string(), super::save_table::colorize_tag(tag)]);
    }
    if let Some(wounds) = result.wounds {
        table.add_row(vec!["Wounds".to_string(), wounds.to_string()]);
    }

    println!("{table}");

    if !result.effects.is_empty() {
        println!();
        for effect in &result.effects {
            println!("  {} {effect}", "→".dimmed());
        }
    }
}
