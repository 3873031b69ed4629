use std::path::Path;

use colored::Colorize;
use nf_mechanics::{DiceCount, DieFace, RollAccumulator};

pub fn run(hero: bool, seed: Option<u64>, rules: Option<&Path>) -> Result<(), String> {
    let rules = super::load_rules(rules)?;
    let mut rng = super::make_rng(seed);

    let outcome = RollAccumulator::new(rules)
        .accumulate(DiceCount::for_hero_point(hero), &mut rng)
        .map_err(|e| e.to_string())?;

    let faces: Vec<String> = outcome.sequence.iter().map(colorize_face).collect();
    println!("  {} [{}]", "Faces".bold(), faces.join(", "));
    println!("  {} {}", "Total".bold(), outcome.total);
    println!(
        "  {}",
        format!("({} nines, {} zeroes)", outcome.nines, outcome.zeroes).dimmed()
    );

    Ok(())
}

fn colorize_face(face: &DieFace) -> String {
    let text = face.to_string();
    if face.exploded {
        text.green().bold().to_string()
    } else if face.rerolled_zero {
        text.yellow().to_string()
    } else {
        text
    }
}
