use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use nf_mechanics::{MAX_MAGNITUDE, Protection, SaveOutcome, SaveTag};

/// Rolls past lethality shown in the table.
const HEADROOM: i32 = 12;

pub fn run(lethality: i32, trait_level: i32) -> Result<(), String> {
    if lethality.unsigned_abs() > MAX_MAGNITUDE.unsigned_abs() {
        return Err(format!("lethality {lethality} is outside ±{MAX_MAGNITUDE}"));
    }

    println!(
        "  {} {}",
        "Save table".bold(),
        format!("(lethality {lethality}, trait {trait_level:+})").dimmed()
    );
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Roll", "Effective", "Outcome", "Wounds"]);

    for roll in 0..=(lethality + HEADROOM).max(0) {
        let save = SaveOutcome::compute(roll, trait_level, lethality, &Protection::default())
            .map_err(|e| e.to_string())?;
        table.add_row(vec![
            roll.to_string(),
            save.effective_roll.to_string(),
            colorize_tag(save.tag),
            save.wounds.to_string(),
        ]);
    }

    println!("{table}");
    Ok(())
}

pub fn colorize_tag(tag: SaveTag) -> String {
    let text = tag.to_string();
    match tag {
        SaveTag::Perfection => text.green().bold().to_string(),
        SaveTag::Success => text.green().to_string(),
        SaveTag::StatusQuo => text.yellow().to_string(),
        SaveTag::Failure => text.red().to_string(),
        SaveTag::Fumble => text.red().bold().to_string(),
    }
}
