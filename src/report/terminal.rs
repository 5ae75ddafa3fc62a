use std::collections::HashMap;
use std::path::Path;

use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::models::{LicenseRecord, TrustRating};

/// Render a colored terminal report.
///
/// Risky and caution entries are always listed; trusted and unrated ones
/// only with `verbose`. `quiet` prints just the one-line summary.
pub fn render(records: &[LicenseRecord], path: &Path, verbose: bool, quiet: bool) {
    let count = |rating: TrustRating| records.iter().filter(|r| r.rating == rating).count();
    let trusted = count(TrustRating::Trusted);
    let caution = count(TrustRating::Caution);
    let risky = count(TrustRating::Risky);
    let unrated = count(TrustRating::Unknown);

    if quiet {
        println!(
            "Total: {}  Trusted: {}  Caution: {}  Risky: {}  Unknown: {}",
            records.len(),
            trusted.to_string().green(),
            caution.to_string().yellow(),
            risky.to_string().red(),
            unrated.to_string().dimmed(),
        );
        return;
    }

    println!(
        "\n {} v{}",
        "library-license-checkr".bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(" Checked: {}\n", path.display());

    if records.is_empty() {
        println!(" No packages or dependencies found.\n");
        return;
    }

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "SUMMARY".bold());
    println!(" │  {:<48} │", format!("Total dependencies : {}", records.len()));
    for (symbol, label, n, rating) in [
        ("✓".green(), "Trusted", trusted, TrustRating::Trusted),
        ("⚠".yellow(), "Caution", caution, TrustRating::Caution),
        ("✗".red(), "Risky", risky, TrustRating::Risky),
        ("?".dimmed(), "Unknown", unrated, TrustRating::Unknown),
    ] {
        println!(
            " │  {:<48} │",
            format!("{}  {:<15}: {:>4}  {}", symbol, label, n, summarize_licenses(records, rating))
        );
    }
    println!(" └────────────────────────────────────────────────────┘\n");

    if risky > 0 {
        println!(" {} Dependencies requiring attention:\n", "[RISKY]".red().bold());
        render_table(records, &[TrustRating::Risky]);
        println!();
    }

    if caution > 0 {
        println!(" {} Dependencies to review:\n", "[CAUTION]".yellow().bold());
        render_table(records, &[TrustRating::Caution]);
        println!();
    }

    if verbose && trusted + unrated > 0 {
        println!(" {} Remaining dependencies:\n", "[OK]".green().bold());
        render_table(records, &[TrustRating::Trusted, TrustRating::Unknown]);
        println!();
    }
}

fn render_table(records: &[LicenseRecord], ratings: &[TrustRating]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Package").add_attribute(Attribute::Bold),
            Cell::new("Version").add_attribute(Attribute::Bold),
            Cell::new("Ecosystem").add_attribute(Attribute::Bold),
            Cell::new("License").add_attribute(Attribute::Bold),
            Cell::new("Rating").add_attribute(Attribute::Bold),
            Cell::new("Note").add_attribute(Attribute::Bold),
        ]);

    for record in records.iter().filter(|r| ratings.contains(&r.rating)) {
        let (rating_str, rating_color) = match record.rating {
            TrustRating::Trusted => ("✓ Trusted", Color::Green),
            TrustRating::Caution => ("⚠ Caution", Color::Yellow),
            TrustRating::Risky => ("✗ Risky", Color::Red),
            TrustRating::Unknown => ("? Unknown", Color::DarkGrey),
        };

        table.add_row(vec![
            Cell::new(&record.name),
            Cell::new(record.version.as_deref().unwrap_or("-")),
            Cell::new(record.ecosystem.to_string()),
            Cell::new(&record.license),
            Cell::new(rating_str)
                .fg(rating_color)
                .set_alignment(CellAlignment::Center),
            Cell::new(record.error.as_deref().unwrap_or("")).fg(Color::DarkGrey),
        ]);
    }

    println!("{}", table);
}

/// Top three licenses for a tier, e.g. `[MIT (4), Apache-2.0 (2)]`.
fn summarize_licenses(records: &[LicenseRecord], rating: TrustRating) -> String {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records.iter().filter(|r| r.rating == rating) {
        *counts.entry(record.license.as_str()).or_insert(0) += 1;
    }

    let mut pairs: Vec<(&str, usize)> = counts.into_iter().collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let summary: Vec<String> = pairs
        .iter()
        .take(3)
        .map(|(lic, cnt)| format!("{} ({})", lic, cnt))
        .collect();

    if summary.is_empty() {
        String::new()
    } else {
        format!("[{}]", summary.join(", "))
    }
}
