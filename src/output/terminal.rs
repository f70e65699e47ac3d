// Colored terminal output for comparison results and fingerprints.
//
// main.rs delegates here for everything printed by `textsim compare`.

use colored::{ColoredString, Colorize};

use crate::similarity::comparer::ComparisonReport;
use crate::similarity::fingerprint::StylisticFingerprint;

use super::truncate_chars;

const BAR_WIDTH: usize = 20;

/// Display the three scores as bars, optionally with both fingerprints.
pub fn display_report(report: &ComparisonReport, labels: [&str; 2], details: bool) {
    println!(
        "\n{}",
        format!(
            "=== {} vs {} ===",
            truncate_chars(labels[0], 40),
            truncate_chars(labels[1], 40)
        )
        .bold()
    );
    println!();

    let scores = &report.scores;
    for (name, value) in [
        ("Stylistic", scores.stylistic),
        ("Jaccard", scores.jaccard),
        ("TF-IDF", scores.tfidf),
    ] {
        println!("  {:<10} {} {:.4}", name.bold(), score_bar(value), value);
    }

    if details {
        println!();
        println!(
            "  {:<22} {:>10} {:>10}",
            "Fingerprint".dimmed(),
            "Text 1".dimmed(),
            "Text 2".dimmed()
        );
        println!("  {}", "-".repeat(44).dimmed());
        let [fp1, fp2] = &report.fingerprints;
        for (label, a, b) in fingerprint_rows(fp1, fp2) {
            println!("  {:<22} {:>10.3} {:>10.3}", label, a, b);
        }
    }

    if let Some(generated) = &report.generated {
        println!();
        println!("  {}", format!("Generated {generated}").dimmed());
    }
}

/// Build a fixed-width bar for a score in [0, 1], colored by strength.
pub fn score_bar(value: f64) -> ColoredString {
    let filled = (value.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    let empty = BAR_WIDTH.saturating_sub(filled);
    let bar = format!("[{}{}]", "=".repeat(filled), " ".repeat(empty));

    if value >= 0.75 {
        bar.bright_green()
    } else if value >= 0.40 {
        bar.bright_yellow()
    } else {
        bar.bright_blue()
    }
}

fn fingerprint_rows(
    fp1: &StylisticFingerprint,
    fp2: &StylisticFingerprint,
) -> [(&'static str, f64, f64); 5] {
    let a = fp1.to_array();
    let b = fp2.to_array();
    [
        ("Avg sentence length", a[0], b[0]),
        ("Avg word length", a[1], b[1]),
        ("Punctuation density", a[2], b[2]),
        ("Lexical diversity", a[3], b[3]),
        ("Short sentence ratio", a[4], b[4]),
    ]
}
