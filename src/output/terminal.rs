// Colored terminal output for run summaries, genre distributions and
// individual user records.
//
// main.rs display paths delegate here so formatting stays in one place.

use colored::Colorize;

use crate::data::models::{FeatureTables, UserRecord};
use crate::genres::CategorySet;
use crate::sampling::Tier;

/// Summarize a finished run: table sizes, tier mix, priority items.
pub fn display_run_summary(tables: &FeatureTables) {
    println!(
        "\n{}",
        format!(
            "=== Feature Tables ({} users, {} items) ===",
            tables.users.len(),
            tables.items.len()
        )
        .bold()
    );
    println!();

    println!(
        "  {:<6} {:>6} {:>9} {:>10} {:>8}",
        "Tier".dimmed(),
        "Users".dimmed(),
        "Ignorant".dimmed(),
        "Read p".dimmed(),
        "Books".dimmed(),
    );
    println!("  {}", "-".repeat(44).dimmed());

    for tier in Tier::ALL {
        let members: Vec<&UserRecord> = tables.users.iter().filter(|u| u.tier == tier).collect();
        let ignorant = members.iter().filter(|u| u.ignorant).count();
        let books: usize = members.iter().map(|u| u.books.len()).sum();
        let read_proba = members.first().map(|u| u.read_proba).unwrap_or(0.0);
        println!(
            "  {:<6} {:>6} {:>9} {:>10.4} {:>8}",
            colorize_tier(tier),
            members.len(),
            ignorant,
            read_proba,
            books,
        );
    }

    let prioritized = tables.items.iter().filter(|i| i.priority > 0.0).count();
    println!();
    if prioritized > 0 {
        println!("  {} {} priority items", "*".yellow().bold(), prioritized);
    } else {
        println!("  {}", "No priority items".dimmed());
    }
}

/// Bar chart of items per dominant genre.
pub fn display_genre_distribution(counts: &[(String, usize)]) {
    let total: usize = counts.iter().map(|(_, n)| n).sum();
    println!(
        "\n{}",
        format!("=== Books by Dominant Genre ({total} books) ===").bold()
    );
    println!();

    let bar_width: usize = 30;
    let max = counts.iter().map(|&(_, n)| n).max().unwrap_or(0).max(1);

    for (label, count) in counts {
        let filled = (*count as f64 / max as f64 * bar_width as f64).round() as usize;
        let bar = format!("{}{}", "=".repeat(filled), " ".repeat(bar_width - filled));
        let share = if total > 0 {
            *count as f64 / total as f64
        } else {
            0.0
        };

        let colored_bar = if share >= 0.25 {
            bar.bright_green()
        } else if share >= 0.10 {
            bar.bright_yellow()
        } else {
            bar.bright_blue()
        };

        println!("  {:<20} [{}] {:>6}", label.bold(), colored_bar, count);
    }
}

/// Display a single user's record.
pub fn display_user_detail(user: &UserRecord, categories: &CategorySet) {
    println!("\n{}", format!("=== User {} ===", user.user_id).bold());
    println!("  Tier: {}", colorize_tier(user.tier));
    println!(
        "  Ignorant: {}",
        if user.ignorant {
            "yes".yellow().to_string()
        } else {
            "no".normal().to_string()
        }
    );
    println!("  Read: {}  Reviewed: {}", user.is_read, user.is_reviewed);
    match user.rating {
        Some(rating) => println!("  Mean rating: {:.2}", rating),
        None => println!("  Mean rating: {}", "none".dimmed()),
    }
    println!("  Read probability per step: {:.4}", user.read_proba);

    println!("\n  Genre profile:");
    let profile = user.vector.normalized(true);
    for (label, pct) in categories.iter().zip(profile.as_slice()) {
        if *pct > 0.0 {
            println!("    {:<20} {:>5.1}%", label, pct);
        }
    }

    println!("\n  {} books scored:", user.books.len());
    for scored in &user.books {
        println!("    {:>12}  {:.3}", scored.book_id, scored.score);
    }

    if let Some(similar) = &user.similarities {
        println!("\n  Top {} recommendations:", similar.len());
        for (i, scored) in similar.iter().enumerate() {
            println!("    {:>2}. {:>12}  {:.3}", i + 1, scored.book_id, scored.score);
        }
    }
}

fn colorize_tier(tier: Tier) -> colored::ColoredString {
    match tier {
        Tier::High => tier.as_str().green().bold(),
        Tier::Mid => tier.as_str().yellow(),
        Tier::Low => tier.as_str().dimmed(),
    }
}
