use crate::commands::reply::Reply;
use crate::dataset::counters::CounterTable;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct SuggestionRow {
    #[tabled(rename = "#")]
    number: String,
    name: String,
}

#[derive(Tabled)]
struct ClassRow {
    class: String,
    champions: String,
}

fn rgb(color: u32) -> (u8, u8, u8) {
    ((color >> 16) as u8, (color >> 8) as u8, color as u8)
}

pub fn display_reply(reply: &Reply) {
    let (r, g, b) = rgb(reply.color);
    println!("\n{}", reply.title.bold().truecolor(r, g, b));
    println!("{}\n", "=".repeat(60).truecolor(r, g, b));

    if let Some(description) = &reply.description {
        println!("{}\n", description);
    }

    for field in &reply.fields {
        println!("{}", field.label.bold().yellow());
        println!("{}\n", field.body);
    }

    if let Some(thumbnail) = &reply.thumbnail {
        println!("{} {}\n", "🖼".cyan(), thumbnail.underline());
    }
}

pub fn display_suggestions(partial: &str, names: &[String]) {
    let heading = if partial.trim().is_empty() {
        "🔎 Suggestions".to_string()
    } else {
        format!("🔎 Suggestions for \"{}\"", partial.trim())
    };
    println!("\n{}", heading.bold().cyan());

    if names.is_empty() {
        println!("{}", "No matches".yellow());
        return;
    }

    let rows: Vec<SuggestionRow> = names
        .iter()
        .enumerate()
        .map(|(idx, name)| SuggestionRow {
            number: format!("{}", idx + 1),
            name: name.clone(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

pub fn display_dataset_summary(table: &CounterTable) {
    let mut classes: Vec<(String, usize)> = Vec::new();
    for record in table.records() {
        let class = if record.class.is_empty() {
            "Unknown".to_string()
        } else {
            record.class.clone()
        };
        match classes.iter_mut().find(|(name, _)| *name == class) {
            Some((_, count)) => *count += 1,
            None => classes.push((class, 1)),
        }
    }

    let rows: Vec<ClassRow> = classes
        .into_iter()
        .map(|(class, count)| ClassRow {
            class,
            champions: count.to_string(),
        })
        .collect();

    println!("\n{}", "📊 Counter dataset".bold().cyan());
    let mut summary = Table::new(rows);
    summary.with(Style::rounded());
    println!("{}\n", summary);
}

/// Spinner shown while a wiki request is in flight.
pub fn with_typing<T>(message: &str, work: impl FnOnce() -> T) -> T {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    let result = work();
    spinner.finish_and_clear();
    result
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}
