//! stillpoint-insights - practice analytics CLI
//!
//! Renders a user's practice overview, year heatmap, and emotion calendar
//! from the local stillpoint database.

use anyhow::{Context, Result};
use chrono::{Datelike, Utc};
use clap::Parser;
use std::str::FromStr;
use std::sync::Arc;
use stillpoint_core::analytics::{band, grid_max, intensity, EmotionDay, HeatmapCell};
use stillpoint_core::{AnalyticsService, Config, Database, OverviewStats, ViewMode};

const BAND_GLYPHS: [char; 5] = ['·', '░', '▒', '▓', '█'];

#[derive(Parser, Debug)]
#[command(name = "stillpoint-insights")]
#[command(about = "Stillpoint Insights - your practice in review")]
#[command(version)]
struct Args {
    /// User to report on
    #[arg(long)]
    user: String,

    /// Year for the heatmap (default: current year)
    #[arg(long)]
    year: Option<i32>,

    /// Render the emotion calendar for a month instead (format: YYYY-MM)
    #[arg(long)]
    month: Option<String>,

    /// Heatmap metric (duration, sessions, mood)
    #[arg(long, default_value = "duration")]
    view: String,

    /// Export format (json)
    #[arg(long)]
    export: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration and database
    let config = Config::load().context("failed to load configuration")?;
    let _log_guard = stillpoint_core::logging::init(&config.logging).ok();

    let db_path = Config::database_path();
    let db = Database::open(&db_path).context("failed to open database")?;
    db.migrate().context("failed to run migrations")?;

    let engine = AnalyticsService::new(Arc::new(db), config.analytics.clone());

    if let Some(month) = &args.month {
        let days = engine
            .get_emotion_calendar(&args.user, month)
            .context("failed to build emotion calendar")?;
        match args.export.as_deref() {
            Some("json") => println!("{}", serde_json::to_string_pretty(&days)?),
            Some(other) => anyhow::bail!("Unknown export format: {}. Use 'json'", other),
            None => print_emotion_calendar(month, &days),
        }
        return Ok(());
    }

    let view = ViewMode::from_str(&args.view)
        .map_err(|e| anyhow::anyhow!("{}. Use duration, sessions, or mood", e))?;
    let year = args.year.unwrap_or_else(|| Utc::now().year());

    let overview = engine
        .get_overview(&args.user)
        .context("failed to compute overview")?;
    let heatmap = engine
        .get_heatmap(&args.user, year, view)
        .context("failed to compute heatmap")?;

    match args.export.as_deref() {
        Some("json") => {
            let payload = serde_json::json!({
                "overview": overview,
                "year": year,
                "view": view.as_str(),
                "heatmap": heatmap,
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        Some(other) => anyhow::bail!("Unknown export format: {}. Use 'json'", other),
        None => {
            print_overview(&overview);
            print_heatmap(year, view, &heatmap);
        }
    }

    Ok(())
}

fn print_overview(stats: &OverviewStats) {
    println!();
    println!("╭{}╮", "─".repeat(60));
    println!("│{:^60}│", "YOUR PRACTICE IN REVIEW");
    println!("╰{}╯", "─".repeat(60));
    println!();

    if stats.total_sessions == 0 && stats.journal_count == 0 {
        println!("  No practice recorded yet.");
        println!();
        return;
    }

    println!("SUMMARY");
    println!(
        "   Sessions: {:<12} Total Time: {}",
        stats.total_sessions,
        stats.duration_display()
    );
    println!(
        "   Days:     {:<12} Journals: {}",
        stats.practice_days, stats.journal_count
    );
    println!(
        "   Mood:     {:<12} Focus: {}",
        stats.avg_mood, stats.avg_focus
    );
    println!();

    println!("STREAKS");
    println!(
        "   Current: {} days    Longest: {} days",
        stats.current_streak_days, stats.longest_streak_days
    );
    println!();

    if !stats.favorite_tools.is_empty() {
        println!("FAVORITE TOOLS");
        for (i, rank) in stats.favorite_tools.iter().enumerate() {
            println!(
                "   {}. {:<16} {} sessions, {}s total",
                i + 1,
                rank.tool,
                rank.count,
                rank.total_duration_secs
            );
        }
        println!();
    }
}

fn print_heatmap(year: i32, view: ViewMode, cells: &[HeatmapCell]) {
    println!("HEATMAP {} ({})", year, view.as_str());

    let max = grid_max(cells);
    // Row per weekday, column per week; cells are indexable by
    // (week_index, day_of_week) so no date math is needed here.
    for day in 0..7u32 {
        let mut row = String::with_capacity(54);
        for week in 0..53u32 {
            let cell = &cells[(week * 7 + day) as usize];
            let glyph = if cell.is_empty {
                ' '
            } else {
                BAND_GLYPHS[band(intensity(cell.value, max), BAND_GLYPHS.len() as u32) as usize]
            };
            row.push(glyph);
        }
        let label = match day {
            1 => "Mon",
            3 => "Wed",
            5 => "Fri",
            _ => "   ",
        };
        println!("   {} {}", label, row);
    }
    println!();
}

fn print_emotion_calendar(month: &str, days: &[EmotionDay]) {
    println!();
    println!("EMOTION CALENDAR {}", month);
    println!();

    if days.is_empty() {
        println!("  No journal entries this month.");
        println!();
        return;
    }

    println!("   {:<12} {:>5} {:>6}   {}", "Date", "Mood", "Focus", "Entry");
    for day in days {
        println!(
            "   {:<12} {:>5} {:>6}   {}",
            day.date.format("%Y-%m-%d"),
            day.avg_mood,
            day.avg_focus,
            day.representative_journal_id
        );
    }
    println!();
}
