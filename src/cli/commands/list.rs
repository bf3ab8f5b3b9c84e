//! List entries command handler

use anyhow::Context;
use chrono::Local;

use super::print_record;
use crate::cli::ListArgs;
use crate::config::Config;
use crate::view::{Session, ViewAction, ViewMode};

pub async fn cmd_list(config: &Config, args: &ListArgs) -> anyhow::Result<()> {
    let today = Local::now().date_naive();
    let mut session = Session::new(crate::open_store(config).await?);

    let loaded = match &args.search {
        Some(term) => session.set_search(term.clone()).await,
        None => session.refresh().await,
    };
    loaded.context("Failed to load entries")?;

    let view_mode = if args.ongoing {
        ViewMode::Ongoing
    } else {
        ViewMode::All
    };
    for action in [
        ViewAction::SetViewMode(view_mode),
        ViewAction::SetDateRange(args.range),
        ViewAction::SetYear(args.year),
        ViewAction::SetMediaType(args.media_type),
        ViewAction::SetRating(args.rating),
        ViewAction::SetStatus(args.status),
    ] {
        session.dispatch(action);
    }

    let state = session.state();
    if state.records.is_empty() {
        println!("No memories logged yet.");
        println!();
        println!("Add one with: watchlog add --title \"title\"");
        return Ok(());
    }

    let visible = state.visible(today);
    let insights = state.insights(today);

    println!(
        "{} - {} ({} of {})",
        state.filters.view_mode.label(),
        state.filters.date_range.label(),
        visible.len(),
        state.records.len()
    );
    println!("{:-<70}", "");

    if visible.is_empty() {
        println!("Nothing matches these filters.");
        if state.filters.has_active_field_filters() {
            println!("Drop --year, --type, --rating or --status to see more.");
        }
    }

    for record in &visible {
        print_record(record);
    }

    println!("{:-<70}", "");
    println!(
        "Total: {} | Movies: {} | Series: {}",
        insights.total, insights.movie_count, insights.series_count
    );

    let years = state.available_years();
    if !years.is_empty() {
        let years: Vec<String> = years.iter().map(ToString::to_string).collect();
        println!("Years: {}", years.join(", "));
    }

    println!();
    println!("Legend: ▶ Watching | ✓ Completed | ✗ Dropped | ↻ Rewatch");

    Ok(())
}
