//! CLI module - Command-line interface for watchlog
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Args, Parser, Subcommand};

use crate::domain::{MediaType, Rating, WatchStatus};
use crate::models::RecordForm;
use crate::view::{Choice, DateRange};

/// watchlog - a personal log of watched movies and series
#[derive(Parser)]
#[command(name = "watchlog")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the HTTP API
    #[command(alias = "daemon", alias = "-d")]
    Serve,

    /// Show logged entries with insights
    #[command(alias = "ls", alias = "l")]
    List(ListArgs),

    /// Log a new movie or series
    #[command(alias = "a")]
    Add(RecordArgs),

    /// Change fields of an existing entry
    #[command(alias = "e")]
    Edit {
        /// Entry ID
        id: String,

        #[command(flatten)]
        fields: RecordArgs,
    },

    /// Forget an entry
    #[command(alias = "rm", alias = "r")]
    Remove {
        /// Entry ID
        id: String,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Only titles containing this text
    #[arg(long, short)]
    pub search: Option<String>,

    /// Only entries still being watched
    #[arg(long)]
    pub ongoing: bool,

    /// all, this-month or last-month
    #[arg(long, default_value = "all")]
    pub range: DateRange,

    /// Release year, or "all"
    #[arg(long, default_value = "all")]
    pub year: Choice<i32>,

    /// movie, series or "all"
    #[arg(long = "type", default_value = "all")]
    pub media_type: Choice<MediaType>,

    /// skip, timepass, go-for-it, lisan-al-gaib or "all"
    #[arg(long, default_value = "all")]
    pub rating: Choice<Rating>,

    /// watching, completed, dropped or "all"
    #[arg(long, default_value = "all")]
    pub status: Choice<WatchStatus>,
}

/// Entry fields. Anything left out keeps the form's current value.
#[derive(Args, Debug, Clone, Default)]
pub struct RecordArgs {
    #[arg(long)]
    pub title: Option<String>,

    /// movie or series
    #[arg(long = "type")]
    pub media_type: Option<MediaType>,

    /// Release year
    #[arg(long)]
    pub year: Option<String>,

    /// skip, timepass, go-for-it or lisan-al-gaib
    #[arg(long)]
    pub rating: Option<Rating>,

    /// watching, completed or dropped
    #[arg(long)]
    pub status: Option<WatchStatus>,

    /// Date watched (YYYY-MM-DD), defaults to today for new entries
    #[arg(long)]
    pub date: Option<String>,

    /// Mark as a rewatch
    #[arg(long, conflicts_with = "first_watch")]
    pub rewatch: bool,

    /// Clear the rewatch mark
    #[arg(long)]
    pub first_watch: bool,

    #[arg(long)]
    pub season: Option<String>,

    #[arg(long)]
    pub episode: Option<String>,

    #[arg(long)]
    pub total_episodes: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,
}

impl RecordArgs {
    /// Overlays the given flags on `form`.
    #[must_use]
    pub fn apply_to(&self, mut form: RecordForm) -> RecordForm {
        fn set(target: &mut String, value: Option<&String>) {
            if let Some(v) = value {
                target.clone_from(v);
            }
        }

        set(&mut form.title, self.title.as_ref());
        set(&mut form.release_year, self.year.as_ref());
        set(&mut form.date_watched, self.date.as_ref());
        set(&mut form.season, self.season.as_ref());
        set(&mut form.episode, self.episode.as_ref());
        set(&mut form.total_episodes, self.total_episodes.as_ref());
        set(&mut form.notes, self.notes.as_ref());

        if let Some(media_type) = self.media_type {
            form.media_type = media_type;
        }
        if let Some(rating) = self.rating {
            form.rating = rating;
        }
        if let Some(status) = self.status {
            form.status = status;
        }
        if self.rewatch {
            form.is_rewatch = true;
        } else if self.first_watch {
            form.is_rewatch = false;
        }

        form
    }
}

pub use commands::*;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("watchlog").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_list_flags() {
        let cli = parse(&[
            "list", "--ongoing", "--range", "last-month", "--type", "series", "--year", "2021",
        ]);
        let Some(Commands::List(args)) = cli.command else {
            panic!("expected list");
        };
        assert!(args.ongoing);
        assert_eq!(args.range, DateRange::LastMonth);
        assert_eq!(args.media_type, Choice::Only(MediaType::Series));
        assert_eq!(args.year, Choice::Only(2021));
        assert_eq!(args.rating, Choice::All);
    }

    #[test]
    fn test_unknown_rating_is_rejected() {
        let result = Cli::try_parse_from(["watchlog", "add", "--title", "X", "--rating", "meh"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_record_args_overlay_form() {
        let cli = parse(&[
            "edit", "4", "--episode", "10", "--rating", "lisan-al-gaib", "--rewatch",
        ]);
        let Some(Commands::Edit { id, fields }) = cli.command else {
            panic!("expected edit");
        };
        assert_eq!(id, "4");

        let today = NaiveDate::from_ymd_opt(2025, 1, 20).unwrap();
        let mut form = RecordForm::new(today);
        form.title = "Severance".to_string();
        let form = fields.apply_to(form);

        assert_eq!(form.title, "Severance");
        assert_eq!(form.episode, "10");
        assert_eq!(form.rating, Rating::LisanAlGaib);
        assert!(form.is_rewatch);
        assert_eq!(form.date_watched, "2025-01-20");
    }
}
