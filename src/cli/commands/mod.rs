mod add;
mod edit;
mod init;
mod list;
mod remove;

pub use add::cmd_add;
pub use edit::cmd_edit;
pub use init::cmd_init;
pub use list::cmd_list;
pub use remove::cmd_remove;

use crate::domain::WatchStatus;
use crate::models::{RecordForm, WatchRecord};
use crate::services::RecordStore;
use crate::view::Session;

const BAR_WIDTH: usize = 20;

pub(crate) fn progress_bar(percent: u8) -> String {
    let percent = percent.min(100);
    let filled = usize::from(percent) * BAR_WIDTH / 100;
    format!(
        "[{}{}] {}%",
        "█".repeat(filled),
        "░".repeat(BAR_WIDTH - filled),
        percent
    )
}

pub(crate) fn print_record(record: &WatchRecord) {
    let year = record
        .release_year
        .map(|y| format!(" ({y})"))
        .unwrap_or_default();
    let position = record.position_label();
    let position = if position.is_empty() {
        String::new()
    } else {
        format!(" {position}")
    };

    println!(
        "{} {}{} [{}]{} - {}",
        record.status.icon(),
        record.title,
        year,
        record.media_type.label(),
        position,
        record.rating.label()
    );

    let rewatch = if record.is_rewatch { " | ↻ Rewatch" } else { "" };
    println!(
        "  ID: {} | Watched: {} | Status: {}{}",
        record.id,
        record.date_watched,
        record.status.label(),
        rewatch
    );

    if record.is_series() && record.total_episodes.is_some_and(|t| t > 0) {
        println!("  {}", progress_bar(record.progress()));
    }

    if let Some(notes) = &record.notes {
        println!("  Notes: {notes}");
    }
}

fn open_form<S: RecordStore>(session: &Session<S>) -> anyhow::Result<RecordForm> {
    session
        .state()
        .form
        .as_ref()
        .map(|open| open.form.clone())
        .ok_or_else(|| anyhow::anyhow!("No entry form is open"))
}

/// Submits the open form and reports the outcome.
///
/// Any failure, rejected input included, is printed and returned so the
/// process exits non-zero.
async fn submit_form<S: RecordStore>(session: &mut Session<S>, verb: &str) -> anyhow::Result<()> {
    let requested = open_form(session)?.status;

    match session.submit().await {
        Ok(saved) => {
            println!("✓ {}: {}", verb, saved.title);
            print_record(&saved);
            if saved.status != requested && requested != WatchStatus::Dropped {
                println!(
                    "  Status set to {} from episode progress",
                    saved.status.label()
                );
            }
            Ok(())
        }
        Err(e) => {
            if let Some(notice) = &session.state().notice {
                println!("✗ {notice}");
            }
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::RecordError;
    use crate::view::ViewAction;
    use chrono::NaiveDate;

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0), format!("[{}] 0%", "░".repeat(20)));
        assert_eq!(
            progress_bar(50),
            format!("[{}{}] 50%", "█".repeat(10), "░".repeat(10))
        );
        assert_eq!(progress_bar(100), format!("[{}] 100%", "█".repeat(20)));
    }

    async fn session_with_form(title: &str, date: &str) -> Session<crate::db::Store> {
        let store = crate::db::Store::new("sqlite::memory:").await.unwrap();
        let mut session = Session::new(store);
        session.dispatch(ViewAction::OpenNewForm {
            today: NaiveDate::from_ymd_opt(2025, 6, 14).unwrap(),
        });
        let mut form = open_form(&session).unwrap();
        form.title = title.to_string();
        form.date_watched = date.to_string();
        session.dispatch(ViewAction::UpdateForm(form));
        session
    }

    #[tokio::test]
    async fn test_submit_form_fails_on_rejected_input() {
        let mut session = session_with_form("Arrival", "garbage").await;

        let err = submit_form(&mut session, "Logged").await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RecordError>(),
            Some(RecordError::Validation(_))
        ));
        assert!(session.state().form.is_some());
        assert!(session.state().records.is_empty());
    }

    #[tokio::test]
    async fn test_submit_form_saves_valid_input() {
        let mut session = session_with_form("Arrival", "2025-06-01").await;

        submit_form(&mut session, "Logged").await.unwrap();
        assert!(session.state().form.is_none());
        assert_eq!(session.state().records.len(), 1);
    }
}
