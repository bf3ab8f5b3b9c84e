use chrono::Local;

use super::{open_form, submit_form};
use crate::cli::RecordArgs;
use crate::config::Config;
use crate::view::{Session, ViewAction};

pub async fn cmd_add(config: &Config, fields: &RecordArgs) -> anyhow::Result<()> {
    if fields.title.as_deref().is_none_or(|t| t.trim().is_empty()) {
        println!("Usage: watchlog add --title \"<title>\" [--type series] [--rating ...]");
        println!("Example: watchlog add --title \"Severance\" --type series --episode 5");
        return Ok(());
    }

    let mut session = Session::new(crate::open_store(config).await?);
    session.dispatch(ViewAction::OpenNewForm {
        today: Local::now().date_naive(),
    });

    let form = fields.apply_to(open_form(&session)?);
    session.dispatch(ViewAction::UpdateForm(form));

    submit_form(&mut session, "Logged").await
}
