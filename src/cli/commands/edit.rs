use anyhow::Context;

use super::{open_form, submit_form};
use crate::cli::RecordArgs;
use crate::config::Config;
use crate::domain::RecordId;
use crate::view::{Session, ViewAction};

pub async fn cmd_edit(config: &Config, id_str: &str, fields: &RecordArgs) -> anyhow::Result<()> {
    let Ok(id) = id_str.parse::<RecordId>() else {
        println!("Invalid entry ID: {id_str}");
        println!("Use 'watchlog list' to see entry IDs.");
        return Ok(());
    };

    let mut session = Session::new(crate::open_store(config).await?);
    session
        .refresh()
        .await
        .context("Failed to load entries")?;

    let Some(record) = session.state().find(id).cloned() else {
        println!("Entry with ID {id} not found.");
        return Ok(());
    };

    session.dispatch(ViewAction::OpenEditForm(record));
    let form = fields.apply_to(open_form(&session)?);
    session.dispatch(ViewAction::UpdateForm(form));

    submit_form(&mut session, "Updated").await
}
