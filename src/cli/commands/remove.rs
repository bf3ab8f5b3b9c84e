use anyhow::Context;

use crate::config::Config;
use crate::domain::RecordId;
use crate::services::RecordError;
use crate::view::Session;

pub async fn cmd_remove(config: &Config, id_str: &str, yes: bool) -> anyhow::Result<()> {
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

    if !yes {
        println!("Forget this memory? '{}' (ID: {})", record.title, record.id);
        println!("Enter 'y' to confirm, anything else to cancel:");

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    match session.delete(id).await {
        Ok(()) => {
            println!("✓ Forgot: {}", record.title);
            Ok(())
        }
        Err(RecordError::NotFound(_)) => {
            println!("Entry with ID {id} was already gone.");
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
