//! Drives a [`ViewState`] against a [`RecordStore`].
//!
//! The session is the only owner of the view state. Reads keep the previous
//! list on failure; mutations only refetch once the store confirms them.

use tracing::{debug, info, warn};

use super::state::{ViewAction, ViewState};
use crate::domain::RecordId;
use crate::models::{ValidationError, WatchRecord};
use crate::services::{RecordError, RecordStore};

pub struct Session<S> {
    store: S,
    state: ViewState,
}

impl<S: RecordStore> Session<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            state: ViewState::default(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &ViewState {
        &self.state
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub fn dispatch(&mut self, action: ViewAction) {
        let current = std::mem::take(&mut self.state);
        self.state = current.apply(action);
    }

    /// Reloads records, through the search endpoint when a term is set.
    ///
    /// On failure the stale list stays in place and no notice is raised.
    pub async fn refresh(&mut self) -> Result<usize, RecordError> {
        let term = self.state.search.trim().to_string();
        let result = if term.is_empty() {
            self.store.list().await
        } else {
            self.store.search(&term).await
        };

        match result {
            Ok(records) => {
                let count = records.len();
                debug!(count, search = %term, "Records loaded");
                self.dispatch(ViewAction::RecordsLoaded(records));
                Ok(count)
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch logs, keeping previous list");
                Err(e)
            }
        }
    }

    pub async fn set_search(&mut self, term: impl Into<String>) -> Result<usize, RecordError> {
        self.dispatch(ViewAction::SetSearch(term.into()));
        self.refresh().await
    }

    /// Validates and persists the open form.
    ///
    /// On success the form closes and the list is refetched. On failure a
    /// notice is raised and the form is left exactly as it was.
    pub async fn submit(&mut self) -> Result<WatchRecord, RecordError> {
        let Some(open) = self.state.form.clone() else {
            return Err(ValidationError::NoOpenForm.into());
        };

        let record = match open.form.to_new_record() {
            Ok(record) => record,
            Err(e) => {
                self.dispatch(ViewAction::MutationFailed(e.to_string()));
                return Err(e.into());
            }
        };

        let result = match open.editing {
            Some(id) => self.store.update(id, record).await,
            None => self.store.create(record).await,
        };

        match result {
            Ok(saved) => {
                info!(id = %saved.id, title = %saved.title, "Saved watch record");
                self.dispatch(ViewAction::CloseForm);
                self.refetch_after_mutation().await;
                Ok(saved)
            }
            Err(e) => {
                warn!(error = %e, "Failed to save watch record");
                self.dispatch(ViewAction::MutationFailed(format!("Error saving: {e}")));
                Err(e)
            }
        }
    }

    /// Deletes a record. The list is untouched unless the store confirms.
    pub async fn delete(&mut self, id: RecordId) -> Result<(), RecordError> {
        match self.store.delete(id).await {
            Ok(()) => {
                info!(%id, "Deleted watch record");
                self.refetch_after_mutation().await;
                Ok(())
            }
            Err(e) => {
                warn!(%id, error = %e, "Failed to delete watch record");
                self.dispatch(ViewAction::MutationFailed(format!(
                    "Could not delete entry: {e}"
                )));
                Err(e)
            }
        }
    }

    async fn refetch_after_mutation(&mut self) {
        if self.refresh().await.is_err() {
            self.dispatch(ViewAction::MutationFailed(
                "Could not refresh the list".to_string(),
            ));
        }
    }
}
