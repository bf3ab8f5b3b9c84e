//! Client view state as a value, advanced by reducer transitions.

use chrono::NaiveDate;

use super::filter::{self, Choice, DateRange, FilterState, ViewMode};
use super::insights::Insights;
use crate::domain::{MediaType, Rating, RecordId, WatchStatus};
use crate::models::{RecordForm, WatchRecord};

/// An open entry form and the record it edits, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub form: RecordForm,
    pub editing: Option<RecordId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    pub records: Vec<WatchRecord>,
    pub search: String,
    pub filters: FilterState,
    pub form: Option<FormState>,
    /// Blocking message for the user after a failed mutation.
    pub notice: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewAction {
    SetSearch(String),
    SetViewMode(ViewMode),
    SetDateRange(DateRange),
    SetYear(Choice<i32>),
    SetMediaType(Choice<MediaType>),
    SetRating(Choice<Rating>),
    SetStatus(Choice<WatchStatus>),
    ClearFilters,
    OpenNewForm { today: NaiveDate },
    OpenEditForm(WatchRecord),
    UpdateForm(RecordForm),
    CloseForm,
    RecordsLoaded(Vec<WatchRecord>),
    MutationFailed(String),
    DismissNotice,
}

impl ViewState {
    /// Produces the next state. Nothing outside the returned value changes.
    #[must_use]
    pub fn apply(self, action: ViewAction) -> Self {
        match action {
            ViewAction::SetSearch(search) => Self { search, ..self },
            ViewAction::SetViewMode(view_mode) => {
                self.with_filters(|f| FilterState { view_mode, ..f })
            }
            ViewAction::SetDateRange(date_range) => {
                self.with_filters(|f| FilterState { date_range, ..f })
            }
            ViewAction::SetYear(year) => self.with_filters(|f| FilterState { year, ..f }),
            ViewAction::SetMediaType(media_type) => {
                self.with_filters(|f| FilterState { media_type, ..f })
            }
            ViewAction::SetRating(rating) => self.with_filters(|f| FilterState { rating, ..f }),
            ViewAction::SetStatus(status) => self.with_filters(|f| FilterState { status, ..f }),
            ViewAction::ClearFilters => self.with_filters(FilterState::clear_field_filters),
            ViewAction::OpenNewForm { today } => Self {
                form: Some(FormState {
                    form: RecordForm::new(today),
                    editing: None,
                }),
                ..self
            },
            ViewAction::OpenEditForm(record) => Self {
                form: Some(FormState {
                    form: RecordForm::from_record(&record),
                    editing: Some(record.id),
                }),
                ..self
            },
            ViewAction::UpdateForm(form) => {
                let editing = self.form.as_ref().and_then(|f| f.editing);
                Self {
                    form: Some(FormState { form, editing }),
                    ..self
                }
            }
            ViewAction::CloseForm => Self { form: None, ..self },
            ViewAction::RecordsLoaded(records) => Self { records, ..self },
            ViewAction::MutationFailed(message) => Self {
                notice: Some(message),
                ..self
            },
            ViewAction::DismissNotice => Self {
                notice: None,
                ..self
            },
        }
    }

    fn with_filters(self, change: impl FnOnce(FilterState) -> FilterState) -> Self {
        Self {
            filters: change(self.filters),
            ..self
        }
    }

    #[must_use]
    pub fn visible(&self, today: NaiveDate) -> Vec<&WatchRecord> {
        filter::apply(&self.records, &self.filters, today)
    }

    #[must_use]
    pub fn insights(&self, today: NaiveDate) -> Insights {
        Insights::from_records(self.visible(today))
    }

    #[must_use]
    pub fn available_years(&self) -> Vec<i32> {
        filter::available_years(&self.records)
    }

    #[must_use]
    pub fn find(&self, id: RecordId) -> Option<&WatchRecord> {
        self.records.iter().find(|r| r.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 14).unwrap()
    }

    fn record(id: i32, media_type: MediaType, status: WatchStatus) -> WatchRecord {
        WatchRecord {
            id: RecordId::new(id),
            title: format!("Entry {id}"),
            media_type,
            release_year: Some(2000 + id),
            rating: Rating::GoForIt,
            status,
            date_watched: today(),
            is_rewatch: false,
            season: None,
            episode: None,
            total_episodes: None,
            notes: None,
        }
    }

    fn loaded() -> ViewState {
        ViewState::default().apply(ViewAction::RecordsLoaded(vec![
            record(1, MediaType::Movie, WatchStatus::Completed),
            record(2, MediaType::Series, WatchStatus::Watching),
            record(3, MediaType::Series, WatchStatus::Dropped),
        ]))
    }

    #[test]
    fn transitions_leave_the_previous_value_untouched() {
        let before = loaded();
        let after = before
            .clone()
            .apply(ViewAction::SetViewMode(ViewMode::Ongoing));

        assert_eq!(before.filters.view_mode, ViewMode::All);
        assert_eq!(after.filters.view_mode, ViewMode::Ongoing);
        assert_eq!(after.records, before.records);
    }

    #[test]
    fn insights_follow_the_visible_subset() {
        let state = loaded();
        assert_eq!(state.insights(today()).total, 3);

        let state = state.apply(ViewAction::SetMediaType(Choice::Only(MediaType::Series)));
        let insights = state.insights(today());
        assert_eq!(insights.total, 2);
        assert_eq!(insights.movie_count, 0);
        assert_eq!(insights.series_count, 2);
    }

    #[test]
    fn clear_filters_resets_field_filters() {
        let state = loaded()
            .apply(ViewAction::SetRating(Choice::Only(Rating::Skip)))
            .apply(ViewAction::SetStatus(Choice::Only(WatchStatus::Dropped)));
        assert!(state.visible(today()).is_empty());

        let state = state.apply(ViewAction::ClearFilters);
        assert_eq!(state.visible(today()).len(), 3);
    }

    #[test]
    fn edit_form_tracks_the_record_id() {
        let state = loaded();
        let target = state.find(RecordId::new(2)).cloned().unwrap();
        let state = state.apply(ViewAction::OpenEditForm(target));

        let open = state.form.clone().unwrap();
        assert_eq!(open.editing, Some(RecordId::new(2)));

        let mut form = open.form;
        form.notes = "rewatching with friends".to_string();
        let state = state.apply(ViewAction::UpdateForm(form));
        let open = state.form.clone().unwrap();
        assert_eq!(open.editing, Some(RecordId::new(2)));
        assert_eq!(open.form.notes, "rewatching with friends");

        let state = state.apply(ViewAction::CloseForm);
        assert!(state.form.is_none());
    }

    #[test]
    fn notice_is_set_and_dismissed() {
        let state = loaded().apply(ViewAction::MutationFailed("Network Error".to_string()));
        assert_eq!(state.notice.as_deref(), Some("Network Error"));
        assert!(state.apply(ViewAction::DismissNotice).notice.is_none());
    }

    #[test]
    fn years_come_from_all_records_not_just_visible() {
        let state = loaded().apply(ViewAction::SetViewMode(ViewMode::Ongoing));
        assert_eq!(state.available_years(), vec![2003, 2002, 2001]);
    }
}
