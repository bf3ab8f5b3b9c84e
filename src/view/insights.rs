use serde::Serialize;

use crate::domain::MediaType;
use crate::models::WatchRecord;

/// Summary counts shown above the record list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Insights {
    pub total: usize,
    pub movie_count: usize,
    pub series_count: usize,
}

impl Insights {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a WatchRecord>) -> Self {
        records
            .into_iter()
            .fold(Self::default(), |mut acc, record| {
                acc.total += 1;
                match record.media_type {
                    MediaType::Movie => acc.movie_count += 1,
                    MediaType::Series => acc.series_count += 1,
                }
                acc
            })
    }
}
