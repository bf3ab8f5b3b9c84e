//! Effective status inference from episode counters.

use super::{MediaType, WatchStatus};

/// Derives the status to persist for a record.
///
/// An explicit `Dropped` always wins. For a series with a known episode
/// total, a partial count means `Watching` and a full count means
/// `Completed`. Anything else (movies, unknown totals, a count past the
/// total) keeps the submitted status. Absent counters count as zero.
#[must_use]
pub fn infer_status(
    media_type: MediaType,
    submitted: WatchStatus,
    episode: Option<u32>,
    total_episodes: Option<u32>,
) -> WatchStatus {
    if submitted == WatchStatus::Dropped || media_type == MediaType::Movie {
        return submitted;
    }

    let episode = episode.unwrap_or(0);
    let total = total_episodes.unwrap_or(0);

    match total {
        0 => submitted,
        t if episode < t => WatchStatus::Watching,
        t if episode == t => WatchStatus::Completed,
        _ => submitted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SERIES: MediaType = MediaType::Series;

    #[test]
    fn partial_progress_is_watching_even_if_marked_completed() {
        let status = infer_status(SERIES, WatchStatus::Completed, Some(5), Some(10));
        assert_eq!(status, WatchStatus::Watching);
    }

    #[test]
    fn full_progress_is_completed() {
        let status = infer_status(SERIES, WatchStatus::Watching, Some(10), Some(10));
        assert_eq!(status, WatchStatus::Completed);
    }

    #[test]
    fn dropped_is_never_overridden() {
        for (ep, total) in [(Some(1), Some(10)), (Some(10), Some(10)), (None, None)] {
            assert_eq!(
                infer_status(SERIES, WatchStatus::Dropped, ep, total),
                WatchStatus::Dropped
            );
        }
    }

    #[test]
    fn unknown_total_keeps_submitted_status() {
        assert_eq!(
            infer_status(SERIES, WatchStatus::Completed, Some(3), None),
            WatchStatus::Completed
        );
        assert_eq!(
            infer_status(SERIES, WatchStatus::Watching, None, Some(0)),
            WatchStatus::Watching
        );
    }

    #[test]
    fn missing_episode_counts_as_zero() {
        assert_eq!(
            infer_status(SERIES, WatchStatus::Completed, None, Some(12)),
            WatchStatus::Watching
        );
    }

    #[test]
    fn episode_past_total_falls_through() {
        assert_eq!(
            infer_status(SERIES, WatchStatus::Completed, Some(13), Some(12)),
            WatchStatus::Completed
        );
    }

    #[test]
    fn movies_ignore_counters() {
        assert_eq!(
            infer_status(MediaType::Movie, WatchStatus::Completed, Some(1), Some(2)),
            WatchStatus::Completed
        );
    }

    #[test]
    fn inference_is_idempotent() {
        for status in WatchStatus::ALL {
            for (ep, total) in [(Some(0), Some(4)), (Some(4), Some(4)), (Some(9), Some(4))] {
                let once = infer_status(SERIES, status, ep, total);
                assert_eq!(infer_status(SERIES, once, ep, total), once);
            }
        }
    }
}
