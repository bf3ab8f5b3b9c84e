use super::MediaType;

/// Percentage of a series watched, for display only.
///
/// Zero unless both counters are present and positive. Capped at 100.
#[must_use]
pub fn progress(media_type: MediaType, episode: Option<u32>, total_episodes: Option<u32>) -> u8 {
    if media_type == MediaType::Movie {
        return 0;
    }

    match (episode, total_episodes) {
        (Some(ep), Some(total)) if ep > 0 && total > 0 => {
            let pct = (f64::from(ep) / f64::from(total) * 100.0).round();
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let pct = pct.min(100.0) as u8;
            pct
        }
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_way() {
        assert_eq!(progress(MediaType::Series, Some(5), Some(10)), 50);
    }

    #[test]
    fn rounds_to_nearest() {
        assert_eq!(progress(MediaType::Series, Some(1), Some(3)), 33);
        assert_eq!(progress(MediaType::Series, Some(2), Some(3)), 67);
    }

    #[test]
    fn capped_at_hundred() {
        assert_eq!(progress(MediaType::Series, Some(30), Some(12)), 100);
    }

    #[test]
    fn zero_when_counters_missing() {
        assert_eq!(progress(MediaType::Series, None, Some(10)), 0);
        assert_eq!(progress(MediaType::Series, Some(4), None), 0);
        assert_eq!(progress(MediaType::Series, Some(0), Some(10)), 0);
        assert_eq!(progress(MediaType::Series, Some(4), Some(0)), 0);
        assert_eq!(progress(MediaType::Movie, Some(1), Some(1)), 0);
    }

    #[test]
    fn monotonic_in_episode() {
        let total = 7;
        let mut last = 0;
        for ep in 0..=20 {
            let p = progress(MediaType::Series, Some(ep), Some(total));
            assert!(p >= last);
            assert!(p <= 100);
            last = p;
        }
    }
}
