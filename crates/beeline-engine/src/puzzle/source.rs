use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;

use crate::puzzle::session::PuzzleData;

/// What can go wrong at the generation boundary. Surfaces as a session-level
/// failure state, never as a panic in the tick loop.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to create new puzzle: {0}")]
    Generation(String),
}

/// The external puzzle generator, injected into the engine.
///
/// The engine is single-threaded and never moves these futures across
/// threads, so no `Send` bound is required.
#[allow(async_fn_in_trait)]
pub trait PuzzleSource {
    async fn generate(&self, day: u32) -> Result<PuzzleData, SourceError>;
}

/// Days elapsed since the Unix epoch for `now`.
pub fn epoch_day(now: SystemTime) -> u32 {
    let secs = now
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    (secs / (60 * 60 * 24)) as u32
}

/// Pick the day to load. Out-of-range selectors (negative or future days)
/// fall back to today.
pub fn resolve_day(requested: Option<i64>, today: u32) -> u32 {
    match requested {
        Some(day) if day >= 0 && day <= i64::from(today) => day as u32,
        Some(day) => {
            log::info!("ignoring bad day selector {day}, defaulting to today");
            today
        }
        None => today,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn epoch_day_counts_whole_days() {
        let now = UNIX_EPOCH + Duration::from_secs(3 * 86_400 + 7_200);
        assert_eq!(epoch_day(now), 3);
    }

    #[test]
    fn valid_day_is_taken_verbatim() {
        assert_eq!(resolve_day(Some(100), 200), 100);
        assert_eq!(resolve_day(Some(200), 200), 200);
    }

    #[test]
    fn bad_days_fall_back_to_today() {
        assert_eq!(resolve_day(Some(-1), 200), 200);
        assert_eq!(resolve_day(Some(201), 200), 200);
        assert_eq!(resolve_day(None, 200), 200);
    }
}
