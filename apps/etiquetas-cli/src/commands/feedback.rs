//! # Feedback Commands
//!
//! Star-style rating of the tool, appended to `calificaciones.csv`.

use etiquetas_core::Rating;
use etiquetas_store::AppendOutcome;
use serde::Serialize;
use tracing::debug;

use crate::state::LogState;

/// Shown after a rating is stored.
pub const RATING_SENT_MESSAGE: &str = "Calificación enviada exitosamente!";

/// What the user sees after rating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingReceipt {
    pub rating: Rating,
    /// Present only when the row was written.
    pub message: Option<String>,
}

/// Records a rating.
///
/// A write that fails twice is dropped without an error; the receipt then
/// carries no message.
pub fn submit_rating(logs: &LogState, rating: Rating) -> RatingReceipt {
    debug!(rating = %rating, "submit_rating command");

    let message = match logs.record_rating(rating) {
        AppendOutcome::Written => Some(RATING_SENT_MESSAGE.to_string()),
        AppendOutcome::Dropped => None,
    };

    RatingReceipt { rating, message }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_rating_is_recorded_with_message() {
        let dir = tempfile::tempdir().unwrap();
        let logs = LogState::open_in(dir.path(), Duration::ZERO).unwrap();

        let receipt = submit_rating(&logs, Rating::Excellent);
        assert_eq!(receipt.message.as_deref(), Some(RATING_SENT_MESSAGE));

        let rows = logs.ratings().read_all().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].field, "Excelente");
    }

    #[test]
    fn test_dropped_rating_has_no_message() {
        let dir = tempfile::tempdir().unwrap();
        let logs = LogState::open_in(dir.path(), Duration::ZERO).unwrap();

        // replace the log with a directory so both attempts fail
        std::fs::remove_file(logs.ratings().path()).unwrap();
        std::fs::create_dir(logs.ratings().path()).unwrap();

        let receipt = submit_rating(&logs, Rating::Poor);
        assert_eq!(receipt.rating, Rating::Poor);
        assert_eq!(receipt.message, None);
    }

    #[test]
    fn test_receipt_serialization() {
        let receipt = RatingReceipt {
            rating: Rating::VeryPoor,
            message: None,
        };
        let json = serde_json::to_string(&receipt).unwrap();
        assert_eq!(json, r#"{"rating":"Muy mala","message":null}"#);
    }
}
