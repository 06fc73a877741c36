use chrono::Local;
use serde::{Deserialize, Serialize};

use super::voter::VoterId;

/// 24-hour wall clock, second precision.
const TIMESTAMP_FORMAT: &str = "%H:%M:%S";

/// One submitted choice, as appended to the downstream list. Field order is
/// the wire order of the JSON record the tallying worker consumes; ownership
/// transfers to the queue on append and nothing is read back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteEvent {
    pub voter_id: VoterId,
    pub vote: String,
    pub timestamp: String,
}

impl VoteEvent {
    /// Build an event for `voter_id` choosing `vote`, stamped with the
    /// current wall-clock time.
    pub fn new(voter_id: VoterId, vote: String) -> Self {
        Self {
            voter_id,
            vote,
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rocket::serde::json::serde_json;

    use super::*;

    #[test]
    fn wire_format_matches_worker_contract() {
        let event = VoteEvent {
            voter_id: VoterId::from("deadbeefdeadbeef".to_string()),
            vote: "Cats".to_string(),
            timestamp: "14:05:09".to_string(),
        };

        assert_eq!(
            r#"{"voter_id":"deadbeefdeadbeef","vote":"Cats","timestamp":"14:05:09"}"#,
            serde_json::to_string(&event).unwrap()
        );
    }

    #[test]
    fn timestamp_is_second_precision() {
        let event = VoteEvent::new(VoterId::generate(), "Cats".to_string());

        let parts: Vec<_> = event.timestamp.split(':').collect();
        assert_eq!(3, parts.len());
        assert!(parts
            .iter()
            .all(|p| p.len() == 2 && p.chars().all(|c| c.is_ascii_digit())));
    }
}
