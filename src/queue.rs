use std::time::Duration;

use redis::{
    aio::{ConnectionManager, ConnectionManagerConfig},
    AsyncCommands, Client, RedisError,
};
use rocket::{
    fairing::{Fairing, Info, Kind},
    Build, Rocket,
};
use serde::Deserialize;

use crate::{error::Error, model::vote::VoteEvent};

/// Name of the downstream list the tallying worker consumes.
pub const VOTE_LIST: &str = "votes";

/// Configuration for the downstream queue connection.
#[derive(Debug, Deserialize)]
pub struct QueueConfig {
    #[serde(default = "default_redis_host")]
    redis_host: String,
    #[serde(default = "default_redis_port")]
    redis_port: u16,
    /// Bound on connection and response times, in seconds.
    #[serde(default = "default_redis_timeout")]
    redis_timeout: u64,
}

fn default_redis_host() -> String {
    "redis".to_string()
}

fn default_redis_port() -> u16 {
    6379
}

fn default_redis_timeout() -> u64 {
    5
}

/// Handle on the downstream ordered list. The only operation this process
/// ever performs is appending a string-encoded vote event; the tallying
/// worker does all the reading.
pub enum VoteQueue {
    Redis(ConnectionManager),
    #[cfg(test)]
    Memory(std::sync::Mutex<Vec<String>>),
}

impl VoteQueue {
    /// Connect to the redis instance described by `config`. The manager is
    /// cheap to clone and multiplexes concurrent commands, so one connection
    /// serves every request.
    pub async fn connect(config: &QueueConfig) -> Result<Self, RedisError> {
        let timeout = Duration::from_secs(config.redis_timeout);
        let manager_config = ConnectionManagerConfig::new()
            .set_number_of_retries(1)
            .set_connection_timeout(timeout)
            .set_response_timeout(timeout);
        let client = Client::open(format!(
            "redis://{}:{}",
            config.redis_host, config.redis_port
        ))?;
        let manager = client
            .get_connection_manager_with_config(manager_config)
            .await?;
        Ok(Self::Redis(manager))
    }

    /// Append one event to the downstream list. All-or-nothing: on failure
    /// the caller reports a server error and nothing is buffered locally.
    pub async fn append(&self, event: &VoteEvent) -> Result<(), Error> {
        let payload = rocket::serde::json::serde_json::to_string(event)?;
        match self {
            Self::Redis(manager) => {
                let mut conn = manager.clone();
                conn.rpush::<_, _, ()>(VOTE_LIST, payload).await?;
            }
            #[cfg(test)]
            Self::Memory(list) => list.lock().unwrap().push(payload),
        }
        Ok(())
    }

    /// Snapshot of everything appended so far.
    #[cfg(test)]
    pub fn entries(&self) -> Vec<String> {
        match self {
            Self::Redis(_) => panic!("tests use the in-memory queue"),
            Self::Memory(list) => list.lock().unwrap().clone(),
        }
    }
}

/// Create the queue (production version): connect to redis.
#[cfg(not(test))]
async fn make_queue(config: &QueueConfig) -> Result<VoteQueue, RedisError> {
    VoteQueue::connect(config).await
}

/// Create the queue (test version): an in-memory list, so the suite needs no
/// live redis and can inspect what was appended.
#[cfg(test)]
async fn make_queue(_config: &QueueConfig) -> Result<VoteQueue, RedisError> {
    Ok(VoteQueue::Memory(std::sync::Mutex::new(Vec::new())))
}

/// A fairing that loads the queue config, connects to the downstream list
/// service, and places a [`VoteQueue`] into managed state.
pub struct QueueFairing;

#[rocket::async_trait]
impl Fairing for QueueFairing {
    fn info(&self) -> Info {
        Info {
            name: "Vote queue",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, mut rocket: Rocket<Build>) -> rocket::fairing::Result {
        // Load the config.
        let config = match rocket.figment().extract::<QueueConfig>() {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load queue config");
                rocket::config::pretty_print_error(e);
                return Err(rocket);
            }
        };
        info!(
            "Loaded queue config, connecting to {}:{}...",
            config.redis_host, config.redis_port
        );
        // Construct the connection.
        let queue = match make_queue(&config).await {
            Ok(queue) => queue,
            Err(e) => {
                error!("Failed to connect to the vote queue: {e}");
                return Err(rocket);
            }
        };
        info!("...queue connection online!");

        // Manage the state.
        rocket = rocket.manage(queue);
        Ok(rocket)
    }
}

#[cfg(test)]
mod tests {
    use crate::model::voter::VoterId;

    use super::*;

    #[rocket::async_test]
    async fn append_records_the_encoded_event() {
        let queue = VoteQueue::Memory(std::sync::Mutex::new(Vec::new()));
        let event = VoteEvent {
            voter_id: VoterId::from("deadbeefdeadbeef".to_string()),
            vote: "Cats".to_string(),
            timestamp: "14:05:09".to_string(),
        };

        queue.append(&event).await.unwrap();

        assert_eq!(
            vec![r#"{"voter_id":"deadbeefdeadbeef","vote":"Cats","timestamp":"14:05:09"}"#
                .to_string()],
            queue.entries()
        );
    }
}
