use redis::RedisError;
use rocket::{http::Status, response::Responder, serde::json::serde_json};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to append to the vote queue: {0}")]
    Queue(#[from] RedisError),
    #[error("Failed to encode vote event: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("Unknown option: {0:?}")]
    UnknownOption(String),
}

impl<'r, 'o: 'r> Responder<'r, 'o> for Error {
    fn respond_to(self, _: &'r rocket::Request<'_>) -> rocket::response::Result<'o> {
        error!("{self}");
        Err(match self {
            Self::Queue(_) | Self::Encode(_) => Status::InternalServerError,
            Self::UnknownOption(_) => Status::UnprocessableEntity,
        })
    }
}
