#[macro_use]
extern crate rocket;

#[macro_use]
extern crate log;

use rocket::{Build, Rocket};

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod queue;

use crate::{config::ConfigFairing, logging::LoggerFairing, queue::QueueFairing};

/// Assemble the server: the single ballot route plus the config, queue and
/// logger fairings. The caller ignites and launches.
pub fn build() -> Rocket<Build> {
    rocket::build()
        .mount("/", api::routes())
        .attach(ConfigFairing)
        .attach(QueueFairing)
        .attach(LoggerFairing)
}

#[cfg(test)]
async fn client() -> rocket::local::asynchronous::Client {
    rocket::local::asynchronous::Client::tracked(build())
        .await
        .unwrap()
}
