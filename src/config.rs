use rocket::{
    fairing::{Fairing, Info, Kind},
    Build, Rocket,
};
use serde::Deserialize;

/// Application configuration, derived from `Rocket.toml` and `ROCKET_*`
/// environment variables. This struct becomes managed state and can be
/// inspected by any endpoint.
#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default = "default_option_a")]
    option_a: String,
    #[serde(default = "default_option_b")]
    option_b: String,
    #[serde(default = "default_hostname")]
    hostname: String,
}

impl Config {
    /// Display label for the first option.
    pub fn option_a(&self) -> &str {
        &self.option_a
    }

    /// Display label for the second option.
    pub fn option_b(&self) -> &str {
        &self.option_b
    }

    /// Network name of the host serving this process, surfaced on the
    /// rendered page so voters can tell which replica answered.
    pub fn hostname(&self) -> &str {
        &self.hostname
    }
}

fn default_option_a() -> String {
    "Cats".to_string()
}

fn default_option_b() -> String {
    "Dogs".to_string()
}

/// Container runtimes export the machine's network name as `HOSTNAME`.
fn default_hostname() -> String {
    std::env::var("HOSTNAME").unwrap_or_else(|_| "unknown".to_string())
}

/// A fairing that loads the application config and puts it in managed state.
/// This could easily be achieved using `AdHoc::config`, but is written out
/// explicitly for symmetry with the other fairings and control over error
/// messages.
pub struct ConfigFairing;

#[rocket::async_trait]
impl Fairing for ConfigFairing {
    fn info(&self) -> Info {
        Info {
            name: "Config",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, mut rocket: Rocket<Build>) -> rocket::fairing::Result {
        // Load the config.
        let config = match rocket.figment().extract::<Config>() {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load application config");
                rocket::config::pretty_print_error(e);
                return Err(rocket);
            }
        };

        // Manage the state.
        rocket = rocket.manage(config);
        Ok(rocket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_default_to_cats_and_dogs() {
        let config: Config = rocket::build().figment().extract().unwrap();
        assert_eq!("Cats", config.option_a());
        assert_eq!("Dogs", config.option_b());
        assert!(!config.hostname().is_empty());
    }
}
