pub mod logger;

use crate::{config::logger::LoggerConfig, controller, http};
use envconfig::Envconfig;

#[derive(Envconfig, Debug)]
pub struct Config {
    #[envconfig(nested)]
    pub api: http::config::Config,
    #[envconfig(nested)]
    pub controller: controller::config::Config,
    #[envconfig(nested)]
    pub logger: LoggerConfig,
}

pub fn load() -> Result<Config, envconfig::Error> {
    Config::init_from_env()
}
