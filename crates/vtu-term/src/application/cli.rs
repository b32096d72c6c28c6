use clap::Arg;
use clap::Command;

use crate::configuration::{Config, ConfigKey};

pub fn build() -> Command {
    return Command::new("vtu-term")
        .version(env!("CARGO_PKG_VERSION"))
        .about("VTU Connect terminal. Airtime, data, and grid power from a prompt.")
        .arg(
            Arg::new("config-file")
                .long("config-file")
                .env("VTU_TERM_CONFIG_FILE")
                .num_args(1)
                .help(format!(
                    "Path to a TOML configuration file [default: {}]",
                    Config::default(ConfigKey::ConfigFile)
                )),
        )
        .arg(
            Arg::new("backend-url")
                .long("backend-url")
                .env("VTU_TERM_BACKEND_URL")
                .num_args(1)
                .help(format!(
                    "Base URL of the VTU Connect backend API [default: {}]",
                    Config::default(ConfigKey::BackendUrl)
                )),
        )
        .arg(
            Arg::new("request-timeout")
                .long("request-timeout")
                .env("VTU_TERM_REQUEST_TIMEOUT")
                .num_args(1)
                .help(format!(
                    "Request timeout in milliseconds [default: {}]",
                    Config::default(ConfigKey::RequestTimeout)
                )),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .env("VTU_TERM_LOG_FILE")
                .num_args(1)
                .help("File JSON logs are appended to"),
        );
}
