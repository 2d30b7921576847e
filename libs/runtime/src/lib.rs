//! Process-level plumbing shared by the server binary: layered configuration,
//! logging setup, home directory resolution and shutdown signals.

pub mod config;
pub mod logging;
pub mod paths;
pub mod shutdown;

pub use config::{
    default_logging_config, AppConfig, CliArgs, DatabaseConfig, LoggingConfig, Section,
    ServerConfig, PORT_ENV,
};
pub use logging::init_logging_from_config;
pub use shutdown::wait_for_shutdown;
