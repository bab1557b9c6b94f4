pub mod config;
mod error;
pub mod github;
pub mod logger;

pub use config::{Config, ConfigError, ConfigSource, Environment};
pub use error::{Error, Result};
pub use github::client::{ClientIdentity, RepositoryClient, ReqwestTransport, Response, Transport};
pub use logger::{LogFacade, Logger};
