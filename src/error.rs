use crate::{config::ConfigError, github::client};
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("github client error: {0}")]
    Client(#[from] client::Error),
    #[error("Error reopening pull request: {0}")]
    ReopenPullRequest(String),
}
