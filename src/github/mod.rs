//! Client and types for the pull request parts of Github's v3 API
//! https://developer.github.com/v3/pulls/

pub mod client;
mod pull_request;
mod user;

pub use pull_request::*;
pub use user::*;
