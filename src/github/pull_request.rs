use super::User;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PullRequestState {
    Open,
    Closed,
}

impl PullRequestState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PullRequestState::Open => "open",
            PullRequestState::Closed => "closed",
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct CommitRef {
    pub label: String,
    #[serde(rename = "ref")]
    pub git_ref: String,
    pub sha: String,
}

// Only the fields this crate reads; Github sends many more.
#[derive(Clone, Debug, Deserialize)]
pub struct PullRequest {
    pub url: String,
    pub id: u64,
    pub html_url: String,
    pub number: u64,
    pub state: PullRequestState,
    pub title: String,
    pub user: User,
    pub body: Option<String>,
    pub head: CommitRef,
    pub base: CommitRef,
    #[serde(default)]
    pub draft: bool,
}
