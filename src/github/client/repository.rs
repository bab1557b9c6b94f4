use super::{
    github_headers, ReqwestTransport, Request, Response, Result, Transport, DEFAULT_BASE_URL,
};
use crate::{
    config::{ConfigSource, BASE_URL, COLLABORATOR, OWNER, REPO, TOKEN},
    github::PullRequestState,
    logger::{LogFacade, Logger},
};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

/// Who the client acts as and which repository it acts on.
///
/// Nothing here is validated. A missing value only shows up once Github rejects the request built
/// from it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClientIdentity {
    token: Option<String>,
    owner: Option<String>,
    repository: Option<String>,
    collaborator: Option<String>,
}

impl ClientIdentity {
    pub fn new<S: Into<String>>(token: S, owner: S, repository: S) -> Self {
        Self {
            token: Some(token.into()),
            owner: Some(owner.into()),
            repository: Some(repository.into()),
            collaborator: None,
        }
    }

    pub fn from_source(source: &dyn ConfigSource) -> Self {
        Self {
            token: source.get(TOKEN),
            owner: source.get(OWNER),
            repository: source.get(REPO),
            collaborator: source.get(COLLABORATOR),
        }
    }

    #[cfg(test)]
    pub fn with_collaborator<S: Into<String>>(mut self, collaborator: S) -> Self {
        self.collaborator = Some(collaborator.into());
        self
    }

    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    pub fn repository(&self) -> Option<&str> {
        self.repository.as_deref()
    }

    /// Stored but not consulted by any operation.
    pub fn collaborator(&self) -> Option<&str> {
        self.collaborator.as_deref()
    }

    /// The stored token wins whenever it is non-empty; otherwise fall back to the caller's.
    fn token<'a>(&'a self, actor_token: Option<&'a str>) -> &'a str {
        match self.token.as_deref() {
            Some(token) if !token.is_empty() => token,
            _ => actor_token.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
struct NewPullRequest<'a> {
    title: &'a str,
    head: &'a str,
    base: &'a str,
    body: &'a str,
}

#[derive(Debug, Serialize)]
struct NewComment<'a> {
    body: &'a str,
    user: &'a str,
}

#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
enum ReviewEvent {
    Approve,
    RequestChanges,
}

#[derive(Debug, Serialize)]
struct NewReview<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<&'a str>,
    event: ReviewEvent,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct UpdateState {
    state: PullRequestState,
}

/// `RepositoryClient` drives the pull request workflow of a single repository.
///
/// Every operation is independent: nothing is cached and concurrent calls race exactly like the
/// underlying HTTP requests do. Failures are reported through the [`Logger`] and swallowed, with
/// the single exception of [`RepositoryClient::reopen_pull_request`], which hands the failure
/// back to the caller.
///
/// GitHub API docs: https://developer.github.com/v3/pulls/
pub struct RepositoryClient<T = ReqwestTransport, L = LogFacade> {
    identity: ClientIdentity,

    /// Base URL to use for API requests. Defaults to the public GitHub API,
    /// but can be overridden for use with GitHub Enterprise. Always
    /// terminated with a trailing slash.
    base_url: String,

    transport: T,
    logger: L,
}

impl<T: Transport, L: Logger> RepositoryClient<T, L> {
    pub fn new(identity: ClientIdentity, transport: T, logger: L) -> Self {
        Self {
            identity,
            base_url: DEFAULT_BASE_URL.to_owned(),
            transport,
            logger,
        }
    }

    /// Reads `TOKEN`, `OWNER`, `COLLABORATOR`, `REPO` and the optional `BASE_URL` from `source`.
    pub fn from_config(source: &dyn ConfigSource, transport: T, logger: L) -> Self {
        let client = Self::new(ClientIdentity::from_source(source), transport, logger);
        match source.get(BASE_URL) {
            Some(base_url) if !base_url.is_empty() => client.with_base_url(base_url),
            _ => client,
        }
    }

    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        self.base_url = base_url;
        self
    }

    pub fn identity(&self) -> &ClientIdentity {
        &self.identity
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn repo_path(&self) -> String {
        format!(
            "repos/{}/{}",
            self.identity.owner().unwrap_or_default(),
            self.identity.repository().unwrap_or_default()
        )
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        actor_token: Option<&str>,
        body: Option<&B>,
    ) -> Result<Response> {
        let headers = github_headers(self.identity.token(actor_token))?;
        let body = body.map(serde_json::to_value).transpose()?;
        let request = Request {
            url: format!("{}{}", self.base_url, path),
            method,
            headers,
            body,
        };

        self.transport.call(request).await
    }

    fn report_failure(&self, message: &str, error: &super::Error) {
        self.logger.error(message, &error.detail());
    }

    /// Create a pull request
    ///
    /// GitHub API docs: https://developer.github.com/v3/pulls/#create-a-pull-request
    pub async fn create_pull_request(
        &self,
        head: &str,
        base: &str,
        title: &str,
        body: &str,
    ) -> Option<Response> {
        let url = format!("{}/pulls", self.repo_path());
        self.logger
            .info("PR URL:", &format!("{}{}", self.base_url, url));

        let request = NewPullRequest {
            title,
            head,
            base,
            body,
        };

        match self.send(Method::POST, &url, None, Some(&request)).await {
            Ok(response) => {
                let html_url = response
                    .data
                    .get("html_url")
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                self.logger
                    .info("Pull request created successfully:", html_url);
                Some(response)
            }
            Err(e) => {
                self.report_failure("Error creating pull request:", &e);
                None
            }
        }
    }

    /// Comment on a pull request, optionally as another user
    ///
    /// GitHub API docs: https://developer.github.com/v3/issues/comments/#create-a-comment
    pub async fn comment_on_pull_request(
        &self,
        pull_number: u64,
        comment: &str,
        username: &str,
        token: Option<&str>,
    ) {
        let url = format!("{}/issues/{}/comments", self.repo_path(), pull_number);
        let request = NewComment {
            body: comment,
            user: username,
        };

        match self.send(Method::POST, &url, token, Some(&request)).await {
            Ok(response) => self
                .logger
                .info("Comment added successfully:", &response.data.to_string()),
            Err(e) => self.report_failure("Error adding comment:", &e),
        }
    }

    /// Submit a review requesting changes
    ///
    /// GitHub API docs: https://developer.github.com/v3/pulls/reviews/#create-a-pull-request-review
    pub async fn request_changes_on_pull_request(
        &self,
        pull_number: u64,
        comment: &str,
        username: &str,
        token: Option<&str>,
    ) {
        let url = format!("{}/pulls/{}/reviews", self.repo_path(), pull_number);
        let request = NewReview {
            body: Some(comment),
            event: ReviewEvent::RequestChanges,
            user: Some(username),
        };

        match self.send(Method::POST, &url, token, Some(&request)).await {
            Ok(response) => self
                .logger
                .info("Requested changes successfully:", &response.data.to_string()),
            Err(e) => self.report_failure("Error requesting changes:", &e),
        }
    }

    /// Submit an approving review
    ///
    /// GitHub API docs: https://developer.github.com/v3/pulls/reviews/#create-a-pull-request-review
    pub async fn approve_pull_request(&self, pull_number: u64) {
        let url = format!("{}/pulls/{}/reviews", self.repo_path(), pull_number);
        let request = NewReview {
            body: None,
            event: ReviewEvent::Approve,
            user: None,
        };

        match self.send(Method::POST, &url, None, Some(&request)).await {
            Ok(response) => self
                .logger
                .info("Pull request approved successfully:", &response.data.to_string()),
            Err(e) => self.report_failure("Error approving pull request:", &e),
        }
    }

    /// Close a pull request
    ///
    /// GitHub API docs: https://developer.github.com/v3/pulls/#update-a-pull-request
    pub async fn close_pull_request(&self, pull_number: u64) -> Option<Response> {
        let url = format!("{}/pulls/{}", self.repo_path(), pull_number);
        let request = UpdateState {
            state: PullRequestState::Closed,
        };

        match self.send(Method::PATCH, &url, None, Some(&request)).await {
            Ok(response) => {
                self.logger
                    .info("Pull request closed successfully:", &response.data.to_string());
                Some(response)
            }
            Err(e) => {
                self.report_failure("Error closing pull request:", &e);
                None
            }
        }
    }

    /// Reopen a closed pull request. Unlike the other operations a failure is returned, not
    /// logged.
    ///
    /// GitHub API docs: https://developer.github.com/v3/pulls/#update-a-pull-request
    pub async fn reopen_pull_request(&self, pull_number: u64) -> crate::Result<Response> {
        let url = format!("{}/pulls/{}", self.repo_path(), pull_number);
        let request = UpdateState {
            state: PullRequestState::Open,
        };

        self.send(Method::PATCH, &url, None, Some(&request))
            .await
            .map_err(|e| crate::Error::ReopenPullRequest(e.detail()))
    }

    /// List the open pull requests of any repository, not just the configured one. Only the first
    /// page is fetched.
    ///
    /// GitHub API docs: https://developer.github.com/v3/pulls/#list-pull-requests
    pub async fn get_pull_requests(&self, owner: &str, repo: &str) -> Option<Value> {
        let url = format!("repos/{}/{}/pulls", owner, repo);

        match self.send(Method::GET, &url, None, None::<&()>).await {
            Ok(response) => Some(response.into_data()),
            Err(e) => {
                self.report_failure("Error getting pull requests:", &e);
                None
            }
        }
    }
}
