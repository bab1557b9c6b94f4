use log::{error, info};
use pullkit::{
    config::{OWNER, REPO},
    github::PullRequest,
    Config, ConfigSource, Error, LogFacade, RepositoryClient, ReqwestTransport,
};
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(StructOpt)]
struct Options {
    #[structopt(short, long, parse(from_os_str))]
    /// TOML file with TOKEN, OWNER, REPO and COLLABORATOR. Environment variables of the same name
    /// take precedence.
    config: Option<PathBuf>,

    #[structopt(subcommand)]
    command: Command,
}

#[derive(StructOpt)]
enum Command {
    /// Open a pull request
    Create {
        #[structopt(long)]
        head: String,
        #[structopt(long)]
        base: String,
        #[structopt(long)]
        title: String,
        #[structopt(long, default_value = "")]
        body: String,
    },

    /// Comment on a pull request
    Comment {
        number: u64,
        comment: String,
        #[structopt(long, default_value = "")]
        user: String,
        /// Token to act with when none is configured
        #[structopt(long)]
        token: Option<String>,
    },

    /// Submit a review requesting changes
    RequestChanges {
        number: u64,
        comment: String,
        #[structopt(long, default_value = "")]
        user: String,
        /// Token to act with when none is configured
        #[structopt(long)]
        token: Option<String>,
    },

    /// Approve a pull request
    Approve { number: u64 },

    /// Close a pull request
    Close { number: u64 },

    /// Reopen a closed pull request
    Reopen { number: u64 },

    /// List open pull requests
    List {
        #[structopt(long)]
        owner: Option<String>,
        #[structopt(long)]
        repo: Option<String>,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<Config, Error> {
    let file = match path {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    Ok(file.merge(Config::from_env()))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let opts = Options::from_args();

    // set up logging, allowing info level logging by default
    env_logger::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config(opts.config.as_ref())?;
    let transport = ReqwestTransport::new()?;
    let client = RepositoryClient::from_config(&config, transport, LogFacade);

    match opts.command {
        Command::Create {
            head,
            base,
            title,
            body,
        } => {
            client.create_pull_request(&head, &base, &title, &body).await;
        }
        Command::Comment {
            number,
            comment,
            user,
            token,
        } => {
            client
                .comment_on_pull_request(number, &comment, &user, token.as_deref())
                .await;
        }
        Command::RequestChanges {
            number,
            comment,
            user,
            token,
        } => {
            client
                .request_changes_on_pull_request(number, &comment, &user, token.as_deref())
                .await;
        }
        Command::Approve { number } => client.approve_pull_request(number).await,
        Command::Close { number } => {
            client.close_pull_request(number).await;
        }
        Command::Reopen { number } => {
            let response = client.reopen_pull_request(number).await?;
            info!("Pull request reopened: {}", response.status);
        }
        Command::List { owner, repo } => {
            let owner = owner.or_else(|| config.get(OWNER)).unwrap_or_default();
            let repo = repo.or_else(|| config.get(REPO)).unwrap_or_default();

            if let Some(data) = client.get_pull_requests(&owner, &repo).await {
                match serde_json::from_value::<Vec<PullRequest>>(data) {
                    Ok(pulls) => {
                        for pull in pulls {
                            println!(
                                "#{} {} ({}) {}",
                                pull.number,
                                pull.title,
                                pull.state.as_str(),
                                pull.html_url
                            );
                        }
                    }
                    Err(e) => error!("unexpected pull request listing: {}", e),
                }
            }
        }
    }

    Ok(())
}
