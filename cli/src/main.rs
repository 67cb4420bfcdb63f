use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use parley::api::SessionState;
use parley::config::ConfigError;
use parley::net::notify::Navigator;
use parley::session::token::FileTokenStore;
use parley::types::{AuthResponse, SaveConversation};
use parley::{Api, ApiError, ClientConfig};
use serde_json::Value;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;


#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("--options must be a JSON array")]
    OptionsNotArray,
}

#[derive(Parser, Debug)]
#[command(name = "parley-cli", about = "Parley API command-line client")]
struct Cli {
    /// Overrides `PARLEY_API_BASE_URL`.
    #[arg(long)]
    base_url: Option<String>,

    /// Overrides `PARLEY_REQUEST_TIMEOUT_MS`.
    #[arg(long)]
    timeout_ms: Option<u64>,

    #[arg(long, env = "PARLEY_TOKEN_FILE", default_value = ".parley/token")]
    token_file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Ping,
    Signup(CredentialArgs),
    Login(CredentialArgs),
    Logout,
    Status,
    Conversations(ConversationsCommand),
    Ask { conversation_id: String },
}

#[derive(Args, Debug)]
struct CredentialArgs {
    #[arg(long)]
    email: String,

    #[arg(long, env = "PARLEY_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Args, Debug)]
struct ConversationsCommand {
    #[command(subcommand)]
    command: ConversationsSubcommand,
}

#[derive(Subcommand, Debug)]
enum ConversationsSubcommand {
    List,
    Save(SaveArgs),
}

#[derive(Args, Debug)]
struct SaveArgs {
    /// Generated when omitted.
    #[arg(long)]
    conversation_id: Option<String>,

    #[arg(long)]
    transcript: String,

    #[arg(long, default_value = "")]
    ai_response: String,

    #[arg(long, default_value = "[]", help = "JSON array of nuanced reply options")]
    options: String,
}

/// There is no page to navigate to; tell the user how to get back in.
struct LoginHint;

impl Navigator for LoginHint {
    fn navigate_to(&self, route: &str) {
        tracing::debug!(route, "login required");
        eprintln!("run `parley-cli login --email <email>` to sign in again");
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = client_config(cli.base_url.as_deref(), cli.timeout_ms)?;
    let api = Api::builder(config)
        .token_store(Rc::new(FileTokenStore::new(&cli.token_file)))
        .navigator(Rc::new(LoginHint))
        .build()?;

    match cli.command {
        Command::Ping => print_json(&api.ping().await?),
        Command::Signup(args) => {
            let resp = api.signup(&args.email, &args.password).await?;
            print_json(&auth_summary(&resp))
        }
        Command::Login(args) => {
            let resp = api.login(&args.email, &args.password).await?;
            print_json(&auth_summary(&resp))
        }
        Command::Logout => {
            api.sign_out();
            println!("signed out");
            Ok(())
        }
        Command::Status => {
            println!("{}", session_label(api.session_state()));
            Ok(())
        }
        Command::Conversations(conversations) => run_conversations(&api, conversations).await,
        Command::Ask { conversation_id } => print_json(&api.ask_ai(&conversation_id).await?),
    }
}

async fn run_conversations(api: &Api, conversations: ConversationsCommand) -> Result<(), CliError> {
    match conversations.command {
        ConversationsSubcommand::List => print_json(&api.get_conversations().await?),
        ConversationsSubcommand::Save(args) => {
            let conversation = SaveConversation {
                conversation_id: args.conversation_id.unwrap_or_else(|| Uuid::new_v4().to_string()),
                transcript: args.transcript,
                ai_response: args.ai_response,
                nuanced_options: parse_options(&args.options)?,
            };
            print_json(&api.save_conversation(&conversation).await?)
        }
    }
}

fn client_config(base_url: Option<&str>, timeout_ms: Option<u64>) -> Result<ClientConfig, ConfigError> {
    let mut config = ClientConfig::from_env()?;
    if let Some(base_url) = base_url {
        config = config.with_base_url(base_url);
    }
    if let Some(timeout_ms) = timeout_ms {
        config = config.with_timeout(Duration::from_millis(timeout_ms));
    }
    Ok(config)
}

fn parse_options(raw: &str) -> Result<Vec<Value>, CliError> {
    match serde_json::from_str::<Value>(raw)? {
        Value::Array(options) => Ok(options),
        _ => Err(CliError::OptionsNotArray),
    }
}

/// Login/signup output without the raw token.
fn auth_summary(resp: &AuthResponse) -> Value {
    serde_json::json!({
        "authenticated": resp.issued_token().is_some(),
        "user": resp.user,
    })
}

fn session_label(state: SessionState) -> &'static str {
    match state {
        SessionState::Authenticated => "authenticated",
        SessionState::Unauthenticated => "unauthenticated",
    }
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
