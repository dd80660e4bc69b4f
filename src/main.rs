//! llm-tools-jira - manage Jira credentials and run the Jira tool from the shell.
//!
//! ```text
//! llm-tools-jira keys set jira-server https://example.atlassian.net
//! llm-tools-jira keys set jira-email  me@example.com
//! llm-tools-jira keys set jira-api-token  ******
//!
//! llm-tools-jira call Jira_create_issue --json '{"project_key": "ENG",
//!     "summary": "Fix login bug", "description": "Users cannot log in"}'
//! ```

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{error, info};

use llm_tools_jira::config::{CredentialOverrides, Settings};
use llm_tools_jira::error::{AppError, Result};
use llm_tools_jira::secrets::{ChainStore, EnvStore, KeyringStore, SecretStore};
use llm_tools_jira::{logging, register_tools, Jira, ToolCall, ToolDefinition, ToolRegistry};

#[derive(Parser)]
#[command(name = "llm-tools-jira", version, about = "Create Jira issues from LLM tool calls")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Manage stored credentials.
    Keys {
        #[command(subcommand)]
        action: KeysAction,
    },
    /// Print the tool manifest as JSON.
    Tools,
    /// Run a tool and print its result as JSON.
    Call {
        /// The tool name, e.g. Jira_create_issue.
        tool: String,
        /// Tool arguments as a JSON object.
        #[arg(long, default_value = "{}")]
        json: String,
        /// Call identifier to echo back in the result.
        #[arg(long)]
        id: Option<String>,
        /// Jira server URL (overrides the stored jira-server).
        #[arg(long)]
        server: Option<String>,
        /// Account email (overrides the stored jira-email).
        #[arg(long)]
        email: Option<String>,
        /// API token (overrides the stored jira-api-token).
        #[arg(long)]
        api_token: Option<String>,
    },
}

#[derive(Subcommand)]
enum KeysAction {
    /// Store a secret in the OS keyring.
    Set { name: String, value: String },
    /// Print a stored secret.
    Get { name: String },
    /// Remove a stored secret.
    Delete { name: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logging is best effort; the tool still works without a log file.
    if let Err(e) = logging::init() {
        eprintln!("warning: logging disabled: {}", e);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Command failed");
            eprintln!("error: {}", e.user_message());
            if let Some(action) = e.suggested_action() {
                eprintln!("hint: {}", action);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Keys { action } => run_keys(action),
        Command::Tools => {
            let tools: Vec<ToolDefinition> = Jira::manifest()
                .iter()
                .map(|method| method.definition(Jira::NAME))
                .collect();
            println!("{}", serde_json::to_string_pretty(&tools)?);
            Ok(())
        }
        Command::Call {
            tool,
            json,
            id,
            server,
            email,
            api_token,
        } => {
            let arguments: serde_json::Value = serde_json::from_str(&json)?;
            let overrides = CredentialOverrides {
                server,
                email,
                api_token,
            };

            let settings = Settings::load()?;
            let store = ChainStore::new().push(KeyringStore::new()).push(EnvStore);
            let jira = Jira::new(&overrides, &store, &settings)?;

            let mut registry = ToolRegistry::new();
            register_tools(&mut registry, jira)?;

            let mut call = ToolCall::new(tool, arguments);
            call.tool_call_id = id;

            let result = registry.call(call).await?;
            info!(tool = %result.name, output = %result.output, "Tool call finished");
            println!("{}", serde_json::to_string(&result)?);
            Ok(())
        }
    }
}

fn run_keys(action: KeysAction) -> Result<()> {
    let store = KeyringStore::new();
    match action {
        KeysAction::Set { name, value } => {
            store.set(&name, &value)?;
            info!(key = %name, "Stored secret");
        }
        KeysAction::Get { name } => match store.get(&name)? {
            Some(value) => println!("{}", value),
            None => return Err(AppError::other(format!("No value stored for '{}'", name))),
        },
        KeysAction::Delete { name } => {
            store.delete(&name)?;
            info!(key = %name, "Deleted secret");
        }
    }
    Ok(())
}
