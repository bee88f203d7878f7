use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Session used when none is given; matches a single private chat.
pub const DEFAULT_SESSION: &str = "wxid";

#[derive(Parser)]
#[command(name = "chatrelay")]
#[command(version, about = "ChatRelay - session-keyed chat relay for OpenAI-compatible APIs")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file path (defaults to ~/.config/chatrelay/config.toml)
    #[arg(long, global = true, env = "CHATRELAY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Interactive chat loop (default)
    Chat(ChatArgs),

    /// Ask a single question and exit
    Ask(AskArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ChatArgs {
    /// Conversation id; each id keeps its own history
    #[arg(short, long, default_value = DEFAULT_SESSION)]
    pub session: String,
}

impl Default for ChatArgs {
    fn default() -> Self {
        Self {
            session: DEFAULT_SESSION.to_string(),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct AskArgs {
    /// Conversation id; each id keeps its own history
    #[arg(short, long, default_value = DEFAULT_SESSION)]
    pub session: String,

    /// Question text (may contain a #CMD#name#param# command)
    #[arg(required = true, num_args = 1..)]
    pub question: Vec<String>,
}
