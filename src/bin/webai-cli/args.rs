use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "webai",
    about = "Voice assistant for a hosted chat model. Each line on stdin is one utterance."
)]
pub struct CliArgs {
    #[arg(long, short = 'm')]
    pub model: Option<String>,
    #[arg(long, env = "HF_TOKEN", hide_env_values = true)]
    pub api_key: Option<String>,
    #[arg(long)]
    pub base_url: Option<String>,
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,
    /// Do not read replies aloud
    #[arg(long)]
    pub no_speech: bool,
    /// Fetch the API key from a raw paste with this id
    #[arg(long, value_name = "PASTE_ID")]
    pub import_key: Option<String>,
    /// Answer a single utterance and exit
    #[arg(long)]
    pub prompt: Option<String>,
}

/// Interactive commands recognized instead of an utterance.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SlashCommand {
    Clear,
    Quit,
}

impl SlashCommand {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "/clear" => Some(Self::Clear),
            "/quit" | "/exit" => Some(Self::Quit),
            _ => None,
        }
    }
}
