use serde::{Deserialize, Serialize};

use webai::credentials::DEFAULT_PASTE_BASE_URL;
use webai::session::RetryPolicy;
use webai::speech::SpeechOptions;

const DEFAULT_LOG_ROTATE_SIZE: u64 = 10 * 1024 * 1024;
const DEFAULT_LOG_ROTATE_KEEP: usize = 5;
const DEFAULT_SPEECH_COMMAND: &str = "espeak";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
    /// Read replies aloud
    pub speak: bool,
    pub retry: RetryPolicy,
    pub speech: SpeechConfig,
    pub import: ImportConfig,
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model: None,
            api_key: None,
            base_url: None,
            timeout_seconds: None,
            speak: true,
            retry: RetryPolicy::default(),
            speech: SpeechConfig::default(),
            import: ImportConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SpeechConfig {
    pub command: String,
    #[serde(flatten)]
    pub voice: SpeechOptions,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            command: DEFAULT_SPEECH_COMMAND.to_string(),
            voice: SpeechOptions::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ImportConfig {
    pub paste_base_url: String,
    pub relay_prefix: Option<String>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            paste_base_url: DEFAULT_PASTE_BASE_URL.to_string(),
            relay_prefix: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub path: Option<String>,
    pub rotate_size: u64,
    pub rotate_keep: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            path: None,
            rotate_size: DEFAULT_LOG_ROTATE_SIZE,
            rotate_keep: DEFAULT_LOG_ROTATE_KEEP,
        }
    }
}
