use std::process::Stdio;

use serde::{Deserialize, Serialize};
use tokio::process::Command;

use crate::error::LLMError;

const DEFAULT_COMMAND: &str = "espeak";

/// Voice settings handed to speech playback.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SpeechOptions {
    pub amplitude: u32,
    /// Pause between words, in units of 10 ms
    pub wordgap: u32,
    pub pitch: u32,
    /// Words per minute
    pub speed: u32,
}

impl Default for SpeechOptions {
    fn default() -> Self {
        Self {
            amplitude: 100,
            wordgap: 0,
            pitch: 50,
            speed: 175,
        }
    }
}

/// Text-to-speech playback. Calls return as soon as playback has started.
pub trait SpeechSynth: Send + Sync {
    fn speak(&self, text: &str, options: &SpeechOptions) -> Result<(), LLMError>;
}

/// Plays text through an eSpeak-compatible command line program.
#[derive(Debug, Clone)]
pub struct CommandSynth {
    program: String,
}

impl CommandSynth {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(text: &str, options: &SpeechOptions) -> Vec<String> {
        vec![
            "-a".to_string(),
            options.amplitude.to_string(),
            "-g".to_string(),
            options.wordgap.to_string(),
            "-p".to_string(),
            options.pitch.to_string(),
            "-s".to_string(),
            options.speed.to_string(),
            "--".to_string(),
            text.to_string(),
        ]
    }
}

impl Default for CommandSynth {
    fn default() -> Self {
        Self::new(DEFAULT_COMMAND)
    }
}

impl SpeechSynth for CommandSynth {
    /// Must be called from within a tokio runtime; the child is reaped by a
    /// background task.
    fn speak(&self, text: &str, options: &SpeechOptions) -> Result<(), LLMError> {
        let mut child = Command::new(&self.program)
            .args(Self::args(text, options))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|err| LLMError::SpeechError(format!("{}: {err}", self.program)))?;

        tokio::spawn(async move {
            match child.wait().await {
                Ok(status) if !status.success() => {
                    log::warn!("Speech playback exited with {status}");
                }
                Ok(_) => {}
                Err(err) => log::warn!("Speech playback failed: {err}"),
            }
        });
        Ok(())
    }
}
