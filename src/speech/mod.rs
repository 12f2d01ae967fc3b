//! Speech capture and playback collaborators.

mod capture;
mod synth;

pub use capture::{LineTranscriptSource, Transcript, TranscriptSource};
pub use synth::{CommandSynth, SpeechOptions, SpeechSynth};
