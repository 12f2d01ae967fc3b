use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::error::LLMError;

/// One transcript delivered by speech capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    pub text: String,
    /// Interim transcripts may still change; only final ones are answered.
    pub is_final: bool,
}

impl Transcript {
    pub fn final_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_final: true,
        }
    }

    pub fn interim(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_final: false,
        }
    }
}

/// Producer of transcripts, typically a speech recognizer.
#[async_trait]
pub trait TranscriptSource: Send {
    /// Next transcript, or `None` once capture has ended.
    async fn next_transcript(&mut self) -> Result<Option<Transcript>, LLMError>;
}

/// Treats every non-blank line of a reader as one finished utterance.
pub struct LineTranscriptSource<R> {
    lines: Lines<R>,
}

impl<R> LineTranscriptSource<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }
}

#[async_trait]
impl<R> TranscriptSource for LineTranscriptSource<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    async fn next_transcript(&mut self) -> Result<Option<Transcript>, LLMError> {
        loop {
            let line = self
                .lines
                .next_line()
                .await
                .map_err(|err| LLMError::SpeechError(err.to_string()))?;
            match line {
                None => return Ok(None),
                Some(line) if line.trim().is_empty() => continue,
                Some(line) => return Ok(Some(Transcript::final_text(line.trim()))),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::BufReader;

    use super::*;

    #[tokio::test]
    async fn lines_become_final_transcripts() {
        let input: &[u8] = b"what is the time\n\n   \n  tell me a joke  \n";
        let mut source = LineTranscriptSource::new(BufReader::new(input));

        assert_eq!(
            source.next_transcript().await.expect("read"),
            Some(Transcript::final_text("what is the time"))
        );
        assert_eq!(
            source.next_transcript().await.expect("read"),
            Some(Transcript::final_text("tell me a joke"))
        );
        assert_eq!(source.next_transcript().await.expect("read"), None);
    }

    #[test]
    fn interim_transcripts_are_not_final() {
        assert!(!Transcript::interim("what is").is_final);
        assert!(Transcript::final_text("what is the time").is_final);
    }
}
