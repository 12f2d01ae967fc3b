use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::{
    error::LLMError,
    render::TranscriptRenderer,
    speech::{SpeechOptions, SpeechSynth, Transcript},
};

use super::requester::Session;

const QUEUE_DEPTH: usize = 16;

/// Work accepted by the session worker, processed strictly in arrival order.
#[derive(Debug)]
pub enum Command {
    /// One transcript from speech capture. Interim transcripts are ignored.
    Utterance {
        transcript: Transcript,
        reply: oneshot::Sender<Option<String>>,
    },
    /// Clear the conversation and the rendered transcript together.
    Reset { done: oneshot::Sender<()> },
}

/// Everything the worker drives besides the session itself.
pub struct SessionWorker {
    session: Session,
    renderer: Box<dyn TranscriptRenderer>,
    synth: Option<Box<dyn SpeechSynth>>,
    speech: SpeechOptions,
}

impl SessionWorker {
    pub fn new(session: Session, renderer: Box<dyn TranscriptRenderer>) -> Self {
        Self {
            session,
            renderer,
            synth: None,
            speech: SpeechOptions::default(),
        }
    }

    /// Speak every reply through `synth` with `options`.
    pub fn speaker(mut self, synth: Box<dyn SpeechSynth>, options: SpeechOptions) -> Self {
        self.synth = Some(synth);
        self.speech = options;
        self
    }

    async fn handle(&mut self, command: Command) {
        match command {
            Command::Utterance { transcript, reply } => {
                let answer = self.handle_transcript(transcript).await;
                if reply.send(answer).is_err() {
                    log::debug!("Utterance submitter went away before the reply");
                }
            }
            Command::Reset { done } => {
                self.session.reset();
                self.renderer.clear();
                let _ = done.send(());
            }
        }
    }

    async fn handle_transcript(&mut self, transcript: Transcript) -> Option<String> {
        if !transcript.is_final {
            log::trace!("Skipping interim transcript: {}", transcript.text);
            return None;
        }
        log::info!("Final voice input: {}", transcript.text);

        let answer = self.session.respond(&transcript.text).await;
        log::info!("AI response: {answer}");

        self.renderer.render(&transcript.text, &answer);
        if let Some(synth) = &self.synth {
            if let Err(err) = synth.speak(&answer, &self.speech) {
                log::error!("Error with speech playback: {err}");
            }
        }
        Some(answer)
    }

    async fn run(mut self, mut commands: mpsc::Receiver<Command>) -> Session {
        while let Some(command) = commands.recv().await {
            self.handle(command).await;
        }
        self.session
    }
}

/// Cloneable front door to a single session worker task.
///
/// Every clone feeds the same queue, so overlapping submitters never
/// interleave their turns in the conversation.
#[derive(Clone, Debug)]
pub struct SessionHandle {
    sender: mpsc::Sender<Command>,
}

impl SessionHandle {
    /// Starts the worker. The join handle yields the session once every
    /// handle has been dropped.
    pub fn spawn(worker: SessionWorker) -> (Self, JoinHandle<Session>) {
        let (sender, receiver) = mpsc::channel(QUEUE_DEPTH);
        let task = tokio::spawn(worker.run(receiver));
        (Self { sender }, task)
    }

    /// Queues a transcript and waits for its reply. Interim transcripts
    /// resolve to `None`.
    pub async fn submit(&self, transcript: Transcript) -> Result<Option<String>, LLMError> {
        let (reply, answer) = oneshot::channel();
        self.send(Command::Utterance { transcript, reply }).await?;
        answer.await.map_err(|_| worker_gone())
    }

    /// Queues a reset behind any pending utterances and waits for it.
    pub async fn reset(&self) -> Result<(), LLMError> {
        let (done, finished) = oneshot::channel();
        self.send(Command::Reset { done }).await?;
        finished.await.map_err(|_| worker_gone())
    }

    async fn send(&self, command: Command) -> Result<(), LLMError> {
        self.sender.send(command).await.map_err(|_| worker_gone())
    }
}

fn worker_gone() -> LLMError {
    LLMError::Generic("session worker stopped".to_string())
}
