use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use secrecy::SecretString;
use tokio::io::BufReader;

use webai::backends::huggingface::HuggingFace;
use webai::credentials::CredentialImporter;
use webai::render::TerminalRenderer;
use webai::session::{Session, SessionHandle, SessionWorker};
use webai::speech::{CommandSynth, LineTranscriptSource, TranscriptSource};

use crate::args::{CliArgs, SlashCommand};
use crate::config::{load_config, AppConfig, ConfigPaths};
use crate::logging::init_logging;

pub async fn run() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    let loaded = load_config(args.config.clone())?;
    let _logger = init_logging(&loaded.config.logging, &loaded.paths)?;
    let config = loaded.config;

    let api_key = resolve_api_key(&args, &config, &loaded.paths).await?;
    let provider = HuggingFace::with_config(
        api_key,
        args.model.clone().or_else(|| config.model.clone()),
        args.base_url.clone().or_else(|| config.base_url.clone()),
        None,
        config.timeout_seconds,
    )?;
    log::info!("Using model {}", provider.model());
    let model = provider.model().to_string();
    let mut session = Session::with_policy(Arc::new(provider), config.retry.clone());

    if let Some(prompt) = args.prompt.as_deref() {
        println!("{}", session.respond(prompt).await);
        return Ok(());
    }

    let mut worker = SessionWorker::new(session, Box::new(TerminalRenderer::stdout()));
    if config.speak && !args.no_speech {
        worker = worker.speaker(
            Box::new(CommandSynth::new(config.speech.command.clone())),
            config.speech.voice.clone(),
        );
    }
    let (handle, task) = SessionHandle::spawn(worker);

    println!("webai ({model}): type an utterance, /clear to reset, /quit to exit");
    let mut source = LineTranscriptSource::new(BufReader::new(tokio::io::stdin()));
    while let Some(transcript) = source.next_transcript().await? {
        match SlashCommand::parse(&transcript.text) {
            Some(SlashCommand::Quit) => break,
            Some(SlashCommand::Clear) => {
                handle.reset().await?;
                log::info!("Chat history cleared.");
            }
            None => {
                handle.submit(transcript).await?;
            }
        }
    }

    drop(handle);
    task.await.context("session worker panicked")?;
    Ok(())
}

async fn resolve_api_key(
    args: &CliArgs,
    config: &AppConfig,
    paths: &ConfigPaths,
) -> anyhow::Result<SecretString> {
    if let Some(paste_id) = args.import_key.as_deref() {
        let importer = CredentialImporter::new(reqwest::Client::new())
            .paste_base_url(config.import.paste_base_url.clone())
            .relay_prefix(config.import.relay_prefix.clone());
        let key = importer
            .import(paste_id)
            .await
            .context("failed to import API key, check the paste id")?;
        println!("API key imported successfully.");
        return Ok(key);
    }

    args.api_key
        .clone()
        .or_else(|| config.api_key.clone())
        .map(SecretString::new)
        .with_context(|| {
            format!(
                "no API key: pass --api-key, set HF_TOKEN, or add api_key to {}",
                paths.config_file.display()
            )
        })
}
