#[path = "webai-cli/app.rs"]
mod app;
#[path = "webai-cli/args.rs"]
mod args;
#[path = "webai-cli/config/mod.rs"]
mod config;
#[path = "webai-cli/logging.rs"]
mod logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    app::run().await
}
