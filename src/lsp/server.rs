use std::thread;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tokio::io::{stdin, stdout};
use tower_lsp::{LspService, Server};

use crate::config::{Args, Config, parse_log_level};
use crate::lsp::backend::Backend;

/// Start the LSP server on stdin/stdout
pub async fn serve() -> Result<()> {
    let args = Args::parse();

    // stdout carries the protocol; env_logger writes to stderr
    env_logger::Builder::new()
        .filter_level(parse_log_level(&args.log_level))
        .parse_default_env()
        .init();
    log::info!("Starting model-structure-ls {}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_args(args)?;

    // Under the integration test, exit shortly so the test can read stdout to EOF.
    if std::env::var("MODEL_STRUCTURE_LS_TEST_EXIT").as_deref() == Ok("1") {
        thread::spawn(|| {
            thread::sleep(Duration::from_secs(1));
            std::process::exit(0);
        });
    }

    let rule_config = config.rule;
    let (service, socket) = LspService::build(move |client| Backend::new(client, rule_config))
        .finish();

    Server::new(stdin(), stdout(), socket).serve(service).await;

    Ok(())
}
