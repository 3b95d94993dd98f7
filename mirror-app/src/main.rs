use anyhow::{Context, Result};
use clap::Parser;
use mirror_app::cli::Cli;
use mirror_app::{build_state, router, serve};
use mirror_common::MirrorError;
use mirror_common::observability::{LogConfig, init_logging};
use mirror_config::MirrorConfigLoader;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_path = init_logging(LogConfig {
        emit_stderr: cli.log_stderr,
        format: cli.log_format(),
        ..LogConfig::default()
    })?;

    // Env wins over file, flags win over both
    let mut cfg = MirrorConfigLoader::new()
        .with_optional_file(&cli.config)
        .load()
        .with_context(|| format!("loading {}", cli.config.display()))?;
    cli.apply(&mut cfg);

    let state = build_state(&cfg)?;
    let pages = state.registry.len();
    let categories: Vec<String> = state
        .scraper
        .policy()
        .categories()
        .map(|c| c.to_string())
        .collect();
    let app = router(state, &cfg.server.static_dir);

    let addr = format!("{}:{}", cfg.server.bind, cfg.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| MirrorError::Server(format!("bind {addr}: {e}")))?;

    tracing::info!(
        %addr,
        pages,
        ?categories,
        log_file = %log_path.display(),
        "mirror.listening"
    );
    serve(listener, app).await
}
