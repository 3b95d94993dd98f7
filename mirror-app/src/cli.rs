use clap::Parser;
use mirror_common::observability::LogFormat;
use mirror_config::MirrorConfig;
use std::path::PathBuf;

/// Mirror whitelisted link pages, keeping only conference, video and
/// document links.
#[derive(Debug, Parser)]
#[command(name = "balance-mirror", version, about)]
pub struct Cli {
    /// Configuration file (YAML/TOML/JSON). Missing files are ignored.
    #[arg(short, long, env = "MIRROR_CONFIG", default_value = "mirror.yaml")]
    pub config: PathBuf,

    /// Listen port; overrides `PORT` and `server.port`.
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Listen address; overrides `server.bind`.
    #[arg(long)]
    pub bind: Option<String>,

    /// Emit JSON logs.
    #[arg(long)]
    pub log_json: bool,

    /// Duplicate logs to stderr.
    #[arg(long)]
    pub log_stderr: bool,
}

impl Cli {
    /// Fold command-line overrides, then a numeric `PORT`, into a loaded
    /// configuration. `--port` wins over `PORT`.
    pub fn apply(&self, cfg: &mut MirrorConfig) {
        let env_port = std::env::var("PORT").ok();
        if let Some(port) = self.port.or_else(|| port_from_env(env_port.as_deref())) {
            cfg.server.port = port;
        }
        if let Some(bind) = &self.bind {
            cfg.server.bind = bind.clone();
        }
    }

    pub fn log_format(&self) -> LogFormat {
        if self.log_json {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }
}

/// `PORT` applies only when it parses as a port number.
fn port_from_env(raw: Option<&str>) -> Option<u16> {
    let raw = raw?.trim();
    match raw.parse() {
        Ok(port) => Some(port),
        Err(_) => {
            tracing::warn!(value = raw, "cli.port_env_ignored");
            None
        }
    }
}
