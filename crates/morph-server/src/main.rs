use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use morph_dict::{DictionaryFile, LoadMode};
use morph_engine::SentenceMorpher;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

use morph_server::{AppState, DEFAULT_MAX_SENTENCE_LEN, router};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_DICT_PATH: &str = "dict.opcorpora.txt";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = load_config();
    info!("binding to {}:{}", config.host, config.port);
    info!(
        "using dictionary at {} (mode: {:?})",
        config.dict_path.display(),
        config.dict_mode
    );

    let start = Instant::now();
    let dict = DictionaryFile::load_with_mode(&config.dict_path, config.dict_mode)?;
    let morpher = SentenceMorpher::from_lines(dict.lines());
    drop(dict);
    info!("dictionary indexed in {} ms", start.elapsed().as_millis());

    if config.eager {
        let start = Instant::now();
        morpher.materialize_all();
        info!("forms materialized in {} ms", start.elapsed().as_millis());
    }

    let state = AppState {
        morpher: Arc::new(morpher),
        max_sentence_len: config.max_sentence_len,
    };

    let app = router(state).layer(TraceLayer::new_for_http());
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("invalid listen address")?;
    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;
    Ok(())
}

#[derive(Debug, Clone)]
struct Config {
    host: String,
    port: u16,
    dict_path: PathBuf,
    dict_mode: LoadMode,
    eager: bool,
    max_sentence_len: usize,
}

fn load_config() -> Config {
    let mut cli_dict_path: Option<PathBuf> = None;
    let mut cli_dict_mode: Option<LoadMode> = None;
    let mut eager = false;
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--eager" => eager = true,
            "--dict" => {
                if let Some(path) = args.next() {
                    cli_dict_path = Some(PathBuf::from(path));
                }
            }
            _ => {
                if let Some(path) = arg.strip_prefix("--dict=") {
                    cli_dict_path = Some(PathBuf::from(path));
                } else if let Some(mode) = arg.strip_prefix("--dict-mode=") {
                    cli_dict_mode = parse_load_mode(mode);
                }
            }
        }
    }

    let host = env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
    let port = env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT);
    let dict_path = cli_dict_path
        .or_else(|| env::var("DICT_PATH").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DICT_PATH));
    let dict_mode = cli_dict_mode
        .or_else(|| {
            env::var("DICT_LOAD_MODE")
                .ok()
                .as_deref()
                .and_then(parse_load_mode)
        })
        .unwrap_or(LoadMode::Mmap);
    let eager = eager || env::var("MORPH_EAGER").is_ok_and(|v| v == "1" || v == "true");
    let max_sentence_len = env::var("MAX_SENTENCE_LEN")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_MAX_SENTENCE_LEN);

    Config {
        host,
        port,
        dict_path,
        dict_mode,
        eager,
        max_sentence_len,
    }
}

fn parse_load_mode(raw: &str) -> Option<LoadMode> {
    match raw.to_ascii_lowercase().as_str() {
        "mmap" => Some(LoadMode::Mmap),
        "owned" => Some(LoadMode::Owned),
        _ => None,
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let max_level = env_filter
        .max_level_hint()
        .and_then(|hint| hint.into_level())
        .unwrap_or(Level::INFO);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true)
        .with_max_level(max_level)
        .init();
}
