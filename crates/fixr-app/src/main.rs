mod cli;
mod commands;
mod render;
mod repl;

use std::path::Path;
use std::process::ExitCode;

use cli::Command;
use fixr_config::{dotenv, FixrConfig};
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::EnvFilter;

fn init_logging(directive: &str) {
    let directive: Directive = directive
        .parse()
        .unwrap_or_else(|_| LevelFilter::INFO.into());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    // Before config loading, so .env can supply FIXR_* overrides.
    let env_file = dotenv::load_dotenv(&dotenv::dotenv_candidates(Path::new(env!(
        "CARGO_MANIFEST_DIR"
    ))));

    let args = cli::parse();

    let loaded = match &args.config {
        Some(path) => fixr_config::load_config_from(path),
        None => fixr_config::load_config(),
    };

    let level = args
        .log_level
        .clone()
        .unwrap_or_else(|| match &loaded {
            Ok(config) => config.logging.level.as_directive().to_string(),
            Err(_) => "info".to_string(),
        });
    init_logging(&level);

    tracing::debug!("Fixr v{} starting", env!("CARGO_PKG_VERSION"));
    if let Some(path) = env_file {
        tracing::debug!("environment loaded from {}", path.display());
    }

    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        FixrConfig::default()
    });

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to create tokio runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = runtime.block_on(async {
        match args.command {
            Command::Chat => commands::chat(&config).await,
            Command::Analyze { image } => commands::analyze(&config, image).await,
            Command::Submit {
                description,
                category,
                urgency,
                location,
                image,
            } => {
                commands::submit(&config, &description, category, urgency, &location, image).await
            }
            Command::Register {
                name,
                email,
                password,
            } => commands::register(&config, &name, &email, &password).await,
            Command::Login { email, password } => {
                commands::login(&config, &email, &password).await
            }
            Command::Logout => commands::logout(),
            Command::Whoami => commands::whoami(),
            Command::Config => {
                println!("{}", fixr_config::config_to_json(&config));
                Ok(())
            }
        }
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
