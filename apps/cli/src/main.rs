mod args;
mod config;
mod dirs;
mod logging;
mod scheduler;

use std::io;
use std::path::Path;

use app_api::AppContext;
use blood_app::{AppConfig, AppPaths, AppState, ensure_app_data_dir, migrate_legacy_storage};
use blood_core::RollSource;
use http_api::{HttpState, Notifier, generate_api_token, parse_public_key};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging();

    let args = args::parse_args().map_err(|err| {
        eprintln!("{err}");
        args::print_help();
        io::Error::new(io::ErrorKind::InvalidInput, "invalid arguments")
    })?;

    if args.print_commands {
        println!(
            "{}",
            serde_json::to_string_pretty(&app_api::command_definitions())?
        );
        return Ok(());
    }

    let load = config::load_or_create(args.config).map_err(io::Error::other)?;
    if load.created {
        println!("Created config at {}.", load.file.display());
    }
    let mut config = load.config;
    config
        .apply_env(|key| std::env::var(key).ok())
        .map_err(io::Error::other)?;
    config.validate().map_err(io::Error::other)?;
    let port = args.port.unwrap_or(config.port);

    // An explicit DB_PATH is used as-is; otherwise adopt the legacy file once.
    let (paths, legacy_db) = match config.db_path.clone() {
        Some(db_path) => (AppPaths::from_db_path(db_path), None),
        None => {
            let data_dir = match config.data_dir.clone() {
                Some(dir) => dir,
                None => dirs::resolve_data_dir().map_err(io::Error::other)?,
            };
            (AppPaths::new(data_dir), Some(Path::new(dirs::LEGACY_DB_PATH)))
        }
    };
    ensure_app_data_dir(&paths).map_err(|err| io::Error::other(err.to_string()))?;
    let legacy_backup_dir = match legacy_db {
        Some(legacy_db) => migrate_legacy_storage(&paths, legacy_db)
            .map_err(|err| io::Error::other(err.to_string()))?,
        None => None,
    };
    if let Some(backup) = &legacy_backup_dir {
        info!(backup = %backup.display(), "imported legacy database");
    }
    println!("Using database: {}", paths.db_path.display());

    let app_config = AppConfig::new(
        paths.db_path.clone(),
        RollSource::new(config.roll_bot_id.clone(), config.blood_channel_id.clone()),
    )
    .with_cap(config.cap);
    let app_state = AppState::new(app_config);
    let record = app_state
        .setup_db()
        .map_err(|err| io::Error::other(format!("failed to initialize database: {}", err)))?;
    info!(level = record.level, cap = config.cap, "blood ledger ready");

    let notifier = config.webhook_url.clone().map(Notifier::new);
    let _scheduler = scheduler::spawn_monthly_reset(app_state.clone(), notifier.clone());

    let context = AppContext {
        app_state,
        app_data_dir: paths.app_data_dir,
        legacy_backup_dir,
    };

    let api_token = match config.api_token.clone() {
        Some(token) => token,
        None => {
            let token = generate_api_token();
            println!("No api_token configured; using {token} for this run.");
            token
        }
    };
    let discord_key = config
        .discord_public_key
        .as_deref()
        .map(parse_public_key)
        .transpose()
        .map_err(io::Error::other)?;
    if discord_key.is_none() {
        info!("no discord_public_key configured; /interactions requires the API token");
    }
    let state = HttpState::new(context, api_token)
        .with_notifier(notifier)
        .with_discord_key(discord_key);
    let router = http_api::router(state);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), port)).await?;
    let addr = listener.local_addr()?;
    info!(%addr, "HTTP server listening");
    println!("Bloodkeeper is running at http://{addr}");
    println!("Press Ctrl+C to stop.");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutting down");
}
