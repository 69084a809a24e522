//! voxqueue HTTP Server
//!
//! Main entry point: loads configuration, starts the speech service and
//! serves the HTTP API until Ctrl+C or SIGTERM.

use std::{sync::Arc, time::Duration};

use application::SpeechService;
use infrastructure::{
    AppConfig, ConfigError, PlaylistMusicPlayer, build_synthesis_engine, init_tracing,
};
use presentation_http::{create_app, state::AppState};
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Invalid values abort startup; a missing or unreadable file falls back to defaults
    let (config, load_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e @ ConfigError::Load(_)) => (AppConfig::default(), Some(e)),
        Err(e) => return Err(e.into()),
    };

    init_tracing(&config.server)?;
    if let Some(e) = load_error {
        warn!("Failed to load config, using defaults: {}", e);
    }

    info!("🔊 voxqueue v{} starting...", env!("CARGO_PKG_VERSION"));
    info!(
        host = %config.server.host,
        port = %config.server.port,
        engine = %config.speech.engine,
        "Configuration loaded"
    );

    let engine = build_synthesis_engine(&config.speech);
    let music = Arc::new(PlaylistMusicPlayer::new(config.music.volume));
    let service = Arc::new(SpeechService::new(engine, music, config.server.port));

    if !config.music.playlist.is_empty() {
        match service
            .orchestrator()
            .load_music(config.music.playlist.clone())
        {
            Ok(tracks) => {
                info!(tracks, "Background playlist loaded");
                if config.music.autoplay {
                    service.orchestrator().play_music();
                }
            },
            Err(e) => warn!("Failed to load background playlist: {}", e),
        }
    }

    service.start();

    let app = create_app(AppState::new(Arc::clone(&service)), &config.server);

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr).await?;

    info!("🚀 Server listening on http://{}", addr);

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    service.stop();
    info!("👋 Server shutdown complete");

    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM) and handle graceful shutdown
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("📥 Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("📥 Received SIGTERM, initiating graceful shutdown...");
        }
    }

    info!("⏳ Waiting up to {:?} for connections to close...", timeout);

    // Give in-flight requests the grace period, then force the server down
    tokio::spawn(async move {
        tokio::time::sleep(timeout).await;
        warn!("Graceful shutdown timed out, exiting");
        std::process::exit(1);
    });
}
