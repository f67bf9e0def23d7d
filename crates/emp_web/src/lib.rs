//! HTTP boundary for the employee records application.
//!
//! Binds request parameters to `emp_core` forms, runs validation, calls the
//! employee service and returns JSON view models. Mutating routes answer
//! with a `303 See Other` redirect back to the list, like a classic
//! form-post flow.

use log::{info, warn};
use tokio::net::TcpListener;
use tokio::signal;

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod views;

use config::Config;
use emp_core::db::{open_db, DbError};
use state::AppState;

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("logging setup failed: {0}")]
    Logging(String),

    #[error("database setup failed: {0}")]
    Database(#[from] DbError),

    #[error("server i/o failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Starts the server and blocks until a shutdown signal arrives.
pub async fn start_server(config: Config) -> Result<(), StartupError> {
    let log_dir = config.log_dir.to_string_lossy().into_owned();
    emp_core::init_logging(&config.log_level, &log_dir).map_err(StartupError::Logging)?;

    info!(
        "event=server_start module=web status=start version={} db_path={}",
        emp_core::core_version(),
        config.db_path.display()
    );
    let conn = open_db(&config.db_path)?;
    let state = AppState::new(conn, &config);
    let app = routes::router(state);

    let address = config.address();
    let listener = TcpListener::bind(&address).await?;
    info!("event=server_start module=web status=ok address={address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("event=server_stop module=web status=ok");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("event=server_signal module=web status=error error={err}");
            std::future::pending::<()>().await;
        }
        info!("event=server_signal module=web status=ok signal=ctrl_c");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("event=server_signal module=web status=ok signal=terminate");
            }
            Err(err) => {
                warn!("event=server_signal module=web status=error error={err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
