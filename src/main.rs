use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::net::SocketAddr;
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use seminar_registration::{
    config::AppConfig,
    create_app,
    domain::models::seminar::SEMINAR,
    infrastructure::{
        registration_repository::MySqlRegistrationRepository,
        sendgrid_email_sender::SendGridEmailSender,
    },
    usecase::submit_registration_usecase::SubmitRegistrationUsecase,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(e) = dotenvy::dotenv() {
        eprintln!(".env not loaded: {e}");
    }
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = AppConfig::load();

    let registration_repository =
        MySqlRegistrationRepository::new(connect_database(config.database_url.as_deref()).await);
    if registration_repository.is_available() {
        if let Err(e) = registration_repository.ensure_schema().await {
            warn!("Failed to prepare registrations table: {e}");
        }
    }
    let email_sender = SendGridEmailSender::new(config.sendgrid.clone());
    let register_service = SubmitRegistrationUsecase::new(
        registration_repository,
        email_sender,
        config.admin_email.clone(),
        SEMINAR,
    );

    let app = create_app(register_service);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    info!("Server running on {addr}");
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

/// Without a usable connection the store still runs, reporting itself unavailable
async fn connect_database(url: Option<&str>) -> Option<DatabaseConnection> {
    let Some(url) = url else {
        warn!("DATABASE_URL not set, registrations cannot be saved");
        return None;
    };

    let mut opt = ConnectOptions::new(url);
    opt.max_connections(10)
        .min_connections(1)
        .sqlx_logging(true);

    match Database::connect(opt).await {
        Ok(db) => Some(db),
        Err(e) => {
            warn!("Connection to DB failed: {e}");
            None
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install terminate handler: {e}");
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
