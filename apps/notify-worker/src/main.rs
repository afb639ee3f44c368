//! Notification worker service
//!
//! Background worker that consumes course update jobs from the Redis stream
//! and fans out email notifications to subscribers.
//!
//! ```text
//! Redis Stream (courses:updates)
//!   | (Consumer Group: notify_workers)
//! StreamWorker<CourseUpdateJob, CourseUpdateProcessor>
//!   | (resolves course, subscribers, recipients)
//! EmailProvider (SMTP)
//! ```

use axum::Router;
use axum_helpers::server::health_router;
use core_config::{Environment, FromEnv, app_info};
use database::postgres::PostgresConfig;
use database::redis::RedisConfig;
use domain_courses::{CourseRepository, PgCourseRepository};
use domain_subscriptions::{PgSubscriptionRepository, SubscriptionRepository};
use domain_users::{PgUserRepository, UserRepository};
use email::{CourseUpdateJob, CourseUpdateProcessor, CourseUpdateStream, EmailProvider, SmtpProvider};
use eyre::{Result, WrapErr};
use std::sync::Arc;
use stream_worker::{StreamWorker, WorkerConfig};
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::watch;
use tracing::{error, info};

/// Start the health HTTP server for liveness probes.
async fn start_health_server(app_info: core_config::AppInfo, port: u16) -> Result<()> {
    let app: Router = health_router(app_info);

    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr)
        .await
        .wrap_err_with(|| format!("Failed to bind health server to {}", addr))?;

    info!(port = %port, "Health server listening");

    axum::serve(listener, app)
        .await
        .wrap_err("Health server failed")?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    core_config::tracing::install_color_eyre();

    let environment = Environment::from_env();
    core_config::tracing::init_tracing(&environment);

    let app_info = app_info!();
    info!(name = %app_info.name, version = %app_info.version, "Starting notification worker");

    // Health server port. Do not fall back to PORT: that belongs to the API.
    let health_port: u16 = std::env::var("NOTIFY_WORKER_HEALTH_PORT")
        .or_else(|_| std::env::var("HEALTH_PORT"))
        .unwrap_or_else(|_| "8081".to_string())
        .parse()
        .unwrap_or(8081);

    let postgres_config =
        PostgresConfig::from_env().wrap_err("Failed to load PostgreSQL configuration")?;
    let redis_config = RedisConfig::from_env().wrap_err("Failed to load Redis configuration")?;

    let db = database::postgres::connect_from_config_with_retry(postgres_config, None)
        .await
        .wrap_err("Failed to connect to PostgreSQL")?;
    let redis = database::redis::connect_from_config_with_retry(redis_config, None)
        .await
        .wrap_err("Failed to connect to Redis")?;

    // Blocking reads are disabled because ConnectionManager multiplexes a
    // single connection and a blocking XREADGROUP would starve other commands.
    let worker_config = WorkerConfig::from_stream_def::<CourseUpdateStream>().with_blocking(None);
    info!(
        stream = %worker_config.stream_name,
        consumer_group = %worker_config.consumer_group,
        consumer_id = %worker_config.consumer_id,
        "Worker configuration loaded"
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    });

    tokio::spawn(async move {
        if let Err(e) = start_health_server(app_info, health_port).await {
            error!(error = %e, "Health server failed");
        }
    });

    let courses: Arc<dyn CourseRepository> = Arc::new(PgCourseRepository::new(db.clone()));
    let subscriptions: Arc<dyn SubscriptionRepository> =
        Arc::new(PgSubscriptionRepository::new(db.clone()));
    let users: Arc<dyn UserRepository> = Arc::new(PgUserRepository::new(db));

    // SMTP relay in production, Mailpit/MailHog locally
    let provider = match environment {
        Environment::Production => SmtpProvider::from_env()
            .wrap_err("SMTP configuration error. Ensure SMTP_HOST and EMAIL_FROM_ADDRESS are set.")?,
        Environment::Development => {
            SmtpProvider::mailhog().wrap_err("Failed to create local SMTP provider")?
        }
    };
    info!(provider = provider.name(), "Email provider initialized");

    let processor = CourseUpdateProcessor::new(courses, subscriptions, users, Arc::new(provider));
    let worker = StreamWorker::<CourseUpdateJob, _>::new(redis, processor, worker_config);

    worker
        .run(shutdown_rx)
        .await
        .map_err(|e| eyre::eyre!("Worker error: {}", e))?;

    info!("Notification worker stopped");
    Ok(())
}

/// Wait for a shutdown signal (SIGINT or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => error!("Failed to install signal handler: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        },
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        },
    }
}
