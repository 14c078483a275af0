//! Selection of the movie store from configuration.

use std::sync::Arc;
use std::time::Duration;

use sqlx::migrate::Migrator;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use tracing::info;

use moviehub_core::config::DatabaseConfig;
use moviehub_core::error::{AppError, ErrorKind};
use moviehub_core::result::AppResult;
use moviehub_core::traits::Repository;
use moviehub_entity::movie::{Movie, MovieColumn};

use crate::repositories::{MemoryMovieRepository, PgMovieRepository};

/// Object-safe movie repository, shared by every service.
pub type MovieRepository = dyn Repository<Movie, i64, Column = MovieColumn>;

/// Schema migrations for the `movies` table.
static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Name reported to PostgreSQL in `pg_stat_activity`.
const APPLICATION_NAME: &str = "moviehub";

/// Build the movie repository named by `config.provider`.
///
/// `"postgres"` opens a pool and optionally applies migrations; `"memory"`
/// starts an empty in-process store.
pub async fn connect_movie_repository(config: &DatabaseConfig) -> AppResult<Arc<MovieRepository>> {
    let repository: Arc<MovieRepository> = match config.provider.as_str() {
        "postgres" => Arc::new(open_postgres(config).await?),
        "memory" => {
            info!("Initializing in-memory movie store");
            Arc::new(MemoryMovieRepository::new())
        }
        other => {
            return Err(AppError::configuration(format!(
                "Unknown database provider: '{other}'. Supported: postgres, memory"
            )));
        }
    };
    Ok(repository)
}

async fn open_postgres(config: &DatabaseConfig) -> AppResult<PgMovieRepository> {
    let target = connect_options(config)?;
    let options = pool_options(config);
    info!(
        store = %describe(&target),
        max_connections = options.get_max_connections(),
        min_connections = options.get_min_connections(),
        "Opening PostgreSQL movie store"
    );

    let pool = options.connect_with(target).await.map_err(|e| {
        AppError::with_source(ErrorKind::Database, "Failed to connect to PostgreSQL", e)
    })?;

    if config.run_migrations {
        MIGRATOR.run(&pool).await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to apply migrations", e)
        })?;
        info!(migrations = MIGRATOR.iter().count(), "Movie schema is up to date");
    }

    Ok(PgMovieRepository::new(pool))
}

/// Parse the configured URL and tag the session with the application name.
fn connect_options(config: &DatabaseConfig) -> AppResult<PgConnectOptions> {
    let options: PgConnectOptions = config.url.parse().map_err(|e| {
        AppError::with_source(ErrorKind::Configuration, "Invalid database.url", e)
    })?;
    Ok(options.application_name(APPLICATION_NAME))
}

/// Pool sizing from configuration. `min_connections` never exceeds the maximum.
fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    let max = config.max_connections.max(1);
    PgPoolOptions::new()
        .max_connections(max)
        .min_connections(config.min_connections.min(max))
        .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
        .test_before_acquire(true)
}

/// `user@host:port/database`, without credentials.
fn describe(options: &PgConnectOptions) -> String {
    format!(
        "{}@{}:{}/{}",
        options.get_username(),
        options.get_host(),
        options.get_port(),
        options.get_database().unwrap_or_default()
    )
}
