use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::domain::ports::{
    AuthRepository, EventRepository, ProfileRepository, ReservationRepository,
    SessionRepository, SettingsRepository, TemplateRepository,
};
use crate::domain::services::auth_service::AuthService;
use crate::domain::services::cache::CacheStore;
use crate::domain::services::catalog::CatalogService;
use crate::domain::services::freshness::FreshnessService;
use crate::domain::services::reservation_service::ReservationService;
use crate::state::AppState;
use crate::infra::repositories::{
    postgres_auth_repo::PostgresAuthRepo, postgres_event_repo::PostgresEventRepo,
    postgres_profile_repo::PostgresProfileRepo, postgres_reservation_repo::PostgresReservationRepo,
    postgres_session_repo::PostgresSessionRepo, postgres_settings_repo::PostgresSettingsRepo,
    postgres_template_repo::PostgresTemplateRepo,
    sqlite_auth_repo::SqliteAuthRepo, sqlite_event_repo::SqliteEventRepo,
    sqlite_profile_repo::SqliteProfileRepo, sqlite_reservation_repo::SqliteReservationRepo,
    sqlite_session_repo::SqliteSessionRepo, sqlite_settings_repo::SqliteSettingsRepo,
    sqlite_template_repo::SqliteTemplateRepo,
};

struct Repos {
    event_repo: Arc<dyn EventRepository>,
    session_repo: Arc<dyn SessionRepository>,
    reservation_repo: Arc<dyn ReservationRepository>,
    profile_repo: Arc<dyn ProfileRepository>,
    template_repo: Arc<dyn TemplateRepository>,
    settings_repo: Arc<dyn SettingsRepository>,
    auth_repo: Arc<dyn AuthRepository>,
}

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;

    let repos = if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;

        Repos {
            event_repo: Arc::new(PostgresEventRepo::new(pool.clone())),
            session_repo: Arc::new(PostgresSessionRepo::new(pool.clone())),
            reservation_repo: Arc::new(PostgresReservationRepo::new(pool.clone())),
            profile_repo: Arc::new(PostgresProfileRepo::new(pool.clone())),
            template_repo: Arc::new(PostgresTemplateRepo::new(pool.clone())),
            settings_repo: Arc::new(PostgresSettingsRepo::new(pool.clone())),
            auth_repo: Arc::new(PostgresAuthRepo::new(pool)),
        }
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;

        Repos {
            event_repo: Arc::new(SqliteEventRepo::new(pool.clone())),
            session_repo: Arc::new(SqliteSessionRepo::new(pool.clone())),
            reservation_repo: Arc::new(SqliteReservationRepo::new(pool.clone())),
            profile_repo: Arc::new(SqliteProfileRepo::new(pool.clone())),
            template_repo: Arc::new(SqliteTemplateRepo::new(pool.clone())),
            settings_repo: Arc::new(SqliteSettingsRepo::new(pool.clone())),
            auth_repo: Arc::new(SqliteAuthRepo::new(pool)),
        }
    };

    assemble_state(config, repos)
}

fn assemble_state(config: &Config, repos: Repos) -> AppState {
    let cache = Arc::new(CacheStore::new());
    let freshness = Arc::new(FreshnessService::new(cache.clone()));

    let catalog = Arc::new(CatalogService::new(
        repos.event_repo.clone(),
        repos.session_repo.clone(),
        cache.clone(),
    ));

    let reservations = Arc::new(ReservationService::new(
        repos.reservation_repo.clone(),
        repos.session_repo.clone(),
        repos.event_repo.clone(),
        repos.profile_repo.clone(),
        cache.clone(),
        freshness.clone(),
    ));

    let auth_service = Arc::new(AuthService::new(repos.auth_repo.clone(), config.clone()));

    AppState {
        config: config.clone(),
        event_repo: repos.event_repo,
        session_repo: repos.session_repo,
        reservation_repo: repos.reservation_repo,
        profile_repo: repos.profile_repo,
        template_repo: repos.template_repo,
        settings_repo: repos.settings_repo,
        auth_repo: repos.auth_repo,
        auth_service,
        cache,
        freshness,
        catalog,
        reservations,
    }
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
