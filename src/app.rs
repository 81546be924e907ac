/*
 * Responsibility
 * - Config読み込み → 依存生成 → Router 組み立て
 * - Middleware の適用 (auth / HTTP / CORS)
 * - axum::serve() で起動
 */
use std::{panic, process, sync::Arc};

use anyhow::{Context, Result};
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::repos::{ExpenseRepo, MemoryExpenseRepo, PgExpenseRepo};
use crate::services::{auth::build_auth_service, id_codec::IdCodec};
use crate::state::AppState;
use crate::{api, middleware};

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,expense_api=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    // Keep the default hook as a fallback (prints to stderr with location/payload).
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // development では即座に落として気付けるようにする
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env().context("failed to load configuration")?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting expense API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config).await?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn build_expense_repo(config: &Config) -> Result<Arc<dyn ExpenseRepo>> {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL is not set; expenses are kept in memory and lost on restart");
        return Ok(Arc::new(MemoryExpenseRepo::new()));
    };

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(database_url)
        .await
        .context("failed to connect to database")?;

    let repo = PgExpenseRepo::new(pool);
    repo.migrate()
        .await
        .context("failed to run database migrations")?;

    Ok(Arc::new(repo))
}

pub async fn build_state(config: &Config) -> Result<AppState> {
    let expenses = build_expense_repo(config).await?;
    let id_codec = IdCodec::new(config.sqids_min_length, &config.sqids_alphabet)
        .context("invalid sqids configuration")?;
    let auth = build_auth_service(config);

    tracing::info!(backend = expenses.backend_name(), "expense storage ready");

    Ok(AppState::new(expenses, id_codec, auth))
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let protected = middleware::auth::access::apply(api::v1::protected_routes(), state.clone());

    let v1 = api::v1::public_routes().merge(protected);

    let router = Router::new().nest("/api/v1", v1).with_state(state);

    let router = middleware::cors::apply(router, config);
    middleware::http::apply(router, config)
}
