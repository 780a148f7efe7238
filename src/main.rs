use std::net::SocketAddr;

use axum_products_api::{
    app::build_app,
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    repository::SeaOrmProductRepository,
    state::AppState,
    telemetry::init_tracing,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let orm = create_orm_conn(&config.database_url).await?;
    let migrations = run_migrations(&orm).await?;
    tracing::info!(migrations, "database ready");

    let state = AppState::new(SeaOrmProductRepository::new(orm));
    let app = build_app(state, &config);

    let addr = SocketAddr::from((config.host.parse::<std::net::IpAddr>()?, config.port));
    tracing::info!(docs = config.docs_enabled, "listening on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;

    Ok(())
}
