use axum_products_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    models::NewProduct,
    repository::{ProductRepository, SeaOrmProductRepository},
    telemetry::init_tracing,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    // Ensure migrations are applied.
    run_migrations(&orm).await?;

    let repo = SeaOrmProductRepository::new(orm);
    let existing: Vec<String> = repo.list().await?.into_iter().map(|p| p.name).collect();

    let products = [
        ("Curved 49 inch monitor", 300.0),
        ("Mechanical keyboard", 120.0),
        ("Wireless mouse", 35.5),
        ("USB-C dock", 89.99),
    ];

    let mut inserted = 0;
    for (name, price) in products {
        if existing.iter().any(|n| n == name) {
            continue;
        }
        repo.create(NewProduct {
            name: name.to_string(),
            price,
            availability: true,
        })
        .await?;
        inserted += 1;
    }

    tracing::info!(inserted, "seed completed");
    Ok(())
}
