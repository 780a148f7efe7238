use axum_products_api::{
    db::{create_orm_conn, run_migrations},
    models::NewProduct,
    repository::{ProductRepository, SeaOrmProductRepository},
};
use sea_orm::{ConnectionTrait, Statement};

// Runs the repository against Postgres: create -> toggle -> update -> delete.
#[tokio::test]
async fn postgres_repository_lifecycle() -> anyhow::Result<()> {
    // Allow skipping when no DB is configured in the environment.
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run database tests."
            );
            return Ok(());
        }
    };

    let orm = create_orm_conn(&database_url).await?;
    run_migrations(&orm).await?;
    let backend = orm.get_database_backend();
    orm.execute(Statement::from_string(
        backend,
        "TRUNCATE TABLE products RESTART IDENTITY",
    ))
    .await?;

    let repo = SeaOrmProductRepository::new(orm);
    repo.ping().await?;

    let created = repo
        .create(NewProduct {
            name: "Monitor".into(),
            price: 300.0,
            availability: true,
        })
        .await?;
    assert_eq!(created.id, 1);
    assert!(created.availability);

    let mut toggled = created.clone();
    toggled.availability = false;
    let toggled = repo.save(&toggled).await?;
    assert!(!toggled.availability);
    assert!(toggled.updated_at >= created.updated_at);

    let mut renamed = toggled.clone();
    renamed.name = "Monitor 4K".into();
    renamed.price = 450.0;
    repo.save(&renamed).await?;

    let fetched = repo.find_by_id(created.id).await?.expect("product exists");
    assert_eq!(fetched.name, "Monitor 4K");
    assert_eq!(fetched.price, 450.0);
    assert_eq!(repo.list().await?.len(), 1);

    let long_name = repo
        .create(NewProduct {
            name: "M".repeat(500),
            price: 1.0,
            availability: true,
        })
        .await?;
    assert_eq!(long_name.name.len(), 500);
    assert!(repo.delete(long_name.id).await?);

    assert!(repo.delete(created.id).await?);
    assert!(repo.find_by_id(created.id).await?.is_none());
    assert!(!repo.delete(created.id).await?);

    Ok(())
}
