//! Storage seam for products.
//!
//! Services only see [`ProductRepository`], so they run the same against
//! Postgres ([`SeaOrmProductRepository`]) and against the in-memory store
//! used by the tests ([`InMemoryProductRepository`]).

use async_trait::async_trait;

use crate::{
    error::AppResult,
    models::{NewProduct, Product},
};

mod memory;
mod postgres;

pub use memory::InMemoryProductRepository;
pub use postgres::SeaOrmProductRepository;

#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Every product, ordered by id.
    async fn list(&self) -> AppResult<Vec<Product>>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Product>>;

    async fn create(&self, product: NewProduct) -> AppResult<Product>;

    /// Persists name, price and availability of an existing row and bumps `updated_at`.
    async fn save(&self, product: &Product) -> AppResult<Product>;

    /// Returns `false` when no row had that id.
    async fn delete(&self, id: i32) -> AppResult<bool>;

    async fn ping(&self) -> AppResult<()>;
}
