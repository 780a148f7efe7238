use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use super::ProductRepository;
use crate::{
    error::{AppError, AppResult},
    models::{NewProduct, Product},
};

#[derive(Default)]
struct Table {
    last_id: i32,
    rows: BTreeMap<i32, Product>,
}

/// Product store kept in process memory. Ids start at 1 and are never reused.
#[derive(Default)]
pub struct InMemoryProductRepository {
    table: Mutex<Table>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list(&self) -> AppResult<Vec<Product>> {
        let table = self.table.lock().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Product>> {
        let table = self.table.lock().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn create(&self, product: NewProduct) -> AppResult<Product> {
        let mut table = self.table.lock().await;
        table.last_id += 1;
        let now = Utc::now();
        let created = Product {
            id: table.last_id,
            name: product.name,
            price: product.price,
            availability: product.availability,
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(created.id, created.clone());
        Ok(created)
    }

    async fn save(&self, product: &Product) -> AppResult<Product> {
        let mut table = self.table.lock().await;
        let row = table
            .rows
            .get_mut(&product.id)
            .ok_or_else(AppError::product_not_found)?;
        row.name = product.name.clone();
        row.price = product.price;
        row.availability = product.availability;
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let mut table = self.table.lock().await;
        Ok(table.rows.remove(&id).is_some())
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
