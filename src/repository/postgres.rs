use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, DatabaseConnection, EntityTrait, QueryOrder, Set,
};

use super::ProductRepository;
use crate::{
    entity::{
        Products,
        products::{ActiveModel, Column, Model as ProductModel},
    },
    error::{AppError, AppResult},
    models::{NewProduct, Product},
};

#[derive(Clone)]
pub struct SeaOrmProductRepository {
    orm: DatabaseConnection,
}

impl SeaOrmProductRepository {
    pub fn new(orm: DatabaseConnection) -> Self {
        Self { orm }
    }
}

#[async_trait]
impl ProductRepository for SeaOrmProductRepository {
    async fn list(&self) -> AppResult<Vec<Product>> {
        let items = Products::find()
            .order_by_asc(Column::Id)
            .all(&self.orm)
            .await?
            .into_iter()
            .map(product_from_entity)
            .collect();
        Ok(items)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Product>> {
        let product = Products::find_by_id(id)
            .one(&self.orm)
            .await?
            .map(product_from_entity);
        Ok(product)
    }

    async fn create(&self, product: NewProduct) -> AppResult<Product> {
        let now = Utc::now().fixed_offset();
        let active = ActiveModel {
            id: NotSet,
            name: Set(product.name),
            price: Set(product.price),
            availability: Set(product.availability),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let model = active.insert(&self.orm).await?;
        Ok(product_from_entity(model))
    }

    async fn save(&self, product: &Product) -> AppResult<Product> {
        let active = ActiveModel {
            id: Set(product.id),
            name: Set(product.name.clone()),
            price: Set(product.price),
            availability: Set(product.availability),
            created_at: NotSet,
            updated_at: Set(Utc::now().fixed_offset()),
        };
        let model = active.update(&self.orm).await.map_err(|err| match err {
            sea_orm::DbErr::RecordNotUpdated => AppError::product_not_found(),
            other => AppError::OrmError(other),
        })?;
        Ok(product_from_entity(model))
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = Products::delete_by_id(id).exec(&self.orm).await?;
        Ok(result.rows_affected > 0)
    }

    async fn ping(&self) -> AppResult<()> {
        self.orm.ping().await?;
        Ok(())
    }
}

fn product_from_entity(model: ProductModel) -> Product {
    Product {
        id: model.id,
        name: model.name,
        price: model.price,
        availability: model.availability,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
