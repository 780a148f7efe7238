use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{middleware::validation::lenient, models::ProductSummary};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    #[serde(deserialize_with = "lenient::string")]
    #[schema(example = "Curved 49 inch monitor")]
    pub name: String,
    #[serde(deserialize_with = "lenient::number")]
    #[schema(example = 300.0)]
    pub price: f64,
    #[serde(default = "available", deserialize_with = "lenient::boolean")]
    #[schema(example = true, default = true)]
    pub availability: bool,
}

fn available() -> bool {
    true
}

/// Full replacement of every mutable field.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    #[serde(deserialize_with = "lenient::string")]
    #[schema(example = "Curved 49 inch monitor")]
    pub name: String,
    #[serde(deserialize_with = "lenient::number")]
    #[schema(example = 300.0)]
    pub price: f64,
    #[serde(deserialize_with = "lenient::boolean")]
    #[schema(example = true)]
    pub availability: bool,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<ProductSummary>)]
    pub items: Vec<ProductSummary>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct DeleteConfirmation {
    #[schema(value_type = String, example = "Product deleted")]
    pub message: String,
}
