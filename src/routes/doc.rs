use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::products::{CreateProductRequest, DeleteConfirmation, ProductList, UpdateProductRequest},
    error::{ErrorData, ValidationErrors},
    middleware::validation::{FieldError, Location},
    models::{Product, ProductSummary},
    response::ApiResponse,
    routes::{health, products},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::toggle_availability,
        products::delete_product
    ),
    components(
        schemas(
            Product,
            ProductSummary,
            ProductList,
            CreateProductRequest,
            UpdateProductRequest,
            DeleteConfirmation,
            FieldError,
            Location,
            ErrorData,
            ValidationErrors,
            health::HealthData,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<DeleteConfirmation>,
            ApiResponse<ErrorData>,
            ApiResponse<ValidationErrors>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Products", description = "Product endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
