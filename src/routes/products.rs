use axum::{
    Json, Router,
    extract::{Path, State},
    handler::Handler,
    http::StatusCode,
    middleware::from_fn_with_state,
    routing::get,
};

use crate::{
    dto::products::{CreateProductRequest, DeleteConfirmation, ProductList, UpdateProductRequest},
    error::{AppResult, ErrorData, ValidationErrors},
    middleware::validation::{Check, FieldRules, Location, Rule, RuleSet, validate_request},
    models::Product,
    response::ApiResponse,
    services::product_service,
    state::AppState,
};

const ID_FIELD: FieldRules = FieldRules {
    field: "id",
    location: Location::Params,
    optional: false,
    checks: &[Check {
        rule: Rule::Int,
        message: "Invalid id",
    }],
};

const NAME_FIELD: FieldRules = FieldRules {
    field: "name",
    location: Location::Body,
    optional: false,
    checks: &[Check {
        rule: Rule::NotEmpty,
        message: "Product name must not be empty",
    }],
};

const PRICE_FIELD: FieldRules = FieldRules {
    field: "price",
    location: Location::Body,
    optional: false,
    checks: &[
        Check {
            rule: Rule::Numeric,
            message: "Invalid value",
        },
        Check {
            rule: Rule::NotEmpty,
            message: "Product price must not be empty",
        },
        Check {
            rule: Rule::Positive,
            message: "Invalid value",
        },
    ],
};

const AVAILABILITY_FIELD: FieldRules = FieldRules {
    field: "availability",
    location: Location::Body,
    optional: false,
    checks: &[Check {
        rule: Rule::Boolean,
        message: "Invalid availability value",
    }],
};

/// Create accepts an availability flag but falls back to `true` without one.
const OPTIONAL_AVAILABILITY_FIELD: FieldRules = FieldRules {
    optional: true,
    ..AVAILABILITY_FIELD
};

pub static PRODUCT_ID: RuleSet = RuleSet {
    fields: &[ID_FIELD],
};

pub static CREATE_PRODUCT: RuleSet = RuleSet {
    fields: &[NAME_FIELD, PRICE_FIELD, OPTIONAL_AVAILABILITY_FIELD],
};

pub static UPDATE_PRODUCT: RuleSet = RuleSet {
    fields: &[ID_FIELD, NAME_FIELD, PRICE_FIELD, AVAILABILITY_FIELD],
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_products)
                .post(create_product.layer(from_fn_with_state(&CREATE_PRODUCT, validate_request))),
        )
        .route(
            "/{id}",
            get(get_product.layer(from_fn_with_state(&PRODUCT_ID, validate_request)))
                .put(update_product.layer(from_fn_with_state(&UPDATE_PRODUCT, validate_request)))
                .patch(
                    toggle_availability.layer(from_fn_with_state(&PRODUCT_ID, validate_request)),
                )
                .delete(delete_product.layer(from_fn_with_state(&PRODUCT_ID, validate_request))),
        )
}

#[utoipa::path(
    get,
    path = "/api/products",
    responses(
        (status = 200, description = "List products", body = ApiResponse<ProductList>)
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    Ok(Json(product_service::list_products(&state).await?))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Get product", body = ApiResponse<Product>),
        (status = 400, description = "Invalid id", body = ApiResponse<ValidationErrors>),
        (status = 404, description = "Product not found", body = ApiResponse<ErrorData>),
    ),
    tag = "Products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Product>>> {
    Ok(Json(product_service::get_product(&state, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Create product", body = ApiResponse<Product>),
        (status = 400, description = "Invalid input data", body = ApiResponse<ValidationErrors>),
    ),
    tag = "Products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<CreateProductRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Product>>)> {
    let response = product_service::create_product(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Updated product", body = ApiResponse<Product>),
        (status = 400, description = "Invalid id or input data", body = ApiResponse<ValidationErrors>),
        (status = 404, description = "Product not found", body = ApiResponse<ErrorData>),
    ),
    tag = "Products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateProductRequest>,
) -> AppResult<Json<ApiResponse<Product>>> {
    Ok(Json(
        product_service::update_product(&state, id, payload).await?,
    ))
}

#[utoipa::path(
    patch,
    path = "/api/products/{id}",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Availability flipped", body = ApiResponse<Product>),
        (status = 400, description = "Invalid id", body = ApiResponse<ValidationErrors>),
        (status = 404, description = "Product not found", body = ApiResponse<ErrorData>),
    ),
    tag = "Products"
)]
pub async fn toggle_availability(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Product>>> {
    Ok(Json(
        product_service::toggle_availability(&state, id).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Deleted product", body = ApiResponse<DeleteConfirmation>),
        (status = 400, description = "Invalid id", body = ApiResponse<ValidationErrors>),
        (status = 404, description = "Product not found", body = ApiResponse<ErrorData>),
    ),
    tag = "Products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<DeleteConfirmation>>> {
    Ok(Json(product_service::delete_product(&state, id).await?))
}
