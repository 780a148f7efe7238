use crate::{
    dto::products::{CreateProductRequest, DeleteConfirmation, ProductList, UpdateProductRequest},
    error::{AppError, AppResult},
    models::{NewProduct, Product},
    response::ApiResponse,
    state::AppState,
};

pub async fn list_products(state: &AppState) -> AppResult<ApiResponse<ProductList>> {
    let items = state
        .products
        .list()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(ApiResponse::success("Products", ProductList { items }))
}

pub async fn get_product(state: &AppState, id: i32) -> AppResult<ApiResponse<Product>> {
    let product = find_existing(state, id).await?;
    Ok(ApiResponse::success("Product", product))
}

pub async fn create_product(
    state: &AppState,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    let product = state
        .products
        .create(NewProduct {
            name: payload.name,
            price: payload.price,
            availability: payload.availability,
        })
        .await?;

    tracing::info!(product_id = product.id, "product created");
    Ok(ApiResponse::success("Product created", product))
}

pub async fn update_product(
    state: &AppState,
    id: i32,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    let mut product = find_existing(state, id).await?;
    product.name = payload.name;
    product.price = payload.price;
    product.availability = payload.availability;

    let product = state.products.save(&product).await?;

    tracing::info!(product_id = product.id, "product updated");
    Ok(ApiResponse::success("Updated", product))
}

pub async fn toggle_availability(state: &AppState, id: i32) -> AppResult<ApiResponse<Product>> {
    let mut product = find_existing(state, id).await?;
    product.availability = !product.availability;

    let product = state.products.save(&product).await?;

    tracing::info!(
        product_id = product.id,
        availability = product.availability,
        "product availability toggled"
    );
    Ok(ApiResponse::success("Availability updated", product))
}

pub async fn delete_product(
    state: &AppState,
    id: i32,
) -> AppResult<ApiResponse<DeleteConfirmation>> {
    find_existing(state, id).await?;
    if !state.products.delete(id).await? {
        return Err(AppError::product_not_found());
    }

    tracing::info!(product_id = id, "product deleted");
    Ok(ApiResponse::success(
        "Deleted",
        DeleteConfirmation {
            message: "Product deleted".to_string(),
        },
    ))
}

async fn find_existing(state: &AppState, id: i32) -> AppResult<Product> {
    match state.products.find_by_id(id).await? {
        Some(product) => Ok(product),
        None => Err(AppError::product_not_found()),
    }
}
