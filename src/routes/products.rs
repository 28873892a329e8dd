use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    AppState,
    error::{AppError, Result},
    models::{CreateProductResponse, MutationResponse, Product, ProductRequest},
    queries::product_queries,
    utils::validation,
};

/// Full catalog, most recently updated first. Filtering and sorting happen
/// client-side on the complete set.
pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = product_queries::list_products(&state.db).await?;

    Ok(Json(products))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Product>> {
    let product = product_queries::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    Ok(Json(product))
}

pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<ProductRequest>,
) -> Result<(StatusCode, Json<CreateProductResponse>)> {
    validation::validate_product(&payload)?;

    let id = product_queries::create_product(&state.db, &payload).await?;

    tracing::info!("Created product {}", id);

    Ok((
        StatusCode::CREATED,
        Json(CreateProductResponse { success: true, id }),
    ))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ProductRequest>,
) -> Result<Json<MutationResponse>> {
    validation::validate_product(&payload)?;

    let updated = product_queries::update_product(&state.db, id, &payload).await?;

    if !updated {
        return Err(AppError::NotFound("Product not found".to_string()));
    }

    Ok(Json(MutationResponse { success: true }))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MutationResponse>> {
    let deleted = product_queries::delete_product(&state.db, id).await?;

    if !deleted {
        return Err(AppError::NotFound("Product not found".to_string()));
    }

    tracing::info!("Deleted product {}", id);

    Ok(Json(MutationResponse { success: true }))
}
