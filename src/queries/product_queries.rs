use sqlx::{PgPool, types::Json};

use crate::{
    error::Result,
    models::{Product, ProductRequest, ProductStatus, StoreAvailability},
};

pub async fn list_products(pool: &PgPool) -> Result<Vec<Product>> {
    let products =
        sqlx::query_as::<_, Product>("SELECT * FROM products ORDER BY last_update DESC")
            .fetch_all(pool)
            .await?;

    Ok(products)
}

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Product>> {
    let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(product)
}

pub async fn create_product(pool: &PgPool, payload: &ProductRequest) -> Result<i32> {
    let availability: &[StoreAvailability] =
        payload.store_availability.as_deref().unwrap_or(&[]);

    let (id,): (i32,) = sqlx::query_as(
        "INSERT INTO products
         (name, description, price, stock, category, location, image, status,
          brand, sizes, product_code, order_name, store_availability, last_update)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, NOW())
         RETURNING id",
    )
    .bind(payload.name.as_deref())
    .bind(payload.description.as_deref())
    .bind(payload.price)
    .bind(payload.stock.unwrap_or(0))
    .bind(payload.category.as_deref())
    .bind(payload.location.as_deref())
    .bind(payload.image.as_deref())
    .bind(payload.status.unwrap_or(ProductStatus::Active))
    .bind(payload.brand.as_deref())
    .bind(payload.sizes.as_deref())
    .bind(payload.product_code.as_deref())
    .bind(payload.order_name.as_deref())
    .bind(Json(availability))
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Full-replace semantics: every mutable column is written, so optional
/// fields absent from the payload become NULL (or their column default).
pub async fn update_product(pool: &PgPool, id: i32, payload: &ProductRequest) -> Result<bool> {
    let availability: &[StoreAvailability] =
        payload.store_availability.as_deref().unwrap_or(&[]);

    let result = sqlx::query(
        "UPDATE products
         SET name = $1, description = $2, price = $3, stock = $4, category = $5,
             location = $6, image = $7, status = $8, brand = $9, sizes = $10,
             product_code = $11, order_name = $12, store_availability = $13,
             last_update = NOW()
         WHERE id = $14",
    )
    .bind(payload.name.as_deref())
    .bind(payload.description.as_deref())
    .bind(payload.price)
    .bind(payload.stock.unwrap_or(0))
    .bind(payload.category.as_deref())
    .bind(payload.location.as_deref())
    .bind(payload.image.as_deref())
    .bind(payload.status.unwrap_or(ProductStatus::Active))
    .bind(payload.brand.as_deref())
    .bind(payload.sizes.as_deref())
    .bind(payload.product_code.as_deref())
    .bind(payload.order_name.as_deref())
    .bind(Json(availability))
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_product(pool: &PgPool, id: i32) -> Result<bool> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
