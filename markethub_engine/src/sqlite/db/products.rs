use log::debug;
use sqlx::{QueryBuilder, SqliteConnection};

use crate::{
    db_types::{NewProduct, Product, ProductUpdate},
    objects::ProductWithVendor,
    traits::CatalogApiError,
};

const DEFAULT_IMAGE_URL: &str = "https://via.placeholder.com/150";

pub async fn insert_product(
    vendor_id: i64,
    product: NewProduct,
    conn: &mut SqliteConnection,
) -> Result<Product, CatalogApiError> {
    let image_url = product.image_url.unwrap_or_else(|| DEFAULT_IMAGE_URL.to_string());
    let product = sqlx::query_as::<_, Product>(
        r#"
            INSERT INTO products (vendor_id, name, price, description, category, stock, image_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *;
        "#,
    )
    .bind(vendor_id)
    .bind(product.name)
    .bind(product.price.value())
    .bind(product.description)
    .bind(product.category)
    .bind(product.stock)
    .bind(image_url)
    .fetch_one(conn)
    .await?;
    debug!("📝️ Product [{}] inserted with id {}", product.name, product.id);
    Ok(product)
}

pub async fn fetch_product(product_id: i64, conn: &mut SqliteConnection) -> Result<Option<Product>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM products WHERE id = $1").bind(product_id).fetch_optional(conn).await
}

pub async fn fetch_all_products(conn: &mut SqliteConnection) -> Result<Vec<Product>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM products ORDER BY id").fetch_all(conn).await
}

pub async fn fetch_products_for_vendor(
    vendor_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Vec<Product>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM products WHERE vendor_id = $1 ORDER BY id").bind(vendor_id).fetch_all(conn).await
}

/// Case-insensitive substring match against name or category. SQLite's `LIKE` is
/// case-insensitive for ASCII, which matches the original's `$regex ... i` behaviour.
pub async fn search_products(
    query: &str,
    limit: i64,
    conn: &mut SqliteConnection,
) -> Result<Vec<Product>, sqlx::Error> {
    let pattern = format!("%{query}%");
    sqlx::query_as("SELECT * FROM products WHERE name LIKE $1 OR category LIKE $1 ORDER BY id LIMIT $2")
        .bind(pattern)
        .bind(limit)
        .fetch_all(conn)
        .await
}

pub async fn update_product(
    product_id: i64,
    update: ProductUpdate,
    conn: &mut SqliteConnection,
) -> Result<Product, CatalogApiError> {
    if update.is_empty() {
        return fetch_product(product_id, conn).await?.ok_or(CatalogApiError::ProductNotFound(product_id));
    }
    let mut builder = QueryBuilder::new("UPDATE products SET updated_at = CURRENT_TIMESTAMP, ");
    let mut set_clause = builder.separated(", ");
    if let Some(name) = update.name {
        set_clause.push("name = ");
        set_clause.push_bind_unseparated(name);
    }
    if let Some(price) = update.price {
        set_clause.push("price = ");
        set_clause.push_bind_unseparated(price.value());
    }
    if let Some(description) = update.description {
        set_clause.push("description = ");
        set_clause.push_bind_unseparated(description);
    }
    if let Some(category) = update.category {
        set_clause.push("category = ");
        set_clause.push_bind_unseparated(category);
    }
    if let Some(stock) = update.stock {
        set_clause.push("stock = ");
        set_clause.push_bind_unseparated(stock);
    }
    if let Some(image_url) = update.image_url {
        set_clause.push("image_url = ");
        set_clause.push_bind_unseparated(image_url);
    }
    builder.push(" WHERE id = ");
    builder.push_bind(product_id);
    builder.push(" RETURNING *");
    let product = builder.build_query_as::<Product>().fetch_optional(conn).await?;
    product.ok_or(CatalogApiError::ProductNotFound(product_id))
}

pub async fn delete_product(product_id: i64, conn: &mut SqliteConnection) -> Result<(), CatalogApiError> {
    let res = sqlx::query("DELETE FROM products WHERE id = $1").bind(product_id).execute(conn).await?;
    if res.rows_affected() == 0 {
        return Err(CatalogApiError::ProductNotFound(product_id));
    }
    Ok(())
}

pub async fn set_product_approval(
    product_id: i64,
    approved: bool,
    conn: &mut SqliteConnection,
) -> Result<Product, CatalogApiError> {
    let product = sqlx::query_as(
        "UPDATE products SET approved = $1, updated_at = CURRENT_TIMESTAMP WHERE id = $2 RETURNING *",
    )
    .bind(approved)
    .bind(product_id)
    .fetch_optional(conn)
    .await?;
    product.ok_or(CatalogApiError::ProductNotFound(product_id))
}

pub async fn fetch_products_with_vendors(
    conn: &mut SqliteConnection,
) -> Result<Vec<ProductWithVendor>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT products.*, users.email AS vendor_email
        FROM products JOIN users ON users.id = products.vendor_id
        ORDER BY products.id
        "#,
    )
    .fetch_all(conn)
    .await
}
