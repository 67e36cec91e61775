use log::trace;
use sqlx::SqliteConnection;

use crate::{
    db_types::Cart,
    objects::{CartLine, CartView},
    traits::CartApiError,
};

pub async fn fetch_cart_row(customer_id: i64, conn: &mut SqliteConnection) -> Result<Option<Cart>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM carts WHERE customer_id = $1").bind(customer_id).fetch_optional(conn).await
}

async fn fetch_cart_row_by_id(cart_id: i64, conn: &mut SqliteConnection) -> Result<Option<Cart>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM carts WHERE id = $1").bind(cart_id).fetch_optional(conn).await
}

/// Load-or-create the cart row for a customer. Creation is lazy: the row only comes into
/// existence on the first `add`.
pub async fn fetch_or_create_cart(customer_id: i64, conn: &mut SqliteConnection) -> Result<Cart, sqlx::Error> {
    if let Some(cart) = fetch_cart_row(customer_id, conn).await? {
        return Ok(cart);
    }
    let cart = sqlx::query_as("INSERT INTO carts (customer_id) VALUES ($1) RETURNING *")
        .bind(customer_id)
        .fetch_one(conn)
        .await?;
    trace!("📝️ Created cart for customer {customer_id}");
    Ok(cart)
}

/// The cart as the client sees it: each line joined with its product. A missing cart row reads
/// back as an empty view.
pub async fn cart_view(cart: Option<Cart>, conn: &mut SqliteConnection) -> Result<CartView, sqlx::Error> {
    let cart = match cart {
        Some(cart) => cart,
        None => return Ok(CartView::empty()),
    };
    let items: Vec<CartLine> = sqlx::query_as(
        r#"
        SELECT products.*, cart_items.quantity AS quantity
        FROM cart_items JOIN products ON products.id = cart_items.product_id
        WHERE cart_items.cart_id = $1
        ORDER BY products.id
        "#,
    )
    .bind(cart.id)
    .fetch_all(conn)
    .await?;
    Ok(CartView { cart_id: Some(cart.id), items })
}

pub async fn add_cart_item(
    customer_id: i64,
    product_id: i64,
    quantity: i64,
    conn: &mut SqliteConnection,
) -> Result<CartView, CartApiError> {
    let cart = fetch_or_create_cart(customer_id, conn).await?;
    sqlx::query(
        r#"
        INSERT INTO cart_items (cart_id, product_id, quantity) VALUES ($1, $2, $3)
        ON CONFLICT (cart_id, product_id) DO UPDATE SET quantity = quantity + excluded.quantity
        "#,
    )
    .bind(cart.id)
    .bind(product_id)
    .bind(quantity)
    .execute(&mut *conn)
    .await?;
    touch_cart(cart.id, conn).await?;
    Ok(cart_view(Some(cart), conn).await?)
}

pub async fn remove_cart_item(
    customer_id: i64,
    product_id: i64,
    conn: &mut SqliteConnection,
) -> Result<CartView, CartApiError> {
    let cart = fetch_cart_row(customer_id, conn).await?.ok_or(CartApiError::CartNotFound)?;
    // Removing a line that isn't there is a no-op, not an error.
    sqlx::query("DELETE FROM cart_items WHERE cart_id = $1 AND product_id = $2")
        .bind(cart.id)
        .bind(product_id)
        .execute(&mut *conn)
        .await?;
    touch_cart(cart.id, conn).await?;
    Ok(cart_view(Some(cart), conn).await?)
}

pub async fn clear_cart(customer_id: i64, conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    let cart = match fetch_cart_row(customer_id, conn).await? {
        Some(cart) => cart,
        None => return Ok(()),
    };
    sqlx::query("DELETE FROM cart_items WHERE cart_id = $1").bind(cart.id).execute(&mut *conn).await?;
    sqlx::query("DELETE FROM carts WHERE id = $1").bind(cart.id).execute(conn).await?;
    Ok(())
}

/// Adjust one line's quantity by `delta`. A result below 1 removes the line entirely.
pub async fn adjust_cart_item(
    cart_id: i64,
    product_id: i64,
    delta: i64,
    conn: &mut SqliteConnection,
) -> Result<CartView, CartApiError> {
    let cart = fetch_cart_row_by_id(cart_id, conn).await?.ok_or(CartApiError::CartNotFound)?;
    let quantity: Option<i64> =
        sqlx::query_scalar("SELECT quantity FROM cart_items WHERE cart_id = $1 AND product_id = $2")
            .bind(cart_id)
            .bind(product_id)
            .fetch_optional(&mut *conn)
            .await?;
    let quantity = quantity.ok_or(CartApiError::ProductNotInCart(product_id))?;
    let new_quantity = quantity + delta;
    if new_quantity < 1 {
        sqlx::query("DELETE FROM cart_items WHERE cart_id = $1 AND product_id = $2")
            .bind(cart_id)
            .bind(product_id)
            .execute(&mut *conn)
            .await?;
    } else {
        sqlx::query("UPDATE cart_items SET quantity = $1 WHERE cart_id = $2 AND product_id = $3")
            .bind(new_quantity)
            .bind(cart_id)
            .bind(product_id)
            .execute(&mut *conn)
            .await?;
    }
    touch_cart(cart_id, conn).await?;
    Ok(cart_view(Some(cart), conn).await?)
}

pub async fn set_cart_item_quantity(
    cart_id: i64,
    product_id: i64,
    quantity: i64,
    conn: &mut SqliteConnection,
) -> Result<CartView, CartApiError> {
    let cart = fetch_cart_row_by_id(cart_id, conn).await?.ok_or(CartApiError::CartNotFound)?;
    let res = sqlx::query("UPDATE cart_items SET quantity = $1 WHERE cart_id = $2 AND product_id = $3")
        .bind(quantity)
        .bind(cart_id)
        .bind(product_id)
        .execute(&mut *conn)
        .await?;
    if res.rows_affected() == 0 {
        return Err(CartApiError::ProductNotInCart(product_id));
    }
    touch_cart(cart_id, conn).await?;
    Ok(cart_view(Some(cart), conn).await?)
}

async fn touch_cart(cart_id: i64, conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE carts SET updated_at = CURRENT_TIMESTAMP WHERE id = $1")
        .bind(cart_id)
        .execute(conn)
        .await?;
    Ok(())
}
