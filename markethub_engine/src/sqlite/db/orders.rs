use log::debug;
use mh_common::Price;
use sqlx::SqliteConnection;

use crate::{
    db_types::{Order, OrderItem, OrderStatus, ResolvedOrder},
    objects::{AdminOrderLine, AdminOrderView, MonthlySales, OrderDetail, SalesReport, MONTH_NAMES},
    traits::OrderApiError,
};

/// Insert the order row, its line items and its vendor set. This is not atomic on its own:
/// the caller embeds it in a transaction and passes `&mut *tx` as the connection argument.
pub async fn insert_order(order: ResolvedOrder, conn: &mut SqliteConnection) -> Result<OrderDetail, OrderApiError> {
    let row: Order = sqlx::query_as(
        r#"
            INSERT INTO orders (customer_id, total_amount, full_name, address, city, state, zip_code, country)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *;
        "#,
    )
    .bind(order.customer_id)
    .bind(order.total_amount.value())
    .bind(order.shipping_address.full_name)
    .bind(order.shipping_address.address)
    .bind(order.shipping_address.city)
    .bind(order.shipping_address.state)
    .bind(order.shipping_address.zip_code)
    .bind(order.shipping_address.country)
    .fetch_one(&mut *conn)
    .await?;
    for item in &order.items {
        sqlx::query("INSERT INTO order_items (order_id, product_id, quantity) VALUES ($1, $2, $3)")
            .bind(row.id)
            .bind(item.product_id)
            .bind(item.quantity)
            .execute(&mut *conn)
            .await?;
    }
    for vendor_id in &order.vendor_ids {
        sqlx::query("INSERT INTO order_vendors (order_id, vendor_id) VALUES ($1, $2)")
            .bind(row.id)
            .bind(vendor_id)
            .execute(&mut *conn)
            .await?;
    }
    debug!("📝️ Order inserted with id {}", row.id);
    Ok(OrderDetail { order: row, items: order.items, vendor_ids: order.vendor_ids })
}

pub async fn fetch_order(order_id: i64, conn: &mut SqliteConnection) -> Result<Option<Order>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM orders WHERE id = $1").bind(order_id).fetch_optional(conn).await
}

pub async fn fetch_order_detail(
    order_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Option<OrderDetail>, sqlx::Error> {
    let order = match fetch_order(order_id, conn).await? {
        Some(order) => order,
        None => return Ok(None),
    };
    Ok(Some(attach_context(order, conn).await?))
}

async fn attach_context(order: Order, conn: &mut SqliteConnection) -> Result<OrderDetail, sqlx::Error> {
    let items: Vec<OrderItem> =
        sqlx::query_as("SELECT product_id, quantity FROM order_items WHERE order_id = $1 ORDER BY rowid")
            .bind(order.id)
            .fetch_all(&mut *conn)
            .await?;
    let vendor_ids: Vec<i64> =
        sqlx::query_scalar("SELECT vendor_id FROM order_vendors WHERE order_id = $1 ORDER BY rowid")
            .bind(order.id)
            .fetch_all(conn)
            .await?;
    Ok(OrderDetail { order, items, vendor_ids })
}

pub async fn fetch_orders_for_customer(
    customer_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Vec<OrderDetail>, sqlx::Error> {
    let orders: Vec<Order> = sqlx::query_as("SELECT * FROM orders WHERE customer_id = $1 ORDER BY created_at DESC")
        .bind(customer_id)
        .fetch_all(&mut *conn)
        .await?;
    let mut details = Vec::with_capacity(orders.len());
    for order in orders {
        details.push(attach_context(order, conn).await?);
    }
    Ok(details)
}

pub async fn fetch_orders_for_vendor(
    vendor_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Vec<OrderDetail>, sqlx::Error> {
    let orders: Vec<Order> = sqlx::query_as(
        r#"
        SELECT orders.* FROM orders JOIN order_vendors ON order_vendors.order_id = orders.id
        WHERE order_vendors.vendor_id = $1
        ORDER BY orders.created_at DESC
        "#,
    )
    .bind(vendor_id)
    .fetch_all(&mut *conn)
    .await?;
    let mut details = Vec::with_capacity(orders.len());
    for order in orders {
        details.push(attach_context(order, conn).await?);
    }
    Ok(details)
}

/// The unrestricted moderation listing: every order with its customer identity and named line
/// items.
pub async fn fetch_all_orders(conn: &mut SqliteConnection) -> Result<Vec<AdminOrderView>, sqlx::Error> {
    let rows: Vec<(i64, String, String)> = sqlx::query_as(
        r#"
        SELECT orders.id, users.name, users.email
        FROM orders JOIN users ON users.id = orders.customer_id
        ORDER BY orders.created_at DESC
        "#,
    )
    .fetch_all(&mut *conn)
    .await?;
    let mut views = Vec::with_capacity(rows.len());
    for (order_id, customer_name, customer_email) in rows {
        let order = match fetch_order(order_id, conn).await? {
            Some(order) => order,
            None => continue,
        };
        let items: Vec<AdminOrderLine> = sqlx::query_as(
            r#"
            SELECT order_items.product_id, products.name, products.price, order_items.quantity
            FROM order_items JOIN products ON products.id = order_items.product_id
            WHERE order_items.order_id = $1
            ORDER BY order_items.rowid
            "#,
        )
        .bind(order_id)
        .fetch_all(&mut *conn)
        .await?;
        views.push(AdminOrderView { order, customer_name, customer_email, items });
    }
    Ok(views)
}

pub async fn update_order_status(
    order_id: i64,
    status: OrderStatus,
    conn: &mut SqliteConnection,
) -> Result<Order, OrderApiError> {
    let status = status.to_string();
    let result: Option<Order> =
        sqlx::query_as("UPDATE orders SET status = $1, updated_at = CURRENT_TIMESTAMP WHERE id = $2 RETURNING *")
            .bind(status)
            .bind(order_id)
            .fetch_optional(conn)
            .await?;
    result.ok_or(OrderApiError::OrderNotFound(order_id))
}

/// Units and revenue for the vendor's own line items, grouped by calendar month. Revenue is
/// computed against the live product price, as the original aggregation did.
pub async fn sales_report_for_vendor(
    vendor_id: i64,
    conn: &mut SqliteConnection,
) -> Result<SalesReport, sqlx::Error> {
    let rows: Vec<(i64, i64, i64)> = sqlx::query_as(
        r#"
        SELECT CAST(strftime('%m', orders.created_at) AS INTEGER) AS month,
               SUM(order_items.quantity) AS units,
               SUM(products.price * order_items.quantity) AS revenue
        FROM order_items
        JOIN orders ON orders.id = order_items.order_id
        JOIN products ON products.id = order_items.product_id
        WHERE products.vendor_id = $1
        GROUP BY month
        ORDER BY month
        "#,
    )
    .bind(vendor_id)
    .fetch_all(conn)
    .await?;
    let mut total_sales = 0;
    let mut total_revenue = Price::default();
    let mut sales_by_month = Vec::with_capacity(rows.len());
    for (month, units, revenue) in rows {
        let name = MONTH_NAMES.get((month - 1).max(0) as usize).copied().unwrap_or("???");
        sales_by_month.push(MonthlySales { month: name.to_string(), units });
        total_sales += units;
        total_revenue = total_revenue + Price::from(revenue);
    }
    Ok(SalesReport { total_sales, total_revenue, sales_by_month })
}
