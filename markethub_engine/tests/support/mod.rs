#![allow(dead_code)]

use markethub_engine::{
    db_types::{NewProduct, NewUser, Role, ShippingAddress, User},
    traits::{CatalogManagement, IdentityManagement},
    SqliteDatabase,
};
use mh_common::Price;

/// A fresh in-memory database per test. A single connection keeps the pool pointed at one
/// memory instance.
pub async fn new_db() -> SqliteDatabase {
    let _ = env_logger::try_init();
    SqliteDatabase::new_with_url("sqlite::memory:", 1).await.expect("Error creating database")
}

pub async fn seed_user(db: &SqliteDatabase, name: &str, email: &str, role: Role) -> User {
    let user = NewUser::signup(name.to_string(), email.to_string(), "argon2-hash".to_string(), role);
    db.create_user(user).await.expect("Error creating user")
}

pub async fn seed_product(db: &SqliteDatabase, vendor_id: i64, name: &str, price_cents: i64) -> i64 {
    let product = NewProduct {
        name: name.to_string(),
        price: Price::from(price_cents),
        description: format!("{name} description"),
        category: "general".to_string(),
        stock: 100,
        image_url: None,
    };
    db.insert_product(vendor_id, product).await.expect("Error creating product").id
}

pub fn shipping() -> ShippingAddress {
    ShippingAddress {
        full_name: "Ada Lovelace".to_string(),
        address: "12 Analytical Way".to_string(),
        city: "London".to_string(),
        state: "LDN".to_string(),
        zip_code: "E1 6AN".to_string(),
        country: "UK".to_string(),
    }
}
