mod price;

pub mod op;
mod secret;

pub use price::{Price, PriceConversionError};
pub use secret::Secret;
