//! Product domain entities.

pub mod model;
pub mod status;

pub use model::{CreateProduct, Product, ProductFilter, UpdateProduct};
pub use status::ProductStatus;
