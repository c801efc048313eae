//! Product catalog use cases.

pub mod category;
pub mod product;
pub mod review;
pub mod wishlist;

pub use category::CategoryService;
pub use product::{ProductDetails, ProductService};
pub use review::{ReviewCounts, ReviewService};
pub use wishlist::{WishlistAdd, WishlistCounts, WishlistService};
