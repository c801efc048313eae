//! Wishlist entities.

pub mod model;

pub use model::WishlistEntry;
