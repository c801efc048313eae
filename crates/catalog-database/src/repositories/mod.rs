//! Repository implementations for all catalog entities.

pub mod category;
pub mod product;
pub mod review;
pub mod user;
pub mod wishlist;

pub use category::CategoryRepository;
pub use product::ProductRepository;
pub use review::ReviewRepository;
pub use user::{UserFilter, UserRepository};
pub use wishlist::WishlistRepository;
