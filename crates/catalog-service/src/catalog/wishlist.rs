//! Per-user wishlists.

use serde::Serialize;
use tracing::info;

use catalog_auth::IdentityContext;
use catalog_core::error::AppError;
use catalog_core::result::AppResult;
use catalog_core::traits::Repository;
use catalog_core::types::ProductId;
use catalog_core::types::pagination::{PageRequest, PageResponse};
use catalog_database::repositories::{ProductRepository, WishlistRepository};
use catalog_entity::wishlist::WishlistEntry;

/// What adding a product to a wishlist did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WishlistAdd {
    Added,
    AlreadyPresent,
}

impl WishlistAdd {
    /// Client-facing confirmation.
    pub fn message(self) -> &'static str {
        match self {
            Self::Added => "Product added to wishlist successfully",
            Self::AlreadyPresent => "Product is already in wishlist",
        }
    }
}

/// Wishlist totals for the caller and for everyone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WishlistCounts {
    pub total_wishlist_count: u64,
    pub my_wishlist_count: u64,
}

/// Handles saving and unsaving products.
#[derive(Debug, Clone)]
pub struct WishlistService {
    wishlists: WishlistRepository,
    products: ProductRepository,
}

impl WishlistService {
    /// Creates a new wishlist service.
    pub fn new(wishlists: WishlistRepository, products: ProductRepository) -> Self {
        Self {
            wishlists,
            products,
        }
    }

    /// The caller's saved products.
    pub async fn list(
        &self,
        ctx: &IdentityContext,
        page: &PageRequest,
    ) -> AppResult<PageResponse<WishlistEntry>> {
        self.wishlists.find_by_user(ctx.subject_id, page).await
    }

    /// Saves a product for the caller. Saving twice is not an error.
    pub async fn add(&self, ctx: &IdentityContext, product_id: ProductId) -> AppResult<WishlistAdd> {
        if self.products.find_by_id(product_id).await?.is_none() {
            return Err(AppError::not_found("product not found"));
        }

        if self.wishlists.add(ctx.subject_id, product_id).await? {
            info!(user_id = %ctx.subject_id, product_id = %product_id, "Product wishlisted");
            Ok(WishlistAdd::Added)
        } else {
            Ok(WishlistAdd::AlreadyPresent)
        }
    }

    /// Removes a product from the caller's wishlist.
    pub async fn remove(&self, ctx: &IdentityContext, product_id: ProductId) -> AppResult<()> {
        if !self.wishlists.remove(ctx.subject_id, product_id).await? {
            return Err(AppError::not_found("product is not in your wishlist"));
        }
        info!(user_id = %ctx.subject_id, product_id = %product_id, "Product removed from wishlist");
        Ok(())
    }

    /// Saved-product totals.
    pub async fn counts(&self, ctx: &IdentityContext) -> AppResult<WishlistCounts> {
        Ok(WishlistCounts {
            total_wishlist_count: self.wishlists.count_all().await?,
            my_wishlist_count: self.wishlists.count_by_user(ctx.subject_id).await?,
        })
    }
}
