//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use catalog_auth::{
    AuthorizationGate, FixedWindowThrottle, IdentityStore, PasswordHasher, PasswordValidator,
    TokenService,
};
use catalog_core::config::AppConfig;
use catalog_database::DatabasePool;
use catalog_database::repositories::{
    CategoryRepository, ProductRepository, ReviewRepository, UserRepository, WishlistRepository,
};
use catalog_service::{
    AdminUserService, AuthService, CategoryService, ProductService, ReviewService, UserService,
    WishlistService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped or cheap handles, so cloning is cheap.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration, loaded once at startup
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL connection pool
    pub db: DatabasePool,

    // ── Auth ─────────────────────────────────────────────────
    /// Access/refresh token issuance and verification
    pub tokens: Arc<TokenService>,
    /// Role checks, coarse and fresh
    pub gate: AuthorizationGate,
    /// Per-client fixed-window throttle
    pub throttle: Arc<FixedWindowThrottle>,

    // ── Services ─────────────────────────────────────────────
    /// Registration, login, refresh
    pub auth_service: Arc<AuthService>,
    /// Profile and password self-service
    pub user_service: Arc<UserService>,
    /// Role changes and account removal
    pub admin_user_service: Arc<AdminUserService>,
    /// Product CRUD and search
    pub product_service: Arc<ProductService>,
    /// Category CRUD and membership
    pub category_service: Arc<CategoryService>,
    /// Product reviews
    pub review_service: Arc<ReviewService>,
    /// Saved products per user
    pub wishlist_service: Arc<WishlistService>,
}

impl AppState {
    /// Wires repositories, auth components and services together.
    ///
    /// The identity store is injected so the authorization gate can run
    /// against PostgreSQL in production and an in-memory store in tests.
    pub fn new(config: AppConfig, db: DatabasePool, identities: Arc<dyn IdentityStore>) -> Self {
        let pool = db.pool().clone();

        // ── Repositories ──────────────────────────────────────
        let user_repo = UserRepository::new(pool.clone());
        let product_repo = ProductRepository::new(pool.clone());
        let category_repo = CategoryRepository::new(pool.clone());
        let review_repo = ReviewRepository::new(pool.clone());
        let wishlist_repo = WishlistRepository::new(pool);

        // ── Auth ──────────────────────────────────────────────
        let tokens = Arc::new(TokenService::new(&config.auth));
        let gate = AuthorizationGate::new(identities);
        let throttle = Arc::new(FixedWindowThrottle::from_config(&config.rate_limit));
        let hasher = PasswordHasher::new();
        let validator = PasswordValidator::new(&config.auth);

        // ── Services ──────────────────────────────────────────
        let auth_service = Arc::new(AuthService::new(
            user_repo.clone(),
            Arc::clone(&tokens),
            hasher.clone(),
            validator.clone(),
        ));
        let user_service = Arc::new(UserService::new(user_repo, hasher, validator));
        let admin_user_service = Arc::new(AdminUserService::new(gate.clone()));
        let product_service = Arc::new(ProductService::new(product_repo.clone()));
        let category_service = Arc::new(CategoryService::new(
            category_repo,
            product_repo.clone(),
        ));
        let review_service = Arc::new(ReviewService::new(review_repo, product_repo.clone()));
        let wishlist_service = Arc::new(WishlistService::new(wishlist_repo, product_repo));

        Self {
            config: Arc::new(config),
            db,
            tokens,
            gate,
            throttle,
            auth_service,
            user_service,
            admin_user_service,
            product_service,
            category_service,
            review_service,
            wishlist_service,
        }
    }
}
