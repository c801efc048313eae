//! # catalog-auth
//!
//! Request authentication, authorization and throttling for the catalog API.
//!
//! ## Modules
//!
//! - `jwt` — signed access and refresh token issuance and verification
//! - `identity` — bearer extraction and request-scoped identity resolution
//! - `gate` — role checks against the token and against the live identity store
//! - `store` — identity store seam with PostgreSQL and in-memory backends
//! - `throttle` — fixed-window per-client request throttle and its sweeper
//! - `password` — Argon2id password hashing and policy enforcement

pub mod error;
pub mod gate;
pub mod identity;
pub mod jwt;
pub mod password;
pub mod store;
pub mod throttle;

pub use error::{AuthError, TokenError};
pub use gate::AuthorizationGate;
pub use identity::{IdentityContext, parse_bearer};
pub use jwt::{AccessClaims, RefreshClaims, TokenKind, TokenPair, TokenService};
pub use password::{PasswordHasher, PasswordValidator};
pub use store::{Identity, IdentityStore, MemoryIdentityStore, PgIdentityStore};
pub use throttle::{FixedWindowThrottle, ThrottleDecision, ThrottleSweeper};
