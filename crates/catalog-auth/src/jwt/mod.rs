//! Signed session tokens: claims, issuance, and verification.

pub mod claims;
pub mod decoder;
pub mod encoder;
pub mod service;

pub use claims::{AccessClaims, RefreshClaims, TokenKind};
pub use decoder::TokenDecoder;
pub use encoder::{IssuedToken, TokenEncoder, TokenPair};
pub use service::TokenService;
