//! Newtype wrappers around `u64` for all catalog entity identifiers.
//!
//! Using distinct types prevents accidentally passing a `UserId` where a
//! `ProductId` is expected. Rows use `BIGSERIAL` keys; when the `sqlx`
//! feature is enabled each ID type encodes as a PostgreSQL `BIGINT`.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Macro to define a newtype ID wrapper around `u64`.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// Create an identifier from a raw value.
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            /// Return the inner value.
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse::<u64>().map(Self)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> u64 {
                id.0
            }
        }

        #[cfg(feature = "sqlx")]
        impl sqlx::Type<sqlx::Postgres> for $name {
            fn type_info() -> sqlx::postgres::PgTypeInfo {
                <i64 as sqlx::Type<sqlx::Postgres>>::type_info()
            }
        }

        #[cfg(feature = "sqlx")]
        impl<'q> sqlx::Encode<'q, sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut <sqlx::Postgres as sqlx::Database>::ArgumentBuffer<'q>,
            ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
                let value = i64::try_from(self.0)?;
                <i64 as sqlx::Encode<'q, sqlx::Postgres>>::encode_by_ref(&value, buf)
            }
        }

        #[cfg(feature = "sqlx")]
        impl<'r> sqlx::Decode<'r, sqlx::Postgres> for $name {
            fn decode(
                value: <sqlx::Postgres as sqlx::Database>::ValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                let raw = <i64 as sqlx::Decode<'r, sqlx::Postgres>>::decode(value)?;
                Ok(Self(u64::try_from(raw)?))
            }
        }
    };
}

define_id!(
    /// Unique identifier for a user.
    UserId
);

define_id!(
    /// Unique identifier for a product.
    ProductId
);

define_id!(
    /// Unique identifier for a category.
    CategoryId
);

define_id!(
    /// Unique identifier for a product review.
    ReviewId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let id: UserId = "42".parse().unwrap();
        assert_eq!(id, UserId::new(42));
        assert_eq!(id.to_string(), "42");
        assert!("-1".parse::<ProductId>().is_err());
    }

    #[test]
    fn test_serde_is_transparent() {
        let json = serde_json::to_string(&CategoryId::new(7)).unwrap();
        assert_eq!(json, "7");
        let back: CategoryId = serde_json::from_str(&json).unwrap();
        assert_eq!(back.get(), 7);
    }
}
