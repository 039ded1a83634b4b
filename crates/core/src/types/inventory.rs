//! Unit counts: product stock levels and order quantities.
//!
//! Both are stored as Postgres `INT4`, so the accepted ranges stop at
//! `i32::MAX`.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Stock`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StockError {
    /// The count is below zero.
    #[error("stock cannot be negative")]
    Negative,
    /// The count does not fit the column.
    #[error("stock must be at most {max}")]
    TooLarge {
        /// Inclusive upper bound.
        max: i32,
    },
}

/// Errors that can occur when constructing a [`Quantity`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QuantityError {
    /// The count is zero or negative.
    #[error("quantity must be at least 1")]
    NotPositive,
    /// The count does not fit the column.
    #[error("quantity must be at most {max}")]
    TooLarge {
        /// Inclusive upper bound.
        max: i32,
    },
}

/// Units of a product on hand. Zero is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i32")]
pub struct Stock(i32);

impl Stock {
    /// Validate a stock count.
    ///
    /// # Errors
    ///
    /// Returns [`StockError`] if the count is negative or exceeds `i32::MAX`.
    pub fn new(count: i64) -> Result<Self, StockError> {
        if count < 0 {
            return Err(StockError::Negative);
        }
        i32::try_from(count)
            .map(Self)
            .map_err(|_| StockError::TooLarge { max: i32::MAX })
    }

    /// The count as stored.
    #[must_use]
    pub const fn as_i32(&self) -> i32 {
        self.0
    }
}

impl TryFrom<i64> for Stock {
    type Error = StockError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Stock> for i32 {
    fn from(stock: Stock) -> Self {
        stock.0
    }
}

impl fmt::Display for Stock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Units of a product in one order. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i32")]
pub struct Quantity(i32);

impl Quantity {
    /// Validate an order quantity.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError`] if the count is below one or exceeds `i32::MAX`.
    pub fn new(count: i64) -> Result<Self, QuantityError> {
        if count < 1 {
            return Err(QuantityError::NotPositive);
        }
        i32::try_from(count)
            .map(Self)
            .map_err(|_| QuantityError::TooLarge { max: i32::MAX })
    }

    /// The count as stored.
    #[must_use]
    pub const fn as_i32(&self) -> i32 {
        self.0
    }

    /// The count as an unsigned value for arithmetic.
    #[must_use]
    pub fn as_u32(&self) -> u32 {
        self.0.unsigned_abs()
    }
}

impl TryFrom<i64> for Quantity {
    type Error = QuantityError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for i32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// `INT4` encode/decode for a count newtype, re-validating on the way out
/// of the database.
#[cfg(feature = "postgres")]
macro_rules! impl_pg_count {
    ($name:ident) => {
        impl sqlx::Type<sqlx::Postgres> for $name {
            fn type_info() -> sqlx::postgres::PgTypeInfo {
                <i32 as sqlx::Type<sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
                <i32 as sqlx::Type<sqlx::Postgres>>::compatible(ty)
            }
        }

        impl<'r> sqlx::Decode<'r, sqlx::Postgres> for $name {
            fn decode(
                value: sqlx::postgres::PgValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                let count = <i32 as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
                Ok(Self::new(i64::from(count))?)
            }
        }

        impl sqlx::Encode<'_, sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut sqlx::postgres::PgArgumentBuffer,
            ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
                <i32 as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
            }
        }
    };
}

#[cfg(feature = "postgres")]
impl_pg_count!(Stock);
#[cfg(feature = "postgres")]
impl_pg_count!(Quantity);
