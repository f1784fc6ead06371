//! Shared test utilities for domain testing
//!
//! This crate provides reusable test infrastructure for all domain crates:
//! - `TestDatabase`: PostgreSQL container with migrations applied and automatic cleanup
//! - `TestDataBuilder`: Deterministic test data generation
//! - `assertions`: Custom assertion helpers
//!
//! # Usage
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn my_postgres_test() {
//!     let db = TestDatabase::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_test");
//!
//!     let entity_id = builder.entity_id();
//!     let sku = builder.name("sku", "main");
//! }
//! ```

use rust_decimal::Decimal;
use uuid::Uuid;

mod postgres;

pub use postgres::TestDatabase;

/// Builder for test data with deterministic randomization
///
/// This ensures tests are reproducible by using seeded random data.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    /// Create a new builder with a seed (for deterministic tests)
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// This is the recommended way to create a builder for consistent test data.
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Generate a deterministic entity ID for testing
    pub fn entity_id(&self) -> Uuid {
        let bytes = self.seed.to_le_bytes();
        let mut uuid_bytes = [0u8; 16];
        uuid_bytes[..8].copy_from_slice(&bytes);
        uuid_bytes[8..16].copy_from_slice(&bytes);
        Uuid::from_bytes(uuid_bytes)
    }

    /// Generate a deterministic entity ID offset from the base seed
    ///
    /// Useful when a single test needs several distinct but reproducible ids.
    pub fn entity_id_n(&self, n: u64) -> Uuid {
        Self::new(self.seed.wrapping_add(n)).entity_id()
    }

    /// Generate a unique name for testing
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("my_test");
    /// let name = builder.name("product", "main");
    /// // Returns: "test-product-12345-main"
    /// ```
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    /// Generate a deterministic money amount between 1.00 and 1000.99
    pub fn amount(&self, offset: u64) -> Decimal {
        let cents = (self.seed.wrapping_add(offset.wrapping_mul(7919)) % 100_000) + 100;
        Decimal::new(cents as i64, 2)
    }
}

/// Test assertion helpers
pub mod assertions {
    use rust_decimal::Decimal;
    use uuid::Uuid;

    /// Assert that two UUIDs are equal with a nice error message
    pub fn assert_uuid_eq(actual: Uuid, expected: Uuid, context: &str) {
        assert_eq!(
            actual, expected,
            "{}: expected UUID {}, got {}",
            context, expected, actual
        );
    }

    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    /// Assert decimal equality with a nice error message
    pub fn assert_decimal_eq(actual: Decimal, expected: Decimal, context: &str) {
        assert_eq!(
            actual, expected,
            "{}: expected {}, got {}",
            context, expected, actual
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_builder_deterministic() {
        let builder1 = TestDataBuilder::new(42);
        let builder2 = TestDataBuilder::new(42);

        assert_eq!(builder1.entity_id(), builder2.entity_id());
        assert_eq!(
            builder1.name("product", "test"),
            builder2.name("product", "test")
        );
        assert_eq!(builder1.amount(3), builder2.amount(3));
    }

    #[test]
    fn test_data_builder_from_name() {
        let builder1 = TestDataBuilder::from_test_name("my_test");
        let builder2 = TestDataBuilder::from_test_name("my_test");

        assert_eq!(builder1.entity_id(), builder2.entity_id());
    }

    #[test]
    fn test_data_builder_different_names() {
        let builder1 = TestDataBuilder::from_test_name("test1");
        let builder2 = TestDataBuilder::from_test_name("test2");

        // Different test names should generate different data
        assert_ne!(builder1.entity_id(), builder2.entity_id());
    }

    #[test]
    fn test_entity_id_n_distinct() {
        let builder = TestDataBuilder::new(7);

        assert_ne!(builder.entity_id_n(1), builder.entity_id_n(2));
        assert_eq!(builder.entity_id_n(1), builder.entity_id_n(1));
    }
}
