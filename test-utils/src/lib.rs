//! Department 14 Test Utils
//!
//! Shared helpers for the bot's unit tests.
//!
//! # Overview
//!
//! - **TestBuilder**: Fluent builder for a temporary working directory
//! - **TestContext**: The prepared directory with token and log file paths
//! - **TestError**: Error types that can occur during test setup
//! - **serenity**: Serenity model factories built from JSON payloads
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//! use test_utils::factory::TEST_TOKEN;
//!
//! #[test]
//! fn loads_stored_token() -> Result<(), TestError> {
//!     let test = TestBuilder::new().with_token(TEST_TOKEN).build()?;
//!
//!     let store = FileTokenStore::new(&test.token_path);
//!     // Exercise the store...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
pub mod serenity;
