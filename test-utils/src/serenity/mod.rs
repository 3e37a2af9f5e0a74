//! Test factories for creating Serenity API objects.
//!
//! The factories deserialize JSON shaped like Discord's API payloads, so the
//! resulting structs are the same ones the gateway hands to event handlers.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::serenity::{create_test_message, create_test_user};
//!
//! let author = create_test_user(175928847299117063, "Nelly", false);
//! let message = create_test_message(1, &author, "!roll 2d6", &[]);
//! ```
//!
//! # Available Factories
//!
//! - `guild::create_test_guild` - Create Serenity Guild objects
//! - `user::create_test_user` - Create Serenity User objects
//! - `message::create_test_message` - Create Serenity Message objects

pub mod guild;
pub mod message;
pub mod user;

pub use guild::create_test_guild;
pub use message::create_test_message;
pub use user::create_test_user;
