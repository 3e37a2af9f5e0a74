pub mod automod;
pub mod content;
pub mod token;

pub use automod::AutoModService;
pub use content::{ContentSource, HttpContentSource};
pub use token::{FileTokenStore, TokenStore};
