use std::path::PathBuf;
use tempfile::TempDir;

/// Test environment backed by a temporary directory.
///
/// The directory and everything written into it is removed when the context is
/// dropped, so keep the context alive for as long as the paths are used.
pub struct TestContext {
    pub dir: TempDir,

    /// Where the bot token file lives. Only written when the builder was given a
    /// token.
    pub token_path: PathBuf,

    /// Path for log output. Never created up front.
    pub log_path: PathBuf,
}

impl TestContext {
    pub fn new(dir: TempDir) -> Self {
        let token_path = dir.path().join("bot_token.txt");
        let log_path = dir.path().join("bot.log");

        Self {
            dir,
            token_path,
            log_path,
        }
    }
}
