use std::fs;

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
///
/// let test = TestBuilder::new()
///     .with_token("token")
///     .build()?;
/// ```
#[derive(Default)]
pub struct TestBuilder {
    /// Contents of the token file, written verbatim during `build()`.
    token: Option<String>,
}

impl TestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes `token` to the token file when the context is built.
    ///
    /// The text is not trimmed, so tests can check how surrounding whitespace is
    /// handled.
    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    /// Creates the temporary directory and writes the configured files.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - The prepared environment
    /// - `Err(TestError::Io)` - The directory or a file could not be created
    pub fn build(self) -> Result<TestContext, TestError> {
        let context = TestContext::new(tempfile::tempdir()?);

        if let Some(token) = &self.token {
            fs::write(&context.token_path, token)?;
        }

        Ok(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests building without a token.
    ///
    /// Expected: the directory exists and no token file is written
    #[test]
    fn builds_empty_directory() -> Result<(), TestError> {
        let test = TestBuilder::new().build()?;

        assert!(test.dir.path().is_dir());
        assert!(!test.token_path.exists());
        assert!(!test.log_path.exists());

        Ok(())
    }

    /// Tests that the token is written verbatim.
    ///
    /// Expected: file contents match the given text exactly
    #[test]
    fn writes_token_verbatim() -> Result<(), TestError> {
        let test = TestBuilder::new().with_token(" abc.def.ghi\n").build()?;

        assert_eq!(fs::read_to_string(&test.token_path)?, " abc.def.ghi\n");

        Ok(())
    }
}
