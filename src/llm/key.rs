use std::fmt;
use std::str::FromStr;

use anyhow::Context;

/// Environment variable the API key is read from. A `.env` file in the working directory also works.
pub const API_KEY_ENV: &str = "QUIZMATE_OPENAI_API_KEY";

/// OpenAI API key taken from process configuration. Debug output never shows the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Blank values count as no key at all.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_string()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

impl FromStr for ApiKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        Self::new(s).context("API key must not be blank")
    }
}
