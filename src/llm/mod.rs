pub mod client;
pub mod key;
pub mod prompt;

pub use client::{ClientError, ModelSettings, OpenAiModel, TextModel};
pub use key::{API_KEY_ENV, ApiKey};
pub use prompt::quiz_user_prompt;
