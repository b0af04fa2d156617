use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::Args;

use crate::llm::{API_KEY_ENV, ApiKey, ModelSettings};

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 8000;

/// Model selection shared by every command that talks to the LLM.
#[derive(Debug, Clone, Args)]
pub struct ModelArgs {
    /// Model used to generate quizzes
    #[arg(long, env = "QUIZMATE_MODEL", default_value = "gpt-4.1-mini")]
    pub model: String,

    /// Sampling temperature for quiz generation
    #[arg(long, env = "QUIZMATE_TEMPERATURE", default_value_t = 0.2)]
    pub temperature: f32,

    /// Base URL of an OpenAI-compatible API
    #[arg(long, env = "QUIZMATE_API_BASE")]
    pub api_base: Option<String>,

    /// OpenAI API key
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    pub api_key: Option<ApiKey>,
}

impl ModelArgs {
    pub fn settings(&self) -> ModelSettings {
        ModelSettings {
            model: self.model.clone(),
            temperature: self.temperature,
            api_base: self.api_base.clone(),
            api_key: self.api_key.clone(),
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct Settings {
    #[arg(long, env = "API_HOST", default_value_t = DEFAULT_HOST)]
    pub host: IpAddr,

    #[arg(short, long, env = "API_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Reported by /health
    #[arg(long, env = "API_ENVIRONMENT", default_value = "development")]
    pub environment: String,

    #[command(flatten)]
    pub model: ModelArgs,
}

impl Settings {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn is_development(&self) -> bool {
        self.environment.eq_ignore_ascii_case("development")
    }

    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }

    pub fn is_testing(&self) -> bool {
        self.environment.eq_ignore_ascii_case("testing")
    }
}
