use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use quizmate::config::{ModelArgs, Settings};
use quizmate::quiz::{Difficulty, QuizGenerator, QuizRequest};
use quizmate::server::{self, AppState, quiz_params};
use quizmate::{llm, logging};

#[derive(Parser, Debug)]
#[command(
    name = "quizmate",
    version,
    about = "LLM-backed quiz generation service.",
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true,
    disable_help_subcommand = true
)]
struct Cli {
    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API
    Serve {
        #[command(flatten)]
        settings: Settings,
    },
    /// Generate a single quiz and print it as JSON
    Generate {
        /// Category id, e.g. programming or web_dev
        #[arg(long, value_name = "ID")]
        category: String,
        #[arg(long, default_value = "Intermediate")]
        difficulty: Difficulty,
        #[arg(long, default_value_t = 5)]
        num_questions: u32,
        /// Leave answer and question explanations out
        #[arg(long, default_value_t = false)]
        no_explanations: bool,
        /// Quiz title. By default the model picks one.
        #[arg(long)]
        title: Option<String>,
        #[command(flatten)]
        model: ModelArgs,
    },
    /// Check that the configured OpenAI API key is accepted
    CheckKey {
        #[command(flatten)]
        model: ModelArgs,
    },
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    if let Err(err) = run_cli().await {
        eprintln!("{:?}", err);
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_level)?;

    match cli.command {
        Command::Serve { settings } => run_server(settings).await?,
        Command::Generate {
            category,
            difficulty,
            num_questions,
            no_explanations,
            title,
            model,
        } => {
            generate_once(category, difficulty, num_questions, !no_explanations, title, model).await?;
        }
        Command::CheckKey { model } => {
            llm::OpenAiModel::new(model.settings())?.verify().await?;
            println!("OpenAI API key is valid.");
        }
    }

    Ok(())
}

async fn run_server(settings: Settings) -> Result<()> {
    let model = llm::OpenAiModel::new(settings.model.settings())?;
    let generator = QuizGenerator::new(Arc::new(model));

    tracing::info!(
        environment = %settings.environment,
        development = settings.is_development(),
        "configured quiz generator"
    );

    let state = AppState::new(generator, settings.environment.clone());
    server::serve(settings.addr(), state).await
}

async fn generate_once(
    category: String,
    difficulty: Difficulty,
    num_questions: u32,
    include_explanations: bool,
    title: Option<String>,
    model: ModelArgs,
) -> Result<()> {
    let request = QuizRequest {
        title: title.clone().unwrap_or_else(|| category.clone()),
        difficulty,
        num_questions,
        include_explanations,
        category_id: category,
    };
    let mut params = quiz_params(&request)?;
    // the endpoint always overrides the title, the CLI only when asked
    params.title = title;

    let model = llm::OpenAiModel::new(model.settings())?;
    let quiz = QuizGenerator::new(Arc::new(model))
        .generate(&params)
        .await
        .context("Failed to generate quiz")?;

    println!("{}", serde_json::to_string_pretty(&quiz)?);
    Ok(())
}
