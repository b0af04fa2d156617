use std::sync::Arc;

use crate::llm::{TextModel, quiz_user_prompt};

use super::draft::{QuizParams, parse_quiz};
use super::error::GenerationError;
use super::model::Quiz;

/// Prompt -> model call -> extraction, once per request.
#[derive(Clone)]
pub struct QuizGenerator {
    model: Arc<dyn TextModel>,
}

impl QuizGenerator {
    pub fn new(model: Arc<dyn TextModel>) -> Self {
        Self { model }
    }

    #[tracing::instrument(skip_all, fields(topic = %params.topic, difficulty = %params.difficulty))]
    pub async fn generate(&self, params: &QuizParams) -> Result<Quiz, GenerationError> {
        let prompt = quiz_user_prompt(
            &params.topic,
            params.num_questions,
            params.difficulty,
            params.question_type,
        );

        let raw = self.model.complete(&prompt).await.map_err(|err| {
            tracing::error!(error = %format!("{err:#}"), "LLM call failed");
            GenerationError::Model(err)
        })?;
        tracing::debug!(raw = %raw, "raw LLM response");

        let quiz = parse_quiz(&raw, params)?;
        tracing::info!(
            questions = quiz.questions.len(),
            passing_score = quiz.passing_score,
            "generated quiz"
        );
        Ok(quiz)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use anyhow::{Result, anyhow};
    use async_trait::async_trait;

    use super::*;
    use crate::quiz::{Difficulty, ExtractError, QuestionType};

    struct CannedModel {
        reply: Result<String, String>,
        prompts: Mutex<Vec<String>>,
    }

    impl CannedModel {
        fn new(reply: Result<&str, &str>) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.map(str::to_string).map_err(str::to_string),
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl TextModel for CannedModel {
        async fn complete(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply.clone().map_err(|msg| anyhow!(msg))
        }
    }

    fn params() -> QuizParams {
        QuizParams {
            topic: "Cybersecurity".to_string(),
            num_questions: 2,
            difficulty: Difficulty::Beginner,
            include_explanations: true,
            question_type: QuestionType::SingleChoice,
            category_id: "security".to_string(),
            time_minutes: 10,
            title: None,
            description: None,
        }
    }

    const REPLY: &str = r#"```json
{
  "title": "Security basics",
  "questions": [
    {
      "text": "What does TLS provide?",
      "points": 2,
      "answers": [
        { "text": "Encryption in transit", "isCorrect": true },
        { "text": "Disk encryption", "isCorrect": false }
      ]
    }
  ]
}
```"#;

    #[tokio::test]
    async fn sends_one_prompt_and_parses_reply() {
        let model = CannedModel::new(Ok(REPLY));
        let generator = QuizGenerator::new(model.clone());

        let quiz = generator.generate(&params()).await.unwrap();
        assert_eq!(quiz.title, "Security basics");
        assert_eq!(quiz.questions[0].points, 2);
        assert_eq!(quiz.passing_score, 1);

        let prompts = model.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("topic of Cybersecurity with 2 questions"));
    }

    #[tokio::test]
    async fn model_failure_is_not_retried() {
        let model = CannedModel::new(Err("quota exceeded"));
        let generator = QuizGenerator::new(model.clone());

        let err = generator.generate(&params()).await.unwrap_err();
        assert!(matches!(err, GenerationError::Model(_)));
        assert_eq!(err.to_string(), "LLM call failed: quota exceeded");
        assert_eq!(model.prompts.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unusable_text_fails_generation() {
        let generator = QuizGenerator::new(CannedModel::new(Ok("I'd rather not.")));
        let err = generator.generate(&params()).await.unwrap_err();
        assert!(matches!(err, GenerationError::Extract(ExtractError::ParseFailure(_))));
    }
}
