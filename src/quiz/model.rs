use std::fmt;
use std::str::FromStr;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

pub const MAX_QUESTIONS: u32 = 20;
pub const DEFAULT_TIME_MINUTES: u32 = 10;
pub const MIN_TITLE_CHARS: usize = 3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            other => bail!("Unknown difficulty '{other}', expected Beginner, Intermediate or Advanced"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionType {
    #[default]
    SingleChoice,
    TrueFalse,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::SingleChoice => "SingleChoice",
            QuestionType::TrueFalse => "TrueFalse",
        }
    }

    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "SingleChoice" => Some(QuestionType::SingleChoice),
            "TrueFalse" => Some(QuestionType::TrueFalse),
            _ => None,
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_num_questions() -> u32 {
    5
}

fn default_include_explanations() -> bool {
    true
}

/// Body of `POST /api/quiz`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizRequest {
    pub title: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default = "default_num_questions")]
    pub num_questions: u32,
    #[serde(default = "default_include_explanations")]
    pub include_explanations: bool,
    #[serde(rename = "categoryId")]
    pub category_id: String,
}

impl QuizRequest {
    /// Field constraints that serde cannot express. The category is looked up separately.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().chars().count() < MIN_TITLE_CHARS {
            bail!("title must be at least {MIN_TITLE_CHARS} characters");
        }
        if !(1..=MAX_QUESTIONS).contains(&self.num_questions) {
            bail!(
                "num_questions must be between 1 and {MAX_QUESTIONS}, got {}",
                self.num_questions
            );
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
    #[serde(rename = "isCorrect")]
    pub is_correct: bool,
    pub explanation: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    #[serde(rename = "questionType")]
    pub question_type: QuestionType,
    pub points: u32,
    pub answers: Vec<Answer>,
    pub explanation: Option<String>,
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub category_id: String,
    pub time_minutes: u32,
    pub questions: Vec<Question>,
    pub passing_score: u32,
    pub tags: Vec<String>,
}
