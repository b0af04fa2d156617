use std::fmt;

use thiserror::Error;

/// One problem found while mapping a decoded draft onto the quiz schema.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldIssue {
    pub path: String,
    pub problem: String,
}

impl FieldIssue {
    pub fn new(path: impl Into<String>, problem: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            problem: problem.into(),
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.problem)
    }
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Failed to parse quiz data from LLM response")]
    ParseFailure(#[source] serde_json::Error),

    #[error("Failed to parse quiz data from LLM response: expected a JSON object")]
    NotAnObject,

    #[error("Quiz data from LLM response is malformed: {}", join_issues(.issues))]
    MalformedField { issues: Vec<FieldIssue> },

    #[error("LLM response contained no questions")]
    EmptyQuiz,
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("LLM call failed: {0:#}")]
    Model(anyhow::Error),

    #[error(transparent)]
    Extract(#[from] ExtractError),
}
