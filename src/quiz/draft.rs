use serde_json::{Map, Value};

use super::error::{ExtractError, FieldIssue};
use super::extract::{decode_object, value_kind};
use super::model::{Answer, Difficulty, Question, QuestionType, Quiz};
use super::score::passing_score;

const MIN_ANSWERS: usize = 2;
const MAX_ANSWERS: usize = 6;

/// Everything the extractor needs to know about the request that produced a completion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizParams {
    pub topic: String,
    pub num_questions: u32,
    pub difficulty: Difficulty,
    pub include_explanations: bool,
    pub question_type: QuestionType,
    pub category_id: String,
    pub time_minutes: u32,
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Decoded model payload before it is checked against the quiz schema.
#[derive(Debug, Default)]
struct QuizDraft {
    title: Option<Value>,
    description: Option<Value>,
    questions: Option<Value>,
}

impl From<Map<String, Value>> for QuizDraft {
    fn from(mut map: Map<String, Value>) -> Self {
        Self {
            title: map.remove("title"),
            description: map.remove("description"),
            questions: map.remove("questions"),
        }
    }
}

#[derive(Debug, Default)]
struct Issues(Vec<FieldIssue>);

impl Issues {
    fn push(&mut self, path: impl Into<String>, problem: impl Into<String>) {
        self.0.push(FieldIssue::new(path, problem));
    }

    fn optional_string(&mut self, value: Option<&Value>, path: &str) -> Option<String> {
        match value {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => {
                self.push(path, format!("expected a string, got {}", value_kind(other)));
                None
            }
        }
    }

    fn required_text(&mut self, value: Option<&Value>, path: &str) -> Option<String> {
        match value {
            None | Some(Value::Null) => {
                self.push(path, "missing");
                None
            }
            Some(Value::String(s)) if s.trim().is_empty() => {
                self.push(path, "must not be empty");
                None
            }
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => {
                self.push(path, format!("expected a string, got {}", value_kind(other)));
                None
            }
        }
    }
}

/// Turns a raw model completion into a validated quiz.
pub fn parse_quiz(raw: &str, params: &QuizParams) -> Result<Quiz, ExtractError> {
    let draft = QuizDraft::from(decode_object(raw)?);
    build_quiz(draft, params)
}

fn build_quiz(draft: QuizDraft, params: &QuizParams) -> Result<Quiz, ExtractError> {
    let mut issues = Issues::default();

    let title = non_empty(params.title.as_deref())
        .or_else(|| non_empty(issues.optional_string(draft.title.as_ref(), "title").as_deref()))
        .unwrap_or_else(|| format!("Quiz on {}", params.topic));

    let description = non_empty(params.description.as_deref())
        .or_else(|| {
            non_empty(
                issues
                    .optional_string(draft.description.as_ref(), "description")
                    .as_deref(),
            )
        })
        .unwrap_or_else(|| {
            format!(
                "A {} level quiz about {}",
                params.difficulty.as_str().to_lowercase(),
                params.topic
            )
        });

    let raw_questions: &[Value] = match &draft.questions {
        None | Some(Value::Null) => &[],
        Some(Value::Array(items)) => items.as_slice(),
        Some(other) => {
            issues.push("questions", format!("expected an array, got {}", value_kind(other)));
            &[]
        }
    };

    let questions: Vec<Question> = raw_questions
        .iter()
        .enumerate()
        .filter_map(|(idx, value)| map_question(value, &format!("questions[{idx}]"), params, &mut issues))
        .collect();

    if !issues.0.is_empty() {
        tracing::error!(count = issues.0.len(), "quiz data from LLM response failed validation");
        return Err(ExtractError::MalformedField { issues: issues.0 });
    }

    if questions.is_empty() {
        tracing::error!("quiz data from LLM response has no questions");
        return Err(ExtractError::EmptyQuiz);
    }

    let total_points: u32 = questions.iter().map(|q| q.points).fold(0, u32::saturating_add);

    Ok(Quiz {
        title,
        description,
        difficulty: params.difficulty,
        category_id: params.category_id.clone(),
        time_minutes: params.time_minutes,
        questions,
        passing_score: passing_score(total_points),
        tags: vec![params.topic.clone()],
    })
}

fn map_question(value: &Value, path: &str, params: &QuizParams, issues: &mut Issues) -> Option<Question> {
    let Some(obj) = value.as_object() else {
        issues.push(path, format!("expected an object, got {}", value_kind(value)));
        return None;
    };

    let text = issues.required_text(obj.get("text"), &format!("{path}.text"));

    let points = match obj.get("points") {
        None | Some(Value::Null) => Some(1),
        Some(Value::Number(n)) => match whole_points(n) {
            Some(p) if p >= 1 => Some(p),
            _ => {
                issues.push(format!("{path}.points"), format!("expected an integer >= 1, got {n}"));
                None
            }
        },
        Some(other) => {
            issues.push(
                format!("{path}.points"),
                format!("expected an integer >= 1, got {}", value_kind(other)),
            );
            None
        }
    };

    let question_type = match obj.get("questionType") {
        None | Some(Value::Null) => Some(params.question_type),
        Some(Value::String(s)) => {
            let parsed = QuestionType::from_wire(s);
            if parsed.is_none() {
                issues.push(
                    format!("{path}.questionType"),
                    format!("expected SingleChoice or TrueFalse, got \"{s}\""),
                );
            }
            parsed
        }
        Some(other) => {
            issues.push(
                format!("{path}.questionType"),
                format!("expected a string, got {}", value_kind(other)),
            );
            None
        }
    };

    let answers = map_answers(obj.get("answers"), &format!("{path}.answers"), params, issues);

    let explanation = if params.include_explanations {
        issues.optional_string(obj.get("explanation"), &format!("{path}.explanation"))
    } else {
        None
    };
    let image_url = issues.optional_string(obj.get("imageUrl"), &format!("{path}.imageUrl"));

    Some(Question {
        text: text?,
        question_type: question_type?,
        points: points?,
        answers: answers?,
        explanation,
        image_url,
    })
}

fn map_answers(
    value: Option<&Value>,
    path: &str,
    params: &QuizParams,
    issues: &mut Issues,
) -> Option<Vec<Answer>> {
    let items = match value {
        None | Some(Value::Null) => {
            issues.push(path, "missing");
            return None;
        }
        Some(Value::Array(items)) => items,
        Some(other) => {
            issues.push(path, format!("expected an array, got {}", value_kind(other)));
            return None;
        }
    };

    let mut valid = (MIN_ANSWERS..=MAX_ANSWERS).contains(&items.len());
    if !valid {
        issues.push(
            path,
            format!(
                "expected between {MIN_ANSWERS} and {MAX_ANSWERS} answers, got {}",
                items.len()
            ),
        );
    }

    let mut answers = Vec::with_capacity(items.len());
    for (idx, item) in items.iter().enumerate() {
        match map_answer(item, &format!("{path}[{idx}]"), params, issues) {
            Some(answer) => answers.push(answer),
            None => valid = false,
        }
    }

    valid.then_some(answers)
}

fn map_answer(value: &Value, path: &str, params: &QuizParams, issues: &mut Issues) -> Option<Answer> {
    let Some(obj) = value.as_object() else {
        issues.push(path, format!("expected an object, got {}", value_kind(value)));
        return None;
    };

    let text = issues.required_text(obj.get("text"), &format!("{path}.text"));

    let is_correct = match obj.get("isCorrect") {
        Some(Value::Bool(b)) => Some(*b),
        None | Some(Value::Null) => {
            issues.push(format!("{path}.isCorrect"), "missing");
            None
        }
        Some(other) => {
            issues.push(
                format!("{path}.isCorrect"),
                format!("expected a boolean, got {}", value_kind(other)),
            );
            None
        }
    };

    let explanation = if params.include_explanations {
        issues.optional_string(obj.get("explanation"), &format!("{path}.explanation"))
    } else {
        None
    };

    Some(Answer {
        text: text?,
        is_correct: is_correct?,
        explanation,
    })
}

/// Integers, or floats with no fractional part such as `2.0`.
fn whole_points(n: &serde_json::Number) -> Option<u32> {
    if let Some(p) = n.as_u64() {
        return u32::try_from(p).ok();
    }
    n.as_f64()
        .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= f64::from(u32::MAX))
        .map(|f| f as u32)
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty()).map(str::to_string)
}
