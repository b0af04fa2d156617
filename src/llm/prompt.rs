use crate::quiz::{Difficulty, QuestionType};

pub const SYSTEM_PROMPT: &str = r#"
You are an expert educational quiz maker.
You answer with a single JSON object and nothing else.
"#;

const QUIZ_PROMPT_TEMPLATE: &str = r#"
Create a quiz on the topic of {topic} with {num_questions} questions.
The difficulty level should be {difficulty}.
The question type should be {question_type}.

IMPORTANT: You must return a valid JSON object with the following structure:

```json
{
  "title": "Quiz title here",
  "description": "Quiz description here",
  "questions": [
    {
      "text": "Question text",
      "questionType": "{question_type}",
      "points": 1,
      "answers": [
        { "text": "Answer option 1", "isCorrect": true, "explanation": "Why this is correct" },
        { "text": "Answer option 2", "isCorrect": false, "explanation": null },
        { "text": "Answer option 3", "isCorrect": false, "explanation": null },
        { "text": "Answer option 4", "isCorrect": false, "explanation": null }
      ],
      "explanation": "Overall explanation for the question"
    }
  ]
}
```

For "SingleChoice" questions, make exactly one answer correct.
For "TrueFalse" questions, provide exactly two options: "True" and "False".

Assign different point values to questions based on their difficulty. For example:
- Simple questions: 1 point
- Medium difficulty questions: 2 points
- Challenging questions: 3 points

The questions should be diverse and cover different aspects of the topic.
Generate challenging but fair questions appropriate for the {difficulty} difficulty level.

DO NOT include any additional text, only return the JSON object.
"#;

pub fn quiz_user_prompt(
    topic: &str,
    num_questions: u32,
    difficulty: Difficulty,
    question_type: QuestionType,
) -> String {
    QUIZ_PROMPT_TEMPLATE
        .replace("{topic}", topic)
        .replace("{num_questions}", &num_questions.to_string())
        .replace("{difficulty}", difficulty.as_str())
        .replace("{question_type}", question_type.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::extract::fenced_block;

    #[test]
    fn interpolates_request_fields() {
        let prompt = quiz_user_prompt("Cloud Computing", 7, Difficulty::Advanced, QuestionType::TrueFalse);

        assert!(prompt.contains("Create a quiz on the topic of Cloud Computing with 7 questions."));
        assert!(prompt.contains("The difficulty level should be Advanced."));
        assert!(prompt.contains("The question type should be TrueFalse."));
        assert!(prompt.contains(r#""questionType": "TrueFalse""#));
        assert!(prompt.contains("appropriate for the Advanced difficulty level"));
        assert!(!prompt.contains("{topic}"));
        assert!(!prompt.contains("{question_type}"));
    }

    #[test]
    fn states_answer_rules_and_points() {
        let prompt = quiz_user_prompt("Networking", 3, Difficulty::Beginner, QuestionType::SingleChoice);

        assert!(prompt.contains(r#"For "SingleChoice" questions, make exactly one answer correct."#));
        assert!(prompt.contains(r#"provide exactly two options: "True" and "False""#));
        assert!(prompt.contains("Simple questions: 1 point"));
        assert!(prompt.contains("Medium difficulty questions: 2 points"));
        assert!(prompt.contains("Challenging questions: 3 points"));
        assert!(prompt.contains("only return the JSON object"));
    }

    #[test]
    fn embedded_skeleton_is_valid_json() {
        let prompt = quiz_user_prompt("Databases", 5, Difficulty::Intermediate, QuestionType::SingleChoice);
        let skeleton = fenced_block(&prompt).expect("prompt should embed a json block");
        let value: serde_json::Value = serde_json::from_str(skeleton).unwrap();

        let question = &value["questions"][0];
        assert_eq!(question["questionType"], "SingleChoice");
        assert_eq!(question["answers"][0]["isCorrect"], true);
        assert!(question.get("imageUrl").is_none());
        assert!(value.get("title").is_some());
        assert!(value.get("description").is_some());
    }
}
