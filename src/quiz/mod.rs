pub mod category;
pub mod draft;
pub mod error;
pub mod extract;
pub mod generator;
pub mod model;
pub mod score;

pub use category::{CATEGORIES, Category, category_name};
pub use draft::{QuizParams, parse_quiz};
pub use error::{ExtractError, FieldIssue, GenerationError};
pub use generator::QuizGenerator;
pub use model::{Answer, DEFAULT_TIME_MINUTES, Difficulty, Question, QuestionType, Quiz, QuizRequest};
