use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::{Value, json};

use super::AppState;
use super::error::ApiError;
use crate::quiz::category::{CATEGORIES, Category, topics};
use crate::quiz::{DEFAULT_TIME_MINUTES, QuestionType, Quiz, QuizParams, QuizRequest, category_name};

pub(crate) fn create_router() -> Router<AppState> {
    Router::new()
        .route("/quiz", post(generate_quiz))
        .route("/quiz/topics", get(get_quiz_topics))
        .route("/quiz/categories", get(get_quiz_categories))
}

pub(crate) async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "status": "healthy", "environment": state.environment() }))
}

/// Field checks first, then the category lookup. Both happen before anything reaches the model.
pub fn quiz_params(request: &QuizRequest) -> Result<QuizParams, ApiError> {
    request.validate().map_err(ApiError::InvalidRequest)?;
    let topic = category_name(&request.category_id)
        .ok_or_else(|| ApiError::InvalidCategory(request.category_id.clone()))?;

    Ok(QuizParams {
        topic: topic.to_string(),
        num_questions: request.num_questions,
        difficulty: request.difficulty,
        include_explanations: request.include_explanations,
        question_type: QuestionType::SingleChoice,
        category_id: request.category_id.clone(),
        time_minutes: DEFAULT_TIME_MINUTES,
        title: Some(request.title.clone()),
        description: Some(format!("A {} level quiz about {}", request.difficulty, topic)),
    })
}

async fn generate_quiz(
    State(state): State<AppState>,
    payload: Result<Json<QuizRequest>, JsonRejection>,
) -> Result<Json<Quiz>, ApiError> {
    let Json(request) = payload?;
    let params = quiz_params(&request)?;
    tracing::info!(
        category = %params.topic,
        difficulty = %params.difficulty,
        num_questions = params.num_questions,
        "generating quiz"
    );

    let quiz = state.generator().generate(&params).await?;
    Ok(Json(quiz))
}

#[derive(Serialize)]
struct TopicsResponse {
    topics: Vec<&'static str>,
}

async fn get_quiz_topics() -> Json<TopicsResponse> {
    Json(TopicsResponse { topics: topics() })
}

#[derive(Serialize)]
struct CategoriesResponse {
    categories: &'static [Category],
}

async fn get_quiz_categories() -> Json<CategoriesResponse> {
    Json(CategoriesResponse {
        categories: CATEGORIES,
    })
}
