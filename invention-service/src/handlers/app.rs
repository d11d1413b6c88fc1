use crate::startup::AppState;
use askama::Template;
use axum::{extract::State, response::IntoResponse};

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub model: String,
}

pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    IndexTemplate {
        model: state.invention.provider().model().to_string(),
    }
}
