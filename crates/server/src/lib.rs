//! HTTP read API over the project store.
//!
//! Four GET routes, JSON in and out, nothing writable from the outside.
//! Unknown category/style names fall outside the closed enumerations and
//! simply match nothing, so those routes answer `[]` rather than 400.

use std::sync::Arc;

use atelier_core::{Category, Project, Style};
use atelier_storage::ProjectStore;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

#[derive(Clone)]
pub struct AppState {
    store: Arc<ProjectStore>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

pub fn router(store: Arc<ProjectStore>) -> Router {
    Router::new()
        .route("/api/projects", get(list_projects))
        .route("/api/projects/:id", get(get_project))
        .route("/api/projects/category/:category", get(list_by_category))
        .route("/api/projects/style/:style", get(list_by_style))
        .with_state(AppState { store })
}

async fn list_projects(State(state): State<AppState>) -> Json<Vec<Project>> {
    tracing::debug!(count = state.store.len(), "list projects");
    Json(state.store.list_all().to_vec())
}

async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Project>, (StatusCode, Json<ErrorBody>)> {
    match state.store.get_by_id(&id) {
        Some(project) => Ok(Json(project.clone())),
        None => {
            tracing::debug!(%id, "project not found");
            Err((
                StatusCode::NOT_FOUND,
                Json(ErrorBody {
                    error: "Project not found".to_string(),
                }),
            ))
        }
    }
}

async fn list_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Json<Vec<Project>> {
    let projects = match category.parse::<Category>() {
        Ok(category) => state.store.list_by_category(category),
        Err(_) => Vec::new(),
    };
    tracing::debug!(%category, count = projects.len(), "list projects by category");
    Json(projects)
}

async fn list_by_style(
    State(state): State<AppState>,
    Path(style): Path<String>,
) -> Json<Vec<Project>> {
    let projects = match style.parse::<Style>() {
        Ok(style) => state.store.list_by_style(style),
        Err(_) => Vec::new(),
    };
    tracing::debug!(%style, count = projects.len(), "list projects by style");
    Json(projects)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_state() -> AppState {
        AppState {
            store: Arc::new(ProjectStore::seeded().expect("seed data is valid")),
        }
    }

    #[tokio::test]
    async fn list_returns_all_ten_records() {
        let Json(projects) = list_projects(State(seeded_state())).await;
        assert_eq!(projects.len(), 10);
    }

    #[tokio::test]
    async fn get_known_id_returns_record() {
        let result = get_project(State(seeded_state()), Path("5".to_string())).await;
        let Json(project) = result.expect("id 5 exists");
        assert_eq!(project.title, "Minimalist Chef's Kitchen");
    }

    #[tokio::test]
    async fn get_unknown_id_returns_not_found_body() {
        let result = get_project(State(seeded_state()), Path("999".to_string())).await;
        let (status, Json(body)) = result.expect_err("id 999 does not exist");
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.error, "Project not found");
    }

    #[tokio::test]
    async fn category_route_filters_server_side() {
        let Json(projects) =
            list_by_category(State(seeded_state()), Path("kitchen".to_string())).await;
        assert_eq!(projects.len(), 2);
        assert!(projects.iter().all(|p| p.category == Category::Kitchen));
    }

    #[tokio::test]
    async fn unknown_category_yields_empty_array() {
        let Json(projects) =
            list_by_category(State(seeded_state()), Path("garage".to_string())).await;
        assert!(projects.is_empty());
    }

    #[tokio::test]
    async fn style_route_filters_server_side() {
        let Json(projects) =
            list_by_style(State(seeded_state()), Path("contemporary".to_string())).await;
        assert!(!projects.is_empty());
        assert!(projects.iter().all(|p| p.style == Style::Contemporary));
    }
}
