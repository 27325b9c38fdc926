//! In-process catalog backend and fixtures shared by the client tests.

use std::{collections::HashSet, sync::Arc};

use async_trait::async_trait;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use shared::{
    domain::{Lesson, LessonId},
    protocol::{Acknowledgement, OrderRequest, SpacesUpdate},
};
use tokio::{net::TcpListener, sync::Mutex};

use crate::{catalog::CatalogService, error::CatalogError};

pub(crate) fn lesson(id: &str, subject: &str, price: f64, spaces: u32) -> Lesson {
    Lesson {
        id: LessonId::new(id),
        catalog_id: None,
        subject: subject.to_string(),
        location: "Hendon".into(),
        price,
        spaces,
        icon: None,
    }
}

pub(crate) fn sample_catalog() -> Vec<Lesson> {
    vec![
        lesson("l-math", "Math", 20.0, 2),
        lesson("l-art", "Art", 30.0, 5),
        lesson("l-music", "Music", 25.0, 0),
    ]
}

/// Lessons as the live backend stores them: a Mongo `_id` next to a numeric
/// `id` of its own.
pub(crate) fn numbered_catalog() -> Vec<Lesson> {
    sample_catalog()
        .into_iter()
        .zip(1001..)
        .map(|(lesson, number)| Lesson {
            catalog_id: Some(json!(number)),
            ..lesson
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum OrderReply {
    #[default]
    Confirm,
    Unconfirmed,
    ServerError,
}

#[derive(Debug, Default)]
pub(crate) struct BackendData {
    pub lessons: Vec<Lesson>,
    pub fail_fetch: bool,
    pub order_reply: OrderReply,
    pub failing_updates: HashSet<String>,
    /// Answer successful updates with a plain-text body instead of JSON.
    pub plain_text_updates: bool,
    pub lesson_fetches: usize,
    pub orders: Vec<Value>,
    pub space_updates: Vec<(String, u32)>,
}

#[derive(Clone)]
pub(crate) struct BackendState {
    pub data: Arc<Mutex<BackendData>>,
}

#[derive(Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
}

async fn list_lessons(State(state): State<BackendState>) -> (StatusCode, Json<Value>) {
    let mut data = state.data.lock().await;
    data.lesson_fetches += 1;
    if data.fail_fetch {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "database unavailable" })),
        );
    }
    (StatusCode::OK, Json(json!(data.lessons)))
}

async fn search_lessons(
    State(state): State<BackendState>,
    Query(params): Query<SearchParams>,
) -> (StatusCode, Json<Value>) {
    let data = state.data.lock().await;
    if data.fail_fetch {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "database unavailable" })),
        );
    }
    let needle = params.q.to_lowercase();
    let matches: Vec<&Lesson> = data
        .lessons
        .iter()
        .filter(|lesson| {
            lesson.subject.to_lowercase().contains(&needle)
                || lesson.location.to_lowercase().contains(&needle)
        })
        .collect();
    (StatusCode::OK, Json(json!(matches)))
}

async fn update_lesson(
    State(state): State<BackendState>,
    Path(id): Path<String>,
    Json(update): Json<SpacesUpdate>,
) -> Response {
    let mut data = state.data.lock().await;
    if data.failing_updates.contains(&id) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "write conflict" })),
        )
            .into_response();
    }
    let Some(lesson) = data.lessons.iter_mut().find(|lesson| lesson.id.as_str() == id) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Lesson not found" })),
        )
            .into_response();
    };
    lesson.spaces = update.spaces;
    data.space_updates.push((id, update.spaces));
    if data.plain_text_updates {
        return (StatusCode::OK, "updated").into_response();
    }
    (
        StatusCode::OK,
        Json(json!({ "message": "Lesson updated successfully" })),
    )
        .into_response()
}

async fn place_order(
    State(state): State<BackendState>,
    Json(order): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut data = state.data.lock().await;
    match data.order_reply {
        OrderReply::Confirm => {
            data.orders.push(order);
            (
                StatusCode::CREATED,
                Json(json!({ "message": "Order submitted successfully" })),
            )
        }
        OrderReply::Unconfirmed => (StatusCode::OK, Json(json!({ "acknowledged": false }))),
        OrderReply::ServerError => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "could not save order" })),
        ),
    }
}

pub(crate) async fn spawn_catalog_backend(data: BackendData) -> (String, BackendState) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let state = BackendState {
        data: Arc::new(Mutex::new(data)),
    };
    let app = Router::new()
        .route("/api/lessons", get(list_lessons))
        .route("/api/lessons/:id", put(update_lesson))
        .route("/api/search", get(search_lessons))
        .route("/api/order", post(place_order))
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}/api"), state)
}

/// Base url of a port with nothing listening on it.
pub(crate) async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{addr}/api")
}

/// [`CatalogService`] double that serves fixed data and records calls.
#[derive(Default)]
pub(crate) struct ScriptedCatalog {
    pub lessons: Vec<Lesson>,
    pub search_results: Vec<Lesson>,
    pub fail_with_status: Option<u16>,
    pub calls: Mutex<Vec<String>>,
}

impl ScriptedCatalog {
    pub fn with_lessons(lessons: Vec<Lesson>) -> Self {
        Self {
            lessons,
            ..Self::default()
        }
    }

    fn check(&self) -> Result<(), CatalogError> {
        match self.fail_with_status {
            Some(status) => Err(CatalogError::Status {
                status,
                message: None,
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CatalogService for ScriptedCatalog {
    async fn fetch_lessons(&self) -> Result<Vec<Lesson>, CatalogError> {
        self.calls.lock().await.push("fetch".into());
        self.check()?;
        Ok(self.lessons.clone())
    }

    async fn search_lessons(&self, query: &str) -> Result<Vec<Lesson>, CatalogError> {
        self.calls.lock().await.push(format!("search:{query}"));
        self.check()?;
        Ok(self.search_results.clone())
    }

    async fn update_lesson_spaces(
        &self,
        lesson_id: &LessonId,
        spaces: u32,
    ) -> Result<Acknowledgement, CatalogError> {
        self.calls
            .lock()
            .await
            .push(format!("update:{lesson_id}:{spaces}"));
        self.check()?;
        Ok(Acknowledgement {
            message: Some("Lesson updated successfully".into()),
            ..Acknowledgement::default()
        })
    }

    async fn submit_order(&self, order: &OrderRequest) -> Result<Acknowledgement, CatalogError> {
        self.calls
            .lock()
            .await
            .push(format!("order:{}", order.lessons.len()));
        self.check()?;
        Ok(Acknowledgement {
            message: Some("Order submitted successfully".into()),
            ..Acknowledgement::default()
        })
    }
}
