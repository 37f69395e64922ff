//! In-memory FAQ backend used by integration tests and local development.
//!
//! Records are kept in insertion order. The toggle endpoint answers with the
//! status a record had *before* the flip, like the production backend.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;
use uuid::Uuid;

pub const DEFAULT_LIMIT: u32 = 20;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Faq {
    #[serde(rename = "_id")]
    pub id: String,
    pub question: String,
    pub answer: String,
    pub status: bool,
}

#[derive(Deserialize)]
pub struct FaqInput {
    pub question: String,
    pub answer: String,
    #[serde(default = "default_status")]
    pub status: bool,
}

fn default_status() -> bool {
    true
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateQuery {
    pub question: String,
    #[serde(default)]
    pub exclude_id: Option<String>,
}

#[derive(Deserialize)]
pub struct ListParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub status: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ListMeta {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub page: u32,
    pub limit: u32,
    pub total_pages: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListBody {
    pub data: Vec<Faq>,
    pub meta: ListMeta,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DataBody<T> {
    pub data: T,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusBody {
    pub status: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExistsBody {
    pub exists: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

/// Error response: a status code plus `{ "message": ... }`.
pub struct Failure(StatusCode, String);

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        (self.0, Json(MessageBody { message: self.1 })).into_response()
    }
}

fn not_found() -> Failure {
    Failure(StatusCode::NOT_FOUND, "FAQ not found".to_string())
}

pub type Db = Arc<RwLock<Vec<Faq>>>;

pub fn app() -> Router {
    app_with(Vec::new())
}

/// Router pre-loaded with `seed`.
pub fn app_with(seed: Vec<Faq>) -> Router {
    let db: Db = Arc::new(RwLock::new(seed));
    Router::new()
        .route("/faqs", get(list_faqs).post(create_faq))
        .route("/faqs/check-duplicate", post(check_duplicate))
        .route(
            "/faqs/{id}",
            get(get_faq).put(update_faq).patch(toggle_status).delete(delete_faq),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn same_question(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

fn is_duplicate(faqs: &[Faq], question: &str, exclude_id: Option<&str>) -> bool {
    faqs.iter()
        .any(|f| Some(f.id.as_str()) != exclude_id && same_question(&f.question, question))
}

fn check_input(input: &FaqInput) -> Result<(), Failure> {
    if input.question.trim().is_empty() || input.answer.trim().is_empty() {
        return Err(Failure(
            StatusCode::BAD_REQUEST,
            "Question and answer are required".to_string(),
        ));
    }
    Ok(())
}

async fn list_faqs(
    State(db): State<Db>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListBody>, Failure> {
    let wanted = match params.status.as_deref() {
        None | Some("") | Some("total") => None,
        Some("active") => Some(true),
        Some("inactive") => Some(false),
        Some(other) => {
            return Err(Failure(
                StatusCode::BAD_REQUEST,
                format!("Unknown status filter: {other}"),
            ))
        }
    };
    let page = params.page.unwrap_or(1).max(1);
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).max(1);

    let faqs = db.read().await;
    let active = faqs.iter().filter(|f| f.status).count();
    let filtered: Vec<&Faq> = faqs
        .iter()
        .filter(|f| wanted.map_or(true, |s| f.status == s))
        .collect();
    let total_pages = filtered.len().div_ceil(limit as usize).max(1);
    let data = filtered
        .into_iter()
        .skip((page as usize - 1) * limit as usize)
        .take(limit as usize)
        .cloned()
        .collect();

    Ok(Json(ListBody {
        data,
        meta: ListMeta {
            total: faqs.len(),
            active,
            inactive: faqs.len() - active,
            page,
            limit,
            total_pages,
        },
    }))
}

async fn get_faq(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<DataBody<Faq>>, Failure> {
    let faqs = db.read().await;
    faqs.iter()
        .find(|f| f.id == id)
        .cloned()
        .map(|data| Json(DataBody { data }))
        .ok_or_else(not_found)
}

async fn check_duplicate(State(db): State<Db>, Json(query): Json<DuplicateQuery>) -> Json<ExistsBody> {
    let faqs = db.read().await;
    Json(ExistsBody {
        exists: is_duplicate(&faqs, &query.question, query.exclude_id.as_deref()),
    })
}

async fn create_faq(
    State(db): State<Db>,
    Json(input): Json<FaqInput>,
) -> Result<(StatusCode, Json<DataBody<Faq>>), Failure> {
    check_input(&input)?;
    let mut faqs = db.write().await;
    if is_duplicate(&faqs, &input.question, None) {
        return Err(Failure(
            StatusCode::CONFLICT,
            "A FAQ with this question already exists".to_string(),
        ));
    }
    let faq = Faq {
        id: Uuid::new_v4().to_string(),
        question: input.question,
        answer: input.answer,
        status: input.status,
    };
    info!(id = %faq.id, "faq created");
    faqs.push(faq.clone());
    Ok((StatusCode::CREATED, Json(DataBody { data: faq })))
}

async fn update_faq(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<FaqInput>,
) -> Result<Json<DataBody<Faq>>, Failure> {
    check_input(&input)?;
    let mut faqs = db.write().await;
    if is_duplicate(&faqs, &input.question, Some(id.as_str())) {
        return Err(Failure(
            StatusCode::CONFLICT,
            "A FAQ with this question already exists".to_string(),
        ));
    }
    let faq = faqs.iter_mut().find(|f| f.id == id).ok_or_else(not_found)?;
    faq.question = input.question;
    faq.answer = input.answer;
    faq.status = input.status;
    info!(id = %id, "faq updated");
    Ok(Json(DataBody { data: faq.clone() }))
}

async fn delete_faq(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<MessageBody>, Failure> {
    let mut faqs = db.write().await;
    let index = faqs.iter().position(|f| f.id == id).ok_or_else(not_found)?;
    faqs.remove(index);
    info!(id = %id, "faq deleted");
    Ok(Json(MessageBody {
        message: "FAQ deleted successfully".to_string(),
    }))
}

/// Flips the status and reports the value it had before.
async fn toggle_status(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<DataBody<StatusBody>>, Failure> {
    let mut faqs = db.write().await;
    let faq = faqs.iter_mut().find(|f| f.id == id).ok_or_else(not_found)?;
    let previous = faq.status;
    faq.status = !previous;
    info!(id = %id, previous, "faq status toggled");
    Ok(Json(DataBody {
        data: StatusBody { status: previous },
    }))
}
