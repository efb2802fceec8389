use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, RawQuery, State},
    http::{HeaderMap, Method, StatusCode},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

pub const PAGE_SIZE: usize = 2;

/// Size of the string field `/large/{code}` returns; past ureq's default body limit.
pub const LARGE_BLOB_LEN: usize = 11 * 1024 * 1024;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub active: bool,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub page: Option<usize>,
    pub active: Option<bool>,
}

/// What `/echo` saw: the verb, the raw query string, and any `x-*` headers.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Echo {
    pub method: String,
    pub query: Option<String>,
    pub headers: BTreeMap<String, String>,
}

pub type Db = Arc<RwLock<BTreeMap<u64, User>>>;

fn seed() -> BTreeMap<u64, User> {
    [(1, "Ada", true), (2, "Grace", true), (3, "Linus", false)]
        .into_iter()
        .map(|(id, name, active)| {
            (
                id,
                User {
                    id,
                    name: name.to_string(),
                    active,
                },
            )
        })
        .collect()
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(seed()));
    Router::new()
        .route("/users", get(list_users))
        .route("/users/{id}", get(get_user).delete(delete_user))
        .route("/echo", get(echo).post(echo).put(echo).delete(echo))
        .route("/malformed", get(malformed))
        .route("/status/{code}", get(status))
        .route("/binary/{code}", get(binary))
        .route("/large/{code}", get(large))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_users(State(db): State<Db>, Query(params): Query<ListParams>) -> Json<Vec<User>> {
    let users = db.read().await;
    let matching = users
        .values()
        .filter(|u| params.active.is_none_or(|active| u.active == active))
        .cloned();
    let page = match params.page {
        Some(page) => matching
            .skip(page.saturating_sub(1) * PAGE_SIZE)
            .take(PAGE_SIZE)
            .collect(),
        None => matching.collect(),
    };
    Json(page)
}

async fn get_user(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<User>, StatusCode> {
    let users = db.read().await;
    users.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn delete_user(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<User>, StatusCode> {
    let mut users = db.write().await;
    users.remove(&id).map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn echo(method: Method, RawQuery(query): RawQuery, headers: HeaderMap) -> Json<Echo> {
    let headers = headers
        .iter()
        .filter(|(name, _)| name.as_str().starts_with("x-"))
        .filter_map(|(name, value)| Some((name.to_string(), value.to_str().ok()?.to_string())))
        .collect();
    Json(Echo {
        method: method.to_string(),
        query,
        headers,
    })
}

async fn malformed() -> (StatusCode, &'static str) {
    (StatusCode::OK, "this is { not json")
}

async fn status(Path(code): Path<u16>) -> (StatusCode, Json<Value>) {
    let status = status_or_bad_request(code);
    (status, Json(json!({ "status": status.as_u16() })))
}

fn status_or_bad_request(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST)
}

/// Responds with `code` and a body that is not valid UTF-8.
async fn binary(Path(code): Path<u16>) -> (StatusCode, Vec<u8>) {
    (status_or_bad_request(code), vec![0xff, 0xfe, 0xfd])
}

async fn large(Path(code): Path<u16>) -> (StatusCode, Json<Value>) {
    let blob = "a".repeat(LARGE_BLOB_LEN);
    (status_or_bad_request(code), Json(json!({ "blob": blob })))
}
