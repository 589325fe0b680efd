use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

pub const PAGE_SIZE: usize = 10;
pub const DEFAULT_TOKEN: &str = "dXNlcjpwYXNz";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub slug: String,
    pub email: String,
    pub roles: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Context {
    View,
    Embed,
    Edit,
}

impl Context {
    fn parse(raw: Option<&str>) -> Option<Self> {
        match raw.unwrap_or("view") {
            "view" => Some(Context::View),
            "embed" => Some(Context::Embed),
            "edit" => Some(Context::Edit),
            _ => None,
        }
    }
}

impl User {
    fn new(id: u64, name: &str, role: &str) -> Self {
        let slug = name.to_lowercase().replace(' ', "-");
        Self {
            id,
            email: format!("{slug}@example.com"),
            name: name.to_string(),
            slug,
            roles: vec![role.to_string()],
        }
    }

    fn render(&self, context: Context) -> Value {
        match context {
            Context::Embed => json!({
                "id": self.id,
                "name": self.name,
                "slug": self.slug,
            }),
            Context::View => json!({
                "id": self.id,
                "name": self.name,
                "slug": self.slug,
                "link": format!("http://localhost/author/{}/", self.slug),
            }),
            Context::Edit => json!({
                "id": self.id,
                "name": self.name,
                "slug": self.slug,
                "link": format!("http://localhost/author/{}/", self.slug),
                "email": self.email,
                "roles": self.roles,
            }),
        }
    }
}

/// Twelve users across four roles, enough to span two pages.
pub fn seed_users() -> Vec<User> {
    let people = [
        ("Ada Admin", "administrator"),
        ("Ed Itor", "editor"),
        ("Erin Editor", "editor"),
        ("Al Author", "author"),
        ("Amy Author", "author"),
        ("Art Author", "author"),
        ("Sam Sub", "subscriber"),
        ("Sue Sub", "subscriber"),
        ("Sid Sub", "subscriber"),
        ("Sal Sub", "subscriber"),
        ("Sky Sub", "subscriber"),
        ("Sol Sub", "subscriber"),
    ];
    people
        .iter()
        .zip(1u64..)
        .map(|((name, role), id)| User::new(id, name, role))
        .collect()
}

#[derive(Clone)]
struct AppState {
    token: Arc<str>,
    users: Arc<Vec<User>>,
}

pub fn app(token: &str) -> Router {
    let state = AppState {
        token: Arc::from(token),
        users: Arc::new(seed_users()),
    };
    Router::new()
        .route("/wp-json/users", get(list_users))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

pub async fn run(listener: TcpListener, token: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(token)).await
}

fn rest_error(status: StatusCode, code: &str, message: &str) -> Response {
    let body = json!({
        "code": code,
        "message": message,
        "data": { "status": status.as_u16() },
    });
    (status, Json(body)).into_response()
}

async fn list_users(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let expected = format!("Basic {}", state.token);
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == expected);
    if !authorized {
        warn!("rejecting unauthenticated users request");
        return rest_error(
            StatusCode::UNAUTHORIZED,
            "rest_not_logged_in",
            "You are not currently logged in.",
        );
    }

    let Some(context) = Context::parse(params.get("context").map(String::as_str)) else {
        return rest_error(
            StatusCode::BAD_REQUEST,
            "rest_invalid_param",
            "Invalid parameter(s): context",
        );
    };

    let page = match params.get("page").map(|p| p.parse::<usize>()) {
        None => 1,
        Some(Ok(page)) if page >= 1 => page,
        Some(_) => {
            return rest_error(
                StatusCode::BAD_REQUEST,
                "rest_invalid_param",
                "Invalid parameter(s): page",
            )
        }
    };

    let role = params.get("filter[role]");
    let search = params.get("filter[search]").map(|s| s.to_lowercase());
    let matching: Vec<&User> = state
        .users
        .iter()
        .filter(|u| role.map_or(true, |r| u.roles.contains(r)))
        .filter(|u| {
            search
                .as_deref()
                .map_or(true, |s| u.name.to_lowercase().contains(s) || u.slug.contains(s))
        })
        .collect();

    let total = matching.len();
    let total_pages = total.div_ceil(PAGE_SIZE);
    if page > 1 && page > total_pages {
        return rest_error(
            StatusCode::BAD_REQUEST,
            "rest_user_invalid_page_number",
            "The page number requested is larger than the number of pages available.",
        );
    }

    debug!(total, page, "listing users");
    let body: Vec<Value> = matching
        .iter()
        .skip((page - 1) * PAGE_SIZE)
        .take(PAGE_SIZE)
        .map(|u| u.render(context))
        .collect();

    (
        [
            ("x-wp-total", total.to_string()),
            ("x-wp-totalpages", total_pages.to_string()),
        ],
        Json(body),
    )
        .into_response()
}
