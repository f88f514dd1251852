use std::{collections::HashMap, sync::Arc, time::Instant};

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use uuid::Uuid;

pub const DEFAULT_SESSION_TOKEN: &str = "mock-session-token";
pub const DEMO_EMAIL: &str = "test@example.com";
pub const DEMO_PASSWORD: &str = "alamatkota";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Course {
    pub course_id: Uuid,
    pub creation_date: String,
    pub course_name: String,
    pub description: String,
    pub price: f64,
    pub image: String,
    pub author: Uuid,
}

#[derive(Deserialize)]
pub struct LoginBody {
    pub email: Option<String>,
    pub password: Option<Value>,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub session_token: String,
    /// email -> password
    pub users: HashMap<String, String>,
    pub courses: Vec<Course>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            session_token: DEFAULT_SESSION_TOKEN.to_string(),
            users: HashMap::from([(DEMO_EMAIL.to_string(), DEMO_PASSWORD.to_string())]),
            courses: seed_courses(),
        }
    }
}

impl ServerConfig {
    /// Defaults, with the session token taken from `SESSION_TOKEN` if set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(token) = std::env::var("SESSION_TOKEN") {
            config.session_token = token;
        }
        config
    }
}

pub fn seed_courses() -> Vec<Course> {
    vec![
        Course {
            course_id: Uuid::from_u128(1),
            creation_date: "2024-03-01T10:00:00Z".to_string(),
            course_name: "Web basics".to_string(),
            description: "HTML, CSS and a little JavaScript".to_string(),
            price: 150.0,
            image: "web.png".to_string(),
            author: Uuid::nil(),
        },
        Course {
            course_id: Uuid::from_u128(2),
            creation_date: "2024-03-02T10:00:00Z".to_string(),
            course_name: "Databases".to_string(),
            description: "Schemas, migrations and queries".to_string(),
            price: 100.0,
            image: "db.png".to_string(),
            author: Uuid::nil(),
        },
    ]
}

struct AppState {
    config: ServerConfig,
    started: Instant,
}

type Shared = Arc<AppState>;

pub fn app() -> Router {
    app_with(ServerConfig::default())
}

pub fn app_with(config: ServerConfig) -> Router {
    let state: Shared = Arc::new(AppState {
        config,
        started: Instant::now(),
    });
    let api = Router::new()
        .route("/health", get(health))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/get_courses", get(get_courses))
        .route("/get_courses/{sort_by}", get(get_courses_sorted));
    Router::new().nest("/api", api).with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    serve(listener, ServerConfig::default()).await
}

pub async fn serve(listener: TcpListener, config: ServerConfig) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(config)).await
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

/// True when the `Cookie` header carries `session=<configured token>`.
fn has_session(headers: &HeaderMap, token: &str) -> bool {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .any(|(name, value)| name == "session" && value == token)
}

async fn health(State(state): State<Shared>) -> Json<Value> {
    let uptime = state.started.elapsed().as_secs();
    Json(json!({ "uptime": format!("{uptime}s") }))
}

async fn login(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<LoginBody>,
) -> Response {
    if has_session(&headers, &state.config.session_token) {
        return error(StatusCode::BAD_REQUEST, "Already logged in");
    }
    let Some(Value::String(password)) = body.password else {
        return error(StatusCode::BAD_REQUEST, "Incorrect password format");
    };
    let stored = body
        .email
        .as_ref()
        .and_then(|email| state.config.users.get(email));
    match stored {
        None => error(StatusCode::UNAUTHORIZED, "User not found"),
        Some(expected) if *expected != password => {
            error(StatusCode::FORBIDDEN, "Incorrect password")
        }
        Some(_) => {
            tracing::info!(email = ?body.email, "login accepted");
            let cookie = format!(
                "session={}; HttpOnly; Path=/",
                state.config.session_token
            );
            (
                StatusCode::OK,
                [(header::SET_COOKIE, cookie)],
                Json(json!({ "message": "Logged in" })),
            )
                .into_response()
        }
    }
}

async fn logout(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if !has_session(&headers, &state.config.session_token) {
        return error(StatusCode::UNAUTHORIZED, "Not logged in");
    }
    Json(json!({ "message": "Logged out" })).into_response()
}

async fn get_courses(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if !has_session(&headers, &state.config.session_token) {
        return error(StatusCode::UNAUTHORIZED, "Not authorized to get courses");
    }
    Json(state.config.courses.clone()).into_response()
}

async fn get_courses_sorted(
    State(state): State<Shared>,
    Path(sort_by): Path<String>,
    headers: HeaderMap,
) -> Response {
    if !has_session(&headers, &state.config.session_token) {
        return error(StatusCode::UNAUTHORIZED, "Not authorized to get courses");
    }
    let mut courses = state.config.courses.clone();
    match sort_by.as_str() {
        "course_name" => courses.sort_by(|a, b| a.course_name.cmp(&b.course_name)),
        "price" => courses.sort_by(|a, b| a.price.total_cmp(&b.price)),
        _ => return error(StatusCode::BAD_REQUEST, "Unknown sort key"),
    }
    Json(courses).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn course_serializes_to_json() {
        let course = &seed_courses()[0];
        let json = serde_json::to_value(course).unwrap();
        assert_eq!(json["course_id"], "00000000-0000-0000-0000-000000000001");
        assert_eq!(json["course_name"], "Web basics");
        assert_eq!(json["price"], 150.0);
    }

    #[test]
    fn session_cookie_is_found_among_others() {
        assert!(has_session(&cookie("theme=dark; session=abc"), "abc"));
        assert!(has_session(&cookie("session=abc"), "abc"));
    }

    #[test]
    fn wrong_or_missing_session_is_rejected() {
        assert!(!has_session(&cookie("session=abd"), "abc"));
        assert!(!has_session(&cookie("sessionx=abc"), "abc"));
        assert!(!has_session(&HeaderMap::new(), "abc"));
    }

    #[test]
    fn login_body_accepts_non_string_password() {
        let body: LoginBody = serde_json::from_str(r#"{"email":"a@b.c","password":5}"#).unwrap();
        assert_eq!(body.password, Some(json!(5)));
    }

    #[test]
    fn default_config_has_demo_user() {
        let config = ServerConfig::default();
        assert_eq!(config.users.get(DEMO_EMAIL).map(String::as_str), Some(DEMO_PASSWORD));
        assert_eq!(config.courses.len(), 2);
    }
}
