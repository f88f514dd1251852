//! Request description and the course-platform DTOs.
//!
//! # Design
//! `RequestSpec` is caller-owned and short-lived: built right before a call
//! and dropped after it resolves. The DTOs mirror the mock-server's schema
//! but are defined independently; the integration tests catch drift.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::http::HttpMethod;

/// One outgoing call: endpoint path, verb and optional JSON payload.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    pub path: String,
    pub method: HttpMethod,
    pub body: Option<Value>,
}

impl RequestSpec {
    pub fn new(path: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            path: path.into(),
            method,
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(path, HttpMethod::Get)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(path, HttpMethod::Post)
    }

    /// Attach a JSON payload. `Value::Null` means no payload, so nothing is
    /// sent for it.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = match body {
            Value::Null => None,
            body => Some(body),
        };
        self
    }

    /// Attach any serializable payload; one serializing to `null` is dropped.
    pub fn with_json<T: Serialize + ?Sized>(self, body: &T) -> Result<Self, serde_json::Error> {
        Ok(self.with_body(serde_json::to_value(body)?))
    }
}

/// Credentials posted to `login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// `{"message": ...}` acknowledgement returned by login and logout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

/// A course listed by `get_courses`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Course {
    pub course_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<String>,
    pub course_name: String,
    pub description: String,
    pub price: f64,
    pub image: String,
    pub author: Uuid,
}
