//! Declarative request validation.
//!
//! A route declares a static [`RuleSet`] and mounts [`validate_request`] in
//! front of its handler with `axum::middleware::from_fn_with_state`. Every
//! check of every field runs before the gate decides; any failure answers
//! `400` with the whole list and the handler is never reached.

use axum::{
    body::{Body, to_bytes},
    extract::{RawPathParams, Request, State, rejection::RawPathParamsRejection},
    http::{HeaderMap, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::error::AppError;

const BODY_LIMIT: usize = 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Params,
    Body,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub location: Location,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// A scalar whose text form is not `""`. Arrays, objects and `null` fail.
    NotEmpty,
    Numeric,
    /// Numeric and strictly greater than zero.
    Positive,
    Boolean,
    /// Integer that fits in an `i32`; leading zeros are rejected.
    Int,
}

impl Rule {
    pub fn check(self, value: Option<&Value>) -> bool {
        match self {
            Rule::NotEmpty => value.and_then(as_text).is_some_and(|s| !s.is_empty()),
            Rule::Numeric => value.and_then(as_number).is_some(),
            Rule::Positive => value.and_then(as_number).is_some_and(|n| n > 0.0),
            Rule::Boolean => value.and_then(as_bool).is_some(),
            Rule::Int => value.and_then(as_int).is_some(),
        }
    }
}

#[derive(Debug)]
pub struct Check {
    pub rule: Rule,
    pub message: &'static str,
}

#[derive(Debug)]
pub struct FieldRules {
    pub field: &'static str,
    pub location: Location,
    /// Skip the checks when the field is absent (an explicit `null` is still checked).
    pub optional: bool,
    pub checks: &'static [Check],
}

#[derive(Debug)]
pub struct RuleSet {
    pub fields: &'static [FieldRules],
}

impl RuleSet {
    fn has_body_fields(&self) -> bool {
        self.fields.iter().any(|f| f.location == Location::Body)
    }

    /// Runs every check and returns the failures in declaration order.
    pub fn evaluate(&self, params: &Map<String, Value>, body: &Value) -> Vec<FieldError> {
        self.evaluate_where(params, body, |_| true)
    }

    fn evaluate_where(
        &self,
        params: &Map<String, Value>,
        body: &Value,
        include: impl Fn(Location) -> bool,
    ) -> Vec<FieldError> {
        let mut errors = Vec::new();
        for field in self.fields.iter().filter(|f| include(f.location)) {
            let value = match field.location {
                Location::Params => params.get(field.field),
                Location::Body => body.get(field.field),
            };
            if field.optional && value.is_none() {
                continue;
            }
            for check in field.checks {
                if !check.rule.check(value) {
                    errors.push(FieldError {
                        field: field.field.to_string(),
                        location: field.location,
                        message: check.message.to_string(),
                    });
                }
            }
        }
        errors
    }
}

pub async fn validate_request(
    State(rules): State<&'static RuleSet>,
    path_params: Result<RawPathParams, RawPathParamsRejection>,
    request: Request,
    next: Next,
) -> Response {
    let params: Map<String, Value> = path_params
        .map(|raw| {
            raw.iter()
                .map(|(key, value)| (key.to_string(), Value::String(value.to_string())))
                .collect()
        })
        .unwrap_or_default();

    let (request, body, malformed) = if rules.has_body_fields() {
        let (parts, body) = request.into_parts();
        let bytes = match to_bytes(body, BODY_LIMIT).await {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::debug!(error = %err, "failed to buffer request body");
                return AppError::BadRequest("request body could not be read".to_string())
                    .into_response();
            }
        };
        // Bodies not declared as JSON are read as empty.
        let (value, malformed) = if bytes.is_empty() || !has_json_content_type(&parts.headers) {
            (Value::Null, false)
        } else {
            match serde_json::from_slice(&bytes) {
                Ok(value) => (value, false),
                Err(_) => (Value::Null, true),
            }
        };
        (Request::from_parts(parts, Body::from(bytes)), value, malformed)
    } else {
        (request, Value::Null, false)
    };

    let errors = if malformed {
        let mut errors =
            rules.evaluate_where(&params, &body, |location| location == Location::Params);
        errors.push(FieldError {
            field: "body".to_string(),
            location: Location::Body,
            message: "Request body must be valid JSON".to_string(),
        });
        errors
    } else {
        rules.evaluate(&params, &body)
    };

    if !errors.is_empty() {
        tracing::debug!(
            method = %request.method(),
            uri = %request.uri(),
            errors = errors.len(),
            "request rejected by validation"
        );
        return AppError::Validation(errors).into_response();
    }

    next.run(request).await
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

/// Text form of a scalar; numbers and booleans are stringified.
pub fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if is_numeric_str(s) => s.parse().ok(),
        _ => None,
    }
}

pub fn as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        Value::Number(n) => match n.as_i64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        _ => None,
    }
}

pub fn as_int(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
        Value::String(s) if is_int_str(s) => s.parse().ok(),
        _ => None,
    }
}

fn is_numeric_str(s: &str) -> bool {
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    match unsigned.split_once('.') {
        Some((whole, frac)) => !frac.is_empty() && all_digits(whole) && all_digits(frac),
        None => !unsigned.is_empty() && all_digits(unsigned),
    }
}

fn is_int_str(s: &str) -> bool {
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    !unsigned.is_empty()
        && unsigned.bytes().all(|b| b.is_ascii_digit())
        && (unsigned == "0" || !unsigned.starts_with('0'))
}

/// Serde helpers accepting the same loose inputs the rules let through.
pub mod lenient {
    use serde::{Deserialize, Deserializer, de::Error};
    use serde_json::Value;

    pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        let value = Value::deserialize(deserializer)?;
        super::as_text(&value).ok_or_else(|| D::Error::custom("expected a string"))
    }

    pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        let value = Value::deserialize(deserializer)?;
        super::as_number(&value).ok_or_else(|| D::Error::custom("expected a number"))
    }

    pub fn boolean<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let value = Value::deserialize(deserializer)?;
        super::as_bool(&value).ok_or_else(|| D::Error::custom("expected a boolean"))
    }
}
