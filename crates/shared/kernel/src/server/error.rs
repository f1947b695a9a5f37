use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::borrow::Cow;
use std::collections::HashMap;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

/// Where a rejected value came from; the first element of every `loc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Body,
    Query,
    Path,
}

impl Source {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Body => "body",
            Self::Query => "query",
            Self::Path => "path",
        }
    }
}

/// A single rejected input.
#[persona_derive::api_model(validate = false)]
#[derive(Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Input source followed by the field path, e.g. `["body", "person", "age"]`.
    pub loc: Vec<String>,
    /// Human readable description.
    pub msg: String,
    /// Machine readable code (`length`, `range`, `parse`, ...).
    #[serde(rename = "type")]
    pub kind: String,
}

/// Error envelope returned for every rejected request.
#[persona_derive::api_model(validate = false)]
pub struct ErrorBody {
    pub detail: Vec<FieldViolation>,
}

/// Errors surfaced by the HTTP layer.
#[persona_derive::persona_error]
pub enum ApiError {
    /// Request input failed deserialization or declared constraints (HTTP 422).
    #[error("Validation failed{}: {} violation(s)", format_context(.context), .violations.len())]
    Validation { violations: Vec<FieldViolation>, context: Option<Cow<'static, str>> },

    /// Unexpected failure while serving the request (HTTP 500).
    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl ApiError {
    /// Wraps a framework rejection (bad JSON, wrong type, missing field) as one violation.
    pub fn rejected(source: Source, message: impl Into<String>) -> Self {
        Self::Validation {
            violations: vec![FieldViolation {
                loc: vec![source.as_str().to_owned()],
                msg: message.into(),
                kind: "parse".to_owned(),
            }],
            context: None,
        }
    }

    /// Flattens nested `validator` errors into sorted violations rooted at `source`.
    #[must_use]
    pub fn from_validation(source: Source, errors: &ValidationErrors) -> Self {
        let mut violations = Vec::new();
        let mut loc = vec![source.as_str().to_owned()];
        collect_violations(errors, &mut loc, &mut violations);
        violations.sort_by(|a, b| a.loc.cmp(&b.loc).then_with(|| a.kind.cmp(&b.kind)));
        Self::Validation { violations, context: None }
    }

    /// Combines rejections from several input sources into one response.
    /// Violations are concatenated; an internal error takes precedence.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        match (self, other) {
            (
                Self::Validation { mut violations, context },
                Self::Validation { violations: more, .. },
            ) => {
                violations.extend(more);
                Self::Validation { violations, context }
            },
            (internal @ Self::Internal { .. }, _) | (_, internal @ Self::Internal { .. }) => {
                internal
            },
        }
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match self {
            Self::Validation { violations, .. } => {
                tracing::debug!(violations = violations.len(), "Rejected request input");
                violations
            },
            Self::Internal { message, context } => {
                tracing::error!(context = ?context, "Request failed: {message}");
                vec![FieldViolation {
                    loc: Vec::new(),
                    msg: "Internal server error".to_owned(),
                    kind: "internal".to_owned(),
                }]
            },
        };

        (status, Json(ErrorBody { detail })).into_response()
    }
}

fn collect_violations(
    errors: &ValidationErrors,
    loc: &mut Vec<String>,
    out: &mut Vec<FieldViolation>,
) {
    for (field, kind) in errors.errors() {
        loc.push(field.to_string());
        match kind {
            ValidationErrorsKind::Field(list) => {
                out.extend(list.iter().map(|error| FieldViolation {
                    loc: loc.clone(),
                    msg: describe(error),
                    kind: error.code.to_string(),
                }));
            },
            ValidationErrorsKind::Struct(inner) => collect_violations(inner, loc, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    loc.push(index.to_string());
                    collect_violations(inner, loc, out);
                    loc.pop();
                }
            },
        }
        loc.pop();
    }
}

fn describe(error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }

    let params = &error.params;
    match &*error.code {
        "length" => format!("ensure this value has {}", bounds(params, "characters")),
        "range" => format!("ensure this value is {}", bounds(params, "")),
        code => format!("value failed the `{code}` check"),
    }
}

/// Renders the bound parameters `validator` attaches to length/range errors.
fn bounds(params: &HashMap<Cow<'static, str>, serde_json::Value>, unit: &str) -> String {
    let unit = if unit.is_empty() { String::new() } else { format!(" {unit}") };
    let bound = |key: &str, phrase: &str| params.get(key).map(|v| format!("{phrase} {v}"));

    let parts: Vec<String> = [
        bound("equal", "exactly"),
        bound("min", "at least"),
        bound("exclusive_min", "greater than"),
        bound("max", "at most"),
        bound("exclusive_max", "less than"),
    ]
    .into_iter()
    .flatten()
    .collect();

    if parts.is_empty() {
        "a valid value".to_owned()
    } else {
        format!("{}{unit}", parts.join(" and "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Debug, Validate)]
    struct Inner {
        #[validate(length(min = 1, max = 5))]
        code: String,
    }

    #[derive(Debug, Validate)]
    struct Outer {
        #[validate(range(exclusive_min = 0, exclusive_max = 10))]
        score: i64,
        #[validate(nested)]
        inner: Inner,
    }

    fn violations(err: ApiError) -> Vec<FieldViolation> {
        match err {
            ApiError::Validation { violations, .. } => violations,
            ApiError::Internal { .. } => panic!("expected validation error"),
        }
    }

    #[test]
    fn nested_errors_are_flattened_and_sorted() {
        let value = Outer { score: 10, inner: Inner { code: String::new() } };
        let errors = value.validate().expect_err("both fields are invalid");

        let found = violations(ApiError::from_validation(Source::Body, &errors));
        let locs: Vec<Vec<String>> = found.iter().map(|v| v.loc.clone()).collect();
        assert_eq!(locs, vec![vec!["body", "inner", "code"], vec!["body", "score"]]);
        assert_eq!(found[0].kind, "length");
        assert!(found[0].msg.contains("at least 1 and at most 5 characters"), "{}", found[0].msg);
        assert_eq!(found[1].kind, "range");
        assert!(found[1].msg.contains("greater than"), "{}", found[1].msg);
        assert!(found[1].msg.contains("less than"), "{}", found[1].msg);
    }

    #[test]
    fn rejection_is_a_single_parse_violation() {
        let found = violations(ApiError::rejected(Source::Query, "missing field `age`"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].loc, vec!["query"]);
        assert_eq!(found[0].kind, "parse");
    }

    #[test]
    fn merge_keeps_violations_from_every_source_in_order() {
        let path = ApiError::rejected(Source::Path, "bad id");
        let body = ApiError::rejected(Source::Body, "bad body");

        let locs: Vec<Vec<String>> =
            violations(path.merge(body)).into_iter().map(|v| v.loc).collect();
        assert_eq!(locs, vec![vec!["path"], vec!["body"]]);
    }

    #[test]
    fn merge_prefers_internal_errors() {
        let merged = ApiError::rejected(Source::Path, "bad id").merge(ApiError::from("boom"));
        assert_eq!(merged.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn status_codes_follow_variant() {
        assert_eq!(ApiError::rejected(Source::Path, "x").status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(ApiError::from("boom").status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn context_is_rendered_in_display() {
        let err: Result<(), ApiError> = Err(ApiError::rejected(Source::Body, "bad"));
        let err = err.context("create person").expect_err("still an error");
        assert_eq!(err.to_string(), "Validation failed (create person): 1 violation(s)");
    }
}
