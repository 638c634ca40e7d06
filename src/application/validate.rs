//! Inbound field validation.
//!
//! Runs in the handlers before any service call. A failure produces a
//! per-field error map and the request never reaches the service layer.
//! Cross-entity rules (an existing author behind `author_id`) stay in the
//! services, but surface through the same [`FieldErrors`] shape.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use time::Date;

use crate::domain::DATE_FORMAT;

use super::repos::{AuthorParams, BookParams};

const TITLE_MAX_CHARS: usize = 255;

/// Field name → messages, serialized as the `validation` object of a 422.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, Vec<String>>);

impl FieldErrors {
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.push(field, message);
        errors
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Offending field names, in deterministic order.
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }
}

pub fn author_params(body: &Value) -> Result<AuthorParams, FieldErrors> {
    let mut errors = FieldErrors::default();

    let name = required_string(body, "name", &mut errors);
    if let Some(name) = name.as_deref()
        && name.trim().is_empty()
    {
        errors.push("name", "name must not be empty");
    }
    let bio = required_string(body, "bio", &mut errors);
    let birth_date = required_date(body, "birth_date", &mut errors);

    match (name, bio, birth_date) {
        (Some(name), Some(bio), Some(birth_date)) if errors.is_empty() => Ok(AuthorParams {
            name,
            bio,
            birth_date,
        }),
        _ => Err(errors),
    }
}

pub fn book_params(body: &Value) -> Result<BookParams, FieldErrors> {
    let mut errors = FieldErrors::default();

    let title = required_string(body, "title", &mut errors);
    if let Some(title) = title.as_deref() {
        if title.trim().is_empty() {
            errors.push("title", "title must not be empty");
        } else if title.chars().count() > TITLE_MAX_CHARS {
            errors.push(
                "title",
                format!("title must not be longer than {TITLE_MAX_CHARS} characters"),
            );
        }
    }
    let description = optional_string(body, "description", &mut errors);
    let publish_date = required_date(body, "publish_date", &mut errors);
    let author_id = required_integer(body, "author_id", &mut errors);

    match (title, publish_date, author_id) {
        (Some(title), Some(publish_date), Some(author_id)) if errors.is_empty() => Ok(BookParams {
            title,
            description,
            publish_date,
            author_id,
        }),
        _ => Err(errors),
    }
}

fn required_string(body: &Value, field: &'static str, errors: &mut FieldErrors) -> Option<String> {
    match body.get(field) {
        None | Some(Value::Null) => {
            errors.push(field, format!("{field} is required"));
            None
        }
        Some(Value::String(value)) => Some(value.clone()),
        Some(_) => {
            errors.push(field, format!("{field} must be a string"));
            None
        }
    }
}

fn optional_string(body: &Value, field: &'static str, errors: &mut FieldErrors) -> Option<String> {
    match body.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(value)) => Some(value.clone()),
        Some(_) => {
            errors.push(field, format!("{field} must be a string"));
            None
        }
    }
}

fn required_date(body: &Value, field: &'static str, errors: &mut FieldErrors) -> Option<Date> {
    let raw = required_string(body, field, errors)?;
    match Date::parse(&raw, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            errors.push(
                field,
                format!("{field} must be a valid date in YYYY-MM-DD format"),
            );
            None
        }
    }
}

fn required_integer(body: &Value, field: &'static str, errors: &mut FieldErrors) -> Option<i64> {
    match body.get(field) {
        None | Some(Value::Null) => {
            errors.push(field, format!("{field} is required"));
            None
        }
        Some(Value::Number(value)) if value.as_i64().is_some() => value.as_i64(),
        Some(_) => {
            errors.push(field, format!("{field} must be an integer"));
            None
        }
    }
}
