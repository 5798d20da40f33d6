//! Form validation for game and genre submissions.
//!
//! Each submission type holds the raw strings a browser sent. `check()`
//! produces the sanitized echo (what the form re-renders with) together with
//! either the typed fields ready for persistence or the field-level errors.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::sanitize::clean;
use crate::types::DbId;

/// Decimal number with optional sign and fraction, e.g. `10`, `-3`, `.5`, `19.99`.
static NUMERIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?([0-9]*[.])?[0-9]+$").expect("valid regex"));

/// A single failed check, rendered next to the offending input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub param: &'static str,
    pub msg: String,
    pub value: String,
}

impl FieldError {
    pub fn new(param: &'static str, msg: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            param,
            msg: msg.into(),
            value: value.into(),
        }
    }
}

/// Result of checking a submission.
#[derive(Debug, Clone)]
pub struct Checked<S, F> {
    /// Trimmed and escaped copy of the submission, safe to echo back.
    pub sanitized: S,
    pub outcome: Result<F, Vec<FieldError>>,
}

// ---------------------------------------------------------------------------
// Game
// ---------------------------------------------------------------------------

/// Raw game form fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GameSubmission {
    pub title: String,
    pub description: String,
    pub stock: String,
    pub price: String,
    pub genre: Option<String>,
}

/// Validated game fields.
#[derive(Debug, Clone, PartialEq)]
pub struct GameFields {
    pub title: String,
    pub description: String,
    pub stock: i32,
    pub price: f64,
    pub genre_id: DbId,
}

impl GameSubmission {
    /// Trimmed and escaped copy of every field.
    pub fn sanitized(&self) -> Self {
        Self {
            title: clean(&self.title),
            description: clean(&self.description),
            stock: clean(&self.stock),
            price: clean(&self.price),
            genre: self
                .genre
                .as_deref()
                .map(clean)
                .filter(|g| !g.is_empty()),
        }
    }

    /// The selected genre id, if the submission carries a well-formed one.
    pub fn genre_id(&self) -> Option<DbId> {
        self.genre.as_deref().and_then(|g| g.trim().parse().ok())
    }

    pub fn check(&self) -> Checked<Self, GameFields> {
        let sanitized = self.sanitized();
        let mut errors = Vec::new();

        if sanitized.title.is_empty() {
            errors.push(FieldError::new("title", "Title must not be empty.", ""));
        }
        if sanitized.description.is_empty() {
            errors.push(FieldError::new(
                "description",
                "Description must not be empty.",
                "",
            ));
        }

        let stock = match parse_number(self.stock.trim()) {
            None => {
                errors.push(FieldError::new(
                    "stock",
                    "Stock must be a number",
                    &sanitized.stock,
                ));
                None
            }
            Some(n) if n.fract() != 0.0 => {
                errors.push(FieldError::new(
                    "stock",
                    "Stock must be a whole number",
                    &sanitized.stock,
                ));
                None
            }
            Some(n) if n < i32::MIN as f64 || n > i32::MAX as f64 => {
                errors.push(FieldError::new(
                    "stock",
                    "Stock is out of range",
                    &sanitized.stock,
                ));
                None
            }
            Some(n) => Some(n as i32),
        };

        let price = parse_number(self.price.trim());
        if price.is_none() {
            errors.push(FieldError::new(
                "price",
                "Price must be a number",
                &sanitized.price,
            ));
        }

        let genre_id = self.genre_id();
        if genre_id.is_none() {
            errors.push(FieldError::new(
                "genre",
                "Genre must be selected.",
                sanitized.genre.clone().unwrap_or_default(),
            ));
        }

        let outcome = match (stock, price, genre_id) {
            (Some(stock), Some(price), Some(genre_id)) if errors.is_empty() => Ok(GameFields {
                title: sanitized.title.clone(),
                description: sanitized.description.clone(),
                stock,
                price,
                genre_id,
            }),
            _ => Err(errors),
        };

        Checked { sanitized, outcome }
    }
}

/// Reject uploads whose declared content type is not an image.
pub fn check_image_content_type(content_type: &str) -> Option<FieldError> {
    if content_type.starts_with("image/") {
        None
    } else {
        Some(FieldError::new(
            "image",
            "Image must be an image file.",
            clean(content_type),
        ))
    }
}

/// Parse a plain decimal. Digit runs too long for `f64` overflow to
/// infinity and are rejected.
fn parse_number(raw: &str) -> Option<f64> {
    if NUMERIC_RE.is_match(raw) {
        raw.parse::<f64>().ok().filter(|n| n.is_finite())
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Genre
// ---------------------------------------------------------------------------

/// Raw genre form fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GenreSubmission {
    pub name: String,
    pub description: String,
}

/// Validated genre fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreFields {
    pub name: String,
    pub description: String,
}

impl GenreSubmission {
    pub fn sanitized(&self) -> Self {
        Self {
            name: clean(&self.name),
            description: clean(&self.description),
        }
    }

    pub fn check(&self) -> Checked<Self, GenreFields> {
        let sanitized = self.sanitized();
        let mut errors = Vec::new();

        if sanitized.name.is_empty() {
            errors.push(FieldError::new("name", "Genre name required", ""));
        }
        if sanitized.description.is_empty() {
            errors.push(FieldError::new(
                "description",
                "Genre description required",
                "",
            ));
        }

        let outcome = if errors.is_empty() {
            Ok(GenreFields {
                name: sanitized.name.clone(),
                description: sanitized.description.clone(),
            })
        } else {
            Err(errors)
        };

        Checked { sanitized, outcome }
    }
}
