//! Form validation for untrusted write-path input.
//!
//! Raw field values arrive from the HTTP adapter as plain strings; each form
//! either yields a typed, validated record ready for the command services or
//! a map of field-level error messages. Nothing is persisted while a form
//! holds errors. Cross-entity checks (rate limiting and the like) are
//! deliberately absent.

use std::collections::BTreeMap;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

use super::comment::CommentText;
use super::error::Error;
use super::group::GroupSlug;
use super::image::ImagePayload;
use super::post::PostText;

/// Field-level validation messages keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// An empty error set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A set holding a single message for one field.
    #[must_use]
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// Record a message against a field.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_owned()).or_default().push(message.into());
    }

    /// Whether any field carries a message.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for `field`, if any.
    #[must_use]
    pub fn field(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Convert into the domain error the HTTP adapter redisplays the form
    /// with: a 400 payload carrying every field's messages.
    #[must_use]
    pub fn into_error(self) -> Error {
        Error::invalid_request("form validation failed")
            .with_details(json!({ "fields": self.0 }))
    }
}

/// Raw create/edit post submission.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct PostForm {
    /// Post body text.
    pub text: String,
    /// Group slug; empty or absent leaves the post ungrouped.
    #[serde(default)]
    pub group: Option<String>,
    /// Base64-encoded image attachment, when present.
    #[serde(default)]
    pub image: Option<String>,
}

/// A `PostForm` whose fields passed validation.
///
/// The group is still a slug at this stage; the command service resolves it
/// against the group repository (existence is part of the validation
/// contract, but only the service can consult storage).
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedPostForm {
    /// Validated body text.
    pub text: PostText,
    /// Validated group slug, when one was submitted.
    pub group: Option<GroupSlug>,
    /// Decoded, signature-checked image, when one was submitted.
    pub image: Option<ImagePayload>,
}

impl PostForm {
    /// Validate every field, collecting all failures rather than stopping at
    /// the first.
    pub fn validate(self) -> Result<ParsedPostForm, FieldErrors> {
        let mut errors = FieldErrors::new();

        let text = match PostText::new(self.text) {
            Ok(text) => Some(text),
            Err(err) => {
                errors.add("text", err.to_string());
                None
            }
        };

        let group = match normalize_optional(self.group) {
            None => None,
            Some(raw) => match GroupSlug::new(raw) {
                Ok(slug) => Some(slug),
                Err(err) => {
                    errors.add("group", err.to_string());
                    None
                }
            },
        };

        let image = match normalize_optional(self.image) {
            None => None,
            Some(raw) => match decode_image(&raw) {
                Ok(payload) => Some(payload),
                Err(message) => {
                    errors.add("image", message);
                    None
                }
            },
        };

        match (errors.is_empty(), text) {
            (true, Some(text)) => Ok(ParsedPostForm { text, group, image }),
            _ => Err(errors),
        }
    }
}

/// Raw comment submission.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CommentForm {
    /// Comment body text.
    pub text: String,
}

/// A `CommentForm` whose fields passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommentForm {
    /// Validated body text.
    pub text: CommentText,
}

impl CommentForm {
    /// Validate the comment body.
    pub fn validate(self) -> Result<ParsedCommentForm, FieldErrors> {
        match CommentText::new(self.text) {
            Ok(text) => Ok(ParsedCommentForm { text }),
            Err(err) => Err(FieldErrors::single("text", err.to_string())),
        }
    }
}

/// Treat empty and whitespace-only submissions as absent, matching how HTML
/// selects and file inputs submit "no choice".
fn normalize_optional(value: Option<String>) -> Option<String> {
    value.filter(|raw| !raw.trim().is_empty())
}

fn decode_image(raw: &str) -> Result<ImagePayload, String> {
    let bytes = BASE64
        .decode(raw.trim())
        .map_err(|_| "image must be valid base64".to_owned())?;
    ImagePayload::new(bytes).map_err(|err| err.to_string())
}
