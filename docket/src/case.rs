//! Case records, form validation, and the local search filter.
//!
//! DESIGN
//! ======
//! `Case` is whatever the case service returns, decoded leniently. `NewCase`
//! is the only thing that may be posted back, and it can only be built by
//! validating a `CaseDraft`, so an unvalidated candidate never reaches the
//! wire.

#[cfg(test)]
#[path = "case_test.rs"]
mod case_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A case record as served by `GET /cases`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
    /// Server-assigned identifier. Absent for records the service never keyed.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "imageUrl", default)]
    pub image_url: String,
}

impl Case {
    /// Case-insensitive substring match against title or description.
    ///
    /// `needle` must already be lowercased.
    fn matches_folded(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.description.to_lowercase().contains(needle)
    }

    /// Whether this case matches a search query. An empty query matches everything.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        self.matches_folded(&query.to_lowercase())
    }
}

/// Filter `cases` down to those whose title or description contains `query`,
/// ignoring case. Order is preserved; an empty query returns every case.
#[must_use]
pub fn filter_cases(cases: &[Case], query: &str) -> Vec<Case> {
    if query.is_empty() {
        return cases.to_vec();
    }
    let needle = query.to_lowercase();
    cases
        .iter()
        .filter(|case| case.matches_folded(&needle))
        .cloned()
        .collect()
}

/// The three user-editable fields of the add-case form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CaseField {
    Title,
    Description,
    ImageUrl,
}

impl CaseField {
    /// Wire name of the field, matching the JSON body of `POST /cases/add`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::ImageUrl => "imageUrl",
        }
    }
}

impl fmt::Display for CaseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw add-case form contents, exactly as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CaseDraft {
    pub title: String,
    pub description: String,
    pub image_url: String,
}

impl CaseDraft {
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self { title: title.into(), description: description.into(), image_url: image_url.into() }
    }

    /// Replace one field's text.
    pub fn set(&mut self, field: CaseField, value: impl Into<String>) {
        let slot = match field {
            CaseField::Title => &mut self.title,
            CaseField::Description => &mut self.description,
            CaseField::ImageUrl => &mut self.image_url,
        };
        *slot = value.into();
    }

    #[must_use]
    pub fn get(&self, field: CaseField) -> &str {
        match field {
            CaseField::Title => &self.title,
            CaseField::Description => &self.description,
            CaseField::ImageUrl => &self.image_url,
        }
    }

    /// Validate the draft into a postable [`NewCase`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] for the first empty or
    /// whitespace-only field, or [`ValidationError::InvalidImageUrl`] when the
    /// image URL is not an absolute URL.
    pub fn validate(&self) -> Result<NewCase, ValidationError> {
        NewCase::new(&self.title, &self.description, &self.image_url)
    }
}

/// A validated case candidate, ready for `POST /cases/add`.
///
/// Fields are stored trimmed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewCase {
    title: String,
    description: String,
    #[serde(rename = "imageUrl")]
    image_url: String,
}

impl NewCase {
    /// Validate raw field values.
    ///
    /// # Errors
    ///
    /// See [`CaseDraft::validate`].
    pub fn new(title: &str, description: &str, image_url: &str) -> Result<Self, ValidationError> {
        let title = required(CaseField::Title, title)?;
        let description = required(CaseField::Description, description)?;
        let image_url = required(CaseField::ImageUrl, image_url)?;
        if !is_absolute_url(image_url) {
            return Err(ValidationError::InvalidImageUrl(image_url.to_owned()));
        }
        Ok(Self { title: title.to_owned(), description: description.to_owned(), image_url: image_url.to_owned() })
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    /// Materialize as a stored case under the given identifier.
    #[must_use]
    pub fn into_case(self, id: Option<String>) -> Case {
        Case { id, title: self.title, description: self.description, image_url: self.image_url }
    }
}

fn required(field: CaseField, value: &str) -> Result<&str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(trimmed)
}

/// Whether `raw` parses as an absolute URL (has a scheme).
#[must_use]
pub fn is_absolute_url(raw: &str) -> bool {
    url::Url::parse(raw).is_ok()
}
