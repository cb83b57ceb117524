//! Social Context Model
//!
//! The five user-described fields a generation is built from, and their
//! serialization to a flat parameter map and to a shareable query string.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use url::form_urlencoded;
use url::Url;

/// A suggested value for a select-style field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub value: &'static str,
    pub label: &'static str,
}

const fn choice(value: &'static str, label: &'static str) -> Choice {
    Choice { value, label }
}

const GROUP_SIZE_CHOICES: &[Choice] = &[
    choice("2-3", "2-3 people"),
    choice("4-6", "4-6 people"),
    choice("7-10", "7-10 people"),
    choice("10+", "10+ people"),
];

const AGE_RANGE_CHOICES: &[Choice] = &[
    choice("teens", "Teens (13-19)"),
    choice("young-adults", "Young Adults (20-29)"),
    choice("adults", "Adults (30-49)"),
    choice("mature", "Mature (50+)"),
    choice("mixed", "Mixed Ages"),
];

const CLOSENESS_CHOICES: &[Choice] = &[
    choice("strangers", "Just Met / Strangers"),
    choice("acquaintances", "Acquaintances"),
    choice("friends", "Friends"),
    choice("close-friends", "Close Friends"),
    choice("family", "Family"),
    choice("officemates", "Officemates"),
];

/// One of the five social-context fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContextField {
    GroupSize,
    AgeRange,
    Vibe,
    Interests,
    Closeness,
}

impl ContextField {
    /// All fields in declaration order, which is also the serialized key order.
    pub const ALL: [ContextField; 5] = [
        ContextField::GroupSize,
        ContextField::AgeRange,
        ContextField::Vibe,
        ContextField::Interests,
        ContextField::Closeness,
    ];

    /// Key used in the parameter map and the shareable link.
    pub fn key(self) -> &'static str {
        match self {
            ContextField::GroupSize => "groupSize",
            ContextField::AgeRange => "ageRange",
            ContextField::Vibe => "vibe",
            ContextField::Interests => "interests",
            ContextField::Closeness => "closeness",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ContextField::GroupSize => "Group Size",
            ContextField::AgeRange => "Age Range",
            ContextField::Vibe => "Vibe",
            ContextField::Interests => "Interests",
            ContextField::Closeness => "Closeness Level",
        }
    }

    /// Suggested values offered for select-style fields. Free-text fields
    /// return an empty slice. Nothing here restricts what `update` accepts.
    pub fn choices(self) -> &'static [Choice] {
        match self {
            ContextField::GroupSize => GROUP_SIZE_CHOICES,
            ContextField::AgeRange => AGE_RANGE_CHOICES,
            ContextField::Closeness => CLOSENESS_CHOICES,
            ContextField::Vibe | ContextField::Interests => &[],
        }
    }

    /// Human label for a stored value: the choice label when the value is
    /// one of the suggestions, otherwise the value itself.
    pub fn display_value(self, value: &str) -> String {
        self.choices()
            .iter()
            .find(|c| c.value == value)
            .map(|c| c.label.to_string())
            .unwrap_or_else(|| value.to_string())
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }
}

impl fmt::Display for ContextField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ContextField {
    type Err = ApiError;

    /// Accepts the wire key (`groupSize`) as well as kebab/snake spellings
    /// (`group-size`, `group_size`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(field) = Self::from_key(s) {
            return Ok(field);
        }
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        Self::ALL
            .into_iter()
            .find(|field| field.key().to_lowercase() == normalized)
            .ok_or_else(|| ApiError::ConfigError(format!("Unknown context field: {}", s)))
    }
}

/// User-described social context. Every field defaults to the empty string;
/// an empty string means "not provided".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SocialContext {
    pub group_size: String,
    pub age_range: String,
    pub vibe: String,
    pub interests: String,
    pub closeness: String,
}

impl SocialContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: ContextField) -> &str {
        match field {
            ContextField::GroupSize => &self.group_size,
            ContextField::AgeRange => &self.age_range,
            ContextField::Vibe => &self.vibe,
            ContextField::Interests => &self.interests,
            ContextField::Closeness => &self.closeness,
        }
    }

    fn slot_mut(&mut self, field: ContextField) -> &mut String {
        match field {
            ContextField::GroupSize => &mut self.group_size,
            ContextField::AgeRange => &mut self.age_range,
            ContextField::Vibe => &mut self.vibe,
            ContextField::Interests => &mut self.interests,
            ContextField::Closeness => &mut self.closeness,
        }
    }

    /// Set one field. Any string is accepted.
    pub fn update(&mut self, field: ContextField, value: impl Into<String>) {
        *self.slot_mut(field) = value.into();
    }

    /// Builder-style variant of [`SocialContext::update`].
    pub fn with(mut self, field: ContextField, value: impl Into<String>) -> Self {
        self.update(field, value);
        self
    }

    /// True when no field has been provided.
    pub fn is_empty(&self) -> bool {
        ContextField::ALL
            .into_iter()
            .all(|field| self.get(field).is_empty())
    }

    /// Non-empty fields in declaration order.
    pub fn provided(&self) -> impl Iterator<Item = (ContextField, &str)> + '_ {
        ContextField::ALL
            .into_iter()
            .map(move |field| (field, self.get(field)))
            .filter(|(_, value)| !value.is_empty())
    }

    /// Flat parameter map holding only the non-empty fields.
    pub fn to_params(&self) -> BTreeMap<String, String> {
        self.provided()
            .map(|(field, value)| (field.key().to_string(), value.to_string()))
            .collect()
    }

    /// Inverse of [`SocialContext::to_params`]. Unknown keys are ignored and
    /// missing keys leave the field empty. A repeated key keeps its last value.
    pub fn from_params<I, K, V>(params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut context = Self::default();
        for (key, value) in params {
            if let Some(field) = ContextField::from_key(key.as_ref()) {
                context.update(field, value);
            }
        }
        context
    }

    /// URL-encoded query string (without the leading `?`), keys in
    /// declaration order.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (field, value) in self.provided() {
            serializer.append_pair(field.key(), value);
        }
        serializer.finish()
    }

    /// Parse a query string, with or without a leading `?`.
    pub fn from_query_string(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self::from_params(form_urlencoded::parse(query.as_bytes()).into_owned())
    }

    /// Parse either a full link (`https://host/path?groupSize=...`) or a bare
    /// query string.
    pub fn from_link(link: &str) -> Result<Self, ApiError> {
        let link = link.trim();
        if link.contains("://") {
            let url = Url::parse(link).map_err(|e| ApiError::InvalidLink(e.to_string()))?;
            Ok(Self::from_query_string(url.query().unwrap_or("")))
        } else {
            Ok(Self::from_query_string(link))
        }
    }

    /// Shareable link built on `base_url`, replacing any existing query.
    pub fn to_link(&self, base_url: &str) -> Result<String, ApiError> {
        let mut url = Url::parse(base_url).map_err(|e| ApiError::InvalidLink(e.to_string()))?;
        let query = self.to_query_string();
        url.set_query(if query.is_empty() { None } else { Some(&query) });
        Ok(url.to_string())
    }

    /// (label, display value) pairs for the provided fields.
    pub fn summary(&self) -> Vec<(&'static str, String)> {
        self.provided()
            .map(|(field, value)| (field.label(), field.display_value(value)))
            .collect()
    }

    /// Overlay the non-empty fields of `other` onto this context.
    pub fn merge(&mut self, other: &SocialContext) {
        for (field, value) in other.provided() {
            self.update(field, value.to_string());
        }
    }
}
