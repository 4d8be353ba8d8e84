//! Movie entity and related types

use serde::{Deserialize, Serialize};

use super::validation::{
    validate_description, validate_subtitle, validate_title, MovieValidationError,
};
use crate::domain::storage::{FieldValue, Fields, StorageEntity, StorageKey};

/// Largest accepted price, in whole currency units
const MAX_PRICE: f64 = 10_000_000_000.0;

/// Movie identifier assigned by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(i64);

impl MovieId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for MovieId {
    fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    fn as_i64(&self) -> i64 {
        self.0
    }
}

/// Fixed-point price with two decimal digits, held as cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Price(i64);

impl Price {
    pub fn from_cents(cents: i64) -> Result<Self, MovieValidationError> {
        if cents < 0 {
            return Err(MovieValidationError::InvalidPrice);
        }
        Ok(Self(cents))
    }

    pub fn cents(&self) -> i64 {
        self.0
    }
}

impl TryFrom<f64> for Price {
    type Error = MovieValidationError;

    fn try_from(amount: f64) -> Result<Self, Self::Error> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(MovieValidationError::InvalidPrice);
        }
        if amount > MAX_PRICE {
            return Err(MovieValidationError::PriceOutOfRange);
        }
        Ok(Self((amount * 100.0).round() as i64))
    }
}

impl From<Price> for f64 {
    fn from(price: Price) -> Self {
        price.0 as f64 / 100.0
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Movie values before an identity is assigned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMovie {
    title: String,
    subtitle: Option<String>,
    price: Price,
    description: Option<String>,
}

impl NewMovie {
    /// Validates and normalises the values; blank optional text becomes absent
    pub fn new(
        title: impl Into<String>,
        subtitle: Option<String>,
        price: Price,
        description: Option<String>,
    ) -> Result<Self, MovieValidationError> {
        let title = title.into().trim().to_string();
        let subtitle = normalize(subtitle);
        let description = normalize(description);

        validate_title(&title)?;
        validate_subtitle(subtitle.as_deref())?;
        validate_description(description.as_deref())?;

        Ok(Self {
            title,
            subtitle,
            price,
            description,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref()
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Fields for NewMovie {
    fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("title", self.title.clone().into()),
            ("subtitle", self.subtitle.clone().into()),
            ("price_cents", self.price.cents().into()),
            ("description", self.description.clone().into()),
        ]
    }
}

/// A persisted movie
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movie {
    id: MovieId,
    data: NewMovie,
}

impl Movie {
    pub fn id(&self) -> MovieId {
        self.id
    }

    pub fn title(&self) -> &str {
        self.data.title()
    }

    pub fn subtitle(&self) -> Option<&str> {
        self.data.subtitle()
    }

    pub fn price(&self) -> Price {
        self.data.price()
    }

    pub fn description(&self) -> Option<&str> {
        self.data.description()
    }

    /// Replaces every value wholesale, keeping the identity
    pub fn replace(&mut self, data: NewMovie) {
        self.data = data;
    }
}

impl StorageEntity for Movie {
    type Key = MovieId;
    type Draft = NewMovie;

    const TABLE: &'static str = "movies";
    const UNIQUE: &'static [&'static [&'static str]] = &[&["title", "subtitle"]];

    fn key(&self) -> Self::Key {
        self.id
    }

    fn from_draft(key: Self::Key, draft: Self::Draft) -> Self {
        Self { id: key, data: draft }
    }

    fn to_draft(&self) -> Self::Draft {
        self.data.clone()
    }
}
