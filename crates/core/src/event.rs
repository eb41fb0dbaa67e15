//! # Event Module
//!
//! Events and their closed set of categories. Capacity is a ceiling that is
//! only enforced through ticket-type stock.

use crate::buyer::required;
use crate::error::{CoreError, CoreResult};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Event category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Concert,
    Conference,
    Show,
}

impl Category {
    /// All categories, in storage order
    pub const ALL: [Category; 3] = [Category::Concert, Category::Conference, Category::Show];

    /// Code string stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Concert => "concert",
            Category::Conference => "conference",
            Category::Show => "show",
        }
    }
}

impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "concert" => Ok(Category::Concert),
            "conference" => Ok(Category::Conference),
            "show" => Ok(Category::Show),
            other => Err(CoreError::InvalidCategory(other.to_string())),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A scheduled event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Calendar date of the event
    pub date: NaiveDate,
    /// Doors / start time
    pub start_time: Option<NaiveTime>,
    pub venue: String,
    /// Maximum attendance, always > 0
    pub capacity: i64,
    pub category: Category,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {} @ {})", self.name, self.category, self.date, self.venue)
    }
}

/// Input for creating an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEvent {
    pub name: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub venue: String,
    pub capacity: i64,
    pub category: Category,
}

impl NewEvent {
    pub fn new(name: &str, date: NaiveDate, venue: &str, capacity: i64, category: Category) -> Self {
        Self {
            name: name.to_string(),
            description: None,
            date,
            start_time: None,
            venue: venue.to_string(),
            capacity,
            category,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn starting_at(mut self, start_time: NaiveTime) -> Self {
        self.start_time = Some(start_time);
        self
    }

    /// Validate and normalise: name and venue required, capacity positive.
    pub fn validated(self) -> CoreResult<Self> {
        let name = required("name", &self.name)?;
        let venue = required("venue", &self.venue)?;
        if self.capacity <= 0 {
            return Err(CoreError::not_positive("capacity", self.capacity));
        }
        let description = self
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        Ok(Self {
            name,
            venue,
            description,
            ..self
        })
    }
}
