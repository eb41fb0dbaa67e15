//! # Buyer Module
//!
//! Buyers are registered once and never modified or deleted.

use crate::error::{CoreError, CoreResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A registered ticket buyer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Buyer {
    /// Database identity
    pub id: i64,
    /// Family name
    pub last_name: String,
    /// Given name
    pub first_name: String,
    /// Unique, lower-cased email
    pub email: String,
    /// Optional phone number
    pub phone: Option<String>,
    /// Registration timestamp
    pub registered_at: DateTime<Utc>,
}

impl Buyer {
    /// "First Last" as shown on receipts and listings
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl fmt::Display for Buyer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}> (#{})", self.full_name(), self.email, self.id)
    }
}

/// Input for registering a buyer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBuyer {
    pub last_name: String,
    pub first_name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl NewBuyer {
    pub fn new(last_name: &str, first_name: &str, email: &str) -> Self {
        Self {
            last_name: last_name.to_string(),
            first_name: first_name.to_string(),
            email: email.to_string(),
            phone: None,
        }
    }

    pub fn with_phone(mut self, phone: &str) -> Self {
        self.phone = Some(phone.to_string());
        self
    }

    /// Validate and normalise the record.
    ///
    /// Names are trimmed, the email is trimmed and lower-cased, and a blank
    /// phone becomes `None`.
    pub fn validated(self) -> CoreResult<Self> {
        let last_name = required("last_name", &self.last_name)?;
        let first_name = required("first_name", &self.first_name)?;
        let email = normalize_email(&self.email)?;
        let phone = self
            .phone
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());

        Ok(Self {
            last_name,
            first_name,
            email,
            phone,
        })
    }
}

/// Trim and lower-case an email, rejecting anything without a local part
/// and a dotted domain.
pub fn normalize_email(raw: &str) -> CoreResult<String> {
    let email = raw.trim().to_lowercase();
    if email.is_empty() {
        return Err(CoreError::MissingField("email"));
    }

    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };

    if valid {
        Ok(email)
    } else {
        Err(CoreError::InvalidEmail(raw.trim().to_string()))
    }
}

pub(crate) fn required(field: &'static str, value: &str) -> CoreResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::MissingField(field));
    }
    Ok(trimmed.to_string())
}
