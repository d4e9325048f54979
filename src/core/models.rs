//! Wire types exchanged with the bin-collection API.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Successful response of the token endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Error body returned by the API, `{"detail": ...}`
///
/// `detail` is a plain string for most errors and a list of field errors
/// for validation failures.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub detail: serde_json::Value,
}

impl ErrorBody {
    pub fn message(&self) -> String {
        match &self.detail {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Array(items) => items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect::<Vec<_>>()
                .join("; "),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PreferredContactMethod {
    #[default]
    Email,
    Sms,
}

impl PreferredContactMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PreferredContactMethod::Email => "email",
            PreferredContactMethod::Sms => "sms",
        }
    }
}

impl fmt::Display for PreferredContactMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How long before a collection the reminder is sent
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ReminderTime {
    #[serde(rename = "1_hour")]
    OneHour,
    #[serde(rename = "2_hours")]
    TwoHours,
    #[serde(rename = "12_hours")]
    TwelveHours,
    #[default]
    #[serde(rename = "24_hours")]
    TwentyFourHours,
    #[serde(rename = "48_hours")]
    FortyEightHours,
}

impl ReminderTime {
    /// Value as sent on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderTime::OneHour => "1_hour",
            ReminderTime::TwoHours => "2_hours",
            ReminderTime::TwelveHours => "12_hours",
            ReminderTime::TwentyFourHours => "24_hours",
            ReminderTime::FortyEightHours => "48_hours",
        }
    }

    /// Human readable form, e.g. "24 hours"
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ")
    }
}

/// The authenticated user's settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub preferred_contact_method: PreferredContactMethod,
    #[serde(default)]
    pub reminder_time: Option<ReminderTime>,
    #[serde(default)]
    pub collection_url: Option<String>,
    #[serde(default)]
    pub next_scrape_date: Option<NaiveDateTime>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl UserProfile {
    /// Reminder time for display, "None" when unset
    pub fn reminder_label(&self) -> String {
        self.reminder_time
            .map(|r| r.label())
            .unwrap_or_else(|| "None".to_string())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BinType {
    HouseholdWaste,
    Recycling,
    GardenWaste,
}

impl BinType {
    pub fn label(&self) -> &'static str {
        match self {
            BinType::HouseholdWaste => "Household waste",
            BinType::Recycling => "Recycling",
            BinType::GardenWaste => "Garden waste",
        }
    }
}

/// A scheduled bin collection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Collection {
    pub id: Uuid,
    pub user_id: Uuid,
    pub bin_type: BinType,
    pub collection_date: NaiveDateTime,
    #[serde(default)]
    pub notification_sent: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Collections {
    pub data: Vec<Collection>,
    pub count: usize,
}

impl Collections {
    /// Earliest collection on or after `now`
    pub fn next_after(&self, now: NaiveDateTime) -> Option<&Collection> {
        self.data
            .iter()
            .filter(|c| c.collection_date >= now)
            .min_by_key(|c| c.collection_date)
    }
}
