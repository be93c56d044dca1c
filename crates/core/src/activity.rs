//! User activity events.
//!
//! [`NewActivity`] is the input to the activity recorder: who did what, with
//! which outcome, plus optional monetary and network metadata. Optional
//! fields are `None` when not provided and are stored as SQL `NULL`, so a
//! consumer can tell "not provided" apart from "provided but empty".

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::DbId;

// ---------------------------------------------------------------------------
// Well-known tags
// ---------------------------------------------------------------------------

/// Activity types emitted by the dashboard itself. The column is free-form;
/// callers may use other tags.
pub mod activity_types {
    pub const LOGIN: &str = "login";
    pub const LOGOUT: &str = "logout";
    pub const DEPOSIT: &str = "deposit";
    pub const WITHDRAWAL: &str = "withdrawal";
    pub const TRANSFER: &str = "transfer";
}

/// Activity statuses emitted by the dashboard itself.
pub mod activity_statuses {
    pub const PENDING: &str = "pending";
    pub const COMPLETED: &str = "completed";
    pub const FAILED: &str = "failed";
}

/// Activity sources emitted by the dashboard itself.
pub mod activity_sources {
    pub const WEB: &str = "web";
}

// ---------------------------------------------------------------------------
// NewActivity
// ---------------------------------------------------------------------------

/// A user action to be recorded.
///
/// Built with [`NewActivity::new`] and the `with_*` methods, or deserialized
/// from JSON (missing optional fields become `None`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct NewActivity {
    #[validate(range(min = 1, message = "user_id must be a positive id"))]
    pub user_id: DbId,

    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 64, message = "type must be 1-64 characters"))]
    pub activity_type: String,

    #[validate(length(min = 1, max = 64, message = "status must be 1-64 characters"))]
    pub status: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Amount in minor currency units (cents).
    #[serde(default)]
    pub amount_cents: Option<i64>,

    #[serde(default)]
    pub currency: Option<String>,

    #[serde(default)]
    pub source: Option<String>,

    #[serde(default)]
    pub ip: Option<String>,

    #[serde(default)]
    pub user_agent: Option<String>,
}

impl NewActivity {
    /// Create an activity with only the mandatory fields set.
    pub fn new(user_id: DbId, activity_type: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            user_id,
            activity_type: activity_type.into(),
            status: status.into(),
            description: None,
            amount_cents: None,
            currency: None,
            source: None,
            ip: None,
            user_agent: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach a monetary amount in minor units together with its currency code.
    pub fn with_amount(mut self, amount_cents: i64, currency: impl Into<String>) -> Self {
        self.amount_cents = Some(amount_cents);
        self.currency = Some(currency.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Attach the originating network address and client descriptor.
    ///
    /// Either may be unknown; `None` leaves the field absent.
    pub fn with_client(mut self, ip: Option<String>, user_agent: Option<String>) -> Self {
        self.ip = ip;
        self.user_agent = user_agent;
        self
    }
}
