//! Plan entity - a user-created event with a schedule, location, and owner

use chrono::{DateTime, Utc};
use std::fmt;

use crate::value_objects::{PlanId, UserId};

/// Placeholder used when a plan document carries no title
pub const UNTITLED_PLAN: &str = "your plan";

/// Plan entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub id: PlanId,
    pub title: String,
    /// When the plan takes place; plans at or past this instant are expired
    pub scheduled_at: DateTime<Utc>,
    pub location: Option<String>,
    /// Absent on some legacy documents; notifications to the owner are
    /// skipped when it cannot be resolved
    pub owner_id: Option<UserId>,
}

impl Plan {
    /// Create a new Plan
    pub fn new(
        id: PlanId,
        title: impl Into<String>,
        scheduled_at: DateTime<Utc>,
        owner_id: UserId,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            scheduled_at,
            location: None,
            owner_id: Some(owner_id),
        }
    }

    /// Check whether the plan is expired relative to `now`
    #[inline]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.scheduled_at <= now
    }

    /// Diff the watched fields against a newer snapshot
    ///
    /// Only schedule time, location, and title are watched; the result is
    /// always in that fixed order. Changes to any other field never show
    /// up here.
    pub fn changed_fields(&self, after: &Plan) -> Vec<ChangedField> {
        let mut changed = Vec::new();
        if self.scheduled_at != after.scheduled_at {
            changed.push(ChangedField::Schedule);
        }
        if self.location != after.location {
            changed.push(ChangedField::Location);
        }
        if self.title != after.title {
            changed.push(ChangedField::Title);
        }
        changed
    }
}

/// One of the three plan fields watched for update notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangedField {
    Schedule,
    Location,
    Title,
}

impl fmt::Display for ChangedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Schedule => f.write_str("schedule"),
            Self::Location => f.write_str("location"),
            Self::Title => f.write_str("title"),
        }
    }
}

/// Join changed fields for the notification body ("schedule, location")
pub fn join_changed_fields(fields: &[ChangedField]) -> String {
    let names: Vec<String> = fields.iter().map(ToString::to_string).collect();
    names.join(", ")
}
