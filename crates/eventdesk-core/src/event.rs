// Event domain types
//
// These types represent the Event entity, its lifecycle status and its
// post-review category. Used by the engine, the stores and both transports.
//
// Decision: Wire literals are the Spanish display values ("Revisado",
// "Sin gestión", ...). They are the only accepted textual forms.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::error::EventError;

// ============================================================================
// EventId
// ============================================================================

/// Store-assigned event identifier (UUID v7, time-ordered).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(Uuid);

impl EventId {
    /// Generate a fresh identifier
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Parse an identifier supplied by a caller.
    ///
    /// A malformed identifier cannot resolve to any stored event, so it is
    /// reported as `NotFound` rather than as a parse failure.
    pub fn parse(value: &str) -> Result<Self, EventError> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|_| EventError::NotFound(value.to_string()))
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for EventId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// Status and category
// ============================================================================

/// Lifecycle stage of an event.
/// - `Pendiente por revisar`: created, not yet reviewed
/// - `Revisado`: reviewed, eligible for classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub enum EventStatus {
    /// Created, waiting for review.
    #[serde(rename = "Pendiente por revisar")]
    PendingReview,
    /// Reviewed; classification is allowed.
    #[serde(rename = "Revisado")]
    Reviewed,
}

impl EventStatus {
    pub const ALL: [EventStatus; 2] = [EventStatus::PendingReview, EventStatus::Reviewed];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::PendingReview => "Pendiente por revisar",
            EventStatus::Reviewed => "Revisado",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventStatus {
    type Err = EventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| EventError::InvalidStatus(s.to_string()))
    }
}

/// Post-review classification of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub enum EventCategory {
    /// Someone has to act on the event.
    #[serde(rename = "Requiere gestión")]
    RequiresAction,
    /// Informational only.
    #[serde(rename = "Sin gestión")]
    NoActionNeeded,
}

impl EventCategory {
    pub const ALL: [EventCategory; 2] = [EventCategory::RequiresAction, EventCategory::NoActionNeeded];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::RequiresAction => "Requiere gestión",
            EventCategory::NoActionNeeded => "Sin gestión",
        }
    }

    /// `needs_action` mirrors the category
    pub fn needs_action(&self) -> bool {
        matches!(self, EventCategory::RequiresAction)
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventCategory {
    type Err = EventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| EventError::InvalidCategory(s.to_string()))
    }
}

// ============================================================================
// Event
// ============================================================================

/// A tracked occurrence (incident, meeting, notification, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Event {
    /// Unique identifier, assigned by the store on creation.
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = Uuid))]
    pub id: EventId,
    /// Short human-readable name.
    #[cfg_attr(feature = "openapi", schema(example = "Server down"))]
    pub name: String,
    /// Free-form type. Drives automatic classification.
    #[serde(rename = "type")]
    #[cfg_attr(feature = "openapi", schema(example = "Incidente"))]
    pub event_type: String,
    /// Longer description.
    pub description: String,
    /// Creation timestamp, stamped by the engine.
    pub date: DateTime<Utc>,
    /// Lifecycle stage.
    pub status: EventStatus,
    /// Classification, present only once the event is reviewed and classified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<EventCategory>,
    /// True iff `category` is `Requiere gestión`.
    #[serde(default)]
    pub needs_action: bool,
}

impl Event {
    pub fn is_reviewed(&self) -> bool {
        self.status == EventStatus::Reviewed
    }

    /// Set the category together with its `needs_action` mirror.
    pub fn set_category(&mut self, category: EventCategory) {
        self.category = Some(category);
        self.needs_action = category.needs_action();
    }

    /// Drop any classification.
    pub fn clear_category(&mut self) {
        self.category = None;
        self.needs_action = false;
    }
}

/// An event that has not been persisted yet (no id).
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub name: String,
    pub event_type: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub status: EventStatus,
    pub category: Option<EventCategory>,
    pub needs_action: bool,
}

impl NewEvent {
    /// Attach a store-assigned identifier
    pub fn with_id(self, id: EventId) -> Event {
        Event {
            id,
            name: self.name,
            event_type: self.event_type,
            description: self.description,
            date: self.date,
            status: self.status,
            category: self.category,
            needs_action: self.needs_action,
        }
    }
}

/// Caller-supplied event fields for create and update.
///
/// Status and category stay raw text here; the engine parses them so an
/// unknown literal is reported as `InvalidStatus`/`InvalidCategory` instead of
/// a transport deserialization failure. Missing text fields default to empty
/// and fail validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct EventInput {
    /// Short human-readable name.
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(example = "Server down"))]
    pub name: String,
    /// Free-form type, e.g. "Incidente" or "Reunión".
    #[serde(default, rename = "type")]
    #[cfg_attr(feature = "openapi", schema(example = "Incidente"))]
    pub event_type: String,
    /// Longer description.
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(example = "Primary API host unreachable"))]
    pub description: String,
    /// "Pendiente por revisar" or "Revisado".
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(example = "Pendiente por revisar"))]
    pub status: String,
    /// "Requiere gestión" or "Sin gestión". Only kept for reviewed events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl EventInput {
    pub fn new(
        name: impl Into<String>,
        event_type: impl Into<String>,
        description: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            event_type: event_type.into(),
            description: description.into(),
            status: status.into(),
            category: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Treat an empty category the same as an absent one
    pub fn category(&self) -> Option<&str> {
        self.category
            .as_deref()
            .filter(|c| !c.is_empty())
    }
}

// ============================================================================
// EventFilter
// ============================================================================

/// Equality filter for `EventStore::find`. Unset fields match anything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventFilter {
    pub status: Option<EventStatus>,
    pub category: Option<EventCategory>,
    pub needs_action: Option<bool>,
}

impl EventFilter {
    pub fn by_status(status: EventStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    /// Category is only meaningful on reviewed events
    pub fn by_category(category: EventCategory) -> Self {
        Self {
            status: Some(EventStatus::Reviewed),
            category: Some(category),
            needs_action: None,
        }
    }

    pub fn needing_action() -> Self {
        Self {
            status: Some(EventStatus::Reviewed),
            category: None,
            needs_action: Some(true),
        }
    }

    pub fn matches(&self, event: &Event) -> bool {
        self.status.map_or(true, |s| event.status == s)
            && self.category.map_or(true, |c| event.category == Some(c))
            && self.needs_action.map_or(true, |n| event.needs_action == n)
    }
}
