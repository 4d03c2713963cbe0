// Type -> category classification table
//
// Decision: Literals are matched exactly (case and accents included).
// Unknown types fall back to "Sin gestión".

use crate::event::EventCategory;

/// Types that always require someone to act.
pub const ACTION_REQUIRED_TYPES: [&str; 5] =
    ["Incidente", "Problema", "Emergencia", "Error", "Critico"];

/// Types that are informational.
pub const NO_ACTION_TYPES: [&str; 5] = [
    "Reunión",
    "Informe",
    "Actualización",
    "Notificación",
    "Consulta",
];

/// Result of looking an event type up in the classification table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub category: EventCategory,
    /// False when the type was not in either list and the fallback applied
    pub recognized: bool,
}

impl Classification {
    pub fn needs_action(&self) -> bool {
        self.category.needs_action()
    }
}

/// Classify an event type.
pub fn classify_type(event_type: &str) -> Classification {
    if ACTION_REQUIRED_TYPES.contains(&event_type) {
        Classification {
            category: EventCategory::RequiresAction,
            recognized: true,
        }
    } else if NO_ACTION_TYPES.contains(&event_type) {
        Classification {
            category: EventCategory::NoActionNeeded,
            recognized: true,
        }
    } else {
        Classification {
            category: EventCategory::NoActionNeeded,
            recognized: false,
        }
    }
}
