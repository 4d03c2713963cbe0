// Input validation for event create/update
//
// The validator is injected into the engine so deployments can tighten the
// rules (length limits, forbidden names) without touching engine code.

use crate::error::EventError;
use crate::event::EventInput;

/// Checks caller-supplied event fields before any parsing or store access.
pub trait EventValidator: Send + Sync {
    fn validate(&self, input: &EventInput) -> Result<(), EventError>;
}

/// Default validator: `name`, `type`, `description` and `status` must be
/// non-empty. Values are taken as sent; whitespace is not stripped.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequiredFieldsValidator;

impl EventValidator for RequiredFieldsValidator {
    fn validate(&self, input: &EventInput) -> Result<(), EventError> {
        let fields = [
            ("name", &input.name),
            ("type", &input.event_type),
            ("description", &input.description),
            ("status", &input.status),
        ];
        for (field, value) in fields {
            if value.is_empty() {
                return Err(EventError::validation(field));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> EventInput {
        EventInput::new("Server down", "Incidente", "x", "Pendiente por revisar")
    }

    #[test]
    fn test_valid_input() {
        assert!(RequiredFieldsValidator.validate(&valid()).is_ok());
    }

    #[test]
    fn test_each_required_field() {
        let cases: [(&str, fn(&mut EventInput)); 4] = [
            ("name", |i| i.name.clear()),
            ("type", |i| i.event_type.clear()),
            ("description", |i| i.description.clear()),
            ("status", |i| i.status.clear()),
        ];
        for (field, blank) in cases {
            let mut input = valid();
            blank(&mut input);
            assert!(matches!(
                RequiredFieldsValidator.validate(&input),
                Err(EventError::Validation(f)) if f == field
            ));
        }
    }

    #[test]
    fn test_whitespace_counts_as_present() {
        let input = EventInput::new(" ", " ", " ", "Revisado");
        assert!(RequiredFieldsValidator.validate(&input).is_ok());
    }

    #[test]
    fn test_category_is_optional() {
        let input = valid().with_category("");
        assert!(RequiredFieldsValidator.validate(&input).is_ok());
    }
}
