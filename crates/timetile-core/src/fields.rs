//! Time-field port and an in-memory implementation.
//!
//! The three time fields double as display and input: while the clock is
//! live the program writes the current time into them, and while it is
//! overridden the user types into them. The [`TimeFieldPort`] trait hides
//! the actual widget toolkit so the clock can be driven and tested without
//! any UI.
//!
//! [`MemoryTimeFields`] keeps the values in a small map. The engine binary
//! uses it as its field store and feeds it from operator commands.

use std::collections::BTreeMap;

use timetile_types::{ClockMode, ControlButton, TimeField};

/// Errors raised when a user edit cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// The field is disabled because the clock is live.
    #[error("field {field} is locked while the clock is live")]
    Locked {
        /// The field the edit targeted.
        field: TimeField,
    },
}

/// Access to the hour/minute/second inputs and the stop/resume controls.
///
/// Program writes through [`set_value`](TimeFieldPort::set_value) always
/// succeed, even on a disabled field. Only user edits respect the
/// editable flag; see [`edit_field`].
pub trait TimeFieldPort {
    /// Current raw contents of a field.
    fn value(&self, field: TimeField) -> String;

    /// Overwrite a field's contents.
    fn set_value(&mut self, field: TimeField, value: &str);

    /// Whether the user may currently type into a field.
    fn is_editable(&self, field: TimeField) -> bool;

    /// Enable or disable user input on a field.
    fn set_editable(&mut self, field: TimeField, editable: bool);

    /// Show the control matching `mode` and hide the other one.
    fn show_control(&mut self, mode: ClockMode);
}

/// Apply a user edit, refusing it when the field is disabled.
///
/// # Errors
///
/// Returns [`FieldError::Locked`] if the field is not editable.
pub fn edit_field<P: TimeFieldPort + ?Sized>(
    port: &mut P,
    field: TimeField,
    value: &str,
) -> Result<(), FieldError> {
    if !port.is_editable(field) {
        return Err(FieldError::Locked { field });
    }
    port.set_value(field, value);
    Ok(())
}

/// State of a single in-memory field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct FieldState {
    value: String,
    editable: bool,
}

/// Field store that lives entirely in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryTimeFields {
    fields: BTreeMap<TimeField, FieldState>,
    visible_control: ControlButton,
}

impl MemoryTimeFields {
    /// Create three empty, disabled fields with the stop control showing.
    pub fn new() -> Self {
        let fields = TimeField::ALL
            .iter()
            .map(|&field| (field, FieldState::default()))
            .collect();
        Self {
            fields,
            visible_control: ControlButton::Stop,
        }
    }

    /// The control currently shown.
    pub const fn visible_control(&self) -> ControlButton {
        self.visible_control
    }

    /// All three values in display order.
    pub fn values(&self) -> [String; 3] {
        TimeField::ALL.map(|field| self.value(field))
    }
}

impl Default for MemoryTimeFields {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeFieldPort for MemoryTimeFields {
    fn value(&self, field: TimeField) -> String {
        self.fields
            .get(&field)
            .map(|state| state.value.clone())
            .unwrap_or_default()
    }

    fn set_value(&mut self, field: TimeField, value: &str) {
        let state = self.fields.entry(field).or_default();
        value.clone_into(&mut state.value);
    }

    fn is_editable(&self, field: TimeField) -> bool {
        self.fields.get(&field).is_some_and(|state| state.editable)
    }

    fn set_editable(&mut self, field: TimeField, editable: bool) {
        self.fields.entry(field).or_default().editable = editable;
    }

    fn show_control(&mut self, mode: ClockMode) {
        self.visible_control = ControlButton::visible_in(mode);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn new_fields_are_empty_and_locked() {
        let fields = MemoryTimeFields::new();
        for field in TimeField::ALL {
            assert_eq!(fields.value(field), "");
            assert!(!fields.is_editable(field));
        }
        assert_eq!(fields.visible_control(), ControlButton::Stop);
    }

    #[test]
    fn program_writes_ignore_lock() {
        let mut fields = MemoryTimeFields::new();
        fields.set_value(TimeField::Minute, "42");
        assert_eq!(fields.value(TimeField::Minute), "42");
    }

    #[test]
    fn user_edit_requires_editable_field() {
        let mut fields = MemoryTimeFields::new();
        let err = edit_field(&mut fields, TimeField::Hour, "07").unwrap_err();
        assert_eq!(
            err,
            FieldError::Locked {
                field: TimeField::Hour
            }
        );

        fields.set_editable(TimeField::Hour, true);
        edit_field(&mut fields, TimeField::Hour, "07").unwrap();
        assert_eq!(fields.value(TimeField::Hour), "07");
    }

    #[test]
    fn show_control_swaps_buttons() {
        let mut fields = MemoryTimeFields::new();
        fields.show_control(ClockMode::Overridden);
        assert_eq!(fields.visible_control(), ControlButton::Resume);
        fields.show_control(ClockMode::Live);
        assert_eq!(fields.visible_control(), ControlButton::Stop);
    }
}
