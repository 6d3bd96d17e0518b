//! Create-incident form state and validation.

use crate::api::{NewIncident, Status};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Location,
    Status,
}

impl FormField {
    fn next(self) -> Self {
        match self {
            FormField::Title => FormField::Location,
            FormField::Location => FormField::Status,
            FormField::Status => FormField::Title,
        }
    }

    fn prev(self) -> Self {
        match self {
            FormField::Title => FormField::Status,
            FormField::Location => FormField::Title,
            FormField::Status => FormField::Location,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Title and Location are required.")]
    BothMissing,
    #[error("Title is required.")]
    MissingTitle,
    #[error("Location is required.")]
    MissingLocation,
}

#[derive(Debug, Clone)]
pub struct CreateForm {
    pub title: String,
    pub location: String,
    pub status: Status,
    pub focus: FormField,
    /// Inline validation message from the last submit attempt.
    pub error: Option<ValidationError>,
    /// A create request is in flight.
    pub submitting: bool,
}

impl Default for CreateForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            location: String::new(),
            status: Status::Open,
            focus: FormField::Title,
            error: None,
            submitting: false,
        }
    }
}

impl CreateForm {
    pub fn validate(&self) -> Result<NewIncident, ValidationError> {
        let title = self.title.trim();
        let location = self.location.trim();
        match (title.is_empty(), location.is_empty()) {
            (true, true) => Err(ValidationError::BothMissing),
            (true, false) => Err(ValidationError::MissingTitle),
            (false, true) => Err(ValidationError::MissingLocation),
            (false, false) => Ok(NewIncident {
                title: title.to_string(),
                location: location.to_string(),
                status: self.status,
            }),
        }
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        !self.submitting && self.validate().is_ok()
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn insert_char(&mut self, c: char) {
        match self.focus {
            FormField::Title => self.title.push(c),
            FormField::Location => self.location.push(c),
            FormField::Status => {
                if c == ' ' {
                    self.cycle_status(true);
                }
            }
        }
        self.error = None;
    }

    pub fn backspace(&mut self) {
        match self.focus {
            FormField::Title => {
                self.title.pop();
            }
            FormField::Location => {
                self.location.pop();
            }
            FormField::Status => {}
        }
    }

    /// Any status may be chosen at creation time.
    pub fn cycle_status(&mut self, forward: bool) {
        let idx = Status::ALL.iter().position(|s| *s == self.status).unwrap_or(0);
        let len = Status::ALL.len();
        let idx = if forward { (idx + 1) % len } else { (idx + len - 1) % len };
        self.status = Status::ALL[idx];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_blank_fields_rejected() {
        let mut form = CreateForm::default();
        assert_eq!(form.validate(), Err(ValidationError::BothMissing));
        form.title = "   ".to_string();
        form.location = "Dock 4".to_string();
        assert_eq!(form.validate(), Err(ValidationError::MissingTitle));
        form.title = "Spill".to_string();
        form.location = "\t".to_string();
        assert_eq!(form.validate(), Err(ValidationError::MissingLocation));
        assert!(!form.can_submit());
    }

    #[test]
    fn test_values_trimmed_and_status_defaults_open() {
        let form = CreateForm {
            title: "  Power outage ".to_string(),
            location: " 300 North Main Street".to_string(),
            ..Default::default()
        };
        assert_eq!(
            form.validate(),
            Ok(NewIncident {
                title: "Power outage".to_string(),
                location: "300 North Main Street".to_string(),
                status: Status::Open,
            })
        );
        assert!(form.can_submit());
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut form = CreateForm::default();
        form.insert_char('a');
        form.focus_next();
        form.insert_char('b');
        form.insert_char('c');
        form.backspace();
        form.focus_next();
        form.insert_char(' ');
        assert_eq!(form.title, "a");
        assert_eq!(form.location, "b");
        assert_eq!(form.status, Status::InProgress);
        form.focus_prev();
        assert_eq!(form.focus, FormField::Location);
    }

    #[test]
    fn test_submitting_disables_submit() {
        let mut form = CreateForm {
            title: "t".to_string(),
            location: "l".to_string(),
            ..Default::default()
        };
        form.submitting = true;
        assert!(!form.can_submit());
    }
}
