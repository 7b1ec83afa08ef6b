//! Form controls.
//!
//! A [`Field`] is created unbound, with an empty value. Handlers bind it to
//! the visitor's draft and attach any validation message before rendering, so
//! a rejected form comes back with everything the visitor typed.
//!
//! Rendered by `templates/partials/field.html`, which branches on the
//! `as_*` accessors.

use pareena_core::forms::{Choice, FieldErrors};

/// HTML `type` of a single-line input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Email,
    Tel,
    Date,
}

impl InputKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Tel => "tel",
            Self::Date => "date",
        }
    }
}

/// `<input>`.
#[derive(Debug, Clone)]
pub struct TextField {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: InputKind,
    pub placeholder: &'static str,
    pub required: bool,
    /// Lower bound for date inputs, `YYYY-MM-DD`.
    pub min: Option<String>,
    pub value: String,
    pub error: Option<String>,
}

/// One `<option>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// `<select>` over a fixed [`Choice`] list.
#[derive(Debug, Clone)]
pub struct SelectField {
    pub name: &'static str,
    pub label: &'static str,
    /// Text of the empty leading option.
    pub placeholder: &'static str,
    pub required: bool,
    pub options: Vec<SelectOption>,
    pub error: Option<String>,
}

/// `<textarea>`.
#[derive(Debug, Clone)]
pub struct TextAreaField {
    pub name: &'static str,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub required: bool,
    pub rows: u8,
    pub value: String,
    pub error: Option<String>,
}

/// Any form control.
#[derive(Debug, Clone)]
pub enum Field {
    Text(TextField),
    Select(SelectField),
    TextArea(TextAreaField),
}

impl Field {
    /// Optional single-line text input.
    #[must_use]
    pub const fn input(name: &'static str, label: &'static str, kind: InputKind) -> Self {
        Self::Text(TextField {
            name,
            label,
            kind,
            placeholder: "",
            required: false,
            min: None,
            value: String::new(),
            error: None,
        })
    }

    /// Optional select; every option starts unselected.
    #[must_use]
    pub fn select<C: Choice>(name: &'static str, label: &'static str, placeholder: &'static str) -> Self {
        Self::Select(SelectField {
            name,
            label,
            placeholder,
            required: false,
            options: C::ALL
                .iter()
                .map(|choice| SelectOption {
                    value: choice.value(),
                    label: choice.label(),
                    selected: false,
                })
                .collect(),
            error: None,
        })
    }

    /// Optional multi-line input.
    #[must_use]
    pub const fn textarea(name: &'static str, label: &'static str, rows: u8) -> Self {
        Self::TextArea(TextAreaField {
            name,
            label,
            placeholder: "",
            required: false,
            rows,
            value: String::new(),
            error: None,
        })
    }

    #[must_use]
    pub const fn as_text(&self) -> Option<&TextField> {
        match self {
            Self::Text(f) => Some(f),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_select(&self) -> Option<&SelectField> {
        match self {
            Self::Select(f) => Some(f),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_textarea(&self) -> Option<&TextAreaField> {
        match self {
            Self::TextArea(f) => Some(f),
            _ => None,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Text(f) => f.name,
            Self::Select(f) => f.name,
            Self::TextArea(f) => f.name,
        }
    }

    #[must_use]
    pub const fn is_required(&self) -> bool {
        match self {
            Self::Text(f) => f.required,
            Self::Select(f) => f.required,
            Self::TextArea(f) => f.required,
        }
    }

    /// The validation message attached to this field, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Text(f) => f.error.as_deref(),
            Self::Select(f) => f.error.as_deref(),
            Self::TextArea(f) => f.error.as_deref(),
        }
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        match &mut self {
            Self::Text(f) => f.required = true,
            Self::Select(f) => f.required = true,
            Self::TextArea(f) => f.required = true,
        }
        self
    }

    /// Placeholder text. Selects keep theirs from construction.
    #[must_use]
    pub fn placeholder(mut self, placeholder: &'static str) -> Self {
        match &mut self {
            Self::Text(f) => f.placeholder = placeholder,
            Self::TextArea(f) => f.placeholder = placeholder,
            Self::Select(_) => {}
        }
        self
    }

    /// Lower bound for a date input.
    #[must_use]
    pub fn min(mut self, min: impl Into<String>) -> Self {
        if let Self::Text(f) = &mut self {
            f.min = Some(min.into());
        }
        self
    }

    /// Fill in the visitor's value. For selects this marks the matching option.
    #[must_use]
    pub fn bind(mut self, value: &str) -> Self {
        match &mut self {
            Self::Text(f) => f.value = value.to_string(),
            Self::TextArea(f) => f.value = value.to_string(),
            Self::Select(f) => {
                let value = value.trim();
                for option in &mut f.options {
                    option.selected = option.value == value;
                }
            }
        }
        self
    }

    /// Attach the message for this field from a failed validation.
    #[must_use]
    pub fn with_errors(mut self, errors: &FieldErrors) -> Self {
        let Some(message) = errors.get(self.name()).map(ToString::to_string) else {
            return self;
        };
        match &mut self {
            Self::Text(f) => f.error = Some(message),
            Self::Select(f) => f.error = Some(message),
            Self::TextArea(f) => f.error = Some(message),
        }
        self
    }
}
