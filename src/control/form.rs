//! Form-control contract and validation
//!
//! Any form infrastructure can drive the editor through [`FormControl`]:
//! write a value in, get notified of changes and touches, and ask for
//! validation errors.

use log::warn;
use serde::Serialize;

/// Called with the new value after every mutation.
pub type ChangeCallback = Box<dyn FnMut(Option<&str>)>;

/// Called when the user has interacted with the control.
pub type TouchedCallback = Box<dyn FnMut()>;

/// Generic form-control capability set.
pub trait FormControl {
    /// Write a value from the form model. `None` is the empty/absent value.
    fn write_value(&mut self, value: Option<String>);

    /// Register the change callback. Replaces any earlier registration.
    fn register_on_change(&mut self, callback: ChangeCallback);

    /// Register the touched callback. Replaces any earlier registration.
    fn register_on_touched(&mut self, callback: TouchedCallback);

    /// Validate the current value. `None` means valid.
    fn validate(&self) -> Option<ValidationErrors>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Constraints
// ─────────────────────────────────────────────────────────────────────────────

/// Validation constraints, fixed when the control is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Constraints {
    /// The value must not be empty
    pub required: bool,
    /// Maximum length in characters; `None` means unlimited
    pub maxlength: Option<usize>,
}

impl Constraints {
    /// Build constraints from raw attribute values.
    ///
    /// A present `required` attribute means required, including the empty
    /// string of a bare attribute, unless its value is `"false"`. A
    /// `maxlength` of `-1`, `0` or anything unparsable means unlimited.
    pub fn from_attributes(required: Option<&str>, maxlength: Option<&str>) -> Self {
        let required = match required {
            Some(value) => !value.trim().eq_ignore_ascii_case("false"),
            None => false,
        };

        let maxlength = maxlength.and_then(|raw| match raw.trim().parse::<i64>() {
            Ok(limit) if limit > 0 => Some(limit as usize),
            Ok(_) => None,
            Err(e) => {
                warn!("Ignoring maxlength attribute '{}': {}", raw, e);
                None
            }
        });

        Self {
            required,
            maxlength,
        }
    }

    /// Check `value` against the constraints.
    ///
    /// When both rules fail only the length violation is reported.
    pub fn check(&self, value: &str) -> Option<ValidationErrors> {
        let length = value.chars().count();

        if let Some(limit) = self.maxlength {
            if length > limit {
                return Some(ValidationErrors::MAX_LENGTH);
            }
        }
        if self.required && length == 0 {
            return Some(ValidationErrors::REQUIRED);
        }
        None
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Validation Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Violated validation rules.
///
/// Serializes as `{"required":true}` or `{"maxlength":true}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ValidationErrors {
    #[serde(skip_serializing_if = "is_false")]
    pub required: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub maxlength: bool,
}

impl ValidationErrors {
    pub const REQUIRED: Self = Self {
        required: true,
        maxlength: false,
    };

    pub const MAX_LENGTH: Self = Self {
        required: false,
        maxlength: true,
    };
}

fn is_false(value: &bool) -> bool {
    !*value
}
