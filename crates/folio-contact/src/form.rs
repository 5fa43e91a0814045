use std::sync::LazyLock;

use folio_common::ContactError;
use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid")
});

const MIN_MESSAGE_CHARS: usize = 10;

/// A submitted contact form. Missing fields deserialize as empty and are
/// then rejected by [`ContactForm::validate`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    /// Every failing rule, in field order.
    pub fn problems(&self) -> Vec<&'static str> {
        let mut problems = Vec::new();
        if self.name.trim().is_empty() {
            problems.push("Name is required");
        }
        if !EMAIL_RE.is_match(self.email.trim()) {
            problems.push("Please enter a valid email");
        }
        if self.subject.trim().is_empty() {
            problems.push("Subject is required");
        }
        if self.message.chars().count() < MIN_MESSAGE_CHARS {
            problems.push("Message must be at least 10 characters");
        }
        problems
    }

    pub fn validate(&self) -> Result<(), ContactError> {
        let problems = self.problems();
        if problems.is_empty() {
            Ok(())
        } else {
            Err(ContactError::Validation(problems.join("; ")))
        }
    }
}
