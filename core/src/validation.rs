//! Form validation for FAQ records.
//!
//! Each field is checked independently and reports the first rule it
//! breaks. Callers validating a single changed field pass the merged form
//! and ask for that field only.

use std::fmt;

use crate::types::FaqRecord;

const QUESTION_MIN_CHARS: usize = 5;
const ANSWER_MIN_CHARS: usize = 10;

/// The editable part of a record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaqForm {
    pub question: String,
    pub answer: String,
}

impl FaqForm {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

impl From<&FaqRecord> for FaqForm {
    fn from(record: &FaqRecord) -> Self {
        Self::new(record.question.clone(), record.answer.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Question,
    Answer,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Question => f.write_str("question"),
            Field::Answer => f.write_str("answer"),
        }
    }
}

/// Field-level messages; empty when the form is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    pub question: Option<String>,
    pub answer: Option<String>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.question.is_none() && self.answer.is_none()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Question => self.question.as_deref(),
            Field::Answer => self.answer.as_deref(),
        }
    }
}

pub fn validate(form: &FaqForm) -> ValidationErrors {
    ValidationErrors {
        question: validate_field(form, Field::Question),
        answer: validate_field(form, Field::Answer),
    }
}

pub fn validate_field(form: &FaqForm, field: Field) -> Option<String> {
    match field {
        Field::Question => check_text(&form.question, "Question", QUESTION_MIN_CHARS),
        Field::Answer => check_text(&form.answer, "Answer", ANSWER_MIN_CHARS),
    }
}

fn check_text(value: &str, label: &str, min_chars: usize) -> Option<String> {
    if value.is_empty() {
        return Some(format!("{label} is required."));
    }
    if value.trim().chars().count() < min_chars {
        return Some(format!("{label} must be at least {min_chars} characters long."));
    }
    if !value.chars().any(|c| c.is_ascii_alphabetic()) {
        return Some(format!("{label} must contain at least one letter."));
    }
    None
}
