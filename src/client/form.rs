//! Contact form state.
//!
//! Each field re-runs its validation rule on blur and again on submit.
//! Submission is refused while any field has an outstanding error or while
//! an earlier submission is still in flight. The lifecycle is
//! `Idle -> Submitting -> (Success | Error) -> Idle`.

use std::time::Duration;

use tracing::{info, warn};

use crate::client::api::MessageSender;
use crate::models::message::{CreateMessage, Message};
use crate::utils::validation::{validate_message, validate_name, validate_phone};

/// How long a confirmation stays on screen before the form is cleared.
pub const SUCCESS_RESET_DELAY: Duration = Duration::from_secs(3);

pub const GENERIC_SUBMIT_ERROR: &str = "Failed to send message";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Phone,
    Message,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Phone, Field::Message];

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Phone => "Phone",
            Field::Message => "Message",
        }
    }

    fn rule(self) -> fn(&str) -> Vec<String> {
        match self {
            Field::Name => validate_name,
            Field::Phone => validate_phone,
            Field::Message => validate_message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormStatus {
    Idle,
    Submitting,
    Success(Message),
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitBlocked {
    InFlight,
    InvalidFields,
}

#[derive(Debug, Clone)]
pub struct MessageForm {
    values: CreateMessage,
    errors: [Vec<String>; 3],
    status: FormStatus,
}

impl Default for MessageForm {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageForm {
    pub fn new() -> Self {
        Self {
            values: CreateMessage::default(),
            errors: Default::default(),
            status: FormStatus::Idle,
        }
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.values.name,
            Field::Phone => &self.values.phone,
            Field::Message => &self.values.message,
        }
    }

    pub fn errors(&self, field: Field) -> &[String] {
        &self.errors[field as usize]
    }

    pub fn has_errors(&self) -> bool {
        self.errors.iter().any(|errors| !errors.is_empty())
    }

    pub fn is_submitting(&self) -> bool {
        self.status == FormStatus::Submitting
    }

    /// Inputs are locked while a submission is in flight.
    pub fn set_value(&mut self, field: Field, value: impl Into<String>) {
        if self.is_submitting() {
            return;
        }
        let value = value.into();
        match field {
            Field::Name => self.values.name = value,
            Field::Phone => self.values.phone = value,
            Field::Message => self.values.message = value,
        }
    }

    /// Re-runs the field's rule and returns its current errors.
    pub fn blur(&mut self, field: Field) -> &[String] {
        let errors = (field.rule())(self.value(field));
        self.errors[field as usize] = errors;
        self.errors(field)
    }

    pub fn validate_all(&mut self) -> bool {
        for field in Field::ALL {
            self.blur(field);
        }
        !self.has_errors()
    }

    /// Moves to `Submitting` and hands out the payload to send.
    pub fn begin_submit(&mut self) -> Result<CreateMessage, SubmitBlocked> {
        if self.is_submitting() {
            return Err(SubmitBlocked::InFlight);
        }
        if !self.validate_all() {
            return Err(SubmitBlocked::InvalidFields);
        }
        self.status = FormStatus::Submitting;
        Ok(self.values.clone())
    }

    pub fn finish_submit(&mut self, outcome: Result<Message, String>) {
        self.status = match outcome {
            Ok(message) => {
                info!(message_id = message.id, "Message sent");
                FormStatus::Success(message)
            }
            Err(text) if text.trim().is_empty() => {
                FormStatus::Error(GENERIC_SUBMIT_ERROR.to_string())
            }
            Err(text) => {
                warn!(error = %text, "Message submission failed");
                FormStatus::Error(text)
            }
        };
    }

    /// Validates, sends through `sender`, and records the outcome.
    pub async fn submit<S>(&mut self, sender: &S) -> Result<&FormStatus, SubmitBlocked>
    where
        S: MessageSender + ?Sized,
    {
        let payload = self.begin_submit()?;
        let outcome = sender
            .send_message(&payload)
            .await
            .map_err(|err| err.to_string());
        self.finish_submit(outcome);
        Ok(&self.status)
    }

    /// After a successful submission, waits `delay` and clears the form.
    pub async fn reset_after(&mut self, delay: Duration) {
        if !matches!(self.status, FormStatus::Success(_)) {
            return;
        }
        tokio::time::sleep(delay).await;
        self.reset();
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Drops any success or error state and returns to `Idle` without
    /// submitting. Entered values are kept.
    pub fn cancel(&mut self) {
        self.errors = Default::default();
        self.status = FormStatus::Idle;
    }
}
