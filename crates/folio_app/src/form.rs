//! Contact form
//!
//! Four required text fields and an asynchronous submit. Delivery goes
//! through a [`Submitter`]; the default [`SimulatedRelay`] only waits a
//! fixed delay, standing in for an email relay until one is configured.
//!
//! The form is a cheap clonable handle so a submit can run on a spawned
//! task while the UI keeps reading its state.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use folio_core::{FolioError, Result};
use tracing::{debug, warn};

use crate::config::ContactConfig;

/// Form fields, in display order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Subject, Field::Message];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Subject => "subject",
            Field::Message => "message",
        }
    }
}

/// The values being sent
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactMessage {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Subject => &mut self.subject,
            Field::Message => &mut self.message,
        }
    }

    /// Every field must be non-blank; reports the first one that is not
    pub fn validate(&self) -> Result<()> {
        match Field::ALL.into_iter().find(|f| self.get(*f).trim().is_empty()) {
            Some(field) => Err(FolioError::MissingField(field.as_str())),
            None => Ok(()),
        }
    }

    pub fn is_empty(&self) -> bool {
        Field::ALL.into_iter().all(|f| self.get(f).is_empty())
    }
}

/// Completion notice returned by a successful submit
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Acknowledgement {
    pub notice: String,
}

/// Delivers a contact message
pub trait Submitter: Send + Sync + 'static {
    fn send(&self, message: &ContactMessage) -> impl Future<Output = Result<()>> + Send;
}

/// Pretends to send: waits `delay`, then succeeds
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimulatedRelay {
    pub delay: Duration,
}

impl SimulatedRelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Submitter for SimulatedRelay {
    async fn send(&self, message: &ContactMessage) -> Result<()> {
        debug!(
            "SimulatedRelay: holding message from '{}' for {:?}",
            message.name, self.delay
        );
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}

#[derive(Debug, Default)]
struct FormState {
    fields: ContactMessage,
    submitting: bool,
}

/// Contact form handle
#[derive(Debug)]
pub struct ContactForm<S = SimulatedRelay> {
    state: Arc<Mutex<FormState>>,
    submitter: Arc<S>,
    notice: Arc<str>,
}

impl<S> Clone for ContactForm<S> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            submitter: Arc::clone(&self.submitter),
            notice: Arc::clone(&self.notice),
        }
    }
}

impl ContactForm<SimulatedRelay> {
    /// Form backed by the simulated relay
    pub fn from_config(config: &ContactConfig) -> Self {
        Self::new(
            SimulatedRelay::new(Duration::from_millis(config.submit_delay_ms)),
            &config.acknowledgement,
        )
    }
}

impl<S: Submitter> ContactForm<S> {
    pub fn new(submitter: S, notice: &str) -> Self {
        Self {
            state: Arc::new(Mutex::new(FormState::default())),
            submitter: Arc::new(submitter),
            notice: Arc::from(notice),
        }
    }

    fn state(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set(&self, field: Field, value: impl Into<String>) {
        *self.state().fields.get_mut(field) = value.into();
    }

    pub fn get(&self, field: Field) -> String {
        self.state().fields.get(field).to_string()
    }

    /// Copy of the current values
    pub fn values(&self) -> ContactMessage {
        self.state().fields.clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.state().submitting
    }

    /// Validate and send the current values
    ///
    /// On success every field is cleared and the completion notice is
    /// returned. A failed send keeps the values so the user can retry.
    pub async fn submit(&self) -> Result<Acknowledgement> {
        let message = {
            let mut state = self.state();
            if state.submitting {
                return Err(FolioError::AlreadySubmitting);
            }
            state.fields.validate()?;
            state.submitting = true;
            state.fields.clone()
        };

        let outcome = self.submitter.send(&message).await;

        let mut state = self.state();
        state.submitting = false;
        match outcome {
            Ok(()) => {
                state.fields = ContactMessage::default();
                debug!("ContactForm: message from '{}' sent", message.name);
                Ok(Acknowledgement {
                    notice: self.notice.to_string(),
                })
            }
            Err(err) => {
                warn!("ContactForm: submission failed: {}", err);
                Err(err)
            }
        }
    }
}
