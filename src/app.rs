//! Application state and core logic

use crate::config::ServiceConfig;
use crate::form::{Field, FormController, LookupRequest, Notification, SubmitAttempt};
use crate::services::{
    self, Address, CepClient, LookupError, PostalLookup, RegistrationClient, RegistrationService,
    SubmissionError, SubmitOutcome,
};
use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Completion of network work started by the app
#[derive(Debug)]
pub enum AppEvent {
    LookupFinished {
        request: LookupRequest,
        result: Result<Address, LookupError>,
    },
    SubmitFinished(Result<SubmitOutcome, SubmissionError>),
}

/// Main application struct
pub struct App {
    /// Form values, errors and submission state
    pub controller: FormController,
    /// Field that currently has focus
    pub focused: Field,
    /// Whether password fields are shown in clear text
    pub show_password: bool,
    /// Last notification raised by a submission
    pub status_message: Option<Notification>,
    lookup: Arc<dyn PostalLookup>,
    registration: Arc<dyn RegistrationService>,
    events_tx: UnboundedSender<AppEvent>,
    events_rx: UnboundedReceiver<AppEvent>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App wired to the HTTP services
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let http = services::http_client(config.timeout_secs)
            .context("Failed to build HTTP client")?;
        let lookup = CepClient::new(http.clone(), config.lookup_base_url.clone());
        let registration = RegistrationClient::new(http, config.register_url.clone());
        Ok(Self::with_services(Arc::new(lookup), Arc::new(registration)))
    }

    /// Create an App around arbitrary service implementations
    pub fn with_services(
        lookup: Arc<dyn PostalLookup>,
        registration: Arc<dyn RegistrationService>,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            controller: FormController::new(),
            focused: Field::Name,
            show_password: false,
            status_message: None,
            lookup,
            registration,
            events_tx,
            events_rx,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => self.quit = true,
            KeyCode::Char('p') if ctrl => self.show_password = !self.show_password,
            KeyCode::Esc => self.quit = true,
            KeyCode::Tab | KeyCode::Down => self.move_focus(self.focused.next()),
            KeyCode::BackTab | KeyCode::Up => self.move_focus(self.focused.prev()),
            KeyCode::Enter => self.submit(),
            KeyCode::Char(' ') if self.focused.is_flag() => self.controller.toggle_terms(),
            KeyCode::Char(c) if !ctrl => self.controller.push_char(self.focused, c),
            KeyCode::Backspace => self.controller.pop_char(self.focused),
            _ => {}
        }
    }

    /// Move focus, blurring the field being left
    fn move_focus(&mut self, target: Field) {
        if let Some(request) = self.controller.blur(self.focused) {
            self.spawn_lookup(request);
        }
        self.focused = target;
    }

    fn spawn_lookup(&self, request: LookupRequest) {
        let lookup = Arc::clone(&self.lookup);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = lookup.lookup(&request.zipcode).await;
            // Receiver only goes away when the app is shutting down
            let _ = tx.send(AppEvent::LookupFinished { request, result });
        });
    }

    /// Validate and, when valid, start the registration request
    fn submit(&mut self) {
        match self.controller.begin_submit() {
            SubmitAttempt::Ready(form) => {
                self.status_message = None;
                let registration = Arc::clone(&self.registration);
                let tx = self.events_tx.clone();
                tokio::spawn(async move {
                    let result = registration.submit(&form).await;
                    let _ = tx.send(AppEvent::SubmitFinished(result));
                });
            }
            SubmitAttempt::Invalid => {
                if let Some((field, _)) = self.controller.errors().iter().next() {
                    self.focused = field;
                }
            }
            SubmitAttempt::AlreadySubmitting => {
                tracing::debug!("ignoring submit while a request is in flight");
            }
        }
    }

    /// Apply one completed network event
    pub fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::LookupFinished { request, result } => {
                self.controller.apply_lookup(&request, result);
            }
            AppEvent::SubmitFinished(result) => {
                self.controller.finish_submit(result);
                if let Some(last) = self.controller.take_notifications().pop() {
                    self.status_message = Some(last);
                }
            }
        }
    }

    /// Apply every event that has already completed, without waiting
    pub fn poll_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply_event(event);
        }
    }

    /// Wait for the next event and apply it
    #[cfg(test)]
    async fn next_event(&mut self) {
        if let Some(event) = self.events_rx.recv().await {
            self.apply_event(event);
        }
    }
}
