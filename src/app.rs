//! Application state management for citywx
//!
//! This module contains the main application state: the search input with
//! its inline suggestion, keyboard handling, and the transitions between
//! idle, loading, report and error views.

use std::time::Duration;

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use reqwest::Client;
use tracing::warn;

use crate::cli::StartupConfig;
use crate::data::{GeocodingClient, WeatherClient};
use crate::lookup::{lookup_city, SearchError};
use crate::report::WeatherReport;
use crate::store::{HistoryStore, DEFAULT_CITY};
use crate::suggest::{ghost_remainder, suggest};

/// Application state enum representing the current view
#[derive(Debug, Clone, PartialEq)]
pub enum AppState {
    /// Nothing searched yet, or the last submission was blank
    Idle,
    /// Waiting for the lookup of the named city
    Loading(String),
    /// A completed search
    Report(Box<WeatherReport>),
    /// The last search failed; holds the message shown to the user
    Error(String),
}

/// Builds the shared HTTP client with a per-request timeout
pub fn build_http_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder().timeout(timeout).build()
}

/// Main application struct managing state and data
pub struct App {
    /// Current application state/view
    pub state: AppState,
    /// Text typed into the search bar
    pub input: String,
    /// Completion for the current input, if any
    pub suggestion: Option<&'static str>,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Flag indicating a search has been submitted
    pub search_requested: bool,
    /// Flag to show help overlay
    pub show_help: bool,
    geocoding_client: GeocodingClient,
    weather_client: WeatherClient,
    store: Option<HistoryStore>,
}

impl App {
    /// Creates an App from the startup configuration.
    ///
    /// The search bar starts with the city given on the command line, or the
    /// last searched city, or [`DEFAULT_CITY`], and that search is submitted
    /// right away.
    pub fn with_startup_config(
        config: &StartupConfig,
        store: Option<HistoryStore>,
    ) -> reqwest::Result<Self> {
        let client = build_http_client(config.timeout)?;
        let geocoding_client =
            GeocodingClient::with_client(client.clone()).with_base_url(&config.endpoints.geocoding);
        let weather_client = WeatherClient::with_client(client)
            .with_endpoints(&config.endpoints.forecast, &config.endpoints.archive);

        let initial_city = match &config.initial_city {
            Some(city) => city.clone(),
            None => store
                .as_ref()
                .map(HistoryStore::initial_city)
                .unwrap_or_else(|| DEFAULT_CITY.to_string()),
        };

        let mut app = Self::with_clients(geocoding_client, weather_client, store);
        app.input = initial_city;
        app.submit();
        Ok(app)
    }

    /// Creates an App with custom clients and an empty search bar
    pub fn with_clients(
        geocoding_client: GeocodingClient,
        weather_client: WeatherClient,
        store: Option<HistoryStore>,
    ) -> Self {
        Self {
            state: AppState::Idle,
            input: String::new(),
            suggestion: None,
            should_quit: false,
            search_requested: false,
            show_help: false,
            geocoding_client,
            weather_client,
            store,
        }
    }

    /// Handles keyboard input and updates state accordingly
    ///
    /// # Key Bindings
    /// - `Enter`: Search for the typed city
    /// - `Tab`: Accept the suggestion
    /// - `Backspace`: Delete the last character
    /// - `?`: Toggle help
    /// - `Esc`: Close help, or quit
    /// - `Ctrl-C`: Quit
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        if key_event.modifiers.contains(KeyModifiers::CONTROL)
            && key_event.code == KeyCode::Char('c')
        {
            self.should_quit = true;
            return;
        }

        // Help overlay intercepts all keys when shown
        if self.show_help {
            if matches!(key_event.code, KeyCode::Esc | KeyCode::Char('?')) {
                self.show_help = false;
            }
            return;
        }

        if matches!(self.state, AppState::Loading(_)) {
            if key_event.code == KeyCode::Esc {
                self.should_quit = true;
            }
            return;
        }

        match key_event.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Enter => self.submit(),
            KeyCode::Tab => self.accept_suggestion(),
            KeyCode::Backspace => {
                self.input.pop();
                self.update_suggestion();
            }
            KeyCode::Char(c) => {
                self.input.push(c);
                self.update_suggestion();
            }
            _ => {}
        }
    }

    /// Recomputes the suggestion for the current input
    fn update_suggestion(&mut self) {
        self.suggestion = suggest(&self.input);
    }

    /// Replaces the input with the suggestion, if there is one
    pub fn accept_suggestion(&mut self) {
        if let Some(city) = self.suggestion.take() {
            self.input = city.to_string();
        }
    }

    /// Greyed-out completion shown after the typed text
    pub fn ghost_text(&self) -> &str {
        match self.suggestion {
            Some(city) if !self.input.is_empty() => ghost_remainder(&self.input, city),
            _ => "",
        }
    }

    /// Submits the current input. Blank input is ignored.
    pub fn submit(&mut self) {
        if !self.input.trim().is_empty() {
            self.search_requested = true;
            self.suggestion = None;
        }
    }

    /// Takes a pending search, saving the city and entering the loading state
    ///
    /// Returns the city to look up, or `None` if no search is pending.
    pub fn take_search(&mut self) -> Option<String> {
        if !self.search_requested {
            return None;
        }
        self.search_requested = false;

        let city = self.input.trim().to_string();
        if city.is_empty() {
            return None;
        }

        if let Some(store) = &self.store {
            if let Err(e) = store.save_last_city(&city) {
                warn!(error = %e, "Failed to save last city");
            }
        }

        self.state = AppState::Loading(city.clone());
        Some(city)
    }

    /// Runs the lookup for `city` and moves to the report or error view
    pub async fn run_search(&mut self, city: &str, today: NaiveDate) {
        let result = lookup_city(&self.geocoding_client, &self.weather_client, city, today).await;
        self.apply_result(result);
    }

    fn apply_result(&mut self, result: Result<WeatherReport, SearchError>) {
        self.state = match result {
            Ok(report) => AppState::Report(Box::new(report)),
            Err(err) => match err.user_message() {
                Some(message) => AppState::Error(message.to_string()),
                None => AppState::Idle,
            },
        };
    }

    /// The report currently shown, if any
    pub fn report(&self) -> Option<&WeatherReport> {
        match &self.state {
            AppState::Report(report) => Some(&**report),
            _ => None,
        }
    }
}
