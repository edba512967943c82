//! Application state management for the feedscope dashboard
//!
//! This module contains the main application state, handling keyboard input,
//! data loading, and transitions between the feed, top users, and trending
//! views.

use std::sync::Arc;

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent};

use crate::data::{FeedSnapshot, SocialClient};
use crate::refresh::RefreshMessage;

/// Application state enum representing the current view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// Initial loading state while fetching data
    Loading,
    /// Chronological feed of all posts
    Feed,
    /// Most active users leaderboard
    TopUsers,
    /// Posts with the most comments
    Trending,
}

impl AppState {
    /// Next view in Tab order; Loading is skipped once data has arrived
    fn next(self) -> Self {
        match self {
            AppState::Loading => AppState::Loading,
            AppState::Feed => AppState::TopUsers,
            AppState::TopUsers => AppState::Trending,
            AppState::Trending => AppState::Feed,
        }
    }
}

/// Main application struct managing state and data
pub struct App {
    /// Current application state/view
    pub state: AppState,
    /// Index of the currently selected row in the active view
    pub selected_index: usize,
    /// Latest snapshot of users, feed, top users, and trending posts
    pub snapshot: FeedSnapshot,
    /// Message from the last failed load, shown by the views
    pub load_error: Option<String>,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Timestamp of the last successful data refresh
    pub last_refresh: Option<DateTime<Local>>,
    /// Flag indicating a manual refresh has been requested
    pub refresh_requested: bool,
    /// Whether a background refresh cycle is currently in flight
    pub refreshing: bool,
    /// Flag to show the help overlay
    pub show_help: bool,
    /// Shared cached client for social media data
    client: Arc<SocialClient>,
}

impl App {
    /// Creates a new App instance in the loading state
    pub fn new(client: Arc<SocialClient>) -> Self {
        Self {
            state: AppState::Loading,
            selected_index: 0,
            snapshot: FeedSnapshot::default(),
            load_error: None,
            should_quit: false,
            last_refresh: None,
            refresh_requested: false,
            refreshing: false,
            show_help: false,
            client,
        }
    }

    /// Returns a shared handle to the client, for the background refresh task
    pub fn client(&self) -> Arc<SocialClient> {
        self.client.clone()
    }

    /// Loads a full snapshot and leaves the loading state
    ///
    /// On failure the previous snapshot (possibly empty) is kept and the
    /// error is surfaced for the views to render.
    pub async fn load_all_data(&mut self) {
        match self.client.snapshot().await {
            Ok(snapshot) => {
                self.install_snapshot(snapshot);
            }
            Err(err) => {
                self.load_error = Some(err.to_string());
            }
        }

        if self.state == AppState::Loading {
            self.state = AppState::Feed;
        }
    }

    /// Replaces the current snapshot and clamps the selection to it
    fn install_snapshot(&mut self, snapshot: FeedSnapshot) {
        self.snapshot = snapshot;
        self.load_error = None;
        self.last_refresh = Some(Local::now());
        self.clamp_selection();
    }

    /// Applies a message from the background refresh task
    pub fn apply_refresh_message(&mut self, message: RefreshMessage) {
        match message {
            RefreshMessage::RefreshStarted => {
                self.refreshing = true;
            }
            RefreshMessage::SnapshotUpdated(snapshot) => {
                self.install_snapshot(snapshot);
                if self.state == AppState::Loading {
                    self.state = AppState::Feed;
                }
            }
            RefreshMessage::RefreshError(err) => {
                self.load_error = Some(err);
            }
            RefreshMessage::RefreshCompleted => {
                self.refreshing = false;
            }
        }
    }

    /// Number of rows in the currently active view
    pub fn current_list_len(&self) -> usize {
        match self.state {
            AppState::Loading => 0,
            AppState::Feed => self.snapshot.feed.len(),
            AppState::TopUsers => self.snapshot.top_users.len(),
            AppState::Trending => self.snapshot.trending.len(),
        }
    }

    /// Keeps the selection inside the active list
    fn clamp_selection(&mut self) {
        let len = self.current_list_len();
        if len == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= len {
            self.selected_index = len - 1;
        }
    }

    /// Switches to a view, resetting the selection
    fn switch_to(&mut self, state: AppState) {
        if self.state != state {
            self.state = state;
            self.selected_index = 0;
        }
    }

    /// Handles a keyboard event
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Any key dismisses the help overlay first
        if self.show_help {
            self.show_help = false;
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('?') => {
                self.show_help = true;
            }
            KeyCode::Char('r') => {
                self.refresh_requested = true;
            }
            KeyCode::Char('1') => self.switch_to(AppState::Feed),
            KeyCode::Char('2') => self.switch_to(AppState::TopUsers),
            KeyCode::Char('3') => self.switch_to(AppState::Trending),
            KeyCode::Tab => {
                let next = self.state.next();
                self.switch_to(next);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let len = self.current_list_len();
                if len > 0 && self.selected_index + 1 < len {
                    self.selected_index += 1;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_index = self.selected_index.saturating_sub(1);
            }
            _ => {}
        }
    }
}
