//! Game collection synchronization
//!
//! Keeps a displayed collection consistent with server state using
//! pessimistic refresh: after a successful mutation the full collection is
//! re-fetched from the server rather than patched locally. On any failure the
//! collection is emptied, never left stale.

use ludex_http::types::{Game, GameDraft};

use crate::manager::SessionManager;

/// Status line surfaced to the user alongside the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

/// The user's game collection as a view should display it.
///
/// Display order is ascending by id, always.
pub struct GameShelf {
    session: SessionManager,
    games: Vec<Game>,
    status: Option<StatusMessage>,
}

impl GameShelf {
    /// An empty shelf bound to a session.
    pub fn new(session: SessionManager) -> Self {
        Self {
            session,
            games: Vec::new(),
            status: None,
        }
    }

    /// Games in display order.
    pub fn games(&self) -> &[Game] {
        &self.games
    }

    /// The current status message, if one is being shown.
    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// Dismiss the status message.
    pub fn dismiss_status(&mut self) {
        self.status = None;
    }

    /// Re-fetch the collection from the server.
    ///
    /// Skipped entirely when the session token is unusable.
    pub async fn sync(&mut self) {
        let Some(client) = self.session.authorized_client() else {
            tracing::debug!("skipping collection sync, no usable session");
            return;
        };

        self.status = None;
        match client.list_games().await {
            Ok(mut games) => {
                games.sort_by_key(|game| game.id);
                self.games = games;
            }
            Err(err) => {
                self.games.clear();
                self.set_error(format!("Error fetching games: {err}"));
            }
        }
    }

    /// Delete a game, then re-fetch the collection.
    pub async fn remove(&mut self, id: i64) {
        let Some(client) = self.session.authorized_client() else {
            tracing::debug!("skipping delete, no usable session");
            return;
        };

        match client.delete_game(id).await {
            Ok(()) => self.sync().await,
            Err(err) => {
                self.games.clear();
                self.set_error(format!("Error deleting game: {err}"));
            }
        }
    }

    /// Add a game, then re-fetch the collection.
    pub async fn add(&mut self, draft: GameDraft) {
        let Some(client) = self.session.authorized_client() else {
            tracing::debug!("skipping create, no usable session");
            return;
        };

        match client.create_game(&draft).await {
            Ok(_created) => self.sync().await,
            Err(err) => {
                self.games.clear();
                self.set_error(format!("Error adding game: {err}"));
            }
        }
    }

    fn set_error(&mut self, text: String) {
        tracing::warn!(%text, "collection out of sync with server");
        self.status = Some(StatusMessage {
            text,
            is_error: true,
        });
    }
}
