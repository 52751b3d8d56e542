//! Client operations as seen by the HTTP layer.
//!
//! Delegates to [`ClientRepository`]; the only work done here is turning
//! request payloads into the field mappings the repository consumes.

use sqlx::SqliteConnection;

use crate::db::ClientRepository;
use crate::models::{Client, ClientPatch, NewClient};

#[derive(Debug, Clone, Copy, Default)]
pub struct ClientService {
    repo: ClientRepository,
}

impl ClientService {
    pub async fn get_all(&self, conn: &mut SqliteConnection) -> Result<Vec<Client>, sqlx::Error> {
        self.repo.list_all(conn).await
    }

    pub async fn get_by_id(
        &self,
        conn: &mut SqliteConnection,
        id: i64,
    ) -> Result<Option<Client>, sqlx::Error> {
        self.repo.get_by_id(conn, id).await
    }

    pub async fn create(
        &self,
        conn: &mut SqliteConnection,
        payload: NewClient,
    ) -> Result<Client, sqlx::Error> {
        self.repo.insert(conn, &payload).await
    }

    /// Apply the keys present in `payload`; the row must exist
    pub async fn patch(
        &self,
        conn: &mut SqliteConnection,
        id: i64,
        payload: ClientPatch,
    ) -> Result<Client, sqlx::Error> {
        let changes = payload.into_changes();
        tracing::debug!(codcli = id, fields = changes.len(), "patching client");
        self.repo.update_partial(conn, id, changes).await
    }

    /// Remove the row; the row must exist
    pub async fn delete(&self, conn: &mut SqliteConnection, id: i64) -> Result<Client, sqlx::Error> {
        self.repo.delete(conn, id).await
    }
}
