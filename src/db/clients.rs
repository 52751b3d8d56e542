//! Statements against `t_client`.
//!
//! Every operation borrows one connection and runs autocommit statements.
//! `update_partial` and `delete` expect the row to exist; a missing row
//! surfaces as `sqlx::Error::RowNotFound`.

use sqlx::SqliteConnection;

use crate::models::{Client, ClientChange, NewClient};

const SELECT_CLIENT: &str = r#"
SELECT codcli, nom, prenom, genre, adresse, complement_adresse, tel, email, newsletter
FROM t_client
"#;

#[derive(Debug, Clone, Copy, Default)]
pub struct ClientRepository;

impl ClientRepository {
    pub async fn list_all(&self, conn: &mut SqliteConnection) -> Result<Vec<Client>, sqlx::Error> {
        sqlx::query_as::<_, Client>(SELECT_CLIENT)
            .fetch_all(conn)
            .await
    }

    pub async fn get_by_id(
        &self,
        conn: &mut SqliteConnection,
        id: i64,
    ) -> Result<Option<Client>, sqlx::Error> {
        let sql = format!("{SELECT_CLIENT} WHERE codcli = ?");
        sqlx::query_as::<_, Client>(&sql)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Insert a row and return it with its generated `codcli`
    pub async fn insert(
        &self,
        conn: &mut SqliteConnection,
        fields: &NewClient,
    ) -> Result<Client, sqlx::Error> {
        sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO t_client (nom, prenom, genre, adresse, complement_adresse, tel, email, newsletter)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING codcli, nom, prenom, genre, adresse, complement_adresse, tel, email, newsletter
            "#,
        )
        .bind(&fields.nom)
        .bind(&fields.prenom)
        .bind(&fields.genre)
        .bind(&fields.adresse)
        .bind(&fields.complement_adresse)
        .bind(&fields.tel)
        .bind(&fields.email)
        .bind(fields.newsletter)
        .fetch_one(conn)
        .await
    }

    /// Merge `changes` onto the stored row and write it back
    pub async fn update_partial(
        &self,
        conn: &mut SqliteConnection,
        id: i64,
        changes: Vec<ClientChange>,
    ) -> Result<Client, sqlx::Error> {
        let mut client = self
            .get_by_id(&mut *conn, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;

        if changes.is_empty() {
            return Ok(client);
        }

        for change in changes {
            client.apply(change);
        }

        sqlx::query(
            r#"
            UPDATE t_client
            SET nom = ?, prenom = ?, genre = ?, adresse = ?, complement_adresse = ?,
                tel = ?, email = ?, newsletter = ?
            WHERE codcli = ?
            "#,
        )
        .bind(&client.nom)
        .bind(&client.prenom)
        .bind(&client.genre)
        .bind(&client.adresse)
        .bind(&client.complement_adresse)
        .bind(&client.tel)
        .bind(&client.email)
        .bind(client.newsletter)
        .bind(client.codcli)
        .execute(conn)
        .await?;

        Ok(client)
    }

    /// Delete a row, returning its values as they were just before removal
    pub async fn delete(&self, conn: &mut SqliteConnection, id: i64) -> Result<Client, sqlx::Error> {
        let client = self
            .get_by_id(&mut *conn, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;

        sqlx::query("DELETE FROM t_client WHERE codcli = ?")
            .bind(id)
            .execute(conn)
            .await?;

        Ok(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    async fn setup() -> Database {
        let db = Database::in_memory().await.unwrap();
        db.create_schema().await.unwrap();
        db
    }

    #[tokio::test]
    async fn insert_assigns_distinct_ids() {
        let db = setup().await;
        let mut conn = db.acquire().await.unwrap();
        let repo = ClientRepository;

        let first = repo
            .insert(&mut conn, &NewClient::new("Dupont", "Jean", "123 Rue Exemple"))
            .await
            .unwrap();
        let second = repo
            .insert(&mut conn, &NewClient::new("Martin", "Paul", "456 Rue Exemple"))
            .await
            .unwrap();

        assert_ne!(first.codcli, second.codcli);
        assert_eq!(first.nom, "Dupont");
        assert_eq!(first.newsletter, Some(0));
        assert_eq!(first.genre, None);
    }

    #[tokio::test]
    async fn get_by_id_reports_absence_as_none() {
        let db = setup().await;
        let mut conn = db.acquire().await.unwrap();

        let found = ClientRepository.get_by_id(&mut conn, 42).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn list_all_returns_every_row() {
        let db = setup().await;
        let mut conn = db.acquire().await.unwrap();
        let repo = ClientRepository;

        assert!(repo.list_all(&mut conn).await.unwrap().is_empty());

        repo.insert(&mut conn, &NewClient::new("A", "B", "C")).await.unwrap();
        repo.insert(&mut conn, &NewClient::new("D", "E", "F")).await.unwrap();

        let first = repo.list_all(&mut conn).await.unwrap();
        let second = repo.list_all(&mut conn).await.unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn update_partial_keeps_untouched_columns() {
        let db = setup().await;
        let mut conn = db.acquire().await.unwrap();
        let repo = ClientRepository;

        let mut fields = NewClient::new("Martin", "Paul", "456 Rue Exemple");
        fields.email = Some("paul@example.com".into());
        let created = repo.insert(&mut conn, &fields).await.unwrap();

        let updated = repo
            .update_partial(
                &mut conn,
                created.codcli,
                vec![
                    ClientChange::Prenom("Pierre".into()),
                    ClientChange::Email(None),
                ],
            )
            .await
            .unwrap();

        assert_eq!(updated.prenom, "Pierre");
        assert_eq!(updated.email, None);
        assert_eq!(updated.nom, "Martin");
        assert_eq!(updated.adresse, "456 Rue Exemple");

        let reloaded = repo.get_by_id(&mut conn, created.codcli).await.unwrap();
        assert_eq!(reloaded, Some(updated));
    }

    #[tokio::test]
    async fn update_partial_with_no_changes_returns_row() {
        let db = setup().await;
        let mut conn = db.acquire().await.unwrap();
        let repo = ClientRepository;

        let created = repo.insert(&mut conn, &NewClient::new("A", "B", "C")).await.unwrap();
        let same = repo.update_partial(&mut conn, created.codcli, Vec::new()).await.unwrap();
        assert_eq!(same, created);
    }

    #[tokio::test]
    async fn delete_returns_snapshot_and_removes_row() {
        let db = setup().await;
        let mut conn = db.acquire().await.unwrap();
        let repo = ClientRepository;

        let created = repo
            .insert(&mut conn, &NewClient::new("Leroy", "Sophie", "789 Rue Exemple"))
            .await
            .unwrap();
        let deleted = repo.delete(&mut conn, created.codcli).await.unwrap();

        assert_eq!(deleted, created);
        assert!(repo.get_by_id(&mut conn, created.codcli).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_of_missing_row_is_a_storage_error() {
        let db = setup().await;
        let mut conn = db.acquire().await.unwrap();

        let err = ClientRepository.delete(&mut conn, 5).await.unwrap_err();
        assert!(matches!(err, sqlx::Error::RowNotFound));
    }
}
