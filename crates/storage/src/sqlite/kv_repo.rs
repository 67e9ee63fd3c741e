use chrono::Utc;
use sqlx::{Row, SqliteConnection};

use super::SqliteRepository;
use crate::repository::StorageError;

fn conn_err(e: sqlx::Error) -> StorageError {
    StorageError::Connection(e.to_string())
}

pub(super) async fn read_value(
    conn: &mut SqliteConnection,
    key: &str,
) -> Result<Option<String>, sqlx::Error> {
    let row = sqlx::query("SELECT value FROM kv_store WHERE key = ?1")
        .bind(key)
        .fetch_optional(&mut *conn)
        .await?;
    row.map(|row| row.try_get::<String, _>("value")).transpose()
}

pub(super) async fn write_value(
    conn: &mut SqliteConnection,
    key: &str,
    value: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r"
        INSERT INTO kv_store (key, value, updated_at)
        VALUES (?1, ?2, ?3)
        ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            updated_at = excluded.updated_at
        ",
    )
    .bind(key)
    .bind(value)
    .bind(Utc::now())
    .execute(&mut *conn)
    .await?;
    Ok(())
}

pub(super) async fn delete_value(conn: &mut SqliteConnection, key: &str) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM kv_store WHERE key = ?1")
        .bind(key)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

impl SqliteRepository {
    /// Fetch a raw stored value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the query fails.
    pub async fn get_value(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut conn = self.pool.acquire().await.map_err(conn_err)?;
        read_value(&mut conn, key).await.map_err(conn_err)
    }

    /// Store a raw value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the query fails.
    pub async fn put_value(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut conn = self.pool.acquire().await.map_err(conn_err)?;
        write_value(&mut conn, key, value).await.map_err(conn_err)
    }

    /// Remove a stored value. Missing keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the query fails.
    pub async fn remove_value(&self, key: &str) -> Result<(), StorageError> {
        let mut conn = self.pool.acquire().await.map_err(conn_err)?;
        delete_value(&mut conn, key).await.map_err(conn_err)
    }
}
