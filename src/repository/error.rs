// ==========================================
// HTU Schedule - repository error type
// ==========================================
// Derived with thiserror; rusqlite failures are classified
// into constraint / not-found / query errors
// ==========================================

use thiserror::Error;

/// Repository layer error
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== database =====
    #[error("record not found: {entity} with id={id}")]
    NotFound { entity: String, id: String },

    #[error("database connection failed: {0}")]
    DatabaseConnectionError(String),

    #[error("database lock poisoned: {0}")]
    LockError(String),

    #[error("database transaction failed: {0}")]
    DatabaseTransactionError(String),

    #[error("database query failed: {0}")]
    DatabaseQueryError(String),

    #[error("unique constraint violated: {0}")]
    UniqueConstraintViolation(String),

    #[error("foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),

    #[error("check constraint violated: {0}")]
    CheckConstraintViolation(String),

    // ===== data quality =====
    #[error("validation failed: {0}")]
    ValidationError(String),

    #[error("invalid value (field={field}): {message}")]
    FieldValueError { field: String, message: String },

    // ===== general =====
    #[error("internal error: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(_, Some(msg)) => {
                if msg.contains("UNIQUE") {
                    RepositoryError::UniqueConstraintViolation(msg)
                } else if msg.contains("FOREIGN KEY") {
                    RepositoryError::ForeignKeyViolation(msg)
                } else if msg.contains("CHECK") {
                    RepositoryError::CheckConstraintViolation(msg)
                } else {
                    RepositoryError::DatabaseQueryError(msg)
                }
            }
            rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound {
                entity: "Unknown".to_string(),
                id: "Unknown".to_string(),
            },
            _ => RepositoryError::DatabaseQueryError(err.to_string()),
        }
    }
}

/// Result alias
pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_constraint_classification() {
        let conn = Connection::open_in_memory().unwrap();
        crate::db::configure_sqlite_connection(&conn).unwrap();
        crate::db::init_schema(&conn).unwrap();

        conn.execute(
            "INSERT INTO departments (id, name_en, name_ar) VALUES ('D1', 'CS', 'CS')",
            [],
        )
        .unwrap();
        let dup = conn
            .execute(
                "INSERT INTO departments (id, name_en, name_ar) VALUES ('D1', 'CS', 'CS')",
                [],
            )
            .unwrap_err();
        assert!(matches!(
            RepositoryError::from(dup),
            RepositoryError::UniqueConstraintViolation(_)
        ));

        let fk = conn
            .execute(
                "INSERT INTO courses (id, dept_id, name_en, name_ar) VALUES ('C1', 'nope', 'x', 'x')",
                [],
            )
            .unwrap_err();
        assert!(matches!(
            RepositoryError::from(fk),
            RepositoryError::ForeignKeyViolation(_)
        ));

        let none = conn
            .query_row("SELECT id FROM departments WHERE id = 'zz'", [], |r| {
                r.get::<_, String>(0)
            })
            .unwrap_err();
        assert!(matches!(
            RepositoryError::from(none),
            RepositoryError::NotFound { .. }
        ));
    }
}
