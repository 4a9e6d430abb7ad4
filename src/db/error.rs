#[derive(thiserror::Error, Debug)]
pub enum DatabaseError {
    #[error("Database error")]
    DatabaseError(sqlx::Error),
    #[error("Record not found")]
    NotFound,
    #[error("Record already exists")]
    Conflict,
}

impl From<sqlx::Error> for DatabaseError {
    fn from(error: sqlx::Error) -> Self {
        match error.as_database_error() {
            Some(e) if e.is_unique_violation() => DatabaseError::Conflict,
            Some(e) if e.is_foreign_key_violation() => DatabaseError::NotFound,
            _ => DatabaseError::DatabaseError(error),
        }
    }
}
