// sqlx::Error -> AppError conversion (shared by all stores)

use healthpet_core::error::AppError;

/// Convert a sqlx error into the application error type, surfacing the
/// SQLite result code where one is available.
pub(crate) fn map_sqlx_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) => {
            let message = db_err.message().to_string();
            match db_err.code().as_deref() {
                // UNIQUE constraint failed (2067/1555)
                Some("2067") | Some("1555") => {
                    AppError::Conflict(format!("Unique constraint violation: {}", message))
                }
                // FOREIGN KEY constraint failed (787/3850)
                Some("787") | Some("3850") => {
                    AppError::Database(format!("Foreign key constraint violation: {}", message))
                }
                // SQLITE_BUSY
                Some("5") => AppError::Database(format!("Database locked (SQLITE_BUSY): {}", message)),
                Some(code) => AppError::Database(format!("Database error [{}]: {}", code, message)),
                None => AppError::Database(format!("Database error: {}", message)),
            }
        }
        sqlx::Error::RowNotFound => AppError::Database("Row not found".to_string()),
        sqlx::Error::ColumnNotFound(col) => {
            AppError::Database(format!("Column not found: {}", col))
        }
        _ => AppError::Database(err.to_string()),
    }
}
