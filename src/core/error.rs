use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};

/// Application-wide Result type
pub type Result<T> = std::result::Result<T, AppError>;

/// SQLite primary result codes that signal lock contention
const SQLITE_BUSY: i32 = 5;
const SQLITE_LOCKED: i32 = 6;

/// Main application error type
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Validation errors for business rules
    #[error("Validation error: {0}")]
    Validation(String),

    /// Database operation errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Receipt printer errors
    #[error("Printer error: {0}")]
    Printer(#[from] PrintError),

    /// PDF export errors
    #[error("Export error: {0}")]
    Export(String),

    /// HTML template rendering errors
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    /// File system errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal server errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Failures while driving a receipt printer
#[derive(thiserror::Error, Debug)]
pub enum PrintError {
    /// The device could not be opened or initialized
    #[error("printer device {device} unavailable: {source}")]
    DeviceUnavailable {
        device: String,
        #[source]
        source: std::io::Error,
    },

    /// Writing stopped part way through; `lines_written` lines reached the device
    #[error("write failed after {lines_written} of {total_lines} lines: {source}")]
    Write {
        lines_written: usize,
        total_lines: usize,
        #[source]
        source: std::io::Error,
    },

    /// All lines were written but the feed/cut command failed
    #[error("paper cut failed: {0}")]
    Cut(#[source] std::io::Error),
}

impl PrintError {
    /// Whether the receipt reached the device only partially
    pub fn is_partial(&self) -> bool {
        match self {
            PrintError::DeviceUnavailable { .. } => false,
            PrintError::Write { lines_written, .. } => *lines_written > 0,
            PrintError::Cut(_) => true,
        }
    }

    /// Transient device faults worth retrying (busy/interrupted/timed out)
    pub fn is_retryable(&self) -> bool {
        let source = match self {
            PrintError::DeviceUnavailable { source, .. } => source,
            PrintError::Write { source, .. } => source,
            PrintError::Cut(source) => source,
        };
        is_transient_io(source)
    }
}

fn is_transient_io(err: &std::io::Error) -> bool {
    use std::io::ErrorKind;
    matches!(
        err.kind(),
        ErrorKind::Interrupted | ErrorKind::TimedOut | ErrorKind::WouldBlock | ErrorKind::ResourceBusy
    )
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        let error_message = self.to_string();

        HttpResponse::build(status_code).json(serde_json::json!({
            "error": {
                "message": error_message,
                "code": status_code.as_u16(),
            }
        }))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) if self.is_retryable() => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Printer(_) => StatusCode::BAD_GATEWAY,
            AppError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Helper functions for common error scenarios
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        AppError::NotFound(resource.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        AppError::Configuration(msg.into())
    }

    pub fn export(msg: impl Into<String>) -> Self {
        AppError::Export(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    /// Transient faults (lock contention, pool exhaustion, interrupted I/O)
    /// as opposed to permanent ones such as an unknown company or bad input.
    pub fn is_retryable(&self) -> bool {
        match self {
            AppError::Database(err) => match err {
                sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) => true,
                sqlx::Error::Database(db_err) => db_err
                    .code()
                    .and_then(|code| code.parse::<i32>().ok())
                    // extended codes carry the primary code in the low byte
                    .map(|code| matches!(code & 0xff, SQLITE_BUSY | SQLITE_LOCKED))
                    .unwrap_or(false),
                _ => false,
            },
            AppError::Printer(err) => err.is_retryable(),
            AppError::Io(err) => is_transient_io(err),
            _ => false,
        }
    }
}
