use thiserror::Error;

/// Unified error type for all order, recap, and report operations.
///
/// Every failure is terminal for the single user action that caused it; the
/// presentation layer turns these into user-visible messages and the process
/// keeps running.
#[derive(Debug, Error)]
pub enum Error {
    #[error("order for customer '{customer}' with PO number '{po}' already exists")]
    DuplicateOrder { customer: String, po: String },

    #[error("no order found for customer '{customer}' with PO number '{po}'")]
    OrderNotFound { customer: String, po: String },

    #[error("order '{customer}' / PO '{po}' has no shade named '{shade}'")]
    ShadeNotFound {
        customer: String,
        po: String,
        shade: String,
    },

    #[error("invalid order: {message}")]
    InvalidOrder { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF rendering error: {0}")]
    Pdf(String),
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
