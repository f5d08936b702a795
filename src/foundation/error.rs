/// Crate-wide result alias.
pub type KinetypeResult<T> = Result<T, KinetypeError>;

/// Error taxonomy for rendering and animation baking.
///
/// Only initialization failures and unrecoverable backend errors propagate to
/// callers; malformed style input degrades to safe defaults at the point of
/// use instead of surfacing here.
#[derive(thiserror::Error, Debug)]
pub enum KinetypeError {
    /// Backend or font system was not ready when a render was requested.
    #[error("initialization error: {0}")]
    Initialization(String),

    /// Invalid configuration or arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// Rasterization or pixel readback failure.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped foreign error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl KinetypeError {
    /// Build an initialization error from a message.
    pub fn initialization(msg: impl Into<String>) -> Self {
        Self::Initialization(msg.into())
    }

    /// Build a validation error from a message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a render error from a message.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}
