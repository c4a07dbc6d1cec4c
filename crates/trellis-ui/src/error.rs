/// Errors surfaced at the platform boundary and during one-time setup.
///
/// Everything else in the toolkit is infallible: tree mutation on unknown
/// widgets is a no-op and layout always produces some geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiError {
    /// The platform could not connect to its display server.
    DisplayUnavailable(String),

    /// The platform refused to create a native window.
    WindowCreation(String),

    /// `theme::init` was called after a theme was already installed.
    ThemeAlreadyInitialized,
}

impl std::fmt::Display for UiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UiError::DisplayUnavailable(msg) => write!(f, "Display unavailable: {}", msg),
            UiError::WindowCreation(msg) => write!(f, "Failed to create window: {}", msg),
            UiError::ThemeAlreadyInitialized => write!(f, "A theme has already been installed"),
        }
    }
}

impl std::error::Error for UiError {}

pub type UiResult<T> = Result<T, UiError>;
