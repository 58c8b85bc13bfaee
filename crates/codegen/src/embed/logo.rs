//! Logo loading fallback
//!
//! A failing custom logo is swapped for the default logo once. If that
//! fails too, the logo container is hidden. There is never a third load.

/// What the page should do after a logo load error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoAction {
    /// Point the image at this URL
    Load(String),
    /// Hide the logo container
    Hide,
    /// Already hidden; do nothing
    Ignore,
}

/// Where the logo is in its fallback sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoState {
    /// Showing the host's logo
    Custom { url: String, fallback: String },
    /// Showing the default logo
    Fallback { url: String },
    /// Container hidden
    Hidden,
}

impl LogoState {
    /// Initial state for the effective logo URL
    pub fn new(url: impl Into<String>, default_url: impl Into<String>) -> Self {
        let url = url.into();
        let default_url = default_url.into();
        if url == default_url {
            LogoState::Fallback { url }
        } else {
            LogoState::Custom {
                url,
                fallback: default_url,
            }
        }
    }

    /// URL currently loading, if any
    pub fn current_url(&self) -> Option<&str> {
        match self {
            LogoState::Custom { url, .. } | LogoState::Fallback { url } => Some(url),
            LogoState::Hidden => None,
        }
    }

    pub fn is_hidden(&self) -> bool {
        matches!(self, LogoState::Hidden)
    }

    /// Advance after the current URL failed to load
    pub fn on_error(&mut self) -> LogoAction {
        let next = match std::mem::replace(self, LogoState::Hidden) {
            LogoState::Custom { url, fallback } => {
                tracing::warn!(url = %url, fallback = %fallback, "Logo failed to load, using default");
                LogoState::Fallback { url: fallback }
            }
            LogoState::Fallback { url } => {
                tracing::warn!(url = %url, "Default logo failed to load, hiding logo");
                LogoState::Hidden
            }
            LogoState::Hidden => return LogoAction::Ignore,
        };
        *self = next;
        match self {
            LogoState::Fallback { url } => LogoAction::Load(url.clone()),
            _ => LogoAction::Hide,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT: &str = "https://cdn.example/logo.svg";

    #[test]
    fn test_two_strike_fallback() {
        let mut logo = LogoState::new("https://bad.example/x.png", DEFAULT);
        assert_eq!(logo.current_url(), Some("https://bad.example/x.png"));

        assert_eq!(logo.on_error(), LogoAction::Load(DEFAULT.to_string()));
        assert_eq!(logo.current_url(), Some(DEFAULT));

        assert_eq!(logo.on_error(), LogoAction::Hide);
        assert!(logo.is_hidden());

        assert_eq!(logo.on_error(), LogoAction::Ignore);
    }

    #[test]
    fn test_default_logo_fails_once() {
        let mut logo = LogoState::new(DEFAULT, DEFAULT);
        assert_eq!(logo.on_error(), LogoAction::Hide);
        assert_eq!(logo.on_error(), LogoAction::Ignore);
    }
}
