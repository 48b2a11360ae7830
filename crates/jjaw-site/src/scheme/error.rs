//! Errors raised by the color-scheme provider.

/// Misuse of the dark-mode provider.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemeError {
    /// A consumer looked the value up before any provider was installed.
    #[error("use_dark_mode() is called without provider.")]
    MissingProvider,
    /// A provider is already installed in this context.
    #[error("dark mode provider is already installed in this context")]
    AlreadyInstalled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_provider_display() {
        let msg = SchemeError::MissingProvider.to_string();
        assert!(msg.contains("without provider"));
    }

    #[test]
    fn test_already_installed_display() {
        let msg = SchemeError::AlreadyInstalled.to_string();
        assert!(msg.contains("already installed"));
    }
}
