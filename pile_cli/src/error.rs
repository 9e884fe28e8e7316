use pile_core::CalcError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CalcError),

    #[error("Refusing to overwrite '{path}' (use --force)", path = path.display())]
    Exists { path: PathBuf },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

impl CliError {
    /// Process exit code: 2 for bad project data, 1 for everything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Core(
                CalcError::InvalidProfile { .. }
                | CalcError::InvalidConfiguration { .. }
                | CalcError::InvalidInput { .. },
            ) => 2,
            _ => 1,
        }
    }

    /// Whether running the same command again later may succeed.
    pub fn is_recoverable(&self) -> bool {
        match self {
            CliError::Core(e) => e.is_recoverable(),
            _ => false,
        }
    }

    /// Extra line printed under the error message.
    pub fn hint(&self) -> Option<&'static str> {
        if self.is_recoverable() {
            Some("The project is locked by another session; try again once it is closed.")
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let bad_profile =
            CliError::from(CalcError::invalid_profile("increment_ft", "0", "Must be positive"));
        assert_eq!(bad_profile.exit_code(), 2);

        let locked = CliError::from(CalcError::file_locked("a.pcp", "someone", "now"));
        assert_eq!(locked.exit_code(), 1);

        let exists = CliError::Exists {
            path: PathBuf::from("a.pcp"),
        };
        assert_eq!(exists.exit_code(), 1);
        assert!(exists.to_string().contains("--force"));
    }

    #[test]
    fn test_locked_project_is_recoverable() {
        let locked = CliError::from(CalcError::file_locked("a.pcp", "someone", "now"));
        assert!(locked.is_recoverable());
        assert!(locked.hint().is_some_and(|h| h.contains("try again")));

        let bad_input = CliError::from(CalcError::invalid_input("widths", "[]", "empty"));
        assert!(!bad_input.is_recoverable());
        assert!(bad_input.hint().is_none());

        let exists = CliError::Exists {
            path: PathBuf::from("a.pcp"),
        };
        assert!(!exists.is_recoverable());
    }
}
