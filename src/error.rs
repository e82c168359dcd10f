use crate::fit::FitError;
use crate::plot::PlotError;

/// Top-level error: a message plus the process exit code it maps to.
///
/// Exit codes:
/// - `2`: I/O or configuration problems (files, directories, export)
/// - `3`: degenerate input (fit is mathematically undetermined)
/// - `4`: numerical failure (solver did not converge, non-finite values)
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    /// Prefix the message with context (e.g. which experiment failed).
    pub fn context(self, what: impl std::fmt::Display) -> Self {
        Self {
            exit_code: self.exit_code,
            message: format!("{what}: {}", self.message),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<FitError> for AppError {
    fn from(err: FitError) -> Self {
        let exit_code = match err {
            FitError::DegenerateInput(_) => 3,
            FitError::Convergence { .. } | FitError::NonFinite(_) => 4,
        };
        AppError::new(exit_code, err.to_string())
    }
}

impl From<PlotError> for AppError {
    fn from(err: PlotError) -> Self {
        AppError::new(2, err.to_string())
    }
}
