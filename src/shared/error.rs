use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// Scripts wrapping `conda-minify` can use these to tell bad invocations
/// apart from failures while reading the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// The spec was produced (and written, when requested)
    Success = 0,
    /// Environment lookup, metadata, policy or I/O failure
    ApplicationError = 1,
    /// Invalid command-line arguments (clap parsing errors, bad `how` values)
    InvalidArguments = 2,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Picks the exit code for an error bubbling out of `run`.
    pub fn for_error(error: &anyhow::Error) -> Self {
        match error.downcast_ref::<ReductionError>() {
            Some(ReductionError::InvalidArgument { .. }) => ExitCode::InvalidArguments,
            _ => ExitCode::ApplicationError,
        }
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::ApplicationError => write!(f, "Application Error (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
        }
    }
}

/// Errors raised by the graph and reduction core.
///
/// All of them are detected synchronously before any output is produced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReductionError {
    #[error("Invalid value '{value}' for {argument}. Allowed values: {allowed}")]
    InvalidArgument {
        argument: String,
        value: String,
        allowed: String,
    },

    #[error("The package \"{package}\" was referenced in both `pin` and `override`. Only one of these methods can be used per package.")]
    ConflictingPolicy { package: String },

    #[error("Adding an edge from \"{dependent}\" to \"{dependency}\" would create a cycle in the dependency graph")]
    Cycle {
        dependent: String,
        dependency: String,
    },
}

/// Application-specific errors raised at the environment boundary.
#[derive(Debug, Error)]
pub enum EnvError {
    #[error("Conda environment not found: {target}\n\n💡 Hint: Check `conda env list` for the available environments, or pass a path containing '/'")]
    EnvironmentNotFound { target: String },

    #[error("Failed to run conda: {command}\nDetails: {details}\n\n💡 Hint: Make sure conda is installed and on PATH, or set CONDA_EXE")]
    CondaCommandFailed { command: String, details: String },

    #[error("Invalid environment snapshot: {path}\nDetails: {details}\n\n💡 Hint: A snapshot is the JSON printed by `conda list --json`")]
    InvalidSnapshot { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },

    /// Validation error for builder patterns
    #[error("Validation error: {message}")]
    Validation { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::ApplicationError.as_i32(), 1);
        assert_eq!(ExitCode::InvalidArguments.as_i32(), 2);
    }

    #[test]
    fn test_exit_code_display() {
        assert_eq!(format!("{}", ExitCode::Success), "Success (0)");
        assert_eq!(
            format!("{}", ExitCode::ApplicationError),
            "Application Error (1)"
        );
        assert_eq!(
            format!("{}", ExitCode::InvalidArguments),
            "Invalid Arguments (2)"
        );
    }

    #[test]
    fn test_exit_code_for_invalid_argument() {
        let err: anyhow::Error = ReductionError::InvalidArgument {
            argument: "how".to_string(),
            value: "loose".to_string(),
            allowed: "full, major, minor, none".to_string(),
        }
        .into();
        assert_eq!(ExitCode::for_error(&err), ExitCode::InvalidArguments);
    }

    #[test]
    fn test_exit_code_for_other_errors() {
        let err: anyhow::Error = ReductionError::ConflictingPolicy {
            package: "numpy".to_string(),
        }
        .into();
        assert_eq!(ExitCode::for_error(&err), ExitCode::ApplicationError);

        let err: anyhow::Error = EnvError::EnvironmentNotFound {
            target: "missing".to_string(),
        }
        .into();
        assert_eq!(ExitCode::for_error(&err), ExitCode::ApplicationError);
    }

    #[test]
    fn test_invalid_argument_display() {
        let error = ReductionError::InvalidArgument {
            argument: "how".to_string(),
            value: "patch".to_string(),
            allowed: "full, major, minor, none".to_string(),
        };
        let display = error.to_string();
        assert!(display.contains("'patch'"));
        assert!(display.contains("how"));
        assert!(display.contains("full, major, minor, none"));
    }

    #[test]
    fn test_conflicting_policy_display() {
        let error = ReductionError::ConflictingPolicy {
            package: "numpy".to_string(),
        };
        let display = error.to_string();
        assert!(display.contains("\"numpy\""));
        assert!(display.contains("`pin`"));
        assert!(display.contains("`override`"));
    }

    #[test]
    fn test_cycle_display_names_both_endpoints() {
        let error = ReductionError::Cycle {
            dependent: "a".to_string(),
            dependency: "b".to_string(),
        };
        let display = error.to_string();
        assert!(display.contains("\"a\""));
        assert!(display.contains("\"b\""));
        assert!(display.contains("cycle"));
    }

    #[test]
    fn test_environment_not_found_display() {
        let error = EnvError::EnvironmentNotFound {
            target: "ghost-env".to_string(),
        };
        let display = error.to_string();
        assert!(display.contains("Conda environment not found"));
        assert!(display.contains("ghost-env"));
        assert!(display.contains("💡 Hint:"));
    }

    #[test]
    fn test_file_write_error_display() {
        let error = EnvError::FileWriteError {
            path: PathBuf::from("/test/environment.yml"),
            details: "Permission denied".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Failed to write to file"));
        assert!(display.contains("/test/environment.yml"));
        assert!(display.contains("Permission denied"));
    }

    #[test]
    fn test_security_error_display() {
        let error = EnvError::SecurityError {
            path: PathBuf::from("/test/symlink"),
            reason: "Symbolic links are not allowed".to_string(),
            hint: "Use a regular file instead".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Security violation"));
        assert!(display.contains("/test/symlink"));
        assert!(display.contains("Use a regular file instead"));
    }
}
