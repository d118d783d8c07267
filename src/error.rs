//! Error handling for shape sorting

use std::io;
use thiserror::Error;

/// Custom error type for shape sorting operations
#[derive(Error, Debug)]
pub enum ShapeSortError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Permission denied: {file}")]
    PermissionDenied { file: String },

    #[error("No such file or directory: {file}")]
    FileNotFound { file: String },

    #[error("{}Unknown shape kind: {kind}", line_prefix(.line))]
    UnknownShapeKind { kind: String, line: Option<usize> },

    #[error("{}Malformed number: {value}", line_prefix(.line))]
    MalformedNumber { value: String, line: Option<usize> },

    #[error("{}Malformed parameter: {message}", line_prefix(.line))]
    MalformedParameter { message: String, line: Option<usize> },

    #[error("{}Malformed record: {message}", line_prefix(.line))]
    MalformedRecord { message: String, line: Option<usize> },

    #[error("Invalid sort key: {value}")]
    InvalidSortKey { value: String },

    #[error("Invalid sort algorithm: {value}")]
    InvalidAlgorithm { value: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

fn line_prefix(line: &Option<usize>) -> String {
    match line {
        Some(line) => format!("line {line}: "),
        None => String::new(),
    }
}

impl ShapeSortError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            ShapeSortError::PermissionDenied { .. }
            | ShapeSortError::FileNotFound { .. }
            | ShapeSortError::Io(_) => crate::IO_FAILURE,

            _ => crate::EXIT_FAILURE,
        }
    }

    /// Attach a 1-based line number to a record error; other errors pass through
    pub fn at_line(mut self, line_no: usize) -> Self {
        match &mut self {
            ShapeSortError::UnknownShapeKind { line, .. }
            | ShapeSortError::MalformedNumber { line, .. }
            | ShapeSortError::MalformedParameter { line, .. }
            | ShapeSortError::MalformedRecord { line, .. } => *line = Some(line_no),
            _ => {}
        }
        self
    }

    /// Create a permission denied error
    pub fn permission_denied(file: &str) -> Self {
        ShapeSortError::PermissionDenied {
            file: file.to_string(),
        }
    }

    /// Create a file not found error
    pub fn file_not_found(file: &str) -> Self {
        ShapeSortError::FileNotFound {
            file: file.to_string(),
        }
    }

    /// Create an unknown shape kind error
    pub fn unknown_shape_kind(kind: &str) -> Self {
        ShapeSortError::UnknownShapeKind {
            kind: kind.to_string(),
            line: None,
        }
    }

    /// Create a malformed number error
    pub fn malformed_number(value: &str) -> Self {
        ShapeSortError::MalformedNumber {
            value: value.to_string(),
            line: None,
        }
    }

    /// Create a malformed parameter error
    pub fn malformed_parameter(message: &str) -> Self {
        ShapeSortError::MalformedParameter {
            message: message.to_string(),
            line: None,
        }
    }

    /// Create a malformed record error
    pub fn malformed_record(message: &str) -> Self {
        ShapeSortError::MalformedRecord {
            message: message.to_string(),
            line: None,
        }
    }

    /// Create an invalid sort key error
    pub fn invalid_sort_key(value: &str) -> Self {
        ShapeSortError::InvalidSortKey {
            value: value.to_string(),
        }
    }

    /// Create an invalid algorithm error
    pub fn invalid_algorithm(value: &str) -> Self {
        ShapeSortError::InvalidAlgorithm {
            value: value.to_string(),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(message: &str) -> Self {
        ShapeSortError::InvalidConfig {
            message: message.to_string(),
        }
    }
}

/// Result type for shape sorting operations
pub type ShapeResult<T> = Result<T, ShapeSortError>;

/// Context trait for turning I/O failures into file errors
pub trait ShapeContext<T> {
    fn with_context<F>(self, f: F) -> ShapeResult<T>
    where
        F: FnOnce() -> String;

    fn with_file_context(self, filename: &str) -> ShapeResult<T>;
}

impl<T> ShapeContext<T> for Result<T, io::Error> {
    fn with_context<F>(self, f: F) -> ShapeResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|io_err| {
            ShapeSortError::Io(io::Error::new(
                io_err.kind(),
                format!("{}: {}", f(), io_err),
            ))
        })
    }

    fn with_file_context(self, filename: &str) -> ShapeResult<T> {
        self.map_err(|io_err| io_to_file_error(io_err, filename))
    }
}

fn io_to_file_error(io_err: io::Error, filename: &str) -> ShapeSortError {
    match io_err.kind() {
        io::ErrorKind::PermissionDenied => ShapeSortError::permission_denied(filename),
        io::ErrorKind::NotFound => ShapeSortError::file_not_found(filename),
        _ => ShapeSortError::Io(io::Error::new(
            io_err.kind(),
            format!("{}: {}", filename, io_err),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(ShapeSortError::file_not_found("x").exit_code(), crate::IO_FAILURE);
        assert_eq!(
            ShapeSortError::unknown_shape_kind("Sphere").exit_code(),
            crate::EXIT_FAILURE
        );
    }

    #[test]
    fn test_line_number_in_message() {
        let err = ShapeSortError::unknown_shape_kind("Sphere").at_line(7);
        assert_eq!(err.to_string(), "line 7: Unknown shape kind: Sphere");

        let err = ShapeSortError::malformed_number("abc");
        assert_eq!(err.to_string(), "Malformed number: abc");
    }

    #[test]
    fn test_at_line_ignores_non_record_errors() {
        let err = ShapeSortError::invalid_sort_key("x").at_line(3);
        assert!(matches!(err, ShapeSortError::InvalidSortKey { .. }));
        assert_eq!(err.to_string(), "Invalid sort key: x");
    }

    #[test]
    fn test_file_context_maps_not_found() {
        let result: Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::NotFound, "gone"));
        match result.with_file_context("shapes.txt") {
            Err(ShapeSortError::FileNotFound { file }) => assert_eq!(file, "shapes.txt"),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
