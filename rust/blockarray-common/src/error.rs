use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidArgument {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn invalid_operation(name: impl Into<String>) -> Error {
        Error(ErrorKind::InvalidOperation { name: name.into() }.into())
    }

    pub fn allocation_failed(size: usize, alignment: usize) -> Error {
        Error(ErrorKind::AllocationFailed { size, alignment }.into())
    }

    pub fn capacity_overflow() -> Error {
        Error(ErrorKind::CapacityOverflow.into())
    }

    pub fn out_of_bounds(index: isize, len: usize) -> Error {
        Error(ErrorKind::OutOfBounds { index, len }.into())
    }

    pub fn empty(operation: &'static str) -> Error {
        Error(ErrorKind::Empty { operation }.into())
    }

    /// Returns `true` if the error was raised by an allocator that could not
    /// satisfy a request.
    pub fn is_allocation_failure(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::AllocationFailed { .. } | ErrorKind::CapacityOverflow
        )
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    #[error("invalid operation {name}")]
    InvalidOperation { name: String },

    #[error("failed to allocate {size} bytes with alignment {alignment}")]
    AllocationFailed { size: usize, alignment: usize },

    #[error("requested capacity exceeds the addressable range")]
    CapacityOverflow,

    #[error("index {index} is out of bounds for length {len}")]
    OutOfBounds { index: isize, len: usize },

    #[error("{operation} called on an empty container")]
    Empty { operation: &'static str },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}

impl From<std::alloc::LayoutError> for Error {
    fn from(_: std::alloc::LayoutError) -> Self {
        Error::capacity_overflow()
    }
}

impl From<std::convert::Infallible> for Error {
    fn from(_: std::convert::Infallible) -> Self {
        Error::invalid_operation("conversion")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = Error::out_of_bounds(-6, 5);
        assert_eq!(e.to_string(), "index -6 is out of bounds for length 5");

        let e = Error::empty("pop_back");
        assert_eq!(e.to_string(), "pop_back called on an empty container");

        let e = Error::allocation_failed(64, 8);
        assert_eq!(e.to_string(), "failed to allocate 64 bytes with alignment 8");
    }

    #[test]
    fn test_error_kind_roundtrip() {
        let e: Error = ErrorKind::CapacityOverflow.into();
        assert!(matches!(e.kind(), ErrorKind::CapacityOverflow));
        assert!(e.is_allocation_failure());
        assert!(matches!(e.into_kind(), ErrorKind::CapacityOverflow));
    }

    #[test]
    fn test_layout_error_is_overflow() {
        let err = std::alloc::Layout::from_size_align(8, 3).unwrap_err();
        let e: Error = err.into();
        assert!(matches!(e.kind(), ErrorKind::CapacityOverflow));
    }

    #[test]
    fn test_invalid_arg_is_not_allocation_failure() {
        let e = Error::invalid_arg("alignment", "must be a power of two");
        assert!(!e.is_allocation_failure());
        assert_eq!(
            e.to_string(),
            "invalid argument alignment: must be a power of two"
        );
    }
}
