use std::fmt::Display;

#[derive(Debug)]
pub enum Error {
    OutOfSpace,
    NotFound,
    AlreadyExists,
    IsADirectory,
    NotADirectory,
    StoreBusy,
    MalformedStore(String),
    InvariantViolation(String),
    Io(std::io::Error),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfSpace => write!(f, "no free blocks left"),
            Self::NotFound => write!(f, "no such file or directory"),
            Self::AlreadyExists => write!(f, "file already exists"),
            Self::IsADirectory => write!(f, "is a directory"),
            Self::NotADirectory => write!(f, "not a directory"),
            Self::StoreBusy => write!(f, "backing store is already mounted"),
            Self::MalformedStore(e) => write!(f, "malformed backing store: {e}"),
            Self::InvariantViolation(e) => write!(f, "invariant violation: {e}"),
            Self::Io(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(value: std::str::Utf8Error) -> Self {
        Self::MalformedStore(value.to_string())
    }
}
