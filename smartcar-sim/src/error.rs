use std::{fmt, io};

#[derive(Debug)]
pub enum SimError{
    Io(io::Error),
    Encoding(bincode::Error),
    /// A recording ended in the middle of a frame
    Truncated{ offset: usize },
    /// The recorder task panicked or was cancelled
    RecorderLost,
}

impl fmt::Display for SimError{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self{
            SimError::Io(e) => write!(f, "io error: {}", e),
            SimError::Encoding(e) => write!(f, "could not encode or decode a cycle record: {}", e),
            SimError::Truncated{ offset } => write!(f, "recording truncated at byte {}", offset),
            SimError::RecorderLost => f.write_str("recorder task stopped before the run finished"),
        }
    }
}

impl std::error::Error for SimError{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self{
            SimError::Io(e) => Some(e),
            SimError::Encoding(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for SimError{
    fn from(e: io::Error) -> Self {
        SimError::Io(e)
    }
}

impl From<bincode::Error> for SimError{
    fn from(e: bincode::Error) -> Self {
        SimError::Encoding(e)
    }
}

impl From<tokio::task::JoinError> for SimError{
    fn from(_: tokio::task::JoinError) -> Self {
        SimError::RecorderLost
    }
}
