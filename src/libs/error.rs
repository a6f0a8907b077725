use crate::libs::model::SelfAlignment;
use std::fmt;

#[derive(Debug)]
pub enum DumpError {
    /// A line or field does not have the expected shape
    MalformedDump {
        /// The read the offending line belongs to, if a marker was seen
        read_id: Option<u64>,
        /// The raw offending line
        line: String,
        message: String,
    },
    /// `be == bb`, the slope is undefined
    DegenerateAlignment { alignment: SelfAlignment },
    /// The path stream ended, or a new block started, before a kept block was complete
    UnterminatedBlock {
        read_id: u64,
        alignment: Option<SelfAlignment>,
        message: String,
    },
    InvalidRange { start: u64, end: u64 },
    /// The external tool could not be run or exited abnormally
    CommandFailed { command: String, message: String },
    Io(std::io::Error),
}

impl DumpError {
    pub(crate) fn malformed(read_id: Option<u64>, line: &str, message: impl Into<String>) -> Self {
        DumpError::MalformedDump {
            read_id,
            line: line.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for DumpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DumpError::MalformedDump {
                read_id,
                line,
                message,
            } => {
                match read_id {
                    Some(id) => write!(f, "Malformed dump in read {}: {}", id, message)?,
                    None => write!(f, "Malformed dump: {}", message)?,
                }
                write!(f, "\nLine: \"{}\"", line)
            }
            DumpError::DegenerateAlignment { alignment } => write!(
                f,
                "Degenerate alignment {}: B span is empty, slope is undefined",
                alignment
            ),
            DumpError::UnterminatedBlock {
                read_id,
                alignment,
                message,
            } => match alignment {
                Some(aln) => write!(
                    f,
                    "Unterminated path block in read {} at {}: {}",
                    read_id, aln, message
                ),
                None => write!(f, "Unterminated path block in read {}: {}", read_id, message),
            },
            DumpError::InvalidRange { start, end } => {
                write!(f, "Invalid read range: start {} > end {}", start, end)
            }
            DumpError::CommandFailed { command, message } => {
                write!(f, "Command `{}` failed: {}", command, message)
            }
            DumpError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for DumpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DumpError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DumpError {
    fn from(e: std::io::Error) -> Self {
        DumpError::Io(e)
    }
}

pub type Result<T> = std::result::Result<T, DumpError>;
