use std::{
    error::Error,
    fmt::{self, Display},
    io,
    string::FromUtf8Error,
};

use codemap::{Span, SpanLoc};

pub type DeltaResult<T> = Result<T, Box<DeltaError>>;

/// The broad category of a [`DeltaError`]
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PublicDeltaErrorKind {
    /// The input stylesheet could not be parsed
    Parse,

    /// An internal routine received a node of the wrong kind
    ///
    /// This indicates a bug rather than a problem with the input
    Structural,

    /// Reading an input or writing the output failed
    Io,

    /// An input file was not valid UTF-8
    Utf8,
}

#[derive(Debug)]
pub struct DeltaError {
    kind: DeltaErrorKind,
}

impl DeltaError {
    pub(crate) fn raw(self) -> Result<(String, Span), Self> {
        match self.kind {
            DeltaErrorKind::Raw(message, span) => Ok((message, span)),
            kind => Err(DeltaError { kind }),
        }
    }

    pub(crate) fn from_loc(message: String, loc: SpanLoc) -> Self {
        DeltaError {
            kind: DeltaErrorKind::ParseError { message, loc },
        }
    }

    pub(crate) fn structural<S: Into<String>>(message: S) -> Box<Self> {
        Box::new(DeltaError {
            kind: DeltaErrorKind::Structural(message.into()),
        })
    }

    pub fn kind(&self) -> PublicDeltaErrorKind {
        match &self.kind {
            DeltaErrorKind::Raw(..) | DeltaErrorKind::ParseError { .. } => {
                PublicDeltaErrorKind::Parse
            }
            DeltaErrorKind::Structural(..) => PublicDeltaErrorKind::Structural,
            DeltaErrorKind::IoError(..) => PublicDeltaErrorKind::Io,
            DeltaErrorKind::FromUtf8Error(..) => PublicDeltaErrorKind::Utf8,
        }
    }
}

#[derive(Debug)]
enum DeltaErrorKind {
    /// A raw error with no additional metadata
    /// It contains only a `String` message and
    /// a span
    Raw(String, Span),
    ParseError {
        message: String,
        loc: SpanLoc,
    },
    Structural(String),
    IoError(io::Error),
    FromUtf8Error(String),
}

impl Display for DeltaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (message, loc) = match &self.kind {
            DeltaErrorKind::ParseError { message, loc } => (message, loc),
            DeltaErrorKind::Raw(message, ..) => return writeln!(f, "Error: {}", message),
            DeltaErrorKind::Structural(message) => {
                return writeln!(f, "Error: internal invariant violated: {}", message)
            }
            DeltaErrorKind::IoError(err) => return writeln!(f, "Error: {}", err),
            DeltaErrorKind::FromUtf8Error(message) => return writeln!(f, "Error: {}", message),
        };

        let line = loc.begin.line + 1;
        let col = loc.begin.column + 1;
        writeln!(f, "Error: {}", message)?;
        let padding = " ".repeat(line.to_string().len() + 1);
        writeln!(f, "{}|", padding)?;
        writeln!(f, "{} | {}", line, loc.file.source_line(loc.begin.line))?;

        let underline = if loc.end.line == loc.begin.line {
            loc.end.column.saturating_sub(loc.begin.column).max(1)
        } else {
            1
        };
        writeln!(
            f,
            "{}| {}{}",
            padding,
            " ".repeat(loc.begin.column),
            "^".repeat(underline)
        )?;
        writeln!(f, "{}|", padding)?;
        writeln!(f, "./{}:{}:{}", loc.file.name(), line, col)?;
        Ok(())
    }
}

impl From<io::Error> for Box<DeltaError> {
    #[inline]
    fn from(error: io::Error) -> Box<DeltaError> {
        Box::new(DeltaError {
            kind: DeltaErrorKind::IoError(error),
        })
    }
}

impl From<FromUtf8Error> for Box<DeltaError> {
    #[inline]
    fn from(error: FromUtf8Error) -> Box<DeltaError> {
        Box::new(DeltaError {
            kind: DeltaErrorKind::FromUtf8Error(format!(
                "Invalid UTF-8 character \"\\x{:X?}\"",
                error.as_bytes()[error.utf8_error().valid_up_to()]
            )),
        })
    }
}

impl From<(&str, Span)> for Box<DeltaError> {
    #[inline]
    fn from(error: (&str, Span)) -> Box<DeltaError> {
        Box::new(DeltaError {
            kind: DeltaErrorKind::Raw(error.0.to_owned(), error.1),
        })
    }
}

impl From<(String, Span)> for Box<DeltaError> {
    #[inline]
    fn from(error: (String, Span)) -> Box<DeltaError> {
        Box::new(DeltaError {
            kind: DeltaErrorKind::Raw(error.0, error.1),
        })
    }
}

impl Error for DeltaError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.kind {
            DeltaErrorKind::IoError(err) => Some(err),
            _ => None,
        }
    }
}
