use std::fmt::{Debug, Display, Error, Formatter};

// Error
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum QrError {
    // Construction
    EmptyData,
    InvalidErrorLevel(String),
    ModeMismatch { requested: &'static str, detected: &'static str },
    UnimplementedMode(&'static str),
    ContentTooLarge,
    UserVersionTooSmall { requested: u8, minimum: u8 },

    // Rendering
    InvalidColor,
    RenderIoFailure(String),
}

impl Display for QrError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        match self {
            Self::EmptyData => write!(f, "cannot build a symbol from empty data"),
            Self::InvalidErrorLevel(v) => write!(
                f,
                "error level '{v}' is not one of \"L\"/\"M\"/\"Q\"/\"H\" (case-insensitive), \
                 7/15/25/30, or \"7%\"/\"15%\"/\"25%\"/\"30%\""
            ),
            Self::ModeMismatch { requested, detected } => write!(
                f,
                "content cannot be encoded with the requested mode '{requested}', \
                 it can only be encoded as '{detected}' or wider"
            ),
            Self::UnimplementedMode(m) => write!(f, "mode '{m}' is not implemented"),
            Self::ContentTooLarge => {
                write!(f, "content does not fit in any version 1-40 at the requested error level")
            }
            Self::UserVersionTooSmall { requested, minimum } => write!(
                f,
                "the data will not fit inside a version {requested} symbol with the given \
                 encoding and error level (the symbol must be at least version {minimum})"
            ),
            Self::InvalidColor => write!(f, "color must be a 3- or 4-byte RGB(A) tuple"),
            Self::RenderIoFailure(msg) => write!(f, "render sink refused write: {msg}"),
        }
    }
}

impl std::error::Error for QrError {}

pub type QrResult<T> = Result<T, QrError>;
