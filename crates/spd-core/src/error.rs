pub type Result<T> = std::result::Result<T, Error>;

/// Structural parse errors. Each kind is a distinct variant so callers can branch on it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("this command requires an argument")]
    MissingRequiredArgument,

    #[error("this command does not take an argument")]
    UnexpectedArgument,

    #[error("illegal indentation")]
    IllegalIndentation,

    #[error("unknown command: :{command}")]
    UnknownDirective { command: String },

    #[error("misplaced :else")]
    MisplacedElse,

    #[error("misplaced :case")]
    MisplacedCase,

    #[error("a case named {label:?} already exists")]
    DuplicateCase { label: String },

    #[error("internal error: {message}")]
    InternalInconsistency { message: String },

    #[error("unexpected error: {message}")]
    WrappedUnexpected { message: String },
}

impl Error {
    /// Stable kind name, e.g. for tooling that reports errors as data.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::MissingRequiredArgument => "MissingRequiredArgument",
            Self::UnexpectedArgument => "UnexpectedArgument",
            Self::IllegalIndentation => "IllegalIndentation",
            Self::UnknownDirective { .. } => "UnknownDirective",
            Self::MisplacedElse => "MisplacedElse",
            Self::MisplacedCase => "MisplacedCase",
            Self::DuplicateCase { .. } => "DuplicateCase",
            Self::InternalInconsistency { .. } => "InternalInconsistency",
            Self::WrappedUnexpected { .. } => "WrappedUnexpected",
        }
    }
}
