use std::path::PathBuf;

/// Everything that can stop a feed run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Reading a document or writing the feed failed.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A `Created:` value looked like `DD-Month-YYYY` but the month is not a month.
    #[error("unparseable creation date: {raw:?}")]
    UnparseableDate { raw: String },

    /// The file name does not end in a numeric identifier, e.g. `pep-draft.rst`.
    #[error("no numeric identifier in file name {path:?}")]
    MissingNumber { path: PathBuf },

    /// The file name ends in digits too large for an identifier.
    #[error("identifier {digits} in file name {path:?} is out of range")]
    NumberOutOfRange { path: PathBuf, digits: String },

    #[error("bad document pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("invalid feed link: {0}")]
    Link(#[from] url::ParseError),

    #[error("feed serialisation failed: {0}")]
    Feed(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_names_the_input() {
        let err = Error::UnparseableDate {
            raw: "01-Foo-2020".to_string(),
        };
        assert_eq!(err.to_string(), "unparseable creation date: \"01-Foo-2020\"");

        let err = Error::MissingNumber {
            path: PathBuf::from("pep-draft.rst"),
        };
        assert!(err.to_string().contains("pep-draft.rst"));

        let err = Error::NumberOutOfRange {
            path: PathBuf::from("pep-99999999999.rst"),
            digits: "99999999999".to_string(),
        };
        assert!(err.to_string().contains("99999999999"));
        assert!(err.to_string().contains("out of range"));
    }
}
