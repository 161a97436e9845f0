use std::{
    fs,
    num::{IntErrorKind, ParseIntError},
    path::{Path, PathBuf},
};

use chrono::NaiveDateTime;

use crate::{
    created,
    error::{Error, Result},
    extract::{self, find_field},
    rst,
};

/// A proposal document: where it lives and what it says.
///
/// Everything else (title, author, dates, abstract) is derived from `text` on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub path: PathBuf,
    pub text: String,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Document {
            path: path.into(),
            text: text.into(),
        }
    }

    /// Read the whole file as UTF-8.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Ok(Document::new(path, text))
    }

    pub fn title(&self) -> Option<&str> {
        find_field(&self.text, "Title:")
    }

    pub fn author(&self) -> Option<&str> {
        find_field(&self.text, "Author:")
    }

    pub fn created_raw(&self) -> Option<&str> {
        find_field(&self.text, "Created:")
    }

    pub fn created(&self) -> Result<NaiveDateTime> {
        created::normalize_created(self.created_raw())
    }

    /// First paragraph of the `Abstract` section, if the body has one.
    pub fn abstract_text(&self) -> Option<String> {
        extract::find_abstract(&rst::parse(&self.text))
    }

    /// The numeric identifier encoded in the file name, e.g. `8` for `pep-0008.txt`.
    pub fn number(&self) -> Result<u32> {
        let missing = || Error::MissingNumber {
            path: self.path.clone(),
        };
        let digits = self
            .path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(identifier_digits)
            .ok_or_else(missing)?;
        digits.parse().map_err(|e: ParseIntError| match e.kind() {
            IntErrorKind::PosOverflow => Error::NumberOutOfRange {
                path: self.path.clone(),
                digits: digits.to_string(),
            },
            _ => missing(),
        })
    }
}

/// The text between the last `-` and the first `.` after it.
fn identifier_digits(name: &str) -> Option<&str> {
    let last = name.rsplit('-').next()?;
    last.split('.').next().map(str::trim)
}
