use std::path::{Path, PathBuf};

use crate::{error::DeltaResult, Options};

/// One side of a diff: a stylesheet path, optionally with its text supplied
/// directly
///
/// When text is supplied the path is only used to name the stylesheet in error
/// messages and, for the child, to derive the output file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    path: PathBuf,
    css: Option<String>,
}

impl Input {
    /// A stylesheet read from `path`
    pub fn path<P: AsRef<Path>>(path: P) -> Self {
        Input {
            path: path.as_ref().to_owned(),
            css: None,
        }
    }

    /// A stylesheet given as text, named `stdin`
    pub fn text<S: Into<String>>(css: S) -> Self {
        Input {
            path: PathBuf::from("stdin"),
            css: Some(css.into()),
        }
    }

    /// Supplies the text, so that `path` is never read
    #[must_use]
    pub fn with_text<S: Into<String>>(mut self, css: S) -> Self {
        self.css = Some(css.into());
        self
    }

    pub fn file_path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn read(&self, options: &Options) -> DeltaResult<String> {
        match &self.css {
            Some(css) => Ok(css.clone()),
            None => Ok(String::from_utf8(options.fs.read(&self.path)?)?),
        }
    }
}
