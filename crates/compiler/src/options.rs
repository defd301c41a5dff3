use std::path::{Path, PathBuf};

use crate::{Fs, Logger, StdFs, StdLogger};

/// Configuration for one diff
///
/// The simplest usage is `cssdelta::Options::default()`; however, a builder pattern
/// is also exposed to offer more control.
#[derive(Debug)]
pub struct Options<'a> {
    pub(crate) fs: &'a dyn Fs,
    pub(crate) logger: &'a dyn Logger,
    pub(crate) combine_selectors: bool,
    pub(crate) remove_comments: bool,
    pub(crate) comments_same_line: bool,
    pub(crate) remove_empty_lines: bool,
    pub(crate) verbose: bool,
    pub(crate) silent: bool,
    pub(crate) log_result: bool,
    pub(crate) output_dir: PathBuf,
    pub(crate) output_filename: Option<String>,
    pub(crate) output_file_ext: String,
}

impl Default for Options<'_> {
    #[inline]
    fn default() -> Self {
        Self {
            fs: &StdFs,
            logger: &StdLogger,
            combine_selectors: true,
            remove_comments: false,
            comments_same_line: false,
            remove_empty_lines: false,
            verbose: false,
            silent: false,
            log_result: false,
            output_dir: PathBuf::from("./out"),
            output_filename: None,
            output_file_ext: ".out.css".to_owned(),
        }
    }
}

impl<'a> Options<'a> {
    /// This option allows you to control the file system used to read input
    /// stylesheets and write the result.
    ///
    /// By default, it uses [`StdFs`], which is backed by [`std::fs`],
    /// allowing direct, unfettered access to the local file system.
    #[must_use]
    #[inline]
    pub fn fs(mut self, fs: &'a dyn Fs) -> Self {
        self.fs = fs;
        self
    }

    /// This option allows you to define how log events should be handled
    ///
    /// Be default, [`StdLogger`] is used, which writes all events to standard error.
    #[must_use]
    #[inline]
    pub fn logger(mut self, logger: &'a dyn Logger) -> Self {
        self.logger = logger;
        self
    }

    /// Merge rules that end up with identical declarations into a single rule
    /// with a selector list.
    ///
    /// By default, this is `true`.
    #[must_use]
    #[inline]
    pub const fn combine_selectors(mut self, combine_selectors: bool) -> Self {
        self.combine_selectors = combine_selectors;
        self
    }

    /// Drop every comment from the output.
    #[must_use]
    #[inline]
    pub const fn remove_comments(mut self, remove_comments: bool) -> Self {
        self.remove_comments = remove_comments;
        self
    }

    /// Treat a comment inside a rule as belonging to the declaration before it,
    /// and print it on that declaration's line.
    ///
    /// By default, a comment belongs to the declaration after it.
    #[must_use]
    #[inline]
    pub const fn comments_same_line(mut self, comments_same_line: bool) -> Self {
        self.comments_same_line = comments_same_line;
        self
    }

    /// Remove the blank lines between blocks in the output.
    #[must_use]
    #[inline]
    pub const fn remove_empty_lines(mut self, remove_empty_lines: bool) -> Self {
        self.remove_empty_lines = remove_empty_lines;
        self
    }

    /// Report every step of the pipeline to the [`Logger`].
    ///
    /// Setting this also forces the removal summary to be reported, regardless
    /// of [`Options::silent`].
    #[must_use]
    #[inline]
    pub const fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Do not report the removal summary or the output location.
    #[must_use]
    #[inline]
    pub const fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// Report the resulting stylesheet text to the [`Logger`].
    #[must_use]
    #[inline]
    pub const fn log_result(mut self, log_result: bool) -> Self {
        self.log_result = log_result;
        self
    }

    /// The directory [`write_output`](crate::write_output) writes into. It is
    /// created if it does not exist.
    ///
    /// By default, this is `./out`.
    #[must_use]
    #[inline]
    pub fn output_dir<P: AsRef<Path>>(mut self, output_dir: P) -> Self {
        self.output_dir = output_dir.as_ref().to_owned();
        self
    }

    /// The name of the written file.
    ///
    /// By default, the name is derived from the child stylesheet's file name.
    /// See [`output_path`](crate::output_path).
    #[must_use]
    #[inline]
    pub fn output_filename<S: Into<String>>(mut self, output_filename: S) -> Self {
        self.output_filename = Some(output_filename.into());
        self
    }

    /// The extension that replaces `.css` in the derived output file name. An
    /// empty extension keeps the child's file name unchanged.
    ///
    /// By default, this is `.out.css`.
    #[must_use]
    #[inline]
    pub fn output_file_ext<S: Into<String>>(mut self, output_file_ext: S) -> Self {
        self.output_file_ext = output_file_ext.into();
        self
    }

    pub(crate) fn reports_summary(&self) -> bool {
        self.verbose || !self.silent
    }

    pub(crate) fn progress(&self, message: &str) {
        if self.verbose {
            self.logger.debug(message);
        }
    }
}
