/*!
This crate computes the difference between two CSS stylesheets: the smallest
stylesheet that, loaded after a "parent" stylesheet, reproduces the styling of
a "child" stylesheet.

Every child declaration that the parent already makes, with the same selector,
the same property and an equivalent value, is removed. Equivalence ignores
whitespace, letter case and the unit of a zero length, so `margin: 0px` in the
child is covered by `margin: 0` in the parent. What remains is regrouped into
rules, nested back under the at-rules it came from and pretty-printed in the
child's original order. Comments are carried along and at-rules such as
`@import` or `@keyframes` are kept unless the parent has an identical one.

## Use as library
```
# use cssdelta_compiler as cssdelta;
fn main() -> Result<(), Box<cssdelta::Error>> {
    let css = cssdelta::from_string(
        "a { color: red; margin: 0px; }",
        "a { color: red; margin: 0; padding: 5px; } b { color: red; }",
        &cssdelta::Options::default().silent(true),
    )?;
    assert_eq!(css, "a {\n  padding: 5px;\n}\n\nb {\n  color: red;\n}\n");
    Ok(())
}
```

## Use as binary
```bash
cargo install cssdelta
cssdelta parent.css child.css
```
*/

#![cfg_attr(doc_cfg, feature(doc_cfg))]
#![warn(clippy::all, clippy::cargo, clippy::dbg_macro)]
#![deny(missing_debug_implementations)]
#![allow(
    clippy::use_self,
    renamed_and_removed_lints,
    clippy::unknown_clippy_lints,
    clippy::single_match,
    clippy::new_without_default,
    clippy::single_match_else,
    clippy::multiple_crate_versions,
    clippy::wrong_self_convention,
    clippy::unwrap_or_default,
    clippy::manual_unwrap_or_default,
    clippy::len_without_is_empty,
    unknown_lints,
)]

use std::path::{Path, PathBuf};

use codemap::CodeMap;
#[cfg(feature = "wasm-exports")]
use wasm_bindgen::prelude::*;

use parse::CssParser;
use serializer::Serializer;

pub use crate::diff::{diff_at_rules, diff_declarations, DeclarationDiff, ParentIndex};
pub use crate::error::{
    DeltaError as Error, DeltaResult as Result, PublicDeltaErrorKind as ErrorKind,
};
pub use crate::format::pretty_print;
pub use crate::fs::{Fs, NullFs, StdFs};
pub use crate::input::Input;
pub use crate::logger::{Logger, NullLogger, StdLogger};
pub use crate::normalize::{rule_to_declarations, AtRule, Comment, Stylesheet};
pub use crate::options::Options;
pub use crate::regroup::{regroup, Container, ContainerChild, Entry, Rule};
pub(crate) use crate::lexer::Token;
use crate::lexer::Lexer;

pub mod css_model {
    pub use crate::declaration::{
        normalize_selector, normalize_value, Declaration, ParentType, SourceLine,
    };
}

pub mod css_ast {
    pub use crate::ast::*;
}

pub use codemap;

mod ast;
mod declaration;
mod diff;
mod error;
mod format;
mod fs;
mod input;
mod lexer;
mod logger;
mod normalize;
mod options;
mod parse;
mod regroup;
mod serializer;
mod utils;

fn raw_to_parse_error(map: &CodeMap, err: Error) -> Box<Error> {
    match err.raw() {
        Ok((message, span)) => Box::new(Error::from_loc(message, map.look_up_span(span))),
        Err(err) => Box::new(err),
    }
}

/// Parse a CSS stylesheet into its syntax tree
///
/// `file_name` is only used in error messages.
pub fn parse_stylesheet<P: AsRef<Path>>(
    input: String,
    file_name: P,
) -> Result<Vec<css_ast::AstStmt>> {
    let mut map = CodeMap::new();
    let file = map.add_file(file_name.as_ref().to_string_lossy().into_owned(), input);
    let lexer = Lexer::new_from_file(&file);

    CssParser::new(lexer)
        .__parse()
        .map_err(|e| raw_to_parse_error(&map, *e))
}

fn normalize_input(input: &Input, options: &Options) -> Result<Stylesheet> {
    let css = input.read(options)?;
    let stmts = parse_stylesheet(css, input.file_path())?;
    Stylesheet::from_ast(stmts, options)
}

fn diff_inputs(parent: &Input, child: &Input, options: &Options) -> Result<String> {
    options.progress("Parsing parent declarations...");
    let mut parent = normalize_input(parent, options)?;
    options.progress("Parsed!");

    options.progress("Parsing child declarations...");
    let child = normalize_input(child, options)?;
    options.progress("Parsed!");

    options.progress("Sorting parent declarations...");
    parent.sort_by_identity();
    let index = ParentIndex::new(parent.declarations());

    options.progress("Getting diff...");
    let diff = diff_declarations(&index, child.declarations);
    if options.reports_summary() {
        options.logger.info(&diff.summary());
    }

    let at_rules = diff_at_rules(parent.at_rules(), child.at_rules);
    let entries = regroup(diff.kept, child.comments, at_rules, options);

    let mut serializer = Serializer::new(options);
    for entry in &entries {
        serializer.visit_entry(entry)?;
    }
    let css = serializer.finish()?;

    if options.log_result {
        options.logger.info(&css);
    }

    Ok(css)
}

/// Diff two stylesheets, each given either as a path or as text
#[inline]
pub fn from_inputs(parent: &Input, child: &Input, options: &Options) -> Result<String> {
    diff_inputs(parent, child, options)
}

/// Diff the stylesheets at two paths
///
/// n.b. `cssdelta` does not currently support files or paths that are not valid UTF-8
///
/// ```no_run
/// # use cssdelta_compiler as cssdelta;
/// fn main() -> Result<(), Box<cssdelta::Error>> {
///     let css = cssdelta::from_path("parent.css", "child.css", &cssdelta::Options::default())?;
///     Ok(())
/// }
/// ```
#[inline]
pub fn from_path<P: AsRef<Path>, C: AsRef<Path>>(
    parent: P,
    child: C,
    options: &Options,
) -> Result<String> {
    diff_inputs(&Input::path(parent), &Input::path(child), options)
}

/// Diff two stylesheets given as text
///
/// ```
/// # use cssdelta_compiler as cssdelta;
/// fn main() -> Result<(), Box<cssdelta::Error>> {
///     let css = cssdelta::from_string(
///         "a { color: red; }",
///         "a { color: RED; } b { color: red; }",
///         &cssdelta::Options::default().silent(true),
///     )?;
///     assert_eq!(css, "b {\n  color: red;\n}\n");
///     Ok(())
/// }
/// ```
#[inline]
pub fn from_string<P: Into<String>, C: Into<String>>(
    parent: P,
    child: C,
    options: &Options,
) -> Result<String> {
    diff_inputs(
        &Input::path("parent.css").with_text(parent),
        &Input::path("child.css").with_text(child),
        options,
    )
}

/// Where [`write_output`] writes the diff of `child`
///
/// This is [`Options::output_filename`] inside [`Options::output_dir`]. Without
/// an explicit file name, the child's file name is used with a trailing `.css`
/// replaced by [`Options::output_file_ext`].
pub fn output_path(child: &Input, options: &Options) -> PathBuf {
    let file_name = match &options.output_filename {
        Some(file_name) => file_name.clone(),
        None => {
            let base = child
                .file_path()
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();

            if !options.output_file_ext.is_empty() && base.ends_with(".css") {
                let stem = &base[..base.len() - ".css".len()];
                format!("{}{}", stem, options.output_file_ext)
            } else {
                base
            }
        }
    };

    options.output_dir.join(file_name)
}

/// Diff two stylesheets and write the result to [`output_path`], creating the
/// output directory if needed
///
/// Returns the path written to.
pub fn write_output(parent: &Input, child: &Input, options: &Options) -> Result<PathBuf> {
    let css = diff_inputs(parent, child, options)?;

    options.progress(&format!(
        "Creating css file in {}...",
        options.output_dir.display()
    ));

    if !options.fs.is_dir(&options.output_dir) {
        options.fs.create_dir_all(&options.output_dir)?;
    }

    let path = output_path(child, options);
    options.fs.write(&path, css.as_bytes())?;

    if options.reports_summary() {
        options.logger.info(&format!(
            "See {}{}",
            if options.log_result { "also " } else { "" },
            path.display()
        ));
    }

    Ok(path)
}

#[cfg(feature = "wasm-exports")]
#[wasm_bindgen(js_name = from_string)]
pub fn from_string_js(parent: String, child: String) -> std::result::Result<String, String> {
    from_string(parent, child, &Options::default().logger(&NullLogger))
        .map_err(|e| e.to_string())
}
