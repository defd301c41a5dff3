/*!
This crate computes the smallest stylesheet that must be loaded on top of a
"parent" stylesheet to reproduce the styling of a "child" stylesheet.

Declarations the parent already makes, for the same selector and with an
equivalent value, are removed from the child. Whitespace, letter case and the
unit of zero lengths are ignored when comparing values. The declarations that
remain are regrouped into rules, nested back under their `@media`, `@supports`,
`@document` or `@host` blocks and printed in the child's original order.

## Use as library
```
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
cssdelta parent.css child.css -o out/
```
*/

#![warn(clippy::all, clippy::cargo, clippy::dbg_macro)]
#![deny(missing_debug_implementations)]
#![allow(
    clippy::use_self,
    clippy::missing_docs_in_private_items,
    clippy::module_name_repetitions,
    renamed_and_removed_lints,
    clippy::unknown_clippy_lints,
    clippy::single_match,
    clippy::option_if_let_else,
    clippy::derive_partial_eq_without_eq,

    // the api is changing too often to allot this
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::multiple_crate_versions,

    clippy::uninlined_format_args,
    clippy::wildcard_imports,

    unknown_lints,
)]

pub use cssdelta_compiler::*;
