pub use stmt::*;

mod css;
mod stmt;
