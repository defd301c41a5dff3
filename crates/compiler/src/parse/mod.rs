pub(crate) use base::BaseParser;
pub(crate) use stylesheet::CssParser;

mod base;
mod stylesheet;
