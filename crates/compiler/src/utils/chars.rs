pub(crate) fn is_name(c: char) -> bool {
    is_name_start(c) || c.is_ascii_digit() || c == '-'
}

pub(crate) fn is_name_start(c: char) -> bool {
    c == '_' || c.is_alphabetic() || c as u32 >= 0x0080
}

/// Whether `c` ends a value token, e.g. the unit in `0px`
pub(crate) fn is_token_end(c: Option<char>) -> bool {
    match c {
        None => true,
        Some(c) => c.is_whitespace() || matches!(c, ',' | ')' | '/' | '!' | ';'),
    }
}

/// Whether a token may begin directly after `c`
pub(crate) fn is_token_start(prev: Option<char>) -> bool {
    match prev {
        None => true,
        Some(c) => c.is_whitespace() || c == '(',
    }
}
