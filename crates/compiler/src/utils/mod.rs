pub(crate) use chars::*;
pub(crate) use strings::*;

mod chars;
mod strings;

pub(crate) fn opposite_bracket(b: char) -> char {
    debug_assert!(matches!(b, '(' | '[' | ')' | ']'));
    match b {
        '(' => ')',
        '[' => ']',
        ')' => '(',
        ']' => '[',
        _ => unreachable!(),
    }
}
