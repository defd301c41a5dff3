/// Walks a piece of CSS text, tracking whether the current character sits
/// inside a quoted string
#[derive(Default)]
struct QuoteState {
    quote: Option<char>,
    escaped: bool,
}

impl QuoteState {
    /// Advances past `c`, returning whether `c` is part of a quoted string
    /// (including its delimiters)
    fn step(&mut self, c: char) -> bool {
        if self.escaped {
            self.escaped = false;
            return self.quote.is_some();
        }

        match (self.quote, c) {
            (_, '\\') => {
                self.escaped = true;
                self.quote.is_some()
            }
            (Some(q), c) if c == q => {
                self.quote = None;
                true
            }
            (Some(..), _) => true,
            (None, '"' | '\'') => {
                self.quote = Some(c);
                true
            }
            (None, _) => false,
        }
    }
}

/// Splits `s` on `sep` wherever it appears outside of strings, parentheses and
/// brackets. Each piece is trimmed and empty pieces are discarded
pub(crate) fn split_top_level(s: &str, sep: char) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut state = QuoteState::default();
    let mut depth = 0_usize;

    for c in s.chars() {
        if state.step(c) {
            current.push(c);
            continue;
        }

        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            c if c == sep && depth == 0 => {
                pieces.push(std::mem::take(&mut current));
                continue;
            }
            _ => {}
        }

        current.push(c);
    }

    pieces.push(current);

    pieces
        .into_iter()
        .map(|piece| piece.trim().to_owned())
        .filter(|piece| !piece.is_empty())
        .collect()
}

/// Trims `s` and replaces every run of whitespace outside of strings with a
/// single space
pub(crate) fn collapse_whitespace(s: &str) -> String {
    let mut buffer = String::with_capacity(s.len());
    let mut state = QuoteState::default();
    let mut pending_space = false;

    for c in s.trim().chars() {
        let quoted = state.step(c);

        if !quoted && c.is_whitespace() {
            pending_space = true;
            continue;
        }

        if pending_space {
            buffer.push(' ');
            pending_space = false;
        }

        buffer.push(c);
    }

    buffer
}

/// Lowercases `s`, leaving quoted strings and the contents of `url(..)`
/// untouched
pub(crate) fn lowercase_unquoted(s: &str) -> String {
    let mut buffer = String::with_capacity(s.len());
    let mut state = QuoteState::default();
    let mut chars = s.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        if state.step(c) {
            buffer.push(c);
            continue;
        }

        if matches!(c, 'u' | 'U') && starts_url(&s[idx..]) && !continues_name(&buffer) {
            buffer.push_str("url(");
            for _ in 0..3 {
                chars.next();
            }

            let mut url_state = QuoteState::default();
            for (_, c) in chars.by_ref() {
                let quoted = url_state.step(c);
                buffer.push(c);
                if !quoted && c == ')' {
                    break;
                }
            }
            continue;
        }

        buffer.extend(c.to_lowercase());
    }

    buffer
}

fn starts_url(s: &str) -> bool {
    s.get(..4)
        .map_or(false, |prefix| prefix.eq_ignore_ascii_case("url("))
}

fn continues_name(buffer: &str) -> bool {
    buffer.chars().next_back().map_or(false, super::is_name)
}

/// Removes whitespace immediately before each line break, as well as at the
/// very end of the text
pub(crate) fn trim_line_ends(s: &str) -> String {
    let mut buffer = String::with_capacity(s.len());

    for line in s.split_inclusive('\n') {
        match line.strip_suffix('\n') {
            Some(line) => {
                buffer.push_str(line.trim_end_matches(|c: char| c == ' ' || c == '\t'));
                buffer.push('\n');
            }
            None => buffer.push_str(line.trim_end_matches(|c: char| c == ' ' || c == '\t')),
        }
    }

    buffer
}

/// Drops every empty line
pub(crate) fn remove_empty_lines(s: &str) -> String {
    let mut buffer = String::with_capacity(s.len());

    for line in s.split_inclusive('\n') {
        if line == "\n" {
            continue;
        }

        buffer.push_str(line);
    }

    buffer
}

/// Moves a comment that sits alone on the line after a declaration up onto the
/// declaration's line
pub(crate) fn join_trailing_comments(s: &str) -> String {
    let mut lines: Vec<String> = Vec::new();

    for line in s.split('\n') {
        let joins = lines
            .last()
            .map_or(false, |prev| prev.ends_with(';'))
            && line.trim_start_matches(' ').starts_with("/*");

        if joins {
            if let Some(prev) = lines.last_mut() {
                prev.push_str("  ");
                prev.push_str(line.trim_start_matches(' '));
            }
        } else {
            lines.push(line.to_owned());
        }
    }

    lines.join("\n")
}
