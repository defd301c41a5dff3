use codemap::CodeMap;

use crate::{
    error::DeltaResult, lexer::Lexer, parse::BaseParser, raw_to_parse_error,
    utils::split_top_level,
};

/// Re-indents CSS text: one selector, declaration or comment per line, two
/// spaces per level of nesting and a blank line after every block
///
/// Strings and parenthesized text are copied verbatim. The result ends with
/// exactly one newline unless it is empty.
pub fn pretty_print(css: &str) -> DeltaResult<String> {
    let mut map = CodeMap::new();
    let file = map.add_file("output.css".to_owned(), css.to_owned());

    let mut printer = PrettyPrinter::new(Lexer::new_from_file(&file));

    match printer.print() {
        Ok(()) => Ok(printer.finish()),
        Err(e) => Err(raw_to_parse_error(&map, *e)),
    }
}

struct PrettyPrinter {
    toks: Lexer,
    buffer: String,
    /// Text of the line being collected, with whitespace collapsed
    pending: String,
    indentation: usize,
    indent_width: usize,
    paren_depth: usize,
    after_block: bool,
}

impl BaseParser for PrettyPrinter {
    fn toks(&self) -> &Lexer {
        &self.toks
    }

    fn toks_mut(&mut self) -> &mut Lexer {
        &mut self.toks
    }
}

impl PrettyPrinter {
    fn new(toks: Lexer) -> Self {
        PrettyPrinter {
            toks,
            buffer: String::new(),
            pending: String::new(),
            indentation: 0,
            indent_width: 2,
            paren_depth: 0,
            after_block: false,
        }
    }

    fn print(&mut self) -> DeltaResult<()> {
        while let Some(tok) = self.toks.peek() {
            match tok.kind {
                '"' | '\'' => {
                    let string = self.fallible_raw_text(Self::skip_string)?;
                    self.pending.push_str(&string);
                }
                '/' if self.looking_at_comment() => {
                    let comment = self.fallible_raw_text(Self::skip_loud_comment)?;
                    self.write_comment(&comment);
                }
                '(' => {
                    self.toks.next();
                    self.paren_depth += 1;
                    self.pending.push('(');
                }
                ')' => {
                    self.toks.next();
                    self.paren_depth = self.paren_depth.saturating_sub(1);
                    self.pending.push(')');
                }
                c if self.paren_depth > 0 => {
                    self.toks.next();
                    self.pending.push(c);
                }
                '{' => {
                    self.toks.next();
                    self.open_block();
                }
                '}' => {
                    self.toks.next();
                    self.close_block();
                }
                ';' => {
                    self.toks.next();
                    self.pending.push(';');
                    self.flush_pending();
                }
                c if c.is_whitespace() => {
                    self.toks.next();
                    if !self.pending.is_empty() && !self.pending.ends_with(' ') {
                        self.pending.push(' ');
                    }
                }
                c => {
                    self.toks.next();
                    self.pending.push(c);
                }
            }
        }

        self.flush_pending();

        Ok(())
    }

    fn finish(self) -> String {
        self.buffer
    }

    fn write_indentation(&mut self) {
        self.buffer.reserve(self.indentation);
        for _ in 0..self.indentation {
            self.buffer.push(' ');
        }
    }

    fn write_line(&mut self, line: &str) {
        if self.after_block && line != "}" {
            self.buffer.push('\n');
        }
        self.after_block = false;

        self.write_indentation();
        self.buffer.push_str(line);
        self.buffer.push('\n');
    }

    fn flush_pending(&mut self) {
        let line = self.pending.trim().to_owned();
        self.pending.clear();

        if !line.is_empty() {
            self.write_line(&line);
        }
    }

    fn open_block(&mut self) {
        let prelude = self.pending.trim().to_owned();
        self.pending.clear();

        if prelude.starts_with('@') || prelude.is_empty() {
            self.write_line(format!("{} {{", prelude).trim_start());
        } else {
            let selectors = split_top_level(&prelude, ',');
            let last = selectors.len().saturating_sub(1);
            for (idx, selector) in selectors.iter().enumerate() {
                if idx == last {
                    self.write_line(&format!("{} {{", selector));
                } else {
                    self.write_line(&format!("{},", selector));
                }
            }
        }

        self.indentation += self.indent_width;
    }

    fn close_block(&mut self) {
        self.flush_pending();
        self.indentation = self.indentation.saturating_sub(self.indent_width);
        self.write_line("}");
        self.after_block = true;
    }

    fn write_comment(&mut self, comment: &str) {
        if !self.pending.trim().is_empty() {
            self.pending.push_str(comment);
            return;
        }
        self.pending.clear();

        let mut lines = comment.split('\n');
        if let Some(first) = lines.next() {
            self.write_line(first);
        }
        for line in lines {
            self.write_indentation();
            self.buffer.push_str(line.trim());
            self.buffer.push('\n');
        }
    }
}
