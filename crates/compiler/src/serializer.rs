use std::io::Write;

use crate::{
    error::{DeltaError, DeltaResult},
    format::pretty_print,
    normalize::Comment,
    regroup::{Container, ContainerChild, Entry, Rule},
    utils::{join_trailing_comments, remove_empty_lines, trim_line_ends},
    Options,
};

pub(crate) struct Serializer<'a> {
    options: &'a Options<'a>,
    buffer: Vec<u8>,
}

impl<'a> Serializer<'a> {
    pub fn new(options: &'a Options<'a>) -> Self {
        Self {
            options,
            buffer: Vec::new(),
        }
    }

    pub fn visit_entry(&mut self, entry: &Entry) -> DeltaResult<()> {
        match entry {
            Entry::Rule(rule) => self.write_rule(rule)?,
            Entry::Comment(comment) => self.write_comment(comment)?,
            Entry::Container(container) => self.visit_container(container)?,
            Entry::AtRule(at_rule) => writeln!(&mut self.buffer, "{}", at_rule.css())?,
        }

        Ok(())
    }

    fn write_rule(&mut self, rule: &Rule) -> DeltaResult<()> {
        write!(
            &mut self.buffer,
            "{} {{\n  {}\n}}\n",
            rule.selectors().join(",\n"),
            rule.body()
        )?;
        Ok(())
    }

    fn write_comment(&mut self, comment: &Comment) -> DeltaResult<()> {
        writeln!(&mut self.buffer, "/* {} */", comment.text())?;
        Ok(())
    }

    fn visit_container(&mut self, container: &Container) -> DeltaResult<()> {
        if !container.parent_type().is_container() {
            return Err(DeltaError::structural(format!(
                "`{}` cannot hold nested rules",
                container.parent_type().as_str()
            )));
        }

        writeln!(&mut self.buffer, "{} {{", container.header())?;

        for child in container.children() {
            match child {
                ContainerChild::Rule(rule) => self.write_rule(rule)?,
                ContainerChild::Comment(comment) => self.write_comment(comment)?,
            }
        }

        self.buffer.extend_from_slice(b"}\n");

        Ok(())
    }

    /// Pretty-prints the collected CSS and applies the whitespace and comment
    /// options
    pub fn finish(self) -> DeltaResult<String> {
        let css = String::from_utf8(self.buffer)?;

        let mut css = trim_line_ends(&pretty_print(&css)?);

        if self.options.remove_empty_lines {
            css = remove_empty_lines(&css);
        }

        if self.options.comments_same_line {
            css = join_trailing_comments(&css);
        }

        Ok(css)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        declaration::{Declaration, SourceLine},
        regroup::regroup,
        ErrorKind,
    };

    fn serialize(entries: &[Entry], options: &Options) -> DeltaResult<String> {
        let mut serializer = Serializer::new(options);
        for entry in entries {
            serializer.visit_entry(entry)?;
        }
        serializer.finish()
    }

    fn decl(parent: &str, selector: &str, property: &str, value: &str, line: u32) -> Declaration {
        Declaration::new(parent, selector, property, value, SourceLine::Known(line)).unwrap()
    }

    #[test]
    fn rules_and_containers() {
        let options = Options::default();
        let entries = regroup(
            vec![
                decl("", "a", "color", "red", 1),
                decl("@media print", "b", "margin", "0", 3),
                decl("@media print", "c", "margin", "1px", 4),
            ],
            Vec::new(),
            Vec::new(),
            &options,
        );

        assert_eq!(
            serialize(&entries, &options).unwrap(),
            "a {\n  color: red;\n}\n\n@media print {\n  b {\n    margin: 0;\n  }\n\n  c {\n    margin: 1px;\n  }\n}\n"
        );
    }

    #[test]
    fn empty_lines_can_be_removed() {
        let options = Options::default().remove_empty_lines(true);
        let entries = regroup(
            vec![decl("", "a", "color", "red", 1), decl("", "b", "color", "blue", 2)],
            Vec::new(),
            Vec::new(),
            &options,
        );

        assert_eq!(
            serialize(&entries, &options).unwrap(),
            "a {\n  color: red;\n}\nb {\n  color: blue;\n}\n"
        );
    }

    #[test]
    fn trailing_comments_join_their_declaration() {
        let options = Options::default().comments_same_line(true);
        let mut declaration = decl("", "a", "color", "red", 1);
        declaration.push_comment_after("brand".to_owned());

        let entries = regroup(vec![declaration], Vec::new(), Vec::new(), &options);

        assert_eq!(
            serialize(&entries, &options).unwrap(),
            "a {\n  color: red;  /* brand */\n}\n"
        );
    }

    #[test]
    fn page_as_a_container_is_a_structural_error() {
        let options = Options::default();
        let entries = regroup(
            vec![decl("@page :first", "a", "margin", "1in", 1)],
            Vec::new(),
            Vec::new(),
            &options,
        );

        let err = serialize(&entries, &options).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Structural);
    }
}
