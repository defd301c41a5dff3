use indexmap::IndexMap;

use crate::{
    declaration::{Declaration, ParentType, SourceLine},
    normalize::{AtRule, Comment},
    Options,
};

/// One or more selectors sharing a rendered declaration body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    selectors: Vec<String>,
    /// Declarations with their comments, one per line
    body: String,
    grouping_id: String,
    context: Option<(ParentType, String)>,
    line: SourceLine,
}

impl Rule {
    fn from_group(declarations: &[Declaration]) -> Option<Self> {
        let first = declarations.first()?;

        let body = declarations
            .iter()
            .map(render_declaration)
            .collect::<Vec<String>>()
            .join("\n");

        let mut grouping_id = String::new();
        if first.parent_type().is_some() {
            grouping_id.push_str(first.parent_selector());
            grouping_id.push_str(" { ");
        }
        for declaration in declarations {
            grouping_id.push_str(declaration.declaration_text());
        }

        Some(Rule {
            selectors: vec![first.selector().to_owned()],
            body,
            grouping_id,
            context: first
                .parent_type()
                .map(|parent_type| (parent_type, first.parent_selector().to_owned())),
            line: declarations
                .iter()
                .map(Declaration::line)
                .min()
                .unwrap_or(SourceLine::Unknown),
        })
    }

    pub fn selectors(&self) -> &[String] {
        &self.selectors
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn line(&self) -> SourceLine {
        self.line
    }
}

fn render_declaration(declaration: &Declaration) -> String {
    let mut buffer = String::new();

    for comment in declaration.comments_before() {
        buffer.push_str(&format!("/* {} */\n", comment));
    }

    buffer.push_str(declaration.declaration_text());

    for comment in declaration.comments_after() {
        buffer.push_str(&format!(" /* {} */", comment));
    }

    buffer
}

/// An at-rule header with the rules and comments nested under it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    parent_type: ParentType,
    header: String,
    children: Vec<ContainerChild>,
    line: SourceLine,
}

impl Container {
    pub fn parent_type(&self) -> ParentType {
        self.parent_type
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn children(&self) -> &[ContainerChild] {
        &self.children
    }

    pub fn line(&self) -> SourceLine {
        self.line
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerChild {
    Rule(Rule),
    Comment(Comment),
}

impl ContainerChild {
    fn line(&self) -> SourceLine {
        match self {
            ContainerChild::Rule(rule) => rule.line,
            ContainerChild::Comment(comment) => comment.line,
        }
    }
}

/// A top-level item of the output stylesheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Rule(Rule),
    Comment(Comment),
    Container(Container),
    AtRule(AtRule),
}

impl Entry {
    pub fn line(&self) -> SourceLine {
        match self {
            Entry::Rule(rule) => rule.line,
            Entry::Comment(comment) => comment.line,
            Entry::Container(container) => container.line,
            Entry::AtRule(at_rule) => at_rule.line,
        }
    }
}

/// Rebuilds the surviving declarations into rules, nests them under their
/// contexts and puts comments and at-rules back, ordered by source line
pub fn regroup(
    declarations: Vec<Declaration>,
    comments: Vec<Comment>,
    at_rules: Vec<AtRule>,
    options: &Options,
) -> Vec<Entry> {
    options.progress("Regrouping declarations by selector...");
    let rules = group_by_selector(declarations);

    let rules = if options.combine_selectors {
        options.progress("Combining selectors with the same declarations...");
        combine_selectors(rules)
    } else {
        rules
    };

    options.progress("Nesting rules under their at-rules...");
    let mut entries = nest(rules);

    if !options.remove_comments {
        reattach_comments(&mut entries, comments, options);
    }

    entries.extend(at_rules.into_iter().map(Entry::AtRule));

    entries.sort_by_key(Entry::line);
    for entry in &mut entries {
        if let Entry::Container(container) = entry {
            container.children.sort_by_key(ContainerChild::line);
        }
    }

    entries
}

fn group_by_selector(declarations: Vec<Declaration>) -> Vec<Rule> {
    let mut groups: IndexMap<String, Vec<Declaration>> = IndexMap::new();

    for declaration in declarations {
        groups
            .entry(declaration.full_selector().to_owned())
            .or_default()
            .push(declaration);
    }

    groups
        .values()
        .filter_map(|group| Rule::from_group(group))
        .collect()
}

fn combine_selectors(rules: Vec<Rule>) -> Vec<Rule> {
    let mut groups: IndexMap<String, Rule> = IndexMap::new();

    for rule in rules {
        match groups.get_mut(&rule.grouping_id) {
            Some(merged) => {
                merged.selectors.extend(rule.selectors);
                merged.line = merged.line.min(rule.line);
            }
            None => {
                groups.insert(rule.grouping_id.clone(), rule);
            }
        }
    }

    groups.into_values().collect()
}

fn nest(rules: Vec<Rule>) -> Vec<Entry> {
    let mut entries = Vec::new();
    let mut containers: IndexMap<String, Container> = IndexMap::new();

    for rule in rules {
        let (parent_type, header) = match &rule.context {
            Some(context) => context.clone(),
            None => {
                entries.push(Entry::Rule(rule));
                continue;
            }
        };

        let container = containers.entry(header.clone()).or_insert(Container {
            parent_type,
            header,
            children: Vec::new(),
            line: rule.line,
        });

        container.line = container.line.min(rule.line);
        container.children.push(ContainerChild::Rule(rule));
    }

    entries.extend(containers.into_values().map(Entry::Container));
    entries
}

fn reattach_comments(entries: &mut Vec<Entry>, comments: Vec<Comment>, options: &Options) {
    let (top_level, scoped): (Vec<Comment>, Vec<Comment>) = comments
        .into_iter()
        .partition(|comment| comment.context.is_none());

    entries.extend(top_level.into_iter().map(Entry::Comment));

    for comment in scoped {
        let container = entries.iter_mut().find_map(|entry| match entry {
            Entry::Container(container) if comment.context() == Some(container.header()) => {
                Some(container)
            }
            _ => None,
        });

        match container {
            Some(container) => container.children.push(ContainerChild::Comment(comment)),
            None => options.progress(&format!(
                "Dropping comment on line {}: nothing left in `{}`",
                comment.line,
                comment.context().unwrap_or_default()
            )),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn decl(parent: &str, selector: &str, text: &str, line: u32) -> Declaration {
        let (property, value) = text.split_once(':').unwrap();
        Declaration::new(parent, selector, property, value, SourceLine::Known(line)).unwrap()
    }

    fn comment(text: &str, line: u32, context: Option<&str>) -> Comment {
        Comment {
            text: text.to_owned(),
            line: SourceLine::Known(line),
            context: context.map(str::to_owned),
        }
    }

    fn rule(entry: &Entry) -> &Rule {
        match entry {
            Entry::Rule(rule) => rule,
            other => panic!("expected rule, found {:?}", other),
        }
    }

    #[test]
    fn declarations_are_grouped_by_selector() {
        let entries = regroup(
            vec![
                decl("", "a", "color: red", 1),
                decl("", "b", "color: blue", 2),
                decl("", "a", "margin: 0", 3),
            ],
            Vec::new(),
            Vec::new(),
            &Options::default(),
        );

        assert_eq!(entries.len(), 2);
        assert_eq!(rule(&entries[0]).body(), "color: red;\nmargin: 0;");
        assert_eq!(rule(&entries[1]).selectors(), ["b".to_owned()]);
    }

    #[test]
    fn identical_bodies_merge_selectors() {
        let entries = regroup(
            vec![
                decl("", "b", "color: red", 4),
                decl("", "a", "color: red", 2),
                decl("", "c", "color: blue", 3),
            ],
            Vec::new(),
            Vec::new(),
            &Options::default(),
        );

        assert_eq!(entries.len(), 2);
        let merged = rule(&entries[0]);
        assert_eq!(merged.selectors(), ["b".to_owned(), "a".to_owned()]);
        assert_eq!(merged.line(), SourceLine::Known(2));
    }

    #[test]
    fn merging_can_be_disabled() {
        let entries = regroup(
            vec![decl("", "a", "color: red", 1), decl("", "b", "color: red", 2)],
            Vec::new(),
            Vec::new(),
            &Options::default().combine_selectors(false),
        );

        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn same_body_in_different_contexts_is_not_merged() {
        let entries = regroup(
            vec![
                decl("", "a", "color: red", 1),
                decl("@media print", "a", "color: red", 3),
            ],
            Vec::new(),
            Vec::new(),
            &Options::default(),
        );

        assert_eq!(entries.len(), 2);
        match &entries[1] {
            Entry::Container(container) => {
                assert_eq!(container.header(), "@media print");
                assert_eq!(container.parent_type(), ParentType::Media);
                assert_eq!(container.children().len(), 1);
            }
            other => panic!("expected container, found {:?}", other),
        }
    }

    #[test]
    fn comments_are_reattached_in_line_order() {
        let entries = regroup(
            vec![
                decl("@media print", "a", "color: red", 6),
                decl("", "b", "color: red", 2),
            ],
            vec![
                comment("top", 1, None),
                comment("nested", 5, Some("@media print")),
                comment("orphan", 8, Some("@media screen")),
            ],
            Vec::new(),
            &Options::default(),
        );

        assert_eq!(entries.len(), 3);
        assert!(matches!(&entries[0], Entry::Comment(c) if c.text() == "top"));
        match &entries[2] {
            Entry::Container(container) => {
                assert!(matches!(
                    &container.children()[0],
                    ContainerChild::Comment(c) if c.text() == "nested"
                ));
                assert_eq!(container.line(), SourceLine::Known(6));
            }
            other => panic!("expected container, found {:?}", other),
        }
    }

    #[test]
    fn at_rules_are_placed_by_line() {
        let entries = regroup(
            vec![decl("", "a", "color: red", 3)],
            Vec::new(),
            vec![AtRule {
                css: "@import url(a.css);".to_owned(),
                line: SourceLine::Known(1),
            }],
            &Options::default(),
        );

        assert!(matches!(&entries[0], Entry::AtRule(..)));
        assert!(matches!(&entries[1], Entry::Rule(..)));
    }

    #[test]
    fn attached_comments_are_rendered_in_the_body() {
        let mut declaration =
            decl("", "a", "color: red", 1).with_comments_before(vec!["before".to_owned()]);
        declaration.push_comment_after("after".to_owned());

        assert_eq!(
            render_declaration(&declaration),
            "/* before */\ncolor: red; /* after */"
        );
    }
}
