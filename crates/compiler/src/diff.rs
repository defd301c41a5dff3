use crate::{
    declaration::Declaration,
    normalize::AtRule,
};

/// Lookup over a parent's declarations, sorted by identity key
#[derive(Debug)]
pub struct ParentIndex<'a> {
    keys: Vec<&'a str>,
}

impl<'a> ParentIndex<'a> {
    /// `declarations` must already be sorted by
    /// [`identity_key`](Declaration::identity_key), e.g. with
    /// [`Stylesheet::sort_by_identity`](crate::Stylesheet::sort_by_identity)
    pub fn new(declarations: &'a [Declaration]) -> Self {
        let keys: Vec<&str> = declarations.iter().map(Declaration::identity_key).collect();
        debug_assert!(keys.windows(2).all(|pair| pair[0] <= pair[1]));
        ParentIndex { keys }
    }

    /// Whether some parent declaration has the same identity key
    pub fn contains(&self, declaration: &Declaration) -> bool {
        let key = declaration.identity_key();
        let idx = self.keys.partition_point(|probe| *probe < key);
        self.keys.get(idx) == Some(&key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// The child declarations that survive a diff, in their original order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationDiff {
    pub kept: Vec<Declaration>,
    pub removed: usize,
    pub total: usize,
}

impl DeclarationDiff {
    /// Share of child declarations removed, from 0 to 100
    pub fn removed_percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }

        self.removed as f64 * 100.0 / self.total as f64
    }

    /// `Removed N of M CSS declarations (P%)`
    pub fn summary(&self) -> String {
        format!(
            "Removed {} of {} CSS declarations ({:.0}%)",
            self.removed,
            self.total,
            self.removed_percentage()
        )
    }
}

/// Drops every child declaration that the parent already contains
pub fn diff_declarations(parent: &ParentIndex, child: Vec<Declaration>) -> DeclarationDiff {
    let total = child.len();
    let kept: Vec<Declaration> = child
        .into_iter()
        .filter(|declaration| !parent.contains(declaration))
        .collect();

    DeclarationDiff {
        removed: total - kept.len(),
        total,
        kept,
    }
}

/// Keeps each child at-rule that no parent at-rule matches case-insensitively
pub fn diff_at_rules(parent: &[AtRule], child: Vec<AtRule>) -> Vec<AtRule> {
    child
        .into_iter()
        .filter(|at_rule| !parent.iter().any(|other| other.matches(at_rule)))
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::declaration::SourceLine;

    fn decl(selector: &str, property: &str, value: &str) -> Declaration {
        Declaration::new("", selector, property, value, SourceLine::Known(1)).unwrap()
    }

    fn sorted(mut declarations: Vec<Declaration>) -> Vec<Declaration> {
        declarations.sort_by(|a, b| a.identity_key().cmp(b.identity_key()));
        declarations
    }

    #[test]
    fn equivalent_declarations_are_dropped() {
        let parent = sorted(vec![decl("a", "color", "red"), decl("a", "margin", "0px")]);
        let index = ParentIndex::new(&parent);

        let diff = diff_declarations(
            &index,
            vec![
                decl("a", "color", "red"),
                decl("a", "margin", "0"),
                decl("a", "padding", "5px"),
                decl("b", "color", "red"),
            ],
        );

        let kept: Vec<&str> = diff.kept.iter().map(Declaration::identity_key).collect();
        assert_eq!(kept, vec!["a { padding: 5px", "b { color: red"]);
        assert_eq!(diff.removed, 2);
        assert_eq!(diff.total, 4);
        assert_eq!(diff.summary(), "Removed 2 of 4 CSS declarations (50%)");
    }

    #[test]
    fn shared_prefixes_do_not_match() {
        let parent = sorted(vec![
            decl("a", "color", "red"),
            decl("a", "color", "redd"),
            decl("ab", "color", "red"),
        ]);
        let index = ParentIndex::new(&parent);

        assert!(index.contains(&decl("a", "color", "red")));
        assert!(!index.contains(&decl("a", "color", "re")));
        assert!(!index.contains(&decl("a", "color", "reddd")));
        assert!(!index.contains(&decl("aa", "color", "red")));
    }

    #[test]
    fn empty_parent_keeps_everything() {
        let index = ParentIndex::new(&[]);
        let diff = diff_declarations(&index, vec![decl("a", "color", "red")]);

        assert_eq!(diff.kept.len(), 1);
        assert_eq!(diff.summary(), "Removed 0 of 1 CSS declarations (0%)");
    }

    #[test]
    fn empty_child_reports_zero_percent() {
        let parent = vec![decl("a", "color", "red")];
        let diff = diff_declarations(&ParentIndex::new(&parent), Vec::new());

        assert_eq!(diff.removed_percentage(), 0.0);
    }

    #[test]
    fn percentage_is_rounded() {
        let parent = vec![decl("a", "color", "red")];
        let diff = diff_declarations(
            &ParentIndex::new(&parent),
            vec![
                decl("a", "color", "red"),
                decl("a", "top", "0"),
                decl("a", "left", "0"),
            ],
        );

        assert_eq!(diff.summary(), "Removed 1 of 3 CSS declarations (33%)");
    }

    #[test]
    fn at_rules_differ_by_text() {
        let at_rule = |css: &str| AtRule {
            css: css.to_owned(),
            line: SourceLine::Known(1),
        };

        let kept = diff_at_rules(
            &[at_rule("@import url(a.css);")],
            vec![at_rule("@IMPORT URL(a.css);"), at_rule("@import url(b.css);")],
        );

        assert_eq!(kept, vec![at_rule("@import url(b.css);")]);
    }
}
