#[macro_use]
mod macros;

test!(
    top_level_comment_is_kept,
    "",
    "/* header */\na { color: red; }",
    "/* header */\na {\n  color: red;\n}\n"
);
test!(
    comment_before_declaration,
    "",
    "a {\n  /* brand */\n  color: red;\n}",
    "a {\n  /* brand */\n  color: red;\n}\n"
);
test!(
    comment_is_removed_with_its_declaration,
    "a { color: red }",
    "a {\n  /* brand */\n  color: red;\n  margin: 0;\n}",
    "a {\n  margin: 0;\n}\n"
);
test!(
    last_comment_follows_the_last_declaration,
    "",
    "a {\n  color: red;\n  /* end */\n}",
    "a {\n  color: red;\n  /* end */\n}\n"
);
test!(
    comment_alone_in_rule_body_with_declarations_removed,
    "a { color: red }",
    "a {\n  color: red;\n  /* end */\n}",
    ""
);
test!(
    comment_belongs_to_the_next_declaration_by_default,
    "a { margin: 0 }",
    "a {\n  color: red; /* brand */\n  margin: 0;\n}",
    "a {\n  color: red;\n}\n"
);
test!(
    comment_on_the_same_line,
    "a { margin: 0 }",
    "a {\n  color: red; /* brand */\n  margin: 0;\n}",
    "a {\n  color: red;  /* brand */\n}\n",
    cssdelta::Options::default()
        .silent(true)
        .comments_same_line(true)
);
test!(
    comments_can_be_removed,
    "",
    "/* x */\na {\n  /* y */\n  color: red;\n}",
    "a {\n  color: red;\n}\n",
    cssdelta::Options::default().silent(true).remove_comments(true)
);
test!(
    rule_with_only_comments_becomes_a_comment,
    "",
    "a {\n  /* todo */\n}",
    "/* a {\ntodo\n} */\n"
);
test!(
    comment_inside_media,
    "",
    "@media print {\n  /* print only */\n  a { color: red; }\n}",
    "@media print {\n  /* print only */\n  a {\n    color: red;\n  }\n}\n"
);
test!(
    comment_inside_emptied_media_is_dropped,
    "@media print { a { color: red } }",
    "@media print {\n  /* print only */\n  a { color: red; }\n}",
    ""
);
test!(
    empty_comments_are_dropped,
    "",
    "/**/\na { color: red }",
    "a {\n  color: red;\n}\n"
);
