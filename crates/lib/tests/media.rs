#[macro_use]
mod macros;

test!(
    nested_declaration_is_removed,
    "@media print { a { color: red } }",
    "@media print { a { color: red; margin: 0 } }",
    "@media print {\n  a {\n    margin: 0;\n  }\n}\n"
);
test!(
    top_level_declaration_does_not_cover_nested_one,
    "a { color: red }",
    "@media print { a { color: red } }",
    "@media print {\n  a {\n    color: red;\n  }\n}\n"
);
test!(
    query_is_normalized,
    "@media  SCREEN and (MIN-WIDTH: 600px) { a { color: red } }",
    "@media screen and (min-width: 600px) { a { color: red } }",
    ""
);
test!(
    different_query_is_kept,
    "@media print { a { color: red } }",
    "@media screen { a { color: red } }",
    "@media screen {\n  a {\n    color: red;\n  }\n}\n"
);
test!(
    supports,
    "",
    "@supports (display: grid) { a { display: grid } }",
    "@supports (display: grid) {\n  a {\n    display: grid;\n  }\n}\n"
);
test!(
    vendor_prefixed_document,
    "",
    "@-moz-document url-prefix() { a { color: red } }",
    "@-moz-document url-prefix() {\n  a {\n    color: red;\n  }\n}\n"
);
test!(
    host,
    "",
    "@host { a { color: red } }",
    "@host {\n  a {\n    color: red;\n  }\n}\n"
);
test!(
    media_keeps_its_position,
    "",
    "a { color: red }\n@media print {\n  b { color: red }\n}\nc { margin: 0 }",
    "a {\n  color: red;\n}\n\n@media print {\n  b {\n    color: red;\n  }\n}\n\nc {\n  margin: 0;\n}\n"
);
test!(
    blocks_with_the_same_query_are_joined,
    "",
    "@media print { a { color: red } }\nb { color: blue }\n@media print { c { margin: 0 } }",
    "@media print {\n  a {\n    color: red;\n  }\n\n  c {\n    margin: 0;\n  }\n}\n\nb {\n  color: blue;\n}\n"
);
test!(
    nested_at_rules_are_kept_whole,
    "",
    "@media print { @media (min-width: 1px) { a { color: red } } }",
    "@media print {\n  @media (min-width: 1px) {\n    a {\n      color: red;\n    }\n  }\n}\n"
);
test!(
    identical_nested_at_rules_are_removed,
    "@media print { @media (min-width: 1px) { a { color: red } } }",
    "@media print {\n  @media (min-width: 1px) {\n    a { color: red; }\n  }\n}",
    ""
);
test!(
    page_declaration_is_removed,
    "@page { margin: 1in }",
    "@page { margin: 1in; size: a4 }",
    "@page {\n  size: a4;\n}\n"
);
test!(
    page_with_selector,
    "@page { margin: 1in }",
    "@page :first { margin: 1in }",
    "@page :first {\n  margin: 1in;\n}\n"
);
