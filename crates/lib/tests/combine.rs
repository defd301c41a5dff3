#[macro_use]
mod macros;

test!(
    identical_bodies_are_merged,
    "",
    "a { color: red }\nb { color: red }",
    "a,\nb {\n  color: red;\n}\n"
);
test!(
    merged_rule_takes_the_first_position,
    "",
    "a { color: red }\nb { margin: 0 }\nc { color: red }",
    "a,\nc {\n  color: red;\n}\n\nb {\n  margin: 0;\n}\n"
);
test!(
    merging_can_be_disabled,
    "",
    "a { color: red }\nb { color: red }",
    "a {\n  color: red;\n}\n\nb {\n  color: red;\n}\n",
    cssdelta::Options::default()
        .silent(true)
        .combine_selectors(false)
);
test!(
    declaration_order_matters,
    "",
    "a { color: red; margin: 0 }\nb { margin: 0; color: red }",
    "a {\n  color: red;\n  margin: 0;\n}\n\nb {\n  margin: 0;\n  color: red;\n}\n"
);
test!(
    bodies_are_compared_after_the_diff,
    "a { margin: 0 }",
    "a { color: red; margin: 0 }\nb { color: red }",
    "a,\nb {\n  color: red;\n}\n"
);
test!(
    rules_in_different_contexts_are_not_merged,
    "",
    "a { color: red }\n@media print { b { color: red } }",
    "a {\n  color: red;\n}\n\n@media print {\n  b {\n    color: red;\n  }\n}\n"
);
test!(
    rules_in_the_same_context_are_merged,
    "",
    "@media print {\n  a { color: red }\n  b { color: red }\n}",
    "@media print {\n  a,\n  b {\n    color: red;\n  }\n}\n"
);
