use super::api::MjsParser;
use super::api::Rule;
use super::parse_to_token_tree;

use pest::consumes_to;
use pest::fails_with;
use pest::parses_to;
use std::time::Instant;

#[test]
fn test_integer_number() {
    parses_to! {
        parser: MjsParser,
        input: "456",
        rule: Rule::number_literal,
        tokens: [
            number_literal(0, 3)
        ]
    };
}

#[test]
fn test_negative_number() {
    parses_to! {
        parser: MjsParser,
        input: "-1",
        rule: Rule::number_literal,
        tokens: [
            number_literal(0, 2)
        ]
    };
}

#[test]
fn test_float_number() {
    parses_to! {
        parser: MjsParser,
        input: "1.5",
        rule: Rule::number_literal,
        tokens: [
            number_literal(0, 3)
        ]
    };
    parses_to! {
        parser: MjsParser,
        input: "-12.25",
        rule: Rule::number_literal,
        tokens: [
            number_literal(0, 6)
        ]
    };
}

#[test]
fn test_double_quoted_string() {
    parses_to! {
        parser: MjsParser,
        input: "\"builtin:mock\"",
        rule: Rule::string_literal,
        tokens: [
            string_literal(0, 14)
        ]
    };
}

#[test]
fn test_single_quoted_string() {
    parses_to! {
        parser: MjsParser,
        input: "'abc'",
        rule: Rule::string_literal,
        tokens: [
            string_literal(0, 5)
        ]
    };
}

#[test]
fn test_empty_string() {
    parses_to! {
        parser: MjsParser,
        input: "\"\"",
        rule: Rule::string_literal,
        tokens: [
            string_literal(0, 2)
        ]
    };
    parses_to! {
        parser: MjsParser,
        input: "''",
        rule: Rule::string_literal,
        tokens: [
            string_literal(0, 2)
        ]
    };
}

#[test]
fn test_string_with_other_quote() {
    parses_to! {
        parser: MjsParser,
        input: "\"it's\"",
        rule: Rule::string_literal,
        tokens: [
            string_literal(0, 6)
        ]
    };
}

#[test]
fn test_unterminated_string() {
    fails_with! {
        parser: MjsParser,
        input: "\"abc",
        rule: Rule::string_literal,
        positives: vec![Rule::string_literal],
        negatives: vec![],
        pos: 0
    };
}

#[test]
fn test_identifier() {
    parses_to! {
        parser: MjsParser,
        input: "mock",
        rule: Rule::identifier,
        tokens: [
            identifier(0, 4)
        ]
    };
    parses_to! {
        parser: MjsParser,
        input: "_sut$1",
        rule: Rule::identifier,
        tokens: [
            identifier(0, 6)
        ]
    };
}

#[test]
fn test_keyword_is_not_an_identifier() {
    fails_with! {
        parser: MjsParser,
        input: "const",
        rule: Rule::identifier,
        positives: vec![Rule::identifier],
        negatives: vec![],
        pos: 0
    };
}

#[test]
fn test_boolean_literals() {
    parses_to! {
        parser: MjsParser,
        input: "true",
        rule: Rule::boolean_literal,
        tokens: [
            boolean_literal(0, 4)
        ]
    };
    parses_to! {
        parser: MjsParser,
        input: "false",
        rule: Rule::boolean_literal,
        tokens: [
            boolean_literal(0, 5)
        ]
    };
}

#[test]
fn test_import_default() {
    parses_to! {
        parser: MjsParser,
        input: "import d from \"m\"",
        rule: Rule::import_statement,
        tokens: [
            import_statement(0, 17, [
                kw_import(0, 6),
                import_clause(7, 8, [
                    default_binding(7, 8, [
                        identifier(7, 8)
                    ])
                ]),
                kw_from(9, 13),
                string_literal(14, 17)
            ])
        ]
    };
}

#[test]
fn test_import_named_with_alias() {
    parses_to! {
        parser: MjsParser,
        input: "import { a, b as c } from 'm'",
        rule: Rule::import_statement,
        tokens: [
            import_statement(0, 29, [
                kw_import(0, 6),
                import_clause(7, 20, [
                    named_imports(7, 20, [
                        import_specifier(9, 10, [
                            identifier(9, 10)
                        ]),
                        import_specifier(12, 18, [
                            identifier(12, 13),
                            kw_as(14, 16),
                            identifier(17, 18)
                        ])
                    ])
                ]),
                kw_from(21, 25),
                string_literal(26, 29)
            ])
        ]
    };
}

#[test]
fn test_bare_import() {
    parses_to! {
        parser: MjsParser,
        input: "import \"m\"",
        rule: Rule::import_statement,
        tokens: [
            import_statement(0, 10, [
                kw_import(0, 6),
                string_literal(7, 10)
            ])
        ]
    };
}

#[test]
fn test_export_default_arrow() {
    parses_to! {
        parser: MjsParser,
        input: "export default value => 123",
        rule: Rule::export_default_statement,
        tokens: [
            export_default_statement(0, 27, [
                kw_export(0, 6),
                kw_default(7, 14),
                expression(15, 27, [
                    arrow_function(15, 27, [
                        arrow_params(15, 20, [
                            single_param(15, 20, [
                                identifier(15, 20)
                            ])
                        ]),
                        expression(24, 27, [
                            call_expression(24, 27, [
                                primary_expression(24, 27, [
                                    literal(24, 27, [
                                        number_literal(24, 27)
                                    ])
                                ])
                            ])
                        ])
                    ])
                ])
            ])
        ]
    };
}

#[test]
fn test_export_const_call() {
    parses_to! {
        parser: MjsParser,
        input: "export const sut = mock(456)",
        rule: Rule::export_const_statement,
        tokens: [
            export_const_statement(0, 28, [
                kw_export(0, 6),
                kw_const(7, 12),
                identifier(13, 16),
                expression(19, 28, [
                    call_expression(19, 28, [
                        primary_expression(19, 23, [
                            identifier(19, 23)
                        ]),
                        call_arguments(23, 28, [
                            expression(24, 27, [
                                call_expression(24, 27, [
                                    primary_expression(24, 27, [
                                        literal(24, 27, [
                                            number_literal(24, 27)
                                        ])
                                    ])
                                ])
                            ])
                        ])
                    ])
                ])
            ])
        ]
    };
}

#[test]
fn test_paren_params_arrow() {
    parses_to! {
        parser: MjsParser,
        input: "(a, b) => a",
        rule: Rule::expression,
        tokens: [
            expression(0, 11, [
                arrow_function(0, 11, [
                    arrow_params(0, 6, [
                        paren_params(0, 6, [
                            identifier(1, 2),
                            identifier(4, 5)
                        ])
                    ]),
                    expression(10, 11, [
                        call_expression(10, 11, [
                            primary_expression(10, 11, [
                                identifier(10, 11)
                            ])
                        ])
                    ])
                ])
            ])
        ]
    };
}

#[test]
fn test_module_with_two_statements() {
    parses_to! {
        parser: MjsParser,
        input: "import d from \"./module.mjs\"\nexport default d",
        rule: Rule::module,
        tokens: [
            module(0, 45, [
                statement(0, 28, [
                    import_statement(0, 28, [
                        kw_import(0, 6),
                        import_clause(7, 8, [
                            default_binding(7, 8, [
                                identifier(7, 8)
                            ])
                        ]),
                        kw_from(9, 13),
                        string_literal(14, 28)
                    ])
                ]),
                statement(29, 45, [
                    export_default_statement(29, 45, [
                        kw_export(29, 35),
                        kw_default(36, 43),
                        expression(44, 45, [
                            call_expression(44, 45, [
                                primary_expression(44, 45, [
                                    identifier(44, 45)
                                ])
                            ])
                        ])
                    ])
                ]),
                EOI(45, 45)
            ])
        ]
    };
}

#[test]
fn test_statement_with_semicolon() {
    parses_to! {
        parser: MjsParser,
        input: "export default 1;",
        rule: Rule::module,
        tokens: [
            module(0, 17, [
                statement(0, 16, [
                    export_default_statement(0, 16, [
                        kw_export(0, 6),
                        kw_default(7, 14),
                        expression(15, 16, [
                            call_expression(15, 16, [
                                primary_expression(15, 16, [
                                    literal(15, 16, [
                                        number_literal(15, 16)
                                    ])
                                ])
                            ])
                        ])
                    ])
                ]),
                EOI(17, 17)
            ])
        ]
    };
}

#[test]
fn test_line_comment_is_ignored() {
    parses_to! {
        parser: MjsParser,
        input: "// note\nexport default 1",
        rule: Rule::module,
        tokens: [
            module(0, 24, [
                statement(8, 24, [
                    export_default_statement(8, 24, [
                        kw_export(8, 14),
                        kw_default(15, 22),
                        expression(23, 24, [
                            call_expression(23, 24, [
                                primary_expression(23, 24, [
                                    literal(23, 24, [
                                        number_literal(23, 24)
                                    ])
                                ])
                            ])
                        ])
                    ])
                ]),
                EOI(24, 24)
            ])
        ]
    };
}

#[test]
fn test_perf1() {
    let start = Instant::now();
    let result = parse_to_token_tree("export default ((((((((1))))))))");
    let end = Instant::now();
    match result {
        Ok(_) => {
            assert!(
                end.saturating_duration_since(start).as_millis() < 800,
                "Script taking too long to run."
            );
        }
        Err(e) => {
            assert!(false, "There was an error {}", e);
        }
    }
}
