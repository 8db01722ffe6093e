use std::rc::Rc;

use pest::error::{Error, ErrorVariant};
use pest::iterators::{Pair, Pairs};
use pest::Parser;
use pest_derive::Parser;

use super::ast::*;

#[derive(Parser)]
#[grammar = "parser/mjs_grammar.pest"] // relative to src
pub struct MjsParser;

const TAB_WIDTH: usize = 2;

pub fn parse_to_pairs(source: &str) -> Result<Pairs<Rule>, Error<Rule>> {
    MjsParser::parse(Rule::module, source)
}

/// Parses module source text into its AST.
pub fn parse_module(source: &str) -> Result<ProgramData, Error<Rule>> {
    let mut pairs = parse_to_pairs(source)?;
    build_ast_from_module(pairs.next().unwrap())
}

/// Renders the raw token tree of a module, one indented rule per line.
/// Debug aid surfaced through the CLI.
pub fn parse_to_token_tree(source: &str) -> Result<String, String> {
    let mut tree = vec![];
    match parse_to_pairs(source) {
        Ok(pairs) => {
            for pair in pairs {
                tree.push(pair_to_string(pair, 0).join("\n"));
            }
        }
        Err(rule) => {
            return Err(format!("Parse error due to {:?}", rule));
        }
    }
    Ok(tree.join("\n"))
}

fn pair_to_string(pair: Pair<Rule>, level: usize) -> Vec<String> {
    let mut tree = vec![];
    let span = pair.as_span();
    let rule_name = format!(
        "{:?} => ({},{}) #{:?}",
        pair.as_rule(),
        span.start(),
        span.end(),
        span.as_str()
    );
    let mut string_pads = String::with_capacity(level * TAB_WIDTH);
    for _ in 1..level * TAB_WIDTH + 1 {
        string_pads.push(' ');
    }
    tree.push(format!("{}{}", string_pads, rule_name));
    for child_pair in pair.into_inner() {
        tree.append(pair_to_string(child_pair, level + 1).as_mut());
    }
    tree
}

fn get_unexpected_error(id: i32, pair: &Pair<Rule>) -> Error<Rule> {
    let message = format!("Unexpected state reached [{:?}] - {}", pair.as_rule(), id);
    Error::new_from_span(ErrorVariant::CustomError { message }, pair.as_span())
}

fn get_meta(pair: &Pair<Rule>) -> Meta {
    let span = pair.as_span();
    Meta {
        start_index: span.start(),
        end_index: span.end(),
    }
}

fn build_ast_from_module(pair: Pair<Rule>) -> Result<ProgramData, Error<Rule>> {
    let meta = get_meta(&pair);
    let mut body = vec![];
    for inner_pair in pair.into_inner() {
        match inner_pair.as_rule() {
            Rule::statement => body.push(build_ast_from_statement(inner_pair)?),
            Rule::EOI => {}
            _ => return Err(get_unexpected_error(1, &inner_pair)),
        }
    }
    Ok(ProgramData { meta, body })
}

fn build_ast_from_statement(pair: Pair<Rule>) -> Result<StatementType, Error<Rule>> {
    let inner_pair = pair.into_inner().next().unwrap();
    match inner_pair.as_rule() {
        Rule::import_statement => build_ast_from_import_statement(inner_pair),
        Rule::export_default_statement => build_ast_from_export_default(inner_pair),
        Rule::export_const_statement => build_ast_from_export_const(inner_pair),
        _ => Err(get_unexpected_error(2, &inner_pair)),
    }
}

fn build_ast_from_import_statement(pair: Pair<Rule>) -> Result<StatementType, Error<Rule>> {
    let meta = get_meta(&pair);
    let mut default_binding = None;
    let mut named = vec![];
    let mut specifier = String::new();
    for inner_pair in pair.into_inner() {
        match inner_pair.as_rule() {
            Rule::kw_import | Rule::kw_from => {}
            Rule::import_clause => {
                for clause_pair in inner_pair.into_inner() {
                    match clause_pair.as_rule() {
                        Rule::default_binding => {
                            let id_pair = clause_pair.into_inner().next().unwrap();
                            default_binding = Some(build_identifier(id_pair));
                        }
                        Rule::named_imports => named = build_named_imports(clause_pair),
                        _ => return Err(get_unexpected_error(3, &clause_pair)),
                    }
                }
            }
            Rule::string_literal => specifier = get_string_value(&inner_pair),
            _ => return Err(get_unexpected_error(4, &inner_pair)),
        }
    }
    Ok(StatementType::ImportDeclaration {
        meta,
        specifier,
        default_binding,
        named,
    })
}

fn build_named_imports(pair: Pair<Rule>) -> Vec<ImportSpecifierData> {
    let mut named = vec![];
    for spec_pair in pair.into_inner() {
        let meta = get_meta(&spec_pair);
        let mut id_iter = spec_pair
            .into_inner()
            .filter(|p| p.as_rule() == Rule::identifier);
        let imported = build_identifier(id_iter.next().unwrap());
        let local = match id_iter.next() {
            Some(id_pair) => build_identifier(id_pair),
            None => IdentifierData {
                name: imported.name.clone(),
                meta: imported.meta.clone(),
            },
        };
        named.push(ImportSpecifierData {
            imported,
            local,
            meta,
        });
    }
    named
}

fn build_ast_from_export_default(pair: Pair<Rule>) -> Result<StatementType, Error<Rule>> {
    let meta = get_meta(&pair);
    let expr_pair = pair
        .into_inner()
        .find(|p| p.as_rule() == Rule::expression)
        .unwrap();
    Ok(StatementType::ExportDefaultDeclaration {
        meta,
        expression: build_ast_from_expression(expr_pair)?,
    })
}

fn build_ast_from_export_const(pair: Pair<Rule>) -> Result<StatementType, Error<Rule>> {
    let meta = get_meta(&pair);
    let mut pair_iter = pair
        .into_inner()
        .skip_while(|p| p.as_rule() != Rule::identifier);
    let name = build_identifier(pair_iter.next().unwrap());
    let expression = build_ast_from_expression(pair_iter.next().unwrap())?;
    Ok(StatementType::ExportConstDeclaration {
        meta,
        name,
        expression,
    })
}

fn build_ast_from_expression(pair: Pair<Rule>) -> Result<ExpressionType, Error<Rule>> {
    let inner_pair = pair.into_inner().next().unwrap();
    match inner_pair.as_rule() {
        Rule::arrow_function => build_ast_from_arrow_function(inner_pair),
        Rule::call_expression => build_ast_from_call_expression(inner_pair),
        _ => Err(get_unexpected_error(5, &inner_pair)),
    }
}

fn build_ast_from_arrow_function(pair: Pair<Rule>) -> Result<ExpressionType, Error<Rule>> {
    let meta = get_meta(&pair);
    let mut pair_iter = pair.into_inner();
    let params = build_arrow_params(pair_iter.next().unwrap());
    let body = build_ast_from_expression(pair_iter.next().unwrap())?;
    Ok(ExpressionType::ArrowFunction(Rc::new(ArrowData {
        params,
        body,
        meta,
    })))
}

fn build_arrow_params(pair: Pair<Rule>) -> Vec<IdentifierData> {
    let inner_pair = pair.into_inner().next().unwrap();
    match inner_pair.as_rule() {
        Rule::single_param => vec![build_identifier(inner_pair.into_inner().next().unwrap())],
        _ => inner_pair.into_inner().map(build_identifier).collect(),
    }
}

fn build_ast_from_call_expression(pair: Pair<Rule>) -> Result<ExpressionType, Error<Rule>> {
    let start_index = pair.as_span().start();
    let mut pair_iter = pair.into_inner();
    let mut expression = build_ast_from_primary_expression(pair_iter.next().unwrap())?;
    for args_pair in pair_iter {
        let meta = Meta {
            start_index,
            end_index: args_pair.as_span().end(),
        };
        let mut arguments = vec![];
        for arg_pair in args_pair.into_inner() {
            arguments.push(build_ast_from_expression(arg_pair)?);
        }
        expression = ExpressionType::CallExpression {
            meta,
            callee: Box::new(expression),
            arguments,
        };
    }
    Ok(expression)
}

fn build_ast_from_primary_expression(pair: Pair<Rule>) -> Result<ExpressionType, Error<Rule>> {
    let inner_pair = pair.into_inner().next().unwrap();
    match inner_pair.as_rule() {
        Rule::literal => build_ast_from_literal(inner_pair),
        Rule::identifier => Ok(ExpressionType::Identifier(build_identifier(inner_pair))),
        Rule::paren_expression => build_ast_from_expression(inner_pair.into_inner().next().unwrap()),
        _ => Err(get_unexpected_error(6, &inner_pair)),
    }
}

fn build_ast_from_literal(pair: Pair<Rule>) -> Result<ExpressionType, Error<Rule>> {
    let inner_pair = pair.into_inner().next().unwrap();
    let meta = get_meta(&inner_pair);
    let value = match inner_pair.as_rule() {
        Rule::number_literal => build_number_literal(&inner_pair)?,
        Rule::string_literal => LiteralType::StringLiteral(get_string_value(&inner_pair)),
        Rule::boolean_literal => LiteralType::BooleanLiteral(inner_pair.as_str() == "true"),
        Rule::null_literal => LiteralType::NullLiteral,
        Rule::undefined_literal => LiteralType::UndefinedLiteral,
        _ => return Err(get_unexpected_error(7, &inner_pair)),
    };
    Ok(ExpressionType::Literal(LiteralData { value, meta }))
}

fn build_number_literal(pair: &Pair<Rule>) -> Result<LiteralType, Error<Rule>> {
    let text = pair.as_str();
    let number = if text.contains('.') {
        match text.parse::<f64>() {
            Ok(f) => NumberLiteralType::FloatLiteral(f),
            Err(_) => return Err(get_unexpected_error(8, pair)),
        }
    } else {
        match text.parse::<i64>() {
            Ok(i) => NumberLiteralType::IntegerLiteral(i),
            Err(_) => return Err(get_unexpected_error(9, pair)),
        }
    };
    Ok(LiteralType::NumberLiteral(number))
}

fn get_string_value(pair: &Pair<Rule>) -> String {
    let text = pair.as_str();
    text[1..text.len() - 1].to_string()
}

fn build_identifier(pair: Pair<Rule>) -> IdentifierData {
    IdentifierData {
        name: pair.as_str().to_string(),
        meta: get_meta(&pair),
    }
}
