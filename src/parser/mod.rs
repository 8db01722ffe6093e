mod api;
pub mod ast;

#[cfg(test)]
mod unit_tests;

pub use api::{parse_module, parse_to_pairs, parse_to_token_tree, MjsParser, Rule};
