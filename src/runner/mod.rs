//! Execution engine for the module language: values and scopes, the
//! evaluator, and natively implemented builtin modules.

pub mod ds;
pub mod eval;
pub mod std_mod;
