//! Evaluation of the module language.

pub mod expression;
pub mod module;

pub use expression::{call_value, evaluate_expression};
pub use module::{instantiate_module, ModuleFormat, ModuleInstance};
