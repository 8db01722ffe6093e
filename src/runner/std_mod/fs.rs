//! `fs` builtin module.
//!
//! Thin filesystem access for module code, and the classic substitution
//! target for exercising the fake pipeline against a builtin specifier.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::runner::ds::error::LoaderError;
use crate::runner::ds::value::{FunctionValue, MjsValue, ValueResult};

pub fn exports() -> HashMap<String, MjsValue> {
    let mut exports = HashMap::new();
    exports.insert(
        "existsSync".to_string(),
        MjsValue::Function(FunctionValue::Native(exists_sync)),
    );
    exports.insert(
        "readFileSync".to_string(),
        MjsValue::Function(FunctionValue::Native(read_file_sync)),
    );
    exports
}

fn exists_sync(args: Vec<MjsValue>) -> ValueResult {
    match args.first() {
        Some(MjsValue::String(path)) => Ok(MjsValue::Boolean(Path::new(path).exists())),
        _ => Err(LoaderError::Type(
            "existsSync expects a path string".to_string(),
        )),
    }
}

fn read_file_sync(args: Vec<MjsValue>) -> ValueResult {
    match args.first() {
        Some(MjsValue::String(path)) => match fs::read_to_string(path) {
            Ok(text) => Ok(MjsValue::String(text)),
            Err(e) => Err(LoaderError::Type(format!(
                "readFileSync {}: {}",
                path, e
            ))),
        },
        _ => Err(LoaderError::Type(
            "readFileSync expects a path string".to_string(),
        )),
    }
}
