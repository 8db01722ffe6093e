pub mod error;
pub mod mock;
pub mod scope;
pub mod value;
