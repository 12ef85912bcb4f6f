//! Code execution adapters

mod local;

pub use local::LocalCodeExecutor;
