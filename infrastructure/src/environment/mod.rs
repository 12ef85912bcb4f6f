//! Environment capability probing

mod probe;

pub use probe::SystemProbe;
