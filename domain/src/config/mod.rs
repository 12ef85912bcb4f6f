//! Presentation-facing configuration values shared by the outer layers.

mod output_format;

pub use output_format::OutputFormat;
