/// Formatter adapters for the supported output syntaxes
mod json_formatter;
mod tree_view;
mod yaml_formatter;

pub use json_formatter::JsonFormatter;
pub use yaml_formatter::YamlFormatter;
