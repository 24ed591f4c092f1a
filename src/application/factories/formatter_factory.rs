use crate::adapters::outbound::formatters::{JsonFormatter, YamlFormatter};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::EnvironmentFormatter;

/// Factory for creating environment formatters
///
/// Keeps the choice of formatter adapter out of `main`.
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates a formatter instance for the specified output format
    ///
    /// # Examples
    /// ```
    /// use conda_minify::application::dto::OutputFormat;
    /// use conda_minify::application::factories::FormatterFactory;
    ///
    /// let formatter = FormatterFactory::create(OutputFormat::Yaml);
    /// ```
    pub fn create(format: OutputFormat) -> Box<dyn EnvironmentFormatter> {
        match format {
            OutputFormat::Yaml => Box::new(YamlFormatter::new()),
            OutputFormat::Json => Box::new(JsonFormatter::new()),
        }
    }

    /// Returns the progress message for the specified output format
    ///
    /// # Examples
    /// ```
    /// use conda_minify::application::dto::OutputFormat;
    /// use conda_minify::application::factories::FormatterFactory;
    ///
    /// let message = FormatterFactory::progress_message(OutputFormat::Yaml);
    /// assert_eq!(message, "📝 Generating YAML environment specification...");
    /// ```
    pub fn progress_message(format: OutputFormat) -> &'static str {
        match format {
            OutputFormat::Yaml => "📝 Generating YAML environment specification...",
            OutputFormat::Json => "📝 Generating JSON environment specification...",
        }
    }
}
