//! Common CLI types shared across commands

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty format - stats line, colors and a table (default)
    #[default]
    Pretty,
    /// Table format - the table only
    Table,
    /// JSON format - structured for scripts
    Json,
}

impl OutputFormat {
    /// Whether spinners, progress bars and prompts may be drawn
    pub fn is_interactive(self) -> bool {
        !matches!(self, OutputFormat::Json)
    }
}
