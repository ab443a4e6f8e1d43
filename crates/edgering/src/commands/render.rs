//! `edgering render` command implementation.

use std::io::{Read, Write};
use std::path::PathBuf;

use clap::Args;
use edgering_config::{CliSettings, Config, RenderConfig};
use edgering_renderer::{KnownLinks, Pipeline, Transformed};

use crate::error::CliError;
use crate::output::Output;

use super::effective_links;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file to render (default: stdin).
    input: Option<PathBuf>,

    /// File to write HTML to (default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory that image sources resolve against (overrides config).
    #[arg(long, env = "EDGERING_DOCUMENT_ROOT")]
    document_root: Option<PathBuf>,

    /// Class added to converted tables (overrides config).
    #[arg(long)]
    table_class: Option<String>,

    /// Path to configuration file (default: auto-discover edgering.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl RenderArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            document_root: self.document_root.clone(),
            table_class: self.table_class.clone(),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Loaded configuration");
        }

        KnownLinks::set_global(effective_links(&config));

        let markdown = self.read_input()?;
        let report = render(&markdown, &config.render_resolved)?;

        for warning in &report.warnings {
            output.warning(&format!("Warning: {warning}"));
        }

        match &self.output {
            Some(path) => {
                std::fs::write(path, &report.html)?;
                output.success(&format!(
                    "Wrote {} ({} table(s))",
                    path.display(),
                    report.tables.len()
                ));
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(report.html.as_bytes())?;
                stdout.flush()?;
            }
        }

        Ok(())
    }

    fn read_input(&self) -> Result<String, CliError> {
        match &self.input {
            Some(path) => Ok(std::fs::read_to_string(path)?),
            None => {
                let mut text = String::new();
                std::io::stdin().read_to_string(&mut text)?;
                Ok(text)
            }
        }
    }
}

/// Run the default pipeline with resolved render settings.
fn render(markdown: &str, settings: &RenderConfig) -> Result<Transformed, CliError> {
    let mut pipeline = Pipeline::new().with_table_class(settings.table_class.as_str());
    if let Some(root) = &settings.document_root {
        pipeline = pipeline.with_document_root(root);
    }
    Ok(pipeline.transform_with_report(markdown)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_uses_table_class() {
        let settings = RenderConfig {
            document_root: None,
            table_class: "compact".to_owned(),
        };

        let report = render("[A;B\nC;D]", &settings).unwrap();

        assert!(report.html.starts_with(r#"<table class="compact">"#));
        assert_eq!(report.tables.len(), 1);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_render_reports_unterminated_block() {
        let report = render("[A;B\nC;D", &RenderConfig::default()).unwrap();
        assert_eq!(report.warnings.len(), 1);
    }
}
