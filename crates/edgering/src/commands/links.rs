//! `edgering links` command implementation.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use edgering_config::Config;
use edgering_renderer::KnownLinks;

use crate::error::CliError;

use super::effective_links;

/// Arguments for the links command.
#[derive(Args)]
pub(crate) struct LinksArgs {
    /// Path to configuration file (default: auto-discover edgering.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl LinksArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = Config::load(self.config.as_deref(), None)?;
        let links = effective_links(&config);

        let mut stdout = std::io::stdout().lock();
        stdout.write_all(format_table(&links).as_bytes())?;
        stdout.flush()?;
        Ok(())
    }
}

/// One `platform  class` line per entry, platform column padded.
fn format_table(links: &KnownLinks) -> String {
    let width = links.platforms().map(str::len).max().unwrap_or(0);
    links
        .iter()
        .map(|(platform, class)| format!("{platform:<width$}  lnk{class}\n"))
        .collect()
}
