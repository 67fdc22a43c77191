//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde, plain emits one identifier per line.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use netinv_core::{Domain, DomainTag, status};

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

/// Short colored badge for a record's domain.
pub fn domain_badge(tag: DomainTag, color: bool) -> String {
    let label = match tag {
        DomainTag::Domain(Domain::FabricController) => "fabric",
        DomainTag::Domain(Domain::CloudAccessController) => "cloud",
        DomainTag::Domain(Domain::AssuranceController) => "assurance",
        DomainTag::Domain(Domain::WanOverlayController) => "wan",
        DomainTag::System => "system",
    };
    if !color {
        return label.to_owned();
    }
    match tag {
        DomainTag::Domain(Domain::FabricController) => label.cyan().to_string(),
        DomainTag::Domain(Domain::CloudAccessController) => label.blue().to_string(),
        DomainTag::Domain(Domain::AssuranceController) => label.magenta().to_string(),
        DomainTag::Domain(Domain::WanOverlayController) => label.yellow().to_string(),
        DomainTag::System => label.red().bold().to_string(),
    }
}

/// Status text, green when healthy and red otherwise.
pub fn paint_status(value: &str, color: bool) -> String {
    if !color {
        value.to_owned()
    } else if status::is_unhealthy(value) {
        value.red().to_string()
    } else {
        value.green().to_string()
    }
}

/// Error text for inline error rows.
pub fn paint_error(value: &str, color: bool) -> String {
    if color {
        value.red().bold().to_string()
    } else {
        value.to_owned()
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of serde-serializable + tabled items in the chosen format.
pub fn render_list<T, R>(
    format: OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            Ok(render_table(&rows))
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(data)?),
        OutputFormat::JsonCompact => Ok(serde_json::to_string(data)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(data)?),
        OutputFormat::Plain => Ok(data.iter().map(&id_fn).collect::<Vec<_>>().join("\n")),
    }
}

/// Render a single serde-serializable item in the chosen format.
///
/// Table and plain rendering use `detail_fn`, since single-item views
/// don't use the `Tabled` derive.
pub fn render_single<T>(
    format: OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
{
    match format {
        OutputFormat::Table | OutputFormat::Plain => Ok(detail_fn(data)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(data)?),
        OutputFormat::JsonCompact => Ok(serde_json::to_string(data)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(data)?),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

/// Print a status line to stderr unless quiet.
pub fn print_note(note: &str, quiet: bool) {
    if !quiet {
        eprintln!("{note}");
    }
}

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}
