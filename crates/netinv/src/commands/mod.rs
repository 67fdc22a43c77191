//! Command dispatch.

pub mod inventory;
pub mod sites;

use std::path::Path;

use netinv_core::Inventory;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Route a registry-backed command to its handler.
pub async fn dispatch(
    cmd: Command,
    inv: &Inventory,
    registry_path: &Path,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::All(args) => inventory::all(inv, args, global).await,
        Command::Domain(args) => inventory::domain(inv, args, global).await,
        Command::Search(args) => inventory::search(inv, args, global).await,
        Command::Unhealthy => inventory::unhealthy(inv, global).await,
        Command::Summary(args) => inventory::summary(inv, args, global).await,
        Command::Sites => sites::list(inv.collector().registry(), registry_path, global),
        // Handled in main before the registry is loaded.
        Command::Init | Command::Completions(_) => Ok(()),
    }
}
