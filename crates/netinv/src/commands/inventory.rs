//! Inventory command handlers: all, domain, search, unhealthy, summary.

use tabled::Tabled;

use netinv_core::{ControllerCount, DeviceRecord, Domain, Inventory, RecordBody, Summary, query};

use crate::cli::{AllArgs, DomainArgs, GlobalOpts, OutputFormat, SearchArgs, SummaryArgs};
use crate::error::CliError;
use crate::output;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "Domain")]
    domain: String,
    #[tabled(rename = "Controller")]
    controller: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Serial")]
    serial: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "Version")]
    version: String,
}

impl DeviceRow {
    fn new(record: &DeviceRecord, color: bool) -> Self {
        let domain = output::domain_badge(record.domain, color);
        let controller = record.controller.clone().unwrap_or_default();
        match &record.body {
            RecordBody::Device(info) => Self {
                domain,
                controller,
                name: info.name.clone(),
                status: output::paint_status(&info.status, color),
                model: info.model.clone().unwrap_or_default(),
                serial: info.serial.clone().unwrap_or_default(),
                ip: info.ip.clone().unwrap_or_default(),
                version: info.version.clone().unwrap_or_default(),
            },
            RecordBody::Error { error } => Self {
                domain,
                controller,
                name: output::paint_error("ERROR", color),
                status: output::paint_error(error, color),
                model: String::new(),
                serial: String::new(),
                ip: String::new(),
                version: String::new(),
            },
        }
    }
}

#[derive(Tabled)]
struct ControllerRow {
    #[tabled(rename = "Domain")]
    domain: String,
    #[tabled(rename = "Controller")]
    controller: String,
    #[tabled(rename = "Devices")]
    devices: usize,
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn all(inventory: &Inventory, args: AllArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let entry = inventory.fetch_all(args.refresh).await;
    let mut records = entry.records.clone();
    query::sort_for_display(&mut records);
    print_records(&records, global)?;
    output::print_note(
        &format!(
            "{} records, fetched {}",
            records.len(),
            entry
                .fetched_at
                .with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M:%S")
        ),
        global.quiet || !matches!(global.output, OutputFormat::Table),
    );
    Ok(())
}

pub async fn domain(
    inventory: &Inventory,
    args: DomainArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let (domain, mut records) = inventory.fetch_domain(&args.keyword).await?;
    if records.is_empty() {
        output::print_note(&format!("No usable sites configured for {domain}"), global.quiet);
    }
    query::sort_for_display(&mut records);
    print_records(&records, global)
}

pub async fn search(
    inventory: &Inventory,
    args: SearchArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let mut records = inventory.search(&args.query).await;
    query::sort_for_display(&mut records);
    print_records(&records, global)
}

pub async fn unhealthy(inventory: &Inventory, global: &GlobalOpts) -> Result<(), CliError> {
    let mut records = inventory.unhealthy().await;
    query::sort_for_display(&mut records);
    print_records(&records, global)
}

pub async fn summary(
    inventory: &Inventory,
    args: SummaryArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if args.by_controller {
        let rows = inventory.controller_breakdown().await;
        let color = output::should_color(global.color);
        let out = output::render_list(
            global.output,
            &rows,
            |c: &ControllerCount| ControllerRow {
                domain: output::domain_badge(c.domain, color),
                controller: c.controller.clone(),
                devices: c.count,
            },
            |c| format!("{}\t{}", c.controller, c.count),
        )?;
        output::print_output(&out, global.quiet);
        return Ok(());
    }

    let summary = inventory.summary().await;
    let out = output::render_single(global.output, &summary, render_summary)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Rendering ───────────────────────────────────────────────────────

fn print_records(records: &[DeviceRecord], global: &GlobalOpts) -> Result<(), CliError> {
    let color = output::should_color(global.color);
    let out = output::render_list(
        global.output,
        records,
        |r| DeviceRow::new(r, color),
        |r| match r.device_info() {
            Some(info) => info.id.clone(),
            None => format!("error\t{}", r.error_message().unwrap_or_default()),
        },
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

fn render_summary(summary: &Summary) -> String {
    let mut lines = vec![format!("Total devices:  {}", summary.total_devices)];
    for domain in Domain::all() {
        let count = summary.by_domain.get(&domain).copied().unwrap_or(0);
        lines.push(format!("  {:<24}{count}", domain.to_string()));
    }
    lines.push(format!("Health issues:  {}", summary.health_issues));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_detail_lists_every_domain() {
        let text = render_summary(&Summary::default());
        assert!(text.contains("Total devices:  0"));
        assert!(text.contains("wan-overlay-controller"));
        assert!(text.contains("Health issues:  0"));
    }

    #[test]
    fn error_row_shows_message() {
        let rec = DeviceRecord::site_error(Domain::FabricController, "Site-B", "timed out");
        let row = DeviceRow::new(&rec, false);
        assert_eq!(row.name, "ERROR");
        assert_eq!(row.status, "timed out");
        assert_eq!(row.controller, "Site-B");
    }
}
