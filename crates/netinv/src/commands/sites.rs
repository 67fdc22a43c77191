//! Site registry command handlers.

use std::path::Path;

use serde::Serialize;
use tabled::Tabled;

use netinv_core::{Domain, SiteDescriptor, SiteRegistry};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

/// One registry entry as reported by `netinv sites`.
#[derive(Debug, Serialize)]
struct SiteStatus {
    domain: Domain,
    name: String,
    address: String,
    auth: &'static str,
    ready: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    problem: Option<String>,
}

impl SiteStatus {
    fn new(domain: Domain, index: usize, desc: &SiteDescriptor, default_insecure: bool) -> Self {
        let validated = desc.validate(domain, index, default_insecure);
        let (name, address, problem) = match &validated {
            Ok(site) => (site.name.clone(), site.address.clone(), None),
            Err(e) => (
                desc.name
                    .clone()
                    .unwrap_or_else(|| format!("site-{}", index + 1)),
                desc.address.clone().unwrap_or_default(),
                Some(e.to_string()),
            ),
        };
        Self {
            domain,
            name,
            address,
            auth: if domain == Domain::CloudAccessController {
                "api-key"
            } else {
                "password"
            },
            ready: problem.is_none(),
            problem,
        }
    }
}

#[derive(Tabled)]
struct SiteRow {
    #[tabled(rename = "Domain")]
    domain: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Auth")]
    auth: String,
    #[tabled(rename = "State")]
    state: String,
}

pub fn list(registry: &SiteRegistry, path: &Path, global: &GlobalOpts) -> Result<(), CliError> {
    let statuses: Vec<SiteStatus> = Domain::all()
        .flat_map(|domain| {
            registry
                .descriptors(domain)
                .iter()
                .enumerate()
                .map(move |(i, desc)| SiteStatus::new(domain, i, desc, registry.default_insecure()))
        })
        .collect();

    if statuses.is_empty() {
        output::print_note(
            &format!("No sites configured in {}", path.display()),
            global.quiet,
        );
    }

    let color = output::should_color(global.color);
    let out = output::render_list(
        global.output,
        &statuses,
        |s| SiteRow {
            domain: output::domain_badge(s.domain.into(), color),
            name: s.name.clone(),
            address: s.address.clone(),
            auth: s.auth.to_owned(),
            state: match &s.problem {
                None => output::paint_status("ready", color),
                Some(problem) => output::paint_error(problem, color),
            },
        },
        |s| format!("{}\t{}", s.domain, s.name),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incomplete_site_reports_missing_field() {
        let desc = SiteDescriptor {
            name: Some("Corp-Org".into()),
            org_id: Some("42".into()),
            ..SiteDescriptor::default()
        };
        let status = SiteStatus::new(Domain::CloudAccessController, 0, &desc, true);
        assert!(!status.ready);
        assert!(status.problem.unwrap_or_default().contains("api_key"));
        assert_eq!(status.auth, "api-key");
    }
}
