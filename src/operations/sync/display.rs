//! Printing sync plans and reports

use console::Style;

use crate::domain::ItemId;
use crate::operations::sync::orchestrator::SyncPlan;
use crate::operations::sync::report::SyncReport;

/// Print what a sync would do
pub fn print_plan(plan: &SyncPlan) {
    println!(
        "{} {} item(s) in {} line(s), {} up to date",
        Style::new().bold().apply_to("Resolved"),
        plan.target.len(),
        plan.manifest.len(),
        plan.up_to_date()
    );

    if plan.is_empty() {
        println!("  {}", Style::new().green().apply_to("Nothing to install"));
    } else {
        println!("  {}", Style::new().bold().apply_to("Would install:"));
        for id in &plan.to_sync {
            let title = plan.target.get(id).map_or("", |d| d.title.as_str());
            println!(
                "    {} {}",
                Style::new().cyan().apply_to(id),
                Style::new().dim().apply_to(title)
            );
        }
    }

    print_stale(&plan.stale);
}

/// Print the outcome of a sync
pub fn print_report(report: &SyncReport) {
    println!(
        "{} {} item(s), {} up to date",
        Style::new().bold().apply_to("Resolved"),
        report.closure_size,
        report.up_to_date
    );

    if !report.installed.is_empty() {
        println!("  {}", Style::new().bold().apply_to("Installed:"));
        for item in &report.installed {
            println!(
                "    {} {}",
                Style::new().green().apply_to(&item.id),
                item.title
            );
        }
    }

    if !report.failed.is_empty() {
        println!("  {}", Style::new().bold().red().apply_to("Failed:"));
        for item in &report.failed {
            println!(
                "    {} {} {}",
                Style::new().red().apply_to(&item.id),
                item.title,
                Style::new().dim().apply_to(&item.reason)
            );
        }
    }

    print_lines(report);
    print_stale(&report.stale);

    if report.is_complete() {
        println!("{}", Style::new().green().apply_to("All items installed and lines written"));
    } else {
        println!(
            "{}",
            Style::new()
                .yellow()
                .apply_to("Some items failed; affected lines were left out")
        );
    }
}

fn print_lines(report: &SyncReport) {
    if !report.written_lines.is_empty() {
        println!(
            "  {} {}",
            Style::new().bold().apply_to("Lines:"),
            report.written_lines.join(", ")
        );
    }
    for omitted in &report.omitted_lines {
        let missing: Vec<&str> = omitted.missing.iter().map(ItemId::as_str).collect();
        println!(
            "  {} {} (missing {})",
            Style::new().yellow().apply_to("Omitted line:"),
            omitted.name,
            missing.join(", ")
        );
    }
}

fn print_stale(stale: &[ItemId]) {
    if stale.is_empty() {
        return;
    }
    println!(
        "  {}",
        Style::new()
            .dim()
            .apply_to("No longer in the manifest (left on disk):")
    );
    for id in stale {
        println!("    {}", Style::new().dim().apply_to(id));
    }
}
