//! Summary printing.

use std::io::{self, Write};

use ietf_info_classify::RunReport;
use ietf_info_core::Category;

const SUMMARY: &[Category] = &[
    Category::Authored,
    Category::Shepherded,
    Category::ResponsibleApprover,
    Category::Balloted,
    Category::Objected,
    Category::Acknowledged,
];

/// Write the per-category counts, and with `verbose` every RFC under each.
pub fn print_report(
    out: &mut impl Write,
    report: &RunReport,
    name: &str,
    verbose: bool,
) -> io::Result<()> {
    for number in &report.not_found {
        writeln!(out, "{number}: Name not found")?;
    }

    writeln!(out)?;
    writeln!(out, "Search for name {name}:")?;
    writeln!(out)?;

    for &category in SUMMARY {
        print_category(out, report, category, verbose)?;
    }
    if report.count(Category::Failed) > 0 {
        print_category(out, report, Category::Failed, verbose)?;
    }

    writeln!(out, "finished in {:.2} s", report.elapsed.as_secs_f64())
}

fn print_category(
    out: &mut impl Write,
    report: &RunReport,
    category: Category,
    verbose: bool,
) -> io::Result<()> {
    writeln!(out, "{}: {}", category.label(), report.count(category))?;
    if verbose && let Some(entries) = report.entries(category) {
        for (number, title) in entries {
            writeln!(out, "  {number}: {title}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}
