//! Report formatting and printing utilities.
//!
//! The encoded diff is the only thing `diff` writes to stdout, so it can be
//! piped straight into `generate-source`; its status lines go to stderr.

use std::io::{self, Write};

use colored::Colorize;

use super::commands::{
    CommandResult, CommandSummary, DiffSummary, GenerateNamespaceSummary, GenerateSourceSummary,
    OutputStringsSummary,
};
use crate::core::resources::{MergeKind, MergedTable};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print(result: &CommandResult, verbose: bool) {
    let stdout = &mut io::stdout().lock();
    let stderr = &mut io::stderr().lock();

    match &result.summary {
        CommandSummary::Diff(summary) => {
            if !summary.encoded.is_empty() {
                let _ = writeln!(stdout, "{}", summary.encoded);
            }
            print_diff_status(summary, stderr);
        }
        CommandSummary::GenerateNamespace(summary) => print_namespace(summary, stdout),
        CommandSummary::GenerateSource(summary) => print_generate_source(summary, stdout, stderr),
        CommandSummary::OutputStrings(summary) => print_output_strings(summary, stdout, stderr),
        CommandSummary::Run(diff, source) => {
            print_duplicates(diff, stderr);
            print_skipped_references(diff, verbose, stderr);
            print_generate_source(source, stdout, stderr);
        }
    }
}

fn print_diff_status<W: Write>(summary: &DiffSummary, writer: &mut W) {
    print_duplicates(summary, writer);

    if summary.diff.changes.is_empty() {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Namespaces are up to date ({} definition {}, {} source {})",
                summary.definition_files,
                plural(summary.definition_files, "file", "files"),
                summary.scanned_files,
                plural(summary.scanned_files, "file", "files"),
            )
            .green()
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {} {} to update",
            FAILURE_MARK.red(),
            summary.diff.changes.len(),
            plural(summary.diff.changes.len(), "namespace", "namespaces"),
        );
    }
}

fn print_duplicates<W: Write>(summary: &DiffSummary, writer: &mut W) {
    for duplicate in &summary.duplicates {
        let _ = writeln!(
            writer,
            "{} {} is declared in {} and {}; using the first",
            "warning:".bold().yellow(),
            duplicate.name,
            duplicate.kept.display(),
            duplicate.ignored.display()
        );
    }
}

fn print_skipped_references<W: Write>(summary: &DiffSummary, verbose: bool, writer: &mut W) {
    let skipped = &summary.diff.skipped;
    if skipped.is_empty() {
        return;
    }
    let _ = writeln!(
        writer,
        "{} {} unresolved {} skipped{}",
        "warning:".bold().yellow(),
        skipped.len(),
        plural(skipped.len(), "reference", "references"),
        if verbose { ":" } else { " (use -v for details)" }
    );
    if verbose {
        for reference in skipped {
            let _ = writeln!(writer, "  - {}", reference);
        }
    }
}

fn print_namespace<W: Write>(summary: &GenerateNamespaceSummary, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Created namespace {} in {}",
            summary.name,
            summary.path.display()
        )
        .green()
    );
}

fn print_generate_source<O: Write, E: Write>(
    summary: &GenerateSourceSummary,
    out: &mut O,
    err: &mut E,
) {
    if let Some(decode_error) = &summary.decode_error {
        let _ = writeln!(
            err,
            "{} Could not decode the diff, nothing was generated: {}",
            "warning:".bold().yellow(),
            decode_error
        );
        return;
    }

    for (origin, namespace) in &summary.missing {
        let _ = writeln!(
            err,
            "{} {} no longer declares {}; skipped",
            "warning:".bold().yellow(),
            origin.display(),
            namespace
        );
    }

    if summary.rewritten.is_empty() {
        let _ = writeln!(
            out,
            "{} {}",
            SUCCESS_MARK.green(),
            "Nothing to generate".green()
        );
        return;
    }

    let _ = writeln!(
        out,
        "{} {} {}:",
        "Updated".green().bold(),
        summary.rewritten.len(),
        plural(summary.rewritten.len(), "namespace", "namespaces"),
    );
    for origin in &summary.rewritten {
        let _ = writeln!(out, "  - {}", origin.display());
    }
}

fn print_output_strings<O: Write, E: Write>(
    summary: &OutputStringsSummary,
    out: &mut O,
    err: &mut E,
) {
    for (path, reason) in &summary.skipped {
        let _ = writeln!(
            err,
            "{} Skipped malformed table {}: {}",
            "warning:".bold().yellow(),
            path.display(),
            reason
        );
    }

    for table in &summary.tables {
        print_table(table, out);
    }

    let _ = writeln!(
        out,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Wrote {} {}",
            summary.tables.len(),
            plural(summary.tables.len(), "table", "tables")
        )
        .green()
    );
}

fn print_table<W: Write>(merged: &MergedTable, writer: &mut W) {
    let stats = &merged.stats;
    let status = match merged.kind {
        MergeKind::Created => "Created".green().bold(),
        MergeKind::Updated if stats.is_unchanged() => "Unchanged".dimmed(),
        MergeKind::Updated => "Updated".cyan().bold(),
    };
    let mut details = Vec::new();
    if stats.added > 0 {
        details.push(format!("{} added", stats.added));
    }
    if stats.removed > 0 {
        details.push(format!("{} removed", stats.removed));
    }
    if stats.comments_refreshed > 0 {
        details.push(format!("{} comment(s) refreshed", stats.comments_refreshed));
    }

    if details.is_empty() {
        let _ = writeln!(writer, "{} {}", status, merged.path().display());
    } else {
        let _ = writeln!(
            writer,
            "{} {} ({})",
            status,
            merged.path().display(),
            details.join(", ")
        );
    }
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}
