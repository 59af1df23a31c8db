// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshsym Inc.

//! CLI output reporter with colored formatting

use crate::naming::Rename;
use crate::symmetry::{
    Classification, ClassificationReport, ClassificationTable, DiagnosticKind, PairingTable,
};
use colored::*;
use std::time::Duration;

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    fn rule() {
        println!("{}", "━".repeat(80).bright_black());
    }

    fn paint(classification: Classification, text: &str) -> ColoredString {
        if classification.is_paired() {
            return text.cyan();
        }
        match classification {
            Classification::Center => text.green(),
            Classification::PotentialSelfSymmetric => text.yellow(),
            _ => text.bright_black(),
        }
    }

    /// Full classification report, meshes grouped by classification
    pub fn report_classification(scene: &str, report: &ClassificationReport, duration: Duration) {
        println!();
        Self::rule();
        println!("{} {}", "Scene:".bold(), scene.cyan());
        Self::rule();

        for classification in Classification::ALL {
            let ids: Vec<_> = report.table.with_classification(classification).collect();
            if ids.is_empty() {
                continue;
            }
            println!(
                "\n{} {}",
                Self::paint(classification, classification.as_str()).bold(),
                format!("({})", ids.len()).bright_black()
            );
            for id in ids {
                let Some(entry) = report.table.get(id) else {
                    continue;
                };
                let partner = entry
                    .partner
                    .as_ref()
                    .map(|p| format!(" ↔ {}", p))
                    .unwrap_or_default();
                let pct = entry
                    .correspondence
                    .map(|c| format!(" {:.1}%", c))
                    .unwrap_or_default();
                println!(
                    "  {}{}{}",
                    Self::paint(classification, id.as_str()),
                    partner,
                    pct.bright_black()
                );
            }
        }

        Self::report_diagnostics(report);
        Self::report_summary(&report.table, duration);
    }

    /// Mirrored pairs in the order they were accepted
    pub fn report_pairs(scene: &str, pairs: &PairingTable) {
        println!();
        Self::rule();
        println!("{} {}", "Mirrored pairs:".bold(), scene.cyan());
        Self::rule();

        if pairs.is_empty() {
            println!("  {}", "No mirrored pairs found".bright_black());
        }
        for pair in pairs.iter() {
            println!(
                "  {} {} {}  {}",
                format!("L {}", pair.left).cyan(),
                "↔".bright_black(),
                format!("R {}", pair.right).cyan(),
                format!("{:.1}%", pair.correspondence).bright_black()
            );
        }
        Self::rule();
    }

    /// Proposed renames, old name first
    pub fn report_renames(plan: &[Rename]) {
        println!();
        Self::rule();
        println!("{} {}", "Rename plan:".bold(), format!("{} change(s)", plan.len()).cyan());
        Self::rule();

        for rename in plan {
            println!(
                "  {} {} {}",
                rename.current.bright_black(),
                "→".bright_black(),
                rename.proposed.green()
            );
        }
        Self::rule();
    }

    fn report_diagnostics(report: &ClassificationReport) {
        if report.diagnostics.is_empty() {
            return;
        }
        println!("\n{}", "Diagnostics:".bold());
        for diagnostic in &report.diagnostics {
            let line = diagnostic.to_string();
            match diagnostic.kind {
                DiagnosticKind::AmbiguousMatch | DiagnosticKind::Cancelled => {
                    println!("  {} {}", "⚠️ ".yellow(), line.yellow())
                }
                _ => println!("  {} {}", "❌".red(), line.red()),
            }
        }
    }

    fn report_summary(table: &ClassificationTable, duration: Duration) {
        println!("\n{}", "Summary:".bold());
        println!(
            "  {} {}  {} {}  {} {}  {} {}  {} {}",
            "Center:".bright_black(),
            table.count(Classification::Center).to_string().green(),
            "Left:".bright_black(),
            table.count(Classification::PairedLeft).to_string().cyan(),
            "Right:".bright_black(),
            table.count(Classification::PairedRight).to_string().cyan(),
            "Potential:".bright_black(),
            table
                .count(Classification::PotentialSelfSymmetric)
                .to_string()
                .yellow(),
            "Unique:".bright_black(),
            table.count(Classification::Unique).to_string()
        );
        println!(
            "  {} {}",
            "Time:".bright_black(),
            Self::format_duration(duration).yellow()
        );
        Self::rule();
    }

    /// Report error
    pub fn report_error(message: &str) {
        eprintln!("\n{} {}", "❌ Error:".red().bold(), message);
    }

    /// Report warning
    pub fn report_warning(message: &str) {
        println!("\n{} {}", "⚠️  Warning:".yellow().bold(), message);
    }

    /// Report info
    pub fn report_info(message: &str) {
        println!("{} {}", "ℹ️".bright_blue(), message);
    }

    /// Print success message
    pub fn success(message: &str) {
        println!("{} {}", "✅".green(), message.green());
    }

    /// Format duration for display
    fn format_duration(duration: Duration) -> String {
        let micros = duration.as_micros();

        if micros < 1_000 {
            format!("{}µs", micros)
        } else if micros < 1_000_000 {
            format!("{:.2}ms", micros as f64 / 1_000.0)
        } else {
            format!("{:.2}s", micros as f64 / 1_000_000.0)
        }
    }
}
