use crate::error::Result;
use crate::table::{TableBuilder, cells};
use crate::ui;
use chrono::{DateTime, Utc};
use colored::Colorize;
use overpass_response::{DataStats, PayloadKind, QueryReport};

/// Print a report as a table, or as JSON when `json` is set
pub fn print_report(report: &QueryReport, json: bool) -> Result<()> {
    if json {
        println!("{}", render_json(report)?);
        return Ok(());
    }

    println!("{}", render_table(report));

    if let Some(message) = report.classification.payload.error_message() {
        ui::section_header("Error");
        for line in message.lines().filter(|l| !l.trim().is_empty()) {
            println!("  {}", line.red());
        }
        if !report.error_lines.is_empty() {
            ui::info_message(&format!(
                "Query lines with errors: {}",
                join_numbers(&report.error_lines)
            ));
        }
    }

    if report.classification.is_blank() {
        ui::blank_map_message(report.classification.empty_reason.description());
    } else {
        ui::success_message(&format!(
            "{} features ready to render",
            report.classification.renderable_features
        ));
    }

    Ok(())
}

pub fn render_json(report: &QueryReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

pub fn render_table(report: &QueryReport) -> String {
    let classification = &report.classification;
    let mut builder = TableBuilder::new();
    builder.headers(vec!["Field", "Value"]);

    builder.field("HTTP status", report.http_status.to_string());
    builder.field(
        "Content type",
        report.content_type.clone().unwrap_or_else(|| "-".to_string()),
    );
    builder.field(
        "Size",
        format!("{} ({} bytes)", report.size_text, report.size_bytes),
    );

    let kind = classification.payload_kind.to_string();
    let kind_cell = match classification.payload_kind {
        PayloadKind::Error => cells::error(kind),
        PayloadKind::Unknown => cells::muted(kind),
        PayloadKind::Json | PayloadKind::Xml => cells::success(kind),
    };
    builder.styled_row(vec![cells::bold("Payload"), kind_cell]);

    if matches!(
        classification.payload_kind,
        PayloadKind::Json | PayloadKind::Xml
    ) {
        builder.field("Elements", describe_stats(&classification.stats));
        builder.field(
            "Renderable features",
            classification.renderable_features.to_string(),
        );
    }

    let meta = &classification.meta;
    if let Some(timestamp) = meta.timestamp_osm_base {
        builder.field("Data timestamp", format_timestamp(timestamp));
    }
    if let Some(timestamp) = meta.timestamp_areas_base {
        builder.field("Areas timestamp", format_timestamp(timestamp));
    }
    if let Some(copyright) = &meta.copyright {
        builder.field("Copyright", copyright.clone());
    }

    if classification.is_blank() {
        builder.styled_row(vec![
            cells::bold("Map"),
            cells::muted(classification.empty_reason.description()),
        ]);
    }

    if report.is_large {
        builder.styled_row(vec![
            cells::bold("Warning"),
            cells::error("large response, rendering may be slow"),
        ]);
    }

    builder.build()
}

fn describe_stats(stats: &DataStats) -> String {
    format!(
        "{} nodes, {} ways, {} relations, {} areas",
        stats.nodes, stats.ways, stats.relations, stats.areas
    )
}

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

fn join_numbers(numbers: &[usize]) -> String {
    numbers
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
