use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use survey_cli::types::{AnalyzeResult, ProcessResult, RunResult};
use survey_model::{ConformanceReport, IssueSeverity, Metric, Report};
use survey_transform::EtlSummary;

pub fn print_process_summary(result: &ProcessResult) {
    println!("Input: {}", result.input.display());
    match &result.output {
        Some(path) => println!("Canonical CSV: {}", path.display()),
        None => println!("Canonical CSV: (dry run, not written)"),
    }
    print_etl_table(&result.etl);
    print_issue_table(&result.conformance);
}

pub fn print_analyze_summary(result: &AnalyzeResult) {
    println!("Input: {}", result.input.display());
    if let Some(path) = &result.report_path {
        println!("Report: {}", path.display());
    }
    if let Some(path) = &result.chart_path {
        println!("Chart data: {}", path.display());
    }
    print_metric_table(&result.report);
    print_issue_table(&result.conformance);
}

pub fn print_run_summary(result: &RunResult) {
    println!("Input: {}", result.input.display());
    println!("SHA-256: {}", result.source_sha256);
    match &result.outputs {
        Some(outputs) => {
            println!("Output: {}", result.output_dir.display());
            println!("  {}", outputs.processed.display());
            println!("  {}", outputs.report.display());
            println!("  {}", outputs.chart_data.display());
        }
        None => println!("Output: (dry run, nothing written)"),
    }
    print_etl_table(&result.etl);
    print_metric_table(&result.report);
    print_issue_table(&result.conformance);
}

fn print_etl_table(summary: &EtlSummary) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Stage"),
        header_cell("Rows"),
        header_cell("Detail"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    let clean = &summary.clean;
    table.add_row(vec![
        Cell::new("Mapping"),
        dim_cell("-"),
        Cell::new(format!(
            "{} renamed, {} passed through",
            summary.mapping.renamed.len(),
            summary.mapping.passed_through.len()
        )),
    ]);
    table.add_row(vec![
        Cell::new("Input"),
        Cell::new(clean.input_rows),
        detail_cell(&clean.pii_dropped, "identity columns dropped"),
    ]);
    table.add_row(vec![
        Cell::new("Attention check"),
        removed_cell(clean.attention_failed),
        Cell::new("failed the sentinel question"),
    ]);
    table.add_row(vec![
        Cell::new("Semester"),
        removed_cell(clean.semester_dropped),
        Cell::new("no semester in 1..9"),
    ]);
    table.add_row(vec![
        Cell::new("Duplicates"),
        removed_cell(clean.duplicates_removed + summary.late_duplicates),
        Cell::new("identical responses"),
    ]);
    table.add_row(vec![
        Cell::new("Coercion"),
        dim_cell("-"),
        Cell::new(format!(
            "{} timestamps unparsed, {} GPA values rejected",
            summary.coerce.timestamps_unparsed, summary.coerce.gpa_rejected
        )),
    ]);
    table.add_row(vec![
        Cell::new("Likert"),
        dim_cell("-"),
        Cell::new(format!(
            "{} columns encoded, {} numeric, {} unrecognized answers",
            summary.likert.encoded.len(),
            summary.likert.numeric.len(),
            summary.likert.unrecognized
        )),
    ]);
    table.add_row(vec![
        Cell::new("Reverse coding"),
        dim_cell("-"),
        detail_cell(&summary.reverse.reversed, "none flipped"),
    ]);
    table.add_row(vec![
        Cell::new("Output")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(summary.output_rows).add_attribute(Attribute::Bold),
        dim_cell("canonical respondents"),
    ]);
    println!("{table}");
}

fn print_metric_table(report: &Report) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_table_style(&mut table);
    for (key, metric) in report.iter() {
        table.add_row(vec![Cell::new(key), metric_cell(metric)]);
    }
    println!();
    println!("{table}");
}

fn print_issue_table(report: &ConformanceReport) {
    if report.issues.is_empty() {
        return;
    }
    let mut issues: Vec<_> = report.issues.iter().collect();
    issues.sort_by(|a, b| {
        severity_rank(b.severity)
            .cmp(&severity_rank(a.severity))
            .then_with(|| a.code.cmp(&b.code))
    });
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Code"),
        header_cell("Column"),
        header_cell("Count"),
        header_cell("Message"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    for issue in issues {
        table.add_row(vec![
            severity_cell(issue.severity),
            Cell::new(&issue.code),
            issue
                .column
                .as_deref()
                .map_or_else(|| dim_cell("-"), Cell::new),
            issue
                .count
                .map_or_else(|| dim_cell("-"), |count| {
                    Cell::new(count).fg(severity_color(issue.severity))
                }),
            Cell::new(&issue.message),
        ]);
    }
    println!();
    println!("Conformance ({}):", report.dataset);
    println!("{table}");
}

fn metric_cell(metric: &Metric) -> Cell {
    match metric {
        Metric::Value(Some(value)) => Cell::new(format!("{value:.2}")),
        Metric::Value(None) => dim_cell("n/a"),
        Metric::Count(count) => Cell::new(count),
        Metric::Text(text) => Cell::new(text).add_attribute(Attribute::Bold),
        Metric::NotApplicable(reason) => Cell::new(reason).fg(Color::Yellow),
        Metric::Map(map) if map.is_empty() => dim_cell("(empty)"),
        Metric::Map(map) => {
            let lines: Vec<String> = map
                .iter()
                .map(|(key, value)| format!("{key}: {}", metric_text(value)))
                .collect();
            Cell::new(lines.join("\n"))
        }
    }
}

fn metric_text(metric: &Metric) -> String {
    match metric {
        Metric::Value(Some(value)) => format!("{value:.2}"),
        Metric::Value(None) => "n/a".to_string(),
        Metric::Count(count) => count.to_string(),
        Metric::Text(text) | Metric::NotApplicable(text) => text.clone(),
        Metric::Map(map) => format!("{} entries", map.len()),
    }
}

fn detail_cell(items: &[String], empty: &str) -> Cell {
    if items.is_empty() {
        dim_cell(empty)
    } else {
        Cell::new(items.join(", "))
    }
}

fn removed_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(format!("-{count}"))
            .fg(Color::Yellow)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell(0)
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    if table.column_count() >= 3 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(18)),
            ColumnConstraint::LowerBoundary(Width::Fixed(6)),
            ColumnConstraint::UpperBoundary(Width::Percentage(70)),
        ]);
    }
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
    if table.column_count() >= 5 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(9)),
            ColumnConstraint::UpperBoundary(Width::Fixed(8)),
            ColumnConstraint::UpperBoundary(Width::Fixed(28)),
            ColumnConstraint::LowerBoundary(Width::Fixed(5)),
            ColumnConstraint::UpperBoundary(Width::Percentage(55)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn severity_cell(severity: IssueSeverity) -> Cell {
    match severity {
        IssueSeverity::Error => Cell::new("ERROR")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        IssueSeverity::Warning => Cell::new("WARN").fg(Color::Yellow),
    }
}

fn severity_rank(severity: IssueSeverity) -> u8 {
    match severity {
        IssueSeverity::Error => 2,
        IssueSeverity::Warning => 1,
    }
}

fn severity_color(severity: IssueSeverity) -> Color {
    match severity {
        IssueSeverity::Error => Color::Red,
        IssueSeverity::Warning => Color::Yellow,
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
