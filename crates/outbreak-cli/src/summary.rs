//! Per-location summary of an aligned run.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;

use outbreak_model::{FinalRow, Location};

/// One line of the summary table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationSummary {
    pub location: String,
    pub is_aggregate: bool,
    pub rows: usize,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub latest_confirmed: u64,
    pub latest_deaths: Option<u64>,
    /// Highest rank reached; negative when the threshold was never crossed.
    pub max_days_since_threshold: i64,
}

/// Summarize rows per location, in [`Location`] order.
pub fn summarize(rows: &[FinalRow]) -> Vec<LocationSummary> {
    let mut grouped: BTreeMap<&Location, Vec<&FinalRow>> = BTreeMap::new();
    for row in rows {
        grouped.entry(&row.location).or_default().push(row);
    }

    grouped
        .into_iter()
        .filter_map(|(location, rows)| {
            let first = rows.iter().min_by_key(|row| row.date)?;
            let last = rows.iter().max_by_key(|row| row.date)?;
            let max_rank = rows.iter().map(|row| row.days_since_threshold).max()?;
            Some(LocationSummary {
                location: location.to_string(),
                is_aggregate: location.is_aggregate,
                rows: rows.len(),
                first_date: first.date,
                last_date: last.date,
                latest_confirmed: last.confirmed,
                latest_deaths: last.deaths,
                max_days_since_threshold: max_rank,
            })
        })
        .collect()
}

/// Render the summary table. Totals are highlighted; locations that never
/// crossed the threshold are dimmed.
pub fn build_summary_table(summaries: &[LocationSummary]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Location"),
        header_cell("Rows"),
        header_cell("From"),
        header_cell("To"),
        header_cell("Confirmed"),
        header_cell("Deaths"),
        header_cell("Max days"),
    ]);
    apply_summary_table_style(&mut table);
    for index in [1, 4, 5, 6] {
        align_column(&mut table, index, CellAlignment::Right);
    }

    let mut total_rows = 0usize;
    for summary in summaries {
        total_rows += summary.rows;
        table.add_row(vec![
            location_cell(summary),
            Cell::new(summary.rows),
            Cell::new(summary.first_date),
            Cell::new(summary.last_date),
            Cell::new(summary.latest_confirmed),
            deaths_cell(summary.latest_deaths),
            rank_cell(summary.max_days_since_threshold),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_rows).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    table
}

/// Print the summary table to stderr so stdout stays pure CSV.
pub fn print_summary(summaries: &[LocationSummary]) {
    eprintln!("Locations: {}", summaries.len());
    eprintln!("{}", build_summary_table(summaries));
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn location_cell(summary: &LocationSummary) -> Cell {
    if summary.is_aggregate {
        Cell::new(&summary.location)
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new(&summary.location)
    }
}

fn deaths_cell(deaths: Option<u64>) -> Cell {
    match deaths {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn rank_cell(rank: i64) -> Cell {
    if rank < 0 {
        dim_cell(rank)
    } else {
        Cell::new(rank).fg(Color::Green)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
