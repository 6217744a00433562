//! CSV downloads for the DOW table and the intraday chart.

use log::warn;

use crate::models::{interval_label, AggregatedSeriesPoint, DowSummary, INTERVALS_PER_DAY};

/// Options for the DOW table export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CsvExportOptions {
    /// Append a `Total` footer row with each weekday's average total.
    pub include_totals_row: bool,
}

fn csv_writer() -> csv::Writer<Vec<u8>> {
    csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new())
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String, csv::Error> {
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    String::from_utf8(bytes)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e).into())
}

fn write_dow_csv(summaries: &[DowSummary], options: CsvExportOptions) -> Result<String, csv::Error> {
    let mut writer = csv_writer();

    let mut header = vec!["Time Interval".to_string()];
    header.extend(summaries.iter().map(|s| s.day_of_week.to_string()));
    header.push("Hourly Total".to_string());
    writer.write_record(&header)?;

    for i in 0..INTERVALS_PER_DAY {
        let mut row = vec![interval_label(i)];
        let mut slot_total = 0u64;
        for summary in summaries {
            let value = summary.average_intervals.get(i).copied().unwrap_or(0);
            let pct = summary.percentages_per_interval.get(i).copied().unwrap_or(0.0);
            slot_total += value;
            row.push(format!("{} ({:.1}%)", value, pct));
        }
        row.push(slot_total.to_string());
        writer.write_record(&row)?;
    }

    if options.include_totals_row {
        let mut row = vec!["Total".to_string()];
        row.extend(summaries.iter().map(|s| s.average_total.to_string()));
        row.push(summaries.iter().map(|s| s.average_total).sum::<u64>().to_string());
        writer.write_record(&row)?;
    }

    finish(writer)
}

/// Render DOW summaries as a CSV table.
///
/// Header `Time Interval,<weekdays…>,Hourly Total`, then one row per
/// half-hour slot with `"<value> (<pct>%)"` cells and the cross-weekday sum.
pub fn export_to_csv(summaries: &[DowSummary], options: CsvExportOptions) -> String {
    write_dow_csv(summaries, options).unwrap_or_else(|e| {
        warn!("Failed to render DOW CSV: {}", e);
        String::new()
    })
}

fn write_series_csv(series: &[AggregatedSeriesPoint]) -> Result<String, csv::Error> {
    let mut writer = csv_writer();
    writer.write_record(["Period", "Volume"])?;
    for point in series {
        writer.write_record([point.label.as_str(), point.value.to_string().as_str()])?;
    }
    finish(writer)
}

/// Render a chart series as `Period,Volume` rows.
pub fn export_series_to_csv(series: &[AggregatedSeriesPoint]) -> String {
    write_series_csv(series).unwrap_or_else(|e| {
        warn!("Failed to render series CSV: {}", e);
        String::new()
    })
}
