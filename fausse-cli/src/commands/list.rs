//! List command implementation.
//!
//! This module implements the `list` command, which displays stored
//! reservations in various formats (table, JSON, CSV, TSV).

use crate::error::CliError;
use crate::utils::{
    format_timestamp, load_configuration, open_database, parse_date_arg, GlobalOptions,
};
use clap::{Args, ValueEnum};
use fausse::slot::{DATE_FORMAT, TIME_FORMAT};
use fausse::{Database, Reservation};
use std::io::Write;

/// Column headers for CSV/TSV output.
const COLUMN_HEADERS: [&str; 10] = [
    "id",
    "date",
    "time",
    "party_size",
    "name",
    "email",
    "phone",
    "table",
    "status",
    "created_at",
];

/// List reservations.
#[derive(Args)]
pub struct ListCommand {
    /// Output format
    #[arg(
        long,
        value_enum,
        default_value = "table",
        env = "FAUSSE_OUTPUT_FORMAT",
        ignore_case = true
    )]
    pub format: OutputFormat,

    /// Only show reservations on this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub date: Option<String>,

    /// Include cancelled reservations
    #[arg(long)]
    pub all: bool,
}

/// Output format for list command.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tab-separated table format (human-readable)
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// TSV format (tab-separated values)
    Tsv,
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // 1. Load configuration
        let config = load_configuration(global)?;

        // 2. Open database
        let db = open_database(global, &config)?;

        // 3. Query reservations
        let mut reservations = match &self.date {
            Some(raw) => Database::list_reservations_on(db.connection(), parse_date_arg(raw)?)?,
            None => Database::list_all_reservations(db.connection())?,
        };

        // 4. Apply filters
        if !self.all {
            reservations.retain(Reservation::counts_against_capacity);
        }

        // 5. Format and output to stdout
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        match self.format {
            OutputFormat::Table => format_as_table(&mut handle, &reservations)?,
            OutputFormat::Json => format_as_json(&mut handle, &reservations)?,
            OutputFormat::Csv => format_as_delimited(&mut handle, &reservations, b',')?,
            OutputFormat::Tsv => format_as_delimited(&mut handle, &reservations, b'\t')?,
        }

        Ok(())
    }
}

fn row(res: &Reservation) -> [String; 10] {
    let slot = res.slot();
    [
        res.id().to_string(),
        slot.date().format(DATE_FORMAT).to_string(),
        slot.time().format(TIME_FORMAT).to_string(),
        res.party_size().to_string(),
        res.name().to_string(),
        res.email().to_string(),
        res.phone().unwrap_or("").to_string(),
        res.table().map(|t| t.to_string()).unwrap_or_default(),
        res.status().to_string(),
        format_timestamp(res.created_at()),
    ]
}

/// Format reservations as a human-readable table.
fn format_as_table<W: Write>(out: &mut W, reservations: &[Reservation]) -> Result<(), CliError> {
    // Print header (uppercase for table display)
    let header_line = COLUMN_HEADERS
        .iter()
        .map(|s| s.to_uppercase())
        .collect::<Vec<_>>()
        .join("\t");
    writeln!(out, "{header_line}")?;

    for res in reservations {
        let cells = row(res).map(|cell| if cell.is_empty() { "-".to_string() } else { cell });
        writeln!(out, "{}", cells.join("\t"))?;
    }

    Ok(())
}

/// Format reservations as JSON.
fn format_as_json<W: Write>(out: &mut W, reservations: &[Reservation]) -> Result<(), CliError> {
    let json_data: Vec<serde_json::Value> = reservations
        .iter()
        .map(|r| {
            let slot = r.slot();
            serde_json::json!({
                "id": r.id().value(),
                "date": slot.date().format(DATE_FORMAT).to_string(),
                "time": slot.time().format(TIME_FORMAT).to_string(),
                "party_size": r.party_size().value(),
                "name": r.name(),
                "email": r.email(),
                "phone": r.phone(),
                "table": r.table(),
                "status": r.status().as_str(),
                "created_at": r.created_at().to_rfc3339(),
            })
        })
        .collect();

    serde_json::to_writer_pretty(&mut *out, &json_data).map_err(|e| CliError::Io(e.into()))?;
    writeln!(out)?;

    Ok(())
}

/// Convert csv::Error to CliError.
fn csv_error(e: csv::Error) -> CliError {
    CliError::Io(std::io::Error::other(e))
}

/// Format reservations as delimited output (CSV or TSV).
fn format_as_delimited<W: Write>(
    out: &mut W,
    reservations: &[Reservation],
    delimiter: u8,
) -> Result<(), CliError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(out);

    writer.write_record(COLUMN_HEADERS).map_err(csv_error)?;
    for res in reservations {
        writer.write_record(row(res)).map_err(csv_error)?;
    }

    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use fausse::{AvailabilityChecker, BookingPolicy, NewReservation, PartySize, Slot};

    fn sample() -> Vec<Reservation> {
        let mut db = Database::open_in_memory().unwrap();
        let checker = AvailabilityChecker::new(BookingPolicy::default());
        let slot = Slot::new(
            NaiveDate::from_ymd_opt(2030, 6, 1).unwrap(),
            chrono::NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
        );
        let draft = NewReservation::builder(
            "Avery, Chen",
            "avery@example.com",
            PartySize::try_from(4_u32).unwrap(),
            slot,
        )
        .build()
        .unwrap();
        vec![db.reserve_atomic(&draft, &checker, Utc::now()).unwrap()]
    }

    #[test]
    fn test_table_uses_dash_for_missing_values() {
        let mut out = Vec::new();
        format_as_table(&mut out, &sample()).unwrap();
        let text = String::from_utf8(out).unwrap();

        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with("ID\tDATE\tTIME"));
        let row = lines.next().unwrap();
        assert!(row.starts_with("1\t2030-06-01\t19:00\t4\tAvery, Chen"));
        assert!(row.contains("\t-\t1\tconfirmed\t"));
    }

    #[test]
    fn test_csv_quotes_commas() {
        let mut out = Vec::new();
        format_as_delimited(&mut out, &sample(), b',').unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\"Avery, Chen\""));
    }

    #[test]
    fn test_json_is_parseable() {
        let mut out = Vec::new();
        format_as_json(&mut out, &sample()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["table"], 1);
        assert_eq!(value[0]["status"], "confirmed");
        assert_eq!(value[0]["phone"], serde_json::Value::Null);
    }
}
