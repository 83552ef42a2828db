use crate::core::errors::SimError;
use crate::core::types::DayInput;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Sample input in the accepted format
pub const SAMPLE_CSV: &str = "Date,Production Cycle Time,Number of Production Lines,Number of New Customer Orders\n\
2023-01-01,5,3,10\n\
2023-01-02,5,3,8\n\
2023-01-03,5,3,12\n";

const DATE: &str = "date";
const CYCLE_TIME: &str = "production_cycle_time";
const LINES: &str = "number_of_production_lines";
const NEW_ORDERS: &str = "number_of_new_customer_orders";

/// One data row: a typed day, or the reason it could not be typed
#[derive(Debug, Clone, PartialEq)]
pub struct DayRecord {
    /// 1-based data row number, header excluded
    pub row: usize,
    pub input: Result<DayInput, SimError>,
}

/// Column positions resolved from the header
struct Columns {
    date: usize,
    cycle_time: usize,
    lines: usize,
    new_orders: usize,
}

fn normalize_header(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Result<Self, SimError> {
        if headers.iter().all(|h| h.trim().is_empty()) {
            return Err(SimError::SourceUnavailable("the file is empty".to_string()));
        }
        let names: Vec<String> = headers.iter().map(normalize_header).collect();
        let find = |wanted: &str| {
            names.iter().position(|n| n == wanted).ok_or_else(|| {
                SimError::SourceUnavailable(format!("missing required column '{}'", wanted))
            })
        };

        Ok(Self {
            date: find(DATE)?,
            cycle_time: find(CYCLE_TIME)?,
            lines: find(LINES)?,
            new_orders: find(NEW_ORDERS)?,
        })
    }
}

/// Load day records from a CSV file.
///
/// Fails with `SourceUnavailable` when the file cannot be opened or has no
/// usable header. Bad rows come back as row-level `InvalidInput`.
pub fn load_days<P: AsRef<Path>>(path: P) -> Result<Vec<DayRecord>, SimError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        SimError::SourceUnavailable(format!("cannot open {}: {}", path.display(), e))
    })?;
    read_days(file)
}

/// Load day records from any CSV reader
pub fn read_days<R: Read>(reader: R) -> Result<Vec<DayRecord>, SimError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| SimError::SourceUnavailable(format!("cannot parse header: {}", e)))?
        .clone();
    let columns = Columns::resolve(&headers)?;

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let row = idx + 1;
        let input = match result {
            Ok(record) => parse_row(&columns, &record, row),
            Err(e) => Err(SimError::invalid(format!("row {}", row), e.to_string())),
        };
        records.push(DayRecord { row, input });
    }
    Ok(records)
}

fn parse_row(columns: &Columns, record: &StringRecord, row: usize) -> Result<DayInput, SimError> {
    let label = match record.get(columns.date) {
        Some(date) if !date.is_empty() => date.to_string(),
        _ => format!("row {}", row),
    };

    let field = |idx: usize, name: &str| {
        record
            .get(idx)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| SimError::invalid(&label, format!("missing value for '{}'", name)))
    };

    let cycle_time = parse_whole(field(columns.cycle_time, CYCLE_TIME)?, CYCLE_TIME, &label)?;
    let num_lines = parse_whole(field(columns.lines, LINES)?, LINES, &label)?;
    let new_orders = field(columns.new_orders, NEW_ORDERS)?
        .parse::<f64>()
        .map_err(|_| SimError::invalid(&label, format!("'{}' is not a number", NEW_ORDERS)))?;

    Ok(DayInput {
        label,
        cycle_time,
        num_lines,
        new_orders,
    })
}

/// Parse an integer, accepting whole-valued decimals such as `5.0`
fn parse_whole(value: &str, name: &str, label: &str) -> Result<i64, SimError> {
    if let Ok(v) = value.parse::<i64>() {
        return Ok(v);
    }
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() && v.fract() == 0.0 => Ok(v as i64),
        _ => Err(SimError::invalid(label, format!("'{}' is not a whole number: {}", name, value))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_sample_parses() {
        let records = read_days(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].row, 1);
        assert_eq!(
            records[0].input,
            Ok(DayInput::new("2023-01-01", 5, 3, 10.0))
        );
        assert_eq!(records[2].input, Ok(DayInput::new("2023-01-03", 5, 3, 12.0)));
    }

    #[test]
    fn test_header_variants_and_column_order() {
        let csv = "number_of_new_customer_orders, DATE ,Production_Cycle_Time,Number of production lines\n2.5,d1,4.0,2\n";
        let records = read_days(csv.as_bytes()).unwrap();
        assert_eq!(records[0].input, Ok(DayInput::new("d1", 4, 2, 2.5)));
    }

    #[test]
    fn test_bad_rows_are_row_level_errors() {
        let csv = "Date,Production Cycle Time,Number of Production Lines,Number of New Customer Orders\n\
                   2023-01-01,five,3,10\n\
                   2023-01-02,5,,8\n\
                   2023-01-03,5,3\n\
                   2023-01-04,5,3,12\n";
        let records = read_days(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 4);

        for record in &records[..3] {
            assert!(matches!(record.input, Err(SimError::InvalidInput { .. })));
        }
        assert_eq!(records[3].input, Ok(DayInput::new("2023-01-04", 5, 3, 12.0)));
    }

    #[test]
    fn test_out_of_range_values_are_typed_not_rejected() {
        // Range checks belong to the engine, not the loader
        let csv = "Date,Production Cycle Time,Number of Production Lines,Number of New Customer Orders\n2023-01-01,0,-1,-4\n";
        let records = read_days(csv.as_bytes()).unwrap();
        assert_eq!(records[0].input, Ok(DayInput::new("2023-01-01", 0, -1, -4.0)));
    }

    #[test]
    fn test_missing_column_is_source_unavailable() {
        let csv = "Date,Production Cycle Time,Number of New Customer Orders\n2023-01-01,5,10\n";
        let err = read_days(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, SimError::SourceUnavailable(_)));
        assert!(err.to_string().contains(LINES));
    }

    #[test]
    fn test_empty_input_is_source_unavailable() {
        let err = read_days("".as_bytes()).unwrap_err();
        assert!(matches!(err, SimError::SourceUnavailable(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", SAMPLE_CSV).unwrap();

        let records = load_days(temp_file.path()).unwrap();
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.input.is_ok()));
    }

    #[test]
    fn test_missing_file_is_source_unavailable() {
        let err = load_days("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, SimError::SourceUnavailable(_)));
    }
}
