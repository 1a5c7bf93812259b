use crate::error::{DashboardError, Result};
use crate::models::{ClimateRecord, Dataset, Measurement};
use crate::utils::constants::{
    COL_DAY, COL_LAT, COL_LON, COL_MONTH, COL_YEAR, POWER_HEADER_BEGIN, POWER_HEADER_END,
};
use encoding_rs::{Encoding, WINDOWS_1252};
use std::borrow::Cow;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// Reads NASA POWER style CSV exports into a schema-checked [`Dataset`].
pub struct ClimateCsvReader {
    delimiter: u8,
}

struct ColumnIndex {
    year: usize,
    month: usize,
    day: usize,
    latitude: usize,
    longitude: usize,
    measurements: Vec<(Measurement, usize)>,
}

impl ClimateCsvReader {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn read_path(&self, path: &Path) -> Result<Dataset> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("upload")
            .to_string();
        self.read_bytes(&name, &bytes)
    }

    /// Parse an uploaded file held in memory.
    pub fn read_bytes(&self, name: &str, bytes: &[u8]) -> Result<Dataset> {
        let decoded = decode_upload(bytes);
        let text: &str = &decoded;
        let body = strip_power_preamble(text)?;

        let dataset = self.parse(name, body)?;
        info!(
            dataset = name,
            records = dataset.len(),
            columns = ?dataset.column_names(),
            "loaded dataset"
        );
        Ok(dataset)
    }

    fn parse(&self, name: &str, body: &str) -> Result<Dataset> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(csv::Trim::All)
            .from_reader(body.as_bytes());

        let headers = reader.headers()?.clone();
        let index = index_columns(&headers)?;
        debug!(
            dataset = name,
            measurements = ?index.measurements.iter().map(|(m, _)| m.column_name()).collect::<Vec<_>>(),
            "resolved schema"
        );

        let mut records = Vec::new();
        for (row, result) in reader.records().enumerate() {
            let row_data = result?;
            // Header is line 1, so the first data row is line 2.
            let line = row + 2;

            let mut builder = ClimateRecord::builder()
                .ymd(
                    parse_field(&row_data, index.year, COL_YEAR, line)?,
                    parse_field(&row_data, index.month, COL_MONTH, line)?,
                    parse_field(&row_data, index.day, COL_DAY, line)?,
                )
                .coordinates(
                    parse_number(&row_data, index.latitude, COL_LAT, line)?,
                    parse_number(&row_data, index.longitude, COL_LON, line)?,
                );

            for (measurement, idx) in &index.measurements {
                let value = parse_number(&row_data, *idx, measurement.source_column(), line)?;
                builder = builder.value(*measurement, value);
            }

            let record = builder.build().map_err(|e| match e {
                DashboardError::InvalidFormat(msg) => {
                    DashboardError::InvalidFormat(format!("{}: line {}: {}", name, line, msg))
                }
                other => other,
            })?;
            records.push(record);
        }

        let schema = index.measurements.iter().map(|(m, _)| *m).collect();
        Dataset::new(name, schema, records)
    }
}

impl Default for ClimateCsvReader {
    fn default() -> Self {
        Self::new()
    }
}

fn index_columns(headers: &csv::StringRecord) -> Result<ColumnIndex> {
    let available: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    let position = |column: &str| {
        headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| DashboardError::MissingColumn {
                column: column.to_string(),
                available: available.clone(),
            })
    };

    let mut measurements: Vec<(Measurement, usize)> = Vec::new();
    for (idx, header) in headers.iter().enumerate() {
        if let Some(measurement) = Measurement::from_column(header) {
            if !measurements.iter().any(|(m, _)| *m == measurement) {
                measurements.push((measurement, idx));
            }
        }
    }

    let index = ColumnIndex {
        year: position(COL_YEAR)?,
        month: position(COL_MONTH)?,
        day: position(COL_DAY)?,
        latitude: position(COL_LAT)?,
        longitude: position(COL_LON)?,
        measurements,
    };

    if index.measurements.is_empty() {
        let known: Vec<&str> = Measurement::ALL.iter().map(|m| m.source_column()).collect();
        return Err(DashboardError::MissingColumn {
            column: format!("any of {}", known.join(", ")),
            available,
        });
    }

    Ok(index)
}

fn parse_field<T: FromStr>(
    row: &csv::StringRecord,
    idx: usize,
    column: &str,
    line: usize,
) -> Result<T> {
    let raw = row.get(idx).unwrap_or("");
    raw.parse::<T>().map_err(|_| {
        DashboardError::InvalidFormat(format!(
            "line {}: invalid {} value '{}'",
            line, column, raw
        ))
    })
}

/// Like [`parse_field`], but `NaN` and infinities are rejected too.
fn parse_number(row: &csv::StringRecord, idx: usize, column: &str, line: usize) -> Result<f64> {
    let value: f64 = parse_field(row, idx, column, line)?;
    if !value.is_finite() {
        return Err(DashboardError::InvalidFormat(format!(
            "line {}: non-finite {} value '{}'",
            line,
            column,
            row.get(idx).unwrap_or("")
        )));
    }
    Ok(value)
}

/// Decode upload bytes: honour a BOM, else UTF-8, else Windows-1252.
pub fn decode_upload(bytes: &[u8]) -> Cow<'_, str> {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (text, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return text;
    }

    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => {
            let (text, _, _) = WINDOWS_1252.decode(bytes);
            text
        }
    }
}

/// Drop a `-BEGIN HEADER-` … `-END HEADER-` block if the file starts with one.
pub fn strip_power_preamble(text: &str) -> Result<&str> {
    if !text.trim_start().starts_with(POWER_HEADER_BEGIN) {
        return Ok(text);
    }

    match text.find(POWER_HEADER_END) {
        Some(pos) => Ok(text[pos + POWER_HEADER_END.len()..]
            .trim_start_matches(|c: char| c == '\r' || c == '\n')),
        None => Err(DashboardError::InvalidFormat(format!(
            "header block opened with '{}' but never closed",
            POWER_HEADER_BEGIN
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const UNIFIED: &str = "\
YEAR,MO,DY,LAT,LON,ALLSKY_KT,ALLSKY_SFC_SW_DWN
2022,1,1,4.5,-74.25,0.52,5.01
2022,1,2,4.5,-74.25,0.61,5.44
";

    #[test]
    fn test_read_unified_bytes() -> Result<()> {
        let dataset = ClimateCsvReader::new().read_bytes("unified.csv", UNIFIED.as_bytes())?;

        assert_eq!(dataset.len(), 2);
        assert_eq!(
            dataset.schema(),
            &[Measurement::SolarIrradiance, Measurement::ClarityIndex]
        );
        let first = &dataset.records()[0];
        assert_eq!(first.date.to_string(), "2022-01-01");
        assert_eq!(first.value(Measurement::ClarityIndex), Some(5.01));
        Ok(())
    }

    #[test]
    fn test_source_columns_are_renamed_on_load() -> Result<()> {
        let csv = "YEAR,MO,DY,LAT,LON,RH2M\n2021,7,4,3.0,-76.5,82.1\n";
        let dataset = ClimateCsvReader::new().read_bytes("humidity.csv", csv.as_bytes())?;

        assert!(dataset.has(Measurement::Humidity));
        assert!(dataset.column_names().contains(&"humidity".to_string()));
        assert!(!dataset.column_names().contains(&"RH2M".to_string()));
        Ok(())
    }

    #[test]
    fn test_non_finite_cells_are_rejected() {
        let reader = ClimateCsvReader::new();
        let nan_value = "YEAR,MO,DY,LAT,LON,RH2M\n2022,1,1,4.0,-74.0,60\n2022,1,1,5.0,-75.0,NaN\n";
        let err = reader
            .read_bytes("humidity.csv", nan_value.as_bytes())
            .unwrap_err();
        match err {
            DashboardError::InvalidFormat(msg) => {
                assert!(msg.contains("line 3"), "{}", msg);
                assert!(msg.contains("RH2M"), "{}", msg);
            }
            other => panic!("unexpected error: {:?}", other),
        }

        let inf_coordinate = "YEAR,MO,DY,LAT,LON,RH2M\n2022,1,1,inf,-74.0,60\n";
        assert!(matches!(
            reader.read_bytes("humidity.csv", inf_coordinate.as_bytes()),
            Err(DashboardError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_missing_required_column() {
        let csv = "YEAR,MO,LAT,LON,T2M\n2021,7,3.0,-76.5,24.0\n";
        match ClimateCsvReader::new().read_bytes("temp.csv", csv.as_bytes()) {
            Err(DashboardError::MissingColumn { column, .. }) => assert_eq!(column, "DY"),
            other => panic!("expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_no_measurement_column() {
        let csv = "YEAR,MO,DY,LAT,LON,WS10M\n2021,7,4,3.0,-76.5,2.2\n";
        assert!(matches!(
            ClimateCsvReader::new().read_bytes("wind.csv", csv.as_bytes()),
            Err(DashboardError::MissingColumn { .. })
        ));
    }

    #[test]
    fn test_bad_cell_reports_line() {
        let csv = "YEAR,MO,DY,LAT,LON,T2M\n2021,7,4,3.0,-76.5,24.0\n2021,7,5,3.0,-76.5,warm\n";
        match ClimateCsvReader::new().read_bytes("temp.csv", csv.as_bytes()) {
            Err(DashboardError::InvalidFormat(msg)) => {
                assert!(msg.contains("line 3"), "{}", msg);
                assert!(msg.contains("T2M"), "{}", msg);
            }
            other => panic!("expected InvalidFormat, got {:?}", other),
        }
    }

    #[test]
    fn test_impossible_date_is_rejected() {
        let csv = "YEAR,MO,DY,LAT,LON,T2M\n2021,2,29,3.0,-76.5,24.0\n";
        assert!(matches!(
            ClimateCsvReader::new().read_bytes("temp.csv", csv.as_bytes()),
            Err(DashboardError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_power_preamble_is_skipped() -> Result<()> {
        let csv = "\
-BEGIN HEADER-
NASA/POWER CERES/MERRA2 Native Resolution Daily Data
PRECTOTCORR     MERRA-2 Precipitation Corrected (mm/day)
-END HEADER-
YEAR,MO,DY,LAT,LON,PRECTOTCORR
2020,3,1,6.25,-75.5,3.4
";
        let dataset = ClimateCsvReader::new().read_bytes("precip.csv", csv.as_bytes())?;
        assert_eq!(dataset.len(), 1);
        assert!(dataset.has(Measurement::Precipitation));
        Ok(())
    }

    #[test]
    fn test_unclosed_preamble_fails() {
        let csv = "-BEGIN HEADER-\nYEAR,MO,DY,LAT,LON,T2M\n";
        assert!(ClimateCsvReader::new()
            .read_bytes("t.csv", csv.as_bytes())
            .is_err());
    }

    #[test]
    fn test_decode_handles_bom_and_latin1() {
        let with_bom = b"\xEF\xBB\xBFYEAR";
        assert_eq!(decode_upload(with_bom), "YEAR");

        // "Pacífico" in Windows-1252
        let latin1 = b"Pac\xEDfico";
        assert_eq!(decode_upload(latin1), "Pacífico");
    }

    #[test]
    fn test_semicolon_delimiter() -> Result<()> {
        let csv = "YEAR;MO;DY;LAT;LON;T2M\n2021;7;4;3.0;-76.5;24.0\n";
        let dataset = ClimateCsvReader::new()
            .with_delimiter(b';')
            .read_bytes("temp.csv", csv.as_bytes())?;
        assert_eq!(dataset.values(Measurement::Temperature)?, vec![24.0]);
        Ok(())
    }

    #[test]
    fn test_read_path() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        write!(temp_file, "{}", UNIFIED)?;

        let dataset = ClimateCsvReader::new().read_path(temp_file.path())?;
        assert_eq!(dataset.len(), 2);
        Ok(())
    }
}
