//! Load institutions from the cost/earnings CSV export

use std::io::Read;
use std::path::Path;

use csv::Reader;

use super::{Institution, InstitutionType};
use crate::error::Result;

/// Raw CSV row matching the institutions export columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    unitid: u32,
    name: String,
    state: Option<String>,
    control: u8,
    tuition_in_state: Option<f64>,
    tuition_out_state: Option<f64>,
    fees: Option<f64>,
    room_board: Option<f64>,
    books_supplies: Option<f64>,
    median_earnings_10yr: Option<f64>,
}

impl CsvRow {
    fn into_institution(self) -> Institution {
        Institution {
            unit_id: self.unitid,
            name: self.name,
            state: self.state.filter(|s| !s.trim().is_empty()),
            institution_type: InstitutionType::from_control_code(self.control),
            tuition_in_state: self.tuition_in_state,
            tuition_out_state: self.tuition_out_state,
            fees: self.fees,
            room_board: self.room_board,
            books_supplies: self.books_supplies,
            median_earnings_10yr: self.median_earnings_10yr,
        }
    }
}

/// Load all institutions from a CSV file
pub fn load_institutions<P: AsRef<Path>>(path: P) -> Result<Vec<Institution>> {
    let file = std::fs::File::open(path)?;
    load_institutions_from_reader(file)
}

/// Load institutions from any reader (e.g., string buffer, request body)
pub fn load_institutions_from_reader<R: Read>(reader: R) -> Result<Vec<Institution>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut institutions = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        institutions.push(row.into_institution());
    }

    Ok(institutions)
}
