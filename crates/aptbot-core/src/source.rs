use serde::{Deserialize, Serialize};

use crate::error::{AptError, Result};

/// Raw tabular source as handed over by the external workbook loader: named
/// sheets of optional string cells. The core owns no spreadsheet parsing;
/// whatever produced the workbook (an XLSX export, a script) serializes it to
/// this JSON shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,
    /// Index into `rows` of the header row. Rows at or before it are not
    /// data; everything after it is.
    #[serde(default)]
    pub header_row: usize,
    pub rows: Vec<Vec<Option<String>>>,
}

impl Sheet {
    /// Header cells defining the column-to-attribute mapping. Empty when the
    /// sheet has no row at `header_row`.
    pub(crate) fn headers(&self) -> &[Option<String>] {
        self.rows.get(self.header_row).map_or(&[], Vec::as_slice)
    }

    /// Data rows with their row index within the sheet.
    pub(crate) fn data_rows(&self) -> impl Iterator<Item = (usize, &[Option<String>])> {
        self.rows
            .iter()
            .enumerate()
            .skip(self.header_row + 1)
            .map(|(row_index, row)| (row_index, row.as_slice()))
    }
}

pub fn parse_workbook(raw: &str) -> Result<Workbook> {
    serde_json::from_str::<Workbook>(raw).map_err(AptError::from)
}
