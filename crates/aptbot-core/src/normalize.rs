use std::collections::BTreeMap;

use tracing::debug;

use crate::models::{GroupId, GroupRecord};
use crate::source::{Sheet, Workbook};

const HOME_SHEET: &str = "Home";
const PRIVATE_SHEET_MARKER: char = '_';
const NAME_TOKEN: &str = "Name";
const OPERATION_TOKEN: &str = "Operation";
const TOOLS_HEADER: &str = "Toolset / Malware";
const TARGETS_HEADER: &str = "Targets";
const UNCONFIRMED_MARKER: char = '?';

/// Turns the raw workbook into the canonical record collection.
///
/// Best-effort extraction: reserved sheets are skipped, rows without a
/// confirmed name are dropped, and ids are assigned from the sheet/row
/// position so one run never collides with itself.
#[must_use]
pub fn normalize(book: &Workbook) -> BTreeMap<GroupId, GroupRecord> {
    let mut records = BTreeMap::new();
    for (sheet_index, sheet) in book.sheets.iter().enumerate() {
        if is_reserved_sheet(&sheet.name) {
            debug!(sheet = %sheet.name, "skipped reserved sheet");
            continue;
        }
        normalize_sheet(sheet, sheet_index, &mut records);
    }
    records
}

fn is_reserved_sheet(name: &str) -> bool {
    name == HOME_SHEET || name.starts_with(PRIVATE_SHEET_MARKER)
}

fn normalize_sheet(
    sheet: &Sheet,
    sheet_index: usize,
    out: &mut BTreeMap<GroupId, GroupRecord>,
) {
    let headers = sheet.headers();
    for (row_index, row) in sheet.data_rows() {
        let Some(record) = normalize_row(&sheet.name, headers, row) else {
            debug!(sheet = %sheet.name, row = row_index, "dropped row without names");
            continue;
        };
        out.insert(GroupId::from_position(sheet_index, row_index), record);
    }
}

fn normalize_row(
    country: &str,
    headers: &[Option<String>],
    row: &[Option<String>],
) -> Option<GroupRecord> {
    let mut names = Vec::new();
    let mut tools = Vec::new();
    let mut targets = Vec::new();
    let mut operations = Vec::new();
    let mut extra = BTreeMap::new();

    for (header, cell) in headers.iter().zip(row) {
        let (Some(header), Some(cell)) = (header, cell) else {
            continue;
        };
        let header = header.trim();
        let cell = cell.trim();
        if header.is_empty() || cell.is_empty() {
            continue;
        }

        if header.contains(NAME_TOKEN) {
            // A leading `?` marks an unconfirmed alias; discard the value.
            if !cell.starts_with(UNCONFIRMED_MARKER) {
                names.push(cell.to_string());
            }
        } else if header == TOOLS_HEADER {
            tools.extend(split_terms(cell));
        } else if header == TARGETS_HEADER {
            targets.extend(split_terms(cell));
        } else if header.contains(OPERATION_TOKEN) {
            operations.push(cell.to_string());
        } else {
            extra.insert(header.to_string(), cell.to_string());
        }
    }

    if names.is_empty() {
        return None;
    }

    Some(GroupRecord {
        country: country.to_string(),
        names,
        tools,
        targets,
        // Absence means "no known named operation"; never emit an empty list.
        operations: (!operations.is_empty()).then_some(operations),
        extra,
    })
}

fn split_terms(cell: &str) -> impl Iterator<Item = String> + '_ {
    cell.split(',')
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_string)
}
