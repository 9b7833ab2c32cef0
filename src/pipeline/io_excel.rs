use calamine::{open_workbook, DataType, Reader, Xlsx};

use crate::pipeline::io_common::ColumnIndexes;
use crate::pipeline::*;

/// Reads all the rows of an extract saved as an Excel workbook.
///
/// The first row of the worksheet is the header. Without a worksheet name,
/// the first worksheet is used.
pub fn read_excel_rows(path: &Path, worksheet: Option<&str>) -> BPivotResult<Vec<RawRow>> {
    let p = path.display().to_string();
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path: p.clone() })?;
    let wrange = match worksheet {
        Some(name) => workbook
            .worksheet_range(name)
            .context(MissingWorksheetSnafu {
                worksheet: name,
                path: p.clone(),
            })?
            .context(OpeningExcelSnafu { path: p.clone() })?,
        None => workbook
            .worksheet_range_at(0)
            .context(EmptyExcelSnafu { path: p.clone() })?
            .context(OpeningExcelSnafu { path: p.clone() })?,
    };

    let mut iter = wrange.rows();
    let header_cells = iter.next().context(EmptyExcelSnafu { path: p.clone() })?;
    debug!("read_excel_rows: header: {:?}", header_cells);
    let header: Vec<String> = header_cells
        .iter()
        .enumerate()
        .map(|(idx, c)| cell_text(c, &p, 1 + idx as u64))
        .collect::<PivotResult<Vec<String>>>()?;
    let cols = ColumnIndexes::from_header(header.iter().map(|s| s.as_str()), &p)?;

    let mut res: Vec<RawRow> = Vec::new();
    for (idx, row) in iter.enumerate() {
        // Spreadsheet lines start at 1, and the header is the first one.
        let lineno = (idx + 2) as u64;
        let cells: Vec<String> = row
            .iter()
            .map(|c| cell_text(c, &p, lineno))
            .collect::<PivotResult<Vec<String>>>()?;
        res.push(cols.make_row(|i| cells.get(i).cloned().unwrap_or_default()));
    }
    info!("read_excel_rows: {} rows in {:?}", res.len(), p);
    Ok(res)
}

/// The text of a cell, as it would appear in a tab-delimited export.
fn cell_text(cell: &DataType, path: &str, lineno: u64) -> PivotResult<String> {
    match cell {
        DataType::String(s) => Ok(s.clone()),
        DataType::Int(i) => Ok(i.to_string()),
        DataType::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => Ok((*f as i64).to_string()),
        DataType::Float(f) => Ok(f.to_string()),
        DataType::Bool(b) => Ok(b.to_string()),
        DataType::Empty => Ok("".to_string()),
        _ => ExcelWrongCellTypeSnafu {
            path,
            lineno,
            content: format!("{:?}", cell),
        }
        .fail(),
    }
}
