// Primitives for reading tab-delimited extracts.

use crate::pipeline::io_common::ColumnIndexes;
use crate::pipeline::*;

/// Reads all the rows of a tab-delimited extract.
///
/// Bytes that are not valid UTF-8 are replaced, they never stop the run.
pub fn read_tsv_rows(path: &Path) -> BPivotResult<Vec<RawRow>> {
    let p = path.display().to_string();
    let bytes = fs::read(path).context(OpeningInputSnafu { path: p.clone() })?;
    let text = String::from_utf8_lossy(&bytes);
    let rows = parse_tsv(&text, &p)?;
    info!("read_tsv_rows: {} rows in {:?}", rows.len(), p);
    Ok(rows)
}

fn parse_tsv(text: &str, path: &str) -> PivotResult<Vec<RawRow>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .from_reader(text.as_bytes());
    let header = rdr.headers().context(ParsingTsvSnafu { path })?.clone();
    debug!("parse_tsv: header: {:?}", header);
    let cols = ColumnIndexes::from_header(header.iter(), path)?;

    let mut res: Vec<RawRow> = Vec::new();
    for record_r in rdr.records() {
        let record = record_r.context(ParsingTsvSnafu { path })?;
        let row = cols.make_row(|idx| record.get(idx).unwrap_or_default().to_string());
        if row.vote_ct.is_none() {
            debug!("parse_tsv: no vote count in {:?}", record);
        }
        res.push(row);
    }
    Ok(res)
}
