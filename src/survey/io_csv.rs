// Primitives for reading CSV files.

use survey_groups::builder::Builder;

use crate::survey::{io_common::ColumnLayout, *};

/// Reads a survey exported as CSV: a header line with the question names,
/// then one line per respondent.
///
/// Records may have different lengths. The shape of the rows is checked
/// against the header when they are added to the builder.
pub fn read_csv_survey(path: &str, layout: &ColumnLayout) -> SurveyResult<Builder> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    let mut records = rdr.into_records();

    let header = records
        .next()
        .context(MissingHeaderSnafu { path })?
        .context(CsvLineParseSnafu { lineno: 1_usize })?;
    let header_cells: Vec<&str> = header.iter().collect();
    let header_width = header_cells.len();
    let questions = layout.select(header_width, &header_cells);
    debug!("read_csv_survey: questions: {:?}", questions);

    let mut builder = Builder::new(&questions);
    for (idx, line_r) in records.enumerate() {
        // The header is line 1.
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        let cells: Vec<&str> = line.iter().collect();
        let row = layout.select(header_width, &cells);
        debug!("read_csv_survey: lineno: {:?} row: {:?}", lineno, &row);
        builder.add_row(&row).context(TallySnafu {})?;
    }
    Ok(builder)
}
