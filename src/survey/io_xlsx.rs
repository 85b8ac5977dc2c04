use calamine::{open_workbook, DataType, Range, Reader, Xlsx};

use survey_groups::builder::Builder;

use crate::survey::{io_common::ColumnLayout, *};

/// Reads a survey from an Excel workbook, with the same layout as a CSV file:
/// a header line, then one line per respondent.
pub fn read_xlsx_survey(
    path: &str,
    layout: &ColumnLayout,
    worksheet_name: Option<&str>,
) -> SurveyResult<Builder> {
    let wrange = get_range(path, worksheet_name)?;
    let mut iter = wrange.rows();

    let header = iter.next().context(MissingHeaderSnafu { path })?;
    let header_cells = read_line(1, header)?;
    let header_width = header_cells.len();
    let questions = layout.select(header_width, &header_cells);
    debug!("read_xlsx_survey: questions: {:?}", questions);

    let mut builder = Builder::new(&questions);
    for (idx, line) in iter.enumerate() {
        let lineno = idx + 2;
        let cells = read_line(lineno, line)?;
        let row = layout.select(header_width, &cells);
        debug!("read_xlsx_survey: lineno: {:?} row: {:?}", lineno, &row);
        builder.add_row(&row).context(TallySnafu {})?;
    }
    Ok(builder)
}

fn read_line(lineno: usize, line: &[DataType]) -> SurveyResult<Vec<String>> {
    line.iter().map(|cell| read_cell(lineno, cell)).collect()
}

fn read_cell(lineno: usize, cell: &DataType) -> SurveyResult<String> {
    match cell {
        DataType::String(s) => Ok(s.clone()),
        DataType::Int(i) => Ok(i.to_string()),
        DataType::Float(f) => Ok(f.to_string()),
        DataType::Bool(b) => Ok(b.to_string()),
        DataType::Empty => Ok("".to_string()),
        _ => ExcelWrongCellTypeSnafu {
            lineno,
            content: format!("{:?}", cell),
        }
        .fail(),
    }
}

fn get_range(path: &str, worksheet_name: Option<&str>) -> SurveyResult<Range<DataType>> {
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;
    let wrange = match worksheet_name {
        Some(name) => workbook
            .worksheet_range(name)
            .context(MissingWorksheetSnafu { name, path })?
            .context(OpeningExcelSnafu { path })?,
        None => workbook
            .worksheet_range_at(0)
            .context(EmptyExcelSnafu { path })?
            .context(OpeningExcelSnafu { path })?,
    };
    Ok(wrange)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_as_text() {
        assert_eq!(read_cell(2, &DataType::String("Sí".to_string())).unwrap(), "Sí");
        assert_eq!(read_cell(2, &DataType::Int(9)).unwrap(), "9");
        assert_eq!(read_cell(2, &DataType::Float(9.0)).unwrap(), "9");
        assert_eq!(read_cell(2, &DataType::Float(2.5)).unwrap(), "2.5");
        assert_eq!(read_cell(2, &DataType::Bool(true)).unwrap(), "true");
        assert_eq!(read_cell(2, &DataType::Empty).unwrap(), "");
    }

    #[test]
    fn error_cells_are_rejected() {
        let res = read_cell(7, &DataType::Error(calamine::CellErrorType::Div0));
        assert!(matches!(
            res,
            Err(SurveyError::ExcelWrongCellType { lineno: 7, .. })
        ));
    }

    fn fixture() -> String {
        concat!(env!("CARGO_MANIFEST_DIR"), "/resources/encuesta.xlsx").to_string()
    }

    #[test]
    fn named_worksheet() {
        let builder =
            read_xlsx_survey(&fixture(), &ColumnLayout::default(), Some("Form1")).unwrap();
        assert_eq!(builder.num_rows(), 3);
        let catalog = builder.catalog();
        assert_eq!(catalog.question_names(), vec!["q1", "q2", "comment"]);
        assert_eq!(catalog.encode("q1", "D"), Some("p1:r2".to_string()));
        assert_eq!(catalog.encode("q2", "C"), Some("p2:r2".to_string()));
        // Numeric cells are read as text.
        assert_eq!(catalog.encode("q2", "9"), Some("p2:r3".to_string()));
        assert_eq!(catalog.encode("q2", "B"), Some("p2:r1".to_string()));

        let res = builder.tally(&["p1:r1,p2:r1"]).unwrap();
        assert_eq!(res.metrics[0].count, 2);
        assert_eq!(res.metrics[1].count, 1);
    }

    #[test]
    fn named_worksheet_with_trailing_column() {
        let layout = ColumnLayout {
            first_question_column: 1,
            ignored_trailing_columns: 1,
        };
        let builder = read_xlsx_survey(&fixture(), &layout, Some("Form1")).unwrap();
        assert_eq!(builder.catalog().question_names(), vec!["q1", "q2"]);
        assert_eq!(builder.num_rows(), 3);
    }

    #[test]
    fn first_worksheet_by_default() {
        let builder = read_xlsx_survey(&fixture(), &ColumnLayout::default(), None).unwrap();
        // The first worksheet only holds instructions in its first column.
        assert_eq!(builder.catalog().num_questions(), 0);
        assert_eq!(builder.num_rows(), 0);
    }

    #[test]
    fn missing_worksheet() {
        let res = read_xlsx_survey(&fixture(), &ColumnLayout::default(), Some("Form2"));
        assert!(matches!(
            res,
            Err(SurveyError::MissingWorksheet { ref name, .. }) if name == "Form2"
        ));
    }

    #[test]
    fn missing_workbook() {
        let res = read_xlsx_survey(
            "/this/workbook/does/not/exist.xlsx",
            &ColumnLayout::default(),
            None,
        );
        assert!(matches!(res, Err(SurveyError::OpeningExcel { .. })));
    }
}
