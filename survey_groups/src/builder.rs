pub use crate::config::*;

use crate::catalog::Catalog;
use crate::groups::GroupSet;

/// A builder for adding rows one at a time, for example while streaming them
/// out of a file.
///
/// The catalog grows with every row, so answers get the same identifiers as with
/// [`crate::run_group_stats`].
///
/// ```
/// use survey_groups::builder::Builder;
/// # use survey_groups::TallyErrors;
///
/// let mut builder = Builder::new(&["Age".to_string(), "Recycles".to_string()]);
///
/// builder.add_row(&["26 to 35".to_string(), "Yes".to_string()])?;
/// builder.add_row(&["26 to 35".to_string(), "No".to_string()])?;
///
/// let res = builder.tally(&["p1:r1,p2:r1"])?;
/// assert_eq!(res.metrics[1].count, 1);
///
/// # Ok::<(), TallyErrors>(())
/// ```
pub struct Builder {
    pub(crate) _catalog: Catalog,
    pub(crate) _rows: Vec<Row>,
}

impl Builder {
    pub fn new(questions: &[String]) -> Builder {
        Builder {
            _catalog: Catalog::new(questions),
            _rows: Vec::new(),
        }
    }

    /// Adds the answers of one respondent, in question order.
    ///
    /// Fails if the row has more cells than there are questions.
    pub fn add_row(&mut self, cells: &[String]) -> Result<(), TallyErrors> {
        self._catalog.register_row(self._rows.len() + 1, cells)?;
        self._rows.push(cells.to_vec());
        Ok(())
    }

    pub fn add_rows(&mut self, rows: &[Row]) -> Result<(), TallyErrors> {
        for row in rows {
            self.add_row(row)?;
        }
        Ok(())
    }

    pub fn num_rows(&self) -> usize {
        self._rows.len()
    }

    /// The catalog of all the rows added so far.
    pub fn catalog(&self) -> &Catalog {
        &self._catalog
    }

    /// Runs the tally of all the rows for the given group definitions.
    pub fn tally<S: AsRef<str>>(&self, definitions: &[S]) -> Result<TallyResult, TallyErrors> {
        let groups = GroupSet::new(definitions);
        crate::tally(&self._catalog, &self._rows, &groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(xs: &[&str]) -> Vec<String> {
        xs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn same_result_as_batch() {
        let questions = strings(&["q1", "q2"]);
        let rows = vec![
            strings(&["A", "B"]),
            strings(&["A", "C"]),
            strings(&["D", "B"]),
        ];
        let mut builder = Builder::new(&questions);
        builder.add_rows(&rows).unwrap();
        assert_eq!(builder.num_rows(), 3);
        assert_eq!(builder.catalog(), &Catalog::build(&questions, &rows).unwrap());

        let defs = ["p1:r1,p2:r1", "p2:r2"];
        assert_eq!(
            builder.tally(&defs).unwrap(),
            crate::run_group_stats(&questions, &rows, &defs).unwrap()
        );
    }

    #[test]
    fn rejects_long_rows() {
        let mut builder = Builder::new(&strings(&["q1"]));
        builder.add_row(&strings(&["A"])).unwrap();
        assert_eq!(
            builder.add_row(&strings(&["A", "B"])),
            Err(TallyErrors::MalformedRow {
                row: 2,
                cells: 2,
                questions: 1
            })
        );
        assert_eq!(builder.num_rows(), 1);
    }

    #[test]
    fn empty_builder() {
        let builder = Builder::new(&strings(&["q1"]));
        assert_eq!(builder.tally(&["p1:r1"]), Err(TallyErrors::EmptySurvey));
    }
}
