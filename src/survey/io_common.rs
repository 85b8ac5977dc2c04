use std::path::Path;

/// Which columns of a line hold the answers.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct ColumnLayout {
    /// 0-based index of the first question column.
    pub first_question_column: usize,
    /// Number of columns dropped at the end of every line.
    pub ignored_trailing_columns: usize,
}

impl Default for ColumnLayout {
    // The first column identifies the respondent.
    fn default() -> Self {
        ColumnLayout {
            first_question_column: 1,
            ignored_trailing_columns: 0,
        }
    }
}

impl ColumnLayout {
    /// The question cells of a line, for a file whose header has `header_width`
    /// columns.
    ///
    /// The span of the questions is fixed by the header: a line that stops early
    /// (for example without its trailing comment) keeps all its answers, and the
    /// missing cells are simply absent. A line wider than the header keeps its
    /// extra cells so that the row can be reported as malformed.
    pub fn select<S: AsRef<str>>(&self, header_width: usize, line: &[S]) -> Vec<String> {
        let end = if line.len() > header_width {
            line.len() - self.ignored_trailing_columns.min(line.len())
        } else {
            header_width
                .saturating_sub(self.ignored_trailing_columns)
                .min(line.len())
        };
        if self.first_question_column >= end {
            return Vec::new();
        }
        line[self.first_question_column..end]
            .iter()
            .map(|s| s.as_ref().to_string())
            .collect()
    }
}

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string())
}

/// The provider to use for a file, from its extension.
pub fn infer_provider(path: &str) -> &'static str {
    match Path::new(path)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .as_deref()
    {
        Some("xlsx") | Some("xlsm") => "xlsx",
        _ => "csv",
    }
}
