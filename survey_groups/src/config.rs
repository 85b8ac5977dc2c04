// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// Separator between the answers of a multi-valued cell.
pub const MULTI_VALUE_SEPARATOR: char = ';';

/// Separator between the identifiers of a group path.
pub const PATH_SEPARATOR: &str = ",";

/// The groups used when nothing else is requested.
pub const DEFAULT_GROUPS: [&str; 2] = ["p1:r1", "p2:r1,p3:r1,p4:r3"];

/// The answers of one respondent, one cell per question, in question order.
///
/// A cell may be empty, hold a single answer or several answers joined with
/// [`MULTI_VALUE_SEPARATOR`].
pub type Row = Vec<String>;

/// Position of an answer inside the catalog.
///
/// Both indices are 0-based. The textual form `p<question>:r<answer>` is
/// 1-based, see [`QaId::parse`] and the `Display` implementation.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub struct QaId {
    pub question: usize,
    pub answer: usize,
}

impl QaId {
    /// Parses the `p<int>:r<int>` shape.
    ///
    /// Only the syntax is checked here: an identifier that parses may still be
    /// out of range for a given catalog. Index 0 does not exist in the textual
    /// form and is rejected.
    pub fn parse(text: &str) -> Option<QaId> {
        let rest = text.strip_prefix('p')?;
        let (q, a) = rest.split_once(":r")?;
        let question = parse_position(q)?;
        let answer = parse_position(a)?;
        Some(QaId { question, answer })
    }
}

fn parse_position(s: &str) -> Option<usize> {
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    s.parse::<usize>().ok()?.checked_sub(1)
}

impl Display for QaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "p{}:r{}", self.question + 1, self.answer + 1)
    }
}

// ******** Output data structures *********

/// The tally for one group path.
#[derive(PartialEq, Debug, Clone)]
pub struct GroupMetric {
    /// The full path, as a comma-joined chain of identifiers.
    pub path: String,
    /// Number of identifiers in the path. Top-level groups have depth 1.
    pub depth: usize,
    /// Number of rows that contain every answer of the path.
    pub count: u64,
    /// The total number of rows for a top-level group, the count of the parent
    /// path otherwise.
    pub denominator: u64,
    /// 100 * count / denominator, or 0 when the denominator is 0.
    pub percentage: f64,
    /// The question of the last identifier, if it can be decoded.
    pub question: Option<String>,
    /// The answer of the last identifier, if it can be decoded.
    pub answer: Option<String>,
}

#[derive(PartialEq, Debug, Clone)]
pub struct TallyResult {
    pub total_rows: u64,
    /// One entry per expanded group path, in sorted path order.
    pub metrics: Vec<GroupMetric>,
    /// The identifiers of the group definitions that do not exist in the catalog.
    pub unresolved: Vec<String>,
}

/// Errors that prevent the tally from completing successfully.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum TallyErrors {
    /// There is no row to tally.
    EmptySurvey,
    /// A row has more cells than there are questions.
    MalformedRow {
        row: usize,
        cells: usize,
        questions: usize,
    },
    /// A nested group counted more rows than its parent.
    BrokenInvariant {
        path: String,
        count: u64,
        parent_count: u64,
    },
}

impl Error for TallyErrors {}

impl Display for TallyErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TallyErrors::EmptySurvey => write!(f, "the survey does not contain any row"),
            TallyErrors::MalformedRow {
                row,
                cells,
                questions,
            } => write!(
                f,
                "row {} has {} cells but only {} questions are known",
                row, cells, questions
            ),
            TallyErrors::BrokenInvariant {
                path,
                count,
                parent_count,
            } => write!(
                f,
                "group {} counted {} rows, more than the {} rows of its parent",
                path, count, parent_count
            ),
        }
    }
}
