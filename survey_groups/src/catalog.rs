use log::debug;
use std::collections::HashMap;

use crate::config::*;

#[derive(Eq, PartialEq, Debug, Clone)]
struct QuestionEntry {
    name: String,
    // Answers in first-seen order. The position is the answer index.
    answers: Vec<String>,
    answer_ids: HashMap<String, usize>,
}

impl QuestionEntry {
    fn register(&mut self, answer: &str) {
        if !self.answer_ids.contains_key(answer) {
            self.answer_ids.insert(answer.to_string(), self.answers.len());
            self.answers.push(answer.to_string());
        }
    }
}

/// One question of the catalog listing, with the identifiers of its answers.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct QuestionListing {
    pub question: String,
    /// (identifier, answer text), in answer order.
    pub answers: Vec<(String, String)>,
}

/// The enumeration of all the questions and of all the distinct answers seen
/// for each question.
///
/// Questions keep the order of the header. Answers keep the order in which they
/// were first seen while scanning the rows. These positions are the basis of the
/// `p<question>:r<answer>` identifiers, so building the catalog twice from the
/// same data gives the same identifiers.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Catalog {
    questions: Vec<QuestionEntry>,
    question_ids: HashMap<String, usize>,
}

/// Splits a cell into its non-empty answers.
pub fn split_cell(cell: &str) -> impl Iterator<Item = &str> {
    cell.split(MULTI_VALUE_SEPARATOR).filter(|s| !s.is_empty())
}

impl Catalog {
    /// A catalog with the given questions and no answers yet.
    pub(crate) fn new(questions: &[String]) -> Catalog {
        let mut question_ids: HashMap<String, usize> = HashMap::new();
        for (idx, q) in questions.iter().enumerate() {
            // With duplicated headers, the name refers to the first column.
            question_ids.entry(q.clone()).or_insert(idx);
        }
        Catalog {
            questions: questions
                .iter()
                .map(|name| QuestionEntry {
                    name: name.clone(),
                    answers: Vec::new(),
                    answer_ids: HashMap::new(),
                })
                .collect(),
            question_ids,
        }
    }

    /// Scans all the rows and builds the catalog.
    ///
    /// Fails if a row has more cells than there are questions.
    pub fn build(questions: &[String], rows: &[Row]) -> Result<Catalog, TallyErrors> {
        let mut catalog = Catalog::new(questions);
        for (idx, row) in rows.iter().enumerate() {
            catalog.register_row(idx + 1, row)?;
        }
        debug!(
            "Catalog::build: {} questions, {} answers",
            catalog.questions.len(),
            catalog
                .questions
                .iter()
                .map(|q| q.answers.len())
                .sum::<usize>()
        );
        Ok(catalog)
    }

    /// Registers all the answers of one row. `row_number` is only used for
    /// error reporting.
    pub(crate) fn register_row(
        &mut self,
        row_number: usize,
        row: &[String],
    ) -> Result<(), TallyErrors> {
        check_row_shape(row_number, row, self.questions.len())?;
        for (entry, cell) in self.questions.iter_mut().zip(row.iter()) {
            for answer in split_cell(cell) {
                entry.register(answer);
            }
        }
        Ok(())
    }

    pub fn num_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn question_names(&self) -> Vec<&str> {
        self.questions.iter().map(|q| q.name.as_str()).collect()
    }

    /// The known answers of a question, in identifier order.
    pub fn answers(&self, question: &str) -> Option<&[String]> {
        let idx = self.question_ids.get(question)?;
        Some(self.questions[*idx].answers.as_slice())
    }

    /// The identifier of an answer for the question at the given position.
    pub fn id_at(&self, question_idx: usize, answer: &str) -> Option<QaId> {
        let entry = self.questions.get(question_idx)?;
        let answer_idx = entry.answer_ids.get(answer)?;
        Some(QaId {
            question: question_idx,
            answer: *answer_idx,
        })
    }

    /// The identifier of a (question, answer) pair, if both are known.
    pub fn encode_id(&self, question: &str, answer: &str) -> Option<QaId> {
        let question_idx = self.question_ids.get(question)?;
        self.id_at(*question_idx, answer)
    }

    /// The textual identifier `p<question>:r<answer>` of a (question, answer) pair.
    ///
    /// Returns None if the question or the answer is not part of the catalog.
    pub fn encode(&self, question: &str, answer: &str) -> Option<String> {
        self.encode_id(question, answer).map(|id| id.to_string())
    }

    /// The (question, answer) pair of an identifier, if it is within the bounds
    /// of this catalog.
    pub fn resolve(&self, id: QaId) -> Option<(&str, &str)> {
        let entry = self.questions.get(id.question)?;
        let answer = entry.answers.get(id.answer)?;
        Some((entry.name.as_str(), answer.as_str()))
    }

    /// Parses a textual identifier and returns its (question, answer) pair.
    ///
    /// Malformed text and out-of-range positions both return None: group
    /// definitions are user input and may refer to another version of the data.
    pub fn decode(&self, text: &str) -> Option<(&str, &str)> {
        QaId::parse(text).and_then(|id| self.resolve(id))
    }

    /// For each question, the identifiers and texts of all its answers.
    pub fn listing(&self) -> Vec<QuestionListing> {
        self.questions
            .iter()
            .enumerate()
            .map(|(q_idx, entry)| QuestionListing {
                question: entry.name.clone(),
                answers: entry
                    .answers
                    .iter()
                    .enumerate()
                    .map(|(a_idx, answer)| {
                        let id = QaId {
                            question: q_idx,
                            answer: a_idx,
                        };
                        (id.to_string(), answer.clone())
                    })
                    .collect(),
            })
            .collect()
    }
}

pub(crate) fn check_row_shape(
    row_number: usize,
    row: &[String],
    num_questions: usize,
) -> Result<(), TallyErrors> {
    if row.len() > num_questions {
        return Err(TallyErrors::MalformedRow {
            row: row_number,
            cells: row.len(),
            questions: num_questions,
        });
    }
    Ok(())
}
