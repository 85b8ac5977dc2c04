mod catalog;
mod config;
mod groups;
pub mod builder;
pub mod manual;
pub mod quick_start;

use log::{debug, info, warn};

use std::collections::HashSet;

pub use crate::catalog::{split_cell, Catalog, QuestionListing};
pub use crate::config::*;
pub use crate::groups::{expand_groups, GroupPath, GroupSet};

/// Runs the whole tally for the given survey.
///
/// Arguments:
/// * `questions` the question names, in column order
/// * `rows` the answers of each respondent, aligned with `questions`
/// * `definitions` the raw group definitions, for example `p2:r1,p3:r1`
///
/// The catalog is built from the same rows that are tallied, so all the answers
/// of the rows have an identifier.
pub fn run_group_stats<S: AsRef<str>>(
    questions: &[String],
    rows: &[Row],
    definitions: &[S],
) -> Result<TallyResult, TallyErrors> {
    info!(
        "Processing {:?} rows, {:?} questions, {:?} group definitions",
        rows.len(),
        questions.len(),
        definitions.len()
    );
    if rows.is_empty() {
        return Err(TallyErrors::EmptySurvey);
    }
    let catalog = Catalog::build(questions, rows)?;
    let groups = GroupSet::new(definitions);
    tally(&catalog, rows, &groups)
}

/// Matches all the rows against the groups and aggregates the counts.
pub fn tally(
    catalog: &Catalog,
    rows: &[Row],
    groups: &GroupSet,
) -> Result<TallyResult, TallyErrors> {
    if rows.is_empty() {
        return Err(TallyErrors::EmptySurvey);
    }
    let unresolved = groups.unresolved(catalog);
    for segment in unresolved.iter() {
        warn!(
            "Identifier {} does not designate any answer of this survey: the groups using it will not match any row",
            segment
        );
    }

    let mut matches: Vec<Vec<usize>> = Vec::with_capacity(rows.len());
    for (idx, row) in rows.iter().enumerate() {
        crate::catalog::check_row_shape(idx + 1, row, catalog.num_questions())?;
        let m = match_row(catalog, groups, row);
        debug!("tally: row {}: matched groups {:?}", idx + 1, m);
        matches.push(m);
    }

    let metrics = aggregate(catalog, groups, &matches, rows.len() as u64)?;
    for m in metrics.iter() {
        info!(
            "{:width$}{} -> {} ({:.2}% of {})",
            "",
            m.path,
            m.count,
            m.percentage,
            m.denominator,
            width = 2 * (m.depth - 1)
        );
    }
    Ok(TallyResult {
        total_rows: rows.len() as u64,
        metrics,
        unresolved,
    })
}

/// The identifiers of all the answers of a row.
///
/// Answers that are not part of the catalog are skipped.
pub fn row_ids(catalog: &Catalog, row: &[String]) -> HashSet<QaId> {
    let mut ids: HashSet<QaId> = HashSet::new();
    for (q_idx, cell) in row.iter().enumerate() {
        for answer in split_cell(cell) {
            match catalog.id_at(q_idx, answer) {
                Some(id) => {
                    ids.insert(id);
                }
                None => {
                    debug!(
                        "row_ids: skipping unknown answer {:?} for question {}",
                        answer,
                        q_idx + 1
                    );
                }
            }
        }
    }
    ids
}

/// The positions (in `groups`) of all the group paths satisfied by a row, in
/// increasing order.
pub fn match_row(catalog: &Catalog, groups: &GroupSet, row: &[String]) -> Vec<usize> {
    let ids = row_ids(catalog, row);
    groups
        .paths()
        .iter()
        .enumerate()
        .filter(|(_, p)| p.matches(&ids))
        .map(|(idx, _)| idx)
        .collect()
}

/// Counts the matches of each group path and computes the share of each path
/// relative to its parent (or to `total_rows` for top-level paths).
///
/// Each entry of `matches` holds the positions matched by one row. A position
/// listed twice for the same row is only counted once.
pub fn aggregate(
    catalog: &Catalog,
    groups: &GroupSet,
    matches: &[Vec<usize>],
    total_rows: u64,
) -> Result<Vec<GroupMetric>, TallyErrors> {
    let mut counts: Vec<u64> = vec![0; groups.len()];
    for row_matches in matches.iter() {
        let distinct: HashSet<usize> = row_matches.iter().cloned().collect();
        for idx in distinct {
            if let Some(c) = counts.get_mut(idx) {
                *c += 1;
            }
        }
    }

    let mut res: Vec<GroupMetric> = Vec::with_capacity(groups.len());
    for (idx, path) in groups.paths().iter().enumerate() {
        let count = counts[idx];
        let denominator = match groups.parent_position(idx) {
            Some(parent_idx) => counts[parent_idx],
            None => total_rows,
        };
        // A row matching a path also matches all its prefixes.
        if count > denominator {
            return Err(TallyErrors::BrokenInvariant {
                path: path.path.clone(),
                count,
                parent_count: denominator,
            });
        }
        let percentage = if denominator == 0 {
            0.0
        } else {
            100.0 * (count as f64) / (denominator as f64)
        };
        let (question, answer) = match catalog.decode(path.last_segment()) {
            Some((q, a)) => (Some(q.to_string()), Some(a.to_string())),
            None => (None, None),
        };
        res.push(GroupMetric {
            path: path.path.clone(),
            depth: path.depth(),
            count,
            denominator,
            percentage,
            question,
            answer,
        });
    }
    Ok(res)
}
