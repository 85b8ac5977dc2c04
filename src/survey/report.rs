// Formatting of the results. Nothing here is computed, only presented.

use serde_json::json;
use serde_json::Value as JSValue;

use crate::survey::*;

fn depth_prefix(depth: usize) -> String {
    if depth <= 1 {
        "".to_string()
    } else {
        format!("{} ", "-".repeat(depth - 1))
    }
}

/// One line per group, indented by depth.
pub fn metric_lines(result: &TallyResult, verbose: bool) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    for m in result.metrics.iter() {
        let mut line = format!(
            "{}{} = {} ({:.2}% of {})",
            depth_prefix(m.depth),
            m.path,
            m.count,
            m.percentage,
            m.denominator
        );
        if verbose {
            match (&m.question, &m.answer) {
                (Some(q), Some(a)) => line.push_str(&format!("  {} Re: {}", q, a)),
                _ => line.push_str("  <unknown>"),
            }
        }
        lines.push(line);
    }
    lines
}

/// The identifiers of all the answers, grouped by question.
pub fn catalog_lines(catalog: &Catalog) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    for ql in catalog.listing() {
        lines.push(ql.question.clone());
        for (id, answer) in ql.answers.iter() {
            lines.push(format!("{} -> {}", id, answer));
        }
        lines.push("".to_string());
    }
    lines
}

fn result_stats_to_json(result: &TallyResult) -> Vec<JSValue> {
    result
        .metrics
        .iter()
        .map(|m| {
            json!({
                "group": m.path,
                "depth": m.depth,
                "count": m.count.to_string(),
                "denominator": m.denominator.to_string(),
                "percentage": format!("{:.2}", m.percentage)
            })
        })
        .collect()
}

pub fn build_summary_js(settings: &SurveySettings, result: &TallyResult) -> JSValue {
    json!({
        "config": {
            "survey": settings.survey_name,
            "source": simplify_file_name(&settings.source.path),
            "totalRows": result.total_rows.to_string()
        },
        "results": result_stats_to_json(result),
        "unresolved": result.unresolved
    })
}
