use log::{debug, info, warn};

use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::{Path, PathBuf};

use survey_groups::builder::Builder;
use survey_groups::*;
use text_diff::print_diff;

use crate::args::Args;

pub mod config_reader;
pub mod io_common;
pub mod io_csv;
pub mod io_xlsx;
pub mod report;

use crate::survey::config_reader::*;
use crate::survey::io_common::*;

/// Used when neither the flags nor the configuration name a survey file.
pub const SURVEY_DEFAULT_PATH: &str = "resources/encuesta.csv";

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum SurveyError {
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading CSV line {lineno}"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("The survey {path} does not have a header line"))]
    MissingHeader { path: String },

    #[snafu(display("Error opening Excel file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("The Excel file {path} does not have any worksheet"))]
    EmptyExcel { path: String },
    #[snafu(display("Cannot find the worksheet {name} in {path}"))]
    MissingWorksheet { name: String, path: String },
    #[snafu(display("Line {lineno}: cannot read the cell {content} as text"))]
    ExcelWrongCellType { lineno: usize, content: String },
    #[snafu(display("Unknown input type {input_type} (expected csv or xlsx)"))]
    UnknownInputType { input_type: String },

    #[snafu(display("Error opening JSON file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Cannot use {value} as a 1-based column index or count"))]
    ParsingJsonNumber { value: String },
    #[snafu(display("Error writing the summary to {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },

    #[snafu(display("Tally error"))]
    Tally { source: TallyErrors },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type SurveyResult<T> = Result<T, SurveyError>;

/// Where and how to read the survey.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SourceSettings {
    pub provider: String,
    pub path: String,
    pub layout: ColumnLayout,
    pub excel_worksheet_name: Option<String>,
}

/// The settings of one run, once the flags and the configuration file have been
/// merged.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SurveySettings {
    pub survey_name: String,
    pub source: SourceSettings,
    pub groups: Vec<String>,
    pub out: Option<String>,
    pub reference: Option<String>,
    pub list: bool,
    pub verbose: bool,
}

fn relative_to(root: &Path, path: &str) -> String {
    let p: PathBuf = root.join(path);
    p.as_path().display().to_string()
}

pub fn resolve_settings(args: &Args) -> SurveyResult<SurveySettings> {
    let config: Option<(SurveyConfig, PathBuf)> = match &args.config {
        Some(config_path) => {
            let config = read_config(config_path)?;
            let root = Path::new(config_path)
                .parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_default();
            Some((config, root))
        }
        None => None,
    };
    let file_source = config
        .as_ref()
        .and_then(|(c, root)| c.survey_file.as_ref().map(|fs| (fs, root)));
    let output_settings = config
        .as_ref()
        .and_then(|(c, root)| c.output_settings.as_ref().map(|os| (os, root)));

    let path = match (&args.file, file_source) {
        (Some(p), _) => p.clone(),
        (None, Some((fs, root))) => relative_to(root, &fs.file_path),
        (None, None) => SURVEY_DEFAULT_PATH.to_string(),
    };

    let provider = args
        .input_type
        .clone()
        .or_else(|| file_source.and_then(|(fs, _)| fs.provider.clone()))
        .unwrap_or_else(|| infer_provider(&path).to_string());

    let layout = match file_source {
        Some((fs, _)) => ColumnLayout {
            first_question_column: fs.first_question_column()?,
            ignored_trailing_columns: fs.ignored_trailing_columns()?,
        },
        None => ColumnLayout::default(),
    };

    let excel_worksheet_name = args
        .excel_worksheet_name
        .clone()
        .or_else(|| file_source.and_then(|(fs, _)| fs.excel_worksheet_name.clone()));

    let groups: Vec<String> = args
        .groups
        .clone()
        .or_else(|| config.as_ref().and_then(|(c, _)| c.groups.clone()))
        .unwrap_or_else(|| DEFAULT_GROUPS.iter().map(|s| s.to_string()).collect());

    let out = args.out.clone().or_else(|| {
        output_settings.and_then(|(os, root)| {
            os.output_file.as_ref().map(|f| match f.as_str() {
                "stdout" => f.clone(),
                _ => relative_to(root, f),
            })
        })
    });

    let survey_name = output_settings
        .and_then(|(os, _)| os.survey_name.clone())
        .unwrap_or_else(|| simplify_file_name(&path));

    Ok(SurveySettings {
        survey_name,
        source: SourceSettings {
            provider,
            path,
            layout,
            excel_worksheet_name,
        },
        groups,
        out,
        reference: args.reference.clone(),
        list: args.list,
        verbose: args.verbose,
    })
}

/// Reads the whole survey into a builder.
pub fn read_survey_data(source: &SourceSettings) -> SurveyResult<Builder> {
    info!(
        "Attempting to read survey file {:?} ({})",
        source.path, source.provider
    );
    match source.provider.as_str() {
        "csv" => io_csv::read_csv_survey(&source.path, &source.layout),
        "xlsx" => io_xlsx::read_xlsx_survey(
            &source.path,
            &source.layout,
            source.excel_worksheet_name.as_deref(),
        ),
        x => UnknownInputTypeSnafu { input_type: x }.fail(),
    }
}

fn write_summary(out: &str, pretty_js: &str) -> SurveyResult<()> {
    if out == "stdout" {
        println!("{}", pretty_js);
        return Ok(());
    }
    info!("Writing summary to {:?}", out);
    fs::write(out, pretty_js).context(WritingOutputSnafu { path: out })
}

fn check_reference(reference_path: &str, pretty_js_stats: &str) -> SurveyResult<()> {
    let summary_ref = read_summary(reference_path)?;
    debug!("reference summary: {:?}", summary_ref);
    let pretty_js_summary_ref =
        serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
    if pretty_js_summary_ref != pretty_js_stats {
        warn!("Found differences with the reference summary");
        print_diff(pretty_js_summary_ref.as_str(), pretty_js_stats, "\n");
        whatever!("Difference detected between calculated summary and reference summary")
    }
    Ok(())
}

pub fn run_survey(settings: &SurveySettings) -> SurveyResult<()> {
    debug!("run_survey: settings: {:?}", settings);
    let builder = read_survey_data(&settings.source)?;
    info!(
        "Read {} rows, {} questions",
        builder.num_rows(),
        builder.catalog().num_questions()
    );

    if settings.list {
        for line in report::catalog_lines(builder.catalog()) {
            println!("{}", line);
        }
        return Ok(());
    }

    let result = builder.tally(&settings.groups).context(TallySnafu {})?;
    for line in report::metric_lines(&result, settings.verbose) {
        println!("{}", line);
    }

    let summary_js = report::build_summary_js(settings, &result);
    let pretty_js_stats = serde_json::to_string_pretty(&summary_js).context(ParsingJsonSnafu {})?;

    if let Some(out) = &settings.out {
        write_summary(out, &pretty_js_stats)?;
    }

    // The reference summary, if provided for comparison
    if let Some(reference_path) = &settings.reference {
        check_reference(reference_path, &pretty_js_stats)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn args() -> Args {
        Args {
            config: None,
            file: None,
            groups: None,
            list: false,
            out: None,
            reference: None,
            input_type: None,
            excel_worksheet_name: None,
            verbose: false,
        }
    }

    #[test]
    fn defaults_without_config() {
        let s = resolve_settings(&args()).unwrap();
        assert_eq!(s.source.path, SURVEY_DEFAULT_PATH);
        assert_eq!(s.source.provider, "csv");
        assert_eq!(s.source.layout, ColumnLayout::default());
        assert_eq!(s.groups, vec!["p1:r1", "p2:r1,p3:r1,p4:r3"]);
        assert_eq!(s.survey_name, "encuesta.csv");
        assert_eq!(s.out, None);
    }

    #[test]
    fn flags_take_precedence_over_config() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("survey_config.json");
        let mut f = fs::File::create(&config_path).unwrap();
        write!(
            f,
            r#"{{
                "outputSettings": {{ "surveyName": "Habits", "outputFile": "summary.json" }},
                "surveyFile": {{
                    "provider": "xlsx",
                    "filePath": "answers.xlsx",
                    "firstQuestionColumnIndex": "3",
                    "ignoredTrailingColumns": 1,
                    "excelWorksheetName": "Form1"
                }},
                "groups": ["p1:r2"]
            }}"#
        )
        .unwrap();
        let config_str = config_path.display().to_string();

        let mut a = args();
        a.config = Some(config_str.clone());
        let s = resolve_settings(&a).unwrap();
        assert_eq!(s.survey_name, "Habits");
        assert_eq!(s.source.provider, "xlsx");
        assert_eq!(
            s.source.path,
            dir.path().join("answers.xlsx").display().to_string()
        );
        assert_eq!(
            s.source.layout,
            ColumnLayout {
                first_question_column: 2,
                ignored_trailing_columns: 1
            }
        );
        assert_eq!(s.source.excel_worksheet_name, Some("Form1".to_string()));
        assert_eq!(s.groups, vec!["p1:r2"]);
        assert_eq!(
            s.out,
            Some(dir.path().join("summary.json").display().to_string())
        );

        a.file = Some("other.csv".to_string());
        a.groups = Some(vec!["p3:r1".to_string()]);
        a.input_type = Some("csv".to_string());
        a.out = Some("stdout".to_string());
        let s = resolve_settings(&a).unwrap();
        assert_eq!(s.source.path, "other.csv");
        assert_eq!(s.source.provider, "csv");
        assert_eq!(s.groups, vec!["p3:r1"]);
        assert_eq!(s.out, Some("stdout".to_string()));
    }

    #[test]
    fn missing_survey_file_is_fatal() {
        let mut a = args();
        a.file = Some("/this/path/does/not/exist.csv".to_string());
        let s = resolve_settings(&a).unwrap();
        assert!(matches!(
            read_survey_data(&s.source),
            Err(SurveyError::CsvOpen { .. })
        ));
    }

    #[test]
    fn unknown_input_type() {
        let mut a = args();
        a.input_type = Some("parquet".to_string());
        let s = resolve_settings(&a).unwrap();
        assert!(matches!(
            read_survey_data(&s.source),
            Err(SurveyError::UnknownInputType { .. })
        ));
    }

    #[test]
    fn run_with_summary_and_reference() {
        let dir = tempfile::tempdir().unwrap();
        let data_path = dir.path().join("survey.csv");
        fs::write(&data_path, "id,q1,q2\n1,A,B\n2,A,C\n3,D,B\n").unwrap();
        let out_path = dir.path().join("summary.json");

        let mut a = args();
        a.file = Some(data_path.display().to_string());
        a.groups = Some(vec!["p1:r1,p2:r1".to_string()]);
        a.out = Some(out_path.display().to_string());
        let s = resolve_settings(&a).unwrap();
        run_survey(&s).unwrap();

        let written = fs::read_to_string(&out_path).unwrap();
        let js: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(js["results"][1]["group"], "p1:r1,p2:r1");
        assert_eq!(js["results"][1]["percentage"], "50.00");

        // Comparing with itself succeeds.
        let mut s2 = s.clone();
        s2.out = None;
        s2.reference = Some(out_path.display().to_string());
        run_survey(&s2).unwrap();

        // A different tally does not.
        let mut s3 = s2.clone();
        s3.groups = vec!["p1:r2".to_string()];
        assert!(matches!(
            run_survey(&s3),
            Err(SurveyError::Whatever { .. })
        ));
    }

    #[test]
    fn empty_survey_fails() {
        let dir = tempfile::tempdir().unwrap();
        let data_path = dir.path().join("survey.csv");
        fs::write(&data_path, "id,q1,q2\n").unwrap();
        let mut a = args();
        a.file = Some(data_path.display().to_string());
        let s = resolve_settings(&a).unwrap();
        assert!(matches!(
            run_survey(&s),
            Err(SurveyError::Tally {
                source: TallyErrors::EmptySurvey
            })
        ));
    }
}
