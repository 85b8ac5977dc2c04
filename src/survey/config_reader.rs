use crate::survey::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "surveyName")]
    pub survey_name: Option<String>,
    #[serde(rename = "outputFile")]
    pub output_file: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct SurveyFileSource {
    pub provider: Option<String>,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "firstQuestionColumnIndex")]
    _first_question_column_index: Option<JSValue>,
    #[serde(rename = "ignoredTrailingColumns")]
    _ignored_trailing_columns: Option<JSValue>,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
}

impl SurveyFileSource {
    /// The 0-based index of the first question column.
    pub fn first_question_column(&self) -> SurveyResult<usize> {
        match &self._first_question_column_index {
            None => Ok(ColumnLayout::default().first_question_column),
            x => {
                let idx = read_js_int(x)?;
                idx.checked_sub(1).context(ParsingJsonNumberSnafu {
                    value: idx.to_string(),
                })
            }
        }
    }

    pub fn ignored_trailing_columns(&self) -> SurveyResult<usize> {
        match &self._ignored_trailing_columns {
            None => Ok(0),
            x => read_js_int(x),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct SurveyConfig {
    #[serde(rename = "outputSettings")]
    pub output_settings: Option<OutputSettings>,
    #[serde(rename = "surveyFile")]
    pub survey_file: Option<SurveyFileSource>,
    pub groups: Option<Vec<String>>,
}

pub fn read_config(path: &str) -> SurveyResult<SurveyConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: SurveyConfig = serde_json::from_str(&contents).context(ParsingJsonSnafu {})?;
    info!("config: {:?}", config);
    Ok(config)
}

pub fn read_summary(path: &str) -> SurveyResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

fn read_js_int(x: &Option<JSValue>) -> SurveyResult<usize> {
    let value = || match x {
        Some(v) => v.to_string(),
        None => "null".to_string(),
    };
    match x {
        Some(JSValue::Number(n)) => n
            .as_u64()
            .map(|x| x as usize)
            .context(ParsingJsonNumberSnafu { value: value() }),
        Some(JSValue::String(s)) => s
            .trim()
            .parse::<usize>()
            .ok()
            .context(ParsingJsonNumberSnafu { value: value() }),
        _ => None.context(ParsingJsonNumberSnafu { value: value() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(js: &str) -> SurveyFileSource {
        serde_json::from_str(js).unwrap()
    }

    #[test]
    fn column_indices() {
        let s = source(r#"{"filePath": "a.csv"}"#);
        assert_eq!(s.first_question_column().unwrap(), 1);
        assert_eq!(s.ignored_trailing_columns().unwrap(), 0);
        assert_eq!(s.provider, None);

        let s = source(
            r#"{"filePath": "a.csv", "firstQuestionColumnIndex": 4, "ignoredTrailingColumns": "2"}"#,
        );
        assert_eq!(s.first_question_column().unwrap(), 3);
        assert_eq!(s.ignored_trailing_columns().unwrap(), 2);
    }

    #[test]
    fn invalid_column_indices() {
        let s = source(r#"{"filePath": "a.csv", "firstQuestionColumnIndex": 0}"#);
        assert!(matches!(
            s.first_question_column(),
            Err(SurveyError::ParsingJsonNumber { .. })
        ));
        let s = source(r#"{"filePath": "a.csv", "ignoredTrailingColumns": "two"}"#);
        assert!(matches!(
            s.ignored_trailing_columns(),
            Err(SurveyError::ParsingJsonNumber { .. })
        ));
        let s = source(r#"{"filePath": "a.csv", "ignoredTrailingColumns": -1}"#);
        assert!(s.ignored_trailing_columns().is_err());
    }

    #[test]
    fn partial_config() {
        let c: SurveyConfig = serde_json::from_str(r#"{"groups": ["p1:r1", "p2:r1,p3:r2"]}"#).unwrap();
        assert_eq!(c.output_settings, None);
        assert_eq!(c.survey_file, None);
        assert_eq!(
            c.groups,
            Some(vec!["p1:r1".to_string(), "p2:r1,p3:r2".to_string()])
        );
    }

    #[test]
    fn missing_config_file() {
        assert!(matches!(
            read_config("/this/config/does/not/exist.json"),
            Err(SurveyError::OpeningJson { .. })
        ));
    }
}
