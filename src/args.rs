use clap::Parser;

/// This is a tabulation program for groups of answers in survey results.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file describing the survey source, the groups and the outputs.
    /// See the manual for the format. The other flags take precedence over its content.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) The survey results. Defaults to resources/encuesta.csv when neither this flag
    /// nor a configuration file is provided.
    #[clap(short, long, value_parser)]
    pub file: Option<String>,

    /// (list of groups) Groups of 'question:answer' identifiers separated by commas.
    /// Examples: -g p2:r1,p4:r1 -g p2:r1,p3:r1,p4:r5 or -g p1:r1 p2:r1,p3:r1.
    /// Defaults to p1:r1 p2:r1,p3:r1,p4:r3
    #[clap(short, long, value_parser, multiple_values = true)]
    pub groups: Option<Vec<String>>,

    /// If passed as an argument, prints the identifiers of all the questions and answers of the
    /// survey, and stops.
    #[clap(short, long, takes_value = false)]
    pub list: bool,

    /// (file path or 'stdout') If specified, the summary of the tally will be written in JSON format
    /// to the given location. Setting this option overrides the path that may be specified with
    /// the --config option.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference file containing a JSON summary. If provided, surveytally will
    /// check that the tabulated output matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (csv or xlsx) The type of the input. By default, it is derived from the extension of the file.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (default: first worksheet) When using an Excel file, indicates the name of the worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging and print the question and the answer
    /// of each group in the report.
    #[clap(short, long, takes_value = false)]
    pub verbose: bool,
}
