use clap::Parser;

/// Builds per-contest precinct tables and a JSON index from election results extracts.
#[derive(Parser, Debug, Clone, Default)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file with the settings of the run. All the other options
    /// override the values of this file.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file or directory path, repeatable) The results extracts to process. A directory is
    /// expanded to all the .txt and .xlsx files it contains.
    #[clap(short, long, value_parser)]
    pub input: Vec<String>,

    /// (directory path, default '.') Where the CSV files and the JSON indexes are written.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path, default winners.txt) The file that lists the number of seats of each contest.
    #[clap(short, long, value_parser)]
    pub winners: Option<String>,

    /// (tsv or xlsx) The type of the input. By default, it is guessed from the file extension.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (default: first worksheet) When using an Excel file, the name of the worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (repeatable) Contests whose title contains this text (in any case) are left out.
    /// Replaces the default list (DURHAM, ANGIER).
    #[clap(long, value_parser)]
    pub exclude: Vec<String>,

    /// (file path) A reference index in JSON format. If provided, ncpivot checks that the
    /// generated index matches the reference. Only valid with a single input file.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
