use log::{debug, info, warn};
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::{Path, PathBuf};

use contest_pivot::*;
use text_diff::print_diff;

use crate::args::Args;

pub mod config_reader;
pub mod io_common;
pub mod io_excel;
pub mod io_tsv;

use crate::pipeline::config_reader::*;
use crate::pipeline::io_common::*;

#[derive(Debug, Snafu)]
pub enum PivotError {
    #[snafu(display("Error opening input file {path}"))]
    OpeningInput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error reading a record of {path}"))]
    ParsingTsv { source: csv::Error, path: String },
    #[snafu(display("Missing required column {column} in {path}"))]
    MissingColumn { column: String, path: String },
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("No worksheet named {worksheet} in {path}"))]
    MissingWorksheet { worksheet: String, path: String },
    #[snafu(display("Empty workbook or worksheet in {path}"))]
    EmptyExcel { path: String },
    #[snafu(display("Unexpected cell content in {path} at line {lineno}: {content}"))]
    ExcelWrongCellType {
        path: String,
        lineno: u64,
        content: String,
    },
    #[snafu(display("Cannot read the winners file {path}"))]
    OpeningWinners {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error opening JSON file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error writing CSV file {path}"))]
    WritingCsv { source: csv::Error, path: String },
    #[snafu(display("Error writing {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Cannot derive an output name from {path}"))]
    InvalidInputName { path: String },
    #[snafu(display("No input files to process"))]
    NoInputFiles {},
    #[snafu(display("Unknown input type {input_type:?} (expected tsv or xlsx)"))]
    UnknownInputType { input_type: String },
    #[snafu(display(
        "A reference index can only be checked for a single input file, found {count}"
    ))]
    ReferenceNeedsSingleInput { count: usize },
    #[snafu(display("Difference detected between the generated index and the reference {path}"))]
    ReferenceMismatch { path: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type PivotResult<T> = Result<T, PivotError>;
pub type BPivotResult<T> = Result<T, Box<PivotError>>;

/// The readers for the results extracts.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum InputType {
    Tsv,
    Excel,
}

impl InputType {
    pub fn parse(s: &str) -> PivotResult<InputType> {
        match s.to_lowercase().as_str() {
            "tsv" | "txt" => Ok(InputType::Tsv),
            "xlsx" | "excel" => Ok(InputType::Excel),
            _ => UnknownInputTypeSnafu { input_type: s }.fail(),
        }
    }

    /// `.xlsx` files are read as workbooks, everything else as tab-delimited text.
    pub fn from_path(path: &Path) -> InputType {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("xlsx") => InputType::Excel,
            _ => InputType::Tsv,
        }
    }
}

/// The settings of a run, once the command line and the configuration file are merged.
#[derive(PartialEq, Debug, Clone)]
pub struct BatchSettings {
    pub inputs: Vec<PathBuf>,
    pub output_dir: PathBuf,
    pub winners_file: PathBuf,
    pub rules: PartitionRules,
    pub input_type: Option<InputType>,
    pub excel_worksheet_name: Option<String>,
    pub reference: Option<PathBuf>,
}

pub fn settings_from_args(args: &Args) -> BPivotResult<BatchSettings> {
    let config = match args.config.as_ref() {
        Some(config_path) => {
            let config = read_config(config_path)?;
            info!("config: {:?}", config);
            let base = Path::new(config_path)
                .parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_default();
            Some((config, base))
        }
        None => None,
    };
    Ok(merge_settings(args, config.as_ref())?)
}

/// Reads the winners file. Its absence stops the run.
pub fn read_winners(path: &Path) -> PivotResult<WinnerRegistry> {
    let p = path.display().to_string();
    info!("Attempting to read winners file {:?}", p);
    let bytes = fs::read(path).context(OpeningWinnersSnafu { path: p })?;
    let registry = WinnerRegistry::parse(&String::from_utf8_lossy(&bytes));
    info!("Read {} contests from the winners file", registry.len());
    Ok(registry)
}

/// Replaces the directories in the inputs by the results files they contain.
pub fn expand_inputs(inputs: &[PathBuf]) -> PivotResult<Vec<PathBuf>> {
    let mut res: Vec<PathBuf> = Vec::new();
    for input in inputs.iter() {
        if input.is_dir() {
            let mut found: Vec<PathBuf> = Vec::new();
            let entries = fs::read_dir(input)
                .with_whatever_context(|_| format!("Cannot list directory {}", input.display()))?;
            for entry in entries {
                let p = entry
                    .with_whatever_context(|_| format!("Cannot list directory {}", input.display()))?
                    .path();
                let is_results = p.is_file()
                    && matches!(
                        p.extension().and_then(|e| e.to_str()).map(|e| e.to_lowercase()),
                        Some(ref e) if e == "txt" || e == "xlsx"
                    );
                if is_results {
                    found.push(p);
                }
            }
            found.sort();
            debug!("expand_inputs: {:?} -> {:?}", input, found);
            res.extend(found);
        } else {
            res.push(input.clone());
        }
    }
    Ok(res)
}

/// Reads, tabulates and writes out one results file. Returns the path and the
/// content of the index.
pub fn process_file(
    path: &Path,
    settings: &BatchSettings,
    winners: &WinnerRegistry,
) -> BPivotResult<(PathBuf, ContestIndex)> {
    let input_type = settings
        .input_type
        .unwrap_or_else(|| InputType::from_path(path));
    let rows = match input_type {
        InputType::Tsv => io_tsv::read_tsv_rows(path)?,
        InputType::Excel => {
            io_excel::read_excel_rows(path, settings.excel_worksheet_name.as_deref())?
        }
    };
    let stem = file_stem(path)?;
    let outputs = tabulate_file(rows, &stem, winners, &settings.rules);

    for output in outputs.iter() {
        let csv_path = settings.output_dir.join(&output.record.csv_file);
        write_pivot_csv(&csv_path, &output.pivot)?;
        debug!("process_file: wrote {:?}", csv_path);
    }

    let index = build_index(&outputs);
    let index_path = settings.output_dir.join(format!("{}.json", stem));
    write_index_json(&index_path, &index)?;
    info!(
        "Wrote {} contests to {:?}",
        index.contests.len(),
        index_path
    );
    Ok((index_path, index))
}

/// Compares an index with a reference index. Both are pretty-printed with sorted keys
/// before the comparison, and the differences are printed.
pub fn check_reference(index: &ContestIndex, reference_path: &Path) -> BPivotResult<()> {
    let p = reference_path.display().to_string();
    let summary_ref = read_reference(&p)?;
    let pretty_js_summary_ref =
        serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
    let js = serde_json::to_value(index).context(ParsingJsonSnafu {})?;
    let pretty_js_stats = serde_json::to_string_pretty(&js).context(ParsingJsonSnafu {})?;
    if pretty_js_summary_ref != pretty_js_stats {
        warn!("Found differences with the reference index");
        print_diff(
            pretty_js_summary_ref.as_str(),
            pretty_js_stats.as_str(),
            "\n",
        );
        return Err(Box::new(PivotError::ReferenceMismatch { path: p }));
    }
    info!("The index matches the reference {:?}", p);
    Ok(())
}

/// Processes all the inputs, one file after the other. Returns the paths of the indexes.
pub fn run_batch(settings: &BatchSettings) -> BPivotResult<Vec<PathBuf>> {
    let inputs = expand_inputs(&settings.inputs)?;
    if inputs.is_empty() {
        return Err(Box::new(PivotError::NoInputFiles {}));
    }
    if settings.reference.is_some() && inputs.len() != 1 {
        return Err(Box::new(PivotError::ReferenceNeedsSingleInput {
            count: inputs.len(),
        }));
    }

    let winners = read_winners(&settings.winners_file)?;

    fs::create_dir_all(&settings.output_dir).context(WritingOutputSnafu {
        path: settings.output_dir.display().to_string(),
    })?;

    let mut written: Vec<PathBuf> = Vec::new();
    for input in inputs.iter() {
        info!("Processing {:?}", input);
        let (index_path, index) = process_file(input, settings, &winners)?;
        if let Some(reference) = settings.reference.as_ref() {
            check_reference(&index, reference)?;
        }
        written.push(index_path);
    }
    Ok(written)
}
