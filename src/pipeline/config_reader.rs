use crate::args::Args;
use crate::pipeline::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

pub const DEFAULT_OUTPUT_DIR: &str = ".";
pub const DEFAULT_WINNERS_FILE: &str = "winners.txt";

/// The content of the JSON configuration file. All the fields are optional.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct BatchConfig {
    pub inputs: Option<Vec<String>>,
    #[serde(rename = "outputDirectory")]
    pub output_directory: Option<String>,
    #[serde(rename = "winnersFile")]
    pub winners_file: Option<String>,
    #[serde(rename = "excludedContests")]
    pub excluded_contests: Option<Vec<String>>,
    #[serde(rename = "inputType")]
    pub input_type: Option<String>,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
}

pub fn read_config(path: &str) -> BPivotResult<BatchConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: BatchConfig = serde_json::from_str(&contents).context(ParsingJsonSnafu {})?;
    Ok(config)
}

pub fn read_reference(path: &str) -> BPivotResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

// Paths of the configuration file are relative to its directory.
fn resolve(base: &Path, p: &str) -> PathBuf {
    let pb = PathBuf::from(p);
    if pb.is_absolute() {
        pb
    } else {
        base.join(pb)
    }
}

/// Merges the command line with the configuration file.
///
/// The command line wins over the configuration, which wins over the defaults.
pub fn merge_settings(
    args: &Args,
    config: Option<&(BatchConfig, PathBuf)>,
) -> PivotResult<BatchSettings> {
    let empty = (BatchConfig::default(), PathBuf::new());
    let (cfg, base) = config.unwrap_or(&empty);

    let inputs: Vec<PathBuf> = if !args.input.is_empty() {
        args.input.iter().map(PathBuf::from).collect()
    } else {
        cfg.inputs
            .iter()
            .flatten()
            .map(|p| resolve(base, p))
            .collect()
    };

    let output_dir = match (args.out.as_ref(), cfg.output_directory.as_ref()) {
        (Some(o), _) => PathBuf::from(o),
        (None, Some(o)) => resolve(base, o),
        (None, None) => PathBuf::from(DEFAULT_OUTPUT_DIR),
    };

    let winners_file = match (args.winners.as_ref(), cfg.winners_file.as_ref()) {
        (Some(w), _) => PathBuf::from(w),
        (None, Some(w)) => resolve(base, w),
        (None, None) => PathBuf::from(DEFAULT_WINNERS_FILE),
    };

    let rules = if !args.exclude.is_empty() {
        PartitionRules {
            excluded_contests: args.exclude.clone(),
        }
    } else if let Some(excluded) = cfg.excluded_contests.as_ref() {
        PartitionRules {
            excluded_contests: excluded.clone(),
        }
    } else {
        PartitionRules::default_rules()
    };

    let input_type = match args.input_type.as_ref().or(cfg.input_type.as_ref()) {
        Some(s) => Some(InputType::parse(s)?),
        None => None,
    };

    Ok(BatchSettings {
        inputs,
        output_dir,
        winners_file,
        rules,
        input_type,
        excel_worksheet_name: args
            .excel_worksheet_name
            .clone()
            .or_else(|| cfg.excel_worksheet_name.clone()),
        reference: args.reference.as_ref().map(PathBuf::from),
    })
}
