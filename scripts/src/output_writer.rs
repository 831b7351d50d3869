//! Address list files written by the sanctions extractor

use std::{
    fs::{self, File},
    io::Read,
    path::{Path, PathBuf},
};

use json::JsonValue;

use crate::{
    cli::{Asset, OutputFormat},
    constants::SANCTIONED_ADDRESSES_FILE_STEM,
    errors::ScriptError,
};

/// Path of the address list for `asset` in `format` under `dir`
pub fn address_list_path(dir: &Path, asset: Asset, format: OutputFormat) -> PathBuf {
    dir.join(format!(
        "{}_{}.{}",
        SANCTIONED_ADDRESSES_FILE_STEM,
        asset,
        format.extension()
    ))
}

/// Writes the address list of `asset`, returning the written file
pub fn write_address_list(
    dir: &Path,
    asset: Asset,
    format: OutputFormat,
    addresses: &[String],
) -> Result<PathBuf, ScriptError> {
    let path = address_list_path(dir, asset, format);

    let contents = match format {
        OutputFormat::Txt => addresses.iter().map(|a| format!("{a}\n")).collect(),
        OutputFormat::Json => json::stringify_pretty(JsonValue::from(addresses.to_vec()), 2),
    };

    fs::write(&path, contents).map_err(|e| ScriptError::JsonOutputError(e.to_string()))?;

    Ok(path)
}

/// Read a JSON array of addresses, e.g. a previously written list
pub fn read_address_list(file_path: &Path) -> Result<Vec<String>, ScriptError> {
    let parsed_json = get_json_from_file(file_path)?;
    if !parsed_json.is_array() {
        return Err(ScriptError::JsonOutputError(format!(
            "{} is not a JSON array",
            file_path.display()
        )));
    }

    Ok(parsed_json
        .members()
        .filter_map(JsonValue::as_str)
        .map(str::to_string)
        .collect())
}

/// Parses the JSON file at the given path
fn get_json_from_file(file_path: &Path) -> Result<JsonValue, ScriptError> {
    let mut file_contents = String::new();
    File::open(file_path)
        .map_err(|e| ScriptError::JsonOutputError(e.to_string()))?
        .read_to_string(&mut file_contents)
        .map_err(|e| ScriptError::JsonOutputError(e.to_string()))?;

    json::parse(&file_contents).map_err(|e| ScriptError::JsonOutputError(e.to_string()))
}
