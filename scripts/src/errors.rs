//! Definitions of errors that can occur during the execution of the deployment scripts

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Errors that can occur during the execution of the deployment scripts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    /// The deploy runner was started without a script name
    MissingScriptName,
    /// Error parsing the command line
    ArgumentParse(String),
    /// Error reading the dotenv file
    EnvFile(String),
    /// Error deriving the deployer key from the mnemonic
    KeyDerivation(String),
    /// Error spawning or running an external process
    Process(String),
    /// Error downloading the sanctions list
    SanctionsDownload(String),
    /// Error reading a local copy of the sanctions list
    SdnFile(String),
    /// Error parsing the sanctions list
    XmlParsing(String),
    /// The sanctions list has no feature type for an asset
    UnknownFeatureType(String),
    /// Error reading or writing a json / txt output file
    JsonOutputError(String),
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::MissingScriptName => write!(f, "script name is mandatory"),
            ScriptError::ArgumentParse(s) => write!(f, "Argument parse failed!, error: {}", s),
            ScriptError::EnvFile(s) => write!(f, "error reading env file: {}", s),
            ScriptError::KeyDerivation(s) => write!(f, "error deriving key from mnemonic: {}", s),
            ScriptError::Process(s) => write!(f, "error running process: {}", s),
            ScriptError::SanctionsDownload(s) => {
                write!(f, "error downloading sanctions list: {}", s)
            }
            ScriptError::SdnFile(s) => write!(f, "error reading sanctions list file: {}", s),
            ScriptError::XmlParsing(s) => write!(f, "error parsing sanctions list: {}", s),
            ScriptError::UnknownFeatureType(s) => {
                write!(f, "No FeatureType with the name {} found", s)
            }
            ScriptError::JsonOutputError(s) => write!(f, "error writing output: {}", s),
        }
    }
}

impl Error for ScriptError {}
