//! Extraction of sanctioned digital currency addresses from the OFAC
//! special designated nationals list (advanced XML format).
//!
//! Addresses live in `Feature` elements of `DistinctParties` whose
//! `FeatureTypeID` points at a `FeatureType` named
//! `Digital Currency Address - <ASSET>` in `ReferenceValueSets`.

use std::{collections::HashSet, fs};

use roxmltree::{Document, Node};
use tracing::info;

use crate::{
    cli::{Asset, SanctionsCli},
    constants::{FEATURE_TYPE_PREFIX, SDN_URL},
    errors::ScriptError,
    output_writer::{read_address_list, write_address_list},
};

/// A parsed SDN list
pub struct SdnList<'input> {
    /// The whole XML tree
    doc: Document<'input>,
}

impl<'input> SdnList<'input> {
    /// Parse the raw XML
    pub fn parse(xml: &'input str) -> Result<Self, ScriptError> {
        let doc = Document::parse(xml).map_err(|e| ScriptError::XmlParsing(e.to_string()))?;
        Ok(Self { doc })
    }

    /// ID of the feature type holding the addresses of `asset`
    pub fn feature_type_id(&self, asset: Asset) -> Result<&str, ScriptError> {
        let feature_type_text = format!("{FEATURE_TYPE_PREFIX}{asset}");

        self.doc
            .descendants()
            .filter(|n| is(n, "ReferenceValueSets"))
            .flat_map(|sets| sets.children().filter(|n| is(n, "FeatureTypeValues")))
            .flat_map(|values| values.children().filter(Node::is_element))
            .find(|n| n.text().map(str::trim) == Some(feature_type_text.as_str()))
            .and_then(|n| n.attribute("ID"))
            .ok_or(ScriptError::UnknownFeatureType(feature_type_text))
    }

    /// Sorted, deduplicated, lowercase addresses of `asset`
    pub fn addresses(&self, asset: Asset) -> Result<Vec<String>, ScriptError> {
        let id = self.feature_type_id(asset)?;

        let mut addresses: Vec<String> = self
            .doc
            .descendants()
            .filter(|n| is(n, "DistinctParties"))
            .flat_map(|parties| parties.descendants())
            .filter(|n| n.attribute("FeatureTypeID") == Some(id))
            .flat_map(|feature| feature.descendants().filter(|n| is(n, "VersionDetail")))
            .filter_map(|detail| detail.text())
            .map(|address| address.trim().to_lowercase())
            .filter(|address| !address.is_empty())
            .collect();

        addresses.sort();
        addresses.dedup();

        Ok(addresses)
    }
}

/// Whether `node` is an element with local name `name`
fn is(node: &Node, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name
}

/// Addresses of `downloaded` missing from `existing`, ignoring case
pub fn new_addresses(downloaded: &[String], existing: &[String]) -> Vec<String> {
    let existing: HashSet<String> = existing.iter().map(|a| a.to_lowercase()).collect();
    downloaded
        .iter()
        .filter(|a| !existing.contains(&a.to_lowercase()))
        .cloned()
        .collect()
}

/// Download the SDN list
pub async fn download_sdn_list() -> Result<String, ScriptError> {
    info!("Downloading {SDN_URL}...");

    reqwest::get(SDN_URL)
        .await
        .and_then(|response| response.error_for_status())
        .map_err(|e| ScriptError::SanctionsDownload(e.to_string()))?
        .text()
        .await
        .map_err(|e| ScriptError::SanctionsDownload(e.to_string()))
}

/// Extract and write the address lists requested on the command line
pub async fn run(cli: &SanctionsCli) -> Result<(), ScriptError> {
    let xml = match &cli.sdn_file {
        Some(path) => fs::read_to_string(path)
            .map_err(|e| ScriptError::SdnFile(format!("{}: {}", path.display(), e)))?,
        None => download_sdn_list().await?,
    };
    let list = SdnList::parse(&xml)?;

    let existing = cli
        .compare_file
        .as_deref()
        .map(read_address_list)
        .transpose()?;

    for asset in &cli.assets {
        let addresses = list.addresses(*asset)?;
        info!("Found {} sanctioned {asset} addresses", addresses.len());

        for format in &cli.output_format {
            let path = write_address_list(&cli.output_path, *asset, *format, &addresses)?;
            info!("Wrote {}", path.display());
        }

        if let Some(existing) = &existing {
            for address in new_addresses(&addresses, existing) {
                println!("{address}");
            }
        }
    }

    Ok(())
}
