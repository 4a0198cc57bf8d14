/*
 * Copyright © 2025, United States Government, as represented by the Administrator of 
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License"); 
 * you may not use this file except in compliance with the License. You may obtain a copy 
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

use std::path::Path;
use tracing::{debug, warn};

use crate::{
    config::ScanConfig,
    errors::{Result, missing_structure},
    scan::{DimapScan, extract_dimap_with},
    xml::XmlElement,
};

/// what we get from a single Dimap `Data_File` element
#[derive(Debug,Clone,PartialEq)]
pub struct DataFileEntry {
    /// the raw BAND_INDEX text. Informational only - band order is the document order of Data_File elements
    pub band_index: Option<String>,

    /// the DATA_FILE_PATH href, e.g. "foo.data/B4.img"
    pub href: String,

    /// what we use as band description, e.g. "B4"
    pub band_name: String,
}

/// get the band descriptions from the Dimap document embedded in the GeoTIFF at `path`, using the default scan config.
///
/// The result is empty if there is no Dimap document or if it is malformed (which is reported by the scan). Missing
/// `Data_File` children or attributes are errors.
pub fn band_descriptions<P: AsRef<Path>> (path: P)->Result<Vec<String>> {
    band_descriptions_with( path, &ScanConfig::default())
}

pub fn band_descriptions_with<P: AsRef<Path>> (path: P, config: &ScanConfig)->Result<Vec<String>> {
    let path = path.as_ref();

    match extract_dimap_with( path, config)? {
        DimapScan::Found(root) => {
            let names: Vec<String> = data_file_entries( &root)?.into_iter().map( |e| e.band_name).collect();
            debug!("{} band descriptions in {path:?}: {names:?}", names.len());
            Ok(names)
        }
        DimapScan::NotFound => {
            debug!("no Dimap document in {path:?}");
            Ok( Vec::new())
        }
        DimapScan::Malformed(_) => Ok( Vec::new())
    }
}

/// all `Data_File` elements below `root` in document order.
///
/// Note that BAND_INDEX values are not used to order the entries. If SNAP ever writes Data_File elements out of
/// index order the bands get mislabeled, we only warn about it
pub fn data_file_entries (root: &XmlElement)->Result<Vec<DataFileEntry>> {
    let mut entries = Vec::new();

    for (i, data_file) in root.descendants("Data_File").into_iter().enumerate() {
        let band_index = data_file.find_child("BAND_INDEX")
            .ok_or_else( || missing_structure( format!("Data_File {i} has no BAND_INDEX")))?
            .text()
            .map( |s| s.to_string());

        let href = data_file.find_child("DATA_FILE_PATH")
            .ok_or_else( || missing_structure( format!("Data_File {i} has no DATA_FILE_PATH")))?
            .attribute("href")
            .ok_or_else( || missing_structure( format!("DATA_FILE_PATH of Data_File {i} has no href")))?;

        if let Some(idx) = band_index.as_deref().and_then( |s| s.trim().parse::<usize>().ok()) {
            if idx != i {
                warn!("Data_File {i} ({href}) has BAND_INDEX {idx}, using document order");
            }
        }

        let band_name = band_name_from_href( href)?;
        entries.push( DataFileEntry { band_index, href: href.to_string(), band_name });
    }

    Ok(entries)
}

/// the band name is the second '/' separated segment of the href, without anything from its first '.' onwards:
/// "foo.data/B4.img" -> "B4"
pub fn band_name_from_href (href: &str)->Result<String> {
    let segment = href.split('/').nth(1)
        .ok_or_else( || missing_structure( format!("no file segment in DATA_FILE_PATH href '{href}'")))?;

    let name = match segment.find('.') {
        Some(i) => &segment[..i],
        None => segment
    };
    Ok( name.to_string())
}
