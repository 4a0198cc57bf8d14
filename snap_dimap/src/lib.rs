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

//! snap_dimap - locate and interpret the Dimap XML document that ESA SNAP embeds into the GeoTIFFs it writes.
//!
//! The document is found by scanning the raw file bytes in fixed size chunks, i.e. we never load the whole
//! raster into memory and we do not need to understand the TIFF structure around it. Once isolated, the
//! fragment is turned into a small owned element tree from which we extract the band names.

pub mod errors;
pub mod config;
pub mod decode;
pub mod xml;
pub mod scan;
pub mod bands;

pub use errors::{DimapError, Result};
pub use config::{ScanConfig, load_ron_config, BASE_CHUNK_SIZE, DEFAULT_CHUNK_MULTIPLIER, MAX_CHUNK_MULTIPLIER};
pub use xml::XmlElement;
pub use scan::{DimapScan, DimapScanner, extract_dimap, extract_dimap_with, DIMAP_START, DIMAP_END};
pub use bands::{DataFileEntry, band_descriptions, band_descriptions_with, data_file_entries, band_name_from_href};
