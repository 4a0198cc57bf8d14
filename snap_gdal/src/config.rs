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
use serde::{Serialize,Deserialize};
use snap_dimap::{ScanConfig, load_ron_config};
use crate::errors::Result;

/// configuration for band relabeling, usually read from a RON file like
/// ```text
/// ConvertConfig(
///     scan: ScanConfig( chunk_multiplier: 32 ),
///     create_options: [ "COMPRESS=DEFLATE", "TILED=YES" ],
///     copy_metadata: true,
/// )
/// ```
/// all fields are optional
#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
#[serde(default)]
pub struct ConvertConfig {
    /// how to scan for the embedded Dimap document
    pub scan: ScanConfig,

    /// additional GDAL creation options for copies ("KEY=VALUE"). These override what we derive from the source
    pub create_options: Vec<String>,

    /// copy dataset level metadata items into copies
    pub copy_metadata: bool,
}

impl Default for ConvertConfig {
    fn default()->Self {
        ConvertConfig {
            scan: ScanConfig::default(),
            create_options: Vec::new(),
            copy_metadata: true,
        }
    }
}

impl ConvertConfig {
    pub fn load<P: AsRef<Path>> (path: P)->Result<Self> {
        Ok( load_ron_config( path)? )
    }
}
