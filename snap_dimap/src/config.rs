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

use std::{fs, path::Path};
use serde::{Serialize,Deserialize};
use crate::errors::{Result, config_error};

/// the unit of our read chunks. The actual chunk size is a multiple of this
pub const BASE_CHUNK_SIZE: usize = 8192;

/// default chunk multiplier, which gives us 256 KiB reads
pub const DEFAULT_CHUNK_MULTIPLIER: usize = 32;

/// upper bound for chunk multipliers, which gives us 64 MiB reads
pub const MAX_CHUNK_MULTIPLIER: usize = 8192;

/// configuration of the Dimap scan. Can be embedded into RON config files of client crates, e.g.
/// ```text
/// ScanConfig( chunk_multiplier: 64 )
/// ```
#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
#[serde(default)]
pub struct ScanConfig {
    pub chunk_multiplier: usize,
}

impl Default for ScanConfig {
    fn default()->Self {
        ScanConfig { chunk_multiplier: DEFAULT_CHUNK_MULTIPLIER }
    }
}

impl ScanConfig {
    pub fn with_multiplier (chunk_multiplier: usize)->Self {
        ScanConfig { chunk_multiplier }
    }

    /// the number of bytes we read per chunk. Fails for a multiplier outside of `1..=MAX_CHUNK_MULTIPLIER`
    pub fn chunk_size (&self)->Result<usize> {
        if self.chunk_multiplier == 0 {
            return Err( config_error("chunk multiplier has to be > 0"))
        }
        if self.chunk_multiplier > MAX_CHUNK_MULTIPLIER {
            return Err( config_error( format!("chunk multiplier too large: {} (max {MAX_CHUNK_MULTIPLIER})", self.chunk_multiplier)))
        }
        Ok( BASE_CHUNK_SIZE * self.chunk_multiplier)
    }
}

/// read a RON serialized config of type `C` from the given file
pub fn load_ron_config<C,P> (path: P)->Result<C> where C: for<'a> Deserialize<'a>, P: AsRef<Path> {
    let path = path.as_ref();
    let data = fs::read( path)?;
    ron::de::from_bytes( data.as_slice())
        .map_err( |e| config_error( format!("invalid config {path:?}: {e}")))
}
