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

use std::{fs::File, sync::LazyLock};
use anyhow::{Result, anyhow};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use snap_dimap::{DimapScanner, ScanConfig, DEFAULT_CHUNK_MULTIPLIER};

#[derive(Parser,Debug)]
#[command(about = "dump_dimap - print the Dimap XML document embedded in a SNAP GeoTIFF")]
struct CliOpts {
    /// read chunks of 8192 * N bytes
    #[arg(long, default_value_t = DEFAULT_CHUNK_MULTIPLIER)]
    chunk_multiplier: usize,

    /// path of the GeoTIFF to scan
    path: String,
}

static ARGS: LazyLock<CliOpts> = LazyLock::new( CliOpts::parse);

fn main ()->Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter( EnvFilter::from_default_env())
        .init();

    let scanner = DimapScanner::from_config( &ScanConfig::with_multiplier( ARGS.chunk_multiplier))?;
    let file = File::open( &ARGS.path)?;

    match scanner.scan_fragment( file)? {
        Some(fragment) => {
            println!("{fragment}");
            Ok(())
        }
        None => Err( anyhow!("no Dimap document in {}", ARGS.path))
    }
}
