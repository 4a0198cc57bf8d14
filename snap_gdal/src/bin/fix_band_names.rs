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

use std::sync::LazyLock;
use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use snap_dimap::band_descriptions_with;
use snap_gdal::{ConvertConfig, relabel_in_place, relabel_to_copy};

/// command line arguments
#[derive(Parser,Debug)]
#[command(about = "fix_band_names - write the band names of the SNAP Dimap metadata into GeoTIFF band descriptions")]
struct CliOpts {
    /// optional RON config file (ConvertConfig)
    #[arg(long)]
    config: Option<String>,

    /// read chunks of 8192 * N bytes when scanning for the Dimap document (default 32)
    #[arg(long)]
    chunk_multiplier: Option<usize>,

    /// GDAL creation options for the output file (copy mode only), e.g. --co COMPRESS=LZW
    #[arg(long)]
    co: Vec<String>,

    /// only print the band names found in the input, don't modify anything
    #[arg(long)]
    list: bool,

    /// input GeoTIFF
    input: String,

    /// optional output GeoTIFF. If omitted the input is modified in place
    output: Option<String>,
}

static ARGS: LazyLock<CliOpts> = LazyLock::new( CliOpts::parse);

fn main()->Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter( EnvFilter::from_default_env())  // use RUST_LOG to set max level
        .init();

    let mut config = match &ARGS.config {
        Some(path) => ConvertConfig::load( path)?,
        None => ConvertConfig::default()
    };
    if let Some(n) = ARGS.chunk_multiplier { config.scan.chunk_multiplier = n; }
    config.create_options.extend( ARGS.co.iter().cloned());

    if ARGS.list {
        let descriptions = band_descriptions_with( &ARGS.input, &config.scan)?;
        for (i, descr) in descriptions.iter().enumerate() {
            println!("{:3}: {}", i+1, descr);
        }
        return Ok(())
    }

    let descriptions = match &ARGS.output {
        Some(output) => relabel_to_copy( &ARGS.input, output, &config)?,
        None => relabel_in_place( &ARGS.input, &config)?
    };
    println!("{} band descriptions set: {:?}", descriptions.len(), descriptions);

    Ok(())
}
