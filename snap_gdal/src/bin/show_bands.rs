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
use snap_gdal::{Dataset, Metadata};

#[derive(Parser,Debug)]
#[command(about = "show_bands - show descriptions and meta information for raster bands of a GDAL dataset")]
struct CliOpts {
    /// also print metadata items
    #[arg(long, short)]
    verbose: bool,

    /// path to GDAL dataset to analyze
    path: String,
}

static ARGS: LazyLock<CliOpts> = LazyLock::new( CliOpts::parse);

fn main ()->Result<()> {
    let ds = Dataset::open( &ARGS.path)?;

    let (width,height) = ds.raster_size();
    println!("raster size: {width},{height}");
    if ARGS.verbose { show_meta( &ds, 0)?; }

    for i in 0..ds.raster_count() {
        let band_id = i+1;
        let band = ds.rasterband( band_id)?;
        let descr = band.description().unwrap_or_default();
        println!("--- band {band_id}: '{descr}' ({:?})", band.band_type());
        if ARGS.verbose { show_meta( &band, 4)?; }
    }

    Ok(())
}

fn show_meta<M> (meta: &M, level: usize)->Result<()> where M: Metadata {
    let indent = " ".repeat( level);

    for domain in meta.metadata_domains() {
        if let Some(items) = meta.metadata_domain( &domain) {
            if !items.is_empty() {
                println!("{}domain: '{}'", indent, domain);
                for item in &items {
                    println!("{}    {}", indent, item);
                }
            }
        }
    }

    Ok(())
}
