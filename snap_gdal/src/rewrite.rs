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
use gdal::{Dataset, Metadata};
use tracing::{debug, info};
use snap_dimap::band_descriptions_with;

use crate::{config::ConvertConfig, copy_full_rasterband, open_update, profile::RasterProfile};
use crate::errors::{Result, SnapGdalError, misc_error};

/// the validation step shared by all relabel operations. This has to be called before anything gets modified
pub fn check_band_count (descriptions: &[String], band_count: usize)->Result<()> {
    if descriptions.len() != band_count {
        Err( SnapGdalError::BandCountMismatch { descriptions: descriptions.len(), bands: band_count })
    } else {
        Ok(())
    }
}

/// set description of band `i+1` to `descriptions[i]`
pub fn set_band_descriptions (ds: &mut Dataset, descriptions: &[String])->Result<()> {
    check_band_count( descriptions, ds.raster_count())?;

    for (i, descr) in descriptions.iter().enumerate() {
        let mut band = ds.rasterband( i+1)?;
        band.set_description( descr)?;
        debug!("band {} -> '{descr}'", i+1);
    }
    Ok(())
}

/// write the band names of the embedded Dimap document into the band descriptions of `input` itself.
/// Returns the descriptions that were set
pub fn relabel_in_place<P: AsRef<Path>> (input: P, config: &ConvertConfig)->Result<Vec<String>> {
    let input = input.as_ref();
    let descriptions = band_descriptions_with( input, &config.scan)?;

    let mut ds = open_update( input)?;
    check_band_count( &descriptions, ds.raster_count())?;

    set_band_descriptions( &mut ds, &descriptions)?;
    ds.flush_cache()?;

    info!("set {} band descriptions of {input:?}", descriptions.len());
    Ok(descriptions)
}

/// does `output` refer to the existing `input` file, regardless of how both paths are spelled.
/// The output does not have to exist yet, but its parent directory does
fn is_same_file (input: &Path, output: &Path)->Result<bool> {
    let input = fs::canonicalize( input)?;

    let output = match (output.parent(), output.file_name()) {
        (Some(parent), Some(name)) => {
            let parent = if parent.as_os_str().is_empty() { Path::new(".") } else { parent };
            fs::canonicalize( parent)?.join( name)
        }
        _ => return Err( misc_error( format!("not a file path: {output:?}")))
    };
    // the output itself might be a symlink to the input
    let output = fs::canonicalize( &output).unwrap_or( output);

    Ok( input == output)
}

/// create a copy of `input` at `output` that has the same pixel data and profile, plus band descriptions
/// taken from the embedded Dimap document of `input`. The input is not modified.
/// Returns the descriptions that were set
pub fn relabel_to_copy<P: AsRef<Path>, Q: AsRef<Path>> (input: P, output: Q, config: &ConvertConfig)->Result<Vec<String>> {
    let input = input.as_ref();
    let output = output.as_ref();
    if is_same_file( input, output)? {
        return Err( misc_error( format!("output has to differ from input {input:?}, omit it to relabel in place")))
    }

    let descriptions = band_descriptions_with( input, &config.scan)?;

    let src = Dataset::open( input)?;
    check_band_count( &descriptions, src.raster_count())?;

    let profile = RasterProfile::from_dataset( &src, config.copy_metadata)?;
    let mut tgt = profile.create_dataset( output, &config.create_options)?;

    for (i, descr) in descriptions.iter().enumerate() {
        let band_index = i + 1;
        let src_band = src.rasterband( band_index)?;
        let mut tgt_band = tgt.rasterband( band_index)?;

        copy_full_rasterband( &src_band, &mut tgt_band)?;
        tgt_band.set_description( descr)?;
        debug!("copied band {band_index} as '{descr}'");
    }
    tgt.flush_cache()?;

    info!("copied {input:?} to {output:?} with {} band descriptions", descriptions.len());
    Ok(descriptions)
}
