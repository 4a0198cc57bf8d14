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

//! snap_gdal - write the band names found in the Dimap document of ESA SNAP GeoTIFFs into the native
//! GDAL band descriptions, either in place or into a relabeled copy.

pub mod errors;
pub mod config;
pub mod profile;
pub mod rewrite;

use std::{path::Path, sync::Mutex};
use gdal::{DatasetOptions, GdalOpenFlags};

// we re-export these so that clients don't need a direct gdal dependency for basic dataset access
pub use gdal::{self, Dataset, Driver, DriverManager, Metadata, errors::GdalError, GeoTransform, cpl::CslStringList};
pub use gdal::raster::{GdalType, GdalDataType, RasterBand, RasterCreationOptions, Buffer};

use crate::errors::{Result, SnapGdalError, unsupported_data_type, config_error};

pub use config::ConvertConfig;
pub use profile::RasterProfile;
pub use rewrite::{check_band_count, relabel_in_place, relabel_to_copy, set_band_descriptions};

/// use this to protect non-threadsafe GDAL operations
static GLOB_GDAL_MUTEX: Mutex<usize> = Mutex::new(0);

/// open an existing dataset for read-write access
pub fn open_update<P:AsRef<Path>> (path: P)->Result<Dataset> {
    let dso = DatasetOptions {
        open_flags: GdalOpenFlags::GDAL_OF_UPDATE,
        allowed_drivers: None,
        open_options: None,
        sibling_files: None
    };
    Ok( Dataset::open_ex(path, dso)? )
}

/// run the provided closure with the global GDAL error handler disabled. Note this does not
/// change the return value but prevents GDAL from printing errors and warnings to the console
pub fn run_quiet<T,F> (f: F)->Result<T> where F: Fn()->Result<T> {
    let _lock = GLOB_GDAL_MUTEX.lock().unwrap_or_else( |poisoned| poisoned.into_inner());
    unsafe { gdal_sys::CPLPushErrorHandler( Some(gdal_sys::CPLQuietErrorHandler)); }
    let result = f();
    unsafe { gdal_sys::CPLPopErrorHandler(); }
    result
}

/// turn "KEY=VALUE" strings into an optional CslStringList (None if there are no options)
pub fn to_csl_string_list (strings: &[String])->Result<Option<CslStringList>> {
    if ! strings.is_empty() { // don't allocate if there is nothing to convert
        let mut co_list =  CslStringList::new();
        for s in strings {
            if !s.contains('=') { return Err( config_error( format!("not a KEY=VALUE option: '{s}'"))) }
            co_list.add_string(s.as_str())?;
        }
        Ok(Some(co_list))
    } else {
        Ok(None)
    }
}

/// the band type shared by all rasterbands of `ds`. We only support homogenous datasets
pub fn common_band_type (ds: &Dataset)->Result<GdalDataType> {
    let n_bands = ds.raster_count();
    if n_bands == 0 { return Ok(GdalDataType::UInt8) } // nothing to copy

    let band_type = ds.rasterband(1)?.band_type();
    for i in 2..=n_bands {
        let bt = ds.rasterband(i)?.band_type();
        if bt != band_type {
            return Err( unsupported_data_type( format!("mixed band types {band_type:?} and {bt:?}")))
        }
    }
    Ok(band_type)
}

pub fn create_dataset<P> (driver: &Driver, path: P, width: usize, height: usize, n_bands: usize, data_type: GdalDataType, co: Option<RasterCreationOptions>)->Result<Dataset> 
    where P: AsRef<Path>
{
    use GdalDataType::*;
    if let Some(co) = co {
        match data_type {
            UInt8   => Ok( driver.create_with_band_type_with_options::<u8,P>(path, width, height, n_bands, &co)? ),
            UInt16  => Ok( driver.create_with_band_type_with_options::<u16,P>(path, width, height, n_bands, &co)? ),
            UInt32  => Ok( driver.create_with_band_type_with_options::<u32,P>(path, width, height, n_bands, &co)? ),
            UInt64  => Ok( driver.create_with_band_type_with_options::<u64,P>(path, width, height, n_bands, &co)? ),
            Int8    => Ok( driver.create_with_band_type_with_options::<i8,P>(path, width, height, n_bands, &co)? ),
            Int16   => Ok( driver.create_with_band_type_with_options::<i16,P>(path, width, height, n_bands, &co)? ),
            Int32   => Ok( driver.create_with_band_type_with_options::<i32,P>(path, width, height, n_bands, &co)? ),
            Int64   => Ok( driver.create_with_band_type_with_options::<i64,P>(path, width, height, n_bands, &co)? ),
            Float32 => Ok( driver.create_with_band_type_with_options::<f32,P>(path, width, height, n_bands, &co)? ),
            Float64 => Ok( driver.create_with_band_type_with_options::<f64,P>(path, width, height, n_bands, &co)? ),
            _ => Err( unsupported_data_type( format!("{data_type:?}")))
        }

    } else {
        match data_type {
            UInt8   => Ok( driver.create_with_band_type::<u8,P>(path, width, height, n_bands)? ),
            UInt16  => Ok( driver.create_with_band_type::<u16,P>(path, width, height, n_bands)? ),
            UInt32  => Ok( driver.create_with_band_type::<u32,P>(path, width, height, n_bands)? ),
            UInt64  => Ok( driver.create_with_band_type::<u64,P>(path, width, height, n_bands)? ),
            Int8    => Ok( driver.create_with_band_type::<i8,P>(path, width, height, n_bands)? ),
            Int16   => Ok( driver.create_with_band_type::<i16,P>(path, width, height, n_bands)? ),
            Int32   => Ok( driver.create_with_band_type::<i32,P>(path, width, height, n_bands)? ),
            Int64   => Ok( driver.create_with_band_type::<i64,P>(path, width, height, n_bands)? ),
            Float32 => Ok( driver.create_with_band_type::<f32,P>(path, width, height, n_bands)? ),
            Float64 => Ok( driver.create_with_band_type::<f64,P>(path, width, height, n_bands)? ),
            _ => Err( unsupported_data_type( format!("{data_type:?}")))
        }
    }
}

/// copy the complete raster of `src` into `tgt`. The whole band is read into memory
pub fn copy_full_rasterband (src: &RasterBand, tgt: &mut RasterBand)->Result<()> {
    use GdalDataType::*;

    let data_type = src.band_type();
    if data_type != tgt.band_type() { return Err( SnapGdalError::MiscError("different rasterband types".into()) ) }
    if src.size() != tgt.size() { return Err( SnapGdalError::MiscError("different rasterband sizes".into()) ) }

    match data_type {
        UInt8   => copy_rasterband_type::<u8>( src, tgt),
        UInt16  => copy_rasterband_type::<u16>( src, tgt),
        UInt32  => copy_rasterband_type::<u32>( src, tgt),
        UInt64  => copy_rasterband_type::<u64>( src, tgt),
        Int8    => copy_rasterband_type::<i8>( src, tgt),
        Int16   => copy_rasterband_type::<i16>( src, tgt),
        Int32   => copy_rasterband_type::<i32>( src, tgt),
        Int64   => copy_rasterband_type::<i64>( src, tgt),
        Float32 => copy_rasterband_type::<f32>( src, tgt),
        Float64 => copy_rasterband_type::<f64>( src, tgt),
        _ => Err( unsupported_data_type( format!("{data_type:?}")))
    }
}

fn copy_rasterband_type <T: Copy + GdalType> (src: &RasterBand, tgt: &mut RasterBand)->Result<()> {
    let (width,height) = src.size();
    let mut buf: Buffer<T> = src.read_band_as::<T>()?;
    tgt.write( (0,0), (width,height), &mut buf)?;
    Ok(())
}

/// the descriptions of all rasterbands in `ds`, in band order
pub fn band_descriptions_of (ds: &Dataset)->Result<Vec<String>> {
    let mut list = Vec::with_capacity( ds.raster_count());
    for i in 1..=ds.raster_count() {
        list.push( ds.rasterband(i)?.description()?);
    }
    Ok(list)
}
