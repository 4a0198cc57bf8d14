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
use gdal::{Dataset, DriverManager, GeoTransform, Metadata, raster::GdalDataType};
use tracing::debug;

use crate::{common_band_type, create_dataset, run_quiet, to_csl_string_list, RasterCreationOptions};
use crate::errors::{Result, config_error};

/// metadata domains we never copy. They are either derived by the driver or hold structures we do not want to duplicate
const SKIPPED_DOMAINS: &[&str] = &["IMAGE_STRUCTURE", "DERIVED_SUBDATASETS", "SUBDATASETS"];

/// IMAGE_STRUCTURE items that translate into GTiff creation options (item key -> creation option key)
const STRUCTURE_OPTIONS: &[(&str,&str)] = &[
    ("COMPRESSION", "COMPRESS"),
    ("INTERLEAVE", "INTERLEAVE"),
    ("PREDICTOR", "PREDICTOR"),
];

/// the non-pixel properties of a raster dataset that we need to create an equivalent container
#[derive(Debug,Clone)]
pub struct RasterProfile {
    pub driver_name: String,
    pub width: usize,
    pub height: usize,
    pub band_count: usize,
    pub data_type: GdalDataType,
    pub geo_transform: Option<GeoTransform>,
    pub projection: String,
    pub nodata: Vec<Option<f64>>,

    /// (domain, "KEY=VALUE" items) of the dataset level metadata we carry over
    pub metadata: Vec<(String,Vec<String>)>,

    /// creation options derived from the IMAGE_STRUCTURE domain of the source
    pub structure_options: Vec<(String,String)>,
}

impl RasterProfile {

    /// capture the profile of `ds`. If `with_metadata` is false we do not copy dataset level metadata items
    pub fn from_dataset (ds: &Dataset, with_metadata: bool)->Result<RasterProfile> {
        let driver_name = ds.driver().short_name();
        let (width, height) = ds.raster_size();
        let band_count = ds.raster_count();
        let data_type = common_band_type( ds)?;

        // not every dataset has a geotransform, and we don't want GDAL to complain about it on the console
        let geo_transform = run_quiet( || Ok( ds.geo_transform()? )).ok();
        let projection = ds.projection();

        let mut nodata = Vec::with_capacity( band_count);
        for i in 1..=band_count {
            nodata.push( ds.rasterband(i)?.no_data_value());
        }

        let metadata = if with_metadata { copyable_metadata( ds) } else { Vec::new() };
        let structure_options = structure_options( ds);

        Ok( RasterProfile { driver_name, width, height, band_count, data_type, geo_transform, projection, nodata, metadata, structure_options } )
    }

    /// the creation options for a copy: what we derived from the source overridden/extended by `extra` ("KEY=VALUE")
    pub fn create_options (&self, extra: &[String])->Result<Option<RasterCreationOptions>> {
        let mut opts: Vec<(String,String)> = if self.driver_name == "GTiff" { self.structure_options.clone() } else { Vec::new() };

        for s in extra {
            let (key, value) = s.split_once('=').ok_or_else( || config_error( format!("not a KEY=VALUE option: '{s}'")))?;
            let key = key.trim().to_uppercase();
            match opts.iter_mut().find( |(k,_)| *k == key) {
                Some(opt) => opt.1 = value.trim().to_string(),
                None => opts.push( (key, value.trim().to_string()))
            }
        }

        let strings: Vec<String> = opts.iter().map( |(k,v)| format!("{k}={v}")).collect();
        to_csl_string_list( &strings)
    }

    /// create a new dataset at `path` with this profile. Pixel data and band descriptions are not set
    pub fn create_dataset<P: AsRef<Path>> (&self, path: P, extra_options: &[String])->Result<Dataset> {
        let driver = DriverManager::get_driver_by_name( &self.driver_name)?;
        let co = self.create_options( extra_options)?;
        debug!("creating {:?} with driver {}, source options {:?}, extra options {:?}", path.as_ref(), self.driver_name, self.structure_options, extra_options);

        let mut ds = create_dataset( &driver, path, self.width, self.height, self.band_count, self.data_type, co)?;

        if let Some(geo_transform) = &self.geo_transform { ds.set_geo_transform( geo_transform)?; }
        if !self.projection.is_empty() { ds.set_projection( &self.projection)?; }

        for (domain, items) in &self.metadata {
            for item in items {
                if let Some((key,value)) = item.split_once('=') {
                    ds.set_metadata_item( key, value, domain)?;
                }
            }
        }

        for (i, nodata) in self.nodata.iter().enumerate() {
            if nodata.is_some() {
                ds.rasterband( i+1)?.set_no_data_value( *nodata)?;
            }
        }

        Ok(ds)
    }
}

fn copyable_metadata (ds: &Dataset)->Vec<(String,Vec<String>)> {
    let mut list = Vec::new();
    for domain in ds.metadata_domains() {
        if SKIPPED_DOMAINS.contains( &domain.as_str()) || domain.starts_with("xml:") { continue }
        if let Some(items) = ds.metadata_domain( &domain) {
            if !items.is_empty() {
                list.push( (domain, items));
            }
        }
    }
    list
}

fn structure_options (ds: &Dataset)->Vec<(String,String)> {
    let mut opts = Vec::new();
    for (item_key, option_key) in STRUCTURE_OPTIONS {
        if let Some(value) = ds.metadata_item( item_key, "IMAGE_STRUCTURE") {
            if !value.contains(' ') { // e.g. "YCbCr JPEG" has no creation option counterpart
                opts.push( (option_key.to_string(), value));
            }
        }
    }
    opts
}
