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
use thiserror::Error;
use gdal::errors::GdalError;
use snap_dimap::DimapError;

pub type Result<T> = std::result::Result<T, SnapGdalError>;

#[derive(Error,Debug)]
pub enum SnapGdalError {

    // pass through for errors from the gdal crate
    #[error("GDAL error {0}")]
    GdalError( #[from] GdalError),

    #[error("Dimap error {0}")]
    DimapError( #[from] DimapError),

    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    // raised before anything gets written
    #[error("number of descriptions ({descriptions}) must match number of bands ({bands})")]
    BandCountMismatch { descriptions: usize, bands: usize },

    #[error("unsupported raster data type: {0}")]
    UnsupportedDataType(String),

    #[error("config error: {0}")]
    ConfigError(String),

    // generic self-created error
    #[error("operation failed: {0}")]
    MiscError(String),
}

pub fn misc_error<S: ToString> (msg: S)->SnapGdalError {
    SnapGdalError::MiscError(msg.to_string())
}

pub fn config_error<S: ToString> (msg: S)->SnapGdalError {
    SnapGdalError::ConfigError(msg.to_string())
}

pub fn unsupported_data_type<S: ToString> (msg: S)->SnapGdalError {
    SnapGdalError::UnsupportedDataType(msg.to_string())
}
