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

pub type Result<T> = std::result::Result<T, DimapError>;

#[derive(Error,Debug)]
pub enum DimapError {

    // pass through for IO errors
    #[error("IO error: {0}")]
    IOError( #[from] std::io::Error),

    // the fragment is not well-formed XML
    #[error("XML error: {0}")]
    XmlError(String),

    // a Data_File element lacks a required child or attribute
    #[error("missing Dimap structure: {0}")]
    MissingStructure(String),

    #[error("config error: {0}")]
    ConfigError(String),
}

impl From<quick_xml::Error> for DimapError {
    fn from (e: quick_xml::Error)->Self { DimapError::XmlError( e.to_string()) }
}

pub fn xml_error<S: ToString> (msg: S)->DimapError {
    DimapError::XmlError(msg.to_string())
}

pub fn missing_structure<S: ToString> (msg: S)->DimapError {
    DimapError::MissingStructure(msg.to_string())
}

pub fn config_error<S: ToString> (msg: S)->DimapError {
    DimapError::ConfigError(msg.to_string())
}
