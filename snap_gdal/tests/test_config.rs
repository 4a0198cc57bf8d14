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

use snap_gdal::ConvertConfig;
use snap_dimap::DEFAULT_CHUNK_MULTIPLIER;

// run with "cargo test --test test_config -- --nocapture"

#[test]
fn test_full_config() {
    let ron = r#"ConvertConfig(
        scan: ScanConfig( chunk_multiplier: 4 ),
        create_options: [ "COMPRESS=DEFLATE", "TILED=YES" ],
        copy_metadata: false,
    )"#;
    let config: ConvertConfig = ron::from_str( ron).unwrap();
    assert_eq!( config.scan.chunk_multiplier, 4);
    assert_eq!( config.create_options, vec!["COMPRESS=DEFLATE", "TILED=YES"]);
    assert!( !config.copy_metadata);
}

#[test]
fn test_defaults() {
    let config: ConvertConfig = ron::from_str( "ConvertConfig()").unwrap();
    assert_eq!( config, ConvertConfig::default());
    assert_eq!( config.scan.chunk_multiplier, DEFAULT_CHUNK_MULTIPLIER);
    assert!( config.copy_metadata);
}

#[test]
fn test_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("convert.ron");
    std::fs::write( &path, "ConvertConfig( create_options: [\"COMPRESS=LZW\"] )").unwrap();

    let config = ConvertConfig::load( &path).unwrap();
    assert_eq!( config.create_options, vec!["COMPRESS=LZW"]);
    assert_eq!( config.scan.chunk_multiplier, DEFAULT_CHUNK_MULTIPLIER);

    assert!( ConvertConfig::load( dir.path().join("missing.ron")).is_err());
}
