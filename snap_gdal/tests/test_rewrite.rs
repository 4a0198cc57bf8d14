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
#![allow(unused)]

use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};
use snap_gdal::{
    Buffer, ConvertConfig, Dataset, DriverManager, Metadata, RasterProfile, CslStringList,
    band_descriptions_of, check_band_count, relabel_in_place, relabel_to_copy,
    errors::{Result, SnapGdalError},
};
use snap_dimap::band_descriptions;

// run with "cargo test --test test_rewrite -- --nocapture"

const DIMAP_XML: &str = r#"<Dimap_Document><Data_File><BAND_INDEX>0</BAND_INDEX><DATA_FILE_PATH href="foo/red.img"/></Data_File><Data_File><BAND_INDEX>1</BAND_INDEX><DATA_FILE_PATH href="foo/nir.img"/></Data_File></Dimap_Document>"#;

const WIDTH: usize = 7;
const HEIGHT: usize = 5;
const GEO_TRANSFORM: [f64;6] = [ 10.0, 0.5, 0.0, 50.0, 0.0, -0.5 ];

fn pixels (band: usize)->Vec<u16> {
    (0..WIDTH*HEIGHT).map( |i| (i * 100 + band) as u16).collect()
}

/// create a GTiff with `n_bands` u16 bands that embeds `dimap` (if any) the same way SNAP does, as raw XML text in a TIFF tag
fn create_snap_tiff (path: &Path, dimap: Option<&str>, n_bands: usize, create_opts: &[&str])->Result<()> {
    let driver = DriverManager::get_driver_by_name("GTiff")?;
    let mut co = CslStringList::new();
    for opt in create_opts { co.add_string( opt)?; }

    let mut ds = driver.create_with_band_type_with_options::<u16,_>( path, WIDTH, HEIGHT, n_bands, &co)?;
    ds.set_geo_transform( &GEO_TRANSFORM)?;
    if let Some(xml) = dimap {
        ds.set_metadata_item( "TIFFTAG_IMAGEDESCRIPTION", xml, "")?;
    }

    for b in 1..=n_bands {
        let mut band = ds.rasterband(b)?;
        let mut buf = Buffer::new( (WIDTH,HEIGHT), pixels(b));
        band.write( (0,0), (WIDTH,HEIGHT), &mut buf)?;
        band.set_no_data_value( Some(0.0))?;
    }
    ds.flush_cache()?;

    Ok(())
}

fn read_pixels (path: &Path)->Result<Vec<Vec<u16>>> {
    let ds = Dataset::open( path)?;
    let mut list = Vec::new();
    for b in 1..=ds.raster_count() {
        list.push( ds.rasterband(b)?.read_band_as::<u16>()?.data().to_vec());
    }
    Ok(list)
}

fn descriptions (path: &Path)->Result<Vec<String>> {
    band_descriptions_of( &Dataset::open( path)?)
}

fn tiff_in (dir: &TempDir, name: &str)->PathBuf {
    dir.path().join( name)
}

#[test]
fn test_synthetic_file_has_raw_dimap()->Result<()> {
    let dir = tempdir()?;
    let path = tiff_in( &dir, "snap.tif");
    create_snap_tiff( &path, Some(DIMAP_XML), 2, &[])?;

    assert_eq!( band_descriptions( &path)?, vec!["red", "nir"]);
    Ok(())
}

#[test]
fn test_relabel_in_place()->Result<()> {
    let dir = tempdir()?;
    let path = tiff_in( &dir, "snap.tif");
    create_snap_tiff( &path, Some(DIMAP_XML), 2, &[])?;
    let pixels_before = read_pixels( &path)?;

    let set = relabel_in_place( &path, &ConvertConfig::default())?;
    assert_eq!( set, vec!["red", "nir"]);

    assert_eq!( descriptions( &path)?, vec!["red", "nir"]);
    assert_eq!( read_pixels( &path)?, pixels_before);

    let ds = Dataset::open( &path)?;
    assert_eq!( ds.geo_transform()?, GEO_TRANSFORM);
    assert_eq!( ds.rasterband(1)?.no_data_value(), Some(0.0));
    Ok(())
}

#[test]
fn test_relabel_to_copy()->Result<()> {
    let dir = tempdir()?;
    let input = tiff_in( &dir, "snap.tif");
    let output = tiff_in( &dir, "fixed.tif");
    create_snap_tiff( &input, Some(DIMAP_XML), 2, &["COMPRESS=DEFLATE"])?;

    let set = relabel_to_copy( &input, &output, &ConvertConfig::default())?;
    assert_eq!( set, vec!["red", "nir"]);

    assert_eq!( descriptions( &output)?, vec!["red", "nir"]);
    assert_eq!( read_pixels( &output)?, read_pixels( &input)?);
    assert_eq!( descriptions( &input)?, vec!["", ""]); // input untouched

    let ds = Dataset::open( &output)?;
    assert_eq!( ds.geo_transform()?, GEO_TRANSFORM);
    assert_eq!( ds.rasterband(2)?.no_data_value(), Some(0.0));
    assert_eq!( ds.metadata_item( "COMPRESSION", "IMAGE_STRUCTURE").as_deref(), Some("DEFLATE"));

    // dataset metadata (including the Dimap document) is carried over
    assert_eq!( band_descriptions( &output)?, vec!["red", "nir"]);
    Ok(())
}

#[test]
fn test_copy_with_create_options()->Result<()> {
    let dir = tempdir()?;
    let input = tiff_in( &dir, "snap.tif");
    let output = tiff_in( &dir, "fixed.tif");
    create_snap_tiff( &input, Some(DIMAP_XML), 2, &["COMPRESS=DEFLATE"])?;

    let config = ConvertConfig { create_options: vec!["compress=LZW".to_string()], ..ConvertConfig::default() };
    relabel_to_copy( &input, &output, &config)?;

    let ds = Dataset::open( &output)?;
    assert_eq!( ds.metadata_item( "COMPRESSION", "IMAGE_STRUCTURE").as_deref(), Some("LZW"));
    assert_eq!( read_pixels( &output)?, read_pixels( &input)?);
    Ok(())
}

#[test]
fn test_invalid_create_option()->Result<()> {
    let dir = tempdir()?;
    let input = tiff_in( &dir, "snap.tif");
    create_snap_tiff( &input, Some(DIMAP_XML), 2, &[])?;

    let profile = RasterProfile::from_dataset( &Dataset::open( &input)?, true)?;
    assert_eq!( profile.band_count, 2);
    assert_eq!( (profile.width, profile.height), (WIDTH, HEIGHT));
    assert!( matches!( profile.create_options( &["NOT_AN_OPTION".to_string()]), Err(SnapGdalError::ConfigError(_))));
    Ok(())
}

#[test]
fn test_absent_metadata()->Result<()> {
    let dir = tempdir()?;
    let input = tiff_in( &dir, "plain.tif");
    let output = tiff_in( &dir, "fixed.tif");
    create_snap_tiff( &input, None, 2, &[])?;

    assert!( band_descriptions( &input)?.is_empty());

    match relabel_in_place( &input, &ConvertConfig::default()) {
        Err(SnapGdalError::BandCountMismatch { descriptions, bands }) => {
            assert_eq!( (descriptions, bands), (0, 2));
        }
        other => panic!("expected band count mismatch, got {other:?}")
    }
    assert_eq!( descriptions( &input)?, vec!["", ""]);

    let res = relabel_to_copy( &input, &output, &ConvertConfig::default());
    assert!( matches!( res, Err(SnapGdalError::BandCountMismatch {..})));
    assert!( !output.exists());
    Ok(())
}

#[test]
fn test_count_mismatch_leaves_tags()->Result<()> {
    let dir = tempdir()?;
    let input = tiff_in( &dir, "snap3.tif");
    create_snap_tiff( &input, Some(DIMAP_XML), 3, &[])?;

    let res = relabel_in_place( &input, &ConvertConfig::default());
    assert!( matches!( res, Err(SnapGdalError::BandCountMismatch { descriptions: 2, bands: 3 })));
    assert_eq!( descriptions( &input)?, vec!["", "", ""]);
    Ok(())
}

#[test]
fn test_copy_onto_itself()->Result<()> {
    let dir = tempdir()?;
    let input = tiff_in( &dir, "snap.tif");
    create_snap_tiff( &input, Some(DIMAP_XML), 2, &[])?;

    assert!( matches!( relabel_to_copy( &input, &input, &ConvertConfig::default()), Err(SnapGdalError::MiscError(_))));
    assert_eq!( descriptions( &input)?, vec!["", ""]);
    Ok(())
}

#[test]
fn test_copy_onto_itself_other_spelling()->Result<()> {
    let dir = tempdir()?;
    let input = tiff_in( &dir, "snap.tif");
    create_snap_tiff( &input, Some(DIMAP_XML), 2, &[])?;
    std::fs::create_dir( dir.path().join("sub"))?;

    let aliases = [
        dir.path().join(".").join("snap.tif"),
        dir.path().join("sub").join("..").join("snap.tif"),
    ];
    for output in &aliases {
        let res = relabel_to_copy( &input, output, &ConvertConfig::default());
        assert!( matches!( res, Err(SnapGdalError::MiscError(_))), "{output:?} should be rejected");
    }
    assert_eq!( descriptions( &input)?, vec!["", ""]);
    assert_eq!( read_pixels( &input)?, vec![pixels(1), pixels(2)]);
    Ok(())
}

#[test]
fn test_check_band_count() {
    let names = vec!["red".to_string(), "nir".to_string()];
    assert!( check_band_count( &names, 2).is_ok());
    assert!( matches!( check_band_count( &names, 1), Err(SnapGdalError::BandCountMismatch { descriptions: 2, bands: 1 })));
    assert!( matches!( check_band_count( &[], 0), Ok(())));
}
