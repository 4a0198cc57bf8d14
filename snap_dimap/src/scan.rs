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

use std::{fs::File, io::{ErrorKind, Read}, path::Path};
use memchr::memmem::Finder;
use tracing::{debug, warn};

use crate::{
    config::ScanConfig,
    decode::LossyUtf8Decoder,
    errors::{Result, config_error},
    xml::XmlElement,
};

/// the start marker (the root element can have attributes so we don't include the closing '>')
pub const DIMAP_START: &str = "<Dimap_Document";
pub const DIMAP_END: &str = "</Dimap_Document>";

/*
   chunk k             chunk k+1           chunk k+2
   |..........<Dimap_Do|cument ....... </Di|map_Document>......|
              ^                                            ^
              start (kept in tail)                         end (found after k+2 got appended)

   before we see the start marker we only keep a tail of len(DIMAP_START)-1 chars, after that the
   buffer starts at the marker and grows until we find the end marker
*/

/// the outcome of a Dimap scan
#[derive(Debug)]
pub enum DimapScan {
    /// the embedded document, parsed
    Found(XmlElement),

    /// there is no start/end marker pair in the file
    NotFound,

    /// the markers were found but the text in-between is not well-formed XML (the parse error)
    Malformed(String),
}

impl DimapScan {
    pub fn is_found (&self)->bool {
        matches!( self, DimapScan::Found(_))
    }

    pub fn root (&self)->Option<&XmlElement> {
        if let DimapScan::Found(root) = self { Some(root) } else { None }
    }

    pub fn into_root (self)->Option<XmlElement> {
        if let DimapScan::Found(root) = self { Some(root) } else { None }
    }
}

/// a marker we look for in the scan buffer. Wraps a memchr::memmem::Finder so that we only pay
/// the setup cost once per scanner
struct MarkerFinder (Finder<'static>);

impl MarkerFinder {
    fn new (marker: &'static str)->Self { MarkerFinder( Finder::new( marker.as_bytes())) }

    #[inline]
    fn len (&self)->usize { self.0.needle().len() }

    #[inline]
    fn find (&self, haystack: &str, from: usize)->Option<usize> {
        self.0.find( &haystack.as_bytes()[from..]).map( |i| i + from)
    }
}

/// streaming scanner for the Dimap document that SNAP embeds into its GeoTIFFs
pub struct DimapScanner {
    chunk_size: usize,
    start: MarkerFinder,
    end: MarkerFinder,
}

impl DimapScanner {
    pub fn new (chunk_size: usize)->Self {
        DimapScanner {
            chunk_size: chunk_size.max(1),
            start: MarkerFinder::new( DIMAP_START),
            end: MarkerFinder::new( DIMAP_END),
        }
    }

    pub fn from_config (config: &ScanConfig)->Result<Self> {
        Ok( DimapScanner::new( config.chunk_size()?) )
    }

    pub fn chunk_size (&self)->usize {
        self.chunk_size
    }

    /// scan `reader` for the Dimap document and parse it.
    /// Read errors are returned as errors, a malformed document is reported and returned as `DimapScan::Malformed`
    pub fn scan<R: Read> (&self, reader: R)->Result<DimapScan> {
        match self.scan_fragment( reader)? {
            Some(fragment) => {
                match XmlElement::parse( &fragment) {
                    Ok(root) => Ok( DimapScan::Found(root)),
                    Err(e) => {
                        warn!("Dimap XML parsing error: {e}");
                        Ok( DimapScan::Malformed( e.to_string()))
                    }
                }
            }
            None => Ok( DimapScan::NotFound)
        }
    }

    /// scan `reader` for the text from the first start marker up to and including the next end marker, without
    /// parsing it. Returns `None` if we hit the end of the stream before we have seen both markers
    pub fn scan_fragment<R: Read> (&self, mut reader: R)->Result<Option<String>> {
        let mut chunk = alloc_chunk( self.chunk_size)?;
        let mut decoder = LossyUtf8Decoder::new();
        let mut buffer = String::new();
        let mut found_start = false;
        let mut end_search_pos = 0; // no end marker can start before this position
        let mut n_chunks = 0;

        loop {
            let len = read_chunk( &mut reader, &mut chunk)?;
            if len == 0 {
                decoder.finish();
                debug!("no Dimap document found after {n_chunks} chunks");
                return Ok(None)
            }
            n_chunks += 1;

            decoder.decode_into( &chunk[..len], &mut buffer);

            if !found_start {
                if let Some(i) = self.start.find( &buffer, 0) {
                    found_start = true;
                    buffer.drain(..i);
                    debug!("Dimap start marker found in chunk {n_chunks}");
                } else {
                    retain_tail( &mut buffer, self.start.len() - 1);
                    continue;
                }
            }

            if let Some(i) = self.end.find( &buffer, end_search_pos) {
                buffer.truncate( i + self.end.len());
                debug!("Dimap end marker found in chunk {n_chunks}, fragment has {} bytes", buffer.len());
                return Ok( Some(buffer))
            }
            end_search_pos = buffer.len().saturating_sub( self.end.len() - 1);
        }
    }
}

/// allocate a zeroed chunk buffer, reporting allocation failures as errors
fn alloc_chunk (size: usize)->Result<Vec<u8>> {
    let mut chunk = Vec::new();
    chunk.try_reserve_exact( size)
        .map_err( |e| config_error( format!("cannot allocate chunk of {size} bytes: {e}")))?;
    chunk.resize( size, 0);
    Ok(chunk)
}

/// fill `buf` from `reader` unless we reach the end of the stream. Returns the number of bytes read,
/// which is only less than `buf.len()` at the end of the stream
fn read_chunk<R: Read> (reader: &mut R, buf: &mut [u8])->std::io::Result<usize> {
    let mut len = 0;
    while len < buf.len() {
        match reader.read( &mut buf[len..]) {
            Ok(0) => break,
            Ok(n) => len += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e)
        }
    }
    Ok(len)
}

/// drop everything but the last `max_len` bytes (or less if that is not on a char boundary)
fn retain_tail (buffer: &mut String, max_len: usize) {
    if buffer.len() > max_len {
        let mut i = buffer.len() - max_len;
        while !buffer.is_char_boundary(i) { i += 1 }
        buffer.drain(..i);
    }
}

/// scan the file at `path` for the embedded Dimap document, reading chunks of `8192 * chunk_multiplier` bytes
pub fn extract_dimap<P: AsRef<Path>> (path: P, chunk_multiplier: usize)->Result<DimapScan> {
    extract_dimap_with( path, &ScanConfig::with_multiplier( chunk_multiplier))
}

pub fn extract_dimap_with<P: AsRef<Path>> (path: P, config: &ScanConfig)->Result<DimapScan> {
    let scanner = DimapScanner::from_config( config)?;
    let file = File::open( path.as_ref())?;
    debug!("scanning {:?} for Dimap document with chunk size {}", path.as_ref(), scanner.chunk_size());
    scanner.scan( file)
}
