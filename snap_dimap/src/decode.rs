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

/// incremental, lossy UTF-8 decoding of byte chunks that can mix text with binary raster data.
///
/// Invalid byte sequences are dropped. A multi-byte sequence that is cut off at the end of a chunk
/// is kept and completed with the next chunk, which makes the decoded text independent of where the
/// chunk boundaries fall.
#[derive(Debug,Default)]
pub struct LossyUtf8Decoder {
    pending: Vec<u8>, // at most 3 bytes of an incomplete sequence
}

impl LossyUtf8Decoder {
    pub fn new()->Self {
        LossyUtf8Decoder { pending: Vec::with_capacity(4) }
    }

    /// decode `chunk` and append the resulting text to `out`
    pub fn decode_into (&mut self, chunk: &[u8], out: &mut String) {
        let mut carry = std::mem::take( &mut self.pending);
        let mut rest: &[u8] = if carry.is_empty() {
            chunk
        } else {
            carry.extend_from_slice( chunk);
            carry.as_slice()
        };

        loop {
            match std::str::from_utf8( rest) {
                Ok(s) => {
                    out.push_str( s);
                    break;
                }
                Err(e) => {
                    let valid_len = e.valid_up_to();
                    out.push_str( &String::from_utf8_lossy( &rest[..valid_len])); // borrowed, no replacement chars

                    match e.error_len() {
                        Some(invalid_len) => { // skip the invalid sequence
                            rest = &rest[valid_len + invalid_len..];
                        }
                        None => { // incomplete sequence at the end, wait for the next chunk
                            self.pending.extend_from_slice( &rest[valid_len..]);
                            break;
                        }
                    }
                }
            }
        }
    }

    /// number of bytes still waiting for their continuation
    pub fn pending_len (&self)->usize {
        self.pending.len()
    }

    /// end of input - an incomplete trailing sequence is dropped like any other invalid sequence
    pub fn finish (&mut self) {
        self.pending.clear();
    }
}

/// convenience function for a single, self-contained byte slice
pub fn decode_lossy (bytes: &[u8])->String {
    let mut decoder = LossyUtf8Decoder::new();
    let mut s = String::with_capacity( bytes.len());
    decoder.decode_into( bytes, &mut s);
    decoder.finish();
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_invalid() {
        assert_eq!( decode_lossy( b"ab\xffc\xfe\xfed"), "abcd");
    }

    #[test]
    fn test_split_sequence() {
        let bytes = "x\u{00e9}y\u{20ac}z".as_bytes(); // 2 and 3 byte sequences
        for split in 0..=bytes.len() {
            let mut decoder = LossyUtf8Decoder::new();
            let mut s = String::new();
            decoder.decode_into( &bytes[..split], &mut s);
            decoder.decode_into( &bytes[split..], &mut s);
            decoder.finish();
            assert_eq!( s, "x\u{00e9}y\u{20ac}z", "split at {split}");
        }
    }

    #[test]
    fn test_truncated_tail() {
        let mut decoder = LossyUtf8Decoder::new();
        let mut s = String::new();
        decoder.decode_into( b"abc\xe2\x82", &mut s);
        assert_eq!( decoder.pending_len(), 2);
        decoder.finish();
        assert_eq!( s, "abc");
    }
}
