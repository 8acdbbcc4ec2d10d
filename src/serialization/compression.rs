use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use miniz_oxide::inflate::decompress_to_vec_zlib_with_limit;

use crate::base::DeserializationError;

pub trait Compressor {
    fn compress(&mut self, src: &[u8]) -> Vec<u8>;
}

pub trait Decompressor {
    fn decompress(&mut self, src: &[u8]) -> Result<Vec<u8>, DeserializationError>;
}

/// zlib framed deflate.
pub struct ZlibCompressor {
    level: CompressionLevel,
}

impl ZlibCompressor {
    pub fn new(level: CompressionLevel) -> ZlibCompressor {
        ZlibCompressor { level }
    }
}

impl Default for ZlibCompressor {
    fn default() -> ZlibCompressor {
        ZlibCompressor::new(CompressionLevel::DefaultLevel)
    }
}

impl Compressor for ZlibCompressor {
    fn compress(&mut self, src: &[u8]) -> Vec<u8> {
        compress_to_vec_zlib(src, self.level as u8)
    }
}

/// Inflates zlib streams, refusing output beyond `max_output` bytes.
pub struct ZlibDecompressor {
    max_output: usize,
}

impl ZlibDecompressor {
    pub fn new(max_output: usize) -> ZlibDecompressor {
        ZlibDecompressor { max_output }
    }
}

impl Default for ZlibDecompressor {
    fn default() -> ZlibDecompressor {
        ZlibDecompressor::new(1 << 30)
    }
}

impl Decompressor for ZlibDecompressor {
    fn decompress(&mut self, src: &[u8]) -> Result<Vec<u8>, DeserializationError> {
        decompress_to_vec_zlib_with_limit(src, self.max_output).map_err(|_| DeserializationError::DecompressionFailed)
    }
}
