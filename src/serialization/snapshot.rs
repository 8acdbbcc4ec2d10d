use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::base::{BinningError, Counter, DeserializationError, ReadableCurve, SerializationError};
use crate::serialization::compression::{Compressor, Decompressor, ZlibCompressor, ZlibDecompressor};
use crate::serialization::constants::*;
use crate::serialization::zigzag;

/// Fine-resolution state detached from any session.
#[derive(Clone, Debug, PartialEq)]
pub struct CurveSnapshot<C> {
    pub edges: Vec<i64>,
    pub counts: Vec<C>,
}

impl<C: Counter> CurveSnapshot<C> {
    pub fn of<H: ReadableCurve<Count = C>>(curve: &H) -> CurveSnapshot<C> {
        CurveSnapshot {
            edges: curve.edges().to_vec(),
            counts: curve.counts().to_vec(),
        }
    }

    /// Reads a plain or compressed encoding, telling them apart by cookie.
    pub fn deserialize_from<T: Buf>(buf: &mut T) -> Result<CurveSnapshot<C>, DeserializationError> {
        Self::deserialize_from_custom_compressed(buf, &mut ZlibDecompressor::default())
    }

    pub fn deserialize_from_custom_compressed<T: Buf, D: Decompressor>(
        buf: &mut T,
        decompressor: &mut D,
    ) -> Result<CurveSnapshot<C>, DeserializationError> {
        if buf.remaining() < COMPRESSED_HEADER_SIZE {
            return Err(DeserializationError::Truncated);
        }
        let cookie = buf.get_u32();
        match cookie {
            ENCODING_COOKIE => decode_plain(buf),
            COMPRESSED_ENCODING_COOKIE => {
                let compressed = take_sized(buf)?;
                let inflated = decompressor.decompress(&compressed)?;
                let mut inflated = Bytes::from(inflated);
                if inflated.remaining() < 4 || inflated.get_u32() != ENCODING_COOKIE {
                    return Err(DeserializationError::DecompressionFailed);
                }
                let snapshot = decode_plain(&mut inflated)?;
                if inflated.has_remaining() {
                    return Err(DeserializationError::TrailingBytes);
                }
                Ok(snapshot)
            }
            other => Err(DeserializationError::UnknownCookie(other)),
        }
    }
}

fn take_sized<T: Buf>(buf: &mut T) -> Result<Bytes, DeserializationError> {
    let len = buf.get_u32() as usize;
    if buf.remaining() < len {
        return Err(DeserializationError::Truncated);
    }
    Ok(buf.copy_to_bytes(len))
}

// the cookie has already been consumed
fn decode_plain<T: Buf, C: Counter>(buf: &mut T) -> Result<CurveSnapshot<C>, DeserializationError> {
    if buf.remaining() < ENCODING_HEADER_SIZE - 4 {
        return Err(DeserializationError::Truncated);
    }
    let payload_len = buf.get_u32() as usize;
    let edge_count = buf.get_u32() as usize;
    let _word_size = buf.get_u8();
    if buf.remaining() < payload_len {
        return Err(DeserializationError::Truncated);
    }
    let mut payload = buf.copy_to_bytes(payload_len);

    if edge_count < 2 {
        return Err(DeserializationError::InvalidEdges(BinningError::MalformedEdges));
    }
    // every edge takes at least one byte
    if edge_count > payload.len() {
        return Err(DeserializationError::Truncated);
    }

    let mut edges = Vec::with_capacity(edge_count);
    let mut edge = zigzag::get_i64(&mut payload)?;
    edges.push(edge);
    for _ in 1..edge_count {
        let delta = zigzag::get_i64(&mut payload)?;
        edge = edge
            .checked_add(delta)
            .ok_or(DeserializationError::InvalidEdges(BinningError::MalformedEdges))?;
        edges.push(edge);
    }

    let counts_len = edge_count - 1;
    let mut counts = vec![C::zero(); counts_len];
    let mut idx = 0_usize;
    while payload.has_remaining() && idx < counts_len {
        let count = zigzag::get_i64(&mut payload)?;
        if count < 0 {
            idx = idx.saturating_add(count.unsigned_abs() as usize);
        } else {
            counts[idx] = C::from_i64(count).ok_or(DeserializationError::CountExceedsTypeMax)?;
            idx += 1;
        }
    }
    if payload.has_remaining() || idx > counts_len {
        return Err(DeserializationError::TrailingBytes);
    }

    Ok(CurveSnapshot { edges, counts })
}

fn fill_payload<T: BufMut, C: Counter>(buf: &mut T, edges: &[i64], counts: &[C]) -> Result<(), SerializationError> {
    let mut previous = 0_i64;
    for (i, &edge) in edges.iter().enumerate() {
        if i == 0 {
            zigzag::put_i64(buf, edge);
        } else {
            zigzag::put_i64(buf, edge.wrapping_sub(previous));
        }
        previous = edge;
    }

    let mut zeroes_count = 0_i64;
    for count in counts.iter() {
        if *count == C::zero() {
            zeroes_count += 1;
        } else {
            if zeroes_count != 0 {
                zigzag::put_i64(buf, -zeroes_count);
                zeroes_count = 0;
            }
            zigzag::put_u64(buf, count.as_u64())?;
        }
    }
    Ok(())
}

/// Binary encoding of a curve's edges and counts.
///
/// Layout, big endian: cookie `u32`, payload length `u32`, edge count `u32`,
/// counter word size `u8`, then the payload: the first edge and each
/// following edge delta as zigzag varints, then the counts with runs of
/// empty bins folded into a single negative varint. Trailing empty bins are
/// not written.
pub trait SerializableCurve: ReadableCurve {
    fn serialize_into<T: BufMut>(&self, buf: &mut T) -> Result<usize, SerializationError> {
        let edges = self.edges();
        if edges.is_empty() {
            return Err(SerializationError::Uninitialized);
        }
        let mut payload = BytesMut::with_capacity(edges.len() * 2 + self.counts().len());
        fill_payload(&mut payload, edges, self.counts())?;

        buf.put_u32(ENCODING_COOKIE);
        buf.put_u32(payload.len() as u32);
        buf.put_u32(edges.len() as u32);
        buf.put_u8(<Self::Count as Counter>::word_size());
        buf.put_slice(&payload);
        Ok(ENCODING_HEADER_SIZE + payload.len())
    }

    fn serialize_into_custom_compressed<T: BufMut, S: Compressor>(
        &self,
        buf: &mut T,
        compressor: &mut S,
    ) -> Result<usize, SerializationError> {
        let mut uncompressed = BytesMut::new();
        self.serialize_into(&mut uncompressed)?;
        let compressed = compressor.compress(&uncompressed);

        buf.put_u32(COMPRESSED_ENCODING_COOKIE);
        buf.put_u32(compressed.len() as u32);
        buf.put_slice(&compressed);
        Ok(COMPRESSED_HEADER_SIZE + compressed.len())
    }

    fn serialize_into_compressed<T: BufMut>(&self, buf: &mut T) -> Result<usize, SerializationError> {
        self.serialize_into_custom_compressed(buf, &mut ZlibCompressor::default())
    }

    fn serialize(&self) -> Result<BytesMut, SerializationError> {
        let mut buffer = BytesMut::new();
        self.serialize_into(&mut buffer)?;
        Ok(buffer)
    }

    fn serialize_compressed(&self) -> Result<BytesMut, SerializationError> {
        let mut buffer = BytesMut::new();
        self.serialize_into_compressed(&mut buffer)?;
        Ok(buffer)
    }
}

impl<H: ReadableCurve> SerializableCurve for H {}
