use bytes::{Buf, BufMut};

use crate::base::{DeserializationError, SerializationError};

// LEB128 over zigzag-folded values, at most 10 bytes per i64.

pub fn put_u64<T: BufMut>(buffer: &mut T, value: u64) -> Result<(), SerializationError> {
    if value >> 63 == 1 {
        Err(SerializationError::ValueNotLEBEncodable)
    } else {
        put_i64(buffer, value as i64);
        Ok(())
    }
}

pub fn put_i64<T: BufMut>(buffer: &mut T, value: i64) {
    let mut folded = ((value << 1) ^ (value >> 63)) as u64;
    while folded >> 7 != 0 {
        buffer.put_u8(((folded & 0x7F) | 0x80) as u8);
        folded >>= 7;
    }
    buffer.put_u8(folded as u8);
}

pub fn get_i64<T: Buf>(buffer: &mut T) -> Result<i64, DeserializationError> {
    let mut value = 0_u64;
    let mut shift = 0;
    loop {
        if !buffer.has_remaining() || shift > 63 {
            return Err(DeserializationError::Truncated);
        }
        let byte = buffer.get_u8();
        value |= u64::from(byte & 0x7F) << shift;
        if byte & 0x80 == 0 {
            break;
        }
        shift += 7;
    }
    Ok(((value >> 1) as i64) ^ -((value & 1) as i64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    #[test]
    fn small_values_take_one_byte() {
        let mut buf = BytesMut::new();
        put_i64(&mut buf, 0);
        put_i64(&mut buf, -1);
        put_i64(&mut buf, 63);
        assert_eq!(&[0_u8, 1, 126][..], &buf[..]);
    }

    #[test]
    fn extremes_survive() {
        let mut buf = BytesMut::new();
        put_i64(&mut buf, i64::MIN);
        put_i64(&mut buf, i64::MAX);
        put_u64(&mut buf, 102398084419879874).unwrap();
        let mut b = buf.freeze();
        assert_eq!(Ok(i64::MIN), get_i64(&mut b));
        assert_eq!(Ok(i64::MAX), get_i64(&mut b));
        assert_eq!(Ok(102398084419879874), get_i64(&mut b));
        assert_eq!(Err(DeserializationError::Truncated), get_i64(&mut b));
    }

    #[test]
    fn u64_with_top_bit_is_rejected() {
        let mut buf = BytesMut::new();
        assert_eq!(Err(SerializationError::ValueNotLEBEncodable), put_u64(&mut buf, u64::MAX));
    }
}
