pub const ENCODING_COOKIE: u32 = 0x1c84_9313;
pub const COMPRESSED_ENCODING_COOKIE: u32 = 0x1c84_9314;
/// cookie, payload length, edge count, counter word size
pub const ENCODING_HEADER_SIZE: usize = 4 + 4 + 4 + 1;
pub const COMPRESSED_HEADER_SIZE: usize = 4 + 4;
