//! CRC-32 (IEEE 802.3, reflected polynomial 0xEDB88320) as required by ZIP headers

const POLYNOMIAL: u32 = 0xEDB8_8320;

/// Lookup table, computed at compile time
pub static CRC_TABLE: [u32; 256] = build_crc_table();

/// Build the 256-entry byte-wise lookup table
pub const fn build_crc_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut index = 0;
    while index < 256 {
        let mut current = index as u32;
        let mut bit = 0;
        while bit < 8 {
            current = if current & 1 == 1 {
                POLYNOMIAL ^ (current >> 1)
            } else {
                current >> 1
            };
            bit += 1;
        }
        table[index] = current;
        index += 1;
    }
    table
}

/// Compute the CRC-32 of a byte slice
#[inline]
pub fn compute_crc32(bytes: &[u8]) -> u32 {
    let mut crc = 0xFFFF_FFFFu32;
    for &byte in bytes {
        crc = CRC_TABLE[((crc ^ u32::from(byte)) & 0xFF) as usize] ^ (crc >> 8);
    }
    crc ^ 0xFFFF_FFFF
}
