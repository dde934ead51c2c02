//! ZIP writer for stored (uncompressed) entries
//!
//! Writes every local header and its content, then the central directory, then
//! the end-of-central-directory record, into one pre-sized buffer.

use super::crc::compute_crc32;
use super::dos_time::ZipDateTime;
use crate::error::{ExcelError, Result};
use crate::types::ArchivePart;

const LOCAL_HEADER_SIGNATURE: u32 = 0x0403_4B50;
const CENTRAL_HEADER_SIGNATURE: u32 = 0x0201_4B50;
const END_OF_CENTRAL_DIR_SIGNATURE: u32 = 0x0605_4B50;

pub const LOCAL_HEADER_LEN: usize = 30;
pub const CENTRAL_HEADER_LEN: usize = 46;
pub const END_OF_CENTRAL_DIR_LEN: usize = 22;

/// ZIP 2.0
const VERSION: u16 = 20;
const METHOD_STORED: u16 = 0;

/// Entry already written, remembered for the central directory
struct ZipEntry<'a> {
    name: &'a [u8],
    local_header_offset: u32,
    crc32: u32,
    size: u32,
}

/// Writer producing a complete store-only archive in memory
#[derive(Debug, Clone, Copy)]
pub struct StoredZipWriter {
    modified: ZipDateTime,
}

impl StoredZipWriter {
    /// All entries are stamped with `modified`
    pub fn new(modified: ZipDateTime) -> Self {
        Self { modified }
    }

    /// Exact byte length of the archive for `parts`
    pub fn archive_len(parts: &[ArchivePart]) -> usize {
        let entries: usize = parts
            .iter()
            .map(|p| LOCAL_HEADER_LEN + CENTRAL_HEADER_LEN + 2 * p.path.len() + p.content.len())
            .sum();
        entries + END_OF_CENTRAL_DIR_LEN
    }

    fn check_limits(parts: &[ArchivePart]) -> Result<()> {
        if parts.len() > usize::from(u16::MAX) {
            return Err(ExcelError::ArchiveTooLarge(format!(
                "{} entries, at most {} allowed",
                parts.len(),
                u16::MAX
            )));
        }
        if let Some(part) = parts.iter().find(|p| p.path.len() > usize::from(u16::MAX)) {
            return Err(ExcelError::ArchiveTooLarge(format!(
                "entry name of {} bytes",
                part.path.len()
            )));
        }
        // Every offset and size is bounded by the total length
        let total = Self::archive_len(parts);
        if u32::try_from(total).is_err() {
            return Err(ExcelError::ArchiveTooLarge(format!(
                "{total} bytes exceeds the 4 GiB limit"
            )));
        }
        Ok(())
    }

    /// Serialize `parts` in order into a single archive
    pub fn write(&self, parts: &[ArchivePart]) -> Result<Vec<u8>> {
        Self::check_limits(parts)?;

        let mut out = Vec::with_capacity(Self::archive_len(parts));
        let mut entries = Vec::with_capacity(parts.len());

        for part in parts {
            let entry = ZipEntry {
                name: part.path.as_bytes(),
                local_header_offset: out.len() as u32,
                crc32: compute_crc32(&part.content),
                size: part.content.len() as u32,
            };
            self.write_local_header(&mut out, &entry);
            out.extend_from_slice(&part.content);
            log::trace!(
                "stored {} ({} bytes, crc {:08x}) at offset {}",
                part.path,
                entry.size,
                entry.crc32,
                entry.local_header_offset
            );
            entries.push(entry);
        }

        let central_dir_offset = out.len() as u32;
        for entry in &entries {
            self.write_central_header(&mut out, entry);
        }
        let central_dir_size = out.len() as u32 - central_dir_offset;

        // End of central directory
        put_u32(&mut out, END_OF_CENTRAL_DIR_SIGNATURE);
        put_u16(&mut out, 0); // disk number
        put_u16(&mut out, 0); // disk with central dir
        put_u16(&mut out, entries.len() as u16); // entries on this disk
        put_u16(&mut out, entries.len() as u16); // total entries
        put_u32(&mut out, central_dir_size);
        put_u32(&mut out, central_dir_offset);
        put_u16(&mut out, 0); // comment len

        debug_assert_eq!(out.len(), Self::archive_len(parts));
        Ok(out)
    }

    fn write_local_header(&self, out: &mut Vec<u8>, entry: &ZipEntry<'_>) {
        put_u32(out, LOCAL_HEADER_SIGNATURE);
        put_u16(out, VERSION); // version needed
        put_u16(out, 0); // general purpose bit flag
        put_u16(out, METHOD_STORED);
        put_u16(out, self.modified.time);
        put_u16(out, self.modified.date);
        put_u32(out, entry.crc32);
        put_u32(out, entry.size); // compressed size
        put_u32(out, entry.size); // uncompressed size
        put_u16(out, entry.name.len() as u16);
        put_u16(out, 0); // extra len
        out.extend_from_slice(entry.name);
    }

    fn write_central_header(&self, out: &mut Vec<u8>, entry: &ZipEntry<'_>) {
        put_u32(out, CENTRAL_HEADER_SIGNATURE);
        put_u16(out, VERSION); // version made by
        put_u16(out, VERSION); // version needed
        put_u16(out, 0); // general purpose bit flag
        put_u16(out, METHOD_STORED);
        put_u16(out, self.modified.time);
        put_u16(out, self.modified.date);
        put_u32(out, entry.crc32);
        put_u32(out, entry.size);
        put_u32(out, entry.size);
        put_u16(out, entry.name.len() as u16);
        put_u16(out, 0); // extra len
        put_u16(out, 0); // file comment len
        put_u16(out, 0); // disk number start
        put_u16(out, 0); // internal attrs
        put_u32(out, 0); // external attrs
        put_u32(out, entry.local_header_offset);
        out.extend_from_slice(entry.name);
    }
}

#[inline]
fn put_u16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_le_bytes());
}

#[inline]
fn put_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}
