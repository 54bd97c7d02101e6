//! Logical to physical address translation under paging.
//!
//! Pure arithmetic, no page table: the caller supplies the frame a page is
//! mapped to. Sizes are byte counts, already normalized by the caller.
//! Page and frame sizes are expected to be powers of two; the functions do
//! not check it, and [address_bit_width] rounds up when they are not.

use serde::{Deserialize, Serialize};

use crate::error::PagingError;

/// A logical address split into its page and offset, and where it lands
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    pub logical_address: u64,
    pub page_number: u64,
    pub offset: u64,
    pub frame_number: u64,
    pub physical_address: u64,
}

fn positive(value: u64, what: &'static str) -> Result<u64, PagingError> {
    if value == 0 {
        Err(PagingError::InvalidSize { what })
    } else {
        Ok(value)
    }
}

/// Page holding `logical_address`
pub fn page_number(logical_address: u64, page_size: u64) -> Result<u64, PagingError> {
    Ok(logical_address / positive(page_size, "page size")?)
}

/// Position of `logical_address` inside its page
pub fn page_offset(logical_address: u64, page_size: u64) -> Result<u64, PagingError> {
    Ok(logical_address % positive(page_size, "page size")?)
}

/// Physical address of `logical_address` when its page sits in `frame_number`
///
/// * `logical_address` - address as seen by the process
/// * `page_size` - bytes per page, equal to bytes per frame
/// * `frame_number` - frame holding the page
pub fn real_address(
    logical_address: u64,
    page_size: u64,
    frame_number: u64,
) -> Result<u64, PagingError> {
    let offset = page_offset(logical_address, page_size)?;

    frame_number
        .checked_mul(page_size)
        .and_then(|base| base.checked_add(offset))
        .ok_or_else(|| {
            PagingError::AddressOverflow(format!(
                "frame {} of {} bytes is beyond the 64-bit address space",
                frame_number, page_size
            ))
        })
}

/// Splits and maps `logical_address` in one go
pub fn translate(
    logical_address: u64,
    page_size: u64,
    frame_number: u64,
) -> Result<Translation, PagingError> {
    Ok(Translation {
        logical_address,
        page_number: page_number(logical_address, page_size)?,
        offset: page_offset(logical_address, page_size)?,
        frame_number,
        physical_address: real_address(logical_address, page_size, frame_number)?,
    })
}

/// Bits needed to address every byte of `unit_count` units of `unit_size` bytes
///
/// That is `ceil(log2(unit_count * unit_size))`. A single byte needs no
/// address bits at all, so `address_bit_width(1, 1)` is `0`.
pub fn address_bit_width(unit_count: u64, unit_size: u64) -> Result<u32, PagingError> {
    let count = positive(unit_count, "unit count")? as u128;
    let size = positive(unit_size, "unit size")? as u128;

    Ok(ceil_log2(count * size))
}

/// Width of a logical address for `page_count` pages of `page_size` bytes
pub fn logical_address_width(page_count: u64, page_size: u64) -> Result<u32, PagingError> {
    address_bit_width(page_count, page_size)
}

/// Width of a physical address for `frame_count` frames of `frame_size` bytes
pub fn physical_address_width(frame_count: u64, frame_size: u64) -> Result<u32, PagingError> {
    address_bit_width(frame_count, frame_size)
}

fn ceil_log2(value: u128) -> u32 {
    if value <= 1 {
        0
    } else {
        u128::BITS - (value - 1).leading_zeros()
    }
}
