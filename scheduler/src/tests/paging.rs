use rstest::rstest;

use crate::paging::{
    address_bit_width, logical_address_width, page_number, page_offset, physical_address_width,
    real_address, translate, Translation,
};
use crate::PagingError;

#[rstest]
#[case(13, 4, 3)]
#[case(0, 4, 0)]
#[case(3, 4, 0)]
#[case(4, 4, 1)]
#[case(10_000, 4096, 2)]
fn splits_logical_addresses_into_pages(
    #[case] logical_address: u64,
    #[case] page_size: u64,
    #[case] page: u64,
) {
    assert_eq!(page_number(logical_address, page_size), Ok(page));
}

#[rstest]
#[case(13, 4, 2, 9)]
#[case(13, 4, 0, 1)]
#[case(10_000, 4096, 5, 5 * 4096 + 1808)]
fn maps_logical_addresses_into_frames(
    #[case] logical_address: u64,
    #[case] page_size: u64,
    #[case] frame: u64,
    #[case] physical: u64,
) {
    assert_eq!(real_address(logical_address, page_size, frame), Ok(physical));
}

#[test]
fn translate_bundles_every_part() {
    assert_eq!(
        translate(13, 4, 2),
        Ok(Translation {
            logical_address: 13,
            page_number: 3,
            offset: 1,
            frame_number: 2,
            physical_address: 9,
        })
    );
}

#[rstest]
#[case(8, 4096, 15)]
#[case(64, 1024, 16)]
#[case(1, 1, 0)]
#[case(1, 2, 1)]
#[case(3, 4, 4)]
#[case(u64::MAX, u64::MAX, 128)]
fn computes_address_widths(#[case] count: u64, #[case] size: u64, #[case] bits: u32) {
    assert_eq!(address_bit_width(count, size), Ok(bits));
    assert_eq!(logical_address_width(count, size), Ok(bits));
    assert_eq!(physical_address_width(count, size), Ok(bits));
}

#[test]
fn zero_sizes_are_rejected() {
    assert!(matches!(page_number(13, 0), Err(PagingError::InvalidSize { .. })));
    assert!(matches!(page_offset(13, 0), Err(PagingError::InvalidSize { .. })));
    assert!(matches!(real_address(13, 0, 2), Err(PagingError::InvalidSize { .. })));
    assert!(matches!(address_bit_width(0, 4), Err(PagingError::InvalidSize { .. })));
    assert!(matches!(address_bit_width(4, 0), Err(PagingError::InvalidSize { .. })));
}

#[test]
fn out_of_range_frames_overflow() {
    assert!(matches!(
        real_address(1, 4096, u64::MAX),
        Err(PagingError::AddressOverflow(_))
    ));
}
