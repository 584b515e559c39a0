#[path = "../common/mod.rs"]
mod common;

use common::fixtures::{block_from_hex, sample_plate, strict, PLATE_RA123ABC_HEX};
use farecard::config::IdentifierPolicy;
use farecard::protocol::codec::{decode_identifier, encode_identifier, encode_identifier_str};
use farecard::Error;

#[test]
fn plate_block_layout_matches_fixture() {
    let block = encode_identifier(&sample_plate());
    assert_eq!(hex::encode(block.as_bytes()), PLATE_RA123ABC_HEX);
}

#[test]
fn fixture_decodes_to_plate() {
    let block = block_from_hex(PLATE_RA123ABC_HEX);
    assert_eq!(decode_identifier(&block, &strict()).unwrap(), sample_plate());
}

#[test]
fn nul_padding_is_accepted() {
    // written by older firmware: NUL instead of space padding
    let block = block_from_hex("52413132334142430000000000000000");
    assert_eq!(decode_identifier(&block, &strict()).unwrap(), sample_plate());
}

#[test]
fn bytes_after_first_unprintable_are_ignored() {
    let block = block_from_hex("524131ff21212121ff00000000000000");
    assert_eq!(decode_identifier(&block, &strict()).unwrap().as_str(), "RA1");
}

#[test]
fn blank_block_is_invalid() {
    let block = block_from_hex("00000000000000000000000000000000");
    assert!(matches!(
        decode_identifier(&block, &IdentifierPolicy::any()),
        Err(Error::InvalidIdentifier(_))
    ));
    let block = block_from_hex("20202020202020202020202020202020");
    assert!(decode_identifier(&block, &IdentifierPolicy::any()).is_err());
}

#[test]
fn full_width_identifier_has_no_padding() {
    let block = encode_identifier_str("RA34567890123456", &strict()).unwrap();
    assert!(!block.as_bytes().contains(&b' '));
    assert!(encode_identifier_str("RA345678901234567", &strict()).is_err());
}

#[test]
fn prefix_check_depends_on_policy() {
    let block = block_from_hex("58593132202020202020202020202020");
    assert!(decode_identifier(&block, &strict()).is_err());
    assert_eq!(
        decode_identifier(&block, &IdentifierPolicy::any())
            .unwrap()
            .as_str(),
        "XY12"
    );
}
