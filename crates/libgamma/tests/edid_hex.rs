//! EDID hex conversions and the error name table.

use libgamma::*;
use libgamma_native::{error_codes, synthesize_edid};

fn samples() -> Vec<Vec<u8>> {
    vec![
        Vec::new(),
        vec![0x00],
        vec![0xFF, 0x0F, 0xF0],
        (0..=255).collect(),
        synthesize_edid(52, 29, Some(2.2)),
    ]
}

#[test]
fn hex_round_trips_in_both_cases() {
    for bytes in samples() {
        let lower = behex_edid_lowercase(&bytes);
        let upper = behex_edid_uppercase(&bytes);
        assert_eq!(lower.len(), bytes.len() * 2);
        assert_eq!(lower.to_ascii_uppercase(), upper);
        assert_eq!(unhex_edid(&lower).unwrap(), bytes);
        assert_eq!(unhex_edid(&upper).unwrap(), bytes);
        assert_eq!(behex_edid(&bytes), lower);
    }
}

#[test]
fn unhex_rejects_malformed_input() {
    for bad in ["0", "0g", "00 11", "é0"] {
        assert_eq!(unhex_edid(bad).unwrap_err().code(), libc::EINVAL, "{bad:?}");
    }
}

#[test]
fn error_names_round_trip() {
    let mut count = 0;
    for code in error_codes() {
        let name = name_of_error(code).unwrap();
        assert!(name.starts_with("LIBGAMMA_"));
        assert_eq!(value_of_error(Some(name)), code);
        if code != LIBGAMMA_ERRNO_SET {
            assert_eq!(create_error(code).to_string(), name);
        }
        count += 1;
    }
    assert_eq!(count, 46);

    for code in [0, 1, libc::EINVAL, -47, i32::MIN] {
        assert_eq!(name_of_error(code), None);
    }
    assert_eq!(value_of_error(Some("NOT_AN_ERROR")), 0);
}
