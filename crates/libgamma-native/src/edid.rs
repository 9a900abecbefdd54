//! EDID hex coding and parsing.

use crate::error::*;
use crate::method::{
    LIBGAMMA_CRTC_INFO_GAMMA, LIBGAMMA_CRTC_INFO_HEIGHT_MM_EDID, LIBGAMMA_CRTC_INFO_WIDTH_MM_EDID,
    RawCrtcInformation,
};

/// Length of an EDID 1.3 base block.
pub const EDID_LENGTH: usize = 128;

const EDID_MAGIC: [u8; 8] = [0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x00];

const LOWER: &[u8; 16] = b"0123456789abcdef";
const UPPER: &[u8; 16] = b"0123456789ABCDEF";

fn behex(edid: &[u8], digits: &[u8; 16]) -> String {
    let mut out = String::with_capacity(edid.len() * 2);
    for &byte in edid {
        out.push(digits[(byte >> 4) as usize] as char);
        out.push(digits[(byte & 15) as usize] as char);
    }
    out
}

/// Encodes an EDID as lowercase hexadecimal.
pub fn behex_edid_lowercase(edid: &[u8]) -> String {
    behex(edid, LOWER)
}

/// Encodes an EDID as uppercase hexadecimal.
pub fn behex_edid_uppercase(edid: &[u8]) -> String {
    behex(edid, UPPER)
}

/// Decodes hexadecimal in either case to raw EDID bytes.
///
/// Fails with `EINVAL` on odd length or a non-hexadecimal digit.
pub fn unhex_edid(hex: &str) -> Result<Vec<u8>, i32> {
    let digits = hex.as_bytes();
    if digits.len() % 2 != 0 {
        return Err(libc::EINVAL);
    }
    digits
        .chunks_exact(2)
        .map(|pair| Ok((nibble(pair[0])? << 4) | nibble(pair[1])?))
        .collect()
}

fn nibble(digit: u8) -> Result<u8, i32> {
    match digit {
        b'0'..=b'9' => Ok(digit - b'0'),
        b'a'..=b'f' => Ok(digit - b'a' + 10),
        b'A'..=b'F' => Ok(digit - b'A' + 10),
        _ => Err(libc::EINVAL),
    }
}

/// Fills the EDID-derived fields of `info` from `info.edid`.
///
/// Only fields in `fields` are touched. Without an EDID every requested
/// derived field reports [`LIBGAMMA_EDID_NOT_FOUND`] (or the EDID's own
/// error, if one was recorded). Returns whether any requested field failed.
pub fn parse_edid(info: &mut RawCrtcInformation, fields: i32) -> bool {
    let wanted = fields
        & (LIBGAMMA_CRTC_INFO_WIDTH_MM_EDID | LIBGAMMA_CRTC_INFO_HEIGHT_MM_EDID | LIBGAMMA_CRTC_INFO_GAMMA);
    if wanted == 0 {
        return false;
    }

    let error = match info.edid.as_deref() {
        None if info.edid_error != 0 => info.edid_error,
        None => LIBGAMMA_EDID_NOT_FOUND,
        Some(edid) => validate(edid),
    };

    if error != 0 && error != LIBGAMMA_EDID_CHECKSUM_ERROR {
        set_derived_error(info, wanted, error);
        return true;
    }

    // validate() passed (at most a checksum error), so the block is EDID_LENGTH bytes.
    let edid = info.edid.as_deref().unwrap_or(&[]);
    let (width_cm, height_cm, gamma_byte) = (edid[21], edid[22], edid[23]);
    let checksum_bad = error == LIBGAMMA_EDID_CHECKSUM_ERROR;
    let mut failed = false;

    if wanted & LIBGAMMA_CRTC_INFO_WIDTH_MM_EDID != 0 {
        info.width_mm_edid = width_cm as usize * 10;
        info.width_mm_edid_error = error;
        failed |= error != 0;
    }
    if wanted & LIBGAMMA_CRTC_INFO_HEIGHT_MM_EDID != 0 {
        info.height_mm_edid = height_cm as usize * 10;
        info.height_mm_edid_error = error;
        failed |= error != 0;
    }
    if wanted & LIBGAMMA_CRTC_INFO_GAMMA != 0 {
        if gamma_byte == 0xFF {
            info.gamma_error = if checksum_bad {
                LIBGAMMA_GAMMA_NOT_SPECIFIED_AND_EDID_CHECKSUM_ERROR
            } else {
                LIBGAMMA_GAMMA_NOT_SPECIFIED
            };
            failed = true;
        } else {
            let gamma = (gamma_byte as f32 + 100.0) / 100.0;
            info.gamma_red = gamma;
            info.gamma_green = gamma;
            info.gamma_blue = gamma;
            info.gamma_error = error;
            failed |= error != 0;
        }
    }
    failed
}

/// Checks the structure of an EDID block.
///
/// A bad checksum is reported last so the caller can still use the data.
fn validate(edid: &[u8]) -> i32 {
    if edid.len() != EDID_LENGTH {
        return LIBGAMMA_EDID_LENGTH_UNSUPPORTED;
    }
    if edid[..8] != EDID_MAGIC {
        return LIBGAMMA_EDID_WRONG_MAGIC_NUMBER;
    }
    if edid[18] != 1 || edid[19] < 3 {
        return LIBGAMMA_EDID_REVISION_UNSUPPORTED;
    }
    let sum = edid.iter().fold(0u8, |acc, &b| acc.wrapping_add(b));
    if sum != 0 {
        return LIBGAMMA_EDID_CHECKSUM_ERROR;
    }
    0
}

fn set_derived_error(info: &mut RawCrtcInformation, wanted: i32, error: i32) {
    if wanted & LIBGAMMA_CRTC_INFO_WIDTH_MM_EDID != 0 {
        info.width_mm_edid_error = error;
    }
    if wanted & LIBGAMMA_CRTC_INFO_HEIGHT_MM_EDID != 0 {
        info.height_mm_edid_error = error;
    }
    if wanted & LIBGAMMA_CRTC_INFO_GAMMA != 0 {
        info.gamma_error = error;
    }
}

/// Builds a minimal valid EDID 1.3 block.
///
/// Used by the dummy method and by tests. `gamma` of `None` marks the gamma
/// as unspecified.
pub fn synthesize_edid(width_cm: u8, height_cm: u8, gamma: Option<f32>) -> Vec<u8> {
    let mut edid = vec![0u8; EDID_LENGTH];
    edid[..8].copy_from_slice(&EDID_MAGIC);
    edid[18] = 1;
    edid[19] = 3;
    edid[21] = width_cm;
    edid[22] = height_cm;
    edid[23] = match gamma {
        Some(g) => ((g * 100.0).round() as i32 - 100).clamp(0, 254) as u8,
        None => 0xFF,
    };
    let sum = edid.iter().fold(0u8, |acc, &b| acc.wrapping_add(b));
    edid[127] = 0u8.wrapping_sub(sum);
    edid
}
