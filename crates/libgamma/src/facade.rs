//! Method queries, EDID hex conversion and ramp constructors.

use libgamma_native as native;
use native::LIBGAMMA_METHOD_COUNT;
use tracing::debug;

use crate::error::{Result, create_error};
use crate::method::MethodCapabilities;
use crate::ramps::{GammaRamps8, GammaRamps16, GammaRamps32, GammaRamps64, GammaRampsD, GammaRampsF};

/// Lists the adjustment methods matching `operation`, most preferred first.
///
/// Each operation lists a superset of the one before it:
///
/// - `0` - methods the environment suggests will work, excluding fake ones
/// - `1` - methods the environment suggests will work
/// - `2` - real non-fake methods, plus everything in `1`
/// - `3` - real methods
/// - `4` - every available method
///
/// The count reported by the first query is trusted when retrying with a
/// larger buffer; a method becoming available between the two queries is
/// not picked up.
pub fn list_methods(operation: i32) -> Vec<i32> {
    let mut methods = vec![0; LIBGAMMA_METHOD_COUNT];
    let n = native::list_methods(&mut methods, operation);
    if n > methods.len() {
        debug!(count = n, "method buffer too small, retrying");
        methods = vec![0; n];
        native::list_methods(&mut methods, operation);
    }
    methods.truncate(n);
    methods
}

/// Returns whether `method` is available.
pub fn is_method_available(method: i32) -> bool {
    native::is_method_available(method)
}

/// Returns the capabilities of `method`.
pub fn method_capabilities(method: i32) -> MethodCapabilities {
    MethodCapabilities::from(native::method_capabilities(method))
}

/// Returns the default site of `method`, if it has one.
pub fn method_default_site(method: i32) -> Option<String> {
    native::method_default_site(method)
}

/// Returns the environment variable that selects the default site of `method`.
pub fn method_default_site_variable(method: i32) -> Option<&'static str> {
    native::method_default_site_variable(method)
}

/// Encodes an EDID as lowercase hexadecimal.
pub fn behex_edid(edid: &[u8]) -> String {
    behex_edid_lowercase(edid)
}

/// Encodes an EDID as lowercase hexadecimal.
pub fn behex_edid_lowercase(edid: &[u8]) -> String {
    native::behex_edid_lowercase(edid)
}

/// Encodes an EDID as uppercase hexadecimal.
pub fn behex_edid_uppercase(edid: &[u8]) -> String {
    native::behex_edid_uppercase(edid)
}

/// Decodes hexadecimal EDID in either case.
///
/// # Errors
///
/// `EINVAL` for odd-length input or a character that is not a hex digit.
pub fn unhex_edid(edid: &str) -> Result<Vec<u8>> {
    native::unhex_edid(edid).map_err(create_error)
}

/// Allocates 8-bit ramps.
pub fn gamma_ramps8_create(red: usize, green: usize, blue: usize) -> Result<GammaRamps8> {
    GammaRamps8::new(red, green, blue)
}

/// Allocates 16-bit ramps.
pub fn gamma_ramps16_create(red: usize, green: usize, blue: usize) -> Result<GammaRamps16> {
    GammaRamps16::new(red, green, blue)
}

/// Allocates 32-bit ramps.
pub fn gamma_ramps32_create(red: usize, green: usize, blue: usize) -> Result<GammaRamps32> {
    GammaRamps32::new(red, green, blue)
}

/// Allocates 64-bit ramps.
pub fn gamma_ramps64_create(red: usize, green: usize, blue: usize) -> Result<GammaRamps64> {
    GammaRamps64::new(red, green, blue)
}

/// Allocates `f32` ramps.
pub fn gamma_rampsf_create(red: usize, green: usize, blue: usize) -> Result<GammaRampsF> {
    GammaRampsF::new(red, green, blue)
}

/// Allocates `f64` ramps.
pub fn gamma_rampsd_create(red: usize, green: usize, blue: usize) -> Result<GammaRampsD> {
    GammaRampsD::new(red, green, blue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_behex_default_is_lowercase() {
        assert_eq!(behex_edid(&[0xDE, 0xAD]), "dead");
        assert_eq!(behex_edid_uppercase(&[0xDE, 0xAD]), "DEAD");
    }

    #[test]
    fn test_unhex_error_is_translated() {
        let err = unhex_edid("abc").unwrap_err();
        assert_eq!(err.code(), libc::EINVAL);
    }

    #[test]
    fn test_unavailable_method() {
        assert!(!is_method_available(native::LIBGAMMA_METHOD_X_RANDR));
        assert_eq!(
            method_capabilities(native::LIBGAMMA_METHOD_X_RANDR),
            MethodCapabilities::default()
        );
        assert_eq!(method_default_site_variable(native::LIBGAMMA_METHOD_X_VIDMODE), Some("DISPLAY"));
    }

    #[test]
    fn test_create_functions() {
        assert_eq!(gamma_ramps8_create(1, 2, 3).unwrap().blue_size(), 3);
        assert_eq!(gamma_rampsf_create(4, 4, 4).unwrap().depth(), -1);
    }
}
