//! Native error codes and their symbolic names.
//!
//! Every fallible native call reports an `i32`:
//!
//! - `0` - success
//! - `> 0` - an OS `errno` value
//! - `< 0` - a library error from the table below
//!
//! [`LIBGAMMA_ERRNO_SET`] is special: it tells the caller to read the
//! OS last-error value instead of using the code itself.
//!
//! # Diagnostics
//!
//! [`write_error`] renders a code the way `perror(3)` would, with one extra
//! case: [`LIBGAMMA_DEVICE_REQUIRE_GROUP`] prints the group the caller must
//! belong to. That group is passed in as a [`RequiredGroup`] value.

use std::ffi::CStr;
use std::io::{self, Write};

/// The OS error value should be read from `errno`.
pub const LIBGAMMA_ERRNO_SET: i32 = -1;
/// The adjustment method does not exist or was not compiled in.
pub const LIBGAMMA_NO_SUCH_ADJUSTMENT_METHOD: i32 = -2;
/// The selected site does not exist.
pub const LIBGAMMA_NO_SUCH_SITE: i32 = -3;
/// The selected partition does not exist.
pub const LIBGAMMA_NO_SUCH_PARTITION: i32 = -4;
/// The selected CRTC does not exist.
pub const LIBGAMMA_NO_SUCH_CRTC: i32 = -5;
/// Counter overflowed while counting partitions or CRTCs.
pub const LIBGAMMA_IMPOSSIBLE_AMOUNT: i32 = -6;
/// The connector is disabled.
pub const LIBGAMMA_CONNECTOR_DISABLED: i32 = -7;
/// The partition could not be opened.
pub const LIBGAMMA_OPEN_PARTITION_FAILED: i32 = -8;
/// The site could not be opened.
pub const LIBGAMMA_OPEN_SITE_FAILED: i32 = -9;
/// Querying the protocol version failed.
pub const LIBGAMMA_PROTOCOL_VERSION_QUERY_FAILED: i32 = -10;
/// The protocol version is not supported.
pub const LIBGAMMA_PROTOCOL_VERSION_NOT_SUPPORTED: i32 = -11;
/// Listing partitions failed.
pub const LIBGAMMA_LIST_PARTITIONS_FAILED: i32 = -12;
/// The partition is null.
pub const LIBGAMMA_NULL_PARTITION: i32 = -13;
/// No monitor is connected to the CRTC.
pub const LIBGAMMA_NOT_CONNECTED: i32 = -14;
/// Extracting a value from a reply failed.
pub const LIBGAMMA_REPLY_VALUE_EXTRACTION_FAILED: i32 = -15;
/// No EDID was found.
pub const LIBGAMMA_EDID_NOT_FOUND: i32 = -16;
/// Listing connector properties failed.
pub const LIBGAMMA_LIST_PROPERTIES_FAILED: i32 = -17;
/// Querying a connector property failed.
pub const LIBGAMMA_PROPERTY_VALUE_QUERY_FAILED: i32 = -18;
/// The EDID has an unsupported length.
pub const LIBGAMMA_EDID_LENGTH_UNSUPPORTED: i32 = -19;
/// The EDID header magic is wrong.
pub const LIBGAMMA_EDID_WRONG_MAGIC_NUMBER: i32 = -20;
/// The EDID version or revision is unsupported.
pub const LIBGAMMA_EDID_REVISION_UNSUPPORTED: i32 = -21;
/// The EDID does not specify a gamma.
pub const LIBGAMMA_GAMMA_NOT_SPECIFIED: i32 = -22;
/// The EDID checksum is wrong.
pub const LIBGAMMA_EDID_CHECKSUM_ERROR: i32 = -23;
/// Both [`LIBGAMMA_GAMMA_NOT_SPECIFIED`] and [`LIBGAMMA_EDID_CHECKSUM_ERROR`].
pub const LIBGAMMA_GAMMA_NOT_SPECIFIED_AND_EDID_CHECKSUM_ERROR: i32 = -24;
/// Querying the gamma ramp size failed.
pub const LIBGAMMA_GAMMA_RAMPS_SIZE_QUERY_FAILED: i32 = -25;
/// Reading the gamma ramps failed.
pub const LIBGAMMA_GAMMA_RAMP_READ_FAILED: i32 = -26;
/// Writing the gamma ramps failed.
pub const LIBGAMMA_GAMMA_RAMP_WRITE_FAILED: i32 = -27;
/// The gamma ramp size changed behind our back.
pub const LIBGAMMA_GAMMA_RAMP_SIZE_CHANGED: i32 = -28;
/// The channels have different sizes and the method requires them equal.
pub const LIBGAMMA_MIXED_GAMMA_RAMP_SIZE: i32 = -29;
/// The ramp sizes do not match the CRTC.
pub const LIBGAMMA_WRONG_GAMMA_RAMP_SIZE: i32 = -30;
/// A ramp has a single stop, which is not supported.
pub const LIBGAMMA_SINGLETON_GAMMA_RAMP: i32 = -31;
/// Listing CRTCs failed.
pub const LIBGAMMA_LIST_CRTCS_FAILED: i32 = -32;
/// Acquiring mode resources failed.
pub const LIBGAMMA_ACQUIRING_MODE_RESOURCES_FAILED: i32 = -33;
/// A negative partition count was reported.
pub const LIBGAMMA_NEGATIVE_PARTITION_COUNT: i32 = -34;
/// A negative CRTC count was reported.
pub const LIBGAMMA_NEGATIVE_CRTC_COUNT: i32 = -35;
/// Access to the device is restricted.
pub const LIBGAMMA_DEVICE_RESTRICTED: i32 = -36;
/// Accessing the device failed.
pub const LIBGAMMA_DEVICE_ACCESS_FAILED: i32 = -37;
/// Access requires membership of a group, see [`RequiredGroup`].
pub const LIBGAMMA_DEVICE_REQUIRE_GROUP: i32 = -38;
/// The graphics card was removed.
pub const LIBGAMMA_GRAPHICS_CARD_REMOVED: i32 = -39;
/// The state of the device could not be determined.
pub const LIBGAMMA_STATE_UNKNOWN: i32 = -40;
/// The connector could not be identified.
pub const LIBGAMMA_CONNECTOR_UNKNOWN: i32 = -41;
/// The connector type is not recognised.
pub const LIBGAMMA_CONNECTOR_TYPE_NOT_RECOGNISED: i32 = -42;
/// The subpixel order is not recognised.
pub const LIBGAMMA_SUBPIXEL_ORDER_NOT_RECOGNISED: i32 = -43;
/// The EDID is too short to hold the requested data.
pub const LIBGAMMA_EDID_TOO_SHORT: i32 = -44;
/// The adjustment method does not support the operation.
pub const LIBGAMMA_OPERATION_NOT_SUPPORTED: i32 = -45;
/// The adjustment method returned a value the library does not understand.
pub const LIBGAMMA_UNEXPECTED_REPLY: i32 = -46;

/// The most negative error code in the table.
pub const LIBGAMMA_ERROR_MIN: i32 = -46;

/// Symbolic names, indexed by `-code - 1`.
const ERROR_NAMES: [&str; (-LIBGAMMA_ERROR_MIN) as usize] = [
    "LIBGAMMA_ERRNO_SET",
    "LIBGAMMA_NO_SUCH_ADJUSTMENT_METHOD",
    "LIBGAMMA_NO_SUCH_SITE",
    "LIBGAMMA_NO_SUCH_PARTITION",
    "LIBGAMMA_NO_SUCH_CRTC",
    "LIBGAMMA_IMPOSSIBLE_AMOUNT",
    "LIBGAMMA_CONNECTOR_DISABLED",
    "LIBGAMMA_OPEN_PARTITION_FAILED",
    "LIBGAMMA_OPEN_SITE_FAILED",
    "LIBGAMMA_PROTOCOL_VERSION_QUERY_FAILED",
    "LIBGAMMA_PROTOCOL_VERSION_NOT_SUPPORTED",
    "LIBGAMMA_LIST_PARTITIONS_FAILED",
    "LIBGAMMA_NULL_PARTITION",
    "LIBGAMMA_NOT_CONNECTED",
    "LIBGAMMA_REPLY_VALUE_EXTRACTION_FAILED",
    "LIBGAMMA_EDID_NOT_FOUND",
    "LIBGAMMA_LIST_PROPERTIES_FAILED",
    "LIBGAMMA_PROPERTY_VALUE_QUERY_FAILED",
    "LIBGAMMA_EDID_LENGTH_UNSUPPORTED",
    "LIBGAMMA_EDID_WRONG_MAGIC_NUMBER",
    "LIBGAMMA_EDID_REVISION_UNSUPPORTED",
    "LIBGAMMA_GAMMA_NOT_SPECIFIED",
    "LIBGAMMA_EDID_CHECKSUM_ERROR",
    "LIBGAMMA_GAMMA_NOT_SPECIFIED_AND_EDID_CHECKSUM_ERROR",
    "LIBGAMMA_GAMMA_RAMPS_SIZE_QUERY_FAILED",
    "LIBGAMMA_GAMMA_RAMP_READ_FAILED",
    "LIBGAMMA_GAMMA_RAMP_WRITE_FAILED",
    "LIBGAMMA_GAMMA_RAMP_SIZE_CHANGED",
    "LIBGAMMA_MIXED_GAMMA_RAMP_SIZE",
    "LIBGAMMA_WRONG_GAMMA_RAMP_SIZE",
    "LIBGAMMA_SINGLETON_GAMMA_RAMP",
    "LIBGAMMA_LIST_CRTCS_FAILED",
    "LIBGAMMA_ACQUIRING_MODE_RESOURCES_FAILED",
    "LIBGAMMA_NEGATIVE_PARTITION_COUNT",
    "LIBGAMMA_NEGATIVE_CRTC_COUNT",
    "LIBGAMMA_DEVICE_RESTRICTED",
    "LIBGAMMA_DEVICE_ACCESS_FAILED",
    "LIBGAMMA_DEVICE_REQUIRE_GROUP",
    "LIBGAMMA_GRAPHICS_CARD_REMOVED",
    "LIBGAMMA_STATE_UNKNOWN",
    "LIBGAMMA_CONNECTOR_UNKNOWN",
    "LIBGAMMA_CONNECTOR_TYPE_NOT_RECOGNISED",
    "LIBGAMMA_SUBPIXEL_ORDER_NOT_RECOGNISED",
    "LIBGAMMA_EDID_TOO_SHORT",
    "LIBGAMMA_OPERATION_NOT_SUPPORTED",
    "LIBGAMMA_UNEXPECTED_REPLY",
];

/// Every code in the error table, most recent (least negative) first.
pub fn error_codes() -> impl Iterator<Item = i32> {
    (LIBGAMMA_ERROR_MIN..=LIBGAMMA_ERRNO_SET).rev()
}

/// Returns the symbolic name of a library error code.
///
/// `None` for success, for OS codes and for negative codes outside the table.
pub fn name_of_error(code: i32) -> Option<&'static str> {
    if !(LIBGAMMA_ERROR_MIN..=LIBGAMMA_ERRNO_SET).contains(&code) {
        return None;
    }
    ERROR_NAMES.get((-code - 1) as usize).copied()
}

/// Returns the code for a symbolic error name, or `0` if the name is unknown.
pub fn value_of_error(name: Option<&str>) -> i32 {
    let Some(name) = name else {
        return 0;
    };
    ERROR_NAMES
        .iter()
        .position(|n| *n == name)
        .map(|i| -(i as i32) - 1)
        .unwrap_or(0)
}

/// Returns the OS description of an `errno` value.
pub fn strerror(errnum: i32) -> String {
    let mut buf = [0 as libc::c_char; 256];
    // SAFETY: buf is writable for its full length and strerror_r NUL-terminates on success.
    let rc = unsafe { libc::strerror_r(errnum, buf.as_mut_ptr(), buf.len()) };
    if rc != 0 {
        return format!("Unknown error {errnum}");
    }
    // SAFETY: strerror_r succeeded, so buf holds a NUL-terminated string.
    unsafe { CStr::from_ptr(buf.as_ptr()) }
        .to_string_lossy()
        .into_owned()
}

/// Returns the current OS error number, or `0` if none is set.
pub fn last_os_error() -> i32 {
    io::Error::last_os_error().raw_os_error().unwrap_or(0)
}

/// Group membership required to access a device.
///
/// Reported alongside [`LIBGAMMA_DEVICE_REQUIRE_GROUP`]. The name is
/// optional: when absent it is looked up from the group database when the
/// error is printed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequiredGroup {
    /// Numeric group ID.
    pub gid: u32,
    /// Group name, if known.
    pub name: Option<String>,
}

impl RequiredGroup {
    /// Creates a requirement for `gid` with an unknown name.
    pub fn new(gid: u32) -> Self {
        Self { gid, name: None }
    }

    /// Creates a requirement for `gid` with a known name.
    pub fn with_name(gid: u32, name: impl Into<String>) -> Self {
        Self {
            gid,
            name: Some(name.into()),
        }
    }

    /// Returns the group name, resolving it through the group database if needed.
    pub fn resolved_name(&self) -> Option<String> {
        self.name.clone().or_else(|| group_name(self.gid))
    }
}

fn group_name(gid: u32) -> Option<String> {
    // SAFETY: libc::group is a plain C struct for which all-zero bytes are a valid value.
    let mut grp: libc::group = unsafe { std::mem::zeroed() };
    let mut result: *mut libc::group = std::ptr::null_mut();
    let mut buf = vec![0 as libc::c_char; 4096];
    loop {
        // SAFETY: all pointers reference live, writable storage of the given sizes.
        let rc = unsafe {
            libc::getgrgid_r(
                gid as libc::gid_t,
                &mut grp,
                buf.as_mut_ptr(),
                buf.len(),
                &mut result,
            )
        };
        if rc == libc::ERANGE && buf.len() < (1 << 20) {
            buf.resize(buf.len() * 2, 0);
            continue;
        }
        if rc != 0 || result.is_null() || grp.gr_name.is_null() {
            return None;
        }
        // SAFETY: getgrgid_r succeeded and gr_name points into buf.
        let name = unsafe { CStr::from_ptr(grp.gr_name) };
        return Some(name.to_string_lossy().into_owned());
    }
}

/// Writes a `perror(3)`-style description of `code` to `out`.
///
/// `name` prefixes the line unless it is empty. `group` is only consulted
/// for [`LIBGAMMA_DEVICE_REQUIRE_GROUP`].
pub fn write_error<W: Write>(
    out: &mut W,
    name: &str,
    code: i32,
    group: Option<&RequiredGroup>,
) -> io::Result<()> {
    let message = describe(code, group);
    if name.is_empty() {
        writeln!(out, "{message}")
    } else {
        writeln!(out, "{name}: {message}")
    }
}

/// Prints a description of `code` to stderr, like `perror(3)`.
pub fn perror(name: &str, code: i32, group: Option<&RequiredGroup>) {
    let _ = write_error(&mut io::stderr().lock(), name, code, group);
}

fn describe(code: i32, group: Option<&RequiredGroup>) -> String {
    if code >= 0 {
        return strerror(code);
    }
    if code == LIBGAMMA_ERRNO_SET {
        return strerror(last_os_error());
    }
    if code == LIBGAMMA_DEVICE_REQUIRE_GROUP {
        let label = "LIBGAMMA_DEVICE_REQUIRE_GROUP";
        return match group {
            Some(g) => match g.resolved_name() {
                Some(gname) => format!("{label}: {gname} ({})", g.gid),
                None => format!("{label}: {}", g.gid),
            },
            None => label.to_string(),
        };
    }
    match name_of_error(code) {
        Some(n) => n.to_string(),
        None => code.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_value_roundtrip() {
        for code in error_codes() {
            let name = name_of_error(code).expect("code in table");
            assert_eq!(value_of_error(Some(name)), code, "{name}");
        }
    }

    #[test]
    fn test_out_of_table() {
        assert_eq!(name_of_error(0), None);
        assert_eq!(name_of_error(5), None);
        assert_eq!(name_of_error(LIBGAMMA_ERROR_MIN - 1), None);
        assert_eq!(value_of_error(Some("LIBGAMMA_NOT_AN_ERROR")), 0);
        assert_eq!(value_of_error(None), 0);
    }

    #[test]
    fn test_known_names() {
        assert_eq!(
            name_of_error(LIBGAMMA_NO_SUCH_ADJUSTMENT_METHOD),
            Some("LIBGAMMA_NO_SUCH_ADJUSTMENT_METHOD")
        );
        assert_eq!(name_of_error(LIBGAMMA_ERROR_MIN), Some("LIBGAMMA_UNEXPECTED_REPLY"));
    }

    #[test]
    fn test_write_error_forms() {
        let mut out = Vec::new();
        write_error(&mut out, "test", LIBGAMMA_NO_SUCH_SITE, None).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "test: LIBGAMMA_NO_SUCH_SITE\n");

        let mut out = Vec::new();
        write_error(&mut out, "", -1000, None).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "-1000\n");

        let mut out = Vec::new();
        write_error(&mut out, "x", libc::ENOENT, None).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), format!("x: {}\n", strerror(libc::ENOENT)));
    }

    #[test]
    fn test_require_group_prints_group() {
        let group = RequiredGroup::with_name(44, "video");
        let mut out = Vec::new();
        write_error(&mut out, "gamma", LIBGAMMA_DEVICE_REQUIRE_GROUP, Some(&group)).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "gamma: LIBGAMMA_DEVICE_REQUIRE_GROUP: video (44)\n"
        );
    }

    #[test]
    fn test_require_group_always_prints_gid() {
        let group = RequiredGroup::with_name(4242, "plugdev");
        let mut out = Vec::new();
        write_error(&mut out, "", LIBGAMMA_DEVICE_REQUIRE_GROUP, Some(&group)).unwrap();
        let line = String::from_utf8(out).unwrap();
        assert!(line.contains("4242"), "{line}");
        assert!(line.contains("plugdev"), "{line}");

        let mut out = Vec::new();
        write_error(&mut out, "", LIBGAMMA_DEVICE_REQUIRE_GROUP, None).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "LIBGAMMA_DEVICE_REQUIRE_GROUP\n");
    }
}
