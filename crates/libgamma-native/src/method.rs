//! Adjustment methods, their capabilities and CRTC information records.
//!
//! A method is identified by a small integer. All methods in
//! `0..LIBGAMMA_METHOD_COUNT` are known, but only the ones compiled into
//! this layer are available. Today that is the dummy method.

use crate::dummy;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// The dummy method: in-memory ramps, never touches hardware.
pub const LIBGAMMA_METHOD_DUMMY: i32 = 0;
/// The X RandR extension.
pub const LIBGAMMA_METHOD_X_RANDR: i32 = 1;
/// The X VidMode extension.
pub const LIBGAMMA_METHOD_X_VIDMODE: i32 = 2;
/// Linux Direct Rendering Manager.
pub const LIBGAMMA_METHOD_LINUX_DRM: i32 = 3;
/// Windows GDI.
pub const LIBGAMMA_METHOD_W32_GDI: i32 = 4;
/// macOS Quartz Core Graphics.
pub const LIBGAMMA_METHOD_QUARTZ_CORE_GRAPHICS: i32 = 5;
/// Number of known method identifiers.
pub const LIBGAMMA_METHOD_COUNT: usize = 6;
/// Highest method identifier.
pub const LIBGAMMA_METHOD_MAX: i32 = 5;

/// Methods in the order they are preferred when listing.
const METHOD_PREFERENCE: [i32; LIBGAMMA_METHOD_COUNT] = [
    LIBGAMMA_METHOD_X_RANDR,
    LIBGAMMA_METHOD_X_VIDMODE,
    LIBGAMMA_METHOD_LINUX_DRM,
    LIBGAMMA_METHOD_W32_GDI,
    LIBGAMMA_METHOD_QUARTZ_CORE_GRAPHICS,
    LIBGAMMA_METHOD_DUMMY,
];

// CRTC information field masks.

/// The EDID blob.
pub const LIBGAMMA_CRTC_INFO_EDID: i32 = 1 << 0;
/// Physical width in millimetres, as reported by the method.
pub const LIBGAMMA_CRTC_INFO_WIDTH_MM: i32 = 1 << 1;
/// Physical height in millimetres, as reported by the method.
pub const LIBGAMMA_CRTC_INFO_HEIGHT_MM: i32 = 1 << 2;
/// Physical width in millimetres, from the EDID.
pub const LIBGAMMA_CRTC_INFO_WIDTH_MM_EDID: i32 = 1 << 3;
/// Physical height in millimetres, from the EDID.
pub const LIBGAMMA_CRTC_INFO_HEIGHT_MM_EDID: i32 = 1 << 4;
/// Gamma ramp sizes.
pub const LIBGAMMA_CRTC_INFO_GAMMA_SIZE: i32 = 1 << 5;
/// Gamma ramp depth.
pub const LIBGAMMA_CRTC_INFO_GAMMA_DEPTH: i32 = 1 << 6;
/// Whether gamma ramps are supported.
pub const LIBGAMMA_CRTC_INFO_GAMMA_SUPPORT: i32 = 1 << 7;
/// Subpixel order.
pub const LIBGAMMA_CRTC_INFO_SUBPIXEL_ORDER: i32 = 1 << 8;
/// Whether a monitor is connected.
pub const LIBGAMMA_CRTC_INFO_ACTIVE: i32 = 1 << 9;
/// Connector name.
pub const LIBGAMMA_CRTC_INFO_CONNECTOR_NAME: i32 = 1 << 10;
/// Connector type.
pub const LIBGAMMA_CRTC_INFO_CONNECTOR_TYPE: i32 = 1 << 11;
/// Monitor gamma characteristics, from the EDID.
pub const LIBGAMMA_CRTC_INFO_GAMMA: i32 = 1 << 12;
/// Number of defined field bits.
pub const LIBGAMMA_CRTC_INFO_COUNT: u32 = 13;
/// Every defined field.
pub const LIBGAMMA_CRTC_INFO_ALL: i32 = (1 << LIBGAMMA_CRTC_INFO_COUNT) - 1;

/// Fields derived from the EDID.
pub const LIBGAMMA_CRTC_INFO_MACRO_EDID: i32 = LIBGAMMA_CRTC_INFO_EDID
    | LIBGAMMA_CRTC_INFO_WIDTH_MM_EDID
    | LIBGAMMA_CRTC_INFO_HEIGHT_MM_EDID
    | LIBGAMMA_CRTC_INFO_GAMMA;
/// Fields describing the viewport.
pub const LIBGAMMA_CRTC_INFO_MACRO_VIEWPORT: i32 =
    LIBGAMMA_CRTC_INFO_WIDTH_MM | LIBGAMMA_CRTC_INFO_HEIGHT_MM | LIBGAMMA_CRTC_INFO_SUBPIXEL_ORDER;
/// Fields describing the gamma ramps.
pub const LIBGAMMA_CRTC_INFO_MACRO_RAMP: i32 =
    LIBGAMMA_CRTC_INFO_GAMMA_SIZE | LIBGAMMA_CRTC_INFO_GAMMA_DEPTH;
/// Fields describing the connector.
pub const LIBGAMMA_CRTC_INFO_MACRO_CONNECTOR: i32 =
    LIBGAMMA_CRTC_INFO_CONNECTOR_NAME | LIBGAMMA_CRTC_INFO_CONNECTOR_TYPE;
/// Fields describing whether the CRTC is usable.
pub const LIBGAMMA_CRTC_INFO_MACRO_ACTIVE: i32 =
    LIBGAMMA_CRTC_INFO_GAMMA_SUPPORT | LIBGAMMA_CRTC_INFO_ACTIVE;

/// Physical connector types.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectorType {
    /// Not known.
    #[default]
    Unknown = 0,
    /// VGA (D-sub).
    Vga,
    /// DVI, digital and analog.
    Dvi,
    /// DVI-I.
    DviI,
    /// DVI-D.
    DviD,
    /// DVI-A.
    DviA,
    /// Composite video.
    Composite,
    /// S-Video.
    SVideo,
    /// Low-voltage differential signalling.
    Lvds,
    /// Component video.
    Component,
    /// 9-pin DIN.
    NinePinDin,
    /// DisplayPort.
    DisplayPort,
    /// HDMI type A.
    HdmiA,
    /// HDMI type B.
    HdmiB,
    /// Television.
    Tv,
    /// Embedded DisplayPort.
    Edp,
    /// A virtual output.
    Virtual,
    /// MIPI Display Serial Interface.
    Dsi,
    /// Laptop flat panel.
    Lfp,
}

/// Subpixel layout of a monitor.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubpixelOrder {
    /// Not known.
    #[default]
    Unknown = 0,
    /// No subpixels, or not using RGB.
    None,
    /// Horizontal red, green, blue.
    HorizontalRgb,
    /// Horizontal blue, green, red.
    HorizontalBgr,
    /// Vertical red, green, blue.
    VerticalRgb,
    /// Vertical blue, green, red.
    VerticalBgr,
}

/// Three-valued answer for whether gamma ramps are supported.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Not supported.
    #[default]
    No = 0,
    /// Might be supported.
    Maybe = 1,
    /// Supported.
    Yes = 2,
}

/// Capabilities of an adjustment method as reported by the native layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawMethodCapabilities {
    /// Mask of supported CRTC information fields.
    pub crtc_information: i32,
    pub default_site_known: bool,
    pub multiple_sites: bool,
    pub multiple_partitions: bool,
    pub multiple_crtcs: bool,
    pub partitions_are_graphics_cards: bool,
    pub site_restore: bool,
    pub partition_restore: bool,
    pub crtc_restore: bool,
    pub identical_gamma_sizes: bool,
    pub fixed_gamma_size: bool,
    pub fixed_gamma_depth: bool,
    pub real: bool,
    pub fake: bool,
}

/// CRTC information as filled by the native layer.
///
/// Each value comes with a status code: `0` means the value is valid, any
/// other value is an error code explaining why it is not. Fields that
/// were not requested keep their defaults.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawCrtcInformation {
    pub edid: Option<Vec<u8>>,
    pub edid_error: i32,

    pub width_mm: usize,
    pub width_mm_error: i32,

    pub height_mm: usize,
    pub height_mm_error: i32,

    pub width_mm_edid: usize,
    pub width_mm_edid_error: i32,

    pub height_mm_edid: usize,
    pub height_mm_edid_error: i32,

    pub red_gamma_size: usize,
    pub green_gamma_size: usize,
    pub blue_gamma_size: usize,
    pub gamma_size_error: i32,

    pub gamma_depth: i32,
    pub gamma_depth_error: i32,

    pub gamma_support: Decision,
    pub gamma_support_error: i32,

    pub subpixel_order: SubpixelOrder,
    pub subpixel_order_error: i32,

    pub active: bool,
    pub active_error: i32,

    pub connector_name: Option<String>,
    pub connector_name_error: i32,

    pub connector_type: ConnectorType,
    pub connector_type_error: i32,

    pub gamma_red: f32,
    pub gamma_green: f32,
    pub gamma_blue: f32,
    pub gamma_error: i32,
}

/// Returns whether `method` is compiled into this layer.
pub fn is_method_available(method: i32) -> bool {
    method == LIBGAMMA_METHOD_DUMMY
}

/// Returns the capabilities of `method`.
///
/// Unavailable or unknown methods report all-zero capabilities.
pub fn method_capabilities(method: i32) -> RawMethodCapabilities {
    match method {
        LIBGAMMA_METHOD_DUMMY => dummy::capabilities(),
        _ => RawMethodCapabilities::default(),
    }
}

/// Returns the environment variable that selects the default site of `method`.
pub fn method_default_site_variable(method: i32) -> Option<&'static str> {
    match method {
        LIBGAMMA_METHOD_X_RANDR | LIBGAMMA_METHOD_X_VIDMODE => Some("DISPLAY"),
        _ => None,
    }
}

/// Returns the default site of `method`.
///
/// This is the value of the method's site variable when set and non-empty.
/// `None` means the method either has no sites or picks one itself.
pub fn method_default_site(method: i32) -> Option<String> {
    let var = method_default_site_variable(method)?;
    std::env::var(var).ok().filter(|v| !v.is_empty())
}

/// Writes the identifiers of the methods matching `operation` into `methods`.
///
/// Returns the total number of matching methods, which may exceed
/// `methods.len()`. In that case only the first `methods.len()` were written
/// and the caller should retry with a larger buffer.
///
/// Operations, each a superset of the previous:
///
/// - `0` - the environment suggests the method works, and it is not fake
/// - `1` - the environment suggests the method works
/// - `2` - the method is real and not fake, or is in set `1`
/// - `3` - the method is real
/// - `4` and above - every available method
pub fn list_methods(methods: &mut [i32], operation: i32) -> usize {
    let mut n = 0;
    for &method in METHOD_PREFERENCE.iter() {
        if !is_method_available(method) || !list_method_test(method, operation) {
            continue;
        }
        if let Some(slot) = methods.get_mut(n) {
            *slot = method;
        }
        n += 1;
    }
    trace!(operation, count = n, "listed adjustment methods");
    n
}

fn list_method_test(method: i32, operation: i32) -> bool {
    let caps = method_capabilities(method);
    let suggested = || {
        caps.real
            && (caps.default_site_known
                || method_default_site(method).is_some())
    };
    match operation {
        0 => suggested() && !caps.fake,
        1 => suggested(),
        2 => (caps.real && !caps.fake) || suggested(),
        3 => caps.real,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_dummy_available() {
        for method in 0..=LIBGAMMA_METHOD_MAX {
            assert_eq!(is_method_available(method), method == LIBGAMMA_METHOD_DUMMY);
        }
        assert!(!is_method_available(-1));
        assert!(!is_method_available(LIBGAMMA_METHOD_COUNT as i32));
    }

    #[test]
    fn test_unknown_method_has_no_capabilities() {
        assert_eq!(method_capabilities(42), RawMethodCapabilities::default());
        assert_eq!(
            method_capabilities(LIBGAMMA_METHOD_LINUX_DRM),
            RawMethodCapabilities::default()
        );
    }

    #[test]
    fn test_list_all_reports_count_past_buffer() {
        let mut empty: [i32; 0] = [];
        assert_eq!(list_methods(&mut empty, 4), 1);

        let mut buf = [-1; LIBGAMMA_METHOD_COUNT];
        let n = list_methods(&mut buf, 4);
        assert_eq!(&buf[..n], &[LIBGAMMA_METHOD_DUMMY]);
    }

    #[test]
    fn test_site_variables() {
        assert_eq!(method_default_site_variable(LIBGAMMA_METHOD_X_RANDR), Some("DISPLAY"));
        assert_eq!(method_default_site_variable(LIBGAMMA_METHOD_DUMMY), None);
        assert_eq!(method_default_site(LIBGAMMA_METHOD_DUMMY), None);
    }

    #[test]
    fn test_info_masks() {
        assert_eq!(LIBGAMMA_CRTC_INFO_ALL, 0x1fff);
        assert_eq!(LIBGAMMA_CRTC_INFO_MACRO_EDID & LIBGAMMA_CRTC_INFO_GAMMA, LIBGAMMA_CRTC_INFO_GAMMA);
    }
}
