//! Method capabilities and CRTC information.

use bitflags::bitflags;
use libgamma_native as native;
use native::{RawCrtcInformation, RawMethodCapabilities};

pub use native::{ConnectorType, Decision, SubpixelOrder};

bitflags! {
    /// Selects fields of a [`CrtcInformation`].
    ///
    /// Used both to request fields from [`Crtc::information`](crate::Crtc::information)
    /// and to report which fields a method supports.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CrtcInfo: i32 {
        /// The EDID blob.
        const EDID = native::LIBGAMMA_CRTC_INFO_EDID;
        /// Width in millimetres, from the method.
        const WIDTH_MM = native::LIBGAMMA_CRTC_INFO_WIDTH_MM;
        /// Height in millimetres, from the method.
        const HEIGHT_MM = native::LIBGAMMA_CRTC_INFO_HEIGHT_MM;
        /// Width in millimetres, from the EDID.
        const WIDTH_MM_EDID = native::LIBGAMMA_CRTC_INFO_WIDTH_MM_EDID;
        /// Height in millimetres, from the EDID.
        const HEIGHT_MM_EDID = native::LIBGAMMA_CRTC_INFO_HEIGHT_MM_EDID;
        /// Ramp sizes.
        const GAMMA_SIZE = native::LIBGAMMA_CRTC_INFO_GAMMA_SIZE;
        /// Ramp depth.
        const GAMMA_DEPTH = native::LIBGAMMA_CRTC_INFO_GAMMA_DEPTH;
        /// Whether ramps are supported.
        const GAMMA_SUPPORT = native::LIBGAMMA_CRTC_INFO_GAMMA_SUPPORT;
        /// Subpixel order.
        const SUBPIXEL_ORDER = native::LIBGAMMA_CRTC_INFO_SUBPIXEL_ORDER;
        /// Whether a monitor is attached.
        const ACTIVE = native::LIBGAMMA_CRTC_INFO_ACTIVE;
        /// Connector name.
        const CONNECTOR_NAME = native::LIBGAMMA_CRTC_INFO_CONNECTOR_NAME;
        /// Connector type.
        const CONNECTOR_TYPE = native::LIBGAMMA_CRTC_INFO_CONNECTOR_TYPE;
        /// Monitor gamma, from the EDID.
        const GAMMA = native::LIBGAMMA_CRTC_INFO_GAMMA;

        /// Everything read from the EDID.
        const MACRO_EDID = native::LIBGAMMA_CRTC_INFO_MACRO_EDID;
        /// Viewport size and layout.
        const MACRO_VIEWPORT = native::LIBGAMMA_CRTC_INFO_MACRO_VIEWPORT;
        /// Ramp size and depth.
        const MACRO_RAMP = native::LIBGAMMA_CRTC_INFO_MACRO_RAMP;
        /// Connector name and type.
        const MACRO_CONNECTOR = native::LIBGAMMA_CRTC_INFO_MACRO_CONNECTOR;
        /// Support and activity.
        const MACRO_ACTIVE = native::LIBGAMMA_CRTC_INFO_MACRO_ACTIVE;
    }
}

/// What an adjustment method supports.
///
/// The restore flags predict whether a restore call can work. They do not
/// guarantee it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MethodCapabilities {
    /// CRTC information fields the method can report.
    pub crtc_information: CrtcInfo,
    /// The method can pick a site without being told which.
    pub default_site_known: bool,
    /// More than one site may exist.
    pub multiple_sites: bool,
    /// More than one partition may exist per site.
    pub multiple_partitions: bool,
    /// More than one CRTC may exist per partition.
    pub multiple_crtcs: bool,
    /// Partitions correspond to graphics cards.
    pub partitions_are_graphics_cards: bool,
    /// A whole site can be restored.
    pub site_restore: bool,
    /// A whole partition can be restored.
    pub partition_restore: bool,
    /// A single CRTC can be restored.
    pub crtc_restore: bool,
    /// The three channels always have the same size.
    pub identical_gamma_sizes: bool,
    /// Ramp sizes never change.
    pub fixed_gamma_size: bool,
    /// Ramp depth never changes.
    pub fixed_gamma_depth: bool,
    /// The method talks to real hardware or a real display server.
    pub real: bool,
    /// The method emulates another.
    pub fake: bool,
}

impl From<RawMethodCapabilities> for MethodCapabilities {
    fn from(raw: RawMethodCapabilities) -> Self {
        Self {
            crtc_information: CrtcInfo::from_bits_truncate(raw.crtc_information),
            default_site_known: raw.default_site_known,
            multiple_sites: raw.multiple_sites,
            multiple_partitions: raw.multiple_partitions,
            multiple_crtcs: raw.multiple_crtcs,
            partitions_are_graphics_cards: raw.partitions_are_graphics_cards,
            site_restore: raw.site_restore,
            partition_restore: raw.partition_restore,
            crtc_restore: raw.crtc_restore,
            identical_gamma_sizes: raw.identical_gamma_sizes,
            fixed_gamma_size: raw.fixed_gamma_size,
            fixed_gamma_depth: raw.fixed_gamma_depth,
            real: raw.real,
            fake: raw.fake,
        }
    }
}

/// Information about a CRTC and the monitor attached to it.
///
/// Every value has a status code next to it. `0` means the value is valid;
/// otherwise the code says why it is not, in the same ranges as
/// [`GammaError::code`](crate::GammaError::code). Fields that were not
/// requested are left at their defaults with a zero status.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CrtcInformation {
    /// Raw EDID.
    pub edid: Option<Vec<u8>>,
    /// Status of `edid`.
    pub edid_error: i32,

    /// Width in millimetres, from the method.
    pub width_mm: usize,
    /// Status of `width_mm`.
    pub width_mm_error: i32,

    /// Height in millimetres, from the method.
    pub height_mm: usize,
    /// Status of `height_mm`.
    pub height_mm_error: i32,

    /// Width in millimetres, from the EDID.
    pub width_mm_edid: usize,
    /// Status of `width_mm_edid`.
    pub width_mm_edid_error: i32,

    /// Height in millimetres, from the EDID.
    pub height_mm_edid: usize,
    /// Status of `height_mm_edid`.
    pub height_mm_edid_error: i32,

    /// Stops in the red ramp.
    pub red_gamma_size: usize,
    /// Stops in the green ramp.
    pub green_gamma_size: usize,
    /// Stops in the blue ramp.
    pub blue_gamma_size: usize,
    /// Status of the three ramp sizes.
    pub gamma_size_error: i32,

    /// Ramp depth: bits per stop, or `-1`/`-2` for `f32`/`f64`.
    pub gamma_depth: i32,
    /// Status of `gamma_depth`.
    pub gamma_depth_error: i32,

    /// Whether ramps can be adjusted.
    pub gamma_support: Decision,
    /// Status of `gamma_support`.
    pub gamma_support_error: i32,

    /// Subpixel layout of the monitor.
    pub subpixel_order: SubpixelOrder,
    /// Status of `subpixel_order`.
    pub subpixel_order_error: i32,

    /// Whether a monitor is attached.
    pub active: bool,
    /// Status of `active`.
    pub active_error: i32,

    /// Connector name, such as `HDMI-A-1`.
    pub connector_name: Option<String>,
    /// Status of `connector_name`.
    pub connector_name_error: i32,

    /// Connector type.
    pub connector_type: ConnectorType,
    /// Status of `connector_type`.
    pub connector_type_error: i32,

    /// Red gamma of the monitor.
    pub gamma_red: f32,
    /// Green gamma of the monitor.
    pub gamma_green: f32,
    /// Blue gamma of the monitor.
    pub gamma_blue: f32,
    /// Status of the three gamma values.
    pub gamma_error: i32,
}

impl CrtcInformation {
    /// Returns the fields whose status is an error.
    pub fn failed_fields(&self) -> CrtcInfo {
        let statuses = [
            (CrtcInfo::EDID, self.edid_error),
            (CrtcInfo::WIDTH_MM, self.width_mm_error),
            (CrtcInfo::HEIGHT_MM, self.height_mm_error),
            (CrtcInfo::WIDTH_MM_EDID, self.width_mm_edid_error),
            (CrtcInfo::HEIGHT_MM_EDID, self.height_mm_edid_error),
            (CrtcInfo::GAMMA_SIZE, self.gamma_size_error),
            (CrtcInfo::GAMMA_DEPTH, self.gamma_depth_error),
            (CrtcInfo::GAMMA_SUPPORT, self.gamma_support_error),
            (CrtcInfo::SUBPIXEL_ORDER, self.subpixel_order_error),
            (CrtcInfo::ACTIVE, self.active_error),
            (CrtcInfo::CONNECTOR_NAME, self.connector_name_error),
            (CrtcInfo::CONNECTOR_TYPE, self.connector_type_error),
            (CrtcInfo::GAMMA, self.gamma_error),
        ];
        statuses
            .into_iter()
            .filter(|&(_, status)| status != 0)
            .fold(CrtcInfo::empty(), |acc, (field, _)| acc | field)
    }
}

impl From<RawCrtcInformation> for CrtcInformation {
    /// Takes over the EDID and connector name buffers without copying.
    fn from(raw: RawCrtcInformation) -> Self {
        Self {
            edid: raw.edid,
            edid_error: raw.edid_error,
            width_mm: raw.width_mm,
            width_mm_error: raw.width_mm_error,
            height_mm: raw.height_mm,
            height_mm_error: raw.height_mm_error,
            width_mm_edid: raw.width_mm_edid,
            width_mm_edid_error: raw.width_mm_edid_error,
            height_mm_edid: raw.height_mm_edid,
            height_mm_edid_error: raw.height_mm_edid_error,
            red_gamma_size: raw.red_gamma_size,
            green_gamma_size: raw.green_gamma_size,
            blue_gamma_size: raw.blue_gamma_size,
            gamma_size_error: raw.gamma_size_error,
            gamma_depth: raw.gamma_depth,
            gamma_depth_error: raw.gamma_depth_error,
            gamma_support: raw.gamma_support,
            gamma_support_error: raw.gamma_support_error,
            subpixel_order: raw.subpixel_order,
            subpixel_order_error: raw.subpixel_order_error,
            active: raw.active,
            active_error: raw.active_error,
            connector_name: raw.connector_name,
            connector_name_error: raw.connector_name_error,
            connector_type: raw.connector_type,
            connector_type_error: raw.connector_type_error,
            gamma_red: raw.gamma_red,
            gamma_green: raw.gamma_green,
            gamma_blue: raw.gamma_blue,
            gamma_error: raw.gamma_error,
        }
    }
}
