//! Safe access to display gamma ramps.
//!
//! This crate wraps the native adjustment layer in owned types:
//!
//! - [`Site`], [`Partition`] and [`Crtc`] handles that release their native
//!   state on drop and borrow their parent, so the tree cannot be torn down
//!   out of order
//! - [`GammaRamps`], one allocation holding the three channels
//! - [`MethodCapabilities`] and [`CrtcInformation`] descriptors
//! - [`GammaError`], which carries the native error code of a failed call
//!
//! # Quick Start
//!
//! ```
//! use libgamma::{list_methods, Site, CrtcInfo};
//!
//! // Every available method, most preferred first.
//! let method = list_methods(4)[0];
//!
//! let site = Site::new(method, None)?;
//! for partition in site.partitions() {
//!     let partition = partition?;
//!     for crtc in partition.crtcs() {
//!         let (info, failed) = crtc?.information(CrtcInfo::all());
//!         if failed {
//!             println!("unreadable fields: {:?}", info.failed_fields());
//!         }
//!         println!("{:?}: {} stops", info.connector_name, info.red_gamma_size);
//!     }
//! }
//! # Ok::<(), libgamma::GammaError>(())
//! ```
//!
//! # Errors
//!
//! Constructors and mutating calls return [`Result`]. Queries that cannot
//! fail as a whole, such as [`Crtc::information`], report per-field status
//! codes instead.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod facade;
mod method;
mod ramps;
mod site;

pub use error::{
    GammaError, RequiredGroup, Result, create_error, name_of_error, perror, perror_with_group,
    value_of_error, write_error,
};
pub use facade::{
    behex_edid, behex_edid_lowercase, behex_edid_uppercase, gamma_ramps8_create,
    gamma_ramps16_create, gamma_ramps32_create, gamma_ramps64_create, gamma_rampsd_create,
    gamma_rampsf_create, is_method_available, list_methods, method_capabilities,
    method_default_site, method_default_site_variable, unhex_edid,
};
pub use method::{ConnectorType, CrtcInfo, CrtcInformation, Decision, MethodCapabilities, SubpixelOrder};
pub use ramps::{
    GammaRamps, GammaRamps8, GammaRamps16, GammaRamps32, GammaRamps64, GammaRampsD, GammaRampsF,
    Ramp, RampElement,
};
pub use site::{Crtc, Partition, Site};

pub use libgamma_native::error::{
    LIBGAMMA_DEVICE_REQUIRE_GROUP, LIBGAMMA_EDID_NOT_FOUND, LIBGAMMA_ERRNO_SET,
    LIBGAMMA_NO_SUCH_ADJUSTMENT_METHOD, LIBGAMMA_NO_SUCH_CRTC, LIBGAMMA_NO_SUCH_PARTITION,
    LIBGAMMA_NO_SUCH_SITE, LIBGAMMA_WRONG_GAMMA_RAMP_SIZE,
};
pub use libgamma_native::method::{
    LIBGAMMA_METHOD_COUNT, LIBGAMMA_METHOD_DUMMY, LIBGAMMA_METHOD_LINUX_DRM, LIBGAMMA_METHOD_MAX,
    LIBGAMMA_METHOD_QUARTZ_CORE_GRAPHICS, LIBGAMMA_METHOD_W32_GDI, LIBGAMMA_METHOD_X_RANDR,
    LIBGAMMA_METHOD_X_VIDMODE,
};
