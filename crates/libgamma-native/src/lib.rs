//! Native gamma adjustment layer.
//!
//! This crate is the low-level side of `libgamma`: integer error codes,
//! the adjustment method table, CRTC information records, ramp allocation,
//! EDID coding and the site/partition/CRTC state calls. Fallible calls
//! return `Result<_, i32>` where the error is a raw code as described in
//! [`error`]. The safe API lives in the `libgamma` crate.
//!
//! Only the [`dummy`] method is compiled in. It fakes a configurable
//! topology in memory:
//!
//! ```
//! use libgamma_native::{SiteState, PartitionState, CrtcState, LIBGAMMA_METHOD_DUMMY};
//! use libgamma_native::gamma_ramps_initialise;
//!
//! let site = SiteState::initialise(LIBGAMMA_METHOD_DUMMY, None).unwrap();
//! let partition = PartitionState::initialise(&site, 0).unwrap();
//! let crtc = CrtcState::initialise(&partition, 0).unwrap();
//!
//! let mut ramps = gamma_ramps_initialise::<u16>(256, 256, 256).unwrap();
//! crtc.get_gamma_ramps(&mut ramps).unwrap();
//! assert_eq!(ramps.channels().0[255], u16::MAX);
//! ```

#![warn(clippy::all)]

pub mod dummy;
pub mod edid;
pub mod error;
pub mod method;
pub mod ramps;
pub mod state;

pub use edid::{
    EDID_LENGTH, behex_edid_lowercase, behex_edid_uppercase, parse_edid, synthesize_edid, unhex_edid,
};
pub use error::*;
pub use method::*;
pub use ramps::{NativeRamps, RampElement, gamma_ramps_initialise};
pub use state::{CrtcState, PartitionState, SiteState};
