//! Sites, partitions and CRTCs.
//!
//! The three handles form a tree: a [`Partition`] borrows its [`Site`] and a
//! [`Crtc`] borrows its [`Partition`], so no child can outlive its parent.
//! Each handle releases its native state when dropped. A failed
//! constructor returns the error and holds nothing.
//!
//! ```
//! use libgamma::{Site, GammaRamps16, CrtcInfo, LIBGAMMA_METHOD_DUMMY};
//!
//! let site = Site::new(LIBGAMMA_METHOD_DUMMY, None)?;
//! let partition = site.partition(0)?;
//! let crtc = partition.crtc(0)?;
//!
//! let (info, _) = crtc.information(CrtcInfo::GAMMA_SIZE);
//! let mut ramps = GammaRamps16::new(info.red_gamma_size, info.green_gamma_size, info.blue_gamma_size)?;
//! ramps.fill_with(|x| x.powf(1.0 / 2.2));
//! crtc.set_gamma(&ramps)?;
//! crtc.restore()?;
//! # Ok::<(), libgamma::GammaError>(())
//! ```

use libgamma_native::{CrtcState, PartitionState, SiteState};
use tracing::{trace, warn};

use crate::error::{GammaError, Result, create_error};
use crate::method::{CrtcInfo, CrtcInformation};
use crate::ramps::{GammaRamps, RampElement};

fn translate(code: i32, operation: &'static str) -> GammaError {
    let err = create_error(code);
    warn!(code = err.code(), "{operation} failed: {err}");
    err
}

/// An open site: one display server, or the whole machine for methods
/// without servers.
#[derive(Debug)]
pub struct Site {
    state: SiteState,
}

impl Site {
    /// Opens `site` with adjustment method `method`.
    ///
    /// `None` selects the method's default site.
    ///
    /// # Errors
    ///
    /// [`LIBGAMMA_NO_SUCH_ADJUSTMENT_METHOD`](crate::LIBGAMMA_NO_SUCH_ADJUSTMENT_METHOD)
    /// if the method is unknown or not available, or whatever the method
    /// reports when the site cannot be opened.
    pub fn new(method: i32, site: Option<String>) -> Result<Self> {
        let state = SiteState::initialise(method, site).map_err(|c| translate(c, "site initialisation"))?;
        Ok(Self { state })
    }

    /// The adjustment method.
    pub fn method(&self) -> i32 {
        self.state.method()
    }

    /// The site identifier, if one was given.
    pub fn site(&self) -> Option<&str> {
        self.state.site()
    }

    /// Number of partitions on the site.
    pub fn partitions_available(&self) -> usize {
        self.state.partitions_available()
    }

    /// Restores the gamma ramps of every CRTC on the site.
    pub fn restore(&self) -> Result<()> {
        self.state.restore().map_err(|c| translate(c, "site restore"))
    }

    /// Opens partition `index`.
    pub fn partition(&self, index: usize) -> Result<Partition<'_>> {
        Partition::new(self, index)
    }

    /// Opens every partition in order.
    pub fn partitions(&self) -> impl Iterator<Item = Result<Partition<'_>>> + '_ {
        (0..self.partitions_available()).map(move |i| Partition::new(self, i))
    }
}

/// An open partition: a screen or graphics card.
#[derive(Debug)]
pub struct Partition<'s> {
    site: &'s Site,
    state: PartitionState,
}

impl<'s> Partition<'s> {
    /// Opens partition `index` of `site`.
    pub fn new(site: &'s Site, index: usize) -> Result<Self> {
        let state = PartitionState::initialise(&site.state, index)
            .map_err(|c| translate(c, "partition initialisation"))?;
        Ok(Self { site, state })
    }

    /// The site this partition belongs to.
    pub fn site(&self) -> &'s Site {
        self.site
    }

    /// Index of the partition within its site.
    pub fn partition(&self) -> usize {
        self.state.partition()
    }

    /// Number of CRTCs on the partition.
    pub fn crtcs_available(&self) -> usize {
        self.state.crtcs_available()
    }

    /// Restores the gamma ramps of every CRTC on the partition.
    pub fn restore(&self) -> Result<()> {
        self.state.restore().map_err(|c| translate(c, "partition restore"))
    }

    /// Opens CRTC `index`.
    pub fn crtc(&self, index: usize) -> Result<Crtc<'_>> {
        Crtc::new(self, index)
    }

    /// Opens every CRTC in order.
    pub fn crtcs(&self) -> impl Iterator<Item = Result<Crtc<'_>>> + '_ {
        (0..self.crtcs_available()).map(move |i| Crtc::new(self, i))
    }
}

/// An open CRTC.
#[derive(Debug)]
pub struct Crtc<'p> {
    partition: &'p Partition<'p>,
    state: CrtcState,
}

impl<'p> Crtc<'p> {
    /// Opens CRTC `index` of `partition`.
    pub fn new(partition: &'p Partition<'p>, index: usize) -> Result<Self> {
        let state = CrtcState::initialise(&partition.state, index)
            .map_err(|c| translate(c, "CRTC initialisation"))?;
        Ok(Self { partition, state })
    }

    /// The partition this CRTC belongs to.
    pub fn partition(&self) -> &'p Partition<'p> {
        self.partition
    }

    /// Index of the CRTC within its partition.
    pub fn crtc(&self) -> usize {
        self.state.crtc()
    }

    /// Restores the CRTC's gamma ramps.
    pub fn restore(&self) -> Result<()> {
        self.state.restore().map_err(|c| translate(c, "CRTC restore"))
    }

    /// Reads the fields selected by `fields`.
    ///
    /// The flag is true when at least one requested field could not be
    /// read. The call itself cannot fail; check the per-field status codes
    /// or [`CrtcInformation::failed_fields`] before trusting a value.
    pub fn information(&self, fields: CrtcInfo) -> (CrtcInformation, bool) {
        let (raw, failed) = self.state.information(fields.bits());
        (CrtcInformation::from(raw), failed)
    }

    /// Reads the current ramps into `ramps`.
    ///
    /// On failure the contents of `ramps` are unspecified.
    pub fn get_gamma<T: RampElement>(&self, ramps: &mut GammaRamps<T>) -> Result<()> {
        self.state
            .get_gamma_ramps(ramps.native_mut())
            .map_err(|c| translate(c, "reading gamma ramps"))?;
        trace!(crtc = self.crtc(), depth = T::DEPTH, "read gamma ramps");
        Ok(())
    }

    /// Applies `ramps`.
    pub fn set_gamma<T: RampElement>(&self, ramps: &GammaRamps<T>) -> Result<()> {
        self.state
            .set_gamma_ramps(ramps.native())
            .map_err(|c| translate(c, "writing gamma ramps"))?;
        trace!(crtc = self.crtc(), depth = T::DEPTH, "wrote gamma ramps");
        Ok(())
    }
}
