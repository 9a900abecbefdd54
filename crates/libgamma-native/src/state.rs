//! Site, partition and CRTC states.
//!
//! Each state is acquired by an `initialise` call and released when dropped.
//! Method-specific work is dispatched to the backend the state was opened
//! with.

use crate::dummy::{DummyCrtc, DummyPartition, DummySite};
use crate::error::LIBGAMMA_NO_SUCH_ADJUSTMENT_METHOD;
use crate::method::{LIBGAMMA_METHOD_DUMMY, RawCrtcInformation, is_method_available};
use crate::ramps::{NativeRamps, RampElement};
use tracing::debug;

#[derive(Debug)]
enum SiteBackend {
    Dummy(DummySite),
}

#[derive(Debug)]
enum PartitionBackend {
    Dummy(DummyPartition),
}

#[derive(Debug)]
enum CrtcBackend {
    Dummy(DummyCrtc),
}

/// An open site.
#[derive(Debug)]
pub struct SiteState {
    method: i32,
    site: Option<String>,
    partitions_available: usize,
    backend: SiteBackend,
}

/// An open partition of a site.
#[derive(Debug)]
pub struct PartitionState {
    partition: usize,
    crtcs_available: usize,
    backend: PartitionBackend,
}

/// An open CRTC of a partition.
#[derive(Debug)]
pub struct CrtcState {
    partition: usize,
    crtc: usize,
    backend: CrtcBackend,
}

impl SiteState {
    /// Opens `site` with `method`. `None` selects the method's default site.
    pub fn initialise(method: i32, site: Option<String>) -> Result<Self, i32> {
        if !is_method_available(method) {
            return Err(LIBGAMMA_NO_SUCH_ADJUSTMENT_METHOD);
        }
        let (backend, partitions_available) = match method {
            LIBGAMMA_METHOD_DUMMY => {
                let (site, n) = DummySite::initialise(site.as_deref())?;
                (SiteBackend::Dummy(site), n)
            }
            _ => return Err(LIBGAMMA_NO_SUCH_ADJUSTMENT_METHOD),
        };
        debug!(method, site = ?site, partitions_available, "opened site");
        Ok(Self {
            method,
            site,
            partitions_available,
            backend,
        })
    }

    /// The adjustment method the site was opened with.
    pub fn method(&self) -> i32 {
        self.method
    }

    /// The site identifier, if one was given.
    pub fn site(&self) -> Option<&str> {
        self.site.as_deref()
    }

    /// Number of partitions on the site.
    pub fn partitions_available(&self) -> usize {
        self.partitions_available
    }

    /// Restores the gamma ramps of every CRTC on the site.
    pub fn restore(&self) -> Result<(), i32> {
        match &self.backend {
            SiteBackend::Dummy(site) => site.restore(),
        }
    }
}

impl Drop for SiteState {
    fn drop(&mut self) {
        debug!(method = self.method, "freed site");
    }
}

impl PartitionState {
    /// Opens partition `partition` of `site`.
    pub fn initialise(site: &SiteState, partition: usize) -> Result<Self, i32> {
        let (backend, crtcs_available) = match &site.backend {
            SiteBackend::Dummy(s) => {
                let (p, n) = s.partition(partition)?;
                (PartitionBackend::Dummy(p), n)
            }
        };
        debug!(partition, crtcs_available, "opened partition");
        Ok(Self {
            partition,
            crtcs_available,
            backend,
        })
    }

    /// Index of the partition within its site.
    pub fn partition(&self) -> usize {
        self.partition
    }

    /// Number of CRTCs on the partition.
    pub fn crtcs_available(&self) -> usize {
        self.crtcs_available
    }

    /// Restores the gamma ramps of every CRTC on the partition.
    pub fn restore(&self) -> Result<(), i32> {
        match &self.backend {
            PartitionBackend::Dummy(p) => p.restore(),
        }
    }
}

impl Drop for PartitionState {
    fn drop(&mut self) {
        debug!(partition = self.partition, "freed partition");
    }
}

impl CrtcState {
    /// Opens CRTC `crtc` of `partition`.
    pub fn initialise(partition: &PartitionState, crtc: usize) -> Result<Self, i32> {
        let backend = match &partition.backend {
            PartitionBackend::Dummy(p) => CrtcBackend::Dummy(p.crtc(crtc)?),
        };
        debug!(partition = partition.partition, crtc, "opened CRTC");
        Ok(Self {
            partition: partition.partition,
            crtc,
            backend,
        })
    }

    /// Index of the CRTC within its partition.
    pub fn crtc(&self) -> usize {
        self.crtc
    }

    /// Restores the CRTC's gamma ramps.
    pub fn restore(&self) -> Result<(), i32> {
        match &self.backend {
            CrtcBackend::Dummy(c) => c.restore(),
        }
    }

    /// Reads the fields selected by `fields`.
    ///
    /// The flag is true when at least one requested field reports an error.
    pub fn information(&self, fields: i32) -> (RawCrtcInformation, bool) {
        match &self.backend {
            CrtcBackend::Dummy(c) => c.information(fields),
        }
    }

    /// Reads the current ramps into `ramps`.
    pub fn get_gamma_ramps<T: RampElement>(&self, ramps: &mut NativeRamps<T>) -> Result<(), i32> {
        match &self.backend {
            CrtcBackend::Dummy(c) => c.get_gamma(ramps),
        }
    }

    /// Applies `ramps`.
    pub fn set_gamma_ramps<T: RampElement>(&self, ramps: &NativeRamps<T>) -> Result<(), i32> {
        match &self.backend {
            CrtcBackend::Dummy(c) => c.set_gamma(ramps),
        }
    }
}

impl Drop for CrtcState {
    fn drop(&mut self) {
        debug!(partition = self.partition, crtc = self.crtc, "freed CRTC");
    }
}
