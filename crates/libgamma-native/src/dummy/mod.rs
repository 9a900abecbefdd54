//! The dummy adjustment method.
//!
//! Emulates sites, partitions and CRTCs in memory according to the active
//! [`DummyConfig`]. Ramps start as the identity curve. The identity is also
//! what a restore returns to. Written values are quantised to the
//! configured depth, as real hardware would.

mod config;

pub use config::{ConfigError, ConfigResult, CrtcTemplate, DummyConfig, configure, current, reset};

use crate::error::*;
use crate::method::*;
use crate::ramps::{NativeRamps, RampElement};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::trace;

/// Capabilities derived from the active config.
pub fn capabilities() -> RawMethodCapabilities {
    capabilities_of(&current())
}

fn capabilities_of(config: &DummyConfig) -> RawMethodCapabilities {
    let t = &config.crtc;
    let mut crtc_information = LIBGAMMA_CRTC_INFO_WIDTH_MM
        | LIBGAMMA_CRTC_INFO_HEIGHT_MM
        | LIBGAMMA_CRTC_INFO_MACRO_RAMP
        | LIBGAMMA_CRTC_INFO_MACRO_ACTIVE
        | LIBGAMMA_CRTC_INFO_SUBPIXEL_ORDER
        | LIBGAMMA_CRTC_INFO_CONNECTOR_TYPE;
    if t.connector_name.is_some() {
        crtc_information |= LIBGAMMA_CRTC_INFO_CONNECTOR_NAME;
    }
    if t.edid.is_some() {
        crtc_information |= LIBGAMMA_CRTC_INFO_MACRO_EDID;
    }

    RawMethodCapabilities {
        crtc_information,
        default_site_known: config.default_site_known,
        multiple_sites: config.sites > 1,
        multiple_partitions: config.partitions > 1,
        multiple_crtcs: config.crtcs > 1,
        partitions_are_graphics_cards: false,
        site_restore: config.site_restore,
        partition_restore: config.partition_restore,
        crtc_restore: config.crtc_restore,
        identical_gamma_sizes: t.red_size == t.green_size && t.green_size == t.blue_size,
        fixed_gamma_size: true,
        fixed_gamma_depth: true,
        real: config.real,
        fake: config.fake,
    }
}

/// Per-site configuration frozen at initialisation.
#[derive(Debug)]
struct Frozen {
    config: DummyConfig,
    edid: Option<Vec<u8>>,
}

/// Ramp contents of one CRTC, normalised to `[0, 1]`.
#[derive(Debug, Clone)]
struct CrtcRamps {
    channels: [Vec<f64>; 3],
}

impl CrtcRamps {
    fn identity(t: &CrtcTemplate) -> Self {
        let ramp = |n: usize| (0..n).map(|i| i as f64 / (n - 1) as f64).collect();
        Self {
            channels: [ramp(t.red_size), ramp(t.green_size), ramp(t.blue_size)],
        }
    }
}

#[derive(Debug)]
struct SiteData {
    /// Indexed by partition, then CRTC.
    crtcs: Vec<Vec<CrtcRamps>>,
}

#[derive(Debug, Clone)]
struct Shared {
    frozen: Arc<Frozen>,
    data: Arc<Mutex<SiteData>>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, SiteData> {
        self.data.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn template(&self) -> &CrtcTemplate {
        &self.frozen.config.crtc
    }
}

/// An open dummy site.
#[derive(Debug)]
pub struct DummySite {
    shared: Shared,
}

/// An open dummy partition.
#[derive(Debug)]
pub struct DummyPartition {
    shared: Shared,
    index: usize,
}

/// An open dummy CRTC.
#[derive(Debug)]
pub struct DummyCrtc {
    shared: Shared,
    partition: usize,
    index: usize,
}

impl DummySite {
    /// Opens a site. `site` is the decimal site index; `None` selects site 0.
    ///
    /// Returns the site and its partition count.
    pub fn initialise(site: Option<&str>) -> Result<(Self, usize), i32> {
        let config = current();
        let edid = config.decoded_edid().map_err(|_| LIBGAMMA_OPEN_SITE_FAILED)?;

        let index = match site {
            None => 0,
            Some(s) => s.trim().parse::<usize>().map_err(|_| LIBGAMMA_NO_SUCH_SITE)?,
        };
        if index >= config.sites {
            return Err(LIBGAMMA_NO_SUCH_SITE);
        }

        let identity = CrtcRamps::identity(&config.crtc);
        let crtcs = vec![vec![identity; config.crtcs]; config.partitions];
        let partitions = config.partitions;
        let shared = Shared {
            frozen: Arc::new(Frozen { config, edid }),
            data: Arc::new(Mutex::new(SiteData { crtcs })),
        };
        Ok((Self { shared }, partitions))
    }

    /// Restores every CRTC of the site.
    pub fn restore(&self) -> Result<(), i32> {
        if !self.shared.frozen.config.site_restore {
            return Err(libc::ENOTSUP);
        }
        let identity = CrtcRamps::identity(self.shared.template());
        for partition in self.shared.lock().crtcs.iter_mut() {
            partition.fill(identity.clone());
        }
        Ok(())
    }

    /// Opens partition `index`. Returns the partition and its CRTC count.
    pub fn partition(&self, index: usize) -> Result<(DummyPartition, usize), i32> {
        let crtcs = self
            .shared
            .lock()
            .crtcs
            .get(index)
            .map(Vec::len)
            .ok_or(LIBGAMMA_NO_SUCH_PARTITION)?;
        let partition = DummyPartition {
            shared: self.shared.clone(),
            index,
        };
        Ok((partition, crtcs))
    }
}

impl DummyPartition {
    /// Restores every CRTC of the partition.
    pub fn restore(&self) -> Result<(), i32> {
        if !self.shared.frozen.config.partition_restore {
            return Err(libc::ENOTSUP);
        }
        let identity = CrtcRamps::identity(self.shared.template());
        if let Some(partition) = self.shared.lock().crtcs.get_mut(self.index) {
            partition.fill(identity);
        }
        Ok(())
    }

    /// Opens CRTC `index` of this partition.
    pub fn crtc(&self, index: usize) -> Result<DummyCrtc, i32> {
        let exists = self
            .shared
            .lock()
            .crtcs
            .get(self.index)
            .is_some_and(|p| index < p.len());
        if !exists {
            return Err(LIBGAMMA_NO_SUCH_CRTC);
        }
        Ok(DummyCrtc {
            shared: self.shared.clone(),
            partition: self.index,
            index,
        })
    }
}

impl DummyCrtc {
    /// Restores the CRTC to the identity ramps.
    pub fn restore(&self) -> Result<(), i32> {
        if !self.shared.frozen.config.crtc_restore {
            return Err(libc::ENOTSUP);
        }
        let identity = CrtcRamps::identity(self.shared.template());
        self.with_ramps(|ramps| *ramps = identity);
        Ok(())
    }

    /// Reports the requested fields. Returns whether any of them failed.
    pub fn information(&self, fields: i32) -> (RawCrtcInformation, bool) {
        let t = self.shared.template();
        let mut info = RawCrtcInformation::default();
        let mut failed = false;

        if fields & LIBGAMMA_CRTC_INFO_MACRO_EDID != 0 {
            info.edid = self.shared.frozen.edid.clone();
            if info.edid.is_none() && fields & LIBGAMMA_CRTC_INFO_EDID != 0 {
                info.edid_error = LIBGAMMA_EDID_NOT_FOUND;
                failed = true;
            }
        }
        if fields & LIBGAMMA_CRTC_INFO_WIDTH_MM != 0 {
            info.width_mm = t.width_mm;
        }
        if fields & LIBGAMMA_CRTC_INFO_HEIGHT_MM != 0 {
            info.height_mm = t.height_mm;
        }
        failed |= crate::edid::parse_edid(&mut info, fields);
        if fields & LIBGAMMA_CRTC_INFO_EDID == 0 {
            info.edid = None;
        }
        if fields & LIBGAMMA_CRTC_INFO_GAMMA_SIZE != 0 {
            info.red_gamma_size = t.red_size;
            info.green_gamma_size = t.green_size;
            info.blue_gamma_size = t.blue_size;
        }
        if fields & LIBGAMMA_CRTC_INFO_GAMMA_DEPTH != 0 {
            info.gamma_depth = t.depth;
        }
        if fields & LIBGAMMA_CRTC_INFO_GAMMA_SUPPORT != 0 {
            info.gamma_support = t.gamma_support;
        }
        if fields & LIBGAMMA_CRTC_INFO_SUBPIXEL_ORDER != 0 {
            info.subpixel_order = t.subpixel_order;
        }
        if fields & LIBGAMMA_CRTC_INFO_ACTIVE != 0 {
            info.active = t.active;
        }
        if fields & LIBGAMMA_CRTC_INFO_CONNECTOR_NAME != 0 {
            match &t.connector_name {
                Some(name) => info.connector_name = Some(name.clone()),
                None => {
                    info.connector_name_error = LIBGAMMA_CONNECTOR_UNKNOWN;
                    failed = true;
                }
            }
        }
        if fields & LIBGAMMA_CRTC_INFO_CONNECTOR_TYPE != 0 {
            info.connector_type = t.connector_type;
        }

        (info, failed)
    }

    /// Copies the current ramps into `ramps`, converting to `T`.
    pub fn get_gamma<T: RampElement>(&self, ramps: &mut NativeRamps<T>) -> Result<(), i32> {
        self.check(ramps, LIBGAMMA_GAMMA_RAMP_READ_FAILED)?;
        let (red, green, blue) = ramps.channels_mut();
        self.with_ramps(|stored| {
            for (dst, src) in [red, green, blue].into_iter().zip(stored.channels.iter()) {
                for (d, s) in dst.iter_mut().zip(src) {
                    *d = T::from_unit(*s);
                }
            }
        });
        trace!(crtc = self.index, depth = T::DEPTH, "read dummy gamma ramps");
        Ok(())
    }

    /// Stores `ramps`, quantised to the CRTC's depth.
    pub fn set_gamma<T: RampElement>(&self, ramps: &NativeRamps<T>) -> Result<(), i32> {
        self.check(ramps, LIBGAMMA_GAMMA_RAMP_WRITE_FAILED)?;
        let depth = self.shared.template().depth;
        let (red, green, blue) = ramps.channels();
        self.with_ramps(|stored| {
            for (src, dst) in [red, green, blue].into_iter().zip(stored.channels.iter_mut()) {
                for (d, s) in dst.iter_mut().zip(src) {
                    *d = quantise(s.to_unit(), depth);
                }
            }
        });
        trace!(crtc = self.index, depth = T::DEPTH, "wrote dummy gamma ramps");
        Ok(())
    }

    fn check<T: RampElement>(&self, ramps: &NativeRamps<T>, unsupported: i32) -> Result<(), i32> {
        let t = self.shared.template();
        if t.gamma_support == Decision::No {
            return Err(unsupported);
        }
        if (ramps.red_size(), ramps.green_size(), ramps.blue_size())
            != (t.red_size, t.green_size, t.blue_size)
        {
            return Err(LIBGAMMA_WRONG_GAMMA_RAMP_SIZE);
        }
        Ok(())
    }

    fn with_ramps<R>(&self, f: impl FnOnce(&mut CrtcRamps) -> R) -> R {
        let mut data = self.shared.lock();
        // Partition and CRTC indices were validated when the handle was opened.
        f(&mut data.crtcs[self.partition][self.index])
    }
}

fn quantise(value: f64, depth: i32) -> f64 {
    let value = value.clamp(0.0, 1.0);
    match depth {
        -1 => value as f32 as f64,
        d if d > 0 => {
            let max = if d >= 64 { u64::MAX as f64 } else { ((1u64 << d) - 1) as f64 };
            (value * max).round() / max
        }
        _ => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capabilities_follow_config() {
        let mut config = DummyConfig::default();
        let caps = capabilities_of(&config);
        assert!(caps.fake && !caps.real);
        assert_eq!(caps.crtc_information & LIBGAMMA_CRTC_INFO_EDID, 0);
        assert!(!caps.multiple_crtcs);

        config.crtcs = 2;
        config.crtc.edid = Some("00".into());
        let caps = capabilities_of(&config);
        assert!(caps.multiple_crtcs);
        assert_ne!(caps.crtc_information & LIBGAMMA_CRTC_INFO_EDID, 0);
    }

    #[test]
    fn test_quantise() {
        assert_eq!(quantise(0.5, 8), 128.0 / 255.0);
        assert_eq!(quantise(1.5, 16), 1.0);
        assert_eq!(quantise(0.3, -2), 0.3);
    }
}
