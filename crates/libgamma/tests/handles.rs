//! Site, partition and CRTC handles against the dummy method.

use std::sync::{Mutex, MutexGuard, PoisonError};

use approx::assert_relative_eq;
use libgamma::*;
use libgamma_native::dummy::{self, DummyConfig};
use libgamma_native::synthesize_edid;

static CONFIG_LOCK: Mutex<()> = Mutex::new(());

/// Installs `config` for the rest of the test and resets it afterwards.
struct Configured<'a> {
    _guard: MutexGuard<'a, ()>,
}

impl Drop for Configured<'_> {
    fn drop(&mut self) {
        dummy::reset();
    }
}

fn configure(config: DummyConfig) -> Configured<'static> {
    let guard = CONFIG_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    dummy::configure(config).unwrap();
    Configured { _guard: guard }
}

fn defaults() -> Configured<'static> {
    configure(DummyConfig::default())
}

#[test]
fn invalid_method_fails_with_library_code() {
    let _cfg = defaults();
    for method in [-1, LIBGAMMA_METHOD_X_RANDR, LIBGAMMA_METHOD_COUNT as i32, 1000] {
        let err = Site::new(method, None).unwrap_err();
        assert_eq!(err.code(), LIBGAMMA_NO_SUCH_ADJUSTMENT_METHOD);
        assert!(err.code() < 0);
    }
}

#[test]
fn enumerates_tree() {
    let _cfg = configure(DummyConfig {
        partitions: 2,
        crtcs: 3,
        ..Default::default()
    });

    let site = Site::new(LIBGAMMA_METHOD_DUMMY, None).unwrap();
    assert_eq!(site.method(), LIBGAMMA_METHOD_DUMMY);
    assert_eq!(site.site(), None);
    assert_eq!(site.partitions_available(), 2);

    let mut seen = Vec::new();
    for partition in site.partitions() {
        let partition = partition.unwrap();
        assert_eq!(partition.crtcs_available(), 3);
        for crtc in partition.crtcs() {
            let crtc = crtc.unwrap();
            seen.push((crtc.partition().partition(), crtc.crtc()));
        }
    }
    assert_eq!(seen.len(), 6);
    assert_eq!(seen[4], (1, 1));
}

#[test]
fn out_of_range_indices() {
    let _cfg = defaults();
    assert_eq!(
        Site::new(LIBGAMMA_METHOD_DUMMY, Some("7".into())).unwrap_err().code(),
        LIBGAMMA_NO_SUCH_SITE
    );
    let site = Site::new(LIBGAMMA_METHOD_DUMMY, Some("0".into())).unwrap();
    assert_eq!(site.site(), Some("0"));
    assert_eq!(site.partition(1).unwrap_err().code(), LIBGAMMA_NO_SUCH_PARTITION);
    let partition = site.partition(0).unwrap();
    assert_eq!(partition.crtc(1).unwrap_err().code(), LIBGAMMA_NO_SUCH_CRTC);
}

#[test]
fn set_then_get_round_trips() {
    let _cfg = defaults();
    let site = Site::new(LIBGAMMA_METHOD_DUMMY, None).unwrap();
    let partition = site.partition(0).unwrap();
    let crtc = partition.crtc(0).unwrap();

    let mut ramps = GammaRamps16::new(256, 256, 256).unwrap();
    ramps.fill_with(|x| x.powf(1.0 / 2.2));
    crtc.set_gamma(&ramps).unwrap();

    let mut read = GammaRamps16::new(256, 256, 256).unwrap();
    crtc.get_gamma(&mut read).unwrap();
    assert_eq!(&*read.red(), &*ramps.red());
    assert_eq!(&*read.blue(), &*ramps.blue());

    let mut as_float = GammaRampsD::new(256, 256, 256).unwrap();
    crtc.get_gamma(&mut as_float).unwrap();
    assert_relative_eq!(as_float.green()[128], ramps.green()[128] as f64 / 65535.0, epsilon = 1e-12);
}

#[test]
fn restore_returns_to_identity() {
    let _cfg = defaults();
    let site = Site::new(LIBGAMMA_METHOD_DUMMY, None).unwrap();
    let partition = site.partition(0).unwrap();
    let crtc = partition.crtc(0).unwrap();

    let mut ramps = GammaRamps8::new(256, 256, 256).unwrap();
    crtc.set_gamma(&ramps).unwrap();
    site.restore().unwrap();

    crtc.get_gamma(&mut ramps).unwrap();
    let expected: Vec<u8> = (0..=255).collect();
    assert_eq!(&*ramps.red(), expected.as_slice());
}

#[test]
fn unsupported_restore_is_enotsup() {
    let _cfg = configure(DummyConfig {
        site_restore: false,
        crtc_restore: false,
        ..Default::default()
    });
    let site = Site::new(LIBGAMMA_METHOD_DUMMY, None).unwrap();
    assert_eq!(site.restore().unwrap_err().code(), libc::ENOTSUP);
    let partition = site.partition(0).unwrap();
    assert!(partition.restore().is_ok());
    let crtc = partition.crtc(0).unwrap();
    assert_eq!(crtc.restore().unwrap_err().code(), libc::ENOTSUP);
}

#[test]
fn wrong_ramp_size_is_rejected() {
    let _cfg = defaults();
    let site = Site::new(LIBGAMMA_METHOD_DUMMY, None).unwrap();
    let partition = site.partition(0).unwrap();
    let crtc = partition.crtc(0).unwrap();

    let mut ramps = GammaRamps16::new(4, 4, 4).unwrap();
    assert_eq!(crtc.get_gamma(&mut ramps).unwrap_err().code(), LIBGAMMA_WRONG_GAMMA_RAMP_SIZE);
    assert_eq!(crtc.set_gamma(&ramps).unwrap_err().code(), LIBGAMMA_WRONG_GAMMA_RAMP_SIZE);
}

#[test]
fn information_without_edid_fails_only_edid_fields() {
    let _cfg = defaults();
    let site = Site::new(LIBGAMMA_METHOD_DUMMY, None).unwrap();
    let partition = site.partition(0).unwrap();
    let crtc = partition.crtc(0).unwrap();

    let (info, failed) = crtc.information(CrtcInfo::all());
    assert!(failed);
    assert_eq!(info.failed_fields(), CrtcInfo::MACRO_EDID);
    assert_eq!(info.edid, None);
    assert_eq!(info.edid_error, LIBGAMMA_EDID_NOT_FOUND);

    assert_eq!(info.red_gamma_size, 256);
    assert_eq!(info.gamma_size_error, 0);
    assert_eq!(info.gamma_depth, 16);
    assert_eq!(info.gamma_support, Decision::Yes);
    assert!(info.active);
    assert_eq!(info.connector_name.as_deref(), Some("DUMMY-1"));
    assert_eq!(info.connector_type, ConnectorType::Virtual);
}

#[test]
fn information_reads_edid() {
    let edid = synthesize_edid(60, 34, Some(2.2));
    let mut config = DummyConfig::default();
    config.crtc.edid = Some(behex_edid_uppercase(&edid));
    let _cfg = configure(config);

    let site = Site::new(LIBGAMMA_METHOD_DUMMY, None).unwrap();
    let partition = site.partition(0).unwrap();
    let crtc = partition.crtc(0).unwrap();

    let (info, failed) = crtc.information(CrtcInfo::MACRO_EDID);
    assert!(!failed);
    assert_eq!(info.edid.as_deref(), Some(edid.as_slice()));
    assert_eq!((info.width_mm_edid, info.height_mm_edid), (600, 340));
    assert_relative_eq!(info.gamma_red, 2.2, epsilon = 1e-6);

    // Only what was asked for.
    let (info, failed) = crtc.information(CrtcInfo::WIDTH_MM_EDID);
    assert!(!failed);
    assert_eq!(info.edid, None);
    assert_eq!(info.width_mm_edid, 600);
    assert_eq!(info.height_mm_edid, 0);
}

#[test]
fn gamma_unsupported_fails_transfers() {
    let mut config = DummyConfig::default();
    config.crtc.gamma_support = Decision::No;
    let _cfg = configure(config);

    let site = Site::new(LIBGAMMA_METHOD_DUMMY, None).unwrap();
    let partition = site.partition(0).unwrap();
    let crtc = partition.crtc(0).unwrap();
    let mut ramps = GammaRampsF::new(256, 256, 256).unwrap();
    let err = crtc.get_gamma(&mut ramps).unwrap_err();
    assert_eq!(err.name(), Some("LIBGAMMA_GAMMA_RAMP_READ_FAILED"));
}
