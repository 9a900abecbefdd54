//! Loading a dummy config from disk and opening states with it.

use std::sync::{Mutex, PoisonError};

use libgamma_native::dummy::{self, ConfigError, DummyConfig};
use libgamma_native::*;
use tempfile::tempdir;

static CONFIG_LOCK: Mutex<()> = Mutex::new(());

const CONFIG: &str = "\
sites: 2
partitions: 1
crtcs: 2
real: true
fake: false
crtc_restore: false
crtc:
  red_size: 4
  green_size: 4
  blue_size: 4
  depth: 8
  connector_name: HDMI-A-1
  connector_type: hdmi_a
  width_mm: 520
  height_mm: 290
";

#[test]
fn test_config_from_file_drives_states() {
    let _guard = CONFIG_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    let dir = tempdir().unwrap();
    let path = dir.path().join("dummy.yaml");
    std::fs::write(&path, CONFIG).unwrap();

    let config = DummyConfig::from_file(&path).unwrap();
    assert_eq!(config.crtc.connector_type, ConnectorType::HdmiA);
    dummy::configure(config).unwrap();

    let caps = method_capabilities(LIBGAMMA_METHOD_DUMMY);
    assert!(caps.real && !caps.fake);
    assert!(caps.multiple_sites && caps.multiple_crtcs);
    assert!(!caps.crtc_restore);

    let site = SiteState::initialise(LIBGAMMA_METHOD_DUMMY, Some("1".into())).unwrap();
    assert_eq!(site.partitions_available(), 1);
    let partition = PartitionState::initialise(&site, 0).unwrap();
    assert_eq!(partition.crtcs_available(), 2);
    let crtc = CrtcState::initialise(&partition, 1).unwrap();
    assert_eq!(crtc.restore(), Err(libc::ENOTSUP));

    let (info, failed) = crtc.information(LIBGAMMA_CRTC_INFO_MACRO_VIEWPORT | LIBGAMMA_CRTC_INFO_MACRO_CONNECTOR);
    assert!(!failed);
    assert_eq!((info.width_mm, info.height_mm), (520, 290));
    assert_eq!(info.connector_name.as_deref(), Some("HDMI-A-1"));

    // Written values are quantised to 8 bits.
    let mut ramps = gamma_ramps_initialise::<u16>(4, 4, 4).unwrap();
    ramps.channels_mut().0.copy_from_slice(&[0, 1000, 40000, 65535]);
    crtc.set_gamma_ramps(&ramps).unwrap();
    crtc.get_gamma_ramps(&mut ramps).unwrap();
    assert_eq!(ramps.channels().0, &[0, 1028, 40092, 65535]);

    dummy::reset();
}

#[test]
fn test_open_sites_keep_their_config() {
    let _guard = CONFIG_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    dummy::configure(DummyConfig {
        crtcs: 3,
        ..Default::default()
    })
    .unwrap();
    let site = SiteState::initialise(LIBGAMMA_METHOD_DUMMY, None).unwrap();
    dummy::reset();

    let partition = PartitionState::initialise(&site, 0).unwrap();
    assert_eq!(partition.crtcs_available(), 3);
}

#[test]
fn test_invalid_config_is_not_installed() {
    let _guard = CONFIG_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    let mut config = DummyConfig::default();
    config.crtc.red_size = 1;
    assert!(matches!(dummy::configure(config), Err(ConfigError::Invalid(_))));
    assert_eq!(dummy::current(), DummyConfig::default());
}

#[test]
fn test_unavailable_method() {
    assert_eq!(
        SiteState::initialise(LIBGAMMA_METHOD_LINUX_DRM, None).unwrap_err(),
        LIBGAMMA_NO_SUCH_ADJUSTMENT_METHOD
    );
}
