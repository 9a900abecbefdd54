//! CLI command implementations

pub mod edid;
pub mod error;
pub mod info;
pub mod methods;
pub mod restore;

use crate::Target;
use anyhow::{Context, Result, bail};
use libgamma::*;

const METHOD_NAMES: [(i32, &str); LIBGAMMA_METHOD_COUNT] = [
    (LIBGAMMA_METHOD_DUMMY, "dummy"),
    (LIBGAMMA_METHOD_X_RANDR, "randr"),
    (LIBGAMMA_METHOD_X_VIDMODE, "vidmode"),
    (LIBGAMMA_METHOD_LINUX_DRM, "drm"),
    (LIBGAMMA_METHOD_W32_GDI, "gdi"),
    (LIBGAMMA_METHOD_QUARTZ_CORE_GRAPHICS, "quartz"),
];

/// Short name of a method identifier
pub fn method_name(method: i32) -> &'static str {
    METHOD_NAMES
        .iter()
        .find(|(id, _)| *id == method)
        .map(|(_, name)| *name)
        .unwrap_or("unknown")
}

/// Parse a method name or number
pub fn parse_method(s: &str) -> Result<i32> {
    if let Ok(n) = s.parse::<i32>() {
        return Ok(n);
    }
    let lower = s.to_lowercase();
    match METHOD_NAMES.iter().find(|(_, name)| *name == lower) {
        Some((id, _)) => Ok(*id),
        None => bail!("unknown adjustment method '{}'", s),
    }
}

/// Open the site named by `target`
pub fn open_site(target: &Target) -> Result<Site> {
    let method = parse_method(&target.method)?;
    Site::new(method, target.site.clone())
        .with_context(|| format!("Failed to open {} site", method_name(method)))
}

/// Partition indices selected by `target`
pub fn partition_indices(target: &Target, site: &Site) -> Vec<usize> {
    match target.partition {
        Some(p) => vec![p],
        None => (0..site.partitions_available()).collect(),
    }
}

/// CRTC indices selected by `target`
pub fn crtc_indices(target: &Target, partition: &Partition<'_>) -> Vec<usize> {
    match target.crtc {
        Some(c) => vec![c],
        None => (0..partition.crtcs_available()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_method() {
        assert_eq!(parse_method("dummy").unwrap(), LIBGAMMA_METHOD_DUMMY);
        assert_eq!(parse_method("RandR").unwrap(), LIBGAMMA_METHOD_X_RANDR);
        assert_eq!(parse_method("3").unwrap(), LIBGAMMA_METHOD_LINUX_DRM);
        assert!(parse_method("wayland").is_err());
    }

    #[test]
    fn test_method_names() {
        for (id, name) in METHOD_NAMES {
            assert_eq!(parse_method(name).unwrap(), id);
            assert_eq!(method_name(id), name);
        }
        assert_eq!(method_name(99), "unknown");
    }
}
