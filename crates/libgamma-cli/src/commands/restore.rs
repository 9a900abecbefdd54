//! Restore command
//!
//! Restores the whole site, one partition or one CRTC, depending on how
//! narrowly the target is given.

use crate::RestoreArgs;
use anyhow::{Context, Result};
use libgamma::method_capabilities;
#[allow(unused_imports)]
use tracing::{debug, info, trace, warn};

use super::{method_name, open_site};

pub fn run(args: RestoreArgs, verbose: u8) -> Result<()> {
    let target = &args.target;
    let site = open_site(target)?;
    let caps = method_capabilities(site.method());
    let name = method_name(site.method());

    match (target.partition, target.crtc) {
        (None, _) => {
            if !caps.site_restore {
                warn!(method = name, "method does not advertise site restore");
            }
            site.restore().context("Failed to restore site")?;
            info!(method = name, "restored site");
        }
        (Some(p), None) => {
            if !caps.partition_restore {
                warn!(method = name, "method does not advertise partition restore");
            }
            let partition = site.partition(p).with_context(|| format!("Failed to open partition {}", p))?;
            partition
                .restore()
                .with_context(|| format!("Failed to restore partition {}", p))?;
            info!(method = name, partition = p, "restored partition");
        }
        (Some(p), Some(c)) => {
            if !caps.crtc_restore {
                warn!(method = name, "method does not advertise CRTC restore");
            }
            let partition = site.partition(p).with_context(|| format!("Failed to open partition {}", p))?;
            let crtc = partition
                .crtc(c)
                .with_context(|| format!("Failed to open CRTC {} of partition {}", c, p))?;
            crtc.restore()
                .with_context(|| format!("Failed to restore CRTC {} of partition {}", c, p))?;
            info!(method = name, partition = p, crtc = c, "restored CRTC");
        }
    }

    if verbose > 0 {
        println!("Restored.");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Target;
    use libgamma::GammaError;
    use libgamma_native::dummy::{self, DummyConfig};

    fn target(partition: Option<usize>, crtc: Option<usize>) -> RestoreArgs {
        RestoreArgs {
            target: Target {
                method: "dummy".into(),
                site: None,
                partition,
                crtc,
            },
        }
    }

    // Kept in one test: the dummy config is process-wide.
    #[test]
    fn test_restore_levels() {
        dummy::configure(DummyConfig {
            partitions: 2,
            crtcs: 2,
            crtc_restore: false,
            ..DummyConfig::default()
        })
        .unwrap();

        assert!(run(target(None, None), 0).is_ok());
        assert!(run(target(Some(1), None), 0).is_ok());
        assert!(run(target(Some(5), None), 0).is_err());

        let err = run(target(Some(0), Some(1)), 1).unwrap_err();
        let gamma = err.downcast_ref::<GammaError>().unwrap();
        assert_eq!(gamma.code(), libc::ENOTSUP);

        dummy::reset();
    }
}
