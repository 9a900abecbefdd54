//! CRTC information command.
//!
//! Walks the selected partitions and CRTCs of a site and prints every
//! information field, or the error code that explains its absence.

use crate::InfoArgs;
use anyhow::{Context, Result};
use libgamma::*;
#[allow(unused_imports)]
use tracing::{debug, info, trace};

use super::{crtc_indices, method_name, open_site, partition_indices};

/// Runs the info command.
pub fn run(args: InfoArgs, verbose: u8) -> Result<()> {
    trace!(method = %args.target.method, "info::run");
    let site = open_site(&args.target)?;
    println!(
        "{} site {}: {} partition(s)",
        method_name(site.method()),
        site.site().unwrap_or("(default)"),
        site.partitions_available()
    );

    for p in partition_indices(&args.target, &site) {
        let partition = site
            .partition(p)
            .with_context(|| format!("Failed to open partition {}", p))?;
        println!("  partition {}: {} CRTC(s)", p, partition.crtcs_available());

        for c in crtc_indices(&args.target, &partition) {
            let crtc = partition
                .crtc(c)
                .with_context(|| format!("Failed to open CRTC {} of partition {}", c, p))?;
            let (info, failed) = crtc.information(CrtcInfo::all());
            debug!(partition = p, crtc = c, failed, "read CRTC information");
            println!("    CRTC {}:", c);
            print_information(&info, verbose);
            if args.ramps {
                print_ramps(&crtc, &info)?;
            }
        }
    }
    Ok(())
}

/// Formats a value, or the name of the error that replaced it.
fn field(status: i32, value: impl FnOnce() -> String) -> String {
    if status == 0 {
        value()
    } else {
        format!("<{}>", create_error(status))
    }
}

fn print_information(info: &CrtcInformation, verbose: u8) {
    let row = |label: &str, text: String| println!("      {:<18}{}", label, text);

    row(
        "connector:",
        field(info.connector_name_error, || {
            info.connector_name.clone().unwrap_or_default()
        }),
    );
    row(
        "connector type:",
        field(info.connector_type_error, || format!("{:?}", info.connector_type)),
    );
    row("active:", field(info.active_error, || info.active.to_string()));
    row(
        "gamma support:",
        field(info.gamma_support_error, || format!("{:?}", info.gamma_support)),
    );
    row(
        "ramp sizes:",
        field(info.gamma_size_error, || {
            format!(
                "{} / {} / {}",
                info.red_gamma_size, info.green_gamma_size, info.blue_gamma_size
            )
        }),
    );
    row("ramp depth:", field(info.gamma_depth_error, || info.gamma_depth.to_string()));
    row(
        "subpixels:",
        field(info.subpixel_order_error, || format!("{:?}", info.subpixel_order)),
    );
    row(
        "size:",
        format!(
            "{} x {} mm",
            field(info.width_mm_error, || info.width_mm.to_string()),
            field(info.height_mm_error, || info.height_mm.to_string())
        ),
    );
    row(
        "size (EDID):",
        format!(
            "{} x {} mm",
            field(info.width_mm_edid_error, || info.width_mm_edid.to_string()),
            field(info.height_mm_edid_error, || info.height_mm_edid.to_string())
        ),
    );
    row(
        "gamma (EDID):",
        field(info.gamma_error, || {
            format!("{:.2} / {:.2} / {:.2}", info.gamma_red, info.gamma_green, info.gamma_blue)
        }),
    );
    if verbose > 0 || info.edid_error != 0 {
        row(
            "EDID:",
            field(info.edid_error, || {
                info.edid.as_deref().map(behex_edid).unwrap_or_default()
            }),
        );
    }
}

fn print_ramps(crtc: &Crtc<'_>, info: &CrtcInformation) -> Result<()> {
    if info.gamma_size_error != 0 {
        println!("      ramps:            unavailable");
        return Ok(());
    }
    let mut ramps = GammaRampsD::new(info.red_gamma_size, info.green_gamma_size, info.blue_gamma_size)?;
    crtc.get_gamma(&mut ramps).context("Failed to read gamma ramps")?;
    for (label, ramp) in [("red:", ramps.red()), ("green:", ramps.green()), ("blue:", ramps.blue())] {
        let stops: Vec<String> = ramp.iter().map(|v| format!("{:.4}", v)).collect();
        println!("      {:<18}{}", label, stops.join(" "));
    }
    Ok(())
}
