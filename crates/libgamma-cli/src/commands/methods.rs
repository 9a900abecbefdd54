//! Method listing command

use crate::MethodsArgs;
use anyhow::Result;
use libgamma::{CrtcInfo, list_methods, method_capabilities, method_default_site, method_default_site_variable};
#[allow(unused_imports)]
use tracing::{debug, info, trace};

use super::method_name;

pub fn run(args: MethodsArgs, verbose: u8) -> Result<()> {
    trace!(op = args.op, "methods::run");
    let methods = list_methods(args.op);
    info!(count = methods.len(), op = args.op, "listed methods");

    if methods.is_empty() && verbose > 0 {
        println!("No methods match operation {}", args.op);
    }

    for method in methods {
        let site = method_default_site(method);
        match method_default_site_variable(method) {
            Some(var) => println!(
                "{:>2}  {:<8} default site: {} (${})",
                method,
                method_name(method),
                site.as_deref().unwrap_or("-"),
                var
            ),
            None => println!("{:>2}  {}", method, method_name(method)),
        }
        if args.capabilities {
            print_capabilities(method);
        }
    }
    Ok(())
}

fn print_capabilities(method: i32) {
    let caps = method_capabilities(method);
    let flag = |b: bool| if b { "yes" } else { "no" };

    println!("    real / fake:          {} / {}", flag(caps.real), flag(caps.fake));
    println!("    default site known:   {}", flag(caps.default_site_known));
    println!(
        "    multiple s/p/c:       {} / {} / {}",
        flag(caps.multiple_sites),
        flag(caps.multiple_partitions),
        flag(caps.multiple_crtcs)
    );
    println!(
        "    restore s/p/c:        {} / {} / {}",
        flag(caps.site_restore),
        flag(caps.partition_restore),
        flag(caps.crtc_restore)
    );
    println!(
        "    gamma size/depth:     {} / {} (identical sizes: {})",
        if caps.fixed_gamma_size { "fixed" } else { "variable" },
        if caps.fixed_gamma_depth { "fixed" } else { "variable" },
        flag(caps.identical_gamma_sizes)
    );
    let fields: Vec<&str> = caps
        .crtc_information
        .iter_names()
        .filter(|(name, _)| !name.starts_with("MACRO_"))
        .map(|(name, _)| name)
        .collect();
    if caps.crtc_information == CrtcInfo::empty() {
        println!("    information:          none");
    } else {
        println!("    information:          {}", fields.join(", "));
    }
}
