//! Error lookup command

use crate::ErrorArgs;
use anyhow::{Result, bail};
use libgamma::{RequiredGroup, name_of_error, perror, perror_with_group, value_of_error};

pub fn run(args: ErrorArgs) -> Result<()> {
    let code = resolve_code(&args.code)?;

    match name_of_error(code) {
        Some(name) => println!("{} = {}", name, code),
        None if code > 0 => println!("errno {}", code),
        None => println!("{} (not a known library error)", code),
    }

    match args.gid {
        Some(gid) => {
            let group = match args.group {
                Some(name) => RequiredGroup::with_name(gid, name),
                None => RequiredGroup::new(gid),
            };
            perror_with_group("gamma", code, &group);
        }
        None => perror("gamma", code),
    }
    Ok(())
}

/// Number of an error given by value or by name
fn resolve_code(arg: &str) -> Result<i32> {
    if let Ok(code) = arg.parse::<i32>() {
        return Ok(code);
    }
    match value_of_error(Some(arg)) {
        0 => bail!("unknown error name '{}'", arg),
        code => Ok(code),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libgamma::LIBGAMMA_NO_SUCH_SITE;

    #[test]
    fn test_resolve_code() {
        assert_eq!(resolve_code("-3").unwrap(), -3);
        assert_eq!(resolve_code("13").unwrap(), 13);
        assert_eq!(resolve_code("LIBGAMMA_NO_SUCH_SITE").unwrap(), LIBGAMMA_NO_SUCH_SITE);
        assert!(resolve_code("LIBGAMMA_BOGUS").is_err());
    }

    #[test]
    fn test_run_with_group() {
        let args = ErrorArgs {
            code: "LIBGAMMA_DEVICE_REQUIRE_GROUP".into(),
            gid: Some(44),
            group: Some("video".into()),
        };
        assert!(run(args).is_ok());
    }

    #[test]
    fn test_run_unknown_name() {
        let args = ErrorArgs {
            code: "NOT_AN_ERROR".into(),
            gid: None,
            group: None,
        };
        assert!(run(args).is_err());
    }
}
