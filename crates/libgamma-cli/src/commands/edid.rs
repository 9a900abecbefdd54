//! EDID hex conversion commands

use crate::{BehexArgs, UnhexArgs};
use anyhow::{Context, Result};
use libgamma::{behex_edid_lowercase, behex_edid_uppercase, unhex_edid};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Prints an EDID as hexadecimal.
///
/// The input is read as a binary file when such a file exists, otherwise it
/// is taken as hexadecimal and re-encoded.
pub fn run_behex(args: BehexArgs) -> Result<()> {
    let path = Path::new(&args.input);
    let bytes = if path.is_file() {
        debug!(path = %path.display(), "reading EDID file");
        fs::read(path).with_context(|| format!("Failed to read: {}", path.display()))?
    } else {
        unhex_edid(args.input.trim()).context("Input is neither a file nor hexadecimal")?
    };

    let hex = if args.uppercase {
        behex_edid_uppercase(&bytes)
    } else {
        behex_edid_lowercase(&bytes)
    };
    println!("{}", hex);
    Ok(())
}

/// Decodes a hexadecimal EDID to a file or a hex dump.
pub fn run_unhex(args: UnhexArgs) -> Result<()> {
    let bytes = unhex_edid(args.hex.trim()).context("Invalid hexadecimal EDID")?;

    match args.output {
        Some(path) => {
            fs::write(&path, &bytes).with_context(|| format!("Failed to write: {}", path.display()))?;
            println!("Wrote {} bytes to {}", bytes.len(), path.display());
        }
        None => {
            for line in hex_dump(&bytes) {
                println!("{}", line);
            }
        }
    }
    Ok(())
}

/// Offset-prefixed rows of 16 bytes
fn hex_dump(bytes: &[u8]) -> Vec<String> {
    bytes
        .chunks(16)
        .enumerate()
        .map(|(row, chunk)| {
            let line: Vec<String> = chunk.iter().map(|b| format!("{:02x}", b)).collect();
            format!("{:04x}  {}", row * 16, line.join(" "))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_hex_dump_rows() {
        let bytes: Vec<u8> = (0..20).collect();
        let rows = hex_dump(&bytes);
        assert_eq!(rows.len(), 2);
        assert!(rows[0].starts_with("0000  00 01 02"));
        assert_eq!(rows[1], "0010  10 11 12 13");
    }

    #[test]
    fn test_unhex_to_file_then_behex() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("edid.bin");

        run_unhex(UnhexArgs {
            hex: "00ffFF00\n".into(),
            output: Some(path.clone()),
        })
        .unwrap();
        assert_eq!(fs::read(&path).unwrap(), vec![0x00, 0xff, 0xff, 0x00]);

        run_behex(BehexArgs {
            input: path.to_string_lossy().into_owned(),
            uppercase: true,
        })
        .unwrap();
    }

    #[test]
    fn test_invalid_hex_is_rejected() {
        let args = UnhexArgs {
            hex: "abc".into(),
            output: None,
        };
        assert!(run_unhex(args).is_err());

        let args = BehexArgs {
            input: "not hex and not a file".into(),
            uppercase: false,
        };
        assert!(run_behex(args).is_err());
    }
}
