//! Error translation.
//!
//! Every failing native call produces an integer code. This module turns
//! that code into a [`GammaError`] and provides the name lookups and
//! `perror(3)`-style printing that go with it.
//!
//! # Code ranges
//!
//! - `< 0` - library errors, see [`name_of_error`]
//! - `0` - success, never wrapped in an error
//! - `> 0` - OS `errno` values

use std::io::{self, Write};
use thiserror::Error;

use libgamma_native::error as native;

pub use libgamma_native::error::RequiredGroup;

/// Result type for gamma operations.
pub type Result<T> = std::result::Result<T, GammaError>;

/// A failed native call, identified by a single error code.
///
/// Negative codes are library errors, positive codes are OS errors.
/// The sentinel [`LIBGAMMA_ERRNO_SET`](libgamma_native::LIBGAMMA_ERRNO_SET)
/// never appears here: [`create_error`] replaces it with the OS error it
/// stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("{}", error_message(.code))]
pub struct GammaError {
    code: i32,
}

impl GammaError {
    /// The error code.
    pub fn code(&self) -> i32 {
        self.code
    }

    /// Symbolic name of the code, for library errors.
    pub fn name(&self) -> Option<&'static str> {
        name_of_error(self.code)
    }

    /// Returns true if the code is an OS `errno` value.
    pub fn is_os_error(&self) -> bool {
        self.code > 0
    }

    /// Prints the error to stderr, prefixed with `name` unless it is empty.
    pub fn perror(&self, name: &str) {
        perror(name, self.code);
    }
}

impl From<GammaError> for io::Error {
    fn from(err: GammaError) -> Self {
        if err.is_os_error() {
            io::Error::from_raw_os_error(err.code)
        } else {
            io::Error::other(err)
        }
    }
}

fn error_message(code: &i32) -> String {
    let code = *code;
    if code >= 0 {
        return native::strerror(code);
    }
    match native::name_of_error(code) {
        Some(name) => name.to_string(),
        None => format!("unknown libgamma error {code}"),
    }
}

/// Builds the error for a failed native call.
///
/// [`LIBGAMMA_ERRNO_SET`](libgamma_native::LIBGAMMA_ERRNO_SET) is replaced
/// by the current OS error number.
pub fn create_error(code: i32) -> GammaError {
    let code = if code == native::LIBGAMMA_ERRNO_SET {
        native::last_os_error()
    } else {
        code
    };
    GammaError { code }
}

/// Returns the symbolic name of a library error code.
///
/// `None` for success, OS codes and codes outside the table.
pub fn name_of_error(code: i32) -> Option<&'static str> {
    native::name_of_error(code)
}

/// Returns the library error code named `name`, or `0` if there is none.
pub fn value_of_error(name: Option<&str>) -> i32 {
    native::value_of_error(name)
}

/// Prints a description of `code` to stderr, following `perror(3)`.
///
/// [`LIBGAMMA_DEVICE_REQUIRE_GROUP`](libgamma_native::LIBGAMMA_DEVICE_REQUIRE_GROUP)
/// is printed without a group. Use [`perror_with_group`] to include one.
pub fn perror(name: &str, code: i32) {
    native::perror(name, code, None);
}

/// Like [`perror`], but reports `group` for
/// [`LIBGAMMA_DEVICE_REQUIRE_GROUP`](libgamma_native::LIBGAMMA_DEVICE_REQUIRE_GROUP).
///
/// The group name is resolved from the group database now if `group` does
/// not carry one. The numeric ID is printed when that fails.
pub fn perror_with_group(name: &str, code: i32, group: &RequiredGroup) {
    native::perror(name, code, Some(group));
}

/// Writes the text [`perror_with_group`] would print to `out`.
pub fn write_error<W: Write>(
    out: &mut W,
    name: &str,
    code: i32,
    group: Option<&RequiredGroup>,
) -> io::Result<()> {
    native::write_error(out, name, code, group)
}

#[cfg(test)]
mod tests {
    use super::*;
    use libgamma_native::{
        LIBGAMMA_DEVICE_REQUIRE_GROUP, LIBGAMMA_ERRNO_SET, LIBGAMMA_NO_SUCH_SITE, strerror,
    };

    #[test]
    fn test_library_error_message() {
        let err = create_error(LIBGAMMA_NO_SUCH_SITE);
        assert_eq!(err.code(), LIBGAMMA_NO_SUCH_SITE);
        assert_eq!(err.to_string(), "LIBGAMMA_NO_SUCH_SITE");
        assert_eq!(err.name(), Some("LIBGAMMA_NO_SUCH_SITE"));
        assert!(!err.is_os_error());
    }

    #[test]
    fn test_os_error_message() {
        let err = create_error(libc::ENOMEM);
        assert!(err.is_os_error());
        assert_eq!(err.name(), None);
        assert_eq!(err.to_string(), strerror(libc::ENOMEM));
        assert_eq!(io::Error::from(err).raw_os_error(), Some(libc::ENOMEM));
    }

    #[test]
    fn test_unknown_negative_code() {
        let err = create_error(-500);
        assert_eq!(err.code(), -500);
        assert_eq!(err.to_string(), "unknown libgamma error -500");
    }

    #[test]
    fn test_errno_set_is_replaced() {
        let err = create_error(LIBGAMMA_ERRNO_SET);
        assert_ne!(err.code(), LIBGAMMA_ERRNO_SET);
        assert!(err.code() >= 0);
    }

    #[test]
    fn test_write_error_with_numeric_group() {
        // A gid that no group database should contain.
        let group = RequiredGroup::new(4_000_000_000);
        let mut out = Vec::new();
        write_error(&mut out, "", LIBGAMMA_DEVICE_REQUIRE_GROUP, Some(&group)).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "LIBGAMMA_DEVICE_REQUIRE_GROUP: 4000000000\n"
        );
    }
}
