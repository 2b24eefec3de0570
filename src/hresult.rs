//! `HRESULT` encoding of enumerator outcomes
//!
//! Observer tools built against the COM enumerator contract expect the exact status codes
//! the runtime returns. This module provides the [`HResult`] newtype, the five codes an
//! enumerator can produce, and lossless conversion between them and
//! [`crate::Result<crate::Outcome>`].
//!
//! | Code            | Value        | Meaning                                   |
//! |-----------------|--------------|-------------------------------------------|
//! | `S_OK`          | `0x00000000` | Request fully satisfied                   |
//! | `S_FALSE`       | `0x00000001` | Fewer elements available than requested   |
//! | `E_INVALIDARG`  | `0x80070057` | Malformed call                            |
//! | `E_NOINTERFACE` | `0x80004002` | Unsupported interface identifier          |
//! | `E_OUTOFMEMORY` | `0x8007000E` | Snapshot storage could not be allocated   |

use std::fmt;

use crate::{Error, Outcome, Result};

/// A 32-bit COM status code.
///
/// Bit 31 is the severity bit: set for failures, clear for success codes.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct HResult(pub u32);

/// Success
pub const S_OK: HResult = HResult(0x0000_0000);
/// Success, but fewer elements than requested were fetched or skipped
pub const S_FALSE: HResult = HResult(0x0000_0001);
/// One or more arguments are invalid
pub const E_INVALIDARG: HResult = HResult(0x8007_0057);
/// The requested interface is not supported
pub const E_NOINTERFACE: HResult = HResult(0x8000_4002);
/// Ran out of memory
pub const E_OUTOFMEMORY: HResult = HResult(0x8007_000E);
/// Unspecified failure
pub const E_FAIL: HResult = HResult(0x8000_4005);

impl HResult {
    /// Returns the raw 32-bit value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Returns true if the severity bit is clear
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.0 & 0x8000_0000 == 0
    }

    /// Returns true if the severity bit is set
    #[must_use]
    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// Extracts the facility code (bits 16-26)
    #[must_use]
    pub fn facility(&self) -> u16 {
        ((self.0 >> 16) & 0x07FF) as u16
    }

    /// Extracts the status code (low 16 bits)
    #[must_use]
    pub fn code(&self) -> u16 {
        (self.0 & 0xFFFF) as u16
    }

    /// Decodes this status code back into an enumerator result
    ///
    /// Only the codes an enumerator produces decode losslessly. Any other code, including
    /// success codes other than `S_OK` and `S_FALSE`, is reported as [`Error::Producer`]
    /// carrying the raw value, since only population logic can return them.
    ///
    /// # Errors
    /// Returns the [`Error`] corresponding to a failure code, or [`Error::Producer`] for a
    /// code the enumerator never returns
    pub fn into_result(self) -> Result<Outcome> {
        match self {
            S_OK => Ok(Outcome::Complete),
            S_FALSE => Ok(Outcome::Partial),
            E_INVALIDARG => Err(invalid_argument!("reported as {}", self)),
            E_NOINTERFACE => Err(Error::NoInterface(uguid::Guid::ZERO)),
            E_OUTOFMEMORY => Err(Error::OutOfMemory(0)),
            other => Err(Error::Producer(format!("unexpected status {}", other))),
        }
    }
}

impl From<u32> for HResult {
    fn from(value: u32) -> Self {
        HResult(value)
    }
}

impl From<HResult> for u32 {
    fn from(hr: HResult) -> Self {
        hr.0
    }
}

impl From<i32> for HResult {
    fn from(value: i32) -> Self {
        HResult(value as u32)
    }
}

impl From<HResult> for i32 {
    fn from(hr: HResult) -> Self {
        hr.0 as i32
    }
}

impl From<Outcome> for HResult {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Complete => S_OK,
            Outcome::Partial => S_FALSE,
        }
    }
}

impl From<&Error> for HResult {
    fn from(error: &Error) -> Self {
        error.hresult()
    }
}

impl<T> From<&Result<T>> for HResult
where
    T: Copy + Into<HResult>,
{
    fn from(result: &Result<T>) -> Self {
        match result {
            Ok(value) => (*value).into(),
            Err(error) => error.hresult(),
        }
    }
}

impl From<()> for HResult {
    fn from((): ()) -> Self {
        S_OK
    }
}

impl fmt::Debug for HResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HResult(0x{:08x}, facility: 0x{:03x}, code: 0x{:04x})",
            self.0,
            self.facility(),
            self.code()
        )
    }
}

impl fmt::Display for HResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hresult_values() {
        assert_eq!(S_OK.value(), 0);
        assert_eq!(S_FALSE.value(), 1);
        assert_eq!(E_INVALIDARG.value(), 0x80070057);
        assert_eq!(E_NOINTERFACE.value(), 0x80004002);
        assert_eq!(E_OUTOFMEMORY.value(), 0x8007000E);
    }

    #[test]
    fn test_hresult_severity() {
        assert!(S_OK.is_success());
        assert!(S_FALSE.is_success());
        assert!(E_INVALIDARG.is_failure());
        assert!(E_NOINTERFACE.is_failure());
        assert!(E_OUTOFMEMORY.is_failure());
    }

    #[test]
    fn test_hresult_fields() {
        // FACILITY_WIN32 / ERROR_INVALID_PARAMETER
        assert_eq!(E_INVALIDARG.facility(), 7);
        assert_eq!(E_INVALIDARG.code(), 0x57);
        // FACILITY_NULL
        assert_eq!(E_NOINTERFACE.facility(), 0);
        assert_eq!(E_NOINTERFACE.code(), 0x4002);
    }

    #[test]
    fn test_hresult_signed_conversion() {
        let signed: i32 = E_INVALIDARG.into();
        assert_eq!(signed, -2147024809);
        assert_eq!(HResult::from(signed), E_INVALIDARG);
    }

    #[test]
    fn test_hresult_from_outcome() {
        assert_eq!(HResult::from(Outcome::Complete), S_OK);
        assert_eq!(HResult::from(Outcome::Partial), S_FALSE);

        let partial: Result<Outcome> = Ok(Outcome::Partial);
        assert_eq!(HResult::from(&partial), S_FALSE);

        let failed: Result<Outcome> = Err(Error::OutOfMemory(4));
        assert_eq!(HResult::from(&failed), E_OUTOFMEMORY);

        let unit: Result<()> = Ok(());
        assert_eq!(HResult::from(&unit), S_OK);
    }

    #[test]
    fn test_hresult_into_result() {
        assert_eq!(S_OK.into_result(), Ok(Outcome::Complete));
        assert_eq!(S_FALSE.into_result(), Ok(Outcome::Partial));
        assert!(matches!(
            E_INVALIDARG.into_result(),
            Err(Error::InvalidArgument { .. })
        ));
        assert!(matches!(
            E_NOINTERFACE.into_result(),
            Err(Error::NoInterface(_))
        ));
        assert!(matches!(
            E_OUTOFMEMORY.into_result(),
            Err(Error::OutOfMemory(_))
        ));
        assert!(matches!(E_FAIL.into_result(), Err(Error::Producer(_))));
    }

    #[test]
    fn test_hresult_unknown_success_code_rejected() {
        let result = HResult(0x0000_0002).into_result();
        assert_eq!(
            result,
            Err(Error::Producer("unexpected status 0x00000002".into()))
        );
    }

    #[test]
    fn test_hresult_display() {
        assert_eq!(format!("{}", E_NOINTERFACE), "0x80004002");
        assert_eq!(format!("{}", S_FALSE), "0x00000001");

        let debug_str = format!("{:?}", E_INVALIDARG);
        assert!(debug_str.contains("HResult(0x80070057"));
        assert!(debug_str.contains("facility: 0x007"));
    }
}
