use thiserror::Error;

use crate::hresult::{HResult, E_FAIL, E_INVALIDARG, E_NOINTERFACE, E_OUTOFMEMORY};

macro_rules! invalid_argument {
    // Single string version
    ($msg:expr) => {
        crate::Error::InvalidArgument {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::InvalidArgument {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// The variants mirror the failure codes of the COM enumerator contract. Note that a
/// partially satisfied request is *not* an error: it is reported as
/// [`crate::Outcome::Partial`] on the success path.
///
/// # Error Categories
///
/// ## Protocol Errors
/// - [`Error::InvalidArgument`] - Missing output slot, ambiguous fetch count, short buffer
/// - [`Error::NoInterface`] - Identity query for an interface the enumerator does not implement
///
/// ## Resource Errors
/// - [`Error::OutOfMemory`] - The snapshot storage could not be allocated
///
/// ## Collaborator Errors
/// - [`Error::Producer`] - A producer failed to walk the runtime state
///
/// # Examples
///
/// ```rust
/// use profenum::{Error, ObjectEnum};
///
/// let objects = ObjectEnum::empty();
/// match objects.next_into(2, None, None) {
///     Err(Error::InvalidArgument { message, .. }) => println!("rejected: {}", message),
///     Err(e) => println!("other error: {}", e),
///     Ok(outcome) => println!("{}", outcome),
/// }
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The call was malformed.
    ///
    /// Raised for a missing required output slot, for a fetch of more than one element
    /// without a fetched-count slot, and for an output buffer that is missing or too
    /// small for the requested count. The instance is left untouched.
    ///
    /// # Fields
    ///
    /// * `message` - Description of the rejected argument
    /// * `file` - Source file where the rejection happened
    /// * `line` - Source line where the rejection happened
    #[error("Invalid argument - {file}:{line}: {message}")]
    InvalidArgument {
        /// The message to be printed for the InvalidArgument error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// The requested interface is not implemented by this enumerator.
    ///
    /// The associated GUID is the interface identifier that was asked for.
    #[error("Interface not supported - {0}")]
    NoInterface(uguid::Guid),

    /// Allocating the private snapshot failed.
    ///
    /// The associated value is the number of elements that could not be stored.
    #[error("Failed to allocate snapshot storage for {0} elements")]
    OutOfMemory(usize),

    /// A producer could not collect its element sequence.
    ///
    /// Producers report failures while walking runtime state through this variant;
    /// no enumerator is created from a failed collection.
    #[error("Producer failed - {0}")]
    Producer(String),
}

impl Error {
    /// Returns the `HRESULT` this error is reported as across the COM boundary
    #[must_use]
    pub fn hresult(&self) -> HResult {
        match self {
            Error::InvalidArgument { .. } => E_INVALIDARG,
            Error::NoInterface(_) => E_NOINTERFACE,
            Error::OutOfMemory(_) => E_OUTOFMEMORY,
            Error::Producer(_) => E_FAIL,
        }
    }
}
