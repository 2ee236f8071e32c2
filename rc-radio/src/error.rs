use core::fmt;

/// Errors returned by the public `rc-radio` API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A caller-supplied parameter was out of range (rate, identity) or a
    /// required precondition (receiver callback) was not met.
    InvalidParam,

    /// The operation is not valid from the link's current state or mode.
    InvalidState,

    /// A hardware port (radio or timer) failed to initialize.
    PortFailure,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Error::InvalidParam => "invalid parameter",
            Error::InvalidState => "invalid state",
            Error::PortFailure => "hardware port failed to initialize",
        })
    }
}
