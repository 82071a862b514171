//! Blecloner errors

/// The error type for cloning operations
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
    message: String,
}

impl Error {
    pub(crate) fn new(
        kind: ErrorKind,
        source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
        message: String,
    ) -> Self {
        Error { kind, source, message }
    }

    /// Returns the corresponding [ErrorKind] for this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the message for this error.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.message.is_empty(), &self.source) {
            (true, None) => write!(f, "{}", &self.kind),
            (false, None) => write!(f, "{}: {}", &self.kind, &self.message),
            (true, Some(err)) => write!(f, "{}: {}", &self.kind, err),
            (false, Some(err)) => write!(f, "{}: {} ({})", &self.kind, &self.message, err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|x| {
            let x: &(dyn std::error::Error + 'static) = &**x;
            x
        })
    }
}

/// A list of general categories of cloning error.
#[non_exhaustive]
#[derive(Debug, displaydoc::Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorKind {
    /// no BLE devices found
    NoDevicesFound,
    /// invalid selection
    InvalidSelection,
    /// device not found
    DeviceNotFound,
    /// connection failed
    ConnectionFailed,
    /// value out of range for a 16-bit unsigned integer
    OutOfRange,
    /// the Bluetooth adapter is not available
    AdapterUnavailable,
    /// timed out
    Timeout,
    /// the Bluetooth operation is unsupported
    NotSupported,
    /// I/O error
    Io,
    /// error
    Other,
}

impl ErrorKind {
    /// The process exit code reported for a run that ended with this kind of error.
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::NoDevicesFound => 1,
            ErrorKind::InvalidSelection => 2,
            ErrorKind::DeviceNotFound => 3,
            ErrorKind::ConnectionFailed | ErrorKind::Timeout => 4,
            _ => 5,
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error {
            kind,
            source: None,
            message: String::new(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::new(ErrorKind::Io, Some(Box::new(err)), String::new())
    }
}
