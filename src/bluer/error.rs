use crate::error::ErrorKind;

impl From<bluer::Error> for crate::Error {
    fn from(err: bluer::Error) -> Self {
        crate::Error::new(kind_from_bluer(&err), Some(Box::new(err)), String::new())
    }
}

fn kind_from_bluer(err: &bluer::Error) -> ErrorKind {
    match err.kind {
        bluer::ErrorKind::ConnectionAttemptFailed => ErrorKind::ConnectionFailed,
        bluer::ErrorKind::AuthenticationCanceled
        | bluer::ErrorKind::AuthenticationFailed
        | bluer::ErrorKind::AuthenticationRejected
        | bluer::ErrorKind::AuthenticationTimeout => ErrorKind::ConnectionFailed,
        bluer::ErrorKind::ServicesUnresolved => ErrorKind::ConnectionFailed,
        bluer::ErrorKind::NotReady => ErrorKind::AdapterUnavailable,
        bluer::ErrorKind::NotAvailable => ErrorKind::AdapterUnavailable,
        bluer::ErrorKind::NotSupported => ErrorKind::NotSupported,
        bluer::ErrorKind::NotFound => ErrorKind::DeviceNotFound,
        bluer::ErrorKind::DoesNotExist => ErrorKind::DeviceNotFound,
        _ => ErrorKind::Other,
    }
}
