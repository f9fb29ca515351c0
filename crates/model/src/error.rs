/// The kind of error that occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The request never reached the backend, or the connection dropped
    /// mid-flight.
    Transport,
    /// The backend rejected the credentials.
    Auth,
    /// The model backend is rate limited.
    RateLimitExceeded,
    /// The backend answered with something this client cannot decode.
    MalformedResponse,
    /// Any other errors.
    Other,
}
