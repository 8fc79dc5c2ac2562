use derive_more::Display;
use keypage_config::ConfigError;
use keypage_core::{
    Error as CoreError, ErrorClass,
    cursor::CursorEncodeError,
    plan::PagePlanError,
    sort::KeysetProjectionError,
};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable class + origin taxonomy.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
        }
    }

    /// True when the request itself was at fault (4xx family).
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.class.is_client_error()
    }
}

impl From<CoreError> for Error {
    fn from(err: CoreError) -> Self {
        let origin = match &err {
            CoreError::Decode(_) => ErrorOrigin::Cursor,
            CoreError::Plan(_) => ErrorOrigin::Plan,
            CoreError::Encode(_) | CoreError::Projection(_) => ErrorOrigin::Link,
            CoreError::Sort(_) => ErrorOrigin::Sort,
        };

        Self::new(err.class(), origin, err.to_string())
    }
}

impl From<PagePlanError> for Error {
    fn from(err: PagePlanError) -> Self {
        CoreError::from(err).into()
    }
}

impl From<CursorEncodeError> for Error {
    fn from(err: CursorEncodeError) -> Self {
        CoreError::from(err).into()
    }
}

impl From<KeysetProjectionError> for Error {
    fn from(err: KeysetProjectionError) -> Self {
        CoreError::from(err).into()
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::new(ErrorClass::Internal, ErrorOrigin::Config, err.to_string())
    }
}

///
/// ErrorOrigin
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
pub enum ErrorOrigin {
    Config,
    Cursor,
    Link,
    Plan,
    Sort,
}

///
/// TESTS
///
