use std::{borrow::Cow, fmt};

use thiserror::Error;

pub(crate) const MODULE: &str = "energy-extract";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RErrorKind {
    #[error("not found")]
    NotFound,
    #[error("permission denied")]
    PermissionDenied,
    #[error("io error")]
    IoErr,
    #[error("parse failure")]
    ParseFailure,
    #[error("malformed record")]
    MalformedRecord,
    #[error("invalid value")]
    InvalidValue,
}

pub const NOT_FOUND: RErrorKind = RErrorKind::NotFound;
pub const NOT_ALLOWED: RErrorKind = RErrorKind::PermissionDenied;
pub const IOERR: RErrorKind = RErrorKind::IoErr;
pub const PARSE_FAILURE: RErrorKind = RErrorKind::ParseFailure;
pub const MALFORMED_RECORD: RErrorKind = RErrorKind::MalformedRecord;
pub const INVALID_VALUE: RErrorKind = RErrorKind::InvalidValue;

/// Error returned by every extraction pass.
///
/// The `kind` lets callers tell a missing input apart from a bad one
/// without matching on message text.
#[derive(Debug)]
pub struct RError {
    module: &'static str,
    kind: RErrorKind,
    msg: Cow<'static, str>,
}

impl RError {
    pub fn new_simple(module: &'static str, kind: RErrorKind) -> Self {
        Self {
            module,
            kind,
            msg: Cow::Borrowed(""),
        }
    }

    pub fn new_simple_msg(module: &'static str, kind: RErrorKind, msg: &'static str) -> Self {
        Self {
            module,
            kind,
            msg: Cow::Borrowed(msg),
        }
    }

    pub fn new_custom_msg(module: &'static str, kind: RErrorKind, msg: String) -> Self {
        Self {
            module,
            kind,
            msg: Cow::Owned(msg),
        }
    }

    pub fn kind(&self) -> RErrorKind {
        self.kind
    }

    pub fn msg(&self) -> &str {
        &self.msg
    }

    #[inline]
    pub fn to_err<T>(self) -> Result<T, RError> {
        Err(self)
    }

    /// Consume an error that the caller decided to skip.
    #[inline]
    pub fn ignore(self) {}
}

impl fmt::Display for RError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.module, self.kind)?;
        if !self.msg.is_empty() {
            write!(f, ": {}", self.msg)?;
        }
        Ok(())
    }
}

impl std::error::Error for RError {}

#[allow(dead_code)]
#[inline]
pub(crate) fn new_simple(kind: RErrorKind) -> RError {
    RError::new_simple(MODULE, kind)
}

#[allow(dead_code)]
#[inline]
pub(crate) fn new_simple_msg(kind: RErrorKind, msg: &'static str) -> RError {
    RError::new_simple_msg(MODULE, kind, msg)
}

#[inline]
pub(crate) fn new_custom_msg(kind: RErrorKind, msg: String) -> RError {
    RError::new_custom_msg(MODULE, kind, msg)
}

macro_rules! throw_rerr {
    ($kind:expr) => {
        return crate::error::new_simple($kind).to_err()
    };
    ($kind:expr,$msg:expr) => {
        return crate::error::new_simple_msg($kind, $msg).to_err()
    };
    ($kind:expr,$($args:tt)*) => {
        return crate::error::new_custom_msg($kind, format!($($args)*)).to_err()
    };
}

macro_rules! new_rerr {
    ($kind:expr) => {
        crate::error::new_simple($kind)
    };
    ($kind:expr,$msg:expr) => {
        crate::error::new_simple_msg($kind, $msg)
    };
    ($kind:expr,$($args:tt)*) => {
        crate::error::new_custom_msg($kind, format!($($args)*))
    };
}

macro_rules! ignore_rerr {
    ($err:expr) => {{
        let err: crate::error::RError = $err;
        log::warn!("{}. Ignore it.", err);
        err.ignore()
    }};
}
