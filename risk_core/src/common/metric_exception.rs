use strum_macros::{Display, EnumString};
use thiserror::Error;

/// Error codes for the metrics engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[repr(i32)]
pub enum ErrCode {
    // General errors (0-99)
    #[strum(serialize = "COMMON_ERROR")]
    CommonError = 1,
    #[strum(serialize = "PARA_ERROR")]
    ParaError = 2,
    #[strum(serialize = "SRC_DATA_FORMAT_ERROR")]
    SrcDataFormatError = 3,

    // Numeric domain errors (100-199)
    #[strum(serialize = "_DOMAIN_ERR_BEGIN")]
    DomainErrBegin = 100,
    #[strum(serialize = "DEGENERATE_RANGE")]
    DegenerateRange = 101,
    #[strum(serialize = "NON_POSITIVE_VALUE")]
    NonPositiveValue = 102,
    #[strum(serialize = "_DOMAIN_ERR_END")]
    DomainErrEnd = 199,
}

impl ErrCode {
    pub fn is_domain_err(&self) -> bool {
        let code = *self as i32;
        code > Self::DomainErrBegin as i32 && code < Self::DomainErrEnd as i32
    }
}

#[derive(Debug, Error)]
#[error("{errcode}: {msg}")]
pub struct MetricException {
    pub errcode: ErrCode,
    pub msg: String,
}

impl MetricException {
    pub fn new(message: impl Into<String>, code: ErrCode) -> Self {
        Self {
            errcode: code,
            msg: message.into(),
        }
    }

    pub fn is_domain_err(&self) -> bool {
        self.errcode.is_domain_err()
    }
}
