use rollcall_core::AppError;
use rollcall_db::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RedemptionError {
    #[error("Attendance code has expired")]
    Expired,

    #[error("Attendance code is invalid")]
    Invalid,

    #[error("Attendance has already been recorded for this course")]
    AlreadyRedeemed,

    #[error("failed to record attendance: {0}")]
    Store(#[source] StoreError),
}

impl From<RedemptionError> for AppError {
    fn from(err: RedemptionError) -> Self {
        match err {
            RedemptionError::Expired | RedemptionError::Invalid => {
                AppError::unauthorized(err.to_string())
            }
            RedemptionError::AlreadyRedeemed => AppError::conflict(err),
            RedemptionError::Store(_) => AppError::database(err),
        }
    }
}
