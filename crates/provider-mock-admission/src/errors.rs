use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReviewError>;

#[derive(Error, Debug)]
pub enum ReviewError {
    #[error("cannot decode object: {0}")]
    Decode(serde_json::Error),

    #[error("cannot encode object: {0}")]
    Encode(serde_json::Error),
}

impl ReviewError {
    /// HTTP status code reported back to the API server.
    ///
    /// Decode failures are caused by the requester, encode failures are
    /// internal faults.
    pub fn code(&self) -> u16 {
        match self {
            ReviewError::Decode(_) => 400,
            ReviewError::Encode(_) => 500,
        }
    }
}

#[derive(Error, Debug)]
pub enum ResponseError {
    #[error("cannot serialize JSONPatch: {0}")]
    SerializePatch(#[source] serde_json::Error),
}
