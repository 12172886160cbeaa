use thiserror::Error;

#[derive(Error, Debug)]
pub enum AcgError {
    #[error("Invalid birth data: {0}")]
    InvalidBirthData(String),

    #[error("Invalid line parameter: {0}")]
    InvalidLineParameter(String),

    #[error("Unknown body name: {0}")]
    UnknownBody(String),

    #[error("Ephemeris source unavailable: {0}")]
    EphemerisUnavailable(String),

    #[error("Kepler equation did not converge: {0}")]
    KeplerNonConvergence(#[from] roots::SearchError),

    #[error("Calendar conversion error: {0}")]
    Hifitime(#[from] hifitime::HifitimeError),
}

impl PartialEq for AcgError {
    fn eq(&self, other: &Self) -> bool {
        use AcgError::*;
        match (self, other) {
            (InvalidBirthData(a), InvalidBirthData(b)) => a == b,
            (InvalidLineParameter(a), InvalidLineParameter(b)) => a == b,
            (UnknownBody(a), UnknownBody(b)) => a == b,
            (EphemerisUnavailable(a), EphemerisUnavailable(b)) => a == b,
            (KeplerNonConvergence(a), KeplerNonConvergence(b)) => a == b,

            // not comparable: same variant is enough
            (Hifitime(_), Hifitime(_)) => true,

            _ => false,
        }
    }
}
