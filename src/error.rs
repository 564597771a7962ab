use thiserror::Error;

pub type BulletResult<T> = Result<T, BulletError>;

#[derive(Debug, Error)]
pub enum BulletError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: f64, height: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    #[error("invalid color: {0}")]
    InvalidColor(String),
}
