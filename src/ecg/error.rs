use thiserror::Error;

#[derive(Debug, Error)]
pub enum StripError {
    #[error("sample rate of channel {label:?} must be a positive number, got {rate}")]
    InvalidSampleRate { label: String, rate: f64 },
    #[error("channel count mismatch: {channels} channels but {buffers} sample buffers")]
    ChannelMismatch { channels: usize, buffers: usize },
    #[error("zoom factor must be a number greater than 1, got {0:?}")]
    InvalidZoomFactor(String),
    #[error("failed to render png: {0}")]
    Plot(String),
    #[error("failed to read waveform: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode json: {0}")]
    Json(#[from] serde_json::Error),
}

impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for StripError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        StripError::Plot(format!("{value:?}"))
    }
}

impl From<image::ImageError> for StripError {
    fn from(value: image::ImageError) -> Self {
        StripError::Plot(value.to_string())
    }
}
