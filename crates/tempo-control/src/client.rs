//! Controller-side client

use std::path::Path;

use tokio::io::AsyncWriteExt;
use tokio::net::UnixStream;

use tempo_core::{Speed, TempoError, TempoResult};

use crate::encode_command;

/// Writes absolute speed factors to a running engine.
///
/// The protocol is fire and forget: nothing ever comes back. Successive
/// factors overwrite each other on the engine side, so a burst of writes
/// collapses to its last value.
pub struct SpeedController {
    stream: UnixStream,
}

impl SpeedController {
    /// Connect to the engine's control endpoint.
    pub async fn connect(endpoint: impl AsRef<Path>) -> TempoResult<Self> {
        let stream = UnixStream::connect(endpoint.as_ref())
            .await
            .map_err(|e| TempoError::ChannelError(e.to_string()))?;
        Ok(SpeedController { stream })
    }

    /// Send a new absolute speed factor.
    pub async fn set_speed(&mut self, speed: Speed) -> TempoResult<()> {
        let bytes = encode_command(speed.factor() as f32);
        self.stream
            .write_all(&bytes)
            .await
            .map_err(|e| TempoError::ChannelError(e.to_string()))?;
        Ok(())
    }
}
