//! Control channel server loop

use std::path::PathBuf;
use std::sync::Arc;

use tokio::io::AsyncReadExt;
use tokio::net::{UnixListener, UnixStream};

use tempo_clock::ClockRegistry;
use tempo_core::{TempoError, TempoResult};

use crate::{latest_command, COMMAND_SIZE, COMMAND_SLOTS};

/// Control channel configuration
#[derive(Clone, Debug)]
pub struct ControlChannelConfig {
    /// Well-known endpoint name the channel listens on.
    pub endpoint: PathBuf,
    /// Read buffer capacity in command slots.
    pub command_slots: usize,
}

impl Default for ControlChannelConfig {
    fn default() -> Self {
        ControlChannelConfig {
            endpoint: std::env::temp_dir().join("tempo-speed.sock"),
            command_slots: COMMAND_SLOTS,
        }
    }
}

/// Serves rate commands to the clock registry, one controller at a time.
///
/// A second connection attempt queues until the current controller
/// disconnects; there is no concurrent client handling and no stop command
/// in the protocol.
pub struct ControlChannel {
    registry: Arc<ClockRegistry>,
    config: ControlChannelConfig,
}

impl ControlChannel {
    pub fn new(registry: Arc<ClockRegistry>) -> Self {
        Self::with_config(registry, ControlChannelConfig::default())
    }

    pub fn with_config(registry: Arc<ClockRegistry>, config: ControlChannelConfig) -> Self {
        ControlChannel { registry, config }
    }

    /// Serve until the surrounding runtime shuts down.
    ///
    /// Binding the endpoint can fail and is fatal to the channel only; the
    /// clocks keep running at whatever speed was last applied. Everything
    /// past the bind is recovered locally: an invalid command is ignored and
    /// a disconnect returns the channel to the accept state.
    pub async fn run(self) -> TempoResult<()> {
        // Shutdown is abrupt by design, so a previous instance may have left
        // a stale socket file occupying the name.
        let _ = std::fs::remove_file(&self.config.endpoint);
        let listener = UnixListener::bind(&self.config.endpoint)
            .map_err(|e| TempoError::ChannelError(e.to_string()))?;
        tracing::info!(
            endpoint = %self.config.endpoint.display(),
            "control channel listening"
        );

        let mut buf = vec![0u8; self.config.command_slots * COMMAND_SIZE];
        loop {
            let stream = match listener.accept().await {
                Ok((stream, _)) => stream,
                Err(e) => {
                    tracing::warn!("accept failed: {}", e);
                    continue;
                }
            };
            tracing::info!("controller connected");
            self.serve_controller(stream, &mut buf).await;
            tracing::info!("controller disconnected");
        }
    }

    /// Read command batches from one controller until it goes away.
    async fn serve_controller(&self, mut stream: UnixStream, buf: &mut [u8]) {
        loop {
            let read = match stream.read(buf).await {
                Ok(0) => return,
                Ok(n) => n,
                Err(e) => {
                    tracing::warn!("read failed: {}", e);
                    return;
                }
            };
            let Some(command) = latest_command(&buf[..read]) else {
                continue;
            };
            let command = f64::from(command);
            match self.registry.apply_rate_change(command) {
                Ok(()) => tracing::debug!(speed = command, "rate change applied"),
                Err(e) => tracing::warn!(speed = command, "rate command rejected: {}", e),
            }
        }
    }
}
