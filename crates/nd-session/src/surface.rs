//! Output surface abstraction
//!
//! The driver hands each finished frame to a surface. What the surface
//! does with it (canvas blit, window texture, file) is outside this
//! layer's scope.

use tracing::trace;

use nd_core::error::DeckError;

/// Sink for rendered RGBA frames.
pub trait FrameSurface: Send {
    /// Accept one frame of exactly `FRAME_BYTES` bytes.
    fn present(&mut self, frame: &[u8]) -> Result<(), DeckError>;
}

/// Surface that discards frames, counting them.
#[derive(Debug, Default)]
pub struct NullSurface {
    presented: u64,
}

impl NullSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn presented(&self) -> u64 {
        self.presented
    }
}

impl FrameSurface for NullSurface {
    fn present(&mut self, frame: &[u8]) -> Result<(), DeckError> {
        self.presented += 1;
        trace!(len = frame.len(), total = self.presented, "frame discarded");
        Ok(())
    }
}

/// Surface that keeps the most recent frame, for tests and probes.
#[derive(Debug, Default)]
pub struct CaptureSurface {
    pub last_frame: Option<Vec<u8>>,
    pub presented: u64,
}

impl CaptureSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameSurface for CaptureSurface {
    fn present(&mut self, frame: &[u8]) -> Result<(), DeckError> {
        self.last_frame = Some(frame.to_vec());
        self.presented += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_surface() {
        let mut surface = CaptureSurface::new();
        surface.present(&[1, 2, 3]).unwrap();
        surface.present(&[4, 5, 6]).unwrap();
        assert_eq!(surface.presented, 2);
        assert_eq!(surface.last_frame.as_deref(), Some(&[4u8, 5, 6][..]));
    }
}
