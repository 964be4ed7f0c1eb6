//! Null module for testing

use std::collections::HashMap;

use super::{CoreModule, BUTTON_COUNT, FRAME_BYTES, NES_HEIGHT, NES_WIDTH};
use crate::error::ModuleError;
use crate::hash::ContentHash;

/// Null emulator module that provides a visible framebuffer during
/// development.
///
/// When no real core is linked in, this module renders a recognizable
/// gradient with an animated stripe so the output surface still shows
/// something and the developer can tell the driver is ticking. It enforces
/// the same register/activate/start preconditions a real core would.
#[derive(Debug)]
pub struct NullModule {
    preimages: HashMap<ContentHash, Vec<u8>>,
    cartridge: Option<(ContentHash, ContentHash)>,
    running: bool,
    frame_count: u64,
    buttons_held: usize,
}

impl NullModule {
    pub fn new() -> Self {
        Self {
            preimages: HashMap::new(),
            cartridge: None,
            running: false,
            frame_count: 0,
            buttons_held: 0,
        }
    }

    /// Frames rendered since `start`.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for NullModule {
    fn default() -> Self {
        Self::new()
    }
}

impl CoreModule for NullModule {
    fn register(&mut self, hash: &ContentHash, bytes: &[u8]) -> Result<(), ModuleError> {
        self.preimages.insert(hash.clone(), bytes.to_vec());
        Ok(())
    }

    fn activate(
        &mut self,
        static_hash: &ContentHash,
        dyn_hash: &ContentHash,
    ) -> Result<(), ModuleError> {
        if !self.preimages.contains_key(static_hash) {
            return Err(ModuleError::NotRegistered(static_hash.clone()));
        }
        if !self.preimages.contains_key(dyn_hash) {
            return Err(ModuleError::NotRegistered(dyn_hash.clone()));
        }
        self.cartridge = Some((static_hash.clone(), dyn_hash.clone()));
        Ok(())
    }

    fn start(&mut self) -> Result<(), ModuleError> {
        if self.cartridge.is_none() {
            return Err(ModuleError::NoCartridge);
        }
        self.running = true;
        Ok(())
    }

    fn step(&mut self, input: &[bool; BUTTON_COUNT], frame: &mut [u8]) -> Result<(), ModuleError> {
        if !self.running {
            return Err(ModuleError::NotStarted);
        }
        if frame.len() != FRAME_BYTES {
            return Err(ModuleError::BadFrameBuffer {
                actual: frame.len(),
                expected: FRAME_BYTES,
            });
        }

        self.buttons_held = input.iter().filter(|held| **held).count();

        // Gradient base with a moving stripe as the activity indicator.
        let stripe = (self.frame_count as usize) % NES_HEIGHT;
        for y in 0..NES_HEIGHT {
            for x in 0..NES_WIDTH {
                let offset = (y * NES_WIDTH + x) * 4;
                if y == stripe {
                    frame[offset] = 0xff;
                    frame[offset + 1] = 0xff;
                    frame[offset + 2] = 0xff;
                } else {
                    frame[offset] = 0;
                    frame[offset + 1] = (x % 256) as u8;
                    frame[offset + 2] = (y % 256) as u8;
                }
                frame[offset + 3] = 0xff;
            }
        }

        self.frame_count += 1;
        Ok(())
    }

    fn query_activity(&self) -> Result<Vec<u8>, ModuleError> {
        let cartridge = self
            .cartridge
            .as_ref()
            .map(|(s, d)| serde_json::json!({ "static": s.to_hex(), "dyn": d.to_hex() }));
        let report = serde_json::json!({
            "frame": self.frame_count,
            "running": self.running,
            "cartridge": cartridge,
            "buttons_held": self.buttons_held,
        });
        Ok(report.to_string().into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registered_module() -> (NullModule, ContentHash, ContentHash) {
        let mut module = NullModule::new();
        let static_hash = ContentHash::digest(b"static");
        let dyn_hash = ContentHash::digest(b"dyn");
        module.register(&static_hash, b"static").unwrap();
        module.register(&dyn_hash, b"dyn").unwrap();
        (module, static_hash, dyn_hash)
    }

    #[test]
    fn test_activate_requires_registration() {
        let mut module = NullModule::new();
        let missing = ContentHash::digest(b"missing");
        let other = ContentHash::digest(b"other");
        module.register(&other, b"other").unwrap();

        let err = module.activate(&missing, &other).unwrap_err();
        assert!(matches!(err, ModuleError::NotRegistered(_)));
        let err = module.activate(&other, &missing).unwrap_err();
        assert!(matches!(err, ModuleError::NotRegistered(_)));
    }

    #[test]
    fn test_start_requires_cartridge() {
        let mut module = NullModule::new();
        assert!(matches!(module.start(), Err(ModuleError::NoCartridge)));
    }

    #[test]
    fn test_step_requires_start() {
        let (mut module, s, d) = registered_module();
        module.activate(&s, &d).unwrap();

        let mut frame = vec![0u8; FRAME_BYTES];
        assert!(matches!(
            module.step(&[false; 8], &mut frame),
            Err(ModuleError::NotStarted)
        ));
    }

    #[test]
    fn test_step_rejects_bad_buffer() {
        let (mut module, s, d) = registered_module();
        module.activate(&s, &d).unwrap();
        module.start().unwrap();

        let mut short = vec![0u8; 16];
        let err = module.step(&[false; 8], &mut short).unwrap_err();
        assert!(matches!(err, ModuleError::BadFrameBuffer { actual: 16, .. }));
    }

    #[test]
    fn test_step_renders_opaque_frame() {
        let (mut module, s, d) = registered_module();
        module.activate(&s, &d).unwrap();
        module.start().unwrap();

        let mut frame = vec![0u8; FRAME_BYTES];
        module.step(&[false; 8], &mut frame).unwrap();
        assert_eq!(module.frame_count(), 1);
        // Alpha channel is fully opaque everywhere.
        assert!(frame.chunks_exact(4).all(|px| px[3] == 0xff));
    }

    #[test]
    fn test_activity_report_is_json() {
        let (mut module, s, d) = registered_module();
        module.activate(&s, &d).unwrap();
        module.start().unwrap();
        let mut frame = vec![0u8; FRAME_BYTES];
        module.step(&[true, false, false, false, false, false, false, false], &mut frame)
            .unwrap();

        let raw = module.query_activity().unwrap();
        let report: serde_json::Value = serde_json::from_slice(&raw).unwrap();
        assert_eq!(report["frame"], 1);
        assert_eq!(report["running"], true);
        assert_eq!(report["buttons_held"], 1);
        assert_eq!(report["cartridge"]["static"], s.to_hex());
    }
}
