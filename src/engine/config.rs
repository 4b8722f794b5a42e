use crate::foundation::core::{Fps, Theme, Variant, Viewport};
use crate::foundation::error::{BackdropError, BackdropResult};
use std::path::Path;

/// Everything needed to reproduce a backdrop render offline.
///
/// All fields are optional in JSON; missing ones take [`BackdropConfig::default`] values.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackdropConfig {
    pub variant: Variant,
    pub theme: Theme,
    /// Logical size and device pixel ratio of the target surface.
    pub viewport: Viewport,
    /// Refresh rate of the simulated display.
    pub fps: Fps,
    /// Seed of the random source used when variant state is built.
    pub seed: u64,
    /// Length of a rendered sequence, in frames.
    pub frames: u64,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            theme: Theme::default(),
            viewport: Viewport::default(),
            fps: Fps::default(),
            seed: 0,
            frames: 120,
        }
    }
}

impl BackdropConfig {
    /// Parse a JSON config; unknown fields are rejected.
    pub fn from_json_str(s: &str) -> BackdropResult<Self> {
        serde_json::from_str(s).map_err(|e| BackdropError::serde(e.to_string()))
    }

    pub fn from_path(path: &Path) -> BackdropResult<Self> {
        let s = std::fs::read_to_string(path).map_err(|e| {
            BackdropError::Other(anyhow::anyhow!("read config '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&s)
    }

    pub fn to_json_pretty(&self) -> BackdropResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| BackdropError::serde(e.to_string()))
    }

    /// Check the viewport and frame rate before any surface is allocated.
    pub fn validate(&self) -> BackdropResult<()> {
        let vp = self.viewport;
        if !(vp.width.is_finite() && vp.height.is_finite()) || vp.width < 0.0 || vp.height < 0.0
        {
            return Err(BackdropError::validation(
                "viewport width/height must be finite and >= 0",
            ));
        }
        if !vp.device_pixel_ratio.is_finite() || vp.device_pixel_ratio <= 0.0 {
            return Err(BackdropError::validation(
                "viewport device_pixel_ratio must be finite and > 0",
            ));
        }
        let (w, h) = vp.device_size();
        if w > u32::from(u16::MAX) || h > u32::from(u16::MAX) {
            return Err(BackdropError::validation(format!(
                "viewport device size {w}x{h} exceeds {}",
                u16::MAX
            )));
        }
        Fps::new(self.fps.num, self.fps.den)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/config.rs"]
mod tests;
