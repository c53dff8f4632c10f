//! Per-process arithmetic configuration with a global fallback.
//!
//! Each logical process of the simulation model owns a [`FixContext`]. A
//! context holds optional overrides for the overflow mode, sizing mode and
//! default radix; any slot left unset reads the shared [`FixDefaults`]. The
//! defaults are immutable and shared through an `Arc`, so no process can
//! observe another process's overrides.

use hls_common::{OverflowMode, SizingMode};
use hls_config::FixedPointConfig;
use std::sync::Arc;

/// Global arithmetic defaults, usually built from the `[fixed_point]` config section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixDefaults {
    /// Overflow handling when no process override is set.
    pub overflow_mode: OverflowMode,
    /// Result-width policy when no process override is set.
    pub sizing_mode: SizingMode,
    /// Rendering radix when no process override is set.
    pub default_radix: u32,
}

impl Default for FixDefaults {
    fn default() -> Self {
        Self {
            overflow_mode: OverflowMode::Wrap,
            sizing_mode: SizingMode::VhdlCompliant,
            default_radix: 2,
        }
    }
}

impl FixDefaults {
    /// Creates a fresh unit context with no overrides on top of these defaults.
    pub fn context(self: &Arc<Self>) -> FixContext {
        FixContext::new(Arc::clone(self))
    }
}

impl From<&FixedPointConfig> for FixDefaults {
    fn from(config: &FixedPointConfig) -> Self {
        Self {
            overflow_mode: config.overflow_mode,
            sizing_mode: config.sizing_mode,
            default_radix: config.default_radix,
        }
    }
}

/// The arithmetic configuration seen by one unit of concurrency.
#[derive(Clone, Debug)]
pub struct FixContext {
    defaults: Arc<FixDefaults>,
    overflow_mode: Option<OverflowMode>,
    sizing_mode: Option<SizingMode>,
    default_radix: Option<u32>,
}

impl FixContext {
    /// Creates a context with no overrides on top of the given defaults.
    pub fn new(defaults: Arc<FixDefaults>) -> Self {
        Self {
            defaults,
            overflow_mode: None,
            sizing_mode: None,
            default_radix: None,
        }
    }

    /// The effective overflow mode.
    pub fn overflow_mode(&self) -> OverflowMode {
        self.overflow_mode.unwrap_or(self.defaults.overflow_mode)
    }

    /// The effective sizing mode.
    pub fn sizing_mode(&self) -> SizingMode {
        self.sizing_mode.unwrap_or(self.defaults.sizing_mode)
    }

    /// The effective default radix.
    pub fn default_radix(&self) -> u32 {
        self.default_radix.unwrap_or(self.defaults.default_radix)
    }

    /// The shared defaults this context falls back to.
    pub fn defaults(&self) -> &Arc<FixDefaults> {
        &self.defaults
    }

    /// Returns a copy of this context with the overflow mode overridden.
    pub fn with_overflow_mode(mut self, mode: OverflowMode) -> Self {
        self.overflow_mode = Some(mode);
        self
    }

    /// Returns a copy of this context with the sizing mode overridden.
    pub fn with_sizing_mode(mut self, mode: SizingMode) -> Self {
        self.sizing_mode = Some(mode);
        self
    }

    /// Returns a copy of this context with the default radix overridden.
    pub fn with_default_radix(mut self, radix: u32) -> Self {
        self.default_radix = Some(radix);
        self
    }

    /// Sets or clears the overflow-mode override of this unit.
    pub fn set_overflow_mode(&mut self, mode: Option<OverflowMode>) {
        self.overflow_mode = mode;
    }

    /// Sets or clears the sizing-mode override of this unit.
    pub fn set_sizing_mode(&mut self, mode: Option<SizingMode>) {
        self.sizing_mode = mode;
    }

    /// Sets or clears the default-radix override of this unit.
    pub fn set_default_radix(&mut self, radix: Option<u32>) {
        self.default_radix = radix;
    }

    /// Drops every override so all reads fall back to the defaults.
    pub fn clear_overrides(&mut self) {
        self.overflow_mode = None;
        self.sizing_mode = None;
        self.default_radix = None;
    }
}

impl Default for FixContext {
    fn default() -> Self {
        Self::new(Arc::new(FixDefaults::default()))
    }
}
