//! Configuration types deserialized from `hls.toml`.

use hls_common::{OverflowMode, SizingMode};
use serde::Deserialize;

/// The top-level synthesis configuration.
///
/// Every section is optional; an empty file yields the built-in defaults.
#[derive(Debug, Default, Deserialize)]
pub struct HlsConfig {
    /// Global fixed-point arithmetic defaults.
    #[serde(default)]
    pub fixed_point: FixedPointConfig,
    /// Control-path builder selection and behavior.
    #[serde(default)]
    pub controlpath: ControlpathConfig,
    /// Control-word column compression settings.
    #[serde(default)]
    pub microcode: MicrocodeConfig,
}

/// Global defaults consulted by every numeric context that has no override.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct FixedPointConfig {
    /// Overflow handling when a result is trimmed to its width.
    #[serde(default)]
    pub overflow_mode: OverflowMode,
    /// Result-width policy for arithmetic operators.
    #[serde(default)]
    pub sizing_mode: SizingMode,
    /// Radix used when numeric values are rendered without an explicit one.
    #[serde(default = "default_radix")]
    pub default_radix: u32,
}

fn default_radix() -> u32 {
    2
}

impl Default for FixedPointConfig {
    fn default() -> Self {
        Self {
            overflow_mode: OverflowMode::default(),
            sizing_mode: SizingMode::default(),
            default_radix: default_radix(),
        }
    }
}

/// Which control-path builder drives synthesis and how it treats questionable input.
#[derive(Debug, Clone, Deserialize)]
pub struct ControlpathConfig {
    /// The builder to instantiate.
    #[serde(default)]
    pub builder: ControlpathKind,
    /// What to do when a tri-state target has no neutral don't-care entry.
    #[serde(default)]
    pub missing_else_flow: MissingElseFlow,
    /// Whether builders attach a multiplexer report document to the component.
    #[serde(default = "default_true")]
    pub mux_report: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ControlpathConfig {
    fn default() -> Self {
        Self {
            builder: ControlpathKind::default(),
            missing_else_flow: MissingElseFlow::default(),
            mux_report: true,
        }
    }
}

/// The available control-path builders.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ControlpathKind {
    /// One combinational FSM process with a neutral default (single shared bus).
    #[default]
    Fsm,
    /// Tri-state bus drivers plus an FSM process for the remaining targets.
    TristateFsm,
}

/// Policy for tri-state targets that cannot get an else-flow.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MissingElseFlow {
    /// Skip the target and emit a warning diagnostic.
    #[default]
    Warn,
    /// Fail synthesis with a precondition violation.
    Error,
}

/// Column compression settings for microcoded control words.
#[derive(Debug, Clone, Deserialize)]
pub struct MicrocodeConfig {
    /// Upper bound on the select width of a merged column (LUT inputs).
    #[serde(default = "default_max_select_width")]
    pub max_select_width: u32,
}

fn default_max_select_width() -> u32 {
    6
}

impl Default for MicrocodeConfig {
    fn default() -> Self {
        Self {
            max_select_width: default_max_select_width(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config: HlsConfig = toml::from_str("").unwrap();
        assert_eq!(config.fixed_point, FixedPointConfig::default());
        assert_eq!(config.controlpath.builder, ControlpathKind::Fsm);
        assert_eq!(config.controlpath.missing_else_flow, MissingElseFlow::Warn);
        assert!(config.controlpath.mux_report);
        assert_eq!(config.microcode.max_select_width, 6);
    }

    #[test]
    fn kebab_case_variants() {
        let config: HlsConfig = toml::from_str(
            r#"
[fixed_point]
overflow_mode = "saturate"
sizing_mode = "in-size-is-out-size"

[controlpath]
builder = "tristate-fsm"
missing_else_flow = "error"
"#,
        )
        .unwrap();
        assert_eq!(config.fixed_point.overflow_mode, OverflowMode::Saturate);
        assert_eq!(config.fixed_point.sizing_mode, SizingMode::InSizeIsOutSize);
        assert_eq!(config.controlpath.builder, ControlpathKind::TristateFsm);
        assert_eq!(config.controlpath.missing_else_flow, MissingElseFlow::Error);
    }

    #[test]
    fn unknown_variant_rejected() {
        let result: Result<HlsConfig, _> = toml::from_str(
            r#"
[fixed_point]
overflow_mode = "clip"
"#,
        );
        assert!(result.is_err());
    }
}
