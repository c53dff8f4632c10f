//! Conformance test helpers for fixed-point numerics and control-path synthesis.
//!
//! Provides a small datapath fixture and a driver that runs the configured
//! control-path builder end to end (config → plan → allocation → control
//! path), returning the resulting design and diagnostics for assertion in
//! integration tests.

#![warn(missing_docs)]

use hls_common::{Interner, LogicVec};
use hls_config::{load_config_from_str, ConfigError, HlsConfig};
use hls_controlpath::{factory_for, ComponentHost, ControlpathResult, FlowMatrix, HlsPlan};
use hls_diagnostics::{Diagnostic, DiagnosticRenderer, DiagnosticSink, Severity, TerminalRenderer};
use hls_fixed::{FixContext, FixDefaults};
use hls_ir::{
    Component, ComponentId, ConstValue, Design, PortUsage, Process, SignalRef, Type,
};
use std::sync::Arc;

/// A component under construction with named bit-vector signals.
pub struct Datapath {
    /// Interner shared by the design.
    pub interner: Interner,
    /// The design holding the component.
    pub design: Design,
    /// The component control paths are generated into.
    pub top: ComponentId,
}

impl Datapath {
    /// Creates an empty component called `name`.
    pub fn new(name: &str) -> Self {
        let interner = Interner::new();
        let mut design = Design::new();
        let top = design.add_component(interner.get_or_intern(name));
        Self {
            interner,
            design,
            top,
        }
    }

    /// Adds an unsigned bit-vector signal.
    pub fn signal(&mut self, name: &str, width: u32) -> SignalRef {
        let ty = self.design.types.intern(Type::BitVec {
            width,
            signed: false,
        });
        let name = self.interner.get_or_intern(name);
        SignalRef::Signal(self.design.component_mut(self.top).add_signal(
            name,
            ty,
            PortUsage::Default,
            None,
        ))
    }

    /// The component.
    pub fn component(&self) -> &Component {
        self.design.component(self.top)
    }

    /// The process generated by `function_name`, if any.
    pub fn process(&self, function_name: &str) -> Option<&Process> {
        self.component()
            .processes
            .values()
            .find(|p| self.interner.resolve(p.function_name) == function_name)
    }
}

/// Result of running a control-path builder.
pub struct ControlpathRun {
    /// All diagnostics emitted by the builder.
    pub diagnostics: Vec<Diagnostic>,
    /// The diagnostics rendered without color.
    pub rendered: String,
    /// Number of warning-severity diagnostics.
    pub warning_count: usize,
    /// Opcodes the builder's plan maps inline, in registration order.
    pub mapped_opcodes: Vec<&'static str>,
}

/// Parses an `hls.toml` body.
pub fn make_config(toml: &str) -> Result<HlsConfig, ConfigError> {
    load_config_from_str(toml)
}

/// A fresh arithmetic context backed by the config's `[fixed_point]` defaults.
pub fn unit_context(config: &HlsConfig) -> FixContext {
    Arc::new(FixDefaults::from(&config.fixed_point)).context()
}

/// A logic-vector constant from a `0`/`1`/`X`/`Z`/`-` string.
pub fn bits(s: &str) -> ConstValue {
    ConstValue::Logic(LogicVec::from_binary_str(s).expect("logic string should be 0/1/X/Z/-"))
}

/// Runs the builder selected by `config` over `matrix` with `states` states.
pub fn run_controlpath(
    datapath: &mut Datapath,
    matrix: &mut FlowMatrix,
    states: usize,
    config: &HlsConfig,
) -> ControlpathResult<ControlpathRun> {
    let sink = DiagnosticSink::new();
    let mut plan = HlsPlan::new();
    let name = datapath
        .interner
        .resolve(datapath.design.component(datapath.top).name)
        .to_string();
    {
        let mut host = ComponentHost::new(
            &mut datapath.design,
            datapath.top,
            &datapath.interner,
            &sink,
            &config.controlpath,
        );
        let mut builder = factory_for(config.controlpath.builder).create(&mut host);
        builder.personalize_plan(&mut plan);
        builder.prepare_allocation(states)?;
        builder.create_controlpath(matrix, &name)?;
    }

    let diagnostics = sink.take_all();
    let rendered = TerminalRenderer::new(false).render_all(&diagnostics);
    let warning_count = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Warning)
        .count();
    let mapped_opcodes = plan
        .mappers()
        .flat_map(|m| m.opcodes().iter().copied())
        .collect();
    Ok(ControlpathRun {
        diagnostics,
        rendered,
        warning_count,
        mapped_opcodes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hls_common::OverflowMode;
    use hls_config::ControlpathKind;
    use hls_ir::Flow;

    #[test]
    fn make_config_reads_sections() {
        let config = make_config(
            r#"
[fixed_point]
overflow_mode = "saturate"

[controlpath]
builder = "tristate-fsm"
"#,
        )
        .unwrap();
        assert_eq!(config.controlpath.builder, ControlpathKind::TristateFsm);
        assert_eq!(unit_context(&config).overflow_mode(), OverflowMode::Saturate);
    }

    #[test]
    fn run_default_fsm() {
        let mut dp = Datapath::new("top");
        let r = dp.signal("R", 1);
        let mut m = FlowMatrix::new();
        m.add(0, Flow::value(r, bits("1")));
        let config = make_config("").unwrap();
        let run = run_controlpath(&mut dp, &mut m, 1, &config).unwrap();
        assert!(dp.process("CombFSM").is_some());
        assert_eq!(run.warning_count, 0);
        assert_eq!(run.mapped_opcodes, ["goto", "brtrue", "brfalse"]);
        assert!(run.rendered.starts_with("note[N401]"));
    }
}
