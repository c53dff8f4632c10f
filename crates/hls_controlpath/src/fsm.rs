//! The FSM control-path builder.
//!
//! Emits one combinational process `CombFSM`:
//!
//! ```text
//! <neutral flows>
//! case State is
//!   when CStep0 => -- comment
//!                  <flows of step 0>
//!   ...
//!   when others => <neutral flows>
//! end case;
//! ```
//!
//! Don't-care flows are resolved with [`FlowMatrix::replace_dont_cares`]
//! first, so every target is driven with a concrete value in every state.

use crate::binder::ControlpathHost;
use crate::builder::{
    require_allocation, ControlpathBuilder, ControlpathBuilderFactory, StateAllocation,
    CONTROLPATH_SUMMARY,
};
use crate::error::ControlpathResult;
use crate::matrix::FlowMatrix;
use crate::plan::{HlsPlan, InlineBranchControl};
use hls_diagnostics::Diagnostic;
use hls_ir::{Document, Flow, ProcessBuilder, ProcessKind, Statement};

pub(crate) const COMB_FSM: &str = "CombFSM";

/// Builds the state-dispatch body, emitting only flows accepted by `keep`.
pub(crate) fn fsm_body(
    matrix: &FlowMatrix,
    states: &StateAllocation,
    keep: impl Fn(&Flow) -> bool,
) -> ControlpathResult<Statement> {
    let mut b = ProcessBuilder::new();
    matrix.neutral_flow().implement_filtered(&mut b, &keep)?;
    b.switch(states.current())?;
    for step in 0..states.count {
        b.case(vec![states.literal(step)])?;
        let comment = matrix.comment(step).trim_end();
        if !comment.is_empty() {
            b.comment(comment)?;
        }
        matrix.flow(step).implement_filtered(&mut b, &keep)?;
        b.end_case()?;
    }
    b.default_case()?;
    matrix.neutral_flow().implement_filtered(&mut b, &keep)?;
    b.end_case()?;
    b.end_switch()?;
    Ok(b.finish()?)
}

/// One combinational process multiplexing every target by state.
pub struct FsmControlpathBuilder<'h> {
    host: &'h mut dyn ControlpathHost,
    states: Option<StateAllocation>,
}

impl<'h> FsmControlpathBuilder<'h> {
    /// Creates a builder allocating through `host`.
    pub fn new(host: &'h mut dyn ControlpathHost) -> Self {
        Self { host, states: None }
    }
}

impl ControlpathBuilder for FsmControlpathBuilder<'_> {
    fn personalize_plan(&mut self, plan: &mut HlsPlan) {
        plan.add_mapper(Box::new(InlineBranchControl));
    }

    fn prepare_allocation(&mut self, step_count: usize) -> ControlpathResult<()> {
        self.states = Some(StateAllocation::allocate(&mut *self.host, step_count)?);
        Ok(())
    }

    fn create_controlpath(&mut self, matrix: &mut FlowMatrix, name: &str) -> ControlpathResult<()> {
        let states = require_allocation(self.states.as_ref())?;
        states.check_fits(matrix)?;

        matrix.replace_dont_cares();
        let sensitivity = states.sensitivity(matrix);
        let body = fsm_body(matrix, states, |_| true)?;
        self.host
            .create_process(ProcessKind::Combinational, COMB_FSM, body, sensitivity);

        if self.host.config().mux_report {
            let content = matrix.mux_report(&self.host.names());
            self.host.add_document(Document {
                name: format!("{name}_FSM_report.txt"),
                content,
            });
        }

        let origin = format!("{}/{COMB_FSM}", self.host.component_name());
        self.host.sink().emit(
            Diagnostic::note(
                CONTROLPATH_SUMMARY,
                format!(
                    "FSM control path `{name}`: {} states, {} targets",
                    states.count,
                    matrix.flow_targets().len()
                ),
            )
            .with_origin(origin),
        );
        Ok(())
    }
}

/// Creates [`FsmControlpathBuilder`]s.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsmControlpathBuilderFactory;

impl ControlpathBuilderFactory for FsmControlpathBuilderFactory {
    fn create<'h>(&self, host: &'h mut dyn ControlpathHost) -> Box<dyn ControlpathBuilder + 'h> {
        Box::new(FsmControlpathBuilder::new(host))
    }
}
