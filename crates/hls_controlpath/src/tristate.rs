//! The tri-state-bus FSM control-path builder.
//!
//! Targets whose neutral flow is a don't-care may float when no step drives
//! them. They are driven by a concurrent process `TristateConc` in which
//! every flow is an independent bus driver:
//!
//! ```text
//! T <= (State = CStep0 or State = CStep3) ? A : "ZZZZ";
//! T <= (State = CStep1) ? B : "ZZZZ";
//! ```
//!
//! All other targets are multiplexed by a `CombFSM` process built exactly
//! like the plain FSM builder's, restricted to those targets. Don't-care
//! markers are read here, never replaced.

use crate::binder::ControlpathHost;
use crate::builder::{
    require_allocation, ControlpathBuilder, ControlpathBuilderFactory, StateAllocation,
    CONTROLPATH_SUMMARY, MISSING_ELSE_MULTI, MISSING_ELSE_SINGLE,
};
use crate::error::{ControlpathError, ControlpathResult};
use crate::fsm::{fsm_body, COMB_FSM};
use crate::matrix::FlowMatrix;
use crate::plan::{HlsPlan, InlineBranchControl};
use hls_common::{InternalError, Logic};
use hls_config::MissingElseFlow;
use hls_diagnostics::Diagnostic;
use hls_ir::{Document, Expr, Flow, ProcessBuilder, ProcessKind, SignalRef, Statement};
use std::collections::{HashMap, HashSet};

const TRISTATE_CONC: &str = "TristateConc";

/// Drivers and else-flows derived from one flow matrix.
struct TristatePlan {
    /// Target -> all-`Z` flow, for targets whose neutral flow is a don't-care.
    else_flows: HashMap<SignalRef, Flow>,
    /// Targets multiplexed by the FSM process, in neutral-flow order.
    non_tristate: Vec<SignalRef>,
    /// Distinct flows with the states enabling them, first-seen order.
    enabling: Vec<(Flow, Vec<usize>)>,
}

impl TristatePlan {
    fn new(host: &dyn ControlpathHost, matrix: &FlowMatrix, count: usize) -> ControlpathResult<Self> {
        let mut else_flows = HashMap::new();
        let mut non_tristate = Vec::new();
        for flow in matrix.neutral_flow().flows() {
            if FlowMatrix::is_dont_care_flow(flow) {
                let z = FlowMatrix::as_dont_care_flow(flow, Logic::Z, host.types())?;
                else_flows.insert(flow.target.clone(), z);
            } else {
                non_tristate.push(flow.target.clone());
            }
        }

        let mut enabling: Vec<(Flow, Vec<usize>)> = Vec::new();
        let mut index: HashMap<Flow, usize> = HashMap::new();
        for step in 0..count {
            for flow in matrix.flow(step).flows() {
                let slot = *index.entry(flow.clone()).or_insert_with(|| {
                    enabling.push((flow.clone(), Vec::new()));
                    enabling.len() - 1
                });
                enabling[slot].1.push(step);
            }
        }

        Ok(Self {
            else_flows,
            non_tristate,
            enabling,
        })
    }

    /// Flow indices grouped by target, groups in first-seen order.
    fn groups(&self) -> Vec<(SignalRef, Vec<usize>)> {
        let mut groups: Vec<(SignalRef, Vec<usize>)> = Vec::new();
        for (i, (flow, _)) in self.enabling.iter().enumerate() {
            match groups.iter_mut().find(|(t, _)| *t == flow.target) {
                Some((_, members)) => members.push(i),
                None => groups.push((flow.target.clone(), vec![i])),
            }
        }
        groups
    }
}

/// Tri-state bus drivers plus an FSM process for the remaining targets.
pub struct TristateBusFsmControlpathBuilder<'h> {
    host: &'h mut dyn ControlpathHost,
    states: Option<StateAllocation>,
}

impl<'h> TristateBusFsmControlpathBuilder<'h> {
    /// Creates a builder allocating through `host`.
    pub fn new(host: &'h mut dyn ControlpathHost) -> Self {
        Self { host, states: None }
    }

    fn skip_target(&self, target: &SignalRef, drivers: usize) -> ControlpathResult<()> {
        let name = self.host.names().signal_ref(target);
        if self.host.config().missing_else_flow == MissingElseFlow::Error {
            return Err(ControlpathError::Precondition(format!(
                "tri-state target `{name}` has no don't-care neutral flow"
            )));
        }
        let code = if drivers > 1 {
            MISSING_ELSE_MULTI
        } else {
            MISSING_ELSE_SINGLE
        };
        self.host.sink().emit(
            Diagnostic::warning(
                code,
                format!("tri-state target `{name}` has no else-flow and is not driven"),
            )
            .with_origin(format!("{}/{TRISTATE_CONC}", self.host.component_name()))
            .with_note(format!("{drivers} driver(s) were dropped"))
            .with_help("give the target a don't-care neutral flow"),
        );
        Ok(())
    }

    fn drivers_body(
        &self,
        plan: &TristatePlan,
        states: &StateAllocation,
    ) -> ControlpathResult<Statement> {
        let mut b = ProcessBuilder::new();
        for (target, members) in plan.groups() {
            if plan.non_tristate.contains(&target) {
                continue;
            }
            let Some(else_flow) = plan.else_flows.get(&target) else {
                self.skip_target(&target, members.len())?;
                continue;
            };
            if let [only] = members.as_slice() {
                b.store(target, plan.enabling[*only].0.source_expr())?;
                continue;
            }
            for m in members {
                let (flow, enabled_in) = &plan.enabling[m];
                let condition = Expr::any_of(
                    enabled_in
                        .iter()
                        .map(|&s| Expr::equals(states.current(), states.literal(s))),
                )
                .ok_or_else(|| InternalError::new("tri-state flow without enabling state"))?;
                b.store(
                    target.clone(),
                    Expr::select(condition, flow.source_expr(), else_flow.source_expr()),
                )?;
            }
        }
        Ok(b.finish()?)
    }
}

impl ControlpathBuilder for TristateBusFsmControlpathBuilder<'_> {
    fn personalize_plan(&mut self, plan: &mut HlsPlan) {
        plan.add_mapper(Box::new(InlineBranchControl));
    }

    fn prepare_allocation(&mut self, step_count: usize) -> ControlpathResult<()> {
        self.states = Some(StateAllocation::allocate(&mut *self.host, step_count)?);
        Ok(())
    }

    fn create_controlpath(&mut self, matrix: &mut FlowMatrix, name: &str) -> ControlpathResult<()> {
        let states = require_allocation(self.states.as_ref())?.clone();
        states.check_fits(matrix)?;

        let sensitivity = states.sensitivity(matrix);
        let plan = TristatePlan::new(&*self.host, matrix, states.count)?;
        let drivers = self.drivers_body(&plan, &states)?;
        let keep: HashSet<&SignalRef> = plan.non_tristate.iter().collect();
        let fsm = fsm_body(matrix, &states, |f| keep.contains(&f.target))?;

        self.host.create_process(
            ProcessKind::Concurrent,
            TRISTATE_CONC,
            drivers,
            sensitivity.clone(),
        );
        self.host
            .create_process(ProcessKind::Combinational, COMB_FSM, fsm, sensitivity);

        if self.host.config().mux_report {
            let content = matrix.mux_report(&self.host.names());
            self.host.add_document(Document {
                name: format!("{name}_TristateFSM_report.txt"),
                content,
            });
        }

        self.host.sink().emit(
            Diagnostic::note(
                CONTROLPATH_SUMMARY,
                format!(
                    "tri-state FSM control path `{name}`: {} states, {} bus targets, {} multiplexed targets",
                    states.count,
                    plan.else_flows.len(),
                    plan.non_tristate.len()
                ),
            )
            .with_origin(format!("{}/{TRISTATE_CONC}", self.host.component_name())),
        );
        Ok(())
    }
}

/// Creates [`TristateBusFsmControlpathBuilder`]s.
#[derive(Debug, Default, Clone, Copy)]
pub struct TristateBusFsmControlpathBuilderFactory;

impl ControlpathBuilderFactory for TristateBusFsmControlpathBuilderFactory {
    fn create<'h>(&self, host: &'h mut dyn ControlpathHost) -> Box<dyn ControlpathBuilder + 'h> {
        Box::new(TristateBusFsmControlpathBuilder::new(host))
    }
}
