//! The flow matrix: control step → parallel register transfers.
//!
//! A scheduler fills one [`ParFlow`] per control step plus a *neutral* flow
//! that describes what every target is driven with when its step does not
//! mention it. Don't-care flows (an all-`X` logic vector) mark targets whose
//! value is irrelevant in a step; builders either resolve them to a concrete
//! choice ([`FlowMatrix::replace_dont_cares`]) or read them as "may float"
//! (the tri-state builder).

use crate::error::{ControlpathError, ControlpathResult};
use hls_common::{Logic, LogicVec};
use hls_ir::{ConstValue, Flow, FlowSource, Names, ParFlow, SignalRef, TypeDb};
use std::collections::HashMap;
use std::fmt::Write;

static EMPTY: ParFlow = ParFlow::new();

#[derive(Debug, Clone, Default)]
struct StepFlow {
    flow: ParFlow,
    comment: String,
}

/// Per-step register transfers plus a neutral default.
#[derive(Debug, Clone, Default)]
pub struct FlowMatrix {
    steps: Vec<StepFlow>,
    neutral: ParFlow,
}

impl FlowMatrix {
    /// Creates an empty matrix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` for a value flow carrying an all-`X` vector.
    pub fn is_dont_care_flow(flow: &Flow) -> bool {
        matches!(&flow.source, FlowSource::Value(v) if v.is_dont_care())
    }

    /// A don't-care flow of `width` bits into `target`.
    pub fn create_dont_care_flow(target: SignalRef, width: u32) -> Flow {
        Flow::value(target, ConstValue::Logic(LogicVec::dont_care(width)))
    }

    /// Rewrites a value flow into one driving `symbol` on every bit.
    ///
    /// The width is the width of the original value. Signal flows and
    /// unsized values are rejected.
    pub fn as_dont_care_flow(
        flow: &Flow,
        symbol: Logic,
        types: &TypeDb,
    ) -> ControlpathResult<Flow> {
        let FlowSource::Value(value) = &flow.source else {
            return Err(ControlpathError::Precondition(
                "only value flows can be turned into don't-care flows".to_string(),
            ));
        };
        let width = value.bit_width(types).ok_or_else(|| {
            ControlpathError::Precondition(format!("value {value:?} has no bit width"))
        })?;
        Ok(Flow::value(
            flow.target.clone(),
            ConstValue::Logic(LogicVec::filled(width, symbol)),
        ))
    }

    fn reserve(&mut self, step: usize) -> &mut StepFlow {
        if step >= self.steps.len() {
            self.steps.resize_with(step + 1, StepFlow::default);
        }
        &mut self.steps[step]
    }

    /// Number of control steps.
    pub fn num_csteps(&self) -> usize {
        self.steps.len()
    }

    /// Adds a flow to `step`, replacing any earlier flow to the same target.
    pub fn add(&mut self, step: usize, flow: Flow) {
        self.reserve(step).flow.add(flow);
    }

    /// Adds every flow of `pflow` to `step`.
    pub fn add_par(&mut self, step: usize, pflow: &ParFlow) {
        self.reserve(step).flow.integrate(pflow);
    }

    /// Removes the flow to `target` from `step`.
    pub fn remove(&mut self, step: usize, target: &SignalRef) -> Option<Flow> {
        self.steps.get_mut(step)?.flow.remove(target)
    }

    /// Adds a neutral flow.
    pub fn add_neutral(&mut self, flow: Flow) {
        self.neutral.add(flow);
    }

    /// Adds every flow of `pflow` to the neutral flow.
    pub fn add_neutral_par(&mut self, pflow: &ParFlow) {
        self.neutral.integrate(pflow);
    }

    /// The flows of `step`; empty beyond the last step.
    pub fn flow(&self, step: usize) -> &ParFlow {
        self.steps.get(step).map_or(&EMPTY, |s| &s.flow)
    }

    /// The neutral flow.
    pub fn neutral_flow(&self) -> &ParFlow {
        &self.neutral
    }

    /// Appends one line to the comment of `step`.
    pub fn append_comment(&mut self, step: usize, comment: &str) {
        let s = self.reserve(step);
        s.comment.push_str(comment);
        s.comment.push('\n');
    }

    /// The comment of `step`, one line per [`append_comment`](Self::append_comment) call.
    pub fn comment(&self, step: usize) -> &str {
        self.steps.get(step).map_or("", |s| s.comment.as_str())
    }

    fn graphs(&self) -> impl Iterator<Item = &ParFlow> {
        self.steps
            .iter()
            .map(|s| &s.flow)
            .chain(std::iter::once(&self.neutral))
    }

    /// Distinct targets, steps first then the neutral flow, in first-seen order.
    pub fn flow_targets(&self) -> Vec<SignalRef> {
        let mut out = Vec::new();
        for target in self.graphs().flat_map(ParFlow::targets) {
            if !out.contains(target) {
                out.push(target.clone());
            }
        }
        out
    }

    /// Distinct source signals in first-seen order.
    pub fn flow_sources(&self) -> Vec<SignalRef> {
        let mut out = Vec::new();
        for source in self.graphs().flat_map(ParFlow::sources) {
            if !out.contains(source) {
                out.push(source.clone());
            }
        }
        out
    }

    /// Distinct flows into `target`, in step order with the neutral flow last.
    pub fn flows_to(&self, target: &SignalRef) -> Vec<Flow> {
        let mut out: Vec<Flow> = Vec::new();
        for flow in self.graphs().filter_map(|g| g.lookup_target(target)) {
            if !out.contains(flow) {
                out.push(flow.clone());
            }
        }
        out
    }

    /// Resolves every don't-care flow to a concrete flow of the same target.
    ///
    /// The pick is the first non-don't-care flow into the target; a target
    /// that is never driven with anything else gets all zeros.
    pub fn replace_dont_cares(&mut self) {
        let mut picks: HashMap<SignalRef, Flow> = HashMap::new();
        for target in self.flow_targets() {
            let flows = self.flows_to(&target);
            let pick = match flows.iter().find(|f| !Self::is_dont_care_flow(f)) {
                Some(flow) => flow.clone(),
                None => {
                    let width = flows
                        .first()
                        .and_then(|f| f.source_value())
                        .and_then(ConstValue::as_logic)
                        .map_or(1, LogicVec::width);
                    Flow::value(target.clone(), ConstValue::Logic(LogicVec::new(width)))
                }
            };
            picks.insert(target, pick);
        }
        self.rewrite_dont_cares(|flow| picks.get(&flow.target).cloned());
    }

    /// Turns every don't-care flow into an all-`Z` flow of the same width.
    pub fn replace_dont_cares_by_tristates(&mut self) {
        self.rewrite_dont_cares(|flow| {
            let width = flow.source_value()?.as_logic()?.width();
            Some(Flow::value(
                flow.target.clone(),
                ConstValue::Logic(LogicVec::high_z(width)),
            ))
        });
    }

    /// Drops every don't-care flow.
    pub fn remove_dont_cares(&mut self) {
        for graph in self.graphs_mut() {
            let dont_cares: Vec<SignalRef> = graph
                .flows()
                .iter()
                .filter(|f| Self::is_dont_care_flow(f))
                .map(|f| f.target.clone())
                .collect();
            for target in &dont_cares {
                graph.remove(target);
            }
        }
    }

    fn graphs_mut(&mut self) -> impl Iterator<Item = &mut ParFlow> {
        self.steps
            .iter_mut()
            .map(|s| &mut s.flow)
            .chain(std::iter::once(&mut self.neutral))
    }

    fn rewrite_dont_cares(&mut self, mut replacement: impl FnMut(&Flow) -> Option<Flow>) {
        for graph in self.graphs_mut() {
            let news: Vec<Flow> = graph
                .flows()
                .iter()
                .filter(|f| Self::is_dont_care_flow(f))
                .filter_map(&mut replacement)
                .collect();
            for flow in news {
                graph.add(flow);
            }
        }
    }

    /// Resolves signal-to-signal chains inside every step.
    ///
    /// A flow `a <= b` in a step that also drives `b` is rewritten to read
    /// whatever `b` is driven with. Chains that close on themselves are
    /// rejected.
    pub fn transitize(&mut self) -> ControlpathResult<()> {
        for (step, s) in self.steps.iter_mut().enumerate() {
            let graph = &mut s.flow;
            let mut queue: std::collections::VecDeque<Flow> =
                graph.flows().iter().cloned().collect();
            while let Some(flow) = queue.pop_front() {
                let Some(source) = flow.source_signal() else {
                    continue;
                };
                let Some(upstream) = graph.lookup_target(source) else {
                    continue;
                };
                let rewritten = Flow {
                    target: flow.target.clone(),
                    source: upstream.source.clone(),
                };
                if rewritten == flow {
                    return Err(ControlpathError::Precondition(format!(
                        "cyclic dataflow in control step {step}"
                    )));
                }
                graph.add(rewritten.clone());
                queue.push_back(rewritten);
            }
        }
        Ok(())
    }

    /// One block per target, ordered by ascending fan-in.
    pub fn mux_report(&self, names: &Names<'_>) -> String {
        let mut rows: Vec<(SignalRef, Vec<Flow>)> = self
            .flow_targets()
            .into_iter()
            .map(|t| {
                let flows = self.flows_to(&t);
                (t, flows)
            })
            .collect();
        rows.sort_by_key(|(_, flows)| flows.len());

        let mut out = String::new();
        for (target, flows) in rows {
            let _ = writeln!(
                out,
                "MUX target {}, fan-in: {}",
                names.signal_ref(&target),
                flows.len()
            );
            for flow in &flows {
                let _ = writeln!(out, "  {}", names.flow(flow));
            }
        }
        out
    }

    /// `fanin;count;` lines, ascending by fan-in.
    pub fn mux_histogram(&self) -> String {
        let mut histogram: std::collections::BTreeMap<usize, usize> = Default::default();
        for target in self.flow_targets() {
            *histogram.entry(self.flows_to(&target).len()).or_default() += 1;
        }
        histogram
            .into_iter()
            .map(|(fan_in, count)| format!("{fan_in};{count};"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Every step's flows, one step header per step.
    pub fn flow_report(&self, names: &Names<'_>) -> String {
        let mut out = String::new();
        for (i, s) in self.steps.iter().enumerate() {
            let _ = writeln!(out, "{i}:");
            for flow in s.flow.flows() {
                let _ = writeln!(out, "  {}", names.flow(flow));
            }
        }
        out
    }
}
