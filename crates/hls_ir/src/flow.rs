//! Register-transfer flows: one control step's worth of assignments.

use crate::builder::ProcessBuilder;
use crate::const_value::ConstValue;
use crate::error::IrResult;
use crate::expr::Expr;
use crate::signal::SignalRef;
use serde::{Deserialize, Serialize};

/// Where a flow takes its value from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlowSource {
    /// Another signal.
    Signal(SignalRef),
    /// A constant.
    Value(ConstValue),
}

/// A single transfer `target <= source`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Flow {
    /// The driven signal.
    pub target: SignalRef,
    /// The value driven onto it.
    pub source: FlowSource,
}

impl Flow {
    /// A signal-to-signal transfer.
    pub fn signal(target: SignalRef, source: SignalRef) -> Self {
        Self {
            target,
            source: FlowSource::Signal(source),
        }
    }

    /// A constant transfer.
    pub fn value(target: SignalRef, value: ConstValue) -> Self {
        Self {
            target,
            source: FlowSource::Value(value),
        }
    }

    /// The source signal, for signal flows.
    pub fn source_signal(&self) -> Option<&SignalRef> {
        match &self.source {
            FlowSource::Signal(s) => Some(s),
            FlowSource::Value(_) => None,
        }
    }

    /// The constant, for value flows.
    pub fn source_value(&self) -> Option<&ConstValue> {
        match &self.source {
            FlowSource::Value(v) => Some(v),
            FlowSource::Signal(_) => None,
        }
    }

    /// The source as an expression.
    pub fn source_expr(&self) -> Expr {
        match &self.source {
            FlowSource::Signal(s) => Expr::Signal(s.clone()),
            FlowSource::Value(v) => Expr::Const(v.clone()),
        }
    }
}

/// A set of flows executed in parallel, at most one per target.
///
/// Flows keep their insertion order. Adding a flow for a target that already
/// has one replaces it in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParFlow {
    flows: Vec<Flow>,
}

impl ParFlow {
    /// Creates an empty set.
    pub const fn new() -> Self {
        Self { flows: Vec::new() }
    }

    /// Adds `flow`, replacing any flow to the same target.
    pub fn add(&mut self, flow: Flow) {
        match self.flows.iter_mut().find(|f| f.target == flow.target) {
            Some(existing) => *existing = flow,
            None => self.flows.push(flow),
        }
    }

    /// Adds every flow of `other`.
    pub fn integrate(&mut self, other: &ParFlow) {
        for flow in &other.flows {
            self.add(flow.clone());
        }
    }

    /// Removes and returns the flow to `target`.
    pub fn remove(&mut self, target: &SignalRef) -> Option<Flow> {
        let pos = self.flows.iter().position(|f| &f.target == target)?;
        Some(self.flows.remove(pos))
    }

    /// The flow to `target`, if any.
    pub fn lookup_target(&self, target: &SignalRef) -> Option<&Flow> {
        self.flows.iter().find(|f| &f.target == target)
    }

    /// Returns `true` if some flow drives `target`.
    pub fn contains_target(&self, target: &SignalRef) -> bool {
        self.lookup_target(target).is_some()
    }

    /// The flows in insertion order.
    pub fn flows(&self) -> &[Flow] {
        &self.flows
    }

    /// Driven targets in insertion order.
    pub fn targets(&self) -> impl Iterator<Item = &SignalRef> {
        self.flows.iter().map(|f| &f.target)
    }

    /// Distinct source signals in first-seen order.
    pub fn sources(&self) -> Vec<&SignalRef> {
        let mut out: Vec<&SignalRef> = Vec::new();
        for s in self.flows.iter().filter_map(Flow::source_signal) {
            if !out.contains(&s) {
                out.push(s);
            }
        }
        out
    }

    /// Number of flows.
    pub fn len(&self) -> usize {
        self.flows.len()
    }

    /// Returns `true` if there are no flows.
    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    /// Emits one assignment per flow.
    pub fn implement(&self, builder: &mut ProcessBuilder) -> IrResult<()> {
        self.implement_filtered(builder, |_| true)
    }

    /// Emits one assignment per flow accepted by `keep`.
    pub fn implement_filtered(
        &self,
        builder: &mut ProcessBuilder,
        keep: impl Fn(&Flow) -> bool,
    ) -> IrResult<()> {
        for flow in self.flows.iter().filter(|f| keep(f)) {
            builder.store(flow.target.clone(), flow.source_expr())?;
        }
        Ok(())
    }
}

impl FromIterator<Flow> for ParFlow {
    fn from_iter<T: IntoIterator<Item = Flow>>(iter: T) -> Self {
        let mut pf = ParFlow::new();
        for flow in iter {
            pf.add(flow);
        }
        pf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SignalId;
    use crate::stmt::Statement;

    fn r(i: u32) -> SignalRef {
        SignalRef::Signal(SignalId::from_raw(i))
    }

    #[test]
    fn add_replaces_in_place() {
        let mut pf = ParFlow::new();
        pf.add(Flow::signal(r(0), r(5)));
        pf.add(Flow::value(r(1), ConstValue::Bool(true)));
        pf.add(Flow::signal(r(0), r(6)));
        assert_eq!(pf.len(), 2);
        assert_eq!(pf.flows()[0], Flow::signal(r(0), r(6)));
        assert_eq!(pf.targets().cloned().collect::<Vec<_>>(), vec![r(0), r(1)]);
    }

    #[test]
    fn integrate_and_remove() {
        let mut a: ParFlow = [Flow::signal(r(0), r(5))].into_iter().collect();
        let b: ParFlow = [Flow::signal(r(0), r(7)), Flow::signal(r(2), r(5))]
            .into_iter()
            .collect();
        a.integrate(&b);
        assert_eq!(a.lookup_target(&r(0)), Some(&Flow::signal(r(0), r(7))));
        assert_eq!(a.sources(), vec![&r(7), &r(5)]);
        assert!(a.remove(&r(0)).is_some());
        assert!(!a.contains_target(&r(0)));
        assert!(a.remove(&r(0)).is_none());
    }

    #[test]
    fn implement_emits_assignments() {
        let pf: ParFlow = [
            Flow::signal(r(0), r(5)),
            Flow::value(r(1), ConstValue::Int(3)),
        ]
        .into_iter()
        .collect();
        let mut b = ProcessBuilder::new();
        pf.implement_filtered(&mut b, |f| f.target != r(0)).unwrap();
        pf.implement(&mut b).unwrap();
        let body = b.finish().unwrap();
        assert_eq!(body.as_slice().len(), 3);
        assert_eq!(
            body.as_slice()[0],
            Statement::Assign {
                target: r(1),
                value: Expr::Const(ConstValue::Int(3))
            }
        );
    }
}
