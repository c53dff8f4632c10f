//! The control-path builder protocol and the pieces both FSM builders share.
//!
//! A builder is driven in three steps: [`ControlpathBuilder::personalize_plan`]
//! registers the mappers it relies on, [`ControlpathBuilder::prepare_allocation`]
//! creates the state type and signal once the step count is known, and
//! [`ControlpathBuilder::create_controlpath`] lowers a flow matrix into
//! processes.

use crate::binder::ControlpathHost;
use crate::error::{ControlpathError, ControlpathResult};
use crate::fsm::FsmControlpathBuilderFactory;
use crate::matrix::FlowMatrix;
use crate::plan::HlsPlan;
use crate::tristate::TristateBusFsmControlpathBuilderFactory;
use hls_config::ControlpathKind;
use hls_diagnostics::{Category, DiagnosticCode};
use hls_ir::{ConstValue, Expr, PortUsage, SignalId, SignalRef, TypeId};

/// A tri-state target with several drivers has no else-flow and was skipped.
pub const MISSING_ELSE_MULTI: DiagnosticCode = DiagnosticCode::new(Category::Warning, 301);
/// A tri-state target with one driver has no else-flow and was skipped.
pub const MISSING_ELSE_SINGLE: DiagnosticCode = DiagnosticCode::new(Category::Warning, 302);
/// Summary of a generated control path.
pub const CONTROLPATH_SUMMARY: DiagnosticCode = DiagnosticCode::new(Category::Note, 401);

/// Lowers a flow matrix into the processes of a control path.
pub trait ControlpathBuilder {
    /// Registers the instruction mappers this builder relies on.
    fn personalize_plan(&mut self, plan: &mut HlsPlan);

    /// Creates the state type for `step_count` states and binds the state signal.
    fn prepare_allocation(&mut self, step_count: usize) -> ControlpathResult<()>;

    /// Generates the control path for `matrix`; `name` prefixes report documents.
    fn create_controlpath(&mut self, matrix: &mut FlowMatrix, name: &str)
        -> ControlpathResult<()>;
}

/// Creates builders bound to a host.
pub trait ControlpathBuilderFactory: Sync {
    /// Creates a builder that allocates through `host`.
    fn create<'h>(&self, host: &'h mut dyn ControlpathHost) -> Box<dyn ControlpathBuilder + 'h>;
}

/// The factory for the configured builder kind.
pub fn factory_for(kind: ControlpathKind) -> &'static dyn ControlpathBuilderFactory {
    match kind {
        ControlpathKind::Fsm => &FsmControlpathBuilderFactory,
        ControlpathKind::TristateFsm => &TristateBusFsmControlpathBuilderFactory,
    }
}

/// The state enumeration and signal bound by `prepare_allocation`.
#[derive(Debug, Clone)]
pub(crate) struct StateAllocation {
    pub(crate) signal: SignalId,
    pub(crate) ty: TypeId,
    pub(crate) count: usize,
}

impl StateAllocation {
    /// Creates or reuses `TState{count}` and binds the `State` signal.
    pub(crate) fn allocate(
        host: &mut dyn ControlpathHost,
        count: usize,
    ) -> ControlpathResult<Self> {
        if count == 0 {
            return Err(ControlpathError::Precondition(
                "a control path needs at least one control step".to_string(),
            ));
        }
        let type_name = host.interner().get_or_intern(&format!("TState{count}"));
        let ty = match host.types().find_enum(type_name) {
            Some(ty) => ty,
            None => {
                let literals = (0..count)
                    .map(|i| host.interner().get_or_intern(&format!("CStep{i}")))
                    .collect();
                host.types_mut().create_enum(type_name, literals)
            }
        };
        let init = ConstValue::Enum { ty, index: 0 };
        let signal = host.get_signal(PortUsage::State, "State", ty, Some(init));
        Ok(Self { signal, ty, count })
    }

    /// Fails unless every step of `matrix` has a state.
    pub(crate) fn check_fits(&self, matrix: &FlowMatrix) -> ControlpathResult<()> {
        if matrix.num_csteps() > self.count {
            return Err(ControlpathError::Precondition(format!(
                "flow matrix has {} control steps but only {} states were allocated",
                matrix.num_csteps(),
                self.count
            )));
        }
        Ok(())
    }

    /// The current-state expression.
    pub(crate) fn current(&self) -> Expr {
        Expr::Signal(SignalRef::Signal(self.signal))
    }

    /// The literal of state `index`.
    pub(crate) fn literal(&self, index: usize) -> Expr {
        Expr::Const(ConstValue::Enum {
            ty: self.ty,
            index: index as u32,
        })
    }

    /// Distinct source signals of `matrix` followed by the state signal.
    pub(crate) fn sensitivity(&self, matrix: &FlowMatrix) -> Vec<SignalId> {
        let mut out: Vec<SignalId> = Vec::new();
        for id in matrix
            .flow_sources()
            .iter()
            .map(SignalRef::signal)
            .chain(std::iter::once(self.signal))
        {
            if !out.contains(&id) {
                out.push(id);
            }
        }
        out
    }
}

/// Fails with the standard message for a builder used before allocation.
pub(crate) fn require_allocation(
    states: Option<&StateAllocation>,
) -> ControlpathResult<&StateAllocation> {
    states.ok_or_else(|| {
        ControlpathError::Precondition(
            "create_controlpath called before prepare_allocation".to_string(),
        )
    })
}
