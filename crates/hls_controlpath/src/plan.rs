//! The HLS plan: the set of instruction mappers a synthesis run may use.

use std::fmt;

/// Maps a family of intermediate instructions onto hardware.
pub trait InstructionMapper: fmt::Debug {
    /// A short name for reports.
    fn name(&self) -> &'static str;

    /// The opcodes this mapper implements.
    fn opcodes(&self) -> &'static [&'static str];

    /// Returns `true` if `opcode` is implemented by this mapper.
    fn supports(&self, opcode: &str) -> bool {
        self.opcodes().contains(&opcode)
    }
}

/// Implements branches inline as FSM state transitions.
///
/// The FSM builders drive the state signal directly, so branch instructions
/// need no dedicated branch-control unit.
#[derive(Debug, Default, Clone, Copy)]
pub struct InlineBranchControl;

impl InstructionMapper for InlineBranchControl {
    fn name(&self) -> &'static str {
        "inline-branch-control"
    }

    fn opcodes(&self) -> &'static [&'static str] {
        &["goto", "brtrue", "brfalse"]
    }
}

/// Instruction mappers registered for one synthesis run, in priority order.
#[derive(Debug, Default)]
pub struct HlsPlan {
    mappers: Vec<Box<dyn InstructionMapper>>,
}

impl HlsPlan {
    /// Creates a plan with no mappers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a mapper.
    pub fn add_mapper(&mut self, mapper: Box<dyn InstructionMapper>) {
        self.mappers.push(mapper);
    }

    /// Registered mappers in registration order.
    pub fn mappers(&self) -> impl Iterator<Item = &(dyn InstructionMapper + 'static)> + '_ {
        self.mappers.iter().map(Box::as_ref)
    }

    /// The first mapper that supports `opcode`.
    pub fn find_mapper(&self, opcode: &str) -> Option<&(dyn InstructionMapper + 'static)> {
        self.mappers().find(|m| m.supports(opcode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_branch_mapper() {
        let mut plan = HlsPlan::new();
        assert!(plan.find_mapper("goto").is_none());
        plan.add_mapper(Box::new(InlineBranchControl));
        assert_eq!(
            plan.find_mapper("brfalse").map(|m| m.name()),
            Some("inline-branch-control")
        );
        assert!(plan.find_mapper("add").is_none());
        assert_eq!(plan.mappers().count(), 1);
    }
}
