//! Components: the unit that owns signals, processes and report documents.

use crate::arena::Arena;
use crate::const_value::ConstValue;
use crate::flow::{Flow, FlowSource};
use crate::ids::{ProcessId, SignalId, TypeId};
use crate::process::{Process, ProcessKind};
use crate::signal::{PortUsage, Signal, SignalRef};
use crate::stmt::Statement;
use crate::types::TypeDb;
use hls_common::{Ident, Interner};
use serde::{Deserialize, Serialize};

/// A named text attachment, e.g. a MUX report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// File name of the document.
    pub name: String,
    /// Document text.
    pub content: String,
}

/// A hardware component under synthesis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
    /// The component name.
    pub name: Ident,
    /// All declared signals.
    pub signals: Arena<SignalId, Signal>,
    /// Generated processes, in registration order.
    pub processes: Arena<ProcessId, Process>,
    /// Attached documents, in registration order.
    pub documents: Vec<Document>,
}

impl Component {
    /// Creates an empty component.
    pub fn new(name: Ident) -> Self {
        Self {
            name,
            signals: Arena::new(),
            processes: Arena::new(),
            documents: Vec::new(),
        }
    }

    /// Declares a signal.
    pub fn add_signal(
        &mut self,
        name: Ident,
        ty: TypeId,
        usage: PortUsage,
        init: Option<ConstValue>,
    ) -> SignalId {
        self.signals.alloc_with(|id| Signal {
            id,
            name,
            ty,
            usage,
            init,
        })
    }

    /// Finds a signal by name.
    pub fn find_signal(&self, name: Ident) -> Option<SignalId> {
        self.signals
            .iter()
            .find(|(_, s)| s.name == name)
            .map(|(id, _)| id)
    }

    /// Registers a process.
    pub fn add_process(
        &mut self,
        kind: ProcessKind,
        function_name: Ident,
        body: Statement,
        sensitivity: Vec<SignalId>,
    ) -> ProcessId {
        self.processes.alloc_with(|id| Process {
            id,
            kind,
            function_name,
            body,
            sensitivity,
        })
    }

    /// Appends a document.
    pub fn add_document(&mut self, doc: Document) {
        self.documents.push(doc);
    }

    /// Finds a document by name.
    pub fn document(&self, name: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.name == name)
    }
}

/// Renders IR references with their source names for reports.
pub struct Names<'a> {
    component: &'a Component,
    types: &'a TypeDb,
    interner: &'a Interner,
}

impl<'a> Names<'a> {
    /// Creates a resolver over one component.
    pub fn new(component: &'a Component, types: &'a TypeDb, interner: &'a Interner) -> Self {
        Self {
            component,
            types,
            interner,
        }
    }

    /// `name` or `name[high:low]`.
    pub fn signal_ref(&self, r: &SignalRef) -> String {
        let name = self
            .interner
            .resolve(self.component.signals[r.signal()].name);
        match r {
            SignalRef::Signal(_) => name.to_string(),
            SignalRef::Slice { high, low, .. } => format!("{name}[{high}:{low}]"),
        }
    }

    /// A constant as it would read in generated code.
    pub fn value(&self, v: &ConstValue) -> String {
        match v {
            ConstValue::Logic(bits) => format!("\"{bits}\""),
            ConstValue::Bool(b) => b.to_string(),
            ConstValue::Int(i) => i.to_string(),
            ConstValue::Value(hw) => hw.to_string(),
            ConstValue::Enum { ty, index } => self
                .types
                .enum_literals(*ty)
                .and_then(|lits| lits.get(*index as usize))
                .map(|lit| self.interner.resolve(*lit).to_string())
                .unwrap_or_else(|| format!("<literal {index}>")),
        }
    }

    /// `target <= source`.
    pub fn flow(&self, flow: &Flow) -> String {
        let source = match &flow.source {
            FlowSource::Signal(s) => self.signal_ref(s),
            FlowSource::Value(v) => self.value(v),
        };
        format!("{} <= {source}", self.signal_ref(&flow.target))
    }
}
