//! The seam between control-path builders and the component they fill.
//!
//! Builders never touch a [`Design`] directly. They ask an [`AutoBinder`] for
//! signals and hand it finished processes, and they reach the shared type
//! database, diagnostics and documentation through a [`ControlpathHost`].
//! [`ComponentHost`] is the implementation over one component of a design.

use hls_common::Interner;
use hls_config::ControlpathConfig;
use hls_diagnostics::DiagnosticSink;
use hls_ir::{
    ComponentId, ConstValue, Design, Document, Names, PortUsage, ProcessId, ProcessKind,
    SignalId, Statement, TypeDb, TypeId,
};

/// Allocates signals and registers processes on behalf of a builder.
pub trait AutoBinder {
    /// Returns a signal with the given usage, name and type.
    ///
    /// An existing signal with the same name, usage and type is reused. If
    /// the name is taken by a different signal, a numbered variant is used.
    fn get_signal(
        &mut self,
        usage: PortUsage,
        name: &str,
        ty: TypeId,
        init: Option<ConstValue>,
    ) -> SignalId;

    /// Registers a finished process.
    fn create_process(
        &mut self,
        kind: ProcessKind,
        function_name: &str,
        body: Statement,
        sensitivity: Vec<SignalId>,
    ) -> ProcessId;
}

/// Everything a control-path builder needs from its surroundings.
pub trait ControlpathHost: AutoBinder {
    /// The design's type database.
    fn types(&self) -> &TypeDb;
    /// The design's type database, mutably.
    fn types_mut(&mut self) -> &mut TypeDb;
    /// The identifier interner.
    fn interner(&self) -> &Interner;
    /// Where recoverable problems are reported.
    fn sink(&self) -> &DiagnosticSink;
    /// Control-path settings.
    fn config(&self) -> &ControlpathConfig;
    /// Name of the component under construction.
    fn component_name(&self) -> &str;
    /// Attaches a documentation file to the component.
    fn add_document(&mut self, doc: Document);
    /// A name resolver for reports.
    fn names(&self) -> Names<'_>;
}

/// A [`ControlpathHost`] over one component of a [`Design`].
pub struct ComponentHost<'a> {
    design: &'a mut Design,
    component: ComponentId,
    interner: &'a Interner,
    sink: &'a DiagnosticSink,
    config: &'a ControlpathConfig,
}

impl<'a> ComponentHost<'a> {
    /// Creates a host for `component`.
    pub fn new(
        design: &'a mut Design,
        component: ComponentId,
        interner: &'a Interner,
        sink: &'a DiagnosticSink,
        config: &'a ControlpathConfig,
    ) -> Self {
        Self {
            design,
            component,
            interner,
            sink,
            config,
        }
    }

    /// The component being filled.
    pub fn component_id(&self) -> ComponentId {
        self.component
    }
}

impl AutoBinder for ComponentHost<'_> {
    fn get_signal(
        &mut self,
        usage: PortUsage,
        name: &str,
        ty: TypeId,
        init: Option<ConstValue>,
    ) -> SignalId {
        let component = self.design.component_mut(self.component);
        let mut candidate = self.interner.get_or_intern(name);
        let mut suffix = 0u32;
        while let Some(id) = component.find_signal(candidate) {
            let existing = &component.signals[id];
            if existing.usage == usage && existing.ty == ty {
                return id;
            }
            suffix += 1;
            candidate = self.interner.get_or_intern(&format!("{name}_{suffix}"));
        }
        component.add_signal(candidate, ty, usage, init)
    }

    fn create_process(
        &mut self,
        kind: ProcessKind,
        function_name: &str,
        body: Statement,
        sensitivity: Vec<SignalId>,
    ) -> ProcessId {
        let function_name = self.interner.get_or_intern(function_name);
        self.design
            .component_mut(self.component)
            .add_process(kind, function_name, body, sensitivity)
    }
}

impl ControlpathHost for ComponentHost<'_> {
    fn types(&self) -> &TypeDb {
        &self.design.types
    }

    fn types_mut(&mut self) -> &mut TypeDb {
        &mut self.design.types
    }

    fn interner(&self) -> &Interner {
        self.interner
    }

    fn sink(&self) -> &DiagnosticSink {
        self.sink
    }

    fn config(&self) -> &ControlpathConfig {
        self.config
    }

    fn component_name(&self) -> &str {
        self.interner
            .resolve(self.design.component(self.component).name)
    }

    fn add_document(&mut self, doc: Document) {
        self.design.component_mut(self.component).add_document(doc);
    }

    fn names(&self) -> Names<'_> {
        Names::new(
            self.design.component(self.component),
            &self.design.types,
            self.interner,
        )
    }
}
