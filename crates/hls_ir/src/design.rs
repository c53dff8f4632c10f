//! Top-level design container.

use crate::arena::Arena;
use crate::component::Component;
use crate::ids::ComponentId;
use crate::types::TypeDb;
use hls_common::Ident;
use serde::{Deserialize, Serialize};

/// All components of a design plus the type database they share.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Design {
    /// Components in creation order.
    pub components: Arena<ComponentId, Component>,
    /// Types shared by every component.
    pub types: TypeDb,
}

impl Design {
    /// Creates an empty design.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an empty component.
    pub fn add_component(&mut self, name: Ident) -> ComponentId {
        self.components.alloc(Component::new(name))
    }

    /// Returns a component.
    pub fn component(&self, id: ComponentId) -> &Component {
        &self.components[id]
    }

    /// Returns a component mutably.
    pub fn component_mut(&mut self, id: ComponentId) -> &mut Component {
        &mut self.components[id]
    }
}
