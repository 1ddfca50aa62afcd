//! Core wiring data structures.
//!
//! A wiring document is the serializable description of canvas items and
//! the directed wires between their ports, as the simulation backend
//! imports it. Ids for items, ports, and wires share one document-scoped
//! id space.

use sf_core::{ItemId, PortId, WireId};
use sf_scenario::ParamKind;

/// What an item is: a named variable or one of the two operation gates
/// the scenario wiring uses.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemKind {
    /// A named model variable carrying an init expression.
    Variable {
        kind: ParamKind,
        name: String,
        init: String,
        tooltip: Option<String>,
    },
    /// Selects one slice along `axis`, keyed by an index input.
    Gather { axis: String },
    /// Two-input sum, used to offset the scenario selector.
    Add,
}

/// A canvas item with its document id, position, and ordered port list.
///
/// Port order is the backend's contract:
/// - variables: `[output]`, flow variables: `[output, input]`
/// - gather: `[output, data input, index input]`
/// - add: `[output, lhs, rhs]`
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: ItemId,
    pub kind: ItemKind,
    pub pos: (f64, f64),
    pub ports: Vec<PortId>,
}

impl Item {
    /// Every item's first port is its output.
    pub fn output(&self) -> PortId {
        self.ports[0]
    }

    /// Input ports, in document order.
    pub fn inputs(&self) -> &[PortId] {
        &self.ports[1..]
    }

    pub fn is_gather(&self) -> bool {
        matches!(self.kind, ItemKind::Gather { .. })
    }
}

/// A directed wire from one output port to one input port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wire {
    pub id: WireId,
    pub from: PortId,
    pub to: PortId,
}

/// A validated, immutable wiring document.
///
/// `inputs` and `outputs` designate the items the backend treats as group
/// inputs/outputs when the document is imported.
#[derive(Debug, Clone, PartialEq)]
pub struct WiringGraph {
    pub(crate) items: Vec<Item>,
    pub(crate) wires: Vec<Wire>,
    pub(crate) inputs: Vec<ItemId>,
    pub(crate) outputs: Vec<ItemId>,
}

impl WiringGraph {
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn wires(&self) -> &[Wire] {
        &self.wires
    }

    pub fn inputs(&self) -> &[ItemId] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[ItemId] {
        &self.outputs
    }

    /// Find an item by id.
    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    /// The item owning a port, if any.
    pub fn port_owner(&self, port: PortId) -> Option<&Item> {
        self.items.iter().find(|i| i.ports.contains(&port))
    }

    /// Wires arriving at a port.
    pub fn wires_into(&self, port: PortId) -> impl Iterator<Item = &Wire> {
        self.wires.iter().filter(move |w| w.to == port)
    }
}
