//! Incremental wiring-document builder.

use sf_core::{IdAlloc, ItemId, PortId, WireId};
use sf_scenario::ParamKind;

use crate::error::WiringError;
use crate::graph::{Item, ItemKind, Wire, WiringGraph};
use crate::validate;

/// Handle to a variable item: its id plus the ports wiring code needs.
///
/// `input` is present only for flow variables, which accept a wire.
#[derive(Debug, Clone, Copy)]
pub struct VariableHandle {
    pub item: ItemId,
    pub output: PortId,
    pub input: Option<PortId>,
}

/// Handle to a gather gate.
#[derive(Debug, Clone, Copy)]
pub struct GateHandle {
    pub item: ItemId,
    pub output: PortId,
    pub data: PortId,
    pub index: PortId,
}

/// Handle to a two-input sum gate.
#[derive(Debug, Clone, Copy)]
pub struct SumHandle {
    pub item: ItemId,
    pub output: PortId,
    pub lhs: PortId,
    pub rhs: PortId,
}

/// Builder for constructing a wiring document incrementally.
///
/// Ids come from an allocator scoped to this builder; a fresh builder
/// restarts the id space, so ids never carry meaning across documents.
/// Call `finish()` to validate and freeze into an immutable [`WiringGraph`].
#[derive(Debug, Default)]
pub struct WiringBuilder {
    alloc: IdAlloc,
    items: Vec<Item>,
    wires: Vec<Wire>,
    inputs: Vec<ItemId>,
    outputs: Vec<ItemId>,
}

impl WiringBuilder {
    /// Create a new empty builder with a fresh id space.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable item of the given kind and return its handle.
    ///
    /// Flow variables get an input port in addition to the output.
    pub fn add_variable(
        &mut self,
        name: impl Into<String>,
        kind: ParamKind,
        init: impl Into<String>,
        tooltip: Option<String>,
        pos: (f64, f64),
    ) -> VariableHandle {
        let id = self.alloc.next();
        let output = self.alloc.next();
        let input = (kind == ParamKind::Flow).then(|| self.alloc.next());

        let mut ports = vec![output];
        ports.extend(input);

        self.items.push(Item {
            id,
            kind: ItemKind::Variable {
                kind,
                name: name.into(),
                init: init.into(),
                tooltip,
            },
            pos,
            ports,
        });

        VariableHandle {
            item: id,
            output,
            input,
        }
    }

    /// Shorthand: parameter variable with init "0" and no tooltip.
    pub fn add_parameter(&mut self, name: impl Into<String>, pos: (f64, f64)) -> VariableHandle {
        self.add_variable(name, ParamKind::Parameter, "0", None, pos)
    }

    /// Shorthand: flow variable with init "0" and no tooltip.
    pub fn add_flow(&mut self, name: impl Into<String>, pos: (f64, f64)) -> VariableHandle {
        self.add_variable(name, ParamKind::Flow, "0", None, pos)
    }

    /// Add a gather gate selecting along `axis`.
    pub fn add_gather(&mut self, axis: impl Into<String>, pos: (f64, f64)) -> GateHandle {
        let id = self.alloc.next();
        let output = self.alloc.next();
        let data = self.alloc.next();
        let index = self.alloc.next();

        self.items.push(Item {
            id,
            kind: ItemKind::Gather { axis: axis.into() },
            pos,
            ports: vec![output, data, index],
        });

        GateHandle {
            item: id,
            output,
            data,
            index,
        }
    }

    /// Add a two-input sum gate.
    pub fn add_sum(&mut self, pos: (f64, f64)) -> SumHandle {
        let id = self.alloc.next();
        let output = self.alloc.next();
        let lhs = self.alloc.next();
        let rhs = self.alloc.next();

        self.items.push(Item {
            id,
            kind: ItemKind::Add,
            pos,
            ports: vec![output, lhs, rhs],
        });

        SumHandle {
            item: id,
            output,
            lhs,
            rhs,
        }
    }

    /// Wire an output port to an input port.
    pub fn connect(&mut self, from: PortId, to: PortId) -> WireId {
        let id = self.alloc.next();
        self.wires.push(Wire { id, from, to });
        id
    }

    /// Designate an item as a group input of the document.
    pub fn mark_input(&mut self, item: ItemId) {
        self.inputs.push(item);
    }

    /// Designate an item as a group output of the document.
    pub fn mark_output(&mut self, item: ItemId) {
        self.outputs.push(item);
    }

    /// Validate and freeze the document.
    pub fn finish(self) -> Result<WiringGraph, WiringError> {
        validate::validate(&self.items, &self.wires, &self.inputs, &self.outputs)?;
        Ok(WiringGraph {
            items: self.items,
            wires: self.wires,
            inputs: self.inputs,
            outputs: self.outputs,
        })
    }
}
