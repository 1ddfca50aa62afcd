//! Wiring-document validation logic.

use std::collections::{HashMap, HashSet, VecDeque};

use sf_core::{Id, ItemId, PortId};

use crate::error::WiringError;
use crate::graph::{Item, ItemKind, Wire};

/// Validate a wiring document before it is frozen:
/// - every id (item, port, wire) is unique within the document
/// - wires connect ports that exist
/// - every gather/add input port receives exactly one wire
/// - flow-variable inputs receive at most one wire
/// - designated inputs/outputs name real items
/// - the item graph is acyclic
pub(crate) fn validate(
    items: &[Item],
    wires: &[Wire],
    inputs: &[ItemId],
    outputs: &[ItemId],
) -> Result<(), WiringError> {
    check_unique_ids(items, wires)?;

    let owner = port_owners(items);
    for wire in wires {
        for port in [wire.from, wire.to] {
            if !owner.contains_key(&port) {
                return Err(WiringError::UnknownPort {
                    wire: wire.id,
                    port,
                });
            }
        }
    }

    check_fan_in(items, wires)?;

    let item_ids: HashSet<ItemId> = items.iter().map(|i| i.id).collect();
    for (role, ids) in [("input", inputs), ("output", outputs)] {
        for &id in ids {
            if !item_ids.contains(&id) {
                return Err(WiringError::UnknownEndpoint { role, id });
            }
        }
    }

    check_acyclic(items, wires, &owner)
}

fn check_unique_ids(items: &[Item], wires: &[Wire]) -> Result<(), WiringError> {
    let mut seen: HashSet<Id> = HashSet::new();
    let mut claim = |id: Id| {
        if seen.insert(id) {
            Ok(())
        } else {
            Err(WiringError::DuplicateId { id })
        }
    };

    for item in items {
        claim(item.id)?;
        for &port in &item.ports {
            claim(port)?;
        }
    }
    for wire in wires {
        claim(wire.id)?;
    }
    Ok(())
}

fn port_owners(items: &[Item]) -> HashMap<PortId, ItemId> {
    let mut owner = HashMap::new();
    for item in items {
        for &port in &item.ports {
            owner.insert(port, item.id);
        }
    }
    owner
}

fn check_fan_in(items: &[Item], wires: &[Wire]) -> Result<(), WiringError> {
    let mut incoming: HashMap<PortId, usize> = HashMap::new();
    for wire in wires {
        *incoming.entry(wire.to).or_default() += 1;
    }

    for item in items {
        let exact_one = matches!(item.kind, ItemKind::Gather { .. } | ItemKind::Add);
        for &port in item.inputs() {
            let count = incoming.get(&port).copied().unwrap_or(0);
            let bad = if exact_one { count != 1 } else { count > 1 };
            if bad {
                return Err(WiringError::BadFanIn {
                    item: item.id,
                    port,
                    count,
                });
            }
        }
    }
    Ok(())
}

/// Kahn's algorithm over the item graph induced by the wires.
fn check_acyclic(
    items: &[Item],
    wires: &[Wire],
    owner: &HashMap<PortId, ItemId>,
) -> Result<(), WiringError> {
    let mut adjacency: HashMap<ItemId, Vec<ItemId>> = HashMap::new();
    let mut in_degree: HashMap<ItemId, usize> = items.iter().map(|i| (i.id, 0)).collect();

    for wire in wires {
        // Port existence was already checked.
        let (Some(&from), Some(&to)) = (owner.get(&wire.from), owner.get(&wire.to)) else {
            continue;
        };
        adjacency.entry(from).or_default().push(to);
        *in_degree.entry(to).or_default() += 1;
    }

    let mut queue: VecDeque<ItemId> = in_degree
        .iter()
        .filter(|(_, &deg)| deg == 0)
        .map(|(&id, _)| id)
        .collect();

    let mut visited = 0usize;
    while let Some(id) = queue.pop_front() {
        visited += 1;
        for next in adjacency.get(&id).into_iter().flatten() {
            let deg = in_degree.get_mut(next).expect("all items have a degree");
            *deg -= 1;
            if *deg == 0 {
                queue.push_back(*next);
            }
        }
    }

    if visited == items.len() {
        Ok(())
    } else {
        Err(WiringError::Cycle)
    }
}
