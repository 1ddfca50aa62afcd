use core::fmt;
use core::num::NonZeroU32;

/// Compact, stable identifier used across a wiring document.
///
/// - `u32` keeps memory small
/// - `NonZero` enables `Option<Id>` to be pointer-optimized
///
/// Document consumers see the raw value (1-based), which matches the
/// allocation order within one document.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(NonZeroU32);

impl Id {
    /// Create an Id from its raw 1-based document value.
    pub fn from_raw(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(Self)
    }

    /// The raw 1-based value written into the document.
    pub fn raw(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.raw())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw())
    }
}

/// Domain-specific ID aliases for clarity (no runtime cost).
pub type ItemId = Id;
pub type PortId = Id;
pub type WireId = Id;

/// Monotonic allocator handing out fresh ids within one document.
///
/// Items, ports, and wires share a single id space starting at 1.
/// An allocator is scoped to one build call; ids have no meaning
/// outside the document they were minted for.
#[derive(Debug)]
pub struct IdAlloc {
    next: u32,
}

impl IdAlloc {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn next(&mut self) -> Id {
        let id = Id::from_raw(self.next).expect("id allocator starts at 1");
        self.next += 1;
        id
    }
}

impl Default for IdAlloc {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_raw_round_trip() {
        for raw in [1_u32, 2, 42, 10_000] {
            let id = Id::from_raw(raw).unwrap();
            assert_eq!(id.raw(), raw);
        }
        assert!(Id::from_raw(0).is_none());
    }

    #[test]
    fn option_id_is_small() {
        // This is a classic reason for NonZero: Option<Id> can be same size as Id.
        assert_eq!(
            core::mem::size_of::<Id>(),
            core::mem::size_of::<Option<Id>>()
        );
    }

    #[test]
    fn alloc_is_monotonic_from_one() {
        let mut alloc = IdAlloc::new();
        assert_eq!(alloc.next().raw(), 1);
        assert_eq!(alloc.next().raw(), 2);
        assert_eq!(alloc.next().raw(), 3);

        // A fresh allocator restarts; ids are per-document.
        let mut alloc2 = IdAlloc::new();
        assert_eq!(alloc2.next().raw(), 1);
    }
}
