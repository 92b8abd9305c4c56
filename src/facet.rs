//! Enumeration of the charts drawn for one quantity.

use crate::data::{QuantitySpec, Variable};

/// One chart's worth of context: a quantity with its fixed variable pinned.
#[derive(Debug, Clone, Copy)]
pub struct Facet {
    pub spec: &'static QuantitySpec,
    pub value: u32,
    /// Position of `value` in the fixed variable's canonical set
    pub position: usize,
}

impl Facet {
    pub fn fixed(&self) -> Variable {
        self.spec.fixed
    }

    pub fn free(&self) -> Variable {
        self.spec.free()
    }
}

/// Lazy, ascending walk over a quantity's fixed-variable values
#[derive(Debug, Clone)]
pub struct Facets {
    spec: &'static QuantitySpec,
    next: usize,
}

impl Facets {
    pub fn new(spec: &'static QuantitySpec) -> Self {
        Self { spec, next: 0 }
    }
}

impl Iterator for Facets {
    type Item = Facet;

    fn next(&mut self) -> Option<Facet> {
        let value = *self.spec.fixed.values().get(self.next)?;
        let facet = Facet {
            spec: self.spec,
            value,
            position: self.next,
        };
        self.next += 1;
        Some(facet)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.spec.fixed.values().len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Facets {}
