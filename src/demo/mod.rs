//! Demo Catalog and Runner
//!
//! The AquaVisual demos are a fixed, ordered list of standalone executables.
//! This module holds that list and the machinery that runs it:
//! - `prerequisites`: checks every executable is present
//! - `executor`: runs one demo with a timeout and captures its output
//! - `runner`: ties both together for single runs and batches

pub mod executor;
pub mod prerequisites;
pub mod runner;

pub use executor::{DemoOutcome, ExecutionResult};
pub use prerequisites::Readiness;
pub use runner::{BatchReport, DemoRunner, RunSummary};

/// Static (name, description) pair identifying one demo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoDescriptor {
    /// Executable name without the platform suffix
    pub name: &'static str,
    pub description: &'static str,
}

impl DemoDescriptor {
    pub const fn new(name: &'static str, description: &'static str) -> Self {
        Self { name, description }
    }
}

/// The demos shipped with AquaVisual, in display and execution order.
pub const BUILTIN_DEMOS: &[DemoDescriptor] = &[
    DemoDescriptor::new("SimpleExample", "Basic functionality test"),
    DemoDescriptor::new("TestAquaVisual", "Comprehensive library test suite"),
    DemoDescriptor::new("SceneDemo", "Advanced scene creation demonstration"),
];

/// Ordered, immutable list of demos
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoCatalog {
    demos: Vec<DemoDescriptor>,
}

impl DemoCatalog {
    pub fn new(demos: Vec<DemoDescriptor>) -> Self {
        Self { demos }
    }

    pub fn builtin() -> Self {
        Self::new(BUILTIN_DEMOS.to_vec())
    }

    pub fn len(&self) -> usize {
        self.demos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.demos.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DemoDescriptor> {
        self.demos.iter()
    }

    /// Look up a demo by its 1-based menu index.
    pub fn by_menu_index(&self, index: usize) -> Option<&DemoDescriptor> {
        index.checked_sub(1).and_then(|i| self.demos.get(i))
    }

    /// Menu index that selects "run all demos".
    pub fn run_all_index(&self) -> usize {
        self.demos.len() + 1
    }
}

impl Default for DemoCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl<'a> IntoIterator for &'a DemoCatalog {
    type Item = &'a DemoDescriptor;
    type IntoIter = std::slice::Iter<'a, DemoDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.demos.iter()
    }
}
