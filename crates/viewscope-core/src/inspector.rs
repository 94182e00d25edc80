//! Top-level inspection façade.
//!
//! [`Inspector`] bundles the demangler, walker, classifier, hierarchy
//! builder and registry behind the query surface an external debugger
//! consumes: one-line descriptions, full hierarchies, flattened backing
//! element sets, and framework-produced checks. Every operation returns a
//! usable result for any input; nothing here can fail.

use std::sync::Arc;

use crate::classify;
use crate::hierarchy::{HierarchyBuilder, Node, DEFAULT_MAX_DEPTH};
use crate::reflect::Reflect;
use crate::registry::{BackingElementRef, BackingElementRegistry, NativeElement};

/// Aggregated debug record for one inspected view.
#[derive(Debug, Clone)]
pub struct DebugReport
{
    /// Type identifier exactly as the runtime produced it.
    pub type_name: String,
    /// One-line human-readable summary.
    pub description: String,
    /// Full reconstructed hierarchy.
    pub hierarchy: Node,
    /// Every backing element discovered anywhere in the subtree.
    pub native_elements: Vec<BackingElementRef>,
}

/// Query surface over a reflected view tree and a backing element registry.
pub struct Inspector
{
    registry: Arc<BackingElementRegistry>,
    max_depth: usize,
}

impl Inspector
{
    /// Inspector reading backing element associations from `registry`.
    #[must_use]
    pub fn new(registry: Arc<BackingElementRegistry>) -> Self
    {
        Self {
            registry,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Override the hierarchy recursion cap.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self
    {
        self.max_depth = max_depth;
        self
    }

    /// The registry this inspector reads from.
    #[must_use]
    pub fn registry(&self) -> &Arc<BackingElementRegistry>
    {
        &self.registry
    }

    /// One-line summary of `root`: readable type plus attribute, state and
    /// modifier details.
    #[must_use]
    pub fn describe(&self, root: &dyn Reflect) -> String
    {
        let node = self.hierarchy(root);
        let mut details: Vec<String> = node
            .attributes
            .iter()
            .map(|(label, value)| format!("{label}: {value}"))
            .collect();
        if let Some(state) = &node.state_summary {
            details.push(format!("state: {state}"));
        }
        if let Some(modifiers) = &node.modifier_summary {
            details.push(format!("modifiers: {modifiers}"));
        }

        if details.is_empty() {
            node.readable_type_name
        } else {
            format!("{} ({})", node.readable_type_name, details.join(", "))
        }
    }

    /// Full reconstructed hierarchy rooted at `root`.
    #[must_use]
    pub fn hierarchy(&self, root: &dyn Reflect) -> Node
    {
        HierarchyBuilder::new(&self.registry)
            .with_max_depth(self.max_depth)
            .build(root)
    }

    /// Flattened set of all backing elements anywhere in the subtree.
    #[must_use]
    pub fn native_elements(&self, root: &dyn Reflect) -> Vec<BackingElementRef>
    {
        let mut elements = Vec::new();
        collect_elements(&self.hierarchy(root), &mut elements);
        elements
    }

    /// Whether a native element was produced by the managed framework.
    ///
    /// Checks the registry first; unregistered elements fall back to the
    /// class name heuristic.
    #[must_use]
    pub fn is_framework_produced(&self, element: &Arc<NativeElement>) -> bool
    {
        self.registry.lookup(element) || classify::is_framework_backed_element_name(&element.class_name)
    }

    /// One aggregated record combining every query for `root`.
    #[must_use]
    pub fn debug_info(&self, root: &dyn Reflect) -> DebugReport
    {
        let hierarchy = self.hierarchy(root);
        let mut native_elements = Vec::new();
        collect_elements(&hierarchy, &mut native_elements);

        DebugReport {
            type_name: root.raw_type_identifier(),
            description: self.describe(root),
            hierarchy,
            native_elements,
        }
    }
}

fn collect_elements(node: &Node, out: &mut Vec<BackingElementRef>)
{
    out.extend(node.backing_elements.iter().cloned());
    for child in &node.children {
        collect_elements(child, out);
    }
}
