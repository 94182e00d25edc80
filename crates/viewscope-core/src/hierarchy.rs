//! Hierarchy reconstruction.
//!
//! [`HierarchyBuilder`] walks a reflected view tree and materializes a
//! [`Node`] per managed view: readable type, attribute descriptions, a state
//! summary pulled from storage naming conventions, the applied modifier for
//! wrapper types, recursive children, and any backing elements the registry
//! associates with the view. Building is read-only with respect to the
//! inspected object and always terminates: a path-based cycle guard stops
//! self-referential composites and a depth cap bounds pathological nesting.

use std::fmt;

use smallvec::SmallVec;
use tracing::debug;

use crate::classify;
use crate::demangle::demangle;
use crate::reflect::{NodeIdentity, Reflect, Structure};
use crate::registry::{BackingElementRef, BackingElementRegistry};
use crate::walker::{self, Member, MemberValue};

/// Recursion cap for hierarchy building. Deeper views are truncated, never
/// followed.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// How a node entered the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind
{
    /// A managed view that was fully inspected.
    View,
    /// Placeholder for a view whose identity already appears on the current
    /// root-to-node path.
    Cycle,
    /// Placeholder for a subtree beyond the depth cap.
    Truncated,
}

/// One position in the reconstructed view hierarchy.
///
/// Transient and traversal-local: created fresh per inspection call, owned by
/// the caller, never mutated after construction.
#[derive(Debug, Clone)]
pub struct Node
{
    /// Type identifier exactly as the runtime produced it.
    pub raw_type_identifier: String,
    /// Demangled, human-facing type name.
    pub readable_type_name: String,
    /// Attribute descriptions in discovery order.
    pub attributes: Vec<(String, String)>,
    /// Members whose labels follow state/binding storage conventions,
    /// rendered as `label: value` and joined with `, `.
    pub state_summary: Option<String>,
    /// Readable name of the applied modifier, for modifier wrapper types.
    pub modifier_summary: Option<String>,
    /// Child views in discovery order.
    pub children: Vec<Node>,
    /// Snapshots of native elements produced for this view.
    pub backing_elements: Vec<BackingElementRef>,
    /// Whether this is a real view or a guard placeholder.
    pub kind: NodeKind,
}

impl Node
{
    fn placeholder(raw: String, readable: String, kind: NodeKind) -> Self
    {
        Self {
            raw_type_identifier: raw,
            readable_type_name: readable,
            attributes: Vec::new(),
            state_summary: None,
            modifier_summary: None,
            children: Vec::new(),
            backing_elements: Vec::new(),
            kind,
        }
    }

    fn label_line(&self) -> String
    {
        match self.kind {
            NodeKind::View => self.readable_type_name.clone(),
            NodeKind::Cycle => format!("{} (cycle)", self.readable_type_name),
            NodeKind::Truncated => format!("{} (truncated)", self.readable_type_name),
        }
    }

    fn render(&self, f: &mut fmt::Formatter<'_>, prefix: &str) -> fmt::Result
    {
        for (index, child) in self.children.iter().enumerate() {
            let last = index + 1 == self.children.len();
            let connector = if last { "└─" } else { "├─" };
            writeln!(f, "{prefix}{connector} {}", child.label_line())?;
            let child_prefix = format!("{prefix}{}", if last { "   " } else { "│  " });
            child.render(f, &child_prefix)?;
        }
        Ok(())
    }
}

impl fmt::Display for Node
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        writeln!(f, "{}", self.label_line())?;
        self.render(f, "")
    }
}

type IdentityPath = SmallVec<[NodeIdentity; 16]>;

/// Recursive combinator over the walker, classifier, demangler and registry.
pub struct HierarchyBuilder<'a>
{
    registry: &'a BackingElementRegistry,
    max_depth: usize,
}

impl<'a> HierarchyBuilder<'a>
{
    /// Builder reading backing element associations from `registry`.
    #[must_use]
    pub fn new(registry: &'a BackingElementRegistry) -> Self
    {
        Self {
            registry,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Override the recursion cap.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self
    {
        self.max_depth = max_depth;
        self
    }

    /// Reconstruct the hierarchy rooted at `root`.
    ///
    /// Total: every input yields a tree; unrecognized structures become
    /// leaves, cycles and over-deep subtrees become placeholder nodes.
    #[must_use]
    pub fn build(&self, root: &dyn Reflect) -> Node
    {
        let mut path = IdentityPath::new();
        self.build_node(root, 0, &mut path)
    }

    fn build_node(&self, value: &dyn Reflect, depth: usize, path: &mut IdentityPath) -> Node
    {
        let raw = value.raw_type_identifier();
        let readable = demangle(&raw);

        if depth >= self.max_depth {
            debug!(type_name = %readable, depth, "depth cap reached, truncating subtree");
            return Node::placeholder(raw, readable, NodeKind::Truncated);
        }

        let identity = NodeIdentity::of(value);
        if path.contains(&identity) {
            debug!(type_name = %readable, "cycle detected, inserting placeholder");
            return Node::placeholder(raw, readable, NodeKind::Cycle);
        }

        let members = walker::children(value);

        let mut attributes = Vec::new();
        let mut state_parts: Vec<String> = Vec::new();
        for member in &members {
            if let Some(label) = &member.label {
                let description = describe_member(&member.value);
                if is_state_label(label) {
                    state_parts.push(format!("{label}: {description}"));
                }
                attributes.push((label.clone(), description));
            }
        }

        let modifier_summary = modifier_summary(&raw, &members);

        path.push(identity);
        let mut children = Vec::new();
        for member in &members {
            let MemberValue::Object(child) = member.value else {
                continue;
            };
            if classify::is_framework_type(child) {
                children.push(self.build_node(child, depth + 1, path));
                continue;
            }
            // Not a view itself; unwrap one level in case it is a container
            // hiding the real children before giving up on the branch.
            for nested in walker::children(child) {
                if let MemberValue::Object(grandchild) = nested.value {
                    if classify::is_framework_type(grandchild) {
                        children.push(self.build_node(grandchild, depth + 1, path));
                    }
                }
            }
        }
        path.pop();

        let backing_elements = self
            .registry
            .elements_produced(identity)
            .iter()
            .map(|element| BackingElementRef::snapshot(element))
            .collect();

        Node {
            raw_type_identifier: raw,
            readable_type_name: readable,
            attributes,
            state_summary: (!state_parts.is_empty()).then(|| state_parts.join(", ")),
            modifier_summary,
            children,
            backing_elements,
            kind: NodeKind::View,
        }
    }
}

/// Whether a member label follows the framework's state/binding storage
/// naming conventions.
fn is_state_label(label: &str) -> bool
{
    label.starts_with('_') || label.contains("state") || label.contains("binding")
}

/// Readable name of the `modifier` member for modifier wrapper types.
fn modifier_summary(raw_type: &str, members: &[Member<'_>]) -> Option<String>
{
    if !raw_type.contains("ModifiedContent") {
        return None;
    }
    members.iter().find_map(|member| match (&member.label, &member.value) {
        (Some(label), MemberValue::Object(modifier)) if label == "modifier" => {
            Some(demangle(&modifier.raw_type_identifier()))
        }
        _ => None,
    })
}

/// Render one member value for display.
fn describe_member(value: &MemberValue<'_>) -> String
{
    match value {
        MemberValue::Nil => "nil".to_string(),
        MemberValue::Collection { len } => format!("[{len} items]"),
        MemberValue::Object(object) => describe_value(*object),
    }
}

/// Description dispatch for a reflected value: scalars print literally,
/// optionals unwrap and recurse, collections summarize, everything else
/// falls back to its readable type name.
fn describe_value(value: &dyn Reflect) -> String
{
    match value.structure() {
        Structure::Scalar(scalar) => scalar.to_string(),
        Structure::Optional(None) => "nil".to_string(),
        Structure::Optional(Some(inner)) => describe_value(inner),
        Structure::Collection { len } => format!("[{len} items]"),
        Structure::Tuple(_) | Structure::Composite(_) | Structure::Opaque => demangle(&value.raw_type_identifier()),
    }
}
