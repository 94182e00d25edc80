//! Common module for library exports

pub use crate::demangle::demangle;
pub use crate::hierarchy::{HierarchyBuilder, Node, NodeKind, DEFAULT_MAX_DEPTH};
pub use crate::inspector::{DebugReport, Inspector};
pub use crate::reflect::{Field, NodeIdentity, Reflect, Scalar, Structure};
pub use crate::registry::{BackingElementRef, BackingElementRegistry, NativeElement, Rect};
