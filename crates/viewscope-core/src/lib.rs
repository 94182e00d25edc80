//! # viewscope-core
//!
//! Introspection engine for declarative (SwiftUI-style) view trees.
//!
//! Given an opaque tree of managed view objects, this crate:
//! - demangles compiler- and framework-internal type identifiers into
//!   readable names ([`demangle`])
//! - walks the object graph through a minimal reflection seam and
//!   reconstructs an annotated hierarchy ([`hierarchy`], [`walker`],
//!   [`classify`])
//! - associates managed views with the native rendering elements they
//!   materialize at runtime ([`registry`])
//! - exposes the combined result to an external debugger ([`inspector`])
//!
//! ## Degradation over failure
//!
//! The engine exists to aid debugging, so it must never crash the host: every
//! operation is total. Malformed mangled names demangle to best-effort
//! fallbacks, undecomposable values become leaves, stale element references
//! read as "unknown", and cycles or over-deep graphs become placeholder
//! nodes. Nothing in the public surface returns an error.

pub mod classify;
pub mod demangle;
pub mod hierarchy;
pub mod inspector;
pub mod prelude;
pub mod reflect;
pub mod registry;
pub mod walker;

// Re-export commonly used types
pub use demangle::demangle;
pub use hierarchy::{HierarchyBuilder, Node, NodeKind};
pub use inspector::{DebugReport, Inspector};
pub use reflect::{NodeIdentity, Reflect};
pub use registry::{BackingElementRef, BackingElementRegistry, NativeElement};
