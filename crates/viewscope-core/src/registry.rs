//! Backing element registry.
//!
//! The framework materializes native rendering primitives asynchronously,
//! typically shortly after a layout pass, and notifies the registry through
//! [`BackingElementRegistry::register`]. Hierarchy building reads the
//! registry synchronously, so reads and writes race by design; a mutex
//! around the internal map keeps every lookup from observing a
//! partially-written entry. Registration is rare relative to lookups, so the
//! brief blocking is acceptable.
//!
//! Entries hold [`Weak`] references: the registry never keeps a native
//! element alive, and an entry whose element has been destroyed by its real
//! owner is treated as absent (never as an error) and pruned opportunistically.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, Weak};

use once_cell::sync::Lazy;
use tracing::{debug, trace};

use crate::demangle::demangle;
use crate::reflect::NodeIdentity;

/// Rectangle in the native layer's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect
{
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect
{
    /// Construct from origin and size.
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self
    {
        Self { x, y, width, height }
    }
}

impl fmt::Display for Rect
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "{{{{{}, {}}}, {{{}, {}}}}}", self.x, self.y, self.width, self.height)
    }
}

/// A native rendering primitive, owned entirely by the host framework.
///
/// The registry and any [`BackingElementRef`] snapshots never extend its
/// lifetime.
#[derive(Debug, Clone)]
pub struct NativeElement
{
    /// Runtime class name, possibly mangled.
    pub class_name: String,
    /// Frame in the superlayer's coordinate space.
    pub frame: Rect,
    /// Bounds in the element's own coordinate space.
    pub bounds: Rect,
    /// Background color description, if any.
    pub background: Option<String>,
    /// Whether the element is hidden.
    pub hidden: bool,
    /// Opacity in `0.0..=1.0`.
    pub alpha: f64,
}

/// Geometry/visibility snapshot of a native element, attached to hierarchy
/// nodes. Plain data; taking a snapshot does not retain the element.
#[derive(Debug, Clone, PartialEq)]
pub struct BackingElementRef
{
    /// Runtime class name as reported by the native layer.
    pub class_name: String,
    /// Demangled, human-facing class name.
    pub readable_class_name: String,
    pub frame: Rect,
    pub bounds: Rect,
    pub background: Option<String>,
    pub hidden: bool,
    pub alpha: f64,
}

impl BackingElementRef
{
    /// Snapshot the element's current geometry and visibility.
    #[must_use]
    pub fn snapshot(element: &NativeElement) -> Self
    {
        Self {
            class_name: element.class_name.clone(),
            readable_class_name: demangle(&element.class_name),
            frame: element.frame,
            bounds: element.bounds,
            background: element.background.clone(),
            hidden: element.hidden,
            alpha: element.alpha,
        }
    }
}

/// Map key derived from the element allocation's address. A dead weak entry
/// under a reused address is detected by the liveness check, never by the
/// key alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct ElementKey(usize);

impl ElementKey
{
    fn of(element: &Arc<NativeElement>) -> Self
    {
        ElementKey(Arc::as_ptr(element) as usize)
    }
}

struct RegistryEntry
{
    element: Weak<NativeElement>,
    owner: NodeIdentity,
    framework_produced: bool,
}

/// Concurrency-safe side table mapping native elements to the managed node
/// that produced them.
///
/// Construct one per test for isolation, or share the process-wide instance
/// from [`BackingElementRegistry::global`]. All operations degrade to
/// negative results rather than failing: a poisoned lock or a stale entry
/// reads as "unknown".
#[derive(Default)]
pub struct BackingElementRegistry
{
    entries: Mutex<HashMap<ElementKey, RegistryEntry>>,
}

impl BackingElementRegistry
{
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self
    {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// The process-wide registry instance, created on first use and living
    /// for the life of the process.
    #[must_use]
    pub fn global() -> &'static Self
    {
        static GLOBAL: Lazy<BackingElementRegistry> = Lazy::new(BackingElementRegistry::new);
        &GLOBAL
    }

    /// Record that `element` was produced while materializing the managed
    /// node identified by `owner`.
    ///
    /// First observation wins; re-registering an element is a no-op. Safe to
    /// call concurrently with [`Self::lookup`] and
    /// [`Self::elements_produced`].
    pub fn register(&self, element: &Arc<NativeElement>, owner: NodeIdentity)
    {
        let Ok(mut entries) = self.entries.lock() else {
            return;
        };
        entries.entry(ElementKey::of(element)).or_insert_with(|| {
            debug!(class = %element.class_name, "registering backing element");
            RegistryEntry {
                element: Arc::downgrade(element),
                owner,
                framework_produced: true,
            }
        });
    }

    /// Whether `element` is registered as framework-produced.
    ///
    /// Returns `false` for unknown elements and for entries whose element has
    /// since been destroyed (the stale entry is pruned on the way out).
    #[must_use]
    pub fn lookup(&self, element: &Arc<NativeElement>) -> bool
    {
        let Ok(mut entries) = self.entries.lock() else {
            return false;
        };
        let key = ElementKey::of(element);
        match entries.get(&key) {
            Some(entry) if entry.element.strong_count() > 0 => entry.framework_produced,
            Some(_) => {
                trace!("pruning stale registry entry on lookup");
                entries.remove(&key);
                false
            }
            None => false,
        }
    }

    /// All live elements registered as produced by `owner`.
    ///
    /// Stale entries encountered along the way are pruned.
    #[must_use]
    pub fn elements_produced(&self, owner: NodeIdentity) -> Vec<Arc<NativeElement>>
    {
        let Ok(mut entries) = self.entries.lock() else {
            return Vec::new();
        };
        let mut produced = Vec::new();
        entries.retain(|_, entry| match entry.element.upgrade() {
            Some(element) => {
                if entry.owner == owner && entry.framework_produced {
                    produced.push(element);
                }
                true
            }
            None => {
                trace!("pruning stale registry entry");
                false
            }
        });
        produced
    }

    /// Number of live entries. Stale entries are pruned first.
    #[must_use]
    pub fn len(&self) -> usize
    {
        let Ok(mut entries) = self.entries.lock() else {
            return 0;
        };
        entries.retain(|_, entry| entry.element.strong_count() > 0);
        entries.len()
    }

    /// Whether the registry currently tracks no live elements.
    #[must_use]
    pub fn is_empty(&self) -> bool
    {
        self.len() == 0
    }
}
