//! Type name demangling.
//!
//! Runtime type identifiers arrive in three flavors: compiler-mangled class
//! names (`_TtCC7SwiftUI17HostingScrollView22PlatformGroupContainer`),
//! framework-internal spellings (`ModifiedContent<Text, _PaddingLayout>`),
//! and names that are already readable. [`demangle`] turns any of them into
//! a human-facing name and never fails: on unparseable input it degrades to
//! heuristic substring substitution, then to the literal identifier, and as
//! a last resort to a synthetic `UnknownType(...)` label.

use tracing::trace;

/// Marker that opens a mangled class name. The kind letters that follow
/// (`C` per nesting level) are skipped before segment parsing.
const MANGLED_MARKER: &str = "_Tt";

/// Module whose qualifier is stripped from readable names.
const FRAMEWORK_MODULE: &str = "SwiftUI";

/// Ordered substitution table mapping known internal type name fragments to
/// friendly labels. First match wins, so order is significant: more specific
/// fragments come before fragments they could shadow. Process-wide, immutable
/// configuration; every label is a fixed point of the table so repeated
/// demangling is stable.
pub const FRIENDLY_NAMES: &[(&str, &str)] = &[
    ("_ViewModifier_Content", "ViewModifier"),
    ("_ConditionalContent", "ConditionalView"),
    ("ModifiedContent", "ModifiedView"),
    ("UIShapeHitTestingView", "SwiftUI Shape Container"),
    ("UIKitSwiftUIView", "SwiftUI UIKit Bridge"),
    ("HostingScrollView", "SwiftUI Hosting ScrollView"),
    ("HostingView", "SwiftUI Hosting View"),
    ("SystemBackgroundView", "SwiftUI System Background"),
    ("PlatformGroupContainer", "SwiftUI Platform Group Container"),
    ("ListTableViewCell", "SwiftUI List Cell"),
    ("DisplayList", "SwiftUI Display List"),
    ("ScrollViewReader", "SwiftUI ScrollView Reader"),
    ("LazyVGrid", "SwiftUI LazyVGrid"),
    ("LazyHGrid", "SwiftUI LazyHGrid"),
    ("LazyVStack", "SwiftUI LazyVStack"),
    ("LazyHStack", "SwiftUI LazyHStack"),
    ("ViewHost", "SwiftUI View Host"),
    ("ContainerView", "SwiftUI Container View"),
    ("LayoutView", "SwiftUI Layout View"),
    ("ContentView", "SwiftUI Content View"),
    ("WrapperView", "SwiftUI Wrapper View"),
    ("BackgroundView", "SwiftUI Background View"),
];

/// Produce a human-readable name for a runtime type identifier.
///
/// Total: terminates and returns a non-empty string for every input,
/// including empty strings and byte garbage. Errors are never surfaced;
/// each parsing failure falls through to the next heuristic.
///
/// ```
/// use viewscope_core::demangle::demangle;
///
/// assert_eq!(
///     demangle("_TtCC7SwiftUI17HostingScrollView22PlatformGroupContainer"),
///     "HostingScrollView.PlatformGroupContainer",
/// );
/// assert_eq!(demangle("SwiftUI.VStack<TupleView<(Text, Text)>>"), "VStack");
/// ```
#[must_use]
pub fn demangle(identifier: &str) -> String
{
    if let Some(readable) = parse_mangled(identifier) {
        return readable;
    }
    fallback(identifier)
}

/// Parse a `_Tt`-mangled class name into a dotted readable name.
///
/// Grammar: marker, kind letters, then length-prefixed segments — a greedy
/// run of decimal digits followed by exactly that many bytes of name text,
/// repeated for each nesting scope (module, outer class, inner class...).
/// The greedy digit scan means a type name that itself begins with digits is
/// inherently ambiguous; that behavior is inherited from the source grammar
/// and kept as-is.
///
/// Returns `None` on any structural problem (declared length past the end of
/// input, trailing garbage, fewer than two segments) so the caller can fall
/// back instead of guessing.
fn parse_mangled(identifier: &str) -> Option<String>
{
    let rest = identifier.strip_prefix(MANGLED_MARKER)?;
    let rest = rest.trim_start_matches(|c: char| c.is_ascii_uppercase());

    let mut segments: Vec<&str> = Vec::new();
    let mut input = rest;
    while input.starts_with(|c: char| c.is_ascii_digit()) {
        let digits_end = input.find(|c: char| !c.is_ascii_digit()).unwrap_or(input.len());
        let declared: usize = input[..digits_end].parse().ok()?;
        let body = &input[digits_end..];
        if declared == 0 || declared > body.len() || !body.is_char_boundary(declared) {
            trace!(raw = identifier, declared, "mangled segment length exceeds input, falling back");
            return None;
        }
        segments.push(&body[..declared]);
        input = &body[declared..];
    }

    // Anything left over that is not another segment means the identifier is
    // not in the form we understand.
    if !input.is_empty() || segments.len() < 2 {
        return None;
    }

    // For framework classes the marker carries the module segment, so the
    // readable name drops it. Foreign modules stay as a qualifier.
    let classes = if segments[0] == FRAMEWORK_MODULE {
        &segments[1..]
    } else {
        &segments[..]
    };

    if classes.len() == 1 {
        return Some(substitute(classes[0]).unwrap_or_else(|| classes[0].to_string()));
    }
    Some(classes.join("."))
}

/// First matching friendly-table rule, if any.
fn substitute(name: &str) -> Option<String>
{
    FRIENDLY_NAMES
        .iter()
        .find(|(fragment, _)| name.contains(fragment))
        .map(|(_, label)| (*label).to_string())
}

/// Best-effort readable name for a non-mangled identifier.
fn fallback(identifier: &str) -> String
{
    if let Some(label) = substitute(identifier) {
        return label;
    }

    let stripped = identifier
        .strip_prefix(FRAMEWORK_MODULE)
        .and_then(|rest| rest.strip_prefix('.'))
        .unwrap_or(identifier);
    let stripped = stripped.find('<').map_or(stripped, |at| &stripped[..at]);
    let stripped = stripped.trim();

    if stripped.is_empty() {
        trace!(raw = identifier, "identifier unusable, emitting synthetic label");
        return format!("UnknownType({identifier})");
    }
    stripped.to_string()
}
