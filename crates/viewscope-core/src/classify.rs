//! Heuristic framework-type classification.
//!
//! The managed framework synthesizes new composite types per view
//! composition, so its type universe is open-ended and an exhaustive enum is
//! impossible. Classification is a deliberate over-approximation: a
//! module-prefix check plus substring matching against a table of known
//! container and primitive fragments. False positives (over-inclusion of
//! ambiguous names) are acceptable; false negatives are a documented
//! limitation and are not silently corrected.

use crate::demangle::demangle;
use crate::reflect::Reflect;

/// Module prefix that marks a type as framework-owned.
const FRAMEWORK_MODULE: &str = "SwiftUI";

/// Known container/primitive type name fragments. Any type whose raw or
/// demangled name contains one of these is treated as framework-owned.
/// Append-only configuration; order is not significant for membership.
pub const FRAMEWORK_TYPE_FRAGMENTS: &[&str] = &[
    "Text",
    "Image",
    "Button",
    "VStack",
    "HStack",
    "ZStack",
    "List",
    "ScrollView",
    "NavigationView",
    "TabView",
    "Group",
    "ForEach",
    "ModifiedContent",
    "TupleView",
    "_ConditionalContent",
];

/// Native element class name fragments that indicate a framework-produced
/// rendering primitive. Used as a fallback when the registry has no entry
/// for an element.
pub const BACKED_ELEMENT_FRAGMENTS: &[&str] = &[
    "UIHostingView",
    "_UIHostingView",
    "SwiftUI",
    "HostingScrollView",
    "PlatformGroupContainer",
    "ListTableViewCell",
    "DisplayList",
];

/// Whether a type name belongs to the managed framework.
///
/// Generic parameter suffixes do not affect the answer:
/// `VStack<TupleView<(Text, Text)>>` classifies true on the `VStack`
/// fragment alone.
#[must_use]
pub fn is_framework_type_name(name: &str) -> bool
{
    if name.contains(FRAMEWORK_MODULE) {
        return true;
    }
    let readable = demangle(name);
    matches_fragment(name) || matches_fragment(&readable) || readable.contains(FRAMEWORK_MODULE)
}

/// Whether a reflected value's runtime type belongs to the managed framework.
#[must_use]
pub fn is_framework_type(value: &dyn Reflect) -> bool
{
    is_framework_type_name(&value.raw_type_identifier())
}

/// Whether a native element class name looks framework-produced.
#[must_use]
pub fn is_framework_backed_element_name(class_name: &str) -> bool
{
    BACKED_ELEMENT_FRAGMENTS.iter().any(|fragment| class_name.contains(fragment))
}

fn matches_fragment(name: &str) -> bool
{
    FRAMEWORK_TYPE_FRAGMENTS.iter().any(|fragment| name.contains(fragment))
}
