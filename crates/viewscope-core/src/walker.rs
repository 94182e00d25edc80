//! Reflective member enumeration.
//!
//! [`children`] turns an arbitrary reflected value into an ordered list of
//! (label, value) members, smoothing over the wrapper shapes the framework
//! synthesizes: optionals are unwrapped one level (`Nil` for empty),
//! collections are summarized by count instead of enumerated, and tuple-like
//! containers are flattened one level so their real children show through.
//! Enumeration is read-only and never mutates the inspected value.

use crate::reflect::{Reflect, Structure};

/// One structural member discovered on a value.
pub struct Member<'a>
{
    /// Member label, if the runtime exposes one. Flattened tuple elements
    /// carry no label.
    pub label: Option<String>,
    /// The member's value, already normalized.
    pub value: MemberValue<'a>,
}

/// Normalized member value.
#[derive(Clone, Copy)]
pub enum MemberValue<'a>
{
    /// A real child object.
    Object(&'a dyn Reflect),
    /// An empty optional.
    Nil,
    /// A collection, reduced to its length.
    Collection
    {
        /// Number of elements.
        len: usize,
    },
}

/// Enumerate the structural members of a value in discovery order.
///
/// Values that cannot be decomposed (scalars, opaque leaves, collections)
/// yield no members; the caller treats them as leaves.
#[must_use]
pub fn children(value: &dyn Reflect) -> Vec<Member<'_>>
{
    match value.structure() {
        Structure::Composite(fields) => fields
            .into_iter()
            .flat_map(|field| members_for(field.label, field.value))
            .collect(),
        Structure::Tuple(elements) => elements
            .into_iter()
            .flat_map(|element| members_for(None, element))
            .collect(),
        // Unwrap one optional level at the root too.
        Structure::Optional(Some(inner)) => children(inner),
        Structure::Optional(None) | Structure::Scalar(_) | Structure::Collection { .. } | Structure::Opaque => Vec::new(),
    }
}

/// Normalize one discovered member, flattening wrapper shapes one level.
fn members_for<'a>(label: Option<String>, value: &'a dyn Reflect) -> Vec<Member<'a>>
{
    match value.structure() {
        Structure::Optional(None) => vec![Member {
            label,
            value: MemberValue::Nil,
        }],
        Structure::Optional(Some(inner)) => vec![Member {
            label,
            value: MemberValue::Object(inner),
        }],
        Structure::Collection { len } => vec![Member {
            label,
            value: MemberValue::Collection { len },
        }],
        Structure::Tuple(elements) => elements
            .into_iter()
            .map(|element| Member {
                label: None,
                value: MemberValue::Object(element),
            })
            .collect(),
        Structure::Scalar(_) | Structure::Composite(_) | Structure::Opaque => vec![Member {
            label,
            value: MemberValue::Object(value),
        }],
    }
}
