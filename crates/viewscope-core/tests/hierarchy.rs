//! Tests for hierarchy reconstruction

use std::sync::Arc;

use viewscope_core::hierarchy::{HierarchyBuilder, NodeKind, DEFAULT_MAX_DEPTH};
use viewscope_core::reflect::{Field, NodeIdentity, Reflect, Structure};
use viewscope_core::registry::{BackingElementRegistry, NativeElement, Rect};

struct TextView
{
    label: String,
    counter: i64,
}

impl Reflect for TextView
{
    fn raw_type_identifier(&self) -> String
    {
        "SwiftUI.Text".to_string()
    }

    fn structure(&self) -> Structure<'_>
    {
        Structure::Composite(vec![
            Field {
                label: Some("_counter".into()),
                value: &self.counter,
            },
            Field {
                label: Some("label".into()),
                value: &self.label,
            },
        ])
    }
}

struct TuplePair
{
    first: TextView,
    second: TextView,
}

impl Reflect for TuplePair
{
    fn raw_type_identifier(&self) -> String
    {
        "SwiftUI.TupleView<(Text, Text)>".to_string()
    }

    fn structure(&self) -> Structure<'_>
    {
        Structure::Tuple(vec![&self.first, &self.second])
    }
}

struct Stack
{
    content: TuplePair,
}

impl Reflect for Stack
{
    fn raw_type_identifier(&self) -> String
    {
        "SwiftUI.VStack<TupleView<(Text, Text)>>".to_string()
    }

    fn structure(&self) -> Structure<'_>
    {
        Structure::Composite(vec![Field {
            label: Some("content".into()),
            value: &self.content,
        }])
    }
}

struct PaddingModifier;

impl Reflect for PaddingModifier
{
    fn raw_type_identifier(&self) -> String
    {
        "SwiftUI._PaddingLayout".to_string()
    }

    fn structure(&self) -> Structure<'_>
    {
        Structure::Opaque
    }
}

struct ModifiedText
{
    content: TextView,
    modifier: PaddingModifier,
}

impl Reflect for ModifiedText
{
    fn raw_type_identifier(&self) -> String
    {
        "SwiftUI.ModifiedContent<Text, _PaddingLayout>".to_string()
    }

    fn structure(&self) -> Structure<'_>
    {
        Structure::Composite(vec![
            Field {
                label: Some("content".into()),
                value: &self.content,
            },
            Field {
                label: Some("modifier".into()),
                value: &self.modifier,
            },
        ])
    }
}

/// A composite whose only member is itself.
struct SelfReferential;

impl Reflect for SelfReferential
{
    fn raw_type_identifier(&self) -> String
    {
        "SwiftUI.RecursiveContainer".to_string()
    }

    fn structure(&self) -> Structure<'_>
    {
        Structure::Composite(vec![Field {
            label: Some("content".into()),
            value: self,
        }])
    }
}

struct ChainLink
{
    next: Option<Box<ChainLink>>,
}

impl Reflect for ChainLink
{
    fn raw_type_identifier(&self) -> String
    {
        "SwiftUI.ChainLink".to_string()
    }

    fn structure(&self) -> Structure<'_>
    {
        match &self.next {
            Some(next) => Structure::Composite(vec![Field {
                label: Some("content".into()),
                value: &**next,
            }]),
            None => Structure::Opaque,
        }
    }
}

fn nested_chain(depth: usize) -> ChainLink
{
    (0..depth).fold(ChainLink { next: None }, |inner, _| ChainLink {
        next: Some(Box::new(inner)),
    })
}

fn sample_text() -> TextView
{
    TextView {
        label: "Hello".into(),
        counter: 42,
    }
}

#[test]
fn attributes_and_state_summary_follow_conventions()
{
    let registry = BackingElementRegistry::new();
    let view = sample_text();
    let node = HierarchyBuilder::new(&registry).build(&view);

    assert_eq!(node.readable_type_name, "Text");
    assert_eq!(node.kind, NodeKind::View);

    let label_attribute = node
        .attributes
        .iter()
        .find(|(label, _)| label == "label")
        .expect("label attribute present");
    assert_eq!(label_attribute.1, "\"Hello\"");

    let state = node.state_summary.expect("underscore-prefixed member collected");
    assert!(state.contains("_counter: 42"));
}

#[test]
fn tuple_content_flattens_into_children()
{
    let registry = BackingElementRegistry::new();
    let stack = Stack {
        content: TuplePair {
            first: sample_text(),
            second: sample_text(),
        },
    };

    let node = HierarchyBuilder::new(&registry).build(&stack);
    assert_eq!(node.readable_type_name, "VStack");
    assert_eq!(node.children.len(), 2);
    assert!(node.children.iter().all(|child| child.readable_type_name == "Text"));
}

#[test]
fn modifier_wrapper_reports_its_modifier()
{
    let registry = BackingElementRegistry::new();
    let view = ModifiedText {
        content: sample_text(),
        modifier: PaddingModifier,
    };

    let node = HierarchyBuilder::new(&registry).build(&view);
    assert_eq!(node.readable_type_name, "ModifiedView");
    assert_eq!(node.modifier_summary.as_deref(), Some("_PaddingLayout"));
    assert_eq!(node.children[0].readable_type_name, "Text");
}

#[test]
fn self_referential_composites_terminate_with_a_cycle_placeholder()
{
    let registry = BackingElementRegistry::new();
    let view = SelfReferential;

    let node = HierarchyBuilder::new(&registry).build(&view);
    assert_eq!(node.kind, NodeKind::View);
    assert_eq!(node.children.len(), 1);
    assert_eq!(node.children[0].kind, NodeKind::Cycle);
    assert!(node.children[0].children.is_empty());
}

#[test]
fn deep_chains_truncate_at_the_depth_cap()
{
    let registry = BackingElementRegistry::new();
    let chain = nested_chain(1000);

    let root = HierarchyBuilder::new(&registry).build(&chain);

    let mut depth = 0;
    let mut node = &root;
    while let Some(child) = node.children.first() {
        node = child;
        depth += 1;
    }

    assert_eq!(depth, DEFAULT_MAX_DEPTH);
    assert_eq!(node.kind, NodeKind::Truncated);
}

#[test]
fn a_smaller_depth_cap_is_honored()
{
    let registry = BackingElementRegistry::new();
    let chain = nested_chain(10);

    let root = HierarchyBuilder::new(&registry).with_max_depth(3).build(&chain);

    let mut depth = 0;
    let mut node = &root;
    while let Some(child) = node.children.first() {
        node = child;
        depth += 1;
    }

    assert_eq!(depth, 3);
    assert_eq!(node.kind, NodeKind::Truncated);
}

#[test]
fn registered_backing_elements_attach_to_their_node()
{
    let registry = BackingElementRegistry::new();
    let view = sample_text();

    let element = Arc::new(NativeElement {
        class_name: "_TtC7SwiftUI11HostingView".into(),
        frame: Rect::new(0.0, 0.0, 320.0, 44.0),
        bounds: Rect::new(0.0, 0.0, 320.0, 44.0),
        background: None,
        hidden: false,
        alpha: 1.0,
    });
    registry.register(&element, NodeIdentity::of(&view));

    let node = HierarchyBuilder::new(&registry).build(&view);
    assert_eq!(node.backing_elements.len(), 1);
    assert_eq!(node.backing_elements[0].readable_class_name, "SwiftUI Hosting View");
    assert_eq!(node.backing_elements[0].frame, Rect::new(0.0, 0.0, 320.0, 44.0));
}

#[test]
fn display_renders_an_indented_tree()
{
    let registry = BackingElementRegistry::new();
    let stack = Stack {
        content: TuplePair {
            first: sample_text(),
            second: sample_text(),
        },
    };

    let rendered = HierarchyBuilder::new(&registry).build(&stack).to_string();
    assert!(rendered.starts_with("VStack"));
    assert!(rendered.contains("├─ Text"));
    assert!(rendered.contains("└─ Text"));
}
