//! Reflection capability seam.
//!
//! The engine never learns the view framework's concrete types. Everything it
//! inspects enters through [`Reflect`], a minimal "children-of" capability:
//! a value reports its runtime type identifier and decomposes into one of a
//! handful of structural shapes. The rest of the pipeline (walker, classifier,
//! hierarchy builder) depends only on this trait, never on the framework.
//!
//! Framework adapters override [`Reflect::raw_type_identifier`] to surface the
//! runtime's real (often mangled) type names; plain Rust values fall back to
//! `std::any::type_name_of_val`.

use std::fmt;

/// A value the engine can inspect.
///
/// Implementations must be side-effect free: reflecting a value never mutates
/// it, and repeated calls return the same structure.
pub trait Reflect
{
    /// Runtime type identifier as the producing framework reports it.
    ///
    /// May be a compiler-mangled name (e.g. `_TtC7SwiftUI11HostingView`), a
    /// generic type spelling (`VStack<TupleView<...>>`), or anything else the
    /// runtime hands out. Feed it to [`crate::demangle::demangle`] for a
    /// human-readable form.
    fn raw_type_identifier(&self) -> String
    {
        std::any::type_name_of_val(self).to_string()
    }

    /// Decompose this value into its structural shape.
    fn structure(&self) -> Structure<'_>;
}

/// Structural shape of a reflected value.
pub enum Structure<'a>
{
    /// Leaf scalar, printed literally.
    Scalar(Scalar),
    /// Optional wrapper; `None` renders as `nil`.
    Optional(Option<&'a dyn Reflect>),
    /// Homogeneous collection. Only the length is exposed so a long list
    /// never blows up the output.
    Collection
    {
        /// Number of elements.
        len: usize,
    },
    /// Tuple-like synthetic container. The walker flattens one level to
    /// expose the real children.
    Tuple(Vec<&'a dyn Reflect>),
    /// Labeled structural members.
    Composite(Vec<Field<'a>>),
    /// Cannot be decomposed further.
    Opaque,
}

/// One labeled structural member of a composite value.
pub struct Field<'a>
{
    /// Member label, if the runtime exposes one.
    pub label: Option<String>,
    /// The member value.
    pub value: &'a dyn Reflect,
}

/// A scalar leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar
{
    /// String value; rendered quoted.
    Str(String),
    /// Boolean; rendered `true`/`false`.
    Bool(bool),
    /// Signed integer; rendered verbatim.
    Int(i64),
    /// Unsigned integer; rendered verbatim.
    Uint(u64),
    /// Floating point; rendered verbatim.
    Float(f64),
}

impl fmt::Display for Scalar
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self {
            Scalar::Str(value) => write!(f, "\"{value}\""),
            Scalar::Bool(value) => write!(f, "{value}"),
            Scalar::Int(value) => write!(f, "{value}"),
            Scalar::Uint(value) => write!(f, "{value}"),
            Scalar::Float(value) => write!(f, "{value}"),
        }
    }
}

/// Identity of an inspected object within one traversal.
///
/// Derived from the object's address, matching how the producing framework
/// identifies live objects. An identity is only meaningful while the object
/// stays alive and in place; it is used for the cycle guard on the current
/// root-to-node path and as the owner key in the backing element registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeIdentity(usize);

impl NodeIdentity
{
    /// Identity of a reflected value.
    #[must_use]
    pub fn of(value: &dyn Reflect) -> Self
    {
        NodeIdentity((value as *const dyn Reflect).cast::<()>() as usize)
    }
}

impl Reflect for String
{
    fn structure(&self) -> Structure<'_>
    {
        Structure::Scalar(Scalar::Str(self.clone()))
    }
}

impl Reflect for &str
{
    fn structure(&self) -> Structure<'_>
    {
        Structure::Scalar(Scalar::Str((*self).to_string()))
    }
}

impl Reflect for bool
{
    fn structure(&self) -> Structure<'_>
    {
        Structure::Scalar(Scalar::Bool(*self))
    }
}

macro_rules! impl_reflect_scalar {
    ($($ty:ty => $variant:ident as $cast:ty),* $(,)?) => {
        $(
            impl Reflect for $ty
            {
                #[allow(clippy::cast_lossless, clippy::unnecessary_cast)]
                fn structure(&self) -> Structure<'_>
                {
                    Structure::Scalar(Scalar::$variant(*self as $cast))
                }
            }
        )*
    };
}

impl_reflect_scalar! {
    i8 => Int as i64,
    i16 => Int as i64,
    i32 => Int as i64,
    i64 => Int as i64,
    isize => Int as i64,
    u8 => Uint as u64,
    u16 => Uint as u64,
    u32 => Uint as u64,
    u64 => Uint as u64,
    usize => Uint as u64,
    f32 => Float as f64,
    f64 => Float as f64,
}

impl<T: Reflect> Reflect for Option<T>
{
    fn structure(&self) -> Structure<'_>
    {
        Structure::Optional(self.as_ref().map(|inner| inner as &dyn Reflect))
    }
}

impl<T: Reflect> Reflect for Vec<T>
{
    fn structure(&self) -> Structure<'_>
    {
        Structure::Collection { len: self.len() }
    }
}

impl<T: Reflect + ?Sized> Reflect for Box<T>
{
    fn raw_type_identifier(&self) -> String
    {
        self.as_ref().raw_type_identifier()
    }

    fn structure(&self) -> Structure<'_>
    {
        self.as_ref().structure()
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn scalar_display_quotes_strings()
    {
        assert_eq!(Scalar::Str("Hello".into()).to_string(), "\"Hello\"");
        assert_eq!(Scalar::Bool(true).to_string(), "true");
        assert_eq!(Scalar::Int(-3).to_string(), "-3");
        assert_eq!(Scalar::Float(42.5).to_string(), "42.5");
    }

    #[test]
    fn identity_is_stable_per_object()
    {
        let first = String::from("a");
        let second = String::from("b");
        assert_eq!(NodeIdentity::of(&first), NodeIdentity::of(&first));
        assert_ne!(NodeIdentity::of(&first), NodeIdentity::of(&second));
    }

    #[test]
    fn option_unwraps_to_inner_reference()
    {
        let value: Option<i32> = Some(7);
        match value.structure() {
            Structure::Optional(Some(_)) => {}
            _ => panic!("expected occupied optional"),
        }

        let empty: Option<i32> = None;
        match empty.structure() {
            Structure::Optional(None) => {}
            _ => panic!("expected empty optional"),
        }
    }
}
