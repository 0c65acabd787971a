//! Calling-convention descriptor encoding.
//!
//! Every declared type collapses to exactly one single-letter descriptor:
//! the eight primitive categories and `void` keep distinct tags, and every
//! reference type shares the generic object tag. This erasure is what lets
//! one synthesized stub serve every reference-typed overload of a shape -
//! stubs only vary per primitive-type combination.
//!
//! Encoding is a closed lookup with a defined fallback: it is total, pure
//! and has no failure modes.

use std::fmt;

use strum::{EnumCount, EnumIter};

use crate::runtime::RuntimeType;

/// Single-letter calling-convention descriptor for one type.
///
/// The descriptor set is closed: eight primitive tags, the no-value tag
/// and the generic object tag. [`Descriptor::code`] returns the stable
/// character used in signature strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumCount, EnumIter)]
pub enum Descriptor {
    /// 32-bit signed integer (`I`)
    Int,
    /// Boolean (`Z`)
    Boolean,
    /// Character (`C`)
    Char,
    /// 64-bit signed integer (`J`)
    Long,
    /// 16-bit signed integer (`S`)
    Short,
    /// 32-bit floating point (`F`)
    Float,
    /// 64-bit floating point (`D`)
    Double,
    /// 8-bit signed integer (`B`)
    Byte,
    /// No value (`V`)
    Void,
    /// Any reference type (`L`)
    Object,
}

impl Descriptor {
    /// The stable single-character code of this descriptor.
    #[must_use]
    pub fn code(self) -> char {
        match self {
            Descriptor::Int => 'I',
            Descriptor::Boolean => 'Z',
            Descriptor::Char => 'C',
            Descriptor::Long => 'J',
            Descriptor::Short => 'S',
            Descriptor::Float => 'F',
            Descriptor::Double => 'D',
            Descriptor::Byte => 'B',
            Descriptor::Void => 'V',
            Descriptor::Object => 'L',
        }
    }

    /// Check if this is a primitive category (the generic object tag is
    /// the only non-primitive).
    #[must_use]
    pub fn is_primitive(self) -> bool {
        !matches!(self, Descriptor::Object)
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Encode a declared type to its calling-convention descriptor.
///
/// Total over every well-formed [`RuntimeType`]: primitives map to their
/// distinct tags, every reference type maps to [`Descriptor::Object`].
///
/// # Examples
///
/// ```rust
/// use hookscope::runtime::RuntimeType;
/// use hookscope::signature::{encode, Descriptor};
///
/// assert_eq!(encode(&RuntimeType::Int), Descriptor::Int);
/// assert_eq!(encode(&RuntimeType::reference("java.lang.String")), Descriptor::Object);
/// ```
#[must_use]
pub fn encode(ty: &RuntimeType) -> Descriptor {
    match ty {
        RuntimeType::Int => Descriptor::Int,
        RuntimeType::Boolean => Descriptor::Boolean,
        RuntimeType::Char => Descriptor::Char,
        RuntimeType::Long => Descriptor::Long,
        RuntimeType::Short => Descriptor::Short,
        RuntimeType::Float => Descriptor::Float,
        RuntimeType::Double => Descriptor::Double,
        RuntimeType::Byte => Descriptor::Byte,
        RuntimeType::Void => Descriptor::Void,
        RuntimeType::Reference(_) => Descriptor::Object,
    }
}

/// Encode an ordered list of declared types.
///
/// Preserves input order and length.
#[must_use]
pub fn encode_many(types: &[RuntimeType]) -> Vec<Descriptor> {
    types.iter().map(encode).collect()
}

/// Render a `(parameters)return` signature string from descriptors.
///
/// # Examples
///
/// ```rust
/// use hookscope::signature::{descriptor_string, Descriptor};
///
/// let rendered = descriptor_string(
///     &[Descriptor::Object, Descriptor::Int],
///     Descriptor::Void,
/// );
/// assert_eq!(rendered, "(LI)V");
/// ```
#[must_use]
pub fn descriptor_string(params: &[Descriptor], ret: Descriptor) -> String {
    let mut rendered = String::with_capacity(params.len() + 3);
    rendered.push('(');
    for descriptor in params {
        rendered.push(descriptor.code());
    }
    rendered.push(')');
    rendered.push(ret.code());
    rendered
}
