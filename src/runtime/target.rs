//! Captured hook targets and their declared calling surface.
//!
//! A [`HookTarget`] is the immutable description of the callable being
//! intercepted: its declaring type, name, binding mode, modifier flags and
//! the ordered list of declared parameter types. Targets are constructed by
//! the embedder from whatever reflection or introspection facility the host
//! runtime offers; this crate never performs introspection itself, it only
//! consumes the resulting type lists.
//!
//! # Key Types
//! - [`HookTarget`]: The callable being intercepted
//! - [`TargetKind`]: Static method, instance method or constructor
//! - [`TargetFlags`]: Access and implementation modifier bits
//! - [`RuntimeType`]: Declared type of a parameter or return value

use std::fmt;

use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    /// Access and implementation modifiers of a captured callable.
    ///
    /// The bit values follow the modifier encoding most managed runtimes
    /// expose through reflection, so embedders can usually pass the raw
    /// modifier word straight through [`TargetFlags::from_bits_truncate`].
    pub struct TargetFlags: u32 {
        /// Callable is publicly accessible
        const PUBLIC = 0x0001;
        /// Callable is private to its declaring type
        const PRIVATE = 0x0002;
        /// Callable is visible to the declaring type and subtypes
        const PROTECTED = 0x0004;
        /// Callable is static (no receiver)
        const STATIC = 0x0008;
        /// Callable cannot be overridden
        const FINAL = 0x0010;
        /// Callable is synchronized by the runtime
        const SYNCHRONIZED = 0x0020;
        /// Callable accepts a variable argument tail
        const VARARGS = 0x0080;
        /// Callable body is native code
        const NATIVE = 0x0100;
        /// Callable has no body
        const ABSTRACT = 0x0400;
    }
}

/// Binding mode of a captured callable.
///
/// The binding mode decides whether the normalized signature gains an
/// implicit leading receiver parameter, and whether the declared return
/// type participates in normalization at all (constructors produce no
/// value).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    /// A static method; invocations carry no receiver.
    Static,
    /// An instance method; invocations carry the receiver first.
    Instance,
    /// A constructor; receiver-bound and always without a return value.
    Constructor,
}

impl TargetKind {
    /// True when invocations of this callable carry an implicit receiver.
    #[must_use]
    pub fn is_instance_bound(self) -> bool {
        !matches!(self, TargetKind::Static)
    }
}

/// Declared type of a parameter or return value.
///
/// The eight primitive categories and `void` are kept distinct; every
/// class, interface and array type is a [`RuntimeType::Reference`]. The
/// reference name is carried verbatim for diagnostics and identity only -
/// at the calling-convention level all references share one representation
/// and are erased during descriptor encoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RuntimeType {
    /// 32-bit signed integer
    Int,
    /// true/false value
    Boolean,
    /// 16-bit character
    Char,
    /// 64-bit signed integer
    Long,
    /// 16-bit signed integer
    Short,
    /// 32-bit floating point
    Float,
    /// 64-bit floating point
    Double,
    /// 8-bit signed integer
    Byte,
    /// No value
    Void,
    /// Any class, interface or array type, by fully-qualified name
    Reference(String),
}

impl RuntimeType {
    /// Convenience constructor for a reference type.
    pub fn reference(name: impl Into<String>) -> Self {
        RuntimeType::Reference(name.into())
    }

    /// Check if this is a primitive type (references are the only
    /// non-primitives).
    #[must_use]
    pub fn is_primitive(&self) -> bool {
        !matches!(self, RuntimeType::Reference(_))
    }
}

impl fmt::Display for RuntimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeType::Int => write!(f, "int"),
            RuntimeType::Boolean => write!(f, "boolean"),
            RuntimeType::Char => write!(f, "char"),
            RuntimeType::Long => write!(f, "long"),
            RuntimeType::Short => write!(f, "short"),
            RuntimeType::Float => write!(f, "float"),
            RuntimeType::Double => write!(f, "double"),
            RuntimeType::Byte => write!(f, "byte"),
            RuntimeType::Void => write!(f, "void"),
            RuntimeType::Reference(name) => f.write_str(name),
        }
    }
}

/// The callable being intercepted.
///
/// Captured once from the embedder and immutable afterwards. A target
/// identifies a method or constructor by declaring type, name and declared
/// signature; the [`identity`](HookTarget::identity) string is the key
/// under which at most one hook may be active.
///
/// # Examples
///
/// ```rust
/// use hookscope::runtime::{HookTarget, RuntimeType, TargetKind};
///
/// let target = HookTarget::instance_method(
///     "com.example.Widget",
///     "setName",
///     vec![RuntimeType::reference("java.lang.String")],
///     RuntimeType::Void,
/// );
///
/// assert_eq!(target.kind(), TargetKind::Instance);
/// assert_eq!(target.identity(), "com.example.Widget::setName(java.lang.String)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookTarget {
    declaring_type: String,
    name: String,
    kind: TargetKind,
    flags: TargetFlags,
    params: Vec<RuntimeType>,
    ret: Option<RuntimeType>,
}

impl HookTarget {
    /// Capture a static method target.
    pub fn static_method(
        declaring_type: impl Into<String>,
        name: impl Into<String>,
        params: Vec<RuntimeType>,
        ret: RuntimeType,
    ) -> Self {
        HookTarget {
            declaring_type: declaring_type.into(),
            name: name.into(),
            kind: TargetKind::Static,
            flags: TargetFlags::STATIC,
            params,
            ret: Some(ret),
        }
    }

    /// Capture an instance method target.
    pub fn instance_method(
        declaring_type: impl Into<String>,
        name: impl Into<String>,
        params: Vec<RuntimeType>,
        ret: RuntimeType,
    ) -> Self {
        HookTarget {
            declaring_type: declaring_type.into(),
            name: name.into(),
            kind: TargetKind::Instance,
            flags: TargetFlags::empty(),
            params,
            ret: Some(ret),
        }
    }

    /// Capture a constructor target.
    ///
    /// Constructors carry their declaring type as their name, produce no
    /// value, and are receiver-bound like instance methods.
    pub fn constructor(declaring_type: impl Into<String>, params: Vec<RuntimeType>) -> Self {
        let declaring_type = declaring_type.into();
        HookTarget {
            name: declaring_type.clone(),
            declaring_type,
            kind: TargetKind::Constructor,
            flags: TargetFlags::empty(),
            params,
            ret: None,
        }
    }

    /// Replace the modifier flags captured from the host runtime.
    ///
    /// The [`TargetFlags::STATIC`] bit is kept consistent with the binding
    /// mode the target was constructed with.
    #[must_use]
    pub fn with_flags(mut self, flags: TargetFlags) -> Self {
        self.flags = match self.kind {
            TargetKind::Static => flags | TargetFlags::STATIC,
            _ => flags - TargetFlags::STATIC,
        };
        self
    }

    /// The fully-qualified name of the declaring type.
    #[must_use]
    pub fn declaring_type(&self) -> &str {
        &self.declaring_type
    }

    /// The callable's own name (the declaring type's name for
    /// constructors).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The binding mode.
    #[must_use]
    pub fn kind(&self) -> TargetKind {
        self.kind
    }

    /// The captured modifier flags.
    #[must_use]
    pub fn flags(&self) -> TargetFlags {
        self.flags
    }

    /// The declared parameter types, in order, without any receiver.
    #[must_use]
    pub fn parameters(&self) -> &[RuntimeType] {
        &self.params
    }

    /// The declared return type; `None` for constructors.
    #[must_use]
    pub fn return_type(&self) -> Option<&RuntimeType> {
        self.ret.as_ref()
    }

    /// True for constructor targets.
    #[must_use]
    pub fn is_constructor(&self) -> bool {
        self.kind == TargetKind::Constructor
    }

    /// True when invocations of this target carry an implicit receiver.
    #[must_use]
    pub fn is_instance_bound(&self) -> bool {
        self.kind.is_instance_bound()
    }

    /// Stable identity string for this target.
    ///
    /// Formatted as `Declaring::name(param, ...)` using the declared (not
    /// erased) type names, so overloads get distinct identities. Used as
    /// the registry key and in every diagnostic this crate emits.
    #[must_use]
    pub fn identity(&self) -> String {
        use std::fmt::Write;

        let mut identity = String::with_capacity(
            self.declaring_type.len() + self.name.len() + 4 + self.params.len() * 8,
        );
        let _ = write!(identity, "{}::{}(", self.declaring_type, self.name);
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                identity.push_str(", ");
            }
            let _ = write!(identity, "{param}");
        }
        identity.push(')');
        identity
    }
}

impl fmt::Display for HookTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identity())
    }
}
