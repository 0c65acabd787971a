//! Signature normalization for stub synthesis.
//!
//! Normalization turns a captured [`HookTarget`] into the canonical
//! [`NormalizedSignature`] a synthesized stub must carry: declared
//! primitives pass through, reference types erase to the generic object
//! descriptor, instance-bound callables (instance methods and
//! constructors) gain one leading object descriptor for the receiver, and
//! constructors force a no-value return. Normalization is total and
//! idempotent; it has no failure modes.

use std::fmt;

use crate::{
    runtime::HookTarget,
    signature::{descriptor_string, encode, encode_many, Descriptor},
};

/// The canonical erased calling signature of a hook target.
///
/// Both entry points of a synthesized stub must carry descriptors
/// identical to this signature; the hook controller treats any mismatch
/// as a fatal binding error.
///
/// Displays as a `(parameters)return` descriptor string, e.g. `(LI)V`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedSignature {
    params: Vec<Descriptor>,
    ret: Descriptor,
}

impl NormalizedSignature {
    /// Assemble a signature from raw descriptors.
    ///
    /// Stub synthesizers use this to tag the entry points they generate;
    /// signatures for captured targets come from [`normalize`].
    #[must_use]
    pub fn new(params: Vec<Descriptor>, ret: Descriptor) -> Self {
        NormalizedSignature { params, ret }
    }

    /// The parameter descriptors, receiver first for instance-bound
    /// targets.
    #[must_use]
    pub fn parameters(&self) -> &[Descriptor] {
        &self.params
    }

    /// The return descriptor.
    #[must_use]
    pub fn return_descriptor(&self) -> Descriptor {
        self.ret
    }

    /// Number of parameter slots, including the receiver slot if present.
    #[must_use]
    pub fn parameter_count(&self) -> usize {
        self.params.len()
    }
}

impl fmt::Display for NormalizedSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&descriptor_string(&self.params, self.ret))
    }
}

/// Normalize a captured target into its erased calling signature.
///
/// 1. Each declared parameter is encoded: primitives keep their distinct
///    descriptors, references erase to [`Descriptor::Object`].
/// 2. Instance-bound targets gain one leading [`Descriptor::Object`]
///    receiver slot at position 0.
/// 3. The return descriptor is the encoded declared return type;
///    constructors always normalize to [`Descriptor::Void`].
///
/// # Examples
///
/// ```rust
/// use hookscope::runtime::{HookTarget, RuntimeType};
/// use hookscope::signature::normalize;
///
/// // static int add(int, int)  ->  (II)I
/// let add = HookTarget::static_method(
///     "Calculator",
///     "add",
///     vec![RuntimeType::Int, RuntimeType::Int],
///     RuntimeType::Int,
/// );
/// assert_eq!(normalize(&add).to_string(), "(II)I");
///
/// // Widget(int)  ->  (LI)V
/// let ctor = HookTarget::constructor("Widget", vec![RuntimeType::Int]);
/// assert_eq!(normalize(&ctor).to_string(), "(LI)V");
/// ```
#[must_use]
pub fn normalize(target: &HookTarget) -> NormalizedSignature {
    let declared = target.parameters();

    let mut params = Vec::with_capacity(declared.len() + 1);
    if target.is_instance_bound() {
        params.push(Descriptor::Object);
    }
    params.extend(encode_many(declared));

    let ret = match target.return_type() {
        Some(ty) => encode(ty),
        None => Descriptor::Void,
    };

    NormalizedSignature { params, ret }
}
