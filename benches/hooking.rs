//! Benchmarks for hook signature derivation and installation.
//!
//! Tests the per-hook costs an embedder pays:
//! - Descriptor encoding of declared parameter lists
//! - Signature normalization (erasure + receiver insertion)
//! - The full installation protocol over no-op capabilities

extern crate hookscope;

use criterion::{criterion_group, criterion_main, Criterion};
use hookscope::prelude::*;
use std::hint::black_box;
use std::sync::{Arc, OnceLock};

/// Benchmark encoding a mixed primitive/reference parameter list.
fn bench_encode_many_mixed(c: &mut Criterion) {
    let types = vec![
        RuntimeType::Int,
        RuntimeType::reference("java.lang.String"),
        RuntimeType::Double,
        RuntimeType::Boolean,
        RuntimeType::reference("[I"),
    ];

    c.bench_function("sig_encode_many_mixed", |b| {
        b.iter(|| {
            let encoded = encode_many(black_box(&types));
            black_box(encoded)
        });
    });
}

/// Benchmark normalizing an instance method with reference erasure.
/// Signature: void setName(Object)  ->  (LL)V
fn bench_normalize_instance(c: &mut Criterion) {
    let target = HookTarget::instance_method(
        "com.example.Widget",
        "setName",
        vec![RuntimeType::reference("java.lang.Object")],
        RuntimeType::Void,
    );

    c.bench_function("sig_normalize_instance", |b| {
        b.iter(|| {
            let signature = normalize(black_box(&target));
            black_box(signature)
        });
    });
}

/// Benchmark normalizing a constructor.
/// Signature: Widget(int)  ->  (LI)V
fn bench_normalize_constructor(c: &mut Criterion) {
    let target = HookTarget::constructor("com.example.Widget", vec![RuntimeType::Int]);

    c.bench_function("sig_normalize_constructor", |b| {
        b.iter(|| {
            let signature = normalize(black_box(&target));
            black_box(signature)
        });
    });
}

struct NoopStub {
    entries: Vec<EntryPoint>,
    context: OnceLock<InterceptionContextRc>,
}

impl SynthesizedStub for NoopStub {
    fn entry(&self, name: &str) -> Option<EntryPoint> {
        self.entries.iter().find(|entry| entry.name() == name).cloned()
    }

    fn bind_context(
        &self,
        context: InterceptionContextRc,
    ) -> std::result::Result<(), ContextSlotError> {
        self.context
            .set(context)
            .map_err(|_| ContextSlotError("context slot already assigned".to_string()))
    }
}

struct NoopSynthesizer;

impl StubSynthesizer for NoopSynthesizer {
    fn build_stub(
        &self,
        return_descriptor: Descriptor,
        parameter_descriptors: &[Descriptor],
        logical_name: &str,
        _delegate_type: &str,
    ) -> std::result::Result<Box<dyn SynthesizedStub>, SynthesisError> {
        let signature = NormalizedSignature::new(parameter_descriptors.to_vec(), return_descriptor);
        let body: Arc<dyn Callable> = Arc::new(|_args: &[Value]| -> Result<Value> {
            Ok(Value::Void)
        });
        Ok(Box::new(NoopStub {
            entries: vec![
                EntryPoint::new(logical_name, signature.clone(), Arc::clone(&body)),
                EntryPoint::new(BACKUP_ENTRY_NAME, signature, body),
            ],
            context: OnceLock::new(),
        }))
    }
}

struct NoopInstaller;

impl HookInstaller for NoopInstaller {
    fn install(
        &self,
        _target: &HookTarget,
        _dispatch: &EntryPoint,
        _backup: &EntryPoint,
    ) -> std::result::Result<(), InstallError> {
        Ok(())
    }
}

/// Benchmark the full installation protocol: normalize, synthesize,
/// resolve and verify both entry points, bind, install, register.
fn bench_install_protocol(c: &mut Criterion) {
    let target = HookTarget::instance_method(
        "com.example.Widget",
        "setName",
        vec![RuntimeType::reference("java.lang.String")],
        RuntimeType::Void,
    );
    fn observe(_invocation: Invocation<'_>) -> Result<Value> {
        Ok(Value::Void)
    }

    c.bench_function("hook_install_protocol", |b| {
        b.iter(|| {
            let controller =
                HookController::new(Arc::new(NoopSynthesizer), Arc::new(NoopInstaller));
            let handle = controller
                .install_hook(black_box(target.clone()), Arc::new(observe))
                .unwrap();
            black_box(handle)
        });
    });
}

criterion_group!(
    benches,
    bench_encode_many_mixed,
    bench_normalize_instance,
    bench_normalize_constructor,
    bench_install_protocol
);
criterion_main!(benches);
