//! Hook-level tests over the in-memory host.
//!
//! These tests pin down the substitution mechanics themselves: versioned
//! identities, cache defeat, sticky resolution, virtual modules and the
//! error surfaces of each phase.

extern crate fakeload;

use fakeload::loader::{FakeHooks, FakeRegistry, Loader, MemoryHost, ResolveContext};
use fakeload::runner::ds::error::LoaderError;
use fakeload::runner::ds::mock::MockHandle;
use fakeload::runner::ds::value::{FunctionValue, MjsNumber, MjsValue};
use fakeload::runner::eval::{call_value, ModuleFormat};

fn num(n: i64) -> MjsValue {
    MjsValue::Number(MjsNumber::Integer(n))
}

fn call(value: &MjsValue, args: Vec<MjsValue>) -> MjsValue {
    call_value(value, args).expect("call failed")
}

fn mock_handle(value: &MjsValue) -> MockHandle {
    match value {
        MjsValue::Function(FunctionValue::Mock(handle)) => handle.clone(),
        other => panic!("not a mock: {:?}", other),
    }
}

#[test]
fn test_signed_identities_are_versioned() {
    let host = MemoryHost::new().with_file("m.mjs", "export default 1");
    let mut loader = Loader::new(host);

    let first = loader.import("./m.mjs?__fake=2").expect("import failed");
    assert_eq!(first.identity, "file:///m.mjs?__fake1");

    let second = loader.import("./m.mjs?__fake=3").expect("import failed");
    assert_eq!(second.identity, "file:///m.mjs?__fake2");
    assert_ne!(first.id, second.id);
}

#[test]
fn test_unmarked_import_follows_latest_fake() {
    let host = MemoryHost::new().with_file("m.mjs", "export default 1");
    let mut loader = Loader::new(host);

    loader.import("./m.mjs?__fake=2").expect("import failed");
    loader.import("./m.mjs?__fake=3").expect("import failed");

    let current = loader.import("./m.mjs").expect("import failed");
    assert_eq!(current.default_export(), Some(num(3)));
}

#[test]
fn test_remarked_import_gets_fresh_mock_state() {
    let mut loader = Loader::new(MemoryHost::new());

    let first = loader.import("/m.mjs?__fake").expect("import failed");
    let worn = first.default_export().unwrap();
    call(&worn, vec![num(1)]);
    call(&worn, vec![num(2)]);
    assert_eq!(mock_handle(&worn).calls(), 2);

    // Re-marking registers a new version; the module cache cannot serve
    // the old instance and the new mock starts zeroed.
    let second = loader.import("/m.mjs?__fake").expect("import failed");
    let fresh = second.default_export().unwrap();
    assert_eq!(mock_handle(&fresh).calls(), 0);
    assert!(!MockHandle::ptr_eq(&mock_handle(&worn), &mock_handle(&fresh)));
}

#[test]
fn test_sticky_substitution_reaches_importers() {
    let host = MemoryHost::new()
        .with_file("main.mjs", "import d from \"./dep.mjs\"\nexport default d")
        .with_file("dep.mjs", "export default 1");
    let mut loader = Loader::new(host);

    loader.import("./dep.mjs?__fake=2").expect("import failed");

    // main.mjs is untouched, yet its import picks up the substitute.
    let main = loader.import("./main.mjs").expect("import failed");
    assert_eq!(main.default_export(), Some(num(2)));
}

#[test]
fn test_unknown_specifier_retries_from_root() {
    let host = MemoryHost::new()
        .with_file("dir/main.mjs", "import h from \"helper.mjs\"\nexport default h")
        .with_file("helper.mjs", "export default 7");
    let mut loader = Loader::new(host);

    // "helper.mjs" is not resolvable as a bare specifier; the retry runs
    // against the host root, not the importing module's directory.
    let main = loader.import("./dir/main.mjs").expect("import failed");
    assert_eq!(main.default_export(), Some(num(7)));
}

#[test]
fn test_resolution_error_keeps_original_cause() {
    let mut loader = Loader::new(MemoryHost::new());
    let err = loader.import("missing.mjs").expect_err("import should fail");
    match err {
        LoaderError::Resolution { specifier, cause } => {
            assert_eq!(specifier, "missing.mjs");
            assert_eq!(cause, "cannot find module 'missing.mjs'");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_faked_builtin_loads_as_module_and_restores() {
    let mut loader = Loader::new(MemoryHost::new());

    let faked = loader.import("fs?__fake=export default 1").expect("import failed");
    assert_eq!(faked.format, ModuleFormat::Module);
    assert_eq!(faked.identity, "builtin:fs?__fake1");

    loader.import("fs?__fake=unload").expect("import failed");
    let real = loader.import("fs").expect("import failed");
    assert_eq!(real.format, ModuleFormat::Builtin);
    assert_eq!(real.identity, "builtin:fs");
}

#[test]
fn test_circular_import_is_detected() {
    let host = MemoryHost::new()
        .with_file("a.mjs", "import b from \"./b.mjs\"\nexport default 1")
        .with_file("b.mjs", "import a from \"./a.mjs\"\nexport default 2");
    let mut loader = Loader::new(host);

    let err = loader.import("./a.mjs").expect_err("import should fail");
    assert!(matches!(err, LoaderError::Circular(_)));
    assert_eq!(err.to_string(), "circular import of 'file:///a.mjs'");
}

#[test]
fn test_diamond_import_is_not_circular() {
    let host = MemoryHost::new()
        .with_file(
            "a.mjs",
            "import b from \"./b.mjs\"\nimport c from \"./c.mjs\"\nexport default b",
        )
        .with_file("b.mjs", "import c from \"./c.mjs\"\nexport default c")
        .with_file("c.mjs", "export default 5");
    let mut loader = Loader::new(host);

    let a = loader.import("./a.mjs").expect("import failed");
    assert_eq!(a.default_export(), Some(num(5)));
}

#[test]
fn test_syntax_error_in_fake_source() {
    let mut loader = Loader::new(MemoryHost::new());
    let err = loader
        .import("./m.mjs?__fake=export default ???")
        .expect_err("import should fail");
    assert!(matches!(err, LoaderError::Syntax(_)));
}

#[test]
fn test_reload_of_unreadable_module_fails() {
    let mut loader = Loader::new(MemoryHost::new());
    let err = loader
        .import("./ghost.mjs?__fake=reload")
        .expect_err("import should fail");
    match err {
        LoaderError::Synthesis { fake, .. } => assert_eq!(fake, "reload"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_missing_export_is_reported() {
    let host = MemoryHost::new()
        .with_file("main.mjs", "import { nope } from \"./dep.mjs\"\nexport default 1")
        .with_file("dep.mjs", "export default 1");
    let mut loader = Loader::new(host);

    let err = loader.import("./main.mjs").expect_err("import should fail");
    assert!(matches!(err, LoaderError::Reference(_)));
    assert_eq!(err.to_string(), "nope is not exported by ./dep.mjs");
}

#[test]
fn test_fake_argument_crosses_query_characters() {
    let mut loader = Loader::new(MemoryHost::new());
    let module = loader
        .import("./m.mjs?__fake=export const q = \"a?b\"")
        .expect("import failed");
    assert_eq!(module.export("q"), Some(MjsValue::String("a?b".to_string())));
}

#[test]
fn test_mock_of_undefined_is_an_echo_mock() {
    let mut loader = Loader::new(MemoryHost::new());
    let module = loader
        .import("/m.mjs?__fake=mock(undefined)")
        .expect("import failed");
    let sut = module.default_export().unwrap();
    assert_eq!(call(&sut, vec![num(5)]), num(5));
}

#[test]
fn test_registry_view_from_loader() {
    let host = MemoryHost::new().with_file("m.mjs", "export default 1");
    let mut loader = Loader::new(host);

    loader.import("./m.mjs?__fake=2").expect("import failed");
    assert!(loader.fakes().contains("file:///m.mjs"));
    let entry = loader.fakes().get("file:///m.mjs").unwrap();
    assert_eq!(entry.signed_identity, "file:///m.mjs?__fake1");

    loader.import("./m.mjs?__fake=unload").expect("import failed");
    assert!(loader.fakes().is_empty());
}

#[test]
fn test_seeded_registry() {
    let mut registry = FakeRegistry::new();
    registry.register(
        "file:///m.mjs",
        "import { mock } from \"builtin:mock\";\nexport default mock()",
    );

    let host = MemoryHost::new().with_file("m.mjs", "export default 1");
    let mut loader = Loader::with_registry(host, registry);

    let module = loader.import("./m.mjs").expect("import failed");
    let sut = module.default_export().unwrap();
    assert_eq!(call(&sut, vec![num(9)]), num(9));
}

#[test]
fn test_unmarked_resolution_is_stable_until_registration() {
    let host = MemoryHost::new().with_file("m.mjs", "export default 1");
    let mut hooks = FakeHooks::new(FakeRegistry::new());
    let context = ResolveContext::root();

    let first = hooks
        .resolve("./m.mjs", &context, &host)
        .expect("resolve failed");
    let second = hooks
        .resolve("./m.mjs", &context, &host)
        .expect("resolve failed");
    assert_eq!(first, "file:///m.mjs");
    assert_eq!(first, second);

    // Only a registration changes what an unmarked specifier resolves to.
    hooks
        .resolve("./m.mjs?__fake=2", &context, &host)
        .expect("resolve failed");
    let third = hooks
        .resolve("./m.mjs", &context, &host)
        .expect("resolve failed");
    assert_eq!(third, "file:///m.mjs?__fake1");
}

#[test]
fn test_format_and_source_phases_delegate_or_serve() {
    let host = MemoryHost::new().with_file("m.mjs", "export default 1");
    let mut hooks = FakeHooks::new(FakeRegistry::new());

    // Unregistered identities pass straight through to the host.
    assert_eq!(
        hooks.format("file:///m.mjs", &host).unwrap(),
        ModuleFormat::Module
    );
    assert_eq!(
        hooks.format("builtin:mock", &host).unwrap(),
        ModuleFormat::Builtin
    );
    assert_eq!(
        hooks.source("file:///m.mjs", &host).unwrap(),
        "export default 1"
    );

    // A registered identity is served its stored replacement source, and
    // a faked builtin reports the source-text format.
    let signed = hooks
        .registry_mut()
        .register("builtin:fs", "export default 9");
    assert_eq!(hooks.format(&signed, &host).unwrap(), ModuleFormat::Module);
    assert_eq!(hooks.source(&signed, &host).unwrap(), "export default 9");
}
