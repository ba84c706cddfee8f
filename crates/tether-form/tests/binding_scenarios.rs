#![forbid(unsafe_code)]

//! Integration tests: form binding against the reference host and container.

use std::rc::Rc;

use serde_json::{Value, json};

use tether_form::{Attachment, EventKind, FormBinder, FormOptions, Validity, path};
use tether_harness::{TestContainer, TestControl, TestHost};

fn setup(
    initial: Value,
    options: FormOptions,
) -> (Rc<TestHost>, Rc<TestContainer>, Rc<FormBinder>, Attachment) {
    let host = TestHost::new();
    let container = TestContainer::new();
    let binder = FormBinder::new(&host, initial, options);
    let attachment = binder.attach(&container);
    (host, container, binder, attachment)
}

// ============================================================================
// Write-through and identity semantics
// ============================================================================

#[test]
fn edit_named_control_writes_in_place() {
    let (host, container, binder, _attachment) = setup(json!({}), FormOptions::default());
    let before = binder.value();

    container.emit(EventKind::Change, &TestControl::named("email", "foo"));

    assert_eq!(binder.snapshot(), json!({"email": "foo"}));
    assert!(
        Rc::ptr_eq(&before, &binder.value()),
        "default mode must preserve value identity"
    );
    assert!(host.has_pending_update());
}

#[test]
fn value_identity_is_invariant_across_many_edits() {
    let (_host, container, binder, _attachment) = setup(json!({}), FormOptions::default());
    let before = binder.value();

    for (name, value) in [("a", "1"), ("b.c", "2"), ("a", "3")] {
        container.emit(EventKind::Input, &TestControl::named(name, value));
    }

    assert!(Rc::ptr_eq(&before, &binder.value()));
    assert_eq!(binder.snapshot(), json!({"a": "3", "b": {"c": "2"}}));
}

#[test]
fn immutable_edit_produces_a_fresh_value() {
    let (_host, container, binder, _attachment) = setup(json!({}), FormOptions { immutable: true });
    let before = binder.value();

    container.emit(EventKind::Change, &TestControl::named("email", "foo"));

    let after = binder.value();
    assert!(!Rc::ptr_eq(&before, &after), "immutable mode must swap handles");
    assert_eq!(*after.borrow(), json!({"email": "foo"}));
    assert_eq!(*before.borrow(), json!({}), "old snapshot must stay untouched");
}

#[test]
fn immutable_edits_never_alias_prior_snapshots() {
    let initial = json!({"a": "1", "nest": {"keep": true, "edit": "old"}});
    let (_host, container, binder, _attachment) =
        setup(initial.clone(), FormOptions { immutable: true });

    let first = binder.value();
    container.emit(EventKind::Change, &TestControl::named("nest.edit", "new"));
    let second = binder.value();
    container.emit(EventKind::Change, &TestControl::named("a", "2"));
    let third = binder.value();

    assert_eq!(*first.borrow(), initial);
    assert_eq!(
        *second.borrow(),
        json!({"a": "1", "nest": {"keep": true, "edit": "new"}})
    );
    assert_eq!(
        *third.borrow(),
        json!({"a": "2", "nest": {"keep": true, "edit": "new"}})
    );
    assert!(!Rc::ptr_eq(&first, &second));
    assert!(!Rc::ptr_eq(&second, &third));
}

#[test]
fn dotted_name_creates_nested_objects() {
    let (_host, container, binder, _attachment) = setup(json!({}), FormOptions::default());

    container.emit(EventKind::Change, &TestControl::named("deep.path", "bob"));

    assert_eq!(binder.snapshot(), json!({"deep": {"path": "bob"}}));
}

#[test]
fn scalar_intermediate_is_overwritten() {
    let (_host, container, binder, _attachment) = setup(json!({"a": 5}), FormOptions::default());

    container.emit(EventKind::Change, &TestControl::named("a.b", "x"));

    assert_eq!(binder.snapshot(), json!({"a": {"b": "x"}}));
}

#[test]
fn written_value_reads_back_through_its_path() {
    let (_host, container, binder, _attachment) = setup(json!({}), FormOptions::default());

    container.emit(EventKind::Input, &TestControl::named("user.login", "ada"));

    let snapshot = binder.snapshot();
    let at = tether_form::Path::dotted("user.login").unwrap();
    assert_eq!(path::get(&snapshot, &at), Some(&json!("ada")));
}

// ============================================================================
// Field resolution policy
// ============================================================================

#[test]
fn id_binds_as_a_single_segment() {
    let (_host, container, binder, _attachment) = setup(json!({}), FormOptions::default());

    container.emit(EventKind::Change, &TestControl::identified("email", "foo"));

    assert_eq!(binder.snapshot(), json!({"email": "foo"}));
}

#[test]
fn name_wins_over_id() {
    let (_host, container, binder, _attachment) = setup(json!({}), FormOptions::default());

    let control = TestControl::with_attributes(Some("named"), Some("ignored"), "v");
    container.emit(EventKind::Change, &control);

    assert_eq!(binder.snapshot(), json!({"named": "v"}));
}

#[test]
fn anonymous_control_is_fully_inert() {
    let (host, container, binder, _attachment) = setup(json!({"keep": 1}), FormOptions::default());
    let before = binder.value();

    let control = TestControl::anonymous("noise");
    control.set_validity(Validity::Invalid("should never be recorded".into()));
    for _ in 0..3 {
        container.emit(EventKind::Change, &control);
        container.emit(EventKind::Input, &control);
        container.emit(EventKind::Blur, &control);
    }

    assert_eq!(binder.snapshot(), json!({"keep": 1}));
    assert!(Rc::ptr_eq(&before, &binder.value()));
    assert!(binder.errors().is_empty());
    assert!(!host.has_pending_update(), "inert control must not schedule updates");
}

#[test]
fn controls_sharing_a_path_are_last_write_wins() {
    let (_host, container, binder, _attachment) = setup(json!({}), FormOptions::default());

    container.emit(EventKind::Change, &TestControl::named("email", "first"));
    container.emit(EventKind::Change, &TestControl::named("email", "second"));

    assert_eq!(binder.snapshot(), json!({"email": "second"}));
}

// ============================================================================
// Validation and error tracking
// ============================================================================

#[test]
fn errors_start_empty_and_stay_empty_while_valid() {
    let (_host, container, binder, _attachment) = setup(json!({}), FormOptions::default());
    assert!(binder.errors().is_empty());

    container.emit(EventKind::Change, &TestControl::named("email", "foo"));
    container.emit(EventKind::Blur, &TestControl::named("email", "foo"));

    assert!(binder.errors().is_empty());
    assert!(!binder.has_errors());
}

#[test]
fn invalid_control_records_its_message_on_blur() {
    let (host, container, binder, _attachment) = setup(json!({}), FormOptions::default());

    let control = TestControl::named("email", "not-an-email");
    control.set_validity(Validity::Invalid("enter a valid email".into()));
    container.emit(EventKind::Blur, &control);

    assert_eq!(
        binder.errors().get("email").map(String::as_str),
        Some("enter a valid email")
    );
    assert!(host.has_pending_update(), "error-set change must request an update");
    // Value untouched: blur never writes.
    assert_eq!(binder.snapshot(), json!({}));
}

#[test]
fn unchanged_error_set_on_blur_requests_no_update() {
    let (host, container, _binder, _attachment) = setup(json!({}), FormOptions::default());

    let control = TestControl::named("email", "x");
    control.set_validity(Validity::Invalid("required".into()));
    container.emit(EventKind::Blur, &control);
    host.await_update();

    container.emit(EventKind::Blur, &control);
    assert!(
        !host.has_pending_update(),
        "same message on the same path is not a change"
    );
}

#[test]
fn validation_never_blocks_the_write() {
    let (_host, container, binder, _attachment) = setup(json!({}), FormOptions::default());

    let control = TestControl::named("age", "not-a-number");
    control.set_validity(Validity::Invalid("must be a number".into()));
    container.emit(EventKind::Change, &control);

    // The invalid value still lands so the host can render it with its message.
    assert_eq!(binder.snapshot(), json!({"age": "not-a-number"}));
    assert_eq!(
        binder.errors().get("age").map(String::as_str),
        Some("must be a number")
    );
}

#[test]
fn recovering_control_clears_its_error() {
    let (host, container, binder, _attachment) = setup(json!({}), FormOptions::default());

    let control = TestControl::named("email", "");
    control.set_validity(Validity::Invalid("required".into()));
    container.emit(EventKind::Blur, &control);
    assert!(binder.has_errors());
    host.await_update();

    control.set_value("a@b.example");
    control.set_validity(Validity::Valid);
    container.emit(EventKind::Blur, &control);

    assert!(binder.errors().is_empty());
    assert!(host.has_pending_update(), "clearing an error is a change");
}

#[test]
fn errors_are_keyed_by_dotted_path() {
    let (_host, container, binder, _attachment) = setup(json!({}), FormOptions::default());

    let control = TestControl::named("billing.zip", "???");
    control.set_validity(Validity::Invalid("bad zip".into()));
    container.emit(EventKind::Change, &control);

    assert_eq!(binder.errors().get("billing.zip").map(String::as_str), Some("bad zip"));
}

// ============================================================================
// Attachment lifecycle and host scheduling
// ============================================================================

#[test]
fn attach_wires_one_listener_per_kind() {
    let (_host, container, _binder, _attachment) = setup(json!({}), FormOptions::default());
    for kind in [EventKind::Change, EventKind::Input, EventKind::Blur] {
        assert_eq!(container.listener_count(kind), 1);
    }
}

#[test]
fn dropping_the_attachment_detaches() {
    let (host, container, binder, attachment) = setup(json!({}), FormOptions::default());
    assert!(binder.is_attached());

    drop(attachment);

    assert!(!binder.is_attached());
    for kind in [EventKind::Change, EventKind::Input, EventKind::Blur] {
        assert_eq!(container.listener_count(kind), 0);
    }
    container.emit(EventKind::Change, &TestControl::named("email", "foo"));
    assert_eq!(binder.snapshot(), json!({}));
    assert!(!host.has_pending_update());
}

#[test]
fn binder_registers_with_the_host_at_construction() {
    let host = TestHost::new();
    let _binder = FormBinder::new(&host, json!({}), FormOptions::default());
    assert_eq!(host.controller_count(), 1);
}

#[test]
fn accepted_edit_completes_in_one_update_pass() {
    let (host, container, _binder, _attachment) = setup(json!({}), FormOptions::default());

    container.emit(EventKind::Change, &TestControl::named("email", "foo"));
    assert_eq!(host.await_update(), 1);
    assert!(!host.has_pending_update());
}

#[test]
fn from_shared_binds_the_callers_exact_handle() {
    use std::cell::RefCell;

    let host = TestHost::new();
    let container = TestContainer::new();
    let shared = Rc::new(RefCell::new(json!({})));
    let binder = FormBinder::from_shared(&host, Rc::clone(&shared), FormOptions::default());
    let _attachment = binder.attach(&container);

    container.emit(EventKind::Change, &TestControl::named("email", "foo"));

    // The caller's own handle observes the edit.
    assert_eq!(*shared.borrow(), json!({"email": "foo"}));
    assert!(Rc::ptr_eq(&shared, &binder.value()));
}

// ============================================================================
// Typed boundary
// ============================================================================

#[test]
fn typed_round_trip_through_the_generic_boundary() {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Deserialize, PartialEq, Serialize)]
    struct Profile {
        email: String,
    }

    let host = TestHost::new();
    let container = TestContainer::new();
    let binder = FormBinder::with_value(
        &host,
        &Profile {
            email: "old@example.com".into(),
        },
        FormOptions::default(),
    )
    .unwrap();
    let _attachment = binder.attach(&container);

    container.emit(
        EventKind::Change,
        &TestControl::named("email", "new@example.com"),
    );

    assert_eq!(
        binder.read_as::<Profile>().unwrap(),
        Profile {
            email: "new@example.com".into()
        }
    );
}

#[test]
fn typed_read_surfaces_shape_mismatches() {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    #[allow(dead_code)]
    struct Strict {
        count: u32,
    }

    let host = TestHost::new();
    let binder = FormBinder::new(&host, json!({"count": "not a number"}), FormOptions::default());
    assert!(binder.read_as::<Strict>().is_err());
}
