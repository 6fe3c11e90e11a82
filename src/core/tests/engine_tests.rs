//! Engine tests
//!
//! Covers the unified entry point: precedence between the static tree and
//! the dynamic registry, fail-fast propagation, and held-key dispatch.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use crate::core::{
    Action, DispatchError, DispatchOutcome, DispatchSource, HandlerRegistry, HotkeyEngine,
    HotkeyTree, KeySequence, Keycode, TreeNode,
};
use crate::listener::RecordingListener;

type Log = Rc<RefCell<Vec<String>>>;

/// Helper: Creates an action that appends its label to a shared log
fn logging_action(log: &Log, label: &str) -> Action {
    let log = log.clone();
    let name = label.to_string();
    Action::new(label, move || {
        log.borrow_mut().push(name.clone());
        Ok(())
    })
}

/// Helper: Tree binding `LControl + Escape` to "tree-cancel"
fn ctrl_esc_tree(log: &Log) -> HotkeyTree {
    HotkeyTree::new(TreeNode::branch([(
        Keycode::LControl,
        TreeNode::branch([(Keycode::Escape, TreeNode::action(logging_action(log, "tree-cancel")))]),
    )]))
    .unwrap()
}

/// Helper: Engine over an optional tree and a fresh registry
fn new_engine(tree: Option<HotkeyTree>) -> (Rc<RecordingListener>, HotkeyEngine) {
    let listener = Rc::new(RecordingListener::new());
    let registry = Rc::new(HandlerRegistry::new(listener.clone()));
    (listener, HotkeyEngine::new(tree, registry))
}

fn ctrl_esc() -> KeySequence {
    KeySequence::from([Keycode::LControl, Keycode::Escape])
}

#[test]
fn test_empty_sequence_rejected_at_boundary() {
    let (_listener, engine) = new_engine(None);

    assert!(matches!(
        engine.on_key_sequence(&KeySequence::default()),
        Err(DispatchError::EmptySequence)
    ));
}

#[test]
fn test_unmatched_everywhere_is_not_an_error() {
    let log = Log::default();
    let (_listener, engine) = new_engine(Some(ctrl_esc_tree(&log)));

    let outcome = engine.on_key_sequence(&KeySequence::from([Keycode::F3])).unwrap();

    assert_eq!(outcome, DispatchOutcome::Unmatched);
    assert!(log.borrow().is_empty());
}

#[test]
fn test_tree_handles_static_binding() {
    let log = Log::default();
    let (_listener, engine) = new_engine(Some(ctrl_esc_tree(&log)));

    let outcome = engine.on_key_sequence(&ctrl_esc()).unwrap();

    assert_eq!(
        outcome,
        DispatchOutcome::Handled {
            source: DispatchSource::Tree,
            invoked: 1
        }
    );
    assert_eq!(*log.borrow(), vec!["tree-cancel"]);
}

#[test]
fn test_registry_handles_dynamic_binding() {
    let log = Log::default();
    let (listener, engine) = new_engine(None);

    engine.on_keys(&ctrl_esc(), logging_action(&log, "f1")).unwrap();
    engine.on_keys(&ctrl_esc(), logging_action(&log, "f2")).unwrap();

    let outcome = engine.on_key_sequence(&ctrl_esc()).unwrap();

    assert_eq!(
        outcome,
        DispatchOutcome::Handled {
            source: DispatchSource::Registry,
            invoked: 2
        }
    );
    assert_eq!(*log.borrow(), vec!["f1", "f2"]);
    assert_eq!(listener.watch_count(&ctrl_esc()), 1);
}

#[test]
fn test_tree_takes_precedence_over_registry() {
    let log = Log::default();
    let (_listener, engine) = new_engine(Some(ctrl_esc_tree(&log)));

    engine.on_keys(&ctrl_esc(), logging_action(&log, "dynamic")).unwrap();
    let outcome = engine.on_key_sequence(&ctrl_esc()).unwrap();

    assert!(matches!(
        outcome,
        DispatchOutcome::Handled {
            source: DispatchSource::Tree,
            ..
        }
    ));
    assert_eq!(*log.borrow(), vec!["tree-cancel"]);
}

#[test]
fn test_tree_miss_falls_through_to_registry() {
    let log = Log::default();
    let (_listener, engine) = new_engine(Some(ctrl_esc_tree(&log)));

    // Prefix of a tree path: unmatched in the tree, registered dynamically
    let prefix = KeySequence::from([Keycode::LControl]);
    engine.on_keys(&prefix, logging_action(&log, "dynamic")).unwrap();

    let outcome = engine.on_key_sequence(&prefix).unwrap();

    assert!(matches!(
        outcome,
        DispatchOutcome::Handled {
            source: DispatchSource::Registry,
            invoked: 1
        }
    ));
    assert_eq!(*log.borrow(), vec!["dynamic"]);
}

#[test]
fn test_failure_propagates_to_caller() {
    let log = Log::default();
    let (_listener, engine) = new_engine(None);

    engine
        .on_keys(&ctrl_esc(), Action::new("f1", || anyhow::bail!("model not loaded")))
        .unwrap();
    engine.on_keys(&ctrl_esc(), logging_action(&log, "f2")).unwrap();

    let result = engine.on_key_sequence(&ctrl_esc());

    assert!(matches!(result, Err(DispatchError::ActionFailed { index: 0, .. })));
    assert!(log.borrow().is_empty(), "f2 must not run after f1 fails");
}

#[test]
fn test_handler_can_register_through_engine_registry() {
    let log = Log::default();
    let (listener, engine) = new_engine(None);
    let f5 = KeySequence::from([Keycode::F5]);

    let registry = Rc::downgrade(engine.registry());
    let f5_clone = f5.clone();
    let late = logging_action(&log, "late");
    engine
        .on_keys(
            &ctrl_esc(),
            Action::new("bind-f5", move || {
                if let Some(registry) = registry.upgrade() {
                    registry.register(&f5_clone, late.clone())?;
                }
                Ok(())
            }),
        )
        .unwrap();

    engine.on_key_sequence(&ctrl_esc()).unwrap();
    let outcome = engine.on_key_sequence(&f5).unwrap();

    assert!(matches!(outcome, DispatchOutcome::Handled { invoked: 1, .. }));
    assert_eq!(*log.borrow(), vec!["late"]);
    assert_eq!(listener.watched(), vec![ctrl_esc(), f5]);
}

#[test]
fn test_accessors() {
    let log = Log::default();
    let (_listener, engine) = new_engine(Some(ctrl_esc_tree(&log)));

    assert_eq!(engine.tree().map(|t| t.len()), Some(1));
    assert!(engine.registry().is_empty());

    let (_listener, engine) = new_engine(None);
    assert!(engine.tree().is_none());
}

#[test]
fn test_held_keys_dispatch() {
    let log = Log::default();
    let (_listener, engine) = new_engine(None);

    engine
        .on_keys(
            &KeySequence::from([Keycode::LAlt, Keycode::Backspace]),
            logging_action(&log, "open-prompt"),
        )
        .unwrap();

    let held: HashSet<Keycode> = [Keycode::Backspace, Keycode::LAlt, Keycode::CapsLock]
        .into_iter()
        .collect();
    let outcome = engine.on_held_keys(&held).unwrap();

    assert_eq!(
        outcome,
        DispatchOutcome::Handled {
            source: DispatchSource::Registry,
            invoked: 1
        }
    );
    assert_eq!(*log.borrow(), vec!["open-prompt"]);

    let outcome = engine.on_held_keys(&[Keycode::LAlt].into_iter().collect()).unwrap();
    assert_eq!(outcome, DispatchOutcome::Unmatched);

    assert!(matches!(
        engine.on_held_keys(&HashSet::new()),
        Err(DispatchError::EmptySequence)
    ));
}
