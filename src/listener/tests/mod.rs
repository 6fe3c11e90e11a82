// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.


//! Listener module tests
//!
//! Checks that the registry talks to its listener exactly once per
//! distinct sequence.

use std::rc::Rc;

use crate::core::{Action, HandlerRegistry, KeySequence, Keycode};
use crate::listener::{KeyListener, LogListener, RecordingListener};

/// Helper: Creates a registry backed by a recording listener
fn recording_registry() -> (Rc<RecordingListener>, HandlerRegistry) {
    let listener = Rc::new(RecordingListener::new());
    let registry = HandlerRegistry::new(listener.clone());
    (listener, registry)
}

#[test]
fn test_recording_listener_starts_empty() {
    let listener = RecordingListener::new();
    assert!(listener.watched().is_empty());
}

#[test]
fn test_first_registration_subscribes() {
    let (listener, registry) = recording_registry();
    let seq = KeySequence::from([Keycode::LControl, Keycode::Escape]);

    registry.register(&seq, Action::new("cancel", || Ok(()))).unwrap();

    assert_eq!(listener.watched(), vec![seq]);
}

#[test]
fn test_repeat_registration_does_not_resubscribe() {
    let (listener, registry) = recording_registry();
    let seq = KeySequence::from([Keycode::LControl, Keycode::Escape]);

    registry.register(&seq, Action::new("f1", || Ok(()))).unwrap();
    registry.register(&seq, Action::new("f2", || Ok(()))).unwrap();
    registry.register(&seq, Action::new("f3", || Ok(()))).unwrap();

    assert_eq!(listener.watch_count(&seq), 1);
    assert_eq!(registry.handler_count(&seq), 3);
}

#[test]
fn test_each_distinct_sequence_subscribes_once() {
    let (listener, registry) = recording_registry();
    let a = KeySequence::from([Keycode::LAlt, Keycode::A]);
    let b = KeySequence::from([Keycode::A, Keycode::LAlt]);

    registry.register(&a, Action::new("a", || Ok(()))).unwrap();
    registry.register(&b, Action::new("b", || Ok(()))).unwrap();
    registry.register(&a, Action::new("a2", || Ok(()))).unwrap();

    assert_eq!(listener.watched(), vec![a, b]);
}

#[test]
fn test_empty_sequence_never_reaches_listener() {
    let (listener, registry) = recording_registry();

    let result = registry.register(&KeySequence::default(), Action::new("x", || Ok(())));

    assert!(result.is_err());
    assert!(listener.watched().is_empty());
}

#[test]
fn test_log_listener_accepts_watch() {
    // No subscriber installed: the log call must simply be a no-op
    LogListener.watch(&KeySequence::from([Keycode::F12]));
}
