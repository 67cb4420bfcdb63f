use super::*;
use std::cell::Cell;

#[test]
fn invoke_without_hook_is_noop() {
    let hooks = LogoutHooks::new();
    assert!(!hooks.is_registered());
    assert!(!hooks.invoke());
}

#[test]
fn invoke_calls_registered_hook_once() {
    let hooks = LogoutHooks::new();
    let calls = Rc::new(Cell::new(0));
    let seen = Rc::clone(&calls);
    hooks.register(move || seen.set(seen.get() + 1));

    assert!(hooks.invoke());
    assert_eq!(calls.get(), 1);
}

#[test]
fn register_overwrites_previous_hook() {
    let hooks = LogoutHooks::new();
    let first = Rc::new(Cell::new(0));
    let second = Rc::new(Cell::new(0));
    let a = Rc::clone(&first);
    let b = Rc::clone(&second);
    hooks.register(move || a.set(a.get() + 1));
    hooks.register(move || b.set(b.get() + 1));

    hooks.invoke();
    assert_eq!(first.get(), 0);
    assert_eq!(second.get(), 1);
}

#[test]
fn unregister_restores_noop() {
    let hooks = LogoutHooks::new();
    hooks.register(|| {});
    hooks.unregister();
    assert!(!hooks.invoke());
}

#[test]
fn hook_may_reregister_while_running() {
    let hooks = Rc::new(LogoutHooks::new());
    let inner = Rc::clone(&hooks);
    let replaced = Rc::new(Cell::new(false));
    let flag = Rc::clone(&replaced);
    hooks.register(move || {
        let flag = Rc::clone(&flag);
        inner.register(move || flag.set(true));
    });

    assert!(hooks.invoke());
    assert!(!replaced.get());
    assert!(hooks.invoke());
    assert!(replaced.get());
}

#[test]
fn debug_reports_registration() {
    let hooks = LogoutHooks::new();
    assert_eq!(format!("{hooks:?}"), "LogoutHooks { registered: false }");
}
