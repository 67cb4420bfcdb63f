//! Single-slot logout hook registry.
//!
//! The interceptor layer must not depend on the authentication context, yet
//! has to tell it when a session ends. The context registers one callback
//! here during setup; the classifier invokes it on `Unauthorized`.

#[cfg(test)]
#[path = "hooks_test.rs"]
mod hooks_test;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

pub type LogoutHook = Rc<dyn Fn()>;

#[derive(Default)]
pub struct LogoutHooks {
    slot: RefCell<Option<LogoutHook>>,
}

impl fmt::Debug for LogoutHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogoutHooks")
            .field("registered", &self.is_registered())
            .finish()
    }
}

impl LogoutHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `hook`, replacing any previously registered one.
    pub fn register<F>(&self, hook: F)
    where
        F: Fn() + 'static,
    {
        *self.slot.borrow_mut() = Some(Rc::new(hook));
    }

    /// Drop the registered hook, if any.
    pub fn unregister(&self) {
        self.slot.borrow_mut().take();
    }

    pub fn is_registered(&self) -> bool {
        self.slot.borrow().is_some()
    }

    /// Call the registered hook. Returns `false` when none is registered.
    ///
    /// The slot is released before the call, so a hook may re-register.
    pub fn invoke(&self) -> bool {
        let hook = self.slot.borrow().clone();
        match hook {
            Some(hook) => {
                hook();
                true
            }
            None => false,
        }
    }
}
