use crate::object::Object;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Shared handle to a scope frame. Closures hold one of these, so a frame
/// outlives the call that created it for as long as anything captures it.
pub type Env = Rc<RefCell<Environment>>;

#[derive(Debug, Default)]
pub struct Environment {
    store: HashMap<String, Object>,
    outer: Option<Env>,
}

impl Environment {
    pub fn new() -> Env {
        Rc::new(RefCell::new(Environment::default()))
    }

    pub fn new_enclosed(outer: Env) -> Env {
        Rc::new(RefCell::new(Environment {
            store: HashMap::new(),
            outer: Some(outer),
        }))
    }

    /// Lookup walks the outer chain; bindings are never copied down, so a
    /// name bound in the parent after this frame was created is still seen.
    pub fn get(&self, name: &str) -> Option<Object> {
        match self.store.get(name) {
            Some(val) => Some(val.clone()),
            None => self
                .outer
                .as_ref()
                .and_then(|outer| outer.borrow().get(name)),
        }
    }

    /// Writes into the current frame unconditionally; `let` shadows rather
    /// than assigns.
    pub fn set(&mut self, name: impl Into<String>, val: Object) {
        self.store.insert(name.into(), val);
    }
}
