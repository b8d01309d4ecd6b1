//! Single-value signals connecting behaviours
//!
//! A [`Signal`] is the unit of data exchange between behaviours: one owning
//! writer, any number of readers. Ownership is fixed when the graph is built:
//! the writer handle is not cloneable, so a second writer cannot exist.
//! Readers get [`InputSignal`] handles from [`Signal::reader`].
//!
//! Reads return a clone of the current value, never a reference into the
//! cell, so no reader can alias another behaviour's view. The cells are
//! `Rc`-backed and rely on the single-threaded cooperative tick loop; no
//! locking is involved.

use std::cell::RefCell;
use std::rc::Rc;

/// Owning write handle for a signal cell
///
/// Exactly one exists per cell. `read` and `write` never block and never
/// fail; a read after a write observes the new value.
#[derive(Debug)]
pub struct Signal<T> {
    cell: Rc<RefCell<T>>,
}

impl<T: Clone> Signal<T> {
    pub fn new(initial: T) -> Self {
        Self {
            cell: Rc::new(RefCell::new(initial)),
        }
    }

    /// Current value, by clone
    pub fn read(&self) -> T {
        self.cell.borrow().clone()
    }

    /// Replace the current value; no history is kept
    pub fn write(&self, value: T) {
        *self.cell.borrow_mut() = value;
    }

    /// A read-only handle onto the same cell
    pub fn reader(&self) -> InputSignal<T> {
        InputSignal {
            cell: Rc::clone(&self.cell),
        }
    }
}

/// Read-only handle onto a signal cell
#[derive(Debug)]
pub struct InputSignal<T> {
    cell: Rc<RefCell<T>>,
}

impl<T: Clone> InputSignal<T> {
    pub fn read(&self) -> T {
        self.cell.borrow().clone()
    }
}

impl<T> Clone for InputSignal<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Rc::clone(&self.cell),
        }
    }
}
