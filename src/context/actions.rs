// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Work handed to a context from other threads.

use crate::context::Context;
use crate::imp::Driver;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::ThreadId;

pub(crate) type Action<D> = Box<dyn FnOnce(&mut Context<D>) + Send>;

struct Pending<D: Driver> {
    owner: ThreadId,
    actions: Vec<Action<D>>,
}

/// A queue of closures to run on the thread that owns a [`Context`].
///
/// The queue is a cheap, cloneable, `Send` handle.  Any thread may [`push`](Self::push)
/// work; the owning thread runs it with [`Context::run_pending_actions`].
///
/// # Examples
///
/// ```
/// use bindshadow::{Context, RecordingDriver, GlVersion, BufferTarget};
///
/// let mut context = Context::new(RecordingDriver::new(), GlVersion::default());
/// let queue = context.actions().clone();
/// std::thread::spawn(move || {
///     queue.push(|c| c.bind_buffer(BufferTarget::Array, 4));
/// })
/// .join()
/// .unwrap();
/// assert_eq!(context.run_pending_actions(), 1);
/// assert_eq!(context.bound_buffer(BufferTarget::Array), 4);
/// ```
pub struct ActionQueue<D: Driver> {
    shared: Arc<Mutex<Pending<D>>>,
}

impl<D: Driver> Clone for ActionQueue<D> {
    fn clone(&self) -> Self {
        ActionQueue {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<D: Driver> std::fmt::Debug for ActionQueue<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pending = self.lock();
        f.debug_struct("ActionQueue")
            .field("owner", &pending.owner)
            .field("pending", &pending.actions.len())
            .finish()
    }
}

impl<D: Driver> ActionQueue<D> {
    /// A queue owned by the calling thread.
    pub(crate) fn new() -> Self {
        ActionQueue {
            shared: Arc::new(Mutex::new(Pending {
                owner: std::thread::current().id(),
                actions: Vec::new(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Pending<D>> {
        //a panicking action can't leave the vec inconsistent
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn push<F: FnOnce(&mut Context<D>) + Send + 'static>(&self, action: F) {
        self.lock().actions.push(Box::new(action));
    }

    pub fn len(&self) -> usize {
        self.lock().actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The thread the queued actions will run on.
    pub fn owner(&self) -> ThreadId {
        self.lock().owner
    }

    pub fn is_owner_thread(&self) -> bool {
        self.owner() == std::thread::current().id()
    }

    pub(crate) fn take(&self) -> Vec<Action<D>> {
        std::mem::take(&mut self.lock().actions)
    }

    /// Makes the calling thread the owner.  Returns how many queued actions were dropped.
    pub(crate) fn thread_change(&self) -> usize {
        let mut pending = self.lock();
        pending.owner = std::thread::current().id();
        let dropped = pending.actions.len();
        pending.actions.clear();
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imp::RecordingDriver;

    #[test]
    fn queue_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<ActionQueue<RecordingDriver>>();
    }

    #[test]
    fn thread_change_moves_ownership_and_drops_work() {
        let queue = ActionQueue::<RecordingDriver>::new();
        queue.push(|_| {});
        let other = queue.clone();
        let (dropped, owner) = std::thread::spawn(move || {
            let dropped = other.thread_change();
            (dropped, std::thread::current().id())
        })
        .join()
        .unwrap();
        assert_eq!(dropped, 1);
        assert_eq!(queue.owner(), owner);
        assert!(!queue.is_owner_thread());
        assert!(queue.is_empty());
    }
}
