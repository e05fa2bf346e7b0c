//! The subscription registry behind [`crate::refresh_on`].
//!
//! One thread-local runtime per wasm instance maps event names to the
//! refresh callbacks subscribed for them, and retains the state of every
//! node that has recorded history, listeners or subscriptions. It is
//! created lazily on first use and torn down explicitly through [`reset`].

use crate::compose::NodeState;
use core::cell::RefCell;
use hashbrown::HashMap;
use std::rc::Rc;
use tracing::{trace, trace_span};

#[derive(Default)]
struct Runtime {
	subscribers: HashMap<String, Vec<Rc<dyn Fn()>>>,
	retained: Vec<Rc<RefCell<NodeState>>>,
}

thread_local! {
	static RUNTIME: RefCell<Runtime> = RefCell::new(Runtime::default());
}

pub(crate) fn subscribe(event: &str, callback: Rc<dyn Fn()>) {
	RUNTIME.with(|runtime| {
		runtime
			.borrow_mut()
			.subscribers
			.entry(event.to_string())
			.or_insert_with(Vec::new)
			.push(callback);
	});
}

pub(crate) fn retain(state: &Rc<RefCell<NodeState>>) {
	RUNTIME.with(|runtime| runtime.borrow_mut().retained.push(Rc::clone(state)));
}

/// Fires `event`: every subscription made for it replays, in subscription
/// order.
///
/// The subscriber list is snapshotted before anything runs, so a replay
/// that subscribes further nodes (a `refresh_on` nested inside a renderer)
/// never disturbs the iteration; newly subscribed nodes fire from the next
/// dispatch on.
pub fn dispatch(event: &str) {
	let span = trace_span!("dispatch", event);
	let _enter = span.enter();

	let callbacks: Vec<Rc<dyn Fn()>> = RUNTIME.with(|runtime| {
		runtime
			.borrow()
			.subscribers
			.get(event)
			.cloned()
			.unwrap_or_default()
	});

	trace!("Refreshing {} subscriber(s).", callbacks.len());
	for callback in callbacks {
		callback();
	}
}

/// Explicit teardown: drops every subscription and every retained node
/// state.
pub fn reset() {
	RUNTIME.with(|runtime| {
		let mut runtime = runtime.borrow_mut();
		runtime.subscribers.clear();
		runtime.retained.clear();
	});
}
