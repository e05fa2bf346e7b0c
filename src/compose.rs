use crate::{
	child::{Child, Children, RenderFn},
	directive::{AttributeDirective, EventListenerDirective, RefreshDirective},
	registry, web,
};
use core::{
	cell::RefCell,
	fmt::{self, Debug, Formatter},
};
use hashbrown::HashMap;
use std::rc::Rc;
use tracing::{error, trace, trace_span};
use wasm_bindgen::{closure::Closure, throw_str, JsValue, UnwrapThrowExt};

/// Replay bookkeeping for one element.
///
/// Both histories are append-only for the element's lifetime; a refresh
/// replays them, it never rewrites them.
#[derive(Default)]
pub(crate) struct NodeState {
	render_history: Vec<RenderFn>,
	attribute_history: Vec<AttributeDirective>,
	listener_slots: HashMap<String, Closure<dyn Fn(web_sys::Event)>>,
	retained: bool,
}

/// An element handle together with its replay state.
///
/// Composing children mutates the underlying [`web_sys::Element`] in place
/// and records render functions and attribute directives for later replay.
/// Cloning is shallow: clones share the element and its histories.
///
/// The registry retains the state of any node that has recorded history,
/// bound listeners or refresh subscriptions, so handler closures stay alive
/// for as long as the page (or until [`crate::registry::reset`]) even after
/// every `ViewNode` handle is dropped.
#[derive(Clone)]
pub struct ViewNode {
	element: web_sys::Element,
	state: Rc<RefCell<NodeState>>,
}

/// Whether composed renderers and attribute directives are appended to the
/// target's histories. Replay skips recording so a refresh leaves the
/// histories exactly as it found them.
#[derive(Clone, Copy)]
enum Record {
	Append,
	Skip,
}

impl ViewNode {
	/// Creates a fresh `<tag>` element with empty histories.
	#[must_use]
	pub fn create(tag: &str) -> Self {
		let element = web::document()
			.create_element(tag)
			.expect_throw("domfn: Invalid element name.");
		Self::adopt(element)
	}

	/// Wraps an existing element, attaching fresh histories to it.
	#[must_use]
	pub fn adopt(element: web_sys::Element) -> Self {
		Self {
			element,
			state: Rc::new(RefCell::new(NodeState::default())),
		}
	}

	/// The underlying DOM element.
	#[must_use]
	pub fn element(&self) -> &web_sys::Element {
		&self.element
	}

	/// Composes `children` into this element, in order, and returns it for
	/// chaining.
	pub fn compose<M>(self, children: impl Children<M>) -> Self {
		let span = trace_span!("compose", tag = %self.element.tag_name());
		let _enter = span.enter();

		let mut list = Vec::new();
		children.append_to(&mut list);
		for child in list {
			self.apply(child, Record::Append);
		}
		self
	}

	/// Clears this element's children and replays its recorded histories:
	/// every render function in registration order, then every attribute
	/// directive in registration order.
	///
	/// Replay iterates snapshots of the histories taken up front and does
	/// not re-record on this element, so renderers that nest further
	/// renderers or attribute directives apply their output without growing
	/// the histories. Descendant elements created during the replay are
	/// fresh and record normally.
	pub fn refresh(&self) {
		let span = trace_span!("refresh", tag = %self.element.tag_name());
		let _enter = span.enter();

		while let Some(child) = self.element.first_child() {
			if let Err(error) = self.element.remove_child(&child) {
				error!("Failed to detach child during refresh: {:?}", error);
				break;
			}
		}

		let renderers = self.state.borrow().render_history.clone();
		trace!("Replaying {} renderer(s).", renderers.len());
		for renderer in renderers {
			let rendered = renderer();
			self.apply(rendered, Record::Skip);
		}

		let directives = self.state.borrow().attribute_history.clone();
		trace!("Replaying {} attribute directive(s).", directives.len());
		for directive in directives {
			let value = directive.source.resolve();
			(directive.apply)(&self.element, &value);
		}
	}

	fn apply(&self, child: Child, record: Record) {
		match child {
			Child::Node(node) => {
				if let Err(error) = self.element.append_child(node.element().as_ref()) {
					error!("Failed to append child element: {:?}", error);
				}
			}
			Child::Text(text) => {
				let text = web::document().create_text_node(&text);
				if let Err(error) = self.element.append_child(text.as_ref()) {
					error!("Failed to append text node: {:?}", error);
				}
			}
			Child::Sequence(nodes) => {
				for node in nodes {
					if let Err(error) = self.element.append_child(node.element().as_ref()) {
						error!("Failed to append sequenced element: {:?}", error);
					}
				}
			}
			Child::Renderer(renderer) => {
				if let Record::Append = record {
					self.state.borrow_mut().render_history.push(Rc::clone(&renderer));
					self.retain();
				}
				// The user closure runs outside any state borrow.
				let rendered = renderer();
				self.apply(rendered, record);
			}
			Child::Attribute(directive) => {
				let value = directive.source.resolve();
				(directive.apply)(&self.element, &value);
				if let Record::Append = record {
					self.state.borrow_mut().attribute_history.push(directive);
					self.retain();
				}
			}
			Child::Listener(directive) => self.bind_listener(&directive),
			Child::Refresh(directive) => self.subscribe_refresh(&directive),
			Child::Nothing => {}
		}
	}

	fn bind_listener(&self, directive: &EventListenerDirective) {
		let slot = directive.handler_slot();
		let listener = Rc::clone(&directive.listener);
		let closure = Closure::wrap(Box::new(move |event: web_sys::Event| listener(event)) as Box<dyn Fn(web_sys::Event)>);

		if let Err(error) = js_sys::Reflect::set(self.element.as_ref(), &JsValue::from_str(&slot), closure.as_ref()) {
			error!("Failed to assign handler slot {:?}: {:?}", slot, error);
		}

		// Single slot per event type: the previous closure, if any, drops here.
		self.state.borrow_mut().listener_slots.insert(slot, closure);
		self.retain();
	}

	fn subscribe_refresh(&self, directive: &RefreshDirective) {
		trace!("Subscribing <{}> to {:?}.", self.element.tag_name(), directive.event);
		let node = self.clone();
		registry::subscribe(&directive.event, Rc::new(move || node.refresh()));
		self.retain();
	}

	fn retain(&self) {
		let already = {
			let mut state = self.state.borrow_mut();
			let already = state.retained;
			state.retained = true;
			already
		};
		if !already {
			registry::retain(&self.state);
		}
	}
}

impl Debug for ViewNode {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		let state = self.state.borrow();
		f.debug_struct("ViewNode")
			.field("tag", &self.element.tag_name())
			.field("renderers", &state.render_history.len())
			.field("attributes", &state.attribute_history.len())
			.field("listeners", &state.listener_slots.len())
			.finish()
	}
}

/// Adopts the first element matching `selector` and composes `children`
/// into it.
pub fn mount<M>(selector: &str, children: impl Children<M>) -> ViewNode {
	let element = web::document()
		.query_selector(selector)
		.expect_throw("domfn: Invalid mount selector.")
		.unwrap_or_else(|| throw_str(&format!("domfn: Selector {:?} matched no element.", selector)));
	ViewNode::adopt(element).compose(children)
}
