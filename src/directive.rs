use crate::child::Child;
use core::fmt::{self, Debug, Formatter};
use std::rc::Rc;
use tracing::error;
use wasm_bindgen::JsValue;

/// Applies one attribute/property to an element.
///
/// `apply` receives the element and the resolved source text; the default
/// applier from [`attribute`] assigns the named JS property, so `value`,
/// `className` and friends behave like direct property writes rather than
/// `setAttribute` calls.
#[derive(Clone)]
pub struct AttributeDirective {
	pub(crate) name: Rc<str>,
	pub(crate) apply: Rc<dyn Fn(&web_sys::Element, &str)>,
	pub(crate) source: AttrSource,
}

impl Debug for AttributeDirective {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("AttributeDirective")
			.field("name", &self.name)
			.field("source", &self.source)
			.finish()
	}
}

/// The user-provided attribute value: fixed text, or a zero-argument
/// function re-resolved at every application.
#[derive(Clone)]
pub enum AttrSource {
	Value(String),
	Compute(Rc<dyn Fn() -> String>),
}

impl AttrSource {
	pub(crate) fn resolve(&self) -> String {
		match self {
			AttrSource::Value(value) => value.clone(),
			AttrSource::Compute(compute) => compute(),
		}
	}
}

impl Debug for AttrSource {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			AttrSource::Value(value) => f.debug_tuple("Value").field(value).finish(),
			AttrSource::Compute(_) => f.write_str("Compute"),
		}
	}
}

/// Conversion into an [`AttrSource`].
pub trait IntoAttrSource {
	fn into_attr_source(self) -> AttrSource;
}

impl IntoAttrSource for AttrSource {
	fn into_attr_source(self) -> AttrSource {
		self
	}
}

impl IntoAttrSource for &str {
	fn into_attr_source(self) -> AttrSource {
		AttrSource::Value(self.to_string())
	}
}

impl IntoAttrSource for String {
	fn into_attr_source(self) -> AttrSource {
		AttrSource::Value(self)
	}
}

macro_rules! attr_scalars {
	($($ty:ty),*) => {$(
		impl IntoAttrSource for $ty {
			fn into_attr_source(self) -> AttrSource {
				AttrSource::Value(self.to_string())
			}
		}
	)*};
}

attr_scalars!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, f32, f64);

impl<F, S> IntoAttrSource for F
where
	F: Fn() -> S + 'static,
	S: ToString,
{
	fn into_attr_source(self) -> AttrSource {
		AttrSource::Compute(Rc::new(move || self().to_string()))
	}
}

/// Binds `listener` as the element's native `on<event>` handler.
///
/// Single slot per event type: binding a second listener for the same event
/// on the same element overwrites the first.
#[derive(Clone)]
pub struct EventListenerDirective {
	pub(crate) event_type: Rc<str>,
	pub(crate) listener: Rc<dyn Fn(web_sys::Event)>,
}

impl EventListenerDirective {
	/// The JS property slot the handler is assigned to.
	pub(crate) fn handler_slot(&self) -> String {
		format!("on{}", self.event_type.to_lowercase())
	}
}

impl Debug for EventListenerDirective {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("EventListenerDirective")
			.field("event_type", &self.event_type)
			.finish()
	}
}

/// Re-renders the carrying element whenever `event` is dispatched.
#[derive(Clone, Debug)]
pub struct RefreshDirective {
	pub(crate) event: Rc<str>,
}

/// Generic property directive; the named builders in [`crate::html`]
/// specialize it.
pub fn attribute(name: &str, value: impl IntoAttrSource) -> Child {
	let name = Rc::<str>::from(name);
	let property = Rc::clone(&name);
	Child::Attribute(AttributeDirective {
		name,
		apply: Rc::new(move |element, value| set_property(element, &property, value)),
		source: value.into_attr_source(),
	})
}

/// Generic event-listener directive; the named `on_*` builders in
/// [`crate::html`] specialize it.
pub fn on<F>(event_type: &str, listener: F) -> Child
where
	F: Fn(web_sys::Event) + 'static,
{
	Child::Listener(EventListenerDirective {
		event_type: Rc::from(event_type),
		listener: Rc::new(listener),
	})
}

/// Subscribes the carrying element to `event`: every dispatch of it clears
/// the element's children and replays its recorded histories.
pub fn refresh_on(event: &str) -> Child {
	Child::Refresh(RefreshDirective { event: Rc::from(event) })
}

fn set_property(element: &web_sys::Element, name: &str, value: &str) {
	if let Err(error) = js_sys::Reflect::set(element.as_ref(), &JsValue::from_str(name), &JsValue::from_str(value)) {
		error!("Failed to assign property {:?}: {:?}", name, error);
	}
}
