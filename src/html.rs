//! The factory layer: one function per element name, attribute name and
//! event name, plus the stylesheet injector. Everything here funnels into
//! [`ViewNode::compose`] or the directive constructors — no logic of its
//! own.

use crate::{
	child::{Child, Children},
	compose::ViewNode,
	directive::{attribute, on, IntoAttrSource},
};
use tracing::error;
use wasm_bindgen::UnwrapThrowExt;

macro_rules! elements {
	($($name:ident)*) => {$(
		pub fn $name<M>(children: impl Children<M>) -> ViewNode {
			ViewNode::create(stringify!($name)).compose(children)
		}
	)*};
}

elements! {
	a article aside button canvas div footer form
	h1 h2 h3 h4 h5 h6 head header img input label li main nav
	ol option p section select span table td textarea th tr ul
}

macro_rules! attributes {
	($($name:ident => $property:literal),* $(,)?) => {$(
		pub fn $name(value: impl IntoAttrSource) -> Child {
			attribute($property, value)
		}
	)*};
}

attributes! {
	alt => "alt",
	class_name => "className",
	href => "href",
	html_for => "htmlFor",
	id => "id",
	name => "name",
	placeholder => "placeholder",
	src => "src",
	style => "style",
	target => "target",
	title => "title",
	type_ => "type",
	value => "value",
}

macro_rules! events {
	($($name:ident => $event:literal),* $(,)?) => {$(
		pub fn $name<F: Fn(web_sys::Event) + 'static>(listener: F) -> Child {
			on($event, listener)
		}
	)*};
}

events! {
	on_blur => "blur",
	on_change => "change",
	on_click => "click",
	on_focus => "focus",
	on_input => "input",
	on_key_down => "keydown",
	on_key_up => "keyup",
	on_mouse_enter => "mouseenter",
	on_mouse_leave => "mouseleave",
	on_submit => "submit",
}

/// Appends `stylesheet` to the document head as a fresh `<style>` block.
///
/// Append-only: every call adds another block, nothing deduplicates or
/// removes them.
pub fn css(stylesheet: &str) {
	let document = crate::web::document();
	let style = document
		.create_element("style")
		.expect_throw("domfn: Failed to create a style element.");
	style.set_inner_html(stylesheet);

	let head = document.head().expect_throw("domfn: No `head` in this document.");
	if let Err(error) = head.append_child(style.as_ref()) {
		error!("Failed to append stylesheet block: {:?}", error);
	}
}
