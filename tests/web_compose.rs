#![cfg(target_arch = "wasm32")]

use domfn::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};

wasm_bindgen_test_configure!(run_in_browser);

/// `NAME:text` per direct child, in DOM order.
fn outline(node: &ViewNode) -> Vec<String> {
	let children = node.element().child_nodes();
	(0..children.length())
		.map(|i| {
			let child = children.item(i).unwrap();
			format!("{}:{}", child.node_name(), child.text_content().unwrap_or_default())
		})
		.collect()
}

fn property(element: &web_sys::Element, name: &str) -> String {
	js_sys::Reflect::get(element.as_ref(), &name.into())
		.unwrap()
		.as_string()
		.unwrap()
}

#[wasm_bindgen_test]
fn scalars_compose_to_single_text_nodes() {
	for (node, expected) in vec![(div("hi"), "hi"), (div(42), "42"), (div(4.5), "4.5")] {
		let children = node.element().child_nodes();
		assert_eq!(children.length(), 1);
		let only = children.item(0).unwrap();
		assert_eq!(only.node_name(), "#text");
		assert_eq!(only.text_content().unwrap(), expected);
	}
}

#[wasm_bindgen_test]
fn sequences_append_their_nodes_in_order() {
	let batch = vec![span("a"), span("b"), span("c")];
	let node = div(batch);
	assert_eq!(outline(&node), ["SPAN:a", "SPAN:b", "SPAN:c"]);
}

#[wasm_bindgen_test]
fn builders_nest() {
	let node = div((h1("Hello"), p("World")));
	assert_eq!(outline(&node), ["H1:Hello", "P:World"]);
}

#[wasm_bindgen_test]
fn absent_values_compose_to_nothing() {
	let node = div(("shown", true, false, None::<&str>));
	assert_eq!(outline(&node), ["#text:shown"]);
}

#[wasm_bindgen_test]
fn attribute_directives_assign_properties() {
	let node = input((class_name("field"), value("abc"), placeholder("type here")));
	assert_eq!(node.element().class_name(), "field");
	assert_eq!(property(node.element(), "value"), "abc");
	assert_eq!(property(node.element(), "placeholder"), "type here");
}

#[wasm_bindgen_test]
fn listeners_bind_as_single_slot_handlers() {
	use std::{cell::Cell, rc::Rc};

	let clicks = Rc::new(Cell::new(0));
	let first = Rc::clone(&clicks);
	let second = Rc::clone(&clicks);
	let node = button((
		"go",
		on_click(move |_| first.set(first.get() + 1)),
		on_click(move |_| second.set(second.get() + 10)),
	));

	node.element().dyn_ref::<web_sys::HtmlElement>().unwrap().click();
	assert_eq!(clicks.get(), 10);
}

#[wasm_bindgen_test]
fn mount_composes_into_an_existing_element() {
	let document = web_sys::window().unwrap().document().unwrap();
	let host = document.create_element("div").unwrap();
	host.set_id("mount-host");
	document.body().unwrap().append_child(host.as_ref()).unwrap();

	let mounted = mount("#mount-host", span("mounted"));
	assert_eq!(outline(&mounted), ["SPAN:mounted"]);

	host.remove();
}

#[wasm_bindgen_test]
fn css_appends_a_style_block_per_call() {
	let head = web_sys::window().unwrap().document().unwrap().head().unwrap();
	let before = head.child_nodes().length();

	css(".a { color: red; }");
	css(".a { color: red; }");

	assert_eq!(head.child_nodes().length(), before + 2);
}
