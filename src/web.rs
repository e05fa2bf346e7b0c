use wasm_bindgen::UnwrapThrowExt;
use web_sys::Document;

pub(crate) fn document() -> Document {
	web_sys::window()
		.expect_throw("domfn: No `window` in this environment.")
		.document()
		.expect_throw("domfn: No `document` found on `window`.")
}
