#![doc(html_root_url = "https://docs.rs/domfn/0.1.0")]
#![warn(clippy::pedantic)]

//! Declarative DOM construction and refresh from plain function calls.
//!
//! Element builders ([`html::div`], [`html::h1`], …) compose heterogeneous
//! [`Child`] values into real [`web_sys::Element`]s. Render functions and
//! attribute directives are recorded on the element they are composed into
//! and replayed whenever an event the element subscribed to via
//! [`refresh_on`] is [`dispatch`]ed.

pub mod child;
pub mod compose;
pub mod directive;
pub mod html;
pub mod registry;
mod web;

pub use child::{Child, Children, IntoChild};
pub use compose::{mount, ViewNode};
pub use directive::{attribute, on, refresh_on, AttrSource, IntoAttrSource};
pub use registry::{dispatch, reset};

#[cfg(doctest)]
pub mod readme {
	doc_comment::doctest!("../README.md");
}

/// The whole application-facing surface in one import.
pub mod prelude {
	pub use crate::{
		child::Child,
		compose::{mount, ViewNode},
		directive::{attribute, on, refresh_on},
		html::*,
		registry::{dispatch, reset},
	};
}
