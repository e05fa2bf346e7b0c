use crate::{
	compose::ViewNode,
	directive::{AttributeDirective, EventListenerDirective, RefreshDirective},
};
use core::fmt::{self, Debug, Formatter};
use std::rc::Rc;

/// A zero-argument render function.
///
/// Invoked once when composed and again on every refresh replay of the
/// element it was recorded on.
pub type RenderFn = Rc<dyn Fn() -> Child>;

/// Everything an element builder accepts as a child, as one closed union.
///
/// Dispatch over children is a single exhaustive `match` — there is no
/// precedence order between kinds because every source type converts to
/// exactly one variant through [`IntoChild`].
pub enum Child {
	/// An already-built element, appended as-is (reparenting it if needed).
	Node(ViewNode),
	/// Scalar text, appended as a fresh text node.
	Text(String),
	/// A pre-built batch of elements, appended in order.
	Sequence(Vec<ViewNode>),
	/// A render function: recorded on the target, invoked, and its result
	/// composed. Replayed on refresh.
	Renderer(RenderFn),
	/// An attribute directive: applied to the target, then recorded.
	/// Re-applied on refresh.
	Attribute(AttributeDirective),
	/// An event-listener directive: bound as the target's single-slot
	/// `on…` handler. Not recorded, not replayed.
	Listener(EventListenerDirective),
	/// A refresh directive: subscribes the target with the registry.
	Refresh(RefreshDirective),
	/// Composes to nothing.
	Nothing,
}

impl Debug for Child {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Child::Node(node) => f.debug_tuple("Node").field(node).finish(),
			Child::Text(text) => f.debug_tuple("Text").field(text).finish(),
			Child::Sequence(nodes) => f.debug_tuple("Sequence").field(&nodes.len()).finish(),
			Child::Renderer(_) => f.write_str("Renderer"),
			Child::Attribute(directive) => f.debug_tuple("Attribute").field(directive).finish(),
			Child::Listener(directive) => f.debug_tuple("Listener").field(directive).finish(),
			Child::Refresh(directive) => f.debug_tuple("Refresh").field(directive).finish(),
			Child::Nothing => f.write_str("Nothing"),
		}
	}
}

/// Conversion into a [`Child`] variant. Total per source type, so composing
/// never has to probe shapes.
pub trait IntoChild {
	fn into_child(self) -> Child;
}

impl IntoChild for Child {
	fn into_child(self) -> Child {
		self
	}
}

impl IntoChild for ViewNode {
	fn into_child(self) -> Child {
		Child::Node(self)
	}
}

impl IntoChild for &str {
	fn into_child(self) -> Child {
		Child::Text(self.to_string())
	}
}

impl IntoChild for String {
	fn into_child(self) -> Child {
		Child::Text(self)
	}
}

macro_rules! text_scalars {
	($($ty:ty),*) => {$(
		impl IntoChild for $ty {
			fn into_child(self) -> Child {
				Child::Text(self.to_string())
			}
		}
	)*};
}

text_scalars!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, f32, f64);

impl IntoChild for Vec<ViewNode> {
	fn into_child(self) -> Child {
		Child::Sequence(self)
	}
}

/// `true` and `false` both compose to nothing, so `cond.then(|| …)`-style
/// gating can leave a bare `bool` behind without rendering anything.
impl IntoChild for bool {
	fn into_child(self) -> Child {
		Child::Nothing
	}
}

impl<C: IntoChild> IntoChild for Option<C> {
	fn into_child(self) -> Child {
		match self {
			Some(child) => child.into_child(),
			None => Child::Nothing,
		}
	}
}

impl<F, C> IntoChild for F
where
	F: Fn() -> C + 'static,
	C: IntoChild,
{
	fn into_child(self) -> Child {
		Child::Renderer(Rc::new(move || self().into_child()))
	}
}

/// Marker for the single-value [`Children`] impl; tuple impls use `()`.
pub struct One;

/// A heterogeneous child list: a single child value or a tuple of them.
///
/// `Marker` only disambiguates the blanket single-value impl from the tuple
/// impls and is always inferred at the call site.
pub trait Children<Marker> {
	fn append_to(self, out: &mut Vec<Child>);
}

impl<C: IntoChild> Children<One> for C {
	fn append_to(self, out: &mut Vec<Child>) {
		out.push(self.into_child());
	}
}

impl Children<()> for () {
	fn append_to(self, _out: &mut Vec<Child>) {}
}

macro_rules! tuple_children {
	($($name:ident)+) => {
		impl<$($name: IntoChild),+> Children<()> for ($($name,)+) {
			#[allow(non_snake_case)]
			fn append_to(self, out: &mut Vec<Child>) {
				let ($($name,)+) = self;
				$(out.push($name.into_child());)+
			}
		}
	};
}

tuple_children!(A);
tuple_children!(A B);
tuple_children!(A B C);
tuple_children!(A B C D);
tuple_children!(A B C D E);
tuple_children!(A B C D E F);
tuple_children!(A B C D E F G);
tuple_children!(A B C D E F G H);
tuple_children!(A B C D E F G H I);
tuple_children!(A B C D E F G H I J);
tuple_children!(A B C D E F G H I J K);
tuple_children!(A B C D E F G H I J K L);

#[cfg(test)]
mod tests {
	use super::{Child, Children, IntoChild};

	#[test]
	fn scalars_convert_to_text() {
		assert!(matches!("hi".into_child(), Child::Text(text) if text == "hi"));
		assert!(matches!(String::from("hi").into_child(), Child::Text(text) if text == "hi"));
		assert!(matches!(42.into_child(), Child::Text(text) if text == "42"));
		assert!(matches!(4.5.into_child(), Child::Text(text) if text == "4.5"));
	}

	#[test]
	fn absent_values_convert_to_nothing() {
		assert!(matches!(true.into_child(), Child::Nothing));
		assert!(matches!(false.into_child(), Child::Nothing));
		assert!(matches!(None::<&str>.into_child(), Child::Nothing));
		assert!(matches!(Some("x").into_child(), Child::Text(text) if text == "x"));
	}

	#[test]
	fn closures_convert_to_renderers() {
		let renderer = match (|| "rendered").into_child() {
			Child::Renderer(renderer) => renderer,
			other => panic!("expected a renderer, got {:?}", other),
		};
		assert!(matches!(renderer(), Child::Text(text) if text == "rendered"));
	}

	#[test]
	fn tuples_append_in_order() {
		let mut out = Vec::new();
		("a", 1, "b").append_to(&mut out);
		let texts: Vec<_> = out
			.iter()
			.map(|child| match child {
				Child::Text(text) => text.as_str(),
				other => panic!("expected text, got {:?}", other),
			})
			.collect();
		assert_eq!(texts, ["a", "1", "b"]);
	}

	#[test]
	fn unit_appends_nothing() {
		let mut out = Vec::new();
		().append_to(&mut out);
		assert!(out.is_empty());
	}
}
