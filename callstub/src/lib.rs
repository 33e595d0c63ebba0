// vim: tw=80
//! Call-matching stubs for test doubles.
//!
//! Callstub configures what a test double returns, or raises, depending on
//! the arguments it is called with.  Calls are compared against an ordered
//! table of patterns, and patterns may contain wildcard matchers.
//!
//! # User Guide
//!
//! * [`Getting started`](#getting-started)
//! * [`Matching arguments`](#matching-arguments)
//! * [`Sequences`](#sequences)
//! * [`Raising failures`](#raising-failures)
//! * [`Fluent configuration`](#fluent-configuration)
//! * [`Custom argument types`](#custom-argument-types)
//!
//! ## Getting Started
//!
//! A [`Stub`] maps call patterns to responses.  Install it as the side effect
//! of a double, and the double answers every call by looking it up.
//! ```
//! use callstub::*;
//!
//! let m = MockFn::<&str, String>::named("greet");
//! m.set_side_effect(stub!{
//!     call!("hello") => returns("world"),
//!     call!("bye") => returns("see you"),
//! });
//! assert_eq!("world", m.call(call!("hello")).unwrap());
//! assert_eq!("see you", m.call(call!("bye")).unwrap());
//! ```
//!
//! A call that matches no pattern fails with [`Error::Unexpected`], whose
//! message lists every configured pattern.
//!
//! ## Matching arguments
//!
//! Arguments are compared with [`Value`] equality, which treats
//! [`Matcher`]s as wildcards:
//!
//! * [`Any`] matches anything, optionally only values of one [`Kind`], and
//!   can be refined with arbitrary predicates.
//! * [`Contains`] matches containers holding a value, strings holding a
//!   substring, and maps holding a key.
//! * [`AnyOf`] matches any one of a fixed set of values.
//!
//! Patterns are tried in the order they were added, so put catch-alls last.
//! ```
//! # use callstub::*;
//! let mut s: Stub<u32, String> = stub!{
//!     call!(Any::of(Kind::Str).such_that(|v| v.as_str() == Some("a"))) =>
//!         returns(1),
//!     call!(Contains::new("b")) => returns(2),
//!     call!(any_of![3, 4]) => returns(3),
//!     call!(Any::new()) => returns(0),
//! };
//! assert_eq!(1, s.invoke(call!("a")).unwrap());
//! assert_eq!(2, s.invoke(call!("abc")).unwrap());
//! assert_eq!(3, s.invoke(call!(4)).unwrap());
//! assert_eq!(0, s.invoke(call!(5)).unwrap());
//! ```
//!
//! Keyword arguments are written `name = value`.  Their order doesn't matter.
//! ```
//! # use callstub::*;
//! assert_eq!(call!(1, x = 2, y = 3), call!(1, y = 3, x = 2));
//! assert_ne!(call!(1, x = 2), call!(1, 2));
//! ```
//!
//! ## Sequences
//!
//! A response can be a [`Sequence`], which yields one outcome per call and
//! fails with [`Error::Exhausted`] once it runs out.  A list of several
//! outcomes is shorthand for a sequence.
//! ```
//! # use callstub::*;
//! let mut s: Stub<u32, String> = stub!{
//!     call!() => vec![returns(1), returns(2)],
//! };
//! assert_eq!(1, s.invoke(call!()).unwrap());
//! assert_eq!(2, s.invoke(call!()).unwrap());
//! assert!(s.invoke(call!()).unwrap_err().is_exhausted());
//! ```
//!
//! ## Raising failures
//!
//! The second type parameter of a stub is the type of failure it can be told
//! to raise.  Use [`raises`] to raise one particular value every time, or
//! [`raises_new`] to build a fresh one on each call.
//! ```
//! # use callstub::*;
//! #[derive(Clone, Debug, Default, PartialEq)]
//! struct Timeout(u32);
//!
//! let mut s: Stub<(), Timeout> = stub!{
//!     call!(1) => raises(Timeout(5)),
//!     call!(2) => raises_new(Timeout::default),
//! };
//! assert_eq!(Some(Timeout(5)), s.invoke(call!(1)).unwrap_err().raised());
//! assert_eq!(Some(Timeout(0)), s.invoke(call!(2)).unwrap_err().raised());
//! ```
//!
//! ## Fluent configuration
//!
//! [`when`] builds the table incrementally.  Results chained onto one
//! pattern are produced in order, and the last one is repeated forever.
//! ```
//! # use callstub::*;
//! let m = MockFn::<u32, String>::new();
//! when(&m).unwrap().called_with(call!("x")).then(1).then(2);
//! assert_eq!(1, m.call(call!("x")).unwrap());
//! assert_eq!(2, m.call(call!("x")).unwrap());
//! assert_eq!(2, m.call(call!("x")).unwrap());
//! ```
//!
//! `when` refuses to touch a double that already has some other side effect.
//!
//! ## Custom argument types
//!
//! Types that aren't covered by [`Value`]'s variants can implement
//! [`Object`] and be passed with [`Value::object`].

extern crate self as callstub;

mod call;
mod double;
mod error;
mod fluent;
mod matchers;
mod sequence;
mod stub;
mod value;

pub use callstub_derive::call;
pub use predicates::prelude::{Predicate, predicate};

pub use crate::{
    call::Call,
    double::{Double, MockFn, SideEffect},
    error::{ConfigError, Error, UnexpectedStubCall},
    fluent::{CalledWith, When, when},
    matchers::{Any, AnyOf, Contains, Matcher},
    sequence::{Outcome, Raise, Sequence, raises, raises_new, returns, seq},
    stub::{Response, Stub, stub},
    value::{Kind, Object, Value}
};

/// Build a [`Stub`] from `pattern => response` pairs.
///
/// Each response may be anything that converts into a [`Response`]: an
/// [`Outcome`], a [`Sequence`], or a list of outcomes.
///
/// # Examples
/// ```
/// # use callstub::*;
/// let mut s: Stub<&str, String> = stub!{
///     call!(1) => returns("one"),
///     call!(2) => seq(["two", "deux"].map(returns)),
/// };
/// assert_eq!(2, s.len());
/// assert_eq!("two", s.invoke(call!(2)).unwrap());
/// assert_eq!("deux", s.invoke(call!(2)).unwrap());
/// ```
#[macro_export]
macro_rules! stub {
    () => {
        $crate::Stub::new()
    };
    ($($pattern:expr => $response:expr),+ $(,)?) => {
        $crate::Stub::new()$(.entry($pattern, $response))+
    };
}

/// Build an [`AnyOf`] matcher from a list of values of mixed types.
///
/// # Examples
/// ```
/// # use callstub::*;
/// let m = any_of!["a", 1, 2.5];
/// assert!(m == 1);
/// assert!(m == "a");
/// assert!(m != "b");
/// assert!(any_of![].is_empty());
/// ```
#[macro_export]
macro_rules! any_of {
    ($($value:expr),* $(,)?) => {
        $crate::AnyOf::new(
            <::std::vec::Vec<$crate::Value>>::from([$($crate::Value::from($value)),*])
        )
    };
}
