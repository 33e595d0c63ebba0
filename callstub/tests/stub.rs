// vim: tw=80
//! Pattern table lookup and diagnostics
#![deny(warnings)]

use std::collections::BTreeMap;

use callstub::*;
use pretty_assertions::assert_eq;

#[derive(Clone, Debug, Default, PartialEq, thiserror::Error)]
#[error("test exception: {0}")]
struct TestException(String);

type TestStub = Stub<&'static str, TestException>;

#[test]
fn exact_values() {
    let mut s: TestStub = stub!{
        call!("hello") => returns("world"),
        call!("bye") => returns("see you"),
    };
    assert_eq!("world", s.invoke(call!("hello")).unwrap());
    assert_eq!("see you", s.invoke(call!("bye")).unwrap());
    assert_eq!("world", s.invoke(call!("hello")).unwrap());
}

#[test]
fn matches_in_registration_order() {
    let mut s: TestStub = stub!{
        call!(Any::of(Kind::Str)) => returns("string"),
        call!(Any::new()) => returns("anything"),
        call!(1) => returns("unreachable"),
    };
    assert_eq!("string", s.invoke(call!("1")).unwrap());
    assert_eq!("anything", s.invoke(call!(1)).unwrap());
}

#[test]
fn catch_all_first_shadows_everything() {
    let mut s: TestStub = stub!{
        call!(Any::new()) => returns("anything"),
        call!("hello") => returns("world"),
    };
    assert_eq!("anything", s.invoke(call!("hello")).unwrap());
}

#[test]
fn arity_must_match() {
    let mut s: TestStub = stub!{
        call!(Any::new()) => returns("one"),
        call!(Any::new(), Any::new()) => returns("two"),
    };
    assert_eq!("one", s.invoke(call!(1)).unwrap());
    assert_eq!("two", s.invoke(call!(1, 2)).unwrap());
    assert!(s.invoke(call!()).unwrap_err().is_unexpected());
}

#[test]
fn keyword_arguments() {
    let mut s: TestStub = stub!{
        call!("get", timeout = Any::of(Kind::Int)) => returns("with timeout"),
        call!("get") => returns("without"),
    };
    assert_eq!("with timeout", s.invoke(call!("get", timeout = 5)).unwrap());
    assert_eq!("without", s.invoke(call!("get")).unwrap());
    let e = s.invoke(call!("get", timeout = "5")).unwrap_err();
    assert!(e.is_unexpected());
}

#[test]
fn configured_failures() {
    let mut s: TestStub = stub!{
        call!("bad") => raises(TestException("bad".to_owned())),
        call!("fresh") => raises_new(TestException::default),
    };
    let e = s.invoke(call!("bad")).unwrap_err();
    assert_eq!("test exception: bad", e.to_string());
    assert_eq!(Some(TestException("bad".to_owned())), e.raised());
    assert_eq!(Some(TestException::default()),
               s.invoke(call!("fresh")).unwrap_err().raised());
}

#[test]
fn container_arguments() {
    let mut m = BTreeMap::new();
    m.insert("k", vec![1, 2]);
    let mut s: TestStub = stub!{
        call!(m.clone()) => returns("map"),
        call!(vec![Any::new().into(), Value::from(2)]) => returns("list"),
    };
    assert_eq!("map", s.invoke(call!(m)).unwrap());
    assert_eq!("list", s.invoke(call!(vec![7, 2])).unwrap());
    assert!(s.invoke(call!(vec![7, 3])).unwrap_err().is_unexpected());
}

#[test]
fn from_pairs() {
    let mut s: TestStub = stub(vec![
        (call!(1), returns("one")),
        (call!(2), returns("two")),
    ]);
    assert_eq!("two", s.invoke(call!(2)).unwrap());
    let mut s: TestStub = vec![(call!(3), returns("three"))]
        .into_iter()
        .collect();
    assert_eq!("three", s.invoke(call!(3)).unwrap());
}

#[test]
fn patterns() {
    let mut s = TestStub::new();
    assert!(s.is_empty());
    assert_eq!(0, s.push(call!("a"), returns("A")));
    assert_eq!(1, s.push(call!("b"), returns("B")));
    assert_eq!(2, s.len());
    let p: Vec<String> = s.patterns().map(ToString::to_string).collect();
    assert_eq!(vec!["call(\"a\")", "call(\"b\")"], p);
}

mod unexpected {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn message() {
        let mut s: TestStub = stub!{
            call!("a") => returns("A"),
            call!("b", flag = true) => returns("B"),
        };
        let e = s.invoke(call!("x")).unwrap_err();
        assert!(e.is_unexpected());
        assert_eq!("Unexpected stub call:\n    call(\"x\")\n\
                    The following calls are configured:\n    call(\"a\")\n    \
                    call(\"b\", flag=true)\n",
                   e.to_string());
    }

    #[test]
    fn details() {
        let mut s: TestStub = stub!{
            call!("a") => returns("A"),
        };
        match s.invoke(call!("x")).unwrap_err() {
            Error::Unexpected(u) => {
                assert_eq!(&call!("x"), u.call());
                assert_eq!(&[call!("a")][..], u.configured());
                assert!(!u.is_unconfigured());
            },
            e => panic!("Unexpected error {:?}", e)
        }
    }

    #[test]
    fn unconfigured() {
        let mut s: TestStub = stub!{};
        let e = s.invoke(call!("x")).unwrap_err();
        assert_eq!("Unexpected call of an unconfigured stub", e.to_string());
    }
}

/// Object equality need not be symmetric.  A pattern matches if either side
/// says so.
mod asymmetric_objects {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Only equal to other Strict objects with the same id
    #[derive(Debug)]
    struct Strict(u32);
    impl Object for Strict {
        fn eq_value(&self, other: &Value) -> bool {
            other.downcast_ref::<Strict>().map_or(false, |s| s.0 == self.0)
        }
    }

    /// Equal to anything
    #[derive(Debug)]
    struct Lenient;
    impl Object for Lenient {
        fn eq_value(&self, _other: &Value) -> bool {
            true
        }
    }

    #[test]
    fn strict_pattern_lenient_call() {
        let mut s: TestStub = stub!{
            call!(Value::object(Strict(1))) => returns("strict"),
        };
        assert_eq!("strict", s.invoke(call!(Value::object(Lenient))).unwrap());
    }

    #[test]
    fn strict_both_sides() {
        let mut s: TestStub = stub!{
            call!(Value::object(Strict(1))) => returns("strict"),
        };
        assert_eq!("strict", s.invoke(call!(Value::object(Strict(1)))).unwrap());
        assert!(s.invoke(call!(Value::object(Strict(2)))).unwrap_err()
                .is_unexpected());
        assert!(s.invoke(call!(1)).unwrap_err().is_unexpected());
    }

    /// A wildcard still matches an object argument when its pattern also
    /// relies on the call's side deciding equality
    #[test]
    fn wildcard_beside_strict_object() {
        let mut s: TestStub = stub!{
            call!(Value::object(Strict(1)), Any::new()) => returns("mixed"),
        };
        let c = call!(Value::object(Lenient), Value::object(Strict(9)));
        assert_eq!("mixed", s.invoke(c).unwrap());
    }

    #[test]
    fn wildcard_on_either_side_of_object() {
        let any = Value::from(Any::new());
        assert_eq!(Value::object(Strict(9)), any);
        assert_eq!(any, Value::object(Strict(9)));
        assert!(Value::object(Strict(9)) != Value::from(Any::of(Kind::Int)));
    }
}

#[test]
fn booleans_match_integers() {
    let mut s: TestStub = stub!{
        call!(1) => returns("one"),
        call!(0.0) => returns("zero"),
    };
    assert_eq!("one", s.invoke(call!(true)).unwrap());
    assert_eq!("zero", s.invoke(call!(false)).unwrap());
    assert!(s.invoke(call!(2)).unwrap_err().is_unexpected());
}
