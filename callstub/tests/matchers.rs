// vim: tw=80
//! Wildcard matchers compared against plain values and against each other
#![deny(warnings)]

use std::collections::BTreeMap;

use callstub::*;

fn is_positive(v: &Value) -> bool {
    v.as_int().map_or(false, |i| i > 0)
}

mod any {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn matches_everything() {
        let a = Any::new();
        assert!(a == "hello");
        assert!(a == 100);
        assert!(a == vec![1, 2, 3]);
        assert!(a == Value::None);
        assert!(a == Any::new());
    }

    #[test]
    fn from_either_side() {
        let a = Any::new();
        assert!("hello" == a);
        assert!(100 == a);
        assert!(Value::from(1.5) == a);
        assert!(vec![1, 2] == a);
    }

    #[test]
    fn of_kind() {
        let s = Any::of(Kind::Str);
        assert!(s == "hello");
        assert!(s != 1);
        assert!(s != vec!["hello", "world"]);
        let l = Any::of(Kind::List);
        assert!(l == vec!["hello", "world"]);
        assert!(l != "hello");
    }

    #[test]
    fn such_that() {
        let a = Any::of(Kind::Int).such_that(is_positive);
        assert!(a == 1);
        assert!(a != 0);
        assert!(a != "1");
    }

    #[test]
    fn such_that_chains() {
        let even = |v: &Value| v.as_int().map_or(false, |i| i % 2 == 0);
        let a = Any::new().such_that(is_positive).such_that(even);
        assert!(a == 2);
        assert!(a != 3);
        assert!(a != -2);
    }

    #[test]
    fn such_that_leaves_original_alone() {
        let base = Any::of(Kind::Int);
        let positive = base.such_that(is_positive);
        assert!(positive != -1);
        assert!(base == -1);
        assert_eq!("Any(int)", base.to_string());
    }

    #[test]
    fn sibling_refinements_are_independent() {
        let even = |v: &Value| v.as_int().map_or(false, |i| i % 2 == 0);
        let base = Any::of(Kind::Int);
        let positive = base.such_that(is_positive);
        let evens = base.such_that(even);
        assert!(positive == 3);
        assert!(evens != 3);
        assert!(evens == -2);
        assert!(positive != -2);
        assert!(base == 3);
        assert!(base == -2);
        assert_eq!("Any(int).such_that(is_positive)", positive.to_string());
        assert_eq!("Any(int).such_that(<closure>)", evens.to_string());
    }

    #[test]
    fn int_kind_admits_bool() {
        let a = Any::of(Kind::Int);
        assert!(a == true);
        assert!(Any::of(Kind::Bool) != 1);
    }

    #[test]
    fn such_that_st() {
        let limit = std::rc::Rc::new(3);
        let a = Any::new().such_that_st(move |v| {
            v.as_int().map_or(false, |i| i < *limit)
        });
        assert!(a == 2);
        assert!(a != 3);
    }

    #[test]
    fn such_that_pred() {
        let a = Any::new().such_that_pred(predicate::ne(Value::from(0)));
        assert!(a == 1);
        assert!(a != 0);
    }

    #[test]
    fn display() {
        assert_eq!("Any()", Any::new().to_string());
        assert_eq!("Any(str)", Any::of(Kind::Str).to_string());
        assert_eq!("Any(int).such_that(is_positive)",
                   Any::of(Kind::Int).such_that(is_positive).to_string());
        assert_eq!("Any().such_that(is_positive).such_that(<closure>)",
                   Any::new().such_that(is_positive).such_that(|_| true)
                        .to_string());
    }

    #[test]
    fn mismatch() {
        let a = Any::of(Kind::Int);
        assert_eq!(Some("\"x\" is not an instance of int".to_owned()),
                   a.mismatch(&Value::from("x")));
        assert_eq!(None, a.mismatch(&Value::from(7)));
    }

    #[test]
    fn object_kind() {
        #[derive(Debug)]
        struct Handle(u32);
        impl Object for Handle {
            fn eq_value(&self, other: &Value) -> bool {
                other.downcast_ref::<Handle>().map_or(false, |h| h.0 == self.0)
            }
        }
        let a = Any::object::<Handle>();
        assert!(a == Value::object(Handle(1)));
        assert!(a != 1);
        assert_eq!("Any(Handle)", a.to_string());
    }
}

mod contains {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn list() {
        let c = Contains::new(5);
        assert!(c == (0..10).collect::<Value>());
        assert!(c != (0..4).collect::<Value>());
        assert!((0..10).collect::<Value>() == c);
    }

    #[test]
    fn string() {
        let c = Contains::new("ello");
        assert!(c == "hello");
        assert!(c != "bye bye");
        assert!("well hello there" == c);
    }

    #[test]
    fn map_keys() {
        let mut m = BTreeMap::new();
        m.insert("hello", 1);
        let c = Contains::new("hello");
        assert!(c == Value::from(m.clone()));
        assert!(Contains::new(1) != Value::from(m));
    }

    #[test]
    fn bytes() {
        let hello = Value::from(&b"hello"[..]);
        assert!(Contains::new(&b"ell"[..]) == hello.clone());
        assert!(Contains::new(&b"elk"[..]) != hello.clone());
        assert!(Contains::new(i64::from(b'h')) == hello.clone());
        assert!(Contains::new(i64::from(b'z')) != hello.clone());
        assert!(Contains::new(1000) != hello.clone());
        assert!(hello == Contains::new(&b"llo"[..]));
    }

    #[test]
    fn object_membership() {
        /// A bag of integers
        #[derive(Debug)]
        struct Bag(Vec<i64>);
        impl Object for Bag {
            fn eq_value(&self, _other: &Value) -> bool {
                false
            }
            fn contains_value(&self, needle: &Value) -> Option<bool> {
                Some(needle.as_int().map_or(false, |i| self.0.contains(&i)))
            }
        }
        /// Not a container
        #[derive(Debug)]
        struct Opaque;
        impl Object for Opaque {
            fn eq_value(&self, _other: &Value) -> bool {
                true
            }
        }

        let bag = Value::object(Bag(vec![1, 2, 3]));
        assert!(Contains::new(2) == bag.clone());
        assert!(bag == Contains::new(3));
        assert!(Contains::new(4) != bag);
        assert!(Contains::new(2) != Value::object(Opaque));
        assert!(Value::object(Opaque) != Contains::new(2));
    }

    #[test]
    fn uncontainable_peer() {
        let c = Contains::new(1);
        assert!(c != 1);
        assert!(c != Value::None);
    }

    #[test]
    fn nested_matcher() {
        let c = Contains::new(Any::of(Kind::Str));
        assert!(c == vec![Value::from(1), Value::from("a")]);
        assert!(c != vec![1, 2]);
    }

    #[test]
    fn display() {
        assert_eq!("Contains(10)", Contains::new(10).to_string());
        assert_eq!("Contains(\"hello\")", Contains::new("hello").to_string());
    }
}

mod any_of {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn members() {
        let primes = AnyOf::new([2, 3, 5, 7, 11, 13]);
        assert!(primes == 3);
        assert!(primes != 4);
        assert!(13 == primes);
    }

    #[test]
    fn mixed() {
        let animal = any_of!["monkey", "donkey", 42];
        assert!(animal == "donkey");
        assert!(animal == 42);
        assert!(animal != "zebra");
    }

    #[test]
    fn empty() {
        let nothing = any_of![];
        assert!(nothing.is_empty());
        assert!(nothing != 1);
        assert!(nothing != Value::None);
        assert_eq!("AnyOf()", nothing.to_string());
    }

    #[test]
    fn duplicates_dropped() {
        let a = AnyOf::new([10, 10, 20]);
        assert_eq!(2, a.len());
    }

    #[test]
    fn members_are_not_wildcards() {
        let a = any_of![Any::new()];
        assert!(a != 1);
    }

    #[test]
    fn display() {
        assert_eq!("AnyOf(10)", AnyOf::new([10]).to_string());
        assert_eq!("AnyOf(1, \"a\")", any_of![1, "a"].to_string());
    }
}

mod value {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn nested_matchers_in_lists() {
        let v = Value::from(vec![Value::from(1), Any::new().into()]);
        assert_eq!(v, Value::from(vec![1, 99]));
        assert_ne!(v, Value::from(vec![2, 99]));
    }

    #[test]
    fn strict_eq_ignores_matchers() {
        let any: Value = Any::new().into();
        assert!(any == Value::from(1));
        assert!(!any.strict_eq(&Value::from(1)));
        assert!(!any.strict_eq(&any));
    }

    #[test]
    fn matcher_debug_is_display() {
        let m: Matcher = match Value::from(Contains::new(3)) {
            Value::Matcher(m) => m,
            _ => unreachable!()
        };
        assert_eq!("Contains(3)", format!("{:?}", m));
    }
}
