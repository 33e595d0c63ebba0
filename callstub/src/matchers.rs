// vim: tw=80
//! Wildcard matchers
//!
//! Matchers act as wildcards when defining a stub or when comparing calls.  A
//! matcher placed in a [`Call`](crate::Call) compares equal to any argument it
//! matches, from either side of the `==`.

use std::{
    any::type_name,
    fmt,
    sync::Arc
};

use fragile::Fragile;
use predicates::prelude::{Predicate, predicate};
use predicates_tree::CaseTreeExt;

use crate::value::{Kind, Value};

/// One link of an [`Any`]'s `such_that` chain
#[derive(Clone)]
struct Refinement {
    name: String,
    pred: Arc<dyn Predicate<Value> + Send + Sync>
}

/// Display name of a predicate function: its bare name, or `<closure>`
fn fn_name<F>() -> String {
    let full = type_name::<F>();
    if full.ends_with("{{closure}}") {
        "<closure>".to_owned()
    } else {
        full.rsplit("::").next().unwrap_or(full).to_owned()
    }
}

/// Matches any value, optionally restricted to one [`Kind`] and refined by a
/// chain of predicates.
///
/// # Examples
/// ```
/// # use callstub::*;
/// let whatever = Any::new();
/// assert!(whatever == "hello");
/// assert!(whatever == 100);
/// assert!(whatever == vec![1, 2, 3]);
///
/// let anystring = Any::of(Kind::Str);
/// assert!(anystring == "hello");
/// assert!(anystring != vec!["hello", "world"]);
///
/// let long_word = anystring.such_that(|s| s.as_str().map_or(false, |s| s.len() > 3));
/// assert!(long_word == "hello");
/// assert!(long_word != "hi");
/// // such_that never modifies the matcher it was called on
/// assert!(anystring == "hi");
/// ```
#[derive(Clone, Default)]
pub struct Any {
    kind: Option<Kind>,
    chain: Vec<Refinement>
}

impl Any {
    /// Match every value
    pub fn new() -> Self {
        Self::default()
    }

    /// Match only values of the given kind
    pub fn of(kind: Kind) -> Self {
        Any{kind: Some(kind), chain: Vec::new()}
    }

    /// Match only [`Object`](crate::Object)s of type `T`
    pub fn object<T: crate::Object>() -> Self {
        Any::of(Kind::object::<T>())
    }

    fn refined(&self, name: String, pred: Arc<dyn Predicate<Value> + Send + Sync>)
        -> Self
    {
        let mut chain = self.chain.clone();
        chain.push(Refinement{name, pred});
        Any{kind: self.kind, chain}
    }

    /// Derive a new matcher that additionally requires `f` to hold.
    pub fn such_that<F>(&self, f: F) -> Self
        where F: Fn(&Value) -> bool + Send + Sync + 'static
    {
        let name = fn_name::<F>();
        self.refined(name, Arc::new(predicate::function(f)))
    }

    /// Like [`such_that`](#method.such_that), but the refinement can be
    /// anything implementing [`Predicate`].  The predicate's `Display` names it
    /// in diagnostics.
    ///
    /// # Examples
    /// ```
    /// # use callstub::*;
    /// use callstub::predicate;
    /// let one = Any::new().such_that_pred(predicate::eq(Value::from(1)));
    /// assert!(one == 1);
    /// assert!(one != 2);
    /// ```
    pub fn such_that_pred<P>(&self, p: P) -> Self
        where P: Predicate<Value> + Send + Sync + 'static
    {
        self.refined(p.to_string(), Arc::new(p))
    }

    /// Single-threaded version of [`such_that`](#method.such_that).  Can be
    /// used when the predicate isn't `Send`.
    ///
    /// It is a runtime error to evaluate the matcher from a different thread
    /// than the one that created it.
    pub fn such_that_st<F>(&self, f: F) -> Self
        where F: Fn(&Value) -> bool + 'static
    {
        let name = fn_name::<F>();
        let fragile = Fragile::new(f);
        let g = move |v: &Value| (fragile.get())(v);
        self.refined(name, Arc::new(predicate::function(g)))
    }

    pub fn matches(&self, v: &Value) -> bool {
        self.kind.map_or(true, |k| k.admits(v)) &&
            self.chain.iter().all(|r| r.pred.eval(v))
    }

    /// Explain why `v` doesn't match, or `None` if it does.
    pub fn mismatch(&self, v: &Value) -> Option<String> {
        if let Some(k) = self.kind.filter(|k| !k.admits(v)) {
            return Some(format!("{} is not an instance of {}", v, k));
        }
        self.chain.iter()
            .find_map(|r| r.pred.find_case(false, v))
            .map(|case| case.tree().to_string())
    }
}

impl fmt::Display for Any {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.kind {
            Some(k) => write!(f, "Any({})", k)?,
            None => f.write_str("Any()")?
        }
        for r in self.chain.iter() {
            write!(f, ".such_that({})", r.name)?;
        }
        Ok(())
    }
}

/// Matches containers that contain a given value, or strings that contain a
/// given substring.
///
/// Maps are searched by key.  Comparing against a peer that can't contain the
/// needle, like a number, simply doesn't match.
///
/// # Examples
/// ```
/// # use callstub::*;
/// let contains_five = Contains::new(5);
/// assert!(contains_five == (0..10).collect::<Value>());
/// assert!(contains_five != (0..4).collect::<Value>());
///
/// let contains_ello = Contains::new("ello");
/// assert!(contains_ello == "hello");
/// assert!(contains_ello != "bye bye");
/// ```
#[derive(Clone)]
pub struct Contains {
    needle: Box<Value>
}

impl Contains {
    pub fn new<T: Into<Value>>(needle: T) -> Self {
        Contains{needle: Box::new(needle.into())}
    }

    pub fn matches(&self, v: &Value) -> bool {
        v.has_member(&self.needle)
    }
}

impl fmt::Display for Contains {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Contains({})", self.needle)
    }
}

/// Matches any one of an explicit set of values.
///
/// The peer must be exactly equal to one of the values; matchers inside the
/// set are not treated as wildcards.
///
/// # Examples
/// ```
/// # use callstub::*;
/// let is_a_small_prime = AnyOf::new([2, 3, 5, 7, 11, 13]);
/// assert!(is_a_small_prime == 3);
/// assert!(is_a_small_prime != 4);
///
/// let animal = any_of!["monkey", "donkey", 42];
/// assert!(animal == "donkey");
/// ```
#[derive(Clone, Default)]
pub struct AnyOf {
    values: Vec<Value>
}

impl AnyOf {
    /// Duplicate values are dropped, keeping the first occurrence.
    pub fn new<I, T>(values: I) -> Self
        where I: IntoIterator<Item = T>,
              T: Into<Value>
    {
        let mut set: Vec<Value> = Vec::new();
        for v in values.into_iter().map(Into::into) {
            if !set.iter().any(|x| x.strict_eq(&v)) {
                set.push(v);
            }
        }
        AnyOf{values: set}
    }

    pub fn matches(&self, v: &Value) -> bool {
        self.values.iter().any(|x| x.strict_eq(v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Display for AnyOf {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("AnyOf(")?;
        crate::value::join(f, &self.values)?;
        f.write_str(")")
    }
}

/// Any of the wildcard matchers, as stored in a [`Value`]
#[derive(Clone)]
pub enum Matcher {
    Any(Any),
    Contains(Contains),
    AnyOf(AnyOf),
}

impl Matcher {
    /// Does this matcher accept `v`?  Never panics.
    pub fn matches(&self, v: &Value) -> bool {
        match self {
            Matcher::Any(a) => a.matches(v),
            Matcher::Contains(c) => c.matches(v),
            Matcher::AnyOf(a) => a.matches(v),
        }
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Matcher::Any(a) => a.fmt(f),
            Matcher::Contains(c) => c.fmt(f),
            Matcher::AnyOf(a) => a.fmt(f),
        }
    }
}

// Matchers print the same way for Debug and Display, so that assert_eq!
// failures show the constructor arguments.
macro_rules! matcher_impls {
    ($($m:ident)*) => {
        $(
            impl fmt::Debug for $m {
                fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                    fmt::Display::fmt(self, f)
                }
            }

            impl<T: Clone + Into<Value>> PartialEq<T> for $m {
                fn eq(&self, other: &T) -> bool {
                    self.matches(&other.clone().into())
                }
            }

            matcher_impls!{@reflect $m, Value String bool i32 i64 f64}

            impl<'a> PartialEq<$m> for &'a str {
                fn eq(&self, other: &$m) -> bool {
                    other.matches(&Value::from(*self))
                }
            }

            impl<T: Clone + Into<Value>> PartialEq<$m> for Vec<T> {
                fn eq(&self, other: &$m) -> bool {
                    other.matches(&self.clone().into())
                }
            }
        )*
    };
    (@reflect $m:ident, $($peer:ident)*) => {
        $(
            impl PartialEq<$m> for $peer {
                fn eq(&self, other: &$m) -> bool {
                    other.matches(&self.clone().into())
                }
            }
        )*
    };
}
matcher_impls!{Any Contains AnyOf Matcher}
