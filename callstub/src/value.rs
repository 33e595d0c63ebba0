// vim: tw=80
//! Dynamically typed argument values
//!
//! Arguments recorded in a [`Call`](crate::Call) are stored as [`Value`]s so
//! that a single pattern can mix literal arguments with wildcard
//! [`Matcher`](crate::Matcher)s of any shape.

use std::{
    collections::{BTreeMap, HashMap},
    fmt,
    sync::Arc
};

use crate::matchers::{Any, AnyOf, Contains, Matcher};

/// A user-defined argument type.
///
/// Implement this for types that don't fit any of the builtin [`Value`]
/// variants.  The object decides for itself what it is equal to, and that
/// decision need not be symmetric: a pattern table looks up calls with both
/// `pattern == call` and `call == pattern`, so an object whose equality only
/// "looks outward" still matches.
///
/// # Examples
/// ```
/// # use callstub::*;
/// #[derive(Debug, PartialEq)]
/// struct Point(i32, i32);
///
/// impl Object for Point {
///     fn eq_value(&self, other: &Value) -> bool {
///         other.downcast_ref::<Point>() == Some(self)
///     }
/// }
///
/// assert_eq!(Value::object(Point(1, 2)), Value::object(Point(1, 2)));
/// assert_ne!(Value::object(Point(1, 2)), Value::object(Point(2, 1)));
/// ```
pub trait Object: downcast::Any + fmt::Debug + Send + Sync {
    /// Equality against a peer value, evaluated with `self` on the left.
    /// Never called with a [`Matcher`] peer; matchers decide for themselves.
    fn eq_value(&self, other: &Value) -> bool;

    /// Membership test used by [`Contains`].  `None` means this object is not
    /// a container.
    fn contains_value(&self, _needle: &Value) -> Option<bool> {
        None
    }
}
downcast::downcast!(dyn Object);

/// Type tag used by [`Any::of`](crate::Any::of).
///
/// `Kind::Int` admits `Bool`s too, since booleans compare equal to `0` and
/// `1`.
#[derive(Clone, Copy, Debug)]
pub enum Kind {
    None,
    Bool,
    Int,
    Float,
    Str,
    Bytes,
    List,
    Map,
    /// A concrete [`Object`] type.  Build it with [`Kind::object`].
    Object {
        name: &'static str,
        test: fn(&dyn Object) -> bool
    }
}

fn is_instance<T: Object>(o: &dyn Object) -> bool {
    o.downcast_ref::<T>().is_ok()
}

impl Kind {
    /// The kind of every [`Object`] of type `T`
    pub fn object<T: Object>() -> Self {
        let full = std::any::type_name::<T>();
        let name = full.rsplit("::").next().unwrap_or(full);
        Kind::Object{name, test: is_instance::<T>}
    }

    /// Is `value` an instance of this kind?
    pub fn admits(&self, value: &Value) -> bool {
        match (self, value) {
            (Kind::None, Value::None) |
            (Kind::Bool, Value::Bool(_)) |
            (Kind::Int, Value::Int(_) | Value::Bool(_)) |
            (Kind::Float, Value::Float(_)) |
            (Kind::Str, Value::Str(_)) |
            (Kind::Bytes, Value::Bytes(_)) |
            (Kind::List, Value::List(_)) |
            (Kind::Map, Value::Map(_)) => true,
            (Kind::Object{test, ..}, Value::Object(o)) => test(o.as_ref()),
            _ => false
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Kind::None => "none",
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Float => "float",
            Kind::Str => "str",
            Kind::Bytes => "bytes",
            Kind::List => "list",
            Kind::Map => "map",
            Kind::Object{name, ..} => *name
        };
        f.write_str(name)
    }
}

/// An argument value.
///
/// Equality between `Value`s is evaluated in this order:
///
/// 1. A left-hand [`Matcher`] matches the right-hand value.
/// 2. A right-hand `Matcher` matches the left-hand value.
/// 3. A left-hand [`Object`] decides alone, through [`Object::eq_value`].
/// 4. A right-hand `Object` decides through its own `eq_value`.
/// 5. Anything else compares structurally, recursing with these same rules,
///    so matchers nested inside lists and maps still act as wildcards.
///
/// Matchers therefore compare the same from either side, even against
/// objects.  `Bool`, `Int` and `Float` compare numerically with each other,
/// so `true == 1`.  Mixed integer and float comparisons are exact.
#[derive(Clone, Debug)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
    Object(Arc<dyn Object>),
    Matcher(Matcher),
}

impl Value {
    /// Wrap a user-defined [`Object`]
    pub fn object<T: Object>(o: T) -> Self {
        Value::Object(Arc::new(o))
    }

    /// Recover a user-defined [`Object`] of type `T`
    pub fn downcast_ref<T: Object>(&self) -> Option<&T> {
        match self {
            Value::Object(o) => o.downcast_ref::<T>().ok(),
            _ => None
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(x) => Some(*x),
            Value::Int(i) => Some(*i as f64),
            _ => None
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(l) => Some(l),
            _ => None
        }
    }

    /// Is this value a wildcard?
    pub fn is_matcher(&self) -> bool {
        matches!(self, Value::Matcher(_))
    }

    /// Truthiness: `None`, `false`, zero and empty containers are
    /// falsy, everything else is truthy.
    pub fn truthy(&self) -> bool {
        match self {
            Value::None => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(x) => *x != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::Bytes(b) => !b.is_empty(),
            Value::List(l) => !l.is_empty(),
            Value::Map(m) => !m.is_empty(),
            Value::Object(_) | Value::Matcher(_) => true
        }
    }

    /// Exact structural equality.  Unlike `==`, never consults a matcher: a
    /// `Matcher` is strictly equal to nothing, itself included.
    pub fn strict_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Matcher(_), _) | (_, Value::Matcher(_)) => false,
            (Value::Object(o), _) => o.eq_value(other),
            (_, Value::Object(o)) => o.eq_value(self),
            (Value::List(a), Value::List(b)) => {
                a.len() == b.len() &&
                    a.iter().zip(b.iter()).all(|(x, y)| x.strict_eq(y))
            },
            (Value::Map(a), Value::Map(b)) => {
                a.len() == b.len() &&
                    a.iter().all(|(k, x)| b.get(k)
                                 .map_or(false, |y| x.strict_eq(y)))
            },
            _ => scalar_eq(self, other)
        }
    }

    /// Membership test backing [`Contains`].  Type mismatches yield `false`.
    pub(crate) fn has_member(&self, needle: &Value) -> bool {
        match (self, needle) {
            (Value::Str(hay), Value::Str(n)) => hay.contains(n.as_str()),
            (Value::Bytes(hay), Value::Bytes(n)) => {
                n.is_empty() || hay.windows(n.len()).any(|w| w == &n[..])
            },
            (Value::Bytes(hay), Value::Int(i)) => {
                u8::try_from(*i).map_or(false, |b| hay.contains(&b))
            },
            (Value::List(l), _) => l.iter().any(|x| needle == x),
            (Value::Map(m), Value::Str(k)) => m.contains_key(k),
            (Value::Object(o), _) => o.contains_value(needle).unwrap_or(false),
            _ => false
        }
    }
}

/// Exact comparison of an integer with a float
fn int_eq_float(i: i64, x: f64) -> bool {
    // Saturating casts put every out-of-range float beyond any i64
    x.fract() == 0.0 && x as i128 == i128::from(i)
}

/// Equality of the leaf variants
fn scalar_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::None, Value::None) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Int(x), Value::Int(y)) => x == y,
        (Value::Float(x), Value::Float(y)) => x == y,
        (Value::Bool(b), Value::Int(i)) | (Value::Int(i), Value::Bool(b)) => {
            i64::from(*b) == *i
        },
        (Value::Bool(b), Value::Float(x)) |
        (Value::Float(x), Value::Bool(b)) => {
            int_eq_float(i64::from(*b), *x)
        },
        (Value::Int(i), Value::Float(x)) | (Value::Float(x), Value::Int(i)) => {
            int_eq_float(*i, *x)
        },
        (Value::Str(x), Value::Str(y)) => x == y,
        (Value::Bytes(x), Value::Bytes(y)) => x == y,
        _ => false
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Matcher(m), _) => m.matches(other),
            (_, Value::Matcher(m)) => m.matches(self),
            (Value::Object(o), _) => o.eq_value(other),
            (_, Value::Object(o)) => o.eq_value(self),
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            _ => scalar_eq(self, other)
        }
    }
}

fn write_seq<'a, I>(f: &mut fmt::Formatter, items: I) -> fmt::Result
    where I: IntoIterator<Item = &'a Value>
{
    for (i, v) in items.into_iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", v)?;
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::None => f.write_str("None"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{:?}", x),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::Bytes(b) => {
                f.write_str("b\"")?;
                for c in b.iter().flat_map(|c| std::ascii::escape_default(*c)) {
                    write!(f, "{}", c as char)?;
                }
                f.write_str("\"")
            },
            Value::List(l) => {
                f.write_str("[")?;
                write_seq(f, l)?;
                f.write_str("]")
            },
            Value::Map(m) => {
                f.write_str("{")?;
                for (i, (k, v)) in m.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{:?}: {}", k, v)?;
                }
                f.write_str("}")
            },
            Value::Object(o) => write!(f, "{:?}", o),
            Value::Matcher(m) => write!(f, "{}", m),
        }
    }
}

pub(crate) fn join(f: &mut fmt::Formatter, items: &[Value]) -> fmt::Result {
    write_seq(f, items)
}

macro_rules! from_int {
    ($($t:ty)*) => {
        $(
            impl From<$t> for Value {
                fn from(i: $t) -> Self {
                    Value::Int(i64::from(i))
                }
            }
        )*
    }
}
from_int!{i8 i16 i32 i64 u8 u16 u32}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Value::Float(f64::from(x))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Str(c.to_string())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Value::Bytes(b.to_vec())
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::None
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(o: Option<T>) -> Self {
        o.map_or(Value::None, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(a: [T; N]) -> Self {
        Value::List(a.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<String>, V: Into<Value>> From<BTreeMap<K, V>> for Value {
    fn from(m: BTreeMap<K, V>) -> Self {
        Value::Map(m.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K: Into<String>, V: Into<Value>> From<HashMap<K, V>> for Value {
    fn from(m: HashMap<K, V>) -> Self {
        Value::Map(m.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl From<Matcher> for Value {
    fn from(m: Matcher) -> Self {
        Value::Matcher(m)
    }
}

impl From<Any> for Value {
    fn from(a: Any) -> Self {
        Value::Matcher(Matcher::Any(a))
    }
}

impl From<Contains> for Value {
    fn from(c: Contains) -> Self {
        Value::Matcher(Matcher::Contains(c))
    }
}

impl From<AnyOf> for Value {
    fn from(a: AnyOf) -> Self {
        Value::Matcher(Matcher::AnyOf(a))
    }
}

impl<T: Into<Value>> FromIterator<T> for Value {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Value::List(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod t {
    use super::*;

    #[test]
    fn int_float_numeric_equality() {
        assert_eq!(Value::from(2), Value::from(2.0));
        assert_ne!(Value::from(2), Value::from(2.5));
        assert_eq!(Value::from(-3.0), Value::from(-3));
    }

    #[test]
    fn int_float_equality_is_exact() {
        let big = 9_007_199_254_740_993i64;
        assert_ne!(Value::from(big), Value::from(9_007_199_254_740_992.0));
        assert_ne!(Value::from(9_007_199_254_740_992.0), Value::from(big));
        assert_eq!(Value::from(big - 1), Value::from(9_007_199_254_740_992.0));
        assert_ne!(Value::from(i64::MAX), Value::from(9.3e18));
        assert_ne!(Value::from(i64::MAX), Value::from(f64::INFINITY));
        assert_ne!(Value::from(0), Value::from(f64::NAN));
        assert_eq!(Value::from(i64::MIN),
                   Value::from(-9_223_372_036_854_775_808.0));
    }

    #[test]
    fn bool_is_numeric() {
        assert_eq!(Value::from(true), Value::from(1));
        assert_eq!(Value::from(0), Value::from(false));
        assert_eq!(Value::from(true), Value::from(1.0));
        assert_ne!(Value::from(true), Value::from(2));
        assert!(Kind::Int.admits(&Value::from(false)));
        assert!(!Kind::Bool.admits(&Value::from(0)));
    }

    #[test]
    fn display() {
        let v = Value::from(vec![Value::from("a"), Value::from(1),
                                 Value::None, Value::from(1.5)]);
        assert_eq!("[\"a\", 1, None, 1.5]", v.to_string());
        let b = Value::from(&b"a\n"[..]);
        assert_eq!("b\"a\\n\"", b.to_string());
    }

    #[test]
    fn truthiness() {
        assert!(!Value::None.truthy());
        assert!(!Value::from(Vec::<i32>::new()).truthy());
        assert!(Value::from(vec![1]).truthy());
        assert!(!Value::from("").truthy());
    }
}
