// vim: tw=80
use std::{
    collections::BTreeMap,
    fmt
};

use crate::value::{self, Value};

/// The arguments of one invocation: positional values, keyword values, and
/// optionally the name of the double that was called.
///
/// Calls are used both as the lookup keys of a [`Stub`](crate::Stub) and as
/// the records of real invocations.  Two calls are equal when their
/// positional arguments are equal element-wise and their keyword arguments are
/// equal key-by-key, with [`Value`] equality, so matchers act as wildcards.
/// The name is for diagnostics only and never affects equality.
///
/// Usually built with the [`call!`](crate::call) macro.
///
/// # Examples
/// ```
/// # use callstub::*;
/// let c = Call::new().arg("bye bye").arg("world");
/// assert_eq!(c, call!("bye bye", Any::new()));
/// assert_eq!(c, call!("bye bye", Contains::new("or")));
/// assert_ne!(c, call!("bye bye"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Call {
    name: Option<String>,
    args: Vec<Value>,
    kwargs: BTreeMap<String, Value>
}

impl Call {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a call from already-converted arguments
    pub fn from_parts<K>(args: Vec<Value>, kwargs: K) -> Self
        where K: IntoIterator<Item = (String, Value)>
    {
        Call{name: None, args, kwargs: kwargs.into_iter().collect()}
    }

    /// Append a positional argument
    pub fn arg<T: Into<Value>>(mut self, v: T) -> Self {
        self.args.push(v.into());
        self
    }

    /// Set a keyword argument, replacing any previous value for `name`
    pub fn kwarg<S, T>(mut self, name: S, v: T) -> Self
        where S: Into<String>,
              T: Into<Value>
    {
        self.kwargs.insert(name.into(), v.into());
        self
    }

    /// Attach the name of the double this call was made on
    pub fn named<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    pub fn kwargs(&self) -> &BTreeMap<String, Value> {
        &self.kwargs
    }

    pub fn kwarg_value(&self, name: &str) -> Option<&Value> {
        self.kwargs.get(name)
    }
}

impl PartialEq for Call {
    fn eq(&self, other: &Call) -> bool {
        self.args == other.args && self.kwargs == other.kwargs
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}(", self.name.as_deref().unwrap_or("call"))?;
        value::join(f, &self.args)?;
        for (i, (k, v)) in self.kwargs.iter().enumerate() {
            if i > 0 || !self.args.is_empty() {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", k, v)?;
        }
        f.write_str(")")
    }
}
