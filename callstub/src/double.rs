// vim: tw=80
//! Test doubles and their side-effect slots
use std::{
    fmt,
    sync::{Mutex, MutexGuard, PoisonError}
};

use fragile::Fragile;

use crate::{
    call::Call,
    error::{Error, UnexpectedStubCall},
    stub::Stub
};

/// What a double does when it is called
pub enum SideEffect<R, E> {
    /// Look the call up in a pattern table
    Stub(Stub<R, E>),
    /// Any other handler.  `when` refuses to configure a double that has one.
    Handler(Box<dyn FnMut(&Call) -> Result<R, E> + Send>),
}

impl<R, E> SideEffect<R, E> {
    pub fn handler<F>(f: F) -> Self
        where F: FnMut(&Call) -> Result<R, E> + Send + 'static
    {
        SideEffect::Handler(Box::new(f))
    }

    /// Single-threaded version of [`handler`](#method.handler).  Can be used
    /// when the closure isn't `Send`.
    ///
    /// It is a runtime error to call the double from a different thread than
    /// the one that created the handler.
    pub fn handler_st<F>(f: F) -> Self
        where F: FnMut(&Call) -> Result<R, E> + 'static,
              R: 'static,
              E: 'static
    {
        let mut fragile = Fragile::new(f);
        SideEffect::Handler(Box::new(move |c: &Call| (fragile.get_mut())(c)))
    }

    pub fn is_stub(&self) -> bool {
        matches!(self, SideEffect::Stub(_))
    }
}

impl<R, E> From<Stub<R, E>> for SideEffect<R, E> {
    fn from(s: Stub<R, E>) -> Self {
        SideEffect::Stub(s)
    }
}

impl<R, E> fmt::Debug for SideEffect<R, E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SideEffect::Stub(s) => write!(f, "Stub({} entries)", s.len()),
            SideEffect::Handler(_) => f.write_str("Handler")
        }
    }
}

/// Something that can be configured with [`when`](crate::when).
///
/// The double owns a side-effect slot.  Code under test calls the double,
/// which invokes whatever side effect is in the slot.
pub trait Double<R, E> {
    fn side_effect(&self) -> &Mutex<Option<SideEffect<R, E>>>;

    /// Name used in diagnostics
    fn name(&self) -> &str;
}

pub(crate) fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A callable test double.
///
/// # Examples
/// ```
/// # use callstub::*;
/// let m = MockFn::<u32, String>::named("fetch");
/// when(&m).unwrap().called_with(call!("a")).then(1);
/// assert_eq!(1, m.call(call!("a")).unwrap());
/// assert_eq!(
///     "Unexpected stub call:\n    fetch(\"b\")\n\
///      The following calls are configured:\n    call(\"a\")\n",
///     m.call(call!("b")).unwrap_err().to_string());
/// ```
pub struct MockFn<R, E> {
    name: String,
    side_effect: Mutex<Option<SideEffect<R, E>>>
}

impl<R, E> Default for MockFn<R, E> {
    fn default() -> Self {
        MockFn::named("mock")
    }
}

impl<R, E> MockFn<R, E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named<S: Into<String>>(name: S) -> Self {
        MockFn{name: name.into(), side_effect: Mutex::new(None)}
    }

    /// Install `side_effect`, replacing whatever was there
    pub fn with_side_effect<S>(self, side_effect: S) -> Self
        where S: Into<SideEffect<R, E>>
    {
        self.set_side_effect(side_effect);
        self
    }

    pub fn set_side_effect<S>(&self, side_effect: S)
        where S: Into<SideEffect<R, E>>
    {
        *lock(&self.side_effect) = Some(side_effect.into());
    }

    /// Remove and return the installed side effect
    pub fn take_side_effect(&self) -> Option<SideEffect<R, E>> {
        lock(&self.side_effect).take()
    }

    /// Is the slot occupied by a [`Stub`]?
    pub fn has_stub(&self) -> bool {
        lock(&self.side_effect).as_ref().map_or(false, SideEffect::is_stub)
    }

    /// Call the double
    pub fn call(&self, call: Call) -> Result<R, Error<E>>
        where R: Clone, E: Clone
    {
        let call = call.named(self.name.as_str());
        match lock(&self.side_effect).as_mut() {
            Some(SideEffect::Stub(s)) => s.invoke(call),
            Some(SideEffect::Handler(f)) => f(&call).map_err(Error::Raised),
            None => Err(UnexpectedStubCall::new(call, Vec::new()).into())
        }
    }
}

impl<R, E> Double<R, E> for MockFn<R, E> {
    fn side_effect(&self) -> &Mutex<Option<SideEffect<R, E>>> {
        &self.side_effect
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl<R, E> fmt::Debug for MockFn<R, E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("MockFn")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
