// vim: tw=80
//! Pattern tables
use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::{
    call::Call,
    error::{Error, UnexpectedStubCall},
    sequence::{Outcome, Sequence}
};

/// What a [`Stub`] entry produces when its pattern matches
pub enum Response<R, E> {
    /// Produced on every match
    Outcome(Outcome<R, E>),
    /// Each match advances the sequence
    Sequence(Sequence<R, E>),
}

impl<R, E> Response<R, E> {
    fn resolve(&mut self) -> Result<R, Error<E>>
        where R: Clone, E: Clone
    {
        match self {
            Response::Outcome(o) => o.produce(),
            Response::Sequence(s) => s.pull()
        }
    }
}

impl<R, E> From<Outcome<R, E>> for Response<R, E> {
    fn from(o: Outcome<R, E>) -> Self {
        Response::Outcome(o)
    }
}

impl<R, E> From<Sequence<R, E>> for Response<R, E> {
    fn from(s: Sequence<R, E>) -> Self {
        Response::Sequence(s)
    }
}

/// A list of more than one outcome is shorthand for a sequence of them.  A
/// list of exactly one outcome is that outcome.
impl<R, E> From<Vec<Outcome<R, E>>> for Response<R, E>
    where R: Send + 'static,
          E: Send + 'static
{
    fn from(mut v: Vec<Outcome<R, E>>) -> Self {
        if v.len() == 1 {
            if let Some(o) = v.pop() {
                return Response::Outcome(o);
            }
        }
        Response::Sequence(Sequence::new(v))
    }
}

impl<R, E, const N: usize> From<[Outcome<R, E>; N]> for Response<R, E>
    where R: Send + 'static,
          E: Send + 'static
{
    fn from(a: [Outcome<R, E>; N]) -> Self {
        Vec::from(a).into()
    }
}

struct Entry<R, E> {
    pattern: Call,
    response: Response<R, E>
}

/// An ordered table of call patterns and the responses they produce.
///
/// Each invocation is matched against the patterns in the order they were
/// registered, and the first match wins.  A pattern matches a call if
/// `pattern == call || call == pattern`.
///
/// # Examples
/// ```
/// # use callstub::*;
/// let mut s: Stub<&str, String> = stub!{
///     call!("hello") => returns("world"),
///     call!(Any::new()) => returns("whatever"),
/// };
/// assert_eq!("world", s.invoke(call!("hello")).unwrap());
/// assert_eq!("whatever", s.invoke(call!("bye")).unwrap());
/// assert!(s.invoke(call!()).unwrap_err().is_unexpected());
/// ```
pub struct Stub<R, E> {
    entries: Vec<Entry<R, E>>
}

impl<R, E> Default for Stub<R, E> {
    fn default() -> Self {
        Stub{entries: Vec::new()}
    }
}

impl<R, E> Stub<R, E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry after all existing ones
    pub fn entry<P>(mut self, pattern: Call, response: P) -> Self
        where P: Into<Response<R, E>>
    {
        self.push(pattern, response);
        self
    }

    /// Add an entry after all existing ones, returning its handle
    pub fn push<P>(&mut self, pattern: Call, response: P) -> usize
        where P: Into<Response<R, E>>
    {
        let response = response.into();
        self.entries.push(Entry{pattern, response});
        self.entries.len() - 1
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every configured pattern, in lookup order
    pub fn patterns(&self) -> impl Iterator<Item = &Call> {
        self.entries.iter().map(|e| &e.pattern)
    }

    /// The queued outcomes of entry `handle`, if it holds a repeat-last
    /// sequence
    pub(crate) fn pending_mut(&mut self, handle: usize)
        -> Option<&mut VecDeque<Outcome<R, E>>>
    {
        match self.entries.get_mut(handle).map(|e| &mut e.response) {
            Some(Response::Sequence(s)) => s.pending_mut(),
            _ => None
        }
    }

    /// Look up `call` and produce the matching entry's response.
    pub fn invoke(&mut self, call: Call) -> Result<R, Error<E>>
        where R: Clone, E: Clone
    {
        let found = self.entries.iter_mut()
            .enumerate()
            .find(|(_, e)| e.pattern == call || call == e.pattern);
        match found {
            Some((i, entry)) => {
                trace!(%call, pattern = %entry.pattern, entry = i,
                       "stub call matched");
                entry.response.resolve()
            },
            None => {
                debug!(%call, entries = self.entries.len(),
                       "stub call matched no pattern");
                let configured = self.patterns().cloned().collect();
                Err(UnexpectedStubCall::new(call, configured).into())
            }
        }
    }
}

impl<R, E, P> FromIterator<(Call, P)> for Stub<R, E>
    where P: Into<Response<R, E>>
{
    fn from_iter<I: IntoIterator<Item = (Call, P)>>(iter: I) -> Self {
        let mut s = Stub::new();
        for (pattern, response) in iter {
            s.push(pattern, response);
        }
        s
    }
}

/// Build a [`Stub`] from `(pattern, response)` pairs, in lookup order.
///
/// # Examples
/// ```
/// # use callstub::*;
/// let mut s = stub(vec![
///     (call!(1), returns::<_, String>("one")),
///     (call!(2), returns("two")),
/// ]);
/// assert_eq!("two", s.invoke(call!(2)).unwrap());
/// ```
pub fn stub<R, E, I, P>(entries: I) -> Stub<R, E>
    where I: IntoIterator<Item = (Call, P)>,
          P: Into<Response<R, E>>
{
    entries.into_iter().collect()
}
