// vim: tw=80
//! Outcomes and sequences of outcomes
use std::collections::VecDeque;

use fragile::Fragile;

use crate::error::Error;

/// How to produce a configured failure
#[derive(Clone)]
pub enum Raise<E> {
    /// Raise this exact value, every time
    Instance(E),
    /// Construct a fresh value each time.  This is the equivalent of raising
    /// an exception class rather than an exception instance.
    Fresh(fn() -> E),
}

impl<E: Clone> Raise<E> {
    /// Produce the failure to raise
    pub fn error(&self) -> E {
        match self {
            Raise::Instance(e) => e.clone(),
            Raise::Fresh(ctor) => ctor()
        }
    }
}

impl<E: Default> Raise<E> {
    /// Construct a fresh `E::default()` each time
    pub fn fresh_default() -> Self {
        Raise::Fresh(E::default)
    }
}

/// The resolved effect of a matched stub entry: a value to return or a
/// failure to raise.
#[derive(Clone)]
pub enum Outcome<R, E> {
    Return(R),
    Raise(Raise<E>),
}

impl<R, E> Outcome<R, E> {
    fn resolve(self) -> Result<R, Error<E>> {
        match self {
            Outcome::Return(r) => Ok(r),
            Outcome::Raise(Raise::Instance(e)) => Err(Error::Raised(e)),
            Outcome::Raise(Raise::Fresh(ctor)) => Err(Error::Raised(ctor()))
        }
    }

    /// Resolve without consuming the outcome
    pub(crate) fn produce(&self) -> Result<R, Error<E>>
        where R: Clone, E: Clone
    {
        self.clone().resolve()
    }
}

impl<R, E> From<R> for Outcome<R, E> {
    fn from(r: R) -> Self {
        Outcome::Return(r)
    }
}

/// Return `r`
pub fn returns<R, E>(r: R) -> Outcome<R, E> {
    Outcome::Return(r)
}

/// Raise exactly `e`
pub fn raises<R, E>(e: E) -> Outcome<R, E> {
    Outcome::Raise(Raise::Instance(e))
}

/// Raise a fresh value built by `ctor`
pub fn raises_new<R, E>(ctor: fn() -> E) -> Outcome<R, E> {
    Outcome::Raise(Raise::Fresh(ctor))
}

enum Cursor<R, E> {
    /// Single pass; exhausts when the iterator does
    Once(Box<dyn Iterator<Item = Outcome<R, E>> + Send>),
    /// The last outcome is repeated forever
    RepeatLast(VecDeque<Outcome<R, E>>),
}

/// Iterator adapter for iterators that aren't `Send`
struct FragileIter<I>(Fragile<I>);

impl<I: Iterator> Iterator for FragileIter<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        self.0.get_mut().next()
    }
}

/// A forward-only cursor over a list of outcomes.
///
/// Each [`pull`](#method.pull) advances the cursor and returns or raises the
/// outcome found there.
///
/// # Examples
/// ```
/// # use callstub::*;
/// let mut s: Sequence<u32, String> = Sequence::values(1..3);
/// assert_eq!(1, s.pull().unwrap());
/// assert_eq!(2, s.pull().unwrap());
/// assert!(s.pull().unwrap_err().is_exhausted());
/// ```
pub struct Sequence<R, E> {
    cursor: Cursor<R, E>
}

impl<R: 'static, E: 'static> Sequence<R, E> {
    /// Create a single-pass sequence from any iterable, finite or not
    pub fn new<I>(outcomes: I) -> Self
        where I: IntoIterator<Item = Outcome<R, E>>,
              I::IntoIter: Send + 'static
    {
        let cursor = Cursor::Once(Box::new(outcomes.into_iter()));
        Sequence{cursor}
    }

    /// Create a single-pass sequence that only returns values
    pub fn values<I>(values: I) -> Self
        where I: IntoIterator<Item = R>,
              I::IntoIter: Send + 'static
    {
        Self::new(values.into_iter().map(Outcome::Return))
    }

    /// Single-threaded version of [`new`](#method.new).  Can be used when the
    /// iterator isn't `Send`.
    ///
    /// It is a runtime error to pull from the sequence on a different thread
    /// than the one that created it.
    pub fn new_st<I>(outcomes: I) -> Self
        where I: IntoIterator<Item = Outcome<R, E>>,
              I::IntoIter: 'static
    {
        let it = FragileIter(Fragile::new(outcomes.into_iter()));
        Sequence{cursor: Cursor::Once(Box::new(it))}
    }
}

impl<R, E> Sequence<R, E> {
    /// An initially empty sequence whose last outcome never runs out
    pub(crate) fn repeat_last() -> Self {
        Sequence{cursor: Cursor::RepeatLast(VecDeque::new())}
    }

    /// The outcomes still queued in a repeat-last sequence.  Single-pass
    /// sequences have none.
    pub(crate) fn pending_mut(&mut self)
        -> Option<&mut VecDeque<Outcome<R, E>>>
    {
        match &mut self.cursor {
            Cursor::RepeatLast(l) => Some(l),
            Cursor::Once(_) => None
        }
    }

    /// Does this sequence repeat its final outcome forever?
    pub fn repeats_last(&self) -> bool {
        matches!(self.cursor, Cursor::RepeatLast(_))
    }

    /// Advance the cursor and produce the outcome found there.  Fails with
    /// [`Error::Exhausted`] once there is nothing left.
    pub fn pull(&mut self) -> Result<R, Error<E>>
        where R: Clone, E: Clone
    {
        let next = match &mut self.cursor {
            Cursor::Once(it) => it.next(),
            Cursor::RepeatLast(l) if l.len() > 1 => l.pop_front(),
            Cursor::RepeatLast(l) => l.front().cloned()
        };
        match next {
            Some(o) => o.resolve(),
            None => Err(Error::Exhausted)
        }
    }
}

impl<R, E, I> From<I> for Sequence<R, E>
    where R: 'static, E: 'static,
          I: Iterator<Item = Outcome<R, E>> + Send + 'static
{
    fn from(it: I) -> Self {
        Sequence::new(it)
    }
}

/// Define a sequence of results based on an iterable, such as a container or
/// a lazy iterator.
///
/// # Examples
/// ```
/// # use callstub::*;
/// let mut s: Stub<u32, String> = stub!{
///     call!("hello") => seq((1..5).map(returns)),
/// };
/// assert_eq!(1, s.invoke(call!("hello")).unwrap());
/// assert_eq!(2, s.invoke(call!("hello")).unwrap());
/// assert_eq!(3, s.invoke(call!("hello")).unwrap());
/// ```
pub fn seq<R, E, I>(outcomes: I) -> Sequence<R, E>
    where R: 'static, E: 'static,
          I: IntoIterator<Item = Outcome<R, E>>,
          I::IntoIter: Send + 'static
{
    Sequence::new(outcomes)
}
