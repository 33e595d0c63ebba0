// vim: tw=80
//! Fluent configuration of doubles
use std::{
    fmt,
    sync::Mutex
};

use tracing::debug;

use crate::{
    call::Call,
    double::{self, Double, SideEffect},
    error::ConfigError,
    sequence::{Outcome, Sequence, raises, raises_new},
    stub::Stub
};

type Slot<R, E> = Mutex<Option<SideEffect<R, E>>>;

/// Start configuring `double`.
///
/// Installs an empty [`Stub`] as the double's side effect, or reuses the
/// `Stub` that is already there, so that successive `when` expressions
/// accumulate into a single table.  Fails if the double already has some
/// other kind of side effect, which is left as it was.
///
/// The double's side-effect slot is only locked while a result is being
/// added, so the double may be called while a [`When`] or [`CalledWith`] is
/// still alive.
///
/// # Examples
/// ```
/// # use callstub::*;
/// let m = MockFn::<&str, String>::new();
/// when(&m).unwrap().called_with(call!("hello")).then("world");
/// when(&m).unwrap().called_with(call!("bye")).then("world");
/// assert_eq!("world", m.call(call!("hello")).unwrap());
/// assert_eq!("world", m.call(call!("bye")).unwrap());
/// ```
pub fn when<R, E, D>(double: &D) -> Result<When<'_, R, E>, ConfigError>
    where D: Double<R, E> + ?Sized
{
    let name = double.name();
    let slot = double.side_effect();
    let mut guard = double::lock(slot);
    match guard.as_ref() {
        Some(SideEffect::Handler(_)) => {
            return Err(ConfigError::SideEffectAlreadySet(name.to_owned()));
        },
        Some(SideEffect::Stub(s)) => {
            debug!(double = name, entries = s.len(), "reusing stub");
        },
        None => {
            debug!(double = name, "installing stub");
            *guard = Some(SideEffect::Stub(Stub::new()));
        }
    }
    Ok(When{slot, name})
}

/// A double whose stub is being configured
pub struct When<'a, R, E> {
    slot: &'a Slot<R, E>,
    name: &'a str
}

impl<'a, R, E> When<'a, R, E> {
    /// Configure what happens when the double is called with arguments
    /// matching `pattern`.
    pub fn called_with(&mut self, pattern: Call) -> CalledWith<'a, R, E> {
        CalledWith{slot: self.slot, name: self.name, pattern, entry: None}
    }
}

/// Results being chained onto one pattern.
///
/// The first result registers a new entry for the pattern.  Each one after
/// that is appended to the same entry.  The last result is repeated forever.
///
/// # Examples
/// ```
/// # use callstub::*;
/// let m = MockFn::<u32, String>::new();
/// when(&m).unwrap()
///     .called_with(call!())
///     .then(1)
///     .then_raise("boom".to_owned())
///     .then(2);
/// assert_eq!(1, m.call(call!()).unwrap());
/// assert_eq!(Some("boom".to_owned()), m.call(call!()).unwrap_err().raised());
/// assert_eq!(2, m.call(call!()).unwrap());
/// assert_eq!(2, m.call(call!()).unwrap());
/// ```
pub struct CalledWith<'a, R, E> {
    slot: &'a Slot<R, E>,
    name: &'a str,
    pattern: Call,
    entry: Option<usize>
}

impl<'a, R, E> CalledWith<'a, R, E> {
    /// Append an outcome to this pattern's results.
    ///
    /// Does nothing if the double's side effect has since been replaced by
    /// something other than a [`Stub`].
    pub fn then_outcome(&mut self, o: Outcome<R, E>) -> &mut Self {
        let slot = self.slot;
        let mut guard = double::lock(slot);
        if guard.is_none() {
            debug!(double = self.name, "installing stub");
            *guard = Some(SideEffect::Stub(Stub::new()));
            self.entry = None;
        }
        let stub = match guard.as_mut() {
            Some(SideEffect::Stub(s)) => s,
            _ => {
                debug!(double = self.name, pattern = %self.pattern,
                       "side effect is no longer a stub");
                return self;
            }
        };
        let handle = match self.entry {
            Some(h) => h,
            None => {
                let h = stub.push(self.pattern.clone(),
                                  Sequence::repeat_last());
                self.entry = Some(h);
                h
            }
        };
        if let Some(results) = stub.pending_mut(handle) {
            results.push_back(o);
        }
        self
    }

    /// Return `r`
    pub fn then(&mut self, r: R) -> &mut Self {
        self.then_outcome(Outcome::Return(r))
    }

    /// Raise exactly `e`
    pub fn then_raise(&mut self, e: E) -> &mut Self {
        self.then_outcome(raises(e))
    }

    /// Raise a fresh failure built by `ctor`, each time
    pub fn then_raise_new(&mut self, ctor: fn() -> E) -> &mut Self {
        self.then_outcome(raises_new(ctor))
    }
}

impl<'a, R, E> fmt::Debug for CalledWith<'a, R, E> {
    fn fmt(&self, _f: &mut fmt::Formatter) -> fmt::Result {
        Ok(())
    }
}

impl<'a, R, E> fmt::Display for CalledWith<'a, R, E> {
    fn fmt(&self, _f: &mut fmt::Formatter) -> fmt::Result {
        Ok(())
    }
}
