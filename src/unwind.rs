//! The error side of every operation: an exit in flight, or a fault.
//!
//! An operation driven by [`run`](crate::run) returns `Result<T, Unwind<C, E>>`.
//! `Ok` is a normal return. `Err(Unwind::Exit(_))` is an intentional exit through
//! one of the channels in `C`, produced only by [`Controls`](crate::Controls).
//! `Err(Unwind::Fault(_))` is anything else, and `run` hands it back to its
//! caller untouched.
//!
//! # Examples
//!
//! ```rust
//! use gbye::Unwind;
//!
//! #[derive(Debug)]
//! enum Channel { Missing }
//!
//! let fault: Unwind<Channel, &str> = Unwind::Fault("disk on fire");
//! assert!(fault.is_fault());
//! assert_eq!(fault.fault(), Some("disk on fire"));
//! ```

use std::any::type_name;
use std::convert::Infallible;
use std::fmt;

/// One intentional exit in flight.
///
/// A `Carrier` holds the channel value an operation exited through: the enum
/// variant names the channel and its fields are the handler's arguments. It can
/// only be created by [`Controls::exit`](crate::Controls::exit) or
/// [`Controls::trap`](crate::Controls::trap), and only a runner can open it.
pub struct Carrier<C> {
    channel: C,
}

impl<C> Carrier<C> {
    pub(crate) fn new(channel: C) -> Self {
        Carrier { channel }
    }

    pub(crate) fn into_channel(self) -> C {
        self.channel
    }
}

// The channel payload stays hidden, even when it is printable.
impl<C> fmt::Debug for Carrier<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Carrier")
            .field("channel", &type_name::<C>())
            .finish_non_exhaustive()
    }
}

/// Why an operation stopped without returning normally.
///
/// `E` defaults to [`Infallible`] for operations that can only exit.
pub enum Unwind<C, E = Infallible> {
    /// Intentional exit through a channel of `C`.
    Exit(Carrier<C>),
    /// Unexpected fault, passed through by the runner unchanged.
    Fault(E),
}

impl<C, E> Unwind<C, E> {
    /// Returns `true` if this is an intentional exit.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use gbye::{run, Controls, Unwind};
    ///
    /// enum Channel { Stop }
    ///
    /// let mut seen = None;
    /// let _: Result<(), ()> = run(
    ///     |ctl: Controls<Channel, ()>| {
    ///         let step: Result<(), Unwind<Channel, ()>> = ctl.exit(Channel::Stop);
    ///         seen = step.as_ref().err().map(Unwind::is_exit);
    ///         step
    ///     },
    ///     |_: Channel| (),
    /// );
    /// assert_eq!(seen, Some(true));
    /// ```
    #[inline]
    pub const fn is_exit(&self) -> bool {
        matches!(self, Unwind::Exit(_))
    }

    /// Returns `true` if this is an unexpected fault.
    #[inline]
    pub const fn is_fault(&self) -> bool {
        matches!(self, Unwind::Fault(_))
    }

    /// Converts into `Option<E>`, discarding an exit in flight.
    #[inline]
    pub fn fault(self) -> Option<E> {
        match self {
            Unwind::Exit(_) => None,
            Unwind::Fault(e) => Some(e),
        }
    }

    /// Borrows the fault, if any.
    #[inline]
    pub const fn as_fault(&self) -> Option<&E> {
        match self {
            Unwind::Exit(_) => None,
            Unwind::Fault(e) => Some(e),
        }
    }

    /// Maps the fault with `f`, leaving an exit in flight untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use gbye::Unwind;
    ///
    /// enum Channel {}
    ///
    /// let fault: Unwind<Channel, u8> = Unwind::Fault(7);
    /// assert_eq!(fault.map_fault(|code| code * 2).fault(), Some(14));
    /// ```
    #[inline]
    pub fn map_fault<E2, F>(self, f: F) -> Unwind<C, E2>
    where
        F: FnOnce(E) -> E2,
    {
        match self {
            Unwind::Exit(carrier) => Unwind::Exit(carrier),
            Unwind::Fault(e) => Unwind::Fault(f(e)),
        }
    }

    /// Takes the fault out, or hands the exit back as an error.
    ///
    /// The returned [`ExitInFlight`] can be turned back into an `Unwind` and
    /// returned from the operation, so the exit still reaches its runner.
    #[inline]
    pub fn try_into_fault(self) -> Result<E, ExitInFlight<C>> {
        match self {
            Unwind::Exit(carrier) => Err(ExitInFlight(carrier)),
            Unwind::Fault(e) => Ok(e),
        }
    }

    /// Returns the fault.
    ///
    /// # Panics
    ///
    /// Panics with `msg` if this is an exit.
    #[inline]
    #[track_caller]
    pub fn expect_fault(self, msg: &str) -> E {
        match self {
            Unwind::Exit(_) => panic!("{msg}"),
            Unwind::Fault(e) => e,
        }
    }

    /// Returns the fault.
    ///
    /// # Panics
    ///
    /// Panics if this is an exit.
    #[inline]
    #[track_caller]
    pub fn unwrap_fault(self) -> E {
        self.expect_fault("called `Unwind::unwrap_fault()` on an `Exit` value")
    }
}

impl<C, E> From<E> for Unwind<C, E> {
    #[inline]
    fn from(fault: E) -> Self {
        Unwind::Fault(fault)
    }
}

impl<C, E: fmt::Debug> fmt::Debug for Unwind<C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unwind::Exit(carrier) => f.debug_tuple("Exit").field(carrier).finish(),
            Unwind::Fault(e) => f.debug_tuple("Fault").field(e).finish(),
        }
    }
}

/// An exit found where a fault was expected.
#[derive(thiserror::Error)]
#[error("expected a fault, found an exit in flight on `{channel}`", channel = type_name::<C>())]
pub struct ExitInFlight<C>(Carrier<C>);

impl<C> ExitInFlight<C> {
    /// Puts the exit back in flight.
    pub fn into_unwind<E>(self) -> Unwind<C, E> {
        Unwind::Exit(self.0)
    }
}

impl<C> fmt::Debug for ExitInFlight<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ExitInFlight").field(&self.0).finish()
    }
}
