//! Exit and trap, the two ways an operation reaches a channel.

use crate::unwind::{Carrier, Unwind};
use std::any::type_name;
use std::convert::Infallible;
use std::future::IntoFuture;
use std::marker::PhantomData;

/// Flow controls handed to an operation by [`run`](crate::run).
///
/// `C` is the channel enum and `E` the operation's fault type, so an exit or a
/// trap produces exactly the error the operation returns. A fresh `Controls` is
/// built for every run and passed to the operation by value. It is `Copy`, so
/// it can be moved into as many closures and async blocks as the operation
/// needs.
pub struct Controls<C, E = Infallible> {
    _marker: PhantomData<fn() -> (C, E)>,
}

impl<C, E> Clone for Controls<C, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C, E> Copy for Controls<C, E> {}

impl<C, E> std::fmt::Debug for Controls<C, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controls")
            .field("channels", &type_name::<C>())
            .field("fault", &type_name::<E>())
            .finish()
    }
}

impl<C, E> Controls<C, E> {
    pub(crate) const fn new() -> Self {
        Controls {
            _marker: PhantomData,
        }
    }

    /// Leave the operation through `channel`.
    ///
    /// Always returns `Err`. The caller must `return` it (or `?` it) so the exit
    /// unwinds to the runner; nothing after an exit runs.
    ///
    /// ```rust
    /// use gbye::{run, Controls};
    /// use std::convert::Infallible;
    ///
    /// enum Channel { Fail(&'static str) }
    ///
    /// let result: Result<String, Infallible> = run(
    ///     |ctl: Controls<Channel>| ctl.exit(Channel::Fail("bad")),
    ///     |Channel::Fail(reason)| format!("handled:{reason}"),
    /// );
    /// assert_eq!(result.unwrap(), "handled:bad");
    /// ```
    #[must_use = "an exit does nothing unless it is returned to the runner"]
    #[inline]
    pub fn exit<T>(self, channel: C) -> Result<T, Unwind<C, E>> {
        Err(Unwind::Exit(Carrier::new(channel)))
    }

    /// Run `sub`, turning its failure into an exit through a channel.
    ///
    /// `channel` builds the channel value from the captured fault, which is
    /// always its last argument. It only runs after `sub` has failed, so bind
    /// leading arguments to locals before the call
    /// (`let lead = compute()?; ctl.trap(|e| Channel::X(lead, e), sub)`). A
    /// failure while computing them then leaves the run as a plain fault and is
    /// never converted. On success the value goes straight back to the caller.
    ///
    /// ```rust
    /// use gbye::{run, Controls};
    /// use std::convert::Infallible;
    /// use std::num::ParseIntError;
    ///
    /// enum Channel { BadNumber(&'static str, ParseIntError) }
    ///
    /// let parse = |text: &'static str| -> Result<String, Infallible> {
    ///     run(
    ///         |ctl: Controls<Channel>| {
    ///             let n = ctl.trap(|e| Channel::BadNumber(text, e), || text.parse::<i32>())?;
    ///             Ok(format!("got {n}"))
    ///         },
    ///         |Channel::BadNumber(text, e)| format!("{text:?}: {e}"),
    ///     )
    /// };
    /// assert_eq!(parse("42").unwrap(), "got 42");
    /// assert_eq!(parse("4x").unwrap(), "\"4x\": invalid digit found in string");
    /// ```
    #[inline]
    pub fn trap<V, F, K, S>(self, channel: K, sub: S) -> Result<V, Unwind<C, E>>
    where
        K: FnOnce(F) -> C,
        S: FnOnce() -> Result<V, F>,
    {
        self.capture(channel, sub())
    }

    /// Async version of [`trap`](Self::trap).
    ///
    /// Awaits `sub` and applies exactly the same rule once it settles.
    pub async fn trap_async<V, F, K, S>(self, channel: K, sub: S) -> Result<V, Unwind<C, E>>
    where
        K: FnOnce(F) -> C,
        S: IntoFuture<Output = Result<V, F>>,
    {
        self.capture(channel, sub.await)
    }

    fn capture<V, F, K>(self, channel: K, settled: Result<V, F>) -> Result<V, Unwind<C, E>>
    where
        K: FnOnce(F) -> C,
    {
        settled.or_else(|fault| {
            tracing::trace!(
                channel = type_name::<C>(),
                fault = type_name::<F>(),
                "trap captured fault"
            );
            self.exit(channel(fault))
        })
    }
}
