//! Functions for running operations against a channel table.
//!
//! Synchronous and asynchronous runs share one settlement rule: a normal return
//! passes through, an exit is dispatched to its handler, and a fault goes back
//! to the caller unchanged. An async run only differs by resolving later.
//!
//! # Nesting
//!
//! An exit is not tagged with the run that created it. A run intercepts every
//! exit whose channel type matches its own, so when two nested runs share a
//! channel type, an exit made through the outer run's [`Controls`] inside the
//! inner operation is dispatched by the *inner* run. Give nested runs distinct
//! channel types when that matters.

use crate::channels::Channels;
use crate::controls::Controls;
use crate::unwind::Unwind;
use either::Either;
use std::any::type_name;
use std::future::Future;

/// Run an operation with flow controls for leaving through named channels.
///
/// `operation` receives [`Controls`] for this run. If it returns `Ok`, that is
/// the result. If it exits through a channel, directly or via a trap, the
/// matching handler in `channels` runs once and its value is the result. Any
/// other fault is returned as `Err` exactly as the operation produced it.
///
/// A handler's own failure is not intercepted: it becomes part of `R`, or
/// unwinds past the run if the handler panics.
///
/// ```rust
/// use gbye::{run, Controls};
/// use std::convert::Infallible;
///
/// enum Channel {
///     TooSmall(u32),
///     TooLarge(u32),
/// }
///
/// let clamp = |n: u32| -> Result<String, Infallible> {
///     run(
///         |ctl: Controls<Channel>| {
///             if n < 10 {
///                 return ctl.exit(Channel::TooSmall(n));
///             }
///             if n > 99 {
///                 return ctl.exit(Channel::TooLarge(n));
///             }
///             Ok(n.to_string())
///         },
///         |channel| match channel {
///             Channel::TooSmall(n) => format!("{n} < 10"),
///             Channel::TooLarge(n) => format!("{n} > 99"),
///         },
///     )
/// };
///
/// assert_eq!(clamp(42).unwrap(), "42");
/// assert_eq!(clamp(3).unwrap(), "3 < 10");
/// assert_eq!(clamp(300).unwrap(), "300 > 99");
/// ```
pub fn run<C, R, E, Op, H>(operation: Op, channels: H) -> Result<R, E>
where
    Op: FnOnce(Controls<C, E>) -> Result<R, Unwind<C, E>>,
    H: Channels<C, Output = R>,
{
    settle(operation(Controls::new()), channels)
}

/// Async version of [`run`].
///
/// `operation` is called immediately and the future it returns is awaited;
/// the result then settles exactly as [`run`] would settle it.
///
/// ```rust
/// use gbye::{run_async, Controls};
///
/// enum Channel { Fail(&'static str) }
///
/// let pending = run_async(
///     |ctl: Controls<Channel>| async move {
///         ctl.exit::<bool>(Channel::Fail("later"))
///     },
///     |Channel::Fail(reason)| reason == "later",
/// );
/// assert!(futures_lite::future::block_on(pending).unwrap());
/// ```
pub fn run_async<C, R, E, Op, Fut, H>(
    operation: Op,
    channels: H,
) -> impl Future<Output = Result<R, E>>
where
    Op: FnOnce(Controls<C, E>) -> Fut,
    Fut: Future<Output = Result<R, Unwind<C, E>>>,
    H: Channels<C, Output = R>,
{
    let pending = operation(Controls::new());
    async move { settle(pending.await, channels) }
}

/// Like [`run`], for when the operation and the handlers produce different types.
///
/// ```rust
/// use gbye::{run_either, Controls, Either};
/// use std::convert::Infallible;
///
/// enum Channel { Empty }
///
/// let first = |items: &[u8]| -> Result<Either<u8, bool>, Infallible> {
///     run_either(
///         |ctl: Controls<Channel>| match items.first() {
///             Some(item) => Ok(*item),
///             None => ctl.exit(Channel::Empty),
///         },
///         |Channel::Empty| false,
///     )
/// };
/// assert_eq!(first(&[4, 5]).unwrap(), Either::Left(4));
/// assert_eq!(first(&[]).unwrap(), Either::Right(false));
/// ```
pub fn run_either<C, T, R, E, Op, H>(operation: Op, channels: H) -> Result<Either<T, R>, E>
where
    Op: FnOnce(Controls<C, E>) -> Result<T, Unwind<C, E>>,
    H: Channels<C, Output = R>,
{
    run(
        |ctl: Controls<C, E>| operation(ctl).map(Either::Left),
        |channel: C| Either::Right(channels.dispatch(channel)),
    )
}

fn settle<C, R, E, H>(outcome: Result<R, Unwind<C, E>>, channels: H) -> Result<R, E>
where
    H: Channels<C, Output = R>,
{
    match outcome {
        Ok(value) => Ok(value),
        Err(Unwind::Exit(carrier)) => {
            tracing::trace!(channel = type_name::<C>(), "dispatching exit");
            Ok(channels.dispatch(carrier.into_channel()))
        }
        Err(Unwind::Fault(fault)) => {
            tracing::trace!(fault = type_name::<E>(), "passing fault through");
            Err(fault)
        }
    }
}
