//! Channel tables: where an exit lands.
//!
//! A channel table maps each channel of `C` to the handler that produces the
//! run's result when that channel is reached. The usual table is a closure that
//! matches on the channel enum; the exhaustive match is what guarantees every
//! channel an operation can exit through has a handler.
//!
//! # Examples
//!
//! ```rust
//! use gbye::Channels;
//!
//! enum Channel {
//!     Fail(String),
//!     Retry { attempts: u32 },
//! }
//!
//! let table = |channel: Channel| match channel {
//!     Channel::Fail(reason) => format!("handled:{reason}"),
//!     Channel::Retry { attempts } => format!("gave up after {attempts}"),
//! };
//! assert_eq!(table.dispatch(Channel::Fail("bad".into())), "handled:bad");
//! ```

use either::Either;

/// Handlers for every channel of `C`.
///
/// `dispatch` consumes the table, so a table serves exactly one exit and its
/// handler runs at most once per run.
pub trait Channels<C> {
    /// Value produced by every handler in the table.
    type Output;

    /// Invoke the handler for `channel` with the arguments it carries.
    fn dispatch(self, channel: C) -> Self::Output;
}

impl<C, R, F> Channels<C> for F
where
    F: FnOnce(C) -> R,
{
    type Output = R;

    #[inline]
    fn dispatch(self, channel: C) -> Self::Output {
        self(channel)
    }
}

/// Pick one of two tables at run time.
impl<C, L, R> Channels<C> for Either<L, R>
where
    L: Channels<C>,
    R: Channels<C, Output = L::Output>,
{
    type Output = L::Output;

    fn dispatch(self, channel: C) -> Self::Output {
        match self {
            Either::Left(l) => l.dispatch(channel),
            Either::Right(r) => r.dispatch(channel),
        }
    }
}
