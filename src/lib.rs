//! # Gbye: Named Exits for Operations
//!
//! Give an operation a fixed, statically known set of ways to stop early, and
//! let the caller decide what each one means.
//!
//! ## Core Pieces
//!
//! - **[`run`]**: Drive an operation, dispatching its exits to a channel table
//! - **[`Controls`]**: The operation's `exit` and `trap` controls, scoped to one run
//! - **[`Channels`]**: A channel table, usually a closure matching on the channel enum
//! - **[`Unwind`]**: The error side of an operation: an exit in flight, or a fault
//!
//! ## Key Features
//!
//! - **Exhaustive**: Channels are enum variants, so every exit has a handler
//! - **Transparent**: Faults that are not exits reach the caller unchanged
//! - **Async Support**: [`run_async`] and [`Controls::trap_async`] settle by the same rule
//!
//! ## Example
//!
//! ```
//! use gbye::*;
//! use std::num::ParseIntError;
//!
//! enum Channel {
//!     Fail(&'static str),
//!     NotANumber(ParseIntError),
//! }
//!
//! fn check(text: &str) -> String {
//!     let outcome = run(
//!         |ctl: Controls<Channel>| {
//!             let n: i64 = ctl.trap(Channel::NotANumber, || text.parse())?;
//!             if n < 0 {
//!                 return ctl.exit(Channel::Fail("negative"));
//!             }
//!             Ok(format!("ok:{n}"))
//!         },
//!         |channel| match channel {
//!             Channel::Fail(reason) => format!("handled:{reason}"),
//!             Channel::NotANumber(e) => format!("caught:{e}"),
//!         },
//!     );
//!     match outcome {
//!         Ok(message) => message,
//!     }
//! }
//!
//! assert_eq!(check("12"), "ok:12");
//! assert_eq!(check("-3"), "handled:negative");
//! assert_eq!(check("x"), "caught:invalid digit found in string");
//! ```
//!
//! ## Common Functions
//!
//! **Running:**
//! - [`run(operation, channels)`](run) - Run synchronously
//! - [`run_async(operation, channels)`](run_async) - Run an operation that returns a future
//! - [`run_either(operation, channels)`](run_either) - Keep the operation and handler types apart
//!
//! **Inside an operation:**
//! - [`ctl.exit(channel)`](Controls::exit) - Leave through a channel
//! - [`ctl.trap(channel, sub)`](Controls::trap) - Turn a failure of `sub` into an exit
//! - [`ctl.trap_async(channel, sub)`](Controls::trap_async) - Same, for a future

mod channels;
mod controls;
pub mod prelude;
mod runner;
mod unwind;

pub use either::Either;

pub use channels::*;
pub use controls::*;
pub use runner::*;
pub use unwind::*;
