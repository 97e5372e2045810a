//! # Dispatcher
//!
//! Turns one inbound [`featbot_core::Update`] into at most one reply: classify it, look up the
//! handler in the [`HandlerRegistry`], consult the [`RateLimiter`] when the handler is marked
//! rate-limited, then run the handler through the [`SafeInvoker`] so failures end in the
//! [`featbot_core::ErrorReporter`] instead of the caller.

mod dispatcher;
mod invoker;
mod rate_limiter;
mod registry;

pub use dispatcher::{DispatchContext, DispatchOutcome, Dispatcher, DropReason};
pub use invoker::{InvokeOutcome, SafeInvoker};
pub use rate_limiter::{Decision, RateLimiter, DEFAULT_CAPACITY, DEFAULT_WINDOW};
pub use registry::{DispatchKey, HandlerRegistry, HandlerRegistryBuilder, Registration, Route};
