//! Utility Module
//!
//! Host-loop plumbing shared by the controllers:
//!
//! - [`time`]: wall-clock sources ([`Clock`], [`SystemClock`], [`ManualClock`])
//! - [`timer`]: [`TimerQueue`], fire-and-forget delayed tasks polled once per frame

pub mod time;
pub mod timer;

pub use time::{Clock, ManualClock, SystemClock};
pub use timer::TimerQueue;
