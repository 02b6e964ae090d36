//! Latency-compensated start scheduling.
//!
//! Receivers observing the same logical event should finish their motion at
//! the same wall-clock time no matter how long the event took to reach them.
//! The emitter stamps its send time; each receiver waits only for whatever
//! part of the configured delay has not already been spent in transit.

/// Milliseconds left before a delayed start should fire.
///
/// `remaining = delay_seconds * 1000 - (now_ms - emitted_at_ms)`, clamped
/// to zero so an already-elapsed delay fires right away. A missing emission
/// timestamp means "emitted now".
#[must_use]
pub fn compensated_delay_ms(delay_seconds: f64, emitted_at_ms: Option<f64>, now_ms: f64) -> f64 {
    let in_transit = emitted_at_ms.map_or(0.0, |emitted| now_ms - emitted);
    (delay_seconds * 1000.0 - in_transit).max(0.0)
}

/// A target start the animator wants the host to fire later.
///
/// The host hands `generation` back through
/// [`TransformAnimator::begin_targeting`](crate::animation::TransformAnimator::begin_targeting);
/// a superseded generation is ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingStart {
    pub delay_ms: f64,
    pub generation: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transit_time_is_subtracted() {
        let now = 10_000.0;
        let remaining = compensated_delay_ms(1.0, Some(now - 500.0), now);
        assert!((remaining - 500.0).abs() < 1e-9);
    }

    #[test]
    fn missing_timestamp_waits_full_delay() {
        assert!((compensated_delay_ms(2.0, None, 123.0) - 2000.0).abs() < 1e-9);
    }

    #[test]
    fn elapsed_delay_clamps_to_zero() {
        let now = 10_000.0;
        assert_eq!(compensated_delay_ms(0.25, Some(now - 900.0), now), 0.0);
    }
}
