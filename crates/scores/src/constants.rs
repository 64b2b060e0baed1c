//! Default constants for score smoothing.

/// Default EMA smoothing factor.
pub const DEFAULT_MOVING_AVERAGE_ALPHA: f64 = 0.5;
