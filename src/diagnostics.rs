/// ==============================================================================================
/// ==================================== Diagnostics Log =========================================
/// ==============================================================================================
///
/// Append-only records of restarts, acceleration attempts, and
/// safeguarding decisions. Every push is gated by `activate_logging` so a
/// release build with logging disabled elides both the allocation and
/// the `log` macro call. Not consumed by the core itself — drained or
/// disabled by the outer solver.
use std::time::Duration;

use serde::Serialize;

/// Reason a memory restart was triggered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum RestartReason {
    MemoryFull,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct RestartRecord {
    pub iter: usize,
    pub reason: RestartReason,
}

/// Why `accelerate` declined to apply an extrapolation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum AccelerationTag {
    NotEnoughCols,
    FailSingular,
    FailEtaNorm,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct AccelerationRecord {
    pub iter: usize,
    pub tag: AccelerationTag,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct SafeguardRecord {
    pub iter: usize,
    pub new_norm: f64,
    pub ref_norm: f64,
    pub tau: f64,
    pub accepted: bool,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct Diagnostics {
    enabled: bool,
    restarts: Vec<RestartRecord>,
    acceleration_status: Vec<AccelerationRecord>,
    safeguarding_status: Vec<SafeguardRecord>,
    regularization: Vec<f64>,
    // Duration has no serde impl; these are pure in-process introspection,
    // never part of a dumped diagnostics record.
    #[serde(skip)]
    update_history_durations: Vec<Duration>,
    #[serde(skip)]
    accelerate_durations: Vec<Duration>,
}

impl Diagnostics {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            ..Default::default()
        }
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn log_restart(&mut self, iter: usize, reason: RestartReason) {
        if !self.enabled {
            return;
        }
        log::debug!("anderson-accel: memory restart at iter={iter} reason={reason:?}");
        self.restarts.push(RestartRecord { iter, reason });
    }

    pub fn log_acceleration(&mut self, iter: usize, tag: AccelerationTag) {
        if !self.enabled {
            return;
        }
        log::trace!("anderson-accel: extrapolation skipped at iter={iter} tag={tag:?}");
        self.acceleration_status.push(AccelerationRecord { iter, tag });
    }

    pub fn log_safeguard(&mut self, iter: usize, new_norm: f64, ref_norm: f64, tau: f64, accepted: bool) {
        if !self.enabled {
            return;
        }
        log::debug!(
            "anderson-accel: safeguard iter={iter} new_norm={new_norm} ref_norm={ref_norm} tau={tau} accepted={accepted}"
        );
        self.safeguarding_status.push(SafeguardRecord {
            iter,
            new_norm,
            ref_norm,
            tau,
            accepted,
        });
    }

    pub fn log_regularization(&mut self, beta: f64) {
        if !self.enabled {
            return;
        }
        self.regularization.push(beta);
    }

    /// Record wall-clock duration of one `update_history` call (spec.md
    /// §5: "optional wall-clock accounting ... for diagnostics").
    pub fn log_update_duration(&mut self, d: Duration) {
        if !self.enabled {
            return;
        }
        self.update_history_durations.push(d);
    }

    /// Record wall-clock duration of one `accelerate` call.
    pub fn log_accelerate_duration(&mut self, d: Duration) {
        if !self.enabled {
            return;
        }
        self.accelerate_durations.push(d);
    }

    pub fn restarts(&self) -> &[RestartRecord] {
        &self.restarts
    }

    pub fn acceleration_status(&self) -> &[AccelerationRecord] {
        &self.acceleration_status
    }

    pub fn safeguarding_status(&self) -> &[SafeguardRecord] {
        &self.safeguarding_status
    }

    pub fn regularization_log(&self) -> &[f64] {
        &self.regularization
    }

    pub fn update_history_durations(&self) -> &[Duration] {
        &self.update_history_durations
    }

    pub fn accelerate_durations(&self) -> &[Duration] {
        &self.accelerate_durations
    }

    /// Drop all records, preserving the enabled flag and allocations.
    pub fn clear(&mut self) {
        self.restarts.clear();
        self.acceleration_status.clear();
        self.safeguarding_status.clear();
        self.regularization.clear();
        self.update_history_durations.clear();
        self.accelerate_durations.clear();
    }
}
