//! Replay scheduling: filtering, decimation and real-time pacing.

use std::time::Duration;

use chrono::NaiveDateTime;
use log::{debug, info};
use tokio_util::sync::CancellationToken;

use ais_replay_core::{encode, AisRecord, ReplayFilter, SentenceFormat};

use crate::transport::{SentenceSink, TransportError};

#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Scheduler lifecycle. A scheduler runs once; restarting a replay
/// means constructing a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Running,
    Done,
}

/// Everything the scheduler needs to know, resolved up front. The
/// scheduler never reads ambient configuration.
#[derive(Debug, Clone, Default)]
pub struct ReplayOptions {
    pub filter: ReplayFilter,
    pub format: SentenceFormat,
    /// Speed multiplier, at least 1. Serves double duty: only every
    /// Nth qualifying record is emitted, and the inter-record delay is
    /// divided by N.
    pub speed: u32,
}

/// Totals reported after a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Records that passed the filters.
    pub qualifying: u64,
    /// Sentences actually sent.
    pub sent: u64,
}

/// Walks a time-ordered record sequence and reproduces its cadence.
///
/// Single logical thread of control: the only suspension point is the
/// pacing sleep, and the sink is exclusively owned for the duration of
/// the run. Cancellation is honored between records only, so a
/// sentence is never truncated mid-send.
pub struct ReplayScheduler<S: SentenceSink> {
    options: ReplayOptions,
    sink: S,
    state: SchedulerState,
}

impl<S: SentenceSink> ReplayScheduler<S> {
    pub fn new(options: ReplayOptions, sink: S) -> Self {
        ReplayScheduler {
            options,
            sink,
            state: SchedulerState::Idle,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Consume the record source to exhaustion (or cancellation),
    /// sending one datagram per emitted record.
    pub async fn run(
        &mut self,
        records: impl Iterator<Item = AisRecord>,
        shutdown: &CancellationToken,
    ) -> Result<ReplaySummary, ReplayError> {
        self.state = SchedulerState::Running;
        let speed = u64::from(self.options.speed.max(1));
        let mut previous: Option<NaiveDateTime> = None;
        let mut summary = ReplaySummary::default();

        for record in records {
            if shutdown.is_cancelled() {
                info!("shutdown requested, stopping replay");
                break;
            }

            if !self.options.filter.accepts(&record) {
                continue;
            }
            summary.qualifying += 1;
            if summary.qualifying % speed != 0 {
                continue;
            }

            if let Some(previous) = previous {
                if let Some(delay) = pacing_delay(previous, record.timestamp, self.options.speed) {
                    tokio::select! {
                        _ = shutdown.cancelled() => {
                            info!("shutdown requested, stopping replay");
                            break;
                        }
                        _ = tokio::time::sleep(delay) => {}
                    }
                }
            }

            let sentence = encode(&record, self.options.format);
            self.sink.send(&sentence).await?;
            debug!("{}", record);
            summary.sent += 1;
            previous = Some(record.timestamp);
        }

        self.state = SchedulerState::Done;
        Ok(summary)
    }
}

/// Delay before emitting a record whose predecessor went out at
/// `previous`: the recorded gap divided by the speed multiplier.
/// `None` when the scaled gap is not positive (out-of-order or
/// duplicate timestamps replay immediately).
pub fn pacing_delay(previous: NaiveDateTime, current: NaiveDateTime, speed: u32) -> Option<Duration> {
    let gap = current - previous;
    let scaled = gap / speed.max(1) as i32;
    scaled.to_std().ok().filter(|d| !d.is_zero())
}
