//! The sampling loop: capture, extract, estimate, accumulate
//!
//! A run moves `Idle -> Running -> Stopped`. Each iteration `i` captures
//! `<prefix><i>.jpg`, extracts a sample from it and compares it with the
//! sample of iteration `i - 1`. Stop conditions (iteration cap, wall-clock
//! cap) are only checked between iterations, and the loop blocks for the
//! configured delay before starting the next one.
//!
//! Any capture, decode, extraction or estimation error aborts the run; in
//! particular two photos with the same timestamp end it with
//! [`SpeedError::ZeroElapsedTime`](crate::SpeedError::ZeroElapsedTime).

use crate::capture::Capture;
use crate::clock::Clock;
use crate::config::RunConfig;
use crate::estimate::estimate_speed;
use crate::export::ResultWriter;
use crate::metadata::{extract_sample, MetadataSource};
use crate::types::{GeoSample, IterationRecord, RunAccumulator, RunReport, StopReason};
use crate::Result;
use anyhow::{bail, Context};
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
    Stopped(StopReason),
}

struct Sampled {
    iterations: Vec<IterationRecord>,
    accumulator: RunAccumulator,
    stop_reason: StopReason,
    elapsed: Duration,
}

/// Drives one run; owns its accumulator and the previous sample
pub struct SamplingLoop<C, S, K> {
    config: RunConfig,
    capture: C,
    source: S,
    clock: K,
    state: LoopState,
}

impl<C: Capture, S: MetadataSource, K: Clock> SamplingLoop<C, S, K> {
    pub fn new(config: RunConfig, capture: C, source: S, clock: K) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            capture,
            source,
            clock,
            state: LoopState::Idle,
        })
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn clock(&self) -> &K {
        &self.clock
    }

    /// Run to completion and hand the formatted average to `writer`
    ///
    /// The writer is called exactly once, and only if the run was not aborted.
    pub fn run<W: ResultWriter>(&mut self, writer: &mut W) -> Result<RunReport> {
        if self.state != LoopState::Idle {
            bail!("Sampling loop already ran (state {:?})", self.state);
        }

        info!("started");
        self.state = LoopState::Running;

        let sampled = match self.sample() {
            Ok(sampled) => sampled,
            Err(e) => {
                self.state = LoopState::Stopped(StopReason::Aborted);
                warn!("run aborted: {e:#}");
                return Err(e);
            }
        };
        self.state = LoopState::Stopped(sampled.stop_reason);

        let average = sampled.accumulator.average();
        let result_text = average.to_result_string();
        match average.kmps() {
            Some(speed) => info!(
                "average speed {speed:.5} km/s over {} comparisons",
                sampled.accumulator.iterations_completed - 1
            ),
            None => warn!(
                "only {} iteration(s) completed, no speed estimate possible",
                sampled.accumulator.iterations_completed
            ),
        }

        if let Err(e) = writer.write_text(&self.config.result_path, &result_text) {
            self.state = LoopState::Stopped(StopReason::Aborted);
            warn!("run aborted: {e:#}");
            return Err(e);
        }
        info!("result written to {}", self.config.result_path.display());
        info!("ended");

        Ok(RunReport {
            iterations: sampled.iterations,
            accumulator: sampled.accumulator,
            stop_reason: sampled.stop_reason,
            average,
            result_text,
            elapsed: sampled.elapsed,
        })
    }

    fn sample(&mut self) -> Result<Sampled> {
        let max_duration = self.config.max_duration();
        let max_iterations = self.config.max_iterations;
        let delay = self.config.delay();
        let policy = self.config.elapsed_policy;

        let start = self.clock.now();
        let mut accumulator = RunAccumulator::new();
        let mut iterations = Vec::new();
        let mut previous: Option<GeoSample> = None;

        let stop_reason = loop {
            if self.clock.now().saturating_sub(start) >= max_duration {
                break StopReason::DurationLimit;
            }

            let i = accumulator.iterations_completed;
            info!("iteration {i} started");

            let image_path = self.config.image_path(i);
            let hint = previous.map(|p| p.point());
            self.capture.capture(&image_path, hint.as_ref())?;

            let record = self.source.decode(&image_path)?;
            let sample = extract_sample(&record).with_context(|| {
                format!("Failed to extract sample from {}", image_path.display())
            })?;
            let estimate = estimate_speed(&sample, previous.as_ref(), policy).with_context(|| {
                format!(
                    "Failed to estimate speed between iterations {} and {i}",
                    i.saturating_sub(1)
                )
            })?;

            accumulator.record(&estimate);
            match estimate.speed_kmps() {
                Some(speed) => info!("iteration {i} ended in {speed} km/s"),
                None => info!("iteration {i} ended with nothing to compare"),
            }

            iterations.push(IterationRecord {
                iteration: i,
                image_path,
                sample,
                estimate,
            });
            previous = Some(sample);

            if accumulator.iterations_completed >= max_iterations {
                break StopReason::IterationLimit;
            }
            self.clock.sleep(delay);
        };

        Ok(Sampled {
            iterations,
            accumulator,
            stop_reason,
            elapsed: self.clock.now().saturating_sub(start),
        })
    }
}
