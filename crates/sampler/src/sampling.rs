//! The sample / validate / report cycle.

use embassy_time::{Duration, Instant};
use log::{debug, info, warn};

use crate::config::SAMPLE_INTERVAL;
use crate::ports::{Clock, ReportSink, SensorReader};
use crate::report::Report;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum State {
    /// Waiting out the interval
    Idle,
    /// Read, validate and report in progress
    Sampling,
}

/// Owns the collaborators for the lifetime of the program and drives one
/// cycle after another.
///
/// Ticks are anchored to the moment the loop was built: the `n`th read is
/// requested at `start + n * interval`, whatever the previous reads cost or
/// returned.
pub struct SamplingLoop<S, R, C> {
    sensor: S,
    sink: R,
    clock: C,
    interval: Duration,
    next_tick: Instant,
    state: State,
}

impl<S: SensorReader, R: ReportSink, C: Clock> SamplingLoop<S, R, C> {
    pub fn new(sensor: S, sink: R, clock: C) -> Self {
        Self::with_interval(sensor, sink, clock, SAMPLE_INTERVAL)
    }

    pub fn with_interval(sensor: S, sink: R, clock: C, interval: Duration) -> Self {
        let next_tick = clock.now() + interval;
        info!("sampling every {} ms", interval.as_millis());

        Self {
            sensor,
            sink,
            clock,
            interval,
            next_tick,
            state: State::Idle,
        }
    }

    /// Runs a single cycle and returns what was reported.
    ///
    /// Writes exactly one line to the sink.
    pub async fn cycle(&mut self) -> Report {
        self.wait().await;
        self.sample().await
    }

    /// Idle half of a cycle: sleeps until the next tick, then moves to
    /// [`State::Sampling`].
    pub async fn wait(&mut self) {
        self.enter(State::Idle);
        self.clock.sleep_until(self.next_tick).await;
        self.enter(State::Sampling);
    }

    /// Sampling half of a cycle: read, validate, report, schedule the next
    /// tick and go back to [`State::Idle`]. Does not wait for the tick.
    pub async fn sample(&mut self) -> Report {
        self.enter(State::Sampling);
        let reading = self.sensor.read().await;
        let report = match reading.validate() {
            Ok(m) => {
                debug!(
                    "temperature {} C, humidity {} %",
                    m.temperature_c, m.humidity_pct
                );
                Report::Measurement(m)
            }
            Err(e) => {
                warn!("{}", e);
                Report::Failed
            }
        };
        self.sink.write_line(&report.to_line());

        self.advance_tick();
        self.enter(State::Idle);
        report
    }

    fn enter(&mut self, state: State) {
        if self.state != state {
            debug!("{:?} -> {:?}", self.state, state);
            self.state = state;
        }
    }

    pub async fn run(&mut self) -> ! {
        loop {
            self.cycle().await;
        }
    }

    fn advance_tick(&mut self) {
        let now = self.clock.now();
        let step = self.interval.as_ticks();
        self.next_tick += self.interval;

        if self.next_tick >= now {
            return;
        }
        if step == 0 {
            self.next_tick = now;
            return;
        }

        // a read overran the deadline: drop the missed ticks, keep the phase
        let behind = (now - self.next_tick).as_ticks();
        let skipped = behind.div_ceil(step);
        warn!("sampling overran, skipping {} tick(s)", skipped);
        self.next_tick += Duration::from_ticks(step * skipped);
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn next_tick(&self) -> Instant {
        self.next_tick
    }

    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    pub fn sink(&self) -> &R {
        &self.sink
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn into_parts(self) -> (S, R, C) {
        (self.sensor, self.sink, self.clock)
    }
}
