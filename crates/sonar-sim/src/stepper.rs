//! SensorStepper: one sonar, advanced one tick at a time.
//!
//! Owns the blip store, ping state, toggle sync and RNG of a single sensor.
//! World geometry is borrowed through `GeometrySource` each tick and never
//! mutated. Completely headless, so replays with the same seed and inputs
//! produce the same blips.

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use sonar_core::commands::SonarCommand;
use sonar_core::config::SonarConfig;
use sonar_core::enums::{SensorMode, WaveKind};
use sonar_core::events::{SonarEvent, ToggleMessage};
use sonar_core::source::GeometrySource;
use sonar_core::state::RenderView;
use sonar_core::types::{SensorContext, SonarTime};

use crate::blips::{BlipStore, DisplayBounds};
use crate::ping::PingState;
use crate::systems;
use crate::systems::sampler::{AnnulusSampler, Band};
use crate::systems::targets::{self, TargetBatch};
use crate::toggle::{ReceiveOutcome, ToggleSync};

/// What happened during one tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TickReport {
    /// Blips inserted by sampling.
    pub inserted: usize,
    /// Blips removed by aging or leaving the display.
    pub expired: usize,
    /// Toggle messages to send to other peers.
    pub outgoing: Vec<ToggleMessage>,
    pub events: Vec<SonarEvent>,
}

pub struct SensorStepper {
    config: SonarConfig,
    rng: ChaCha8Rng,
    mode: SensorMode,
    ping: PingState,
    store: BlipStore,
    toggle: ToggleSync,
    time: SonarTime,
    command_queue: VecDeque<SonarCommand>,
    last_origin: Vec2,
    report: TickReport,
}

impl SensorStepper {
    /// Create an idle sensor. The config is assumed validated.
    pub fn new(config: SonarConfig) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            toggle: ToggleSync::new(&config.toggle),
            config,
            mode: SensorMode::default(),
            ping: PingState::new(),
            store: BlipStore::new(),
            time: SonarTime::default(),
            command_queue: VecDeque::new(),
            last_origin: Vec2::ZERO,
            report: TickReport::default(),
        }
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: SonarCommand) {
        self.command_queue.push_back(command);
    }

    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = SonarCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the sensor by `dt` seconds at `ctx`.
    pub fn tick(&mut self, ctx: &SensorContext, source: &dyn GeometrySource, dt: f32) -> TickReport {
        self.process_commands();

        if let Some(correction) = self.toggle.advance(dt) {
            self.set_mode(correction.active);
            self.report.events.push(SonarEvent::CorrectionApplied {
                active: correction.active,
                overrode_prediction: correction.overrode_prediction,
            });
        }

        self.time.advance(dt);
        self.last_origin = ctx.position;

        let mut sweep_tail = None;
        if self.mode.is_active() {
            sweep_tail = self.ping.advance_sweep(
                dt,
                self.config.sweep_duration,
                self.config.display_radius,
            );
            if sweep_tail.is_some() {
                self.report.events.push(SonarEvent::SweepRestarted);
            }
        }
        let oscillation = (self.time.elapsed_secs * f64::from(self.config.passive_frequency)).sin();
        self.ping.set_passive(oscillation as f32);

        if self.mode.is_active() {
            if let Some(tail) = sweep_tail {
                self.report.inserted += self.ping_active(ctx, source, tail);
            }
            let band = self.ping.wave(WaveKind::Active).band();
            self.report.inserted += self.ping_active(ctx, source, band);
        }
        let oscillation = self.ping.wave(WaveKind::Passive).band();
        self.report.inserted += self.ping_passive(ctx, source, oscillation);

        self.report.expired += self.store.age_and_evict(
            dt,
            self.config.decay_rate,
            &self.bounds(ctx.position),
        );
        self.ping.commit();

        log::debug!(
            "tick {}: +{} -{} blips, {} live",
            self.time.tick,
            self.report.inserted,
            self.report.expired,
            self.store.len()
        );
        std::mem::take(&mut self.report)
    }

    /// Sample the active sweep against everything in range. Returns the
    /// number of blips inserted.
    pub fn ping_active(
        &mut self,
        ctx: &SensorContext,
        source: &dyn GeometrySource,
        band: Band,
    ) -> usize {
        if !band.is_open() {
            return 0;
        }
        let batch = targets::collect_active(ctx, source, &self.config, band, &mut self.rng);
        self.sample_batch(ctx.position, &batch)
    }

    /// Sample every ambient emitter the sensor can hear, with `oscillation`
    /// as the unscaled passive band. Returns the number of blips inserted.
    ///
    /// Audible emitters are also heard directly on every tick the
    /// oscillation is positive, independent of the band.
    pub fn ping_passive(
        &mut self,
        ctx: &SensorContext,
        source: &dyn GeometrySource,
        oscillation: Band,
    ) -> usize {
        let bounds = self.bounds(ctx.position);
        let mut inserted = 0;
        for emitter in source.ambient_sources() {
            let Some(heard) =
                targets::collect_passive(ctx.position, &emitter, source, &self.config, oscillation)
            else {
                continue;
            };
            if let Some(blip) = heard.direct.filter(|b| bounds.contains(b.position)) {
                self.store.insert(blip);
                inserted += 1;
            }
            inserted += self.sample_batch(ctx.position, &heard.batch);
        }
        inserted
    }

    fn sample_batch(&mut self, origin: Vec2, batch: &TargetBatch) -> usize {
        let bounds = self.bounds(origin);
        let sampler = AnnulusSampler::new(&self.config.sampler, bounds);
        batch
            .targets
            .iter()
            .map(|(_, target)| sampler.sample(target, batch.band, &mut self.rng, &mut self.store))
            .sum()
    }

    fn bounds(&self, origin: Vec2) -> DisplayBounds {
        DisplayBounds::new(origin, self.config.display_scale(), self.config.display_radius)
    }

    pub fn mode(&self) -> SensorMode {
        self.mode
    }

    pub fn is_active(&self) -> bool {
        self.mode.is_active()
    }

    pub fn time(&self) -> SonarTime {
        self.time
    }

    pub fn config(&self) -> &SonarConfig {
        &self.config
    }

    pub fn blips(&self) -> &BlipStore {
        &self.store
    }

    pub fn ping_state(&self) -> &PingState {
        &self.ping
    }

    pub fn toggle(&self) -> &ToggleSync {
        &self.toggle
    }

    /// Read-only view for drawing stages.
    pub fn render_view(&self) -> RenderView {
        systems::snapshot::build_render_view(
            &self.config,
            self.time,
            self.mode,
            self.last_origin,
            &self.ping,
            &self.store,
            self.toggle.highlight().alpha(),
        )
    }

    #[cfg(test)]
    pub(crate) fn store_mut(&mut self) -> &mut BlipStore {
        &mut self.store
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: SonarCommand) {
        match command {
            SonarCommand::SetActive { active } => {
                if active != self.mode.is_active() {
                    let msg = self.toggle.request(active);
                    self.report.outgoing.push(msg);
                    self.set_mode(active);
                }
            }
            SonarCommand::ReceiveToggle { bits, sending_time } => {
                let msg = ToggleMessage::from_bits(bits);
                match self.toggle.receive(msg, sending_time) {
                    ReceiveOutcome::Apply {
                        active,
                        rebroadcast,
                    } => {
                        self.report.outgoing.extend(rebroadcast);
                        self.set_mode(active);
                    }
                    ReceiveOutcome::Queued { active } => {
                        log::debug!("toggle to {active} deferred until correction window closes");
                        self.report
                            .events
                            .push(SonarEvent::CorrectionQueued { active });
                    }
                }
            }
            SonarCommand::ClearBlips => self.store.clear(),
        }
    }

    fn set_mode(&mut self, active: bool) {
        if active == self.mode.is_active() {
            return;
        }
        self.mode = SensorMode::from_active(active);
        if active {
            self.ping.restart_sweep();
        } else {
            self.ping.stop_sweep();
        }
        log::info!("sonar switched to {:?}", self.mode);
        self.report.events.push(SonarEvent::ModeChanged { active });
    }
}
