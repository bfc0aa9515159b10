//! Load lifecycle of one embedded iframe.
//!
//! The machine is pure: the view feeds it browser events and executes the
//! returned [`LoaderCommand`]. Every command replaces the single pending timer
//! of the iframe, so the view must drop its previous timer before acting on
//! the next command. Timer callbacks carry the generation they were armed
//! with; callbacks from an older generation are ignored.

use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_BASE_TIMEOUT_MS: u32 = 15_000;
pub const DEFAULT_TIMEOUT_STEP_MS: u32 = 5_000;
pub const DEFAULT_ERROR_RETRY_DELAY_MS: u32 = 2_000;
/// After this long in `Loading` the view shows the "may take a moment" hint
pub const SLOW_LOAD_HINT_MS: u32 = 10_000;

pub const OFFLINE_MESSAGE: &str = "No internet connection detected";
pub const TIMEOUT_MESSAGE: &str = "Connection timeout after multiple attempts";
pub const ERROR_MESSAGE: &str = "Failed to load after multiple attempts";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    pub max_retries: u32,
    pub base_timeout_ms: u32,
    pub timeout_step_ms: u32,
    pub error_retry_delay_ms: u32,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_timeout_ms: DEFAULT_BASE_TIMEOUT_MS,
            timeout_step_ms: DEFAULT_TIMEOUT_STEP_MS,
            error_retry_delay_ms: DEFAULT_ERROR_RETRY_DELAY_MS,
        }
    }
}

impl LoaderConfig {
    /// 15s, 20s, 25s, 30s with the defaults
    pub fn timeout_for(&self, attempt: u32) -> u32 {
        self.base_timeout_ms + attempt * self.timeout_step_ms
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadPhase {
    Idle,
    Loading,
    Loaded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FailureKind {
    Timeout,
    Error,
}

/// What the view has to do after feeding an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoaderCommand {
    /// Point the iframe at its URL and arm a timeout of `timeout_ms`
    BeginAttempt {
        attempt: u32,
        generation: u64,
        timeout_ms: u32,
    },
    /// Wait `delay_ms`, then call [`IframeLoader::resume`] with `generation`
    ScheduleRetry { generation: u64, delay_ms: u32 },
    /// Hide the loading panel and show the iframe
    ShowLoaded,
    /// Terminal error panel with a manual retry action
    ShowError { message: String },
    /// Stale or out-of-phase event
    Ignore,
}

#[derive(Debug, Clone)]
pub struct IframeLoader {
    config: LoaderConfig,
    phase: LoadPhase,
    attempt: u32,
    generation: u64,
    has_loaded: bool,
}

impl IframeLoader {
    pub fn new(config: LoaderConfig) -> Self {
        Self {
            config,
            phase: LoadPhase::Idle,
            attempt: 0,
            generation: 0,
            has_loaded: false,
        }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    /// Zero-based attempt counter
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    /// One-based attempt number as shown to the user
    pub fn display_attempt(&self) -> u32 {
        self.attempt + 1
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn has_loaded(&self) -> bool {
        self.has_loaded
    }

    /// Idle → Loading. Ignored in any other phase.
    pub fn start(&mut self) -> LoaderCommand {
        if self.phase != LoadPhase::Idle {
            return LoaderCommand::Ignore;
        }
        self.begin(0)
    }

    /// Manual retry from the error panel; always restarts at attempt 0.
    pub fn retry(&mut self) -> LoaderCommand {
        self.begin(0)
    }

    /// Browser reports no network before the first attempt.
    pub fn offline(&mut self) -> LoaderCommand {
        self.generation += 1;
        self.phase = LoadPhase::Failed;
        self.has_loaded = false;
        LoaderCommand::ShowError {
            message: OFFLINE_MESSAGE.to_string(),
        }
    }

    /// The iframe fired `load` and the probe accepted it.
    pub fn on_load(&mut self, generation: u64) -> LoaderCommand {
        if !self.is_current(generation) {
            return LoaderCommand::Ignore;
        }
        self.phase = LoadPhase::Loaded;
        self.has_loaded = true;
        self.attempt = 0;
        LoaderCommand::ShowLoaded
    }

    pub fn on_error(&mut self, generation: u64) -> LoaderCommand {
        if !self.is_current(generation) {
            return LoaderCommand::Ignore;
        }
        self.fail(FailureKind::Error)
    }

    pub fn on_timeout(&mut self, generation: u64) -> LoaderCommand {
        if !self.is_current(generation) || self.has_loaded {
            return LoaderCommand::Ignore;
        }
        self.fail(FailureKind::Timeout)
    }

    /// Continue after a [`LoaderCommand::ScheduleRetry`] delay.
    pub fn resume(&mut self, generation: u64) -> LoaderCommand {
        if !self.is_current(generation) {
            return LoaderCommand::Ignore;
        }
        self.arm()
    }

    fn is_current(&self, generation: u64) -> bool {
        self.phase == LoadPhase::Loading && generation == self.generation
    }

    fn begin(&mut self, attempt: u32) -> LoaderCommand {
        self.attempt = attempt;
        self.generation += 1;
        self.phase = LoadPhase::Loading;
        self.has_loaded = false;
        self.arm()
    }

    fn arm(&self) -> LoaderCommand {
        LoaderCommand::BeginAttempt {
            attempt: self.attempt,
            generation: self.generation,
            timeout_ms: self.config.timeout_for(self.attempt),
        }
    }

    fn fail(&mut self, kind: FailureKind) -> LoaderCommand {
        self.has_loaded = false;
        if self.attempt < self.config.max_retries {
            match kind {
                FailureKind::Timeout => self.begin(self.attempt + 1),
                FailureKind::Error => {
                    self.attempt += 1;
                    self.generation += 1;
                    LoaderCommand::ScheduleRetry {
                        generation: self.generation,
                        delay_ms: self.config.error_retry_delay_ms,
                    }
                }
            }
        } else {
            self.generation += 1;
            self.phase = LoadPhase::Failed;
            let message = match kind {
                FailureKind::Timeout => TIMEOUT_MESSAGE,
                FailureKind::Error => ERROR_MESSAGE,
            };
            LoaderCommand::ShowError {
                message: message.to_string(),
            }
        }
    }
}

impl Default for IframeLoader {
    fn default() -> Self {
        Self::new(LoaderConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generation_of(command: &LoaderCommand) -> u64 {
        match command {
            LoaderCommand::BeginAttempt { generation, .. } => *generation,
            LoaderCommand::ScheduleRetry { generation, .. } => *generation,
            other => panic!("no generation in {:?}", other),
        }
    }

    #[test]
    fn first_timeout_moves_to_second_attempt_with_20s() {
        let mut loader = IframeLoader::default();
        let first = loader.start();
        assert_eq!(
            first,
            LoaderCommand::BeginAttempt {
                attempt: 0,
                generation: 1,
                timeout_ms: 15_000
            }
        );

        let second = loader.on_timeout(generation_of(&first));
        assert_eq!(
            second,
            LoaderCommand::BeginAttempt {
                attempt: 1,
                generation: 2,
                timeout_ms: 20_000
            }
        );
        assert_eq!(loader.display_attempt(), 2);
        assert_eq!(loader.phase(), LoadPhase::Loading);
    }

    #[test]
    fn fails_after_max_retries_plus_one_timeouts() {
        let mut loader = IframeLoader::default();
        let mut command = loader.start();
        let mut timeouts = Vec::new();

        for _ in 0..DEFAULT_MAX_RETRIES {
            if let LoaderCommand::BeginAttempt { timeout_ms, .. } = command {
                timeouts.push(timeout_ms);
            }
            command = loader.on_timeout(generation_of(&command));
            assert_eq!(loader.phase(), LoadPhase::Loading);
        }
        if let LoaderCommand::BeginAttempt { timeout_ms, .. } = command {
            timeouts.push(timeout_ms);
        }
        let last = loader.on_timeout(generation_of(&command));

        assert_eq!(
            last,
            LoaderCommand::ShowError {
                message: TIMEOUT_MESSAGE.into()
            }
        );
        assert_eq!(loader.phase(), LoadPhase::Failed);
        assert_eq!(timeouts, vec![15_000, 20_000, 25_000, 30_000]);
        for pair in timeouts.windows(2) {
            assert_eq!(pair[1] - pair[0], 5_000);
        }

        // nothing further is scheduled once failed
        assert_eq!(loader.on_timeout(loader.generation()), LoaderCommand::Ignore);
        assert_eq!(loader.on_error(loader.generation()), LoaderCommand::Ignore);
    }

    #[test]
    fn errors_retry_after_delay_and_then_fail() {
        let mut loader = IframeLoader::default();
        let mut command = loader.start();
        for expected_attempt in 1..=DEFAULT_MAX_RETRIES {
            let scheduled = loader.on_error(generation_of(&command));
            assert_eq!(
                scheduled,
                LoaderCommand::ScheduleRetry {
                    generation: loader.generation(),
                    delay_ms: DEFAULT_ERROR_RETRY_DELAY_MS
                }
            );
            command = loader.resume(generation_of(&scheduled));
            match command {
                LoaderCommand::BeginAttempt { attempt, .. } => assert_eq!(attempt, expected_attempt),
                ref other => panic!("unexpected {:?}", other),
            }
        }
        assert_eq!(
            loader.on_error(generation_of(&command)),
            LoaderCommand::ShowError {
                message: ERROR_MESSAGE.into()
            }
        );
    }

    #[test]
    fn load_resets_attempts_and_disarms_stale_timer() {
        let mut loader = IframeLoader::default();
        let first = loader.start();
        let second = loader.on_timeout(generation_of(&first));
        assert_eq!(loader.on_load(generation_of(&second)), LoaderCommand::ShowLoaded);
        assert_eq!(loader.attempt(), 0);
        assert!(loader.has_loaded());
        assert_eq!(loader.on_timeout(generation_of(&second)), LoaderCommand::Ignore);
    }

    #[test]
    fn events_from_previous_attempt_are_ignored() {
        let mut loader = IframeLoader::default();
        let first = loader.start();
        let _second = loader.on_timeout(generation_of(&first));
        assert_eq!(loader.on_load(generation_of(&first)), LoaderCommand::Ignore);
        assert_eq!(loader.on_timeout(generation_of(&first)), LoaderCommand::Ignore);
        assert_eq!(loader.phase(), LoadPhase::Loading);
    }

    #[test]
    fn manual_retry_restarts_at_zero() {
        let mut loader = IframeLoader::new(LoaderConfig {
            max_retries: 0,
            ..LoaderConfig::default()
        });
        let first = loader.start();
        loader.on_timeout(generation_of(&first));
        assert_eq!(loader.phase(), LoadPhase::Failed);

        match loader.retry() {
            LoaderCommand::BeginAttempt {
                attempt, timeout_ms, ..
            } => {
                assert_eq!(attempt, 0);
                assert_eq!(timeout_ms, 15_000);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn start_is_only_valid_from_idle() {
        let mut loader = IframeLoader::default();
        loader.start();
        assert_eq!(loader.start(), LoaderCommand::Ignore);
    }

    #[test]
    fn offline_fails_immediately() {
        let mut loader = IframeLoader::default();
        assert_eq!(
            loader.offline(),
            LoaderCommand::ShowError {
                message: OFFLINE_MESSAGE.into()
            }
        );
        assert_eq!(loader.phase(), LoadPhase::Failed);
    }
}
