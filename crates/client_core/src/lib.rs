use std::{
    sync::{
        atomic::{AtomicBool, AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};

use anyhow::Result;
use async_trait::async_trait;
use shared::{
    domain::{Exercise, ExerciseId, ExerciseKind, SessionPhase},
    protocol::{FinalStats, HealthResponse, StatsSnapshot},
};
use tokio::{sync::Mutex, task::JoinHandle};
use tracing::{error, info, warn};

pub mod error;
pub mod render;
pub mod summary;
pub mod transport;
pub mod types;

pub use error::SessionError;
pub use transport::HttpStatsService;
pub use types::{
    CountdownStep, FeedbackItem, Screen, StatSlot, StatsFields, SummaryRow, SummaryView,
};

const COUNTDOWN_START: u32 = 3;
const DEFAULT_COUNTDOWN_TICK: Duration = Duration::from_secs(1);
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Remote analysis service the controller drives. Implementations decide the
/// transport; the controller only sees session semantics.
#[async_trait]
pub trait StatsService: Send + Sync {
    async fn list_exercises(&self) -> Result<Vec<Exercise>>;
    async fn start_exercise(&self, id: &ExerciseId) -> Result<()>;
    async fn fetch_stats(&self) -> Result<StatsSnapshot>;
    /// Stop the running session. `None` means the service had no session to
    /// report on.
    async fn stop_exercise(&self) -> Result<Option<StatsSnapshot>>;
    async fn health(&self) -> Result<HealthResponse>;
}

/// Rendering sink. The controller decides what to show and when; how it is
/// drawn is the implementation's business.
pub trait DisplaySurface: Send + Sync {
    fn show_screen(&self, screen: Screen);
    fn render_exercises(&self, exercises: &[Exercise]);
    fn set_session_title(&self, title: &str);
    fn render_countdown(&self, step: CountdownStep);
    fn render_stats(&self, fields: &StatsFields);
    fn render_feedback(&self, items: &[FeedbackItem]);
    fn render_summary(&self, view: &SummaryView);
    fn show_error(&self, message: &str);
}

/// Opaque live-video surface. The controller only assigns and clears the
/// stream URL; the content is never inspected.
pub trait LiveFeed: Send + Sync {
    fn start(&self, url: &str);
    fn stop(&self);
}

#[derive(Debug, Clone)]
pub struct ControllerConfig {
    pub video_feed_url: String,
    pub countdown_tick: Duration,
    pub poll_interval: Duration,
}

impl ControllerConfig {
    pub fn new(video_feed_url: impl Into<String>) -> Self {
        Self {
            video_feed_url: video_feed_url.into(),
            countdown_tick: DEFAULT_COUNTDOWN_TICK,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

pub struct SessionController {
    stats: Arc<dyn StatsService>,
    display: Arc<dyn DisplaySurface>,
    feed: Arc<dyn LiveFeed>,
    config: ControllerConfig,
    inner: Mutex<SessionState>,
    /// Cleared first on every exit from Active; async callbacks re-check it
    /// on arrival so a response landing after stop is discarded unrendered.
    workout_active: AtomicBool,
    /// Bumped on every reset. In-flight countdowns and start/stop requests
    /// compare against their captured value and stand down when stale.
    epoch: AtomicU64,
}

struct SessionState {
    phase: SessionPhase,
    selected: Option<Exercise>,
    catalog: Vec<Exercise>,
    /// Some iff `phase == Active`.
    poll_task: Option<JoinHandle<()>>,
}

impl SessionController {
    pub fn new(
        stats: Arc<dyn StatsService>,
        display: Arc<dyn DisplaySurface>,
        feed: Arc<dyn LiveFeed>,
        config: ControllerConfig,
    ) -> Arc<Self> {
        Arc::new(Self {
            stats,
            display,
            feed,
            config,
            inner: Mutex::new(SessionState {
                phase: SessionPhase::Idle,
                selected: None,
                catalog: Vec::new(),
                poll_task: None,
            }),
            workout_active: AtomicBool::new(false),
            epoch: AtomicU64::new(0),
        })
    }

    /// Fetch the exercise catalog once and render the selection screen. On
    /// failure the selection stays empty; there is no retry loop.
    pub async fn load_catalog(&self) -> Result<(), SessionError> {
        self.display.show_screen(Screen::Selection);
        match self.stats.list_exercises().await {
            Ok(exercises) => {
                info!(count = exercises.len(), "exercise catalog loaded");
                self.display.render_exercises(&exercises);
                self.inner.lock().await.catalog = exercises;
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "failed to load exercise catalog");
                self.display
                    .show_error("Failed to load exercises. Please refresh the page.");
                Err(SessionError::Catalog(err.to_string()))
            }
        }
    }

    pub async fn phase(&self) -> SessionPhase {
        self.inner.lock().await.phase
    }

    pub async fn selected_exercise(&self) -> Option<Exercise> {
        self.inner.lock().await.selected.clone()
    }

    pub async fn catalog(&self) -> Vec<Exercise> {
        self.inner.lock().await.catalog.clone()
    }

    /// Idle → Counting → (network-gated) Active. Returns once the session is
    /// live, or after the controller has fallen back to Idle.
    pub async fn select_exercise(
        self: &Arc<Self>,
        id: &ExerciseId,
    ) -> Result<(), SessionError> {
        let exercise = {
            let guard = self.inner.lock().await;
            guard.catalog.iter().find(|entry| &entry.id == id).cloned()
        };
        let Some(exercise) = exercise else {
            self.display.show_error(&format!("Unknown exercise: {id}"));
            return Err(SessionError::UnknownExercise(id.clone()));
        };

        // Each selection starts from a clean slate.
        if self.phase().await != SessionPhase::Idle {
            self.go_home().await;
        }

        let epoch = self.epoch.load(Ordering::SeqCst);
        {
            let mut guard = self.inner.lock().await;
            guard.phase = SessionPhase::Counting;
            guard.selected = Some(exercise.clone());
        }
        info!(exercise = %exercise.id, "exercise selected");
        self.display.show_screen(Screen::Loading);

        if !self.run_countdown(&exercise, epoch).await {
            // A reset raced the countdown; whoever bumped the epoch owns the
            // cleanup.
            return Ok(());
        }

        if let Err(err) = self.stats.start_exercise(&exercise.id).await {
            error!(exercise = %exercise.id, error = %err, "start_exercise rejected");
            self.display
                .show_error("Failed to start exercise. Please try again.");
            self.go_home().await;
            return Err(SessionError::StartRejected(err.to_string()));
        }

        self.enter_active(&exercise, epoch).await;
        Ok(())
    }

    /// Fixed 3-2-1-Go countdown, purely local. Returns false when a reset
    /// cancelled it mid-count.
    async fn run_countdown(&self, exercise: &Exercise, epoch: u64) -> bool {
        self.display.show_screen(Screen::Workout);
        self.display.set_session_title(&exercise.name);

        let mut ticker = tokio::time::interval(self.config.countdown_tick);
        let mut remaining = COUNTDOWN_START;
        loop {
            ticker.tick().await;
            if self.epoch.load(Ordering::SeqCst) != epoch {
                return false;
            }
            if remaining > 0 {
                self.display.render_countdown(CountdownStep::Tick(remaining));
                remaining -= 1;
            } else {
                self.display.render_countdown(CountdownStep::Go);
                // Dropping the ticker here is the single-fire guarantee.
                return true;
            }
        }
    }

    async fn enter_active(self: &Arc<Self>, exercise: &Exercise, epoch: u64) {
        if self.epoch.load(Ordering::SeqCst) != epoch {
            return;
        }
        self.workout_active.store(true, Ordering::SeqCst);
        self.display.render_countdown(CountdownStep::Clear);

        // Cache-busted per session so a player never resumes a stale stream.
        let feed_url = format!("{}?session={epoch}", self.config.video_feed_url);
        self.feed.start(&feed_url);

        let task = self.spawn_poll_task(exercise.id.kind());

        let mut guard = self.inner.lock().await;
        if self.epoch.load(Ordering::SeqCst) != epoch {
            // A reset won the race; stay torn down.
            task.abort();
            self.workout_active.store(false, Ordering::SeqCst);
            self.feed.stop();
            return;
        }
        guard.phase = SessionPhase::Active;
        guard.poll_task = Some(task);
        info!(exercise = %exercise.id, "session active; stats polling started");
    }

    /// Recurring stats poll. The first poll fires immediately; afterwards one
    /// per interval until the session leaves Active. Failures are swallowed:
    /// a single missed sample must not abort a live workout.
    fn spawn_poll_task(self: &Arc<Self>, kind: ExerciseKind) -> JoinHandle<()> {
        let client = Arc::clone(self);
        let interval = self.config.poll_interval;
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                if !client.workout_active.load(Ordering::SeqCst) {
                    break;
                }
                match client.stats.fetch_stats().await {
                    Ok(snapshot) => {
                        // Re-check on arrival: a response that lands after
                        // stop must not repaint the screen.
                        if !client.workout_active.load(Ordering::SeqCst) {
                            break;
                        }
                        let fields = render::stats_fields(kind, &snapshot);
                        client.display.render_stats(&fields);
                        client
                            .display
                            .render_feedback(&render::feedback_items(&snapshot.feedback));
                    }
                    Err(err) => {
                        warn!(error = %err, "stats poll failed; retrying next interval");
                    }
                }
            }
        })
    }

    /// Active → Summary on success, Active → Idle when the stop request
    /// fails. Teardown (flag, poll task, feed) is unconditional and happens
    /// before the network call. A second stop while one is pending is a
    /// no-op.
    pub async fn stop(&self) -> Result<(), SessionError> {
        if !self.workout_active.swap(false, Ordering::SeqCst) {
            return Ok(());
        }

        let epoch = self.epoch.load(Ordering::SeqCst);
        let kind = {
            let mut guard = self.inner.lock().await;
            if let Some(task) = guard.poll_task.take() {
                task.abort();
            }
            guard.phase = SessionPhase::Summary;
            guard
                .selected
                .as_ref()
                .map_or(ExerciseKind::RepBased, |exercise| exercise.id.kind())
        };
        self.feed.stop();
        info!("session stopping; awaiting final stats");

        match self.stats.stop_exercise().await {
            Ok(raw) => {
                if self.epoch.load(Ordering::SeqCst) != epoch {
                    // A reset raced the stop request; the summary is stale.
                    return Ok(());
                }
                let view = match raw {
                    Some(raw) => summary::summarize(&FinalStats::from_snapshot(kind, &raw)),
                    None => SummaryView::NoData,
                };
                self.display.show_screen(Screen::Summary);
                self.display.render_summary(&view);
                Ok(())
            }
            Err(err) => {
                // Summary is best-effort, never fabricated.
                error!(error = %err, "stop_exercise failed; discarding session");
                self.go_home().await;
                Err(SessionError::StopFailed(err.to_string()))
            }
        }
    }

    /// Unconditional reset to Idle. Safe from any state, including
    /// mid-countdown and mid-error, and idempotent.
    pub async fn go_home(&self) {
        self.workout_active.store(false, Ordering::SeqCst);
        self.epoch.fetch_add(1, Ordering::SeqCst);
        {
            let mut guard = self.inner.lock().await;
            if let Some(task) = guard.poll_task.take() {
                task.abort();
            }
            guard.selected = None;
            guard.phase = SessionPhase::Idle;
        }
        self.feed.stop();
        self.display.show_screen(Screen::Selection);
    }
}
