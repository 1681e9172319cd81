use super::presentation::filler_names;
use super::{
    Celebration, Clock, DrawPresenter, GiveawayBackend, Notice, SlotReel, WinnerCard,
};
use crate::domain::{DrawForm, DrawRequest, DrawTarget, Winner};
use giveaway_errors::AppError;
use rand::Rng;
use std::cell::{Cell, RefCell};
use std::time::Duration;

pub const DRAW_FAILED_MESSAGE: &str = "Une erreur est survenue lors du tirage.";
pub const NO_WINNERS_MESSAGE: &str = "Aucun participant ne correspond aux critères.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawPhase {
    #[default]
    Idle,
    Validating,
    Submitting,
    Animating,
    Revealing,
}

impl DrawPhase {
    /// A new draw may start from rest or once the previous results are on screen.
    pub fn accepts_trigger(self) -> bool {
        matches!(self, Self::Idle | Self::Revealing)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOutcome {
    /// A draw was already in flight.
    Ignored,
    Rejected(AppError),
    NoWinners,
    Failed(AppError),
    Completed { winners: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawTiming {
    pub spin: Duration,
    pub pause: Duration,
    pub stagger: Duration,
    pub filler_len: usize,
    pub placeholder_len: usize,
}

impl Default for DrawTiming {
    fn default() -> Self {
        Self {
            spin: Duration::from_secs(4),
            pause: Duration::from_secs(1),
            stagger: Duration::from_millis(400),
            filler_len: 50,
            placeholder_len: 20,
        }
    }
}

/// Runs one draw end to end: validation, submission, reel animation and reveal.
///
/// Lives on a single thread; interior mutability keeps `run` callable through
/// a shared reference from UI event handlers.
pub struct DrawOrchestrator<B, C, P, R> {
    backend: B,
    clock: C,
    presenter: P,
    rng: RefCell<R>,
    phase: Cell<DrawPhase>,
    timing: DrawTiming,
}

impl<B, C, P, R> DrawOrchestrator<B, C, P, R>
where
    B: GiveawayBackend,
    C: Clock,
    P: DrawPresenter,
    R: Rng,
{
    pub fn new(backend: B, clock: C, presenter: P, rng: R) -> Self {
        Self {
            backend,
            clock,
            presenter,
            rng: RefCell::new(rng),
            phase: Cell::new(DrawPhase::Idle),
            timing: DrawTiming::default(),
        }
    }

    pub fn with_timing(mut self, timing: DrawTiming) -> Self {
        self.timing = timing;
        self
    }

    pub fn phase(&self) -> DrawPhase {
        self.phase.get()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn enter(&self, phase: DrawPhase) {
        tracing::debug!("Draw phase {:?} -> {:?}", self.phase.get(), phase);
        self.phase.set(phase);
    }

    /// `read_form` is only called once the selection has been accepted, so the
    /// request reflects the form as it is at submission time.
    pub async fn run(&self, target: DrawTarget, read_form: impl FnOnce() -> DrawForm) -> DrawOutcome {
        if !self.phase.get().accepts_trigger() {
            tracing::debug!("Draw trigger ignored during {:?}", self.phase.get());
            return DrawOutcome::Ignored;
        }

        self.enter(DrawPhase::Validating);
        if !target.has_valid_selection() {
            return self.reject(AppError::EmptySelection);
        }

        let form = read_form();
        let num_winners = match form.parse_winner_count() {
            Ok(n) => n,
            Err(e) => return self.reject(e),
        };
        let filters = match form.filters.to_config() {
            Ok(filters) => filters,
            Err(e) => return self.reject(e),
        };
        let request = DrawRequest::new(&target, num_winners, filters);

        self.enter(DrawPhase::Submitting);
        self.presenter.clear_results();
        let placeholder = filler_names(&mut *self.rng.borrow_mut(), self.timing.placeholder_len);
        self.presenter.show_overlay(placeholder);

        tracing::info!(
            "Submitting draw: {} post(s), {} winner(s), live={}",
            request.post_ids.len(),
            request.num_winners,
            request.is_live
        );

        let winners = match self.backend.draw(&request).await {
            Ok(response) => match response.error {
                Some(err) => Err(AppError::Service(err.message().to_string())),
                None => Ok(response.into_winners()),
            },
            Err(e) => Err(e),
        };

        let winners = match winners {
            Ok(winners) => winners,
            Err(e) => {
                tracing::error!("Draw failed: {}", e);
                self.presenter.hide_overlay();
                self.presenter.notify(Notice::error(failure_message(&e)));
                self.enter(DrawPhase::Idle);
                return DrawOutcome::Failed(e);
            }
        };

        if winners.is_empty() {
            self.presenter.hide_overlay();
            self.presenter.notify(Notice::warning(NO_WINNERS_MESSAGE));
            self.enter(DrawPhase::Idle);
            return DrawOutcome::NoWinners;
        }

        self.enter(DrawPhase::Animating);
        let reel = SlotReel::build(
            &mut *self.rng.borrow_mut(),
            &winners,
            self.timing.filler_len,
            self.timing.spin,
        );
        self.presenter.spin(&reel);
        self.clock.sleep(self.timing.spin).await;
        self.clock.sleep(self.timing.pause).await;

        self.enter(DrawPhase::Revealing);
        self.presenter.hide_overlay();
        let count = winners.len();
        self.reveal(winners);

        tracing::info!("Draw completed with {} winner(s)", count);
        DrawOutcome::Completed { winners: count }
    }

    fn reject(&self, error: AppError) -> DrawOutcome {
        tracing::warn!("Draw rejected: {}", error);
        self.presenter.notify(Notice::warning(error.user_message()));
        self.enter(DrawPhase::Idle);
        DrawOutcome::Rejected(error)
    }

    fn reveal(&self, winners: Vec<Winner>) {
        for (index, winner) in winners.into_iter().enumerate() {
            let rank = index + 1;
            self.presenter.reveal(WinnerCard {
                rank,
                winner,
                reveal_delay: self.timing.stagger * index as u32,
            });
            if rank == 1 {
                self.presenter.celebrate(Celebration::Full);
            } else {
                self.presenter.celebrate(Celebration::Supplementary { rank });
            }
        }
    }
}

/// Messages written by the draw service reach the user; local failures stay generic.
fn failure_message(error: &AppError) -> &str {
    match error {
        AppError::Service(_) | AppError::RateLimited(_) | AppError::Upstream(_) => {
            error.user_message()
        }
        _ => DRAW_FAILED_MESSAGE,
    }
}
