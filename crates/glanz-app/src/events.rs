use glanz_core::machine::{Action, Effect, Lifetime, StateMachine, Timing};
use glanz_core::store::WordStore;
use glanz_types::{AppEvent, FollowUp, UiCommand, View};
use kanal::AsyncReceiver;

use crate::context::AppContext;
use crate::scheduler::FollowUpScheduler;

pub mod dictation;
pub mod import;
pub mod notes;

use dictation::{handle_handwriting, handwriting_recognized};
use import::{abort_import, finish_import, handle_import};
use notes::handle_notes;

/// Everything the event loop owns exclusively
pub struct Session {
    pub store: WordStore,
    pub machine: StateMachine,
    pub scheduler: FollowUpScheduler,
    /// Screen a handwriting recognition was started on
    pub handwriting_for: Option<Lifetime>,
}

impl Session {
    pub fn new(store: WordStore, machine: StateMachine, scheduler: FollowUpScheduler) -> Self {
        Self {
            store,
            machine,
            scheduler,
            handwriting_for: None,
        }
    }

    /// Apply an action, run its effects and redraw
    pub async fn dispatch(&mut self, ctx: &AppContext, action: Action) {
        let before = self.machine.lifetime();
        let effects = self.machine.apply(action, self.store.words());

        if self.machine.lifetime() != before {
            self.scheduler.reset();
        }

        for effect in effects {
            match effect {
                Effect::Speak(text) => ctx.speak(&text).await,
                Effect::Schedule { follow_up, delay } => self.scheduler.schedule(delay, follow_up),
            }
        }

        let view = self.view();
        ctx.render(view).await;
    }

    pub fn view(&self) -> View {
        self.machine.view(self.store.words())
    }
}

enum Flow {
    Continue,
    Quit,
}

fn action_for(command: UiCommand) -> Option<Action> {
    let action = match command {
        UiCommand::StartQuiz => Action::StartQuiz,
        UiCommand::SelectOption(choice) => Action::SelectOption(choice),
        UiCommand::NextWord => Action::NextWord,
        UiCommand::EnterDictation => Action::EnterDictation,
        UiCommand::BackToCard => Action::BackToCard,
        UiCommand::SubmitSpelling(input) => Action::SubmitSpelling(input),
        UiCommand::ToggleHint => Action::ToggleHint,
        UiCommand::Replay => Action::Replay,
        UiCommand::OpenDictation => Action::OpenDictation,
        UiCommand::OpenReview => Action::OpenReview,
        UiCommand::GoHome => Action::GoHome,
        UiCommand::SubmitHandwriting(_)
        | UiCommand::Import(_)
        | UiCommand::UpdateNotes { .. }
        | UiCommand::Quit => return None,
    };
    Some(action)
}

/// App's main loop
pub async fn event_loop(
    ctx: AppContext,
    store: WordStore,
    scheduler: FollowUpScheduler,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
) -> anyhow::Result<()> {
    let timing = {
        let config = ctx.state.config.read().await;
        Timing::from(&config.session)
    };
    let mut session = Session::new(store, StateMachine::new(timing), scheduler);

    tracing::info!("Event loop started with {} words", session.store.len());
    ctx.render(session.view()).await;

    loop {
        let event = ui_to_app_rx.recv().await?;
        tracing::debug!("Event received: {:?}", std::mem::discriminant(&event));

        if let Flow::Quit = handle_events(&ctx, &mut session, event).await? {
            break;
        }
    }

    session.scheduler.reset();
    ctx.shutdown_ui().await;
    tracing::info!("Event loop finished");
    Ok(())
}

async fn handle_events(
    ctx: &AppContext,
    session: &mut Session,
    event: AppEvent,
) -> anyhow::Result<Flow> {
    match event {
        AppEvent::Command(UiCommand::Quit) => return Ok(Flow::Quit),
        AppEvent::Command(UiCommand::Import(source)) => {
            handle_import(ctx, source).await?;
        }
        AppEvent::Command(UiCommand::SubmitHandwriting(path)) => {
            handle_handwriting(ctx, session, path).await?;
        }
        AppEvent::Command(UiCommand::UpdateNotes { position, text }) => {
            handle_notes(ctx, session, position, &text).await?;
        }
        AppEvent::Command(command) => {
            if let Some(action) = action_for(command) {
                session.dispatch(ctx, action).await;
            }
        }
        AppEvent::FollowUp {
            follow_up,
            generation,
        } => {
            if !session.scheduler.is_current(generation) {
                tracing::debug!("Dropping stale {:?}", follow_up);
                return Ok(Flow::Continue);
            }
            match follow_up {
                FollowUp::Speak(text) => ctx.speak(&text).await,
                FollowUp::AdvanceAfterDictation => {
                    session.dispatch(ctx, Action::AdvanceAfterDictation).await;
                }
            }
        }
        AppEvent::ImportFinished { records } => {
            finish_import(ctx, session, records).await?;
        }
        AppEvent::ImportAborted { message } => {
            abort_import(ctx, message).await?;
        }
        AppEvent::HandwritingRecognized { text } => {
            handwriting_recognized(ctx, session, text).await?;
        }
        AppEvent::Render(_) | AppEvent::Notice(_) | AppEvent::Loading { .. } | AppEvent::Shutdown => {
            // UI-only events
        }
    }

    Ok(Flow::Continue)
}
