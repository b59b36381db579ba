use std::sync::Arc;

use glanz_core::store::WordStore;
use glanz_types::AppEvent;
use kanal::{AsyncReceiver, AsyncSender};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::context::{AppContext, Services};
use crate::events::event_loop;
use crate::scheduler::FollowUpScheduler;
use crate::state::AppState;
use crate::ui::ui_loop;

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            app_to_ui: kanal::bounded_async(64),
            // Commands plus follow-ups and background task results
            ui_to_app: kanal::bounded_async(128),
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn spawn_tasks(&self, services: Services, store: WordStore) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        let ctx = AppContext::new(
            self.state.clone(),
            self.channels.app_to_ui.0.clone(),
            self.channels.ui_to_app.0.clone(),
            services,
        );
        let scheduler = FollowUpScheduler::new(
            self.channels.ui_to_app.0.clone(),
            self.cancel_token.child_token(),
        );

        // Event loop
        tasks.spawn(event_loop(
            ctx,
            store,
            scheduler,
            self.channels.ui_to_app.1.clone(),
        ));

        // UI loop
        tasks.spawn(ui_loop(
            self.channels.app_to_ui.1.clone(),
            self.channels.ui_to_app.0.clone(),
            self.state.config.clone(),
        ));

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
        let _ = self.channels.app_to_ui.0.close();
        let _ = self.channels.ui_to_app.0.close();
    }
}
