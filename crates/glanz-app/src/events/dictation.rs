use std::path::PathBuf;

use glanz_core::machine::Action;
use glanz_enricher::EnrichError;
use glanz_io::read_photo;
use glanz_types::{AppEvent, Notice, Screen};

use crate::context::AppContext;
use crate::events::Session;

/// Send a photo of handwriting off for recognition
pub async fn handle_handwriting(
    ctx: &AppContext,
    session: &mut Session,
    path: PathBuf,
) -> anyhow::Result<()> {
    if session.machine.screen() != Screen::Dictation || session.machine.dictation().is_solved() {
        tracing::debug!("Handwriting ignored outside an open dictation");
        return Ok(());
    }

    if !ctx.services.enricher.is_configured() {
        ctx.notify(Notice::Error(EnrichError::MissingCredentials.to_string()))
            .await;
        return Ok(());
    }

    if session.handwriting_for.is_some() {
        ctx.notify(Notice::Info("Still reading the previous handwriting".to_string()))
            .await;
        return Ok(());
    }

    let image = match read_photo(&path).await {
        Ok(image) => image,
        Err(e) => {
            ctx.notify(Notice::Warning(e.to_string())).await;
            return Ok(());
        }
    };

    session.handwriting_for = Some(session.machine.lifetime());
    ctx.loading("Reading handwriting...", true).await;

    let ctx = ctx.clone();
    tokio::spawn(async move {
        let text = match ctx.services.enricher.recognize_handwriting(&image).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Handwriting recognition failed: {}", e);
                String::new()
            }
        };
        ctx.loopback(AppEvent::HandwritingRecognized { text }).await;
    });

    Ok(())
}

/// Recognized text counts as a typed submission for the word it was written for
pub async fn handwriting_recognized(
    ctx: &AppContext,
    session: &mut Session,
    text: String,
) -> anyhow::Result<()> {
    let started_on = session.handwriting_for.take();
    ctx.loading("", false).await;

    if started_on != Some(session.machine.lifetime()) {
        tracing::debug!("Dropping handwriting for a screen that is gone");
        return Ok(());
    }

    if text.trim().is_empty() {
        ctx.notify(Notice::Warning(
            "Could not read the handwriting, try again".to_string(),
        ))
        .await;
        return Ok(());
    }

    tracing::info!("Handwriting read as '{}'", text);
    session.dispatch(ctx, Action::SubmitSpelling(text)).await;
    Ok(())
}
