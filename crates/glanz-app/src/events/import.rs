use std::sync::atomic::Ordering;

use glanz_core::machine::Action;
use glanz_enricher::EnrichError;
use glanz_io::{read_document, read_photo};
use glanz_lang_german::split_manual_input;
use glanz_types::{AppEvent, ImportSource, Notice, WordRecord};

use crate::context::AppContext;
use crate::events::Session;

/// Start an import in the background; the result comes back as an event
pub async fn handle_import(ctx: &AppContext, source: ImportSource) -> anyhow::Result<()> {
    if let ImportSource::Manual(text) = &source
        && split_manual_input(text).is_empty()
    {
        tracing::debug!("Empty manual input ignored");
        return Ok(());
    }

    if !ctx.services.enricher.is_configured() {
        ctx.notify(Notice::Error(EnrichError::MissingCredentials.to_string()))
            .await;
        return Ok(());
    }

    if ctx.state.import_running.swap(true, Ordering::SeqCst) {
        ctx.notify(Notice::Warning("An import is already running".to_string()))
            .await;
        return Ok(());
    }

    ctx.loading("Looking for words...", true).await;

    let ctx = ctx.clone();
    tokio::spawn(async move {
        let event = match run_import(&ctx, source).await {
            Ok(records) => AppEvent::ImportFinished { records },
            Err(message) => AppEvent::ImportAborted { message },
        };
        ctx.loopback(event).await;
    });

    Ok(())
}

async fn collect_candidates(ctx: &AppContext, source: ImportSource) -> Result<Vec<String>, String> {
    let enricher = &ctx.services.enricher;

    match source {
        ImportSource::Manual(text) => Ok(split_manual_input(&text)),
        ImportSource::Photo(path) => {
            let image = read_photo(&path).await.map_err(|e| e.to_string())?;
            enricher
                .extract_from_image(&image)
                .await
                .map_err(|e| e.to_string())
        }
        ImportSource::Document(path) => {
            let document = read_document(&path).await.map_err(|e| e.to_string())?;
            enricher
                .extract_from_document(&document)
                .await
                .map_err(|e| e.to_string())
        }
    }
}

async fn run_import(ctx: &AppContext, source: ImportSource) -> Result<Vec<WordRecord>, String> {
    let candidates = collect_candidates(ctx, source).await?;
    if candidates.is_empty() {
        return Err("No German words found".to_string());
    }

    tracing::info!("Import found {} candidates", candidates.len());
    ctx.loading(format!("Enriching {} words...", candidates.len()), true)
        .await;

    Ok(ctx.services.queue.process(&candidates).await)
}

pub async fn finish_import(
    ctx: &AppContext,
    session: &mut Session,
    records: Vec<WordRecord>,
) -> anyhow::Result<()> {
    ctx.state.import_running.store(false, Ordering::SeqCst);

    let added = session.store.append_batch(records);
    tracing::info!("Imported {} words", added);

    ctx.loading("", false).await;
    session.dispatch(ctx, Action::ImportCompleted).await;
    ctx.notify(Notice::Info(format!("Added {} words", added)))
        .await;

    Ok(())
}

pub async fn abort_import(ctx: &AppContext, message: String) -> anyhow::Result<()> {
    ctx.state.import_running.store(false, Ordering::SeqCst);
    tracing::warn!("Import aborted: {}", message);

    ctx.loading("", false).await;
    ctx.notify(Notice::Warning(message)).await;

    Ok(())
}
