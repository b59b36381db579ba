use glanz_types::Notice;

use crate::context::AppContext;
use crate::events::Session;

/// `position` is 1-based, as shown in the library list
pub async fn handle_notes(
    ctx: &AppContext,
    session: &mut Session,
    position: usize,
    text: &str,
) -> anyhow::Result<()> {
    let id = position
        .checked_sub(1)
        .and_then(|index| session.store.get(index))
        .map(|word| word.id.clone());

    let Some(id) = id else {
        ctx.notify(Notice::Warning(format!("There is no word number {}", position)))
            .await;
        return Ok(());
    };

    if session.store.update_notes(&id, text) {
        let view = session.view();
        ctx.render(view).await;
        let message = if text.trim().is_empty() { "Note cleared" } else { "Note saved" };
        ctx.notify(Notice::Info(message.to_string())).await;
    }

    Ok(())
}
