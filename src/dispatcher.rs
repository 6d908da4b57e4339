use tracing::{info, debug};

use crate::call_validation::{ChatMessage, ChatRole};
use crate::chat_history::{cap_history, load_history, recent_window, save_history};
use crate::custom_error::ScratchError;
use crate::global_context::SharedGlobalContext;
use crate::model_reply::extract_reply_text;
use crate::nicer_logs::first_n_chars;
use crate::postprocessing::pp_code_fences::strip_code_fences;


/// One exchange: history in, model call, history out. Returns the cleaned model text.
///
/// There is no per-session lock. Two requests for the same session both read the
/// old history and the later save wins, the other exchange is lost.
pub async fn generate_for_session(
    gcx: SharedGlobalContext,
    session_id: &str,
    finalized_instruction: String,
) -> Result<String, ScratchError> {
    let (chat_history, inference, generation, model) = {
        let gcx_locked = gcx.read().await;
        (
            gcx_locked.chat_history.clone(),
            gcx_locked.inference.clone(),
            gcx_locked.generation.clone(),
            gcx_locked.cmdline.model.clone(),
        )
    };

    let mut history = load_history(chat_history.as_ref(), session_id).await;
    history.push(ChatMessage::new(ChatRole::User, finalized_instruction));

    let mut messages = vec![ChatMessage::new(ChatRole::System, generation.system_prompt.clone())];
    messages.extend_from_slice(recent_window(&history, generation.history.context_messages));
    debug!("session {:?}: sending {} messages to {}", session_id, messages.len(), model);

    let t0 = std::time::Instant::now();
    let reply = inference.run(&model, &messages, &generation.sampling).await
        .map_err(ScratchError::internal)?;
    let (extracted_by, text) = extract_reply_text(&reply).map_err(ScratchError::internal)?;
    info!("model replied in {}ms, text from {:?}: {}", t0.elapsed().as_millis(), extracted_by, first_n_chars(&text, 80));

    let cleaned = strip_code_fences(&text);
    history.push(ChatMessage::new(ChatRole::Assistant, cleaned.clone()));
    cap_history(&mut history, generation.history.max_persisted);
    save_history(chat_history.as_ref(), session_id, &history).await;
    Ok(cleaned)
}
