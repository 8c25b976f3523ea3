use lexifree_core::prompt::render;

use crate::prompts::ENGLISH_CHECK;
use crate::session::{Session, is_error_sentinel};

/// Yes/no classification of `word` as an English word.
///
/// Anything containing "yes" counts as yes, so an error sentinel is a no.
pub async fn is_english_word(session: &mut Session<'_>, word: &str) -> bool {
    let prompt = render(ENGLISH_CHECK, &[("WORD", word)]);
    let reply = session.ask(&prompt, false).await;
    if is_error_sentinel(&reply) {
        tracing::warn!(
            "English check for \"{}\" failed, recording it as not English: {}",
            word,
            reply
        );
        return false;
    }
    reply_is_yes(&reply)
}

fn reply_is_yes(reply: &str) -> bool {
    reply.to_lowercase().contains("yes")
}
