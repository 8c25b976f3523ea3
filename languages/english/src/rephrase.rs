use lexifree_core::are_texts_similar;
use lexifree_core::prompt::render;
use lexifree_types::DictionaryEntry;

use crate::prompts::REPHRASE;
use crate::session::{Session, is_error_sentinel};

/// Rewrite every definition that reads too much like a reference definition.
///
/// Count and order of definitions never change. Returns how many were
/// rewritten.
pub async fn rephrase_similar(
    session: &mut Session<'_>,
    word: &str,
    entry: &mut DictionaryEntry,
    references: &[String],
) -> usize {
    let mut rewritten = 0;

    for (idx, item) in entry.definitions.iter_mut().enumerate() {
        let Some(reference) = references
            .iter()
            .find(|r| are_texts_similar(r, &item.definition))
        else {
            continue;
        };

        tracing::debug!(
            "definition {} of \"{}\" is close to reference \"{}\"",
            idx,
            word,
            reference
        );

        let prompt = render(REPHRASE, &[("WORD", word), ("DEFN", &item.definition)]);
        let reply = session.ask(&prompt, false).await;
        match clean_rephrasing(&reply) {
            Some(text) => {
                item.definition = text;
                rewritten += 1;
            }
            None => tracing::warn!(
                "could not rephrase definition {} of \"{}\", keeping it",
                idx,
                word
            ),
        }
    }

    rewritten
}

fn clean_rephrasing(reply: &str) -> Option<String> {
    if is_error_sentinel(reply) {
        return None;
    }
    let text = reply.trim().trim_matches('"').trim();
    (!text.is_empty()).then(|| text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rephrasing_is_trimmed_and_unquoted() {
        assert_eq!(
            clean_rephrasing("  \"a furry household pet\"\n"),
            Some("a furry household pet".to_string())
        );
        assert_eq!(clean_rephrasing("An error occurred: 503"), None);
        assert_eq!(clean_rephrasing("  "), None);
    }
}
