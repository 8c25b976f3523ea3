use lexifree_core::prompt::render;
use lexifree_core::reply::parse_list;
use lexifree_types::DictionaryEntry;
use serde_json::Value;

use crate::prompts::POETIC;
use crate::session::Session;

/// The poetic reply was not a JSON list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotAList;

/// Ask for poetic variants and merge them into `entry` by position.
///
/// Base definitions are never added, removed or reordered; only
/// `poetic_definition` is set. Returns how many definitions got one.
pub async fn add_poetic_definitions(
    session: &mut Session<'_>,
    entry: &mut DictionaryEntry,
) -> Result<usize, NotAList> {
    let definitions = serde_json::to_string(&entry.definitions).unwrap_or_default();
    let prompt = render(POETIC, &[("WORD", &entry.word), ("DEFN", &definitions)]);
    let reply = session.ask(&prompt, false).await;

    let items = parse_list(&reply).ok_or(NotAList)?;
    if items.len() != entry.definitions.len() {
        tracing::warn!(
            "poetic reply for \"{}\" has {} items for {} definitions",
            entry.word,
            items.len(),
            entry.definitions.len()
        );
    }

    Ok(merge(entry, &items))
}

fn merge(entry: &mut DictionaryEntry, items: &[Value]) -> usize {
    let mut added = 0;
    for (item, poetic) in entry.definitions.iter_mut().zip(items) {
        if matches!(poetic.get("is_poetic"), Some(Value::Bool(false))) {
            continue;
        }
        if let Some(Value::String(text)) = poetic.get("poetic_definition") {
            let text = text.trim();
            if !text.is_empty() {
                item.poetic_definition = Some(text.to_string());
                added += 1;
            }
        }
    }
    added
}
