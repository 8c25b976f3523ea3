use std::fs;
use std::path::Path;

use anyhow::Context;
use lexifree_config::Config;
use serde_json::Value;

/// Environment config, with any keys of the JSON file at `path` on top.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = Config::new();
    let Some(path) = path else {
        return Ok(config);
    };

    tracing::info!("Loading config overrides from {}", path.display());
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    let overrides: Value = serde_json::from_str(&data)
        .with_context(|| format!("parsing config file {}", path.display()))?;

    let mut merged = serde_json::to_value(&config)?;
    merge_json(&mut merged, overrides);
    Ok(serde_json::from_value(merged)?)
}

fn merge_json(base: &mut Value, overrides: Value) {
    match (base, overrides) {
        (Value::Object(base), Value::Object(overrides)) => {
            for (key, value) in overrides {
                merge_json(base.entry(key).or_insert(Value::Null), value);
            }
        }
        (base, overrides) => *base = overrides,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_overrides_only_touch_named_keys() {
        let mut base = json!({"llm": {"model": "gpt-4o", "max_retries": 2}, "eval": {"workers": 20}});
        merge_json(&mut base, json!({"llm": {"model": "gpt-4o-mini"}}));

        assert_eq!(base["llm"]["model"], "gpt-4o-mini");
        assert_eq!(base["llm"]["max_retries"], 2);
        assert_eq!(base["eval"]["workers"], 20);
    }

    #[test]
    fn test_config_file_is_layered_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"batch": {"workers": 3}, "storage": {"entries_path": "x.json"}}"#).unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.batch.workers, 3);
        assert_eq!(config.storage.entries_path, "x.json");
        assert_eq!(config.eval.max_words, 100);
    }
}
