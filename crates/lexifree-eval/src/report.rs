//! Scorecards and the static HTML report.

use std::collections::{BTreeMap, BTreeSet};

use lexifree_core::prompt::render;
use lexifree_types::{DefinitionItem, MatchResult, MatchValue, NeedleKind};

use crate::EvalError;
use crate::data::EvalData;
use crate::results::ResultsLog;

const TEMPLATE: &str = include_str!("../templates/report.html");

const TASTE_SCORES: [i64; 5] = [1, 2, 3, 4, 5];

/// Everything shown for one evaluated word.
#[derive(Debug, Clone)]
pub struct WordCard {
    pub word: String,
    pub definitions: Vec<DefinitionItem>,
    pub reference: Vec<String>,
    pub ai_matches: Vec<MatchValue>,
    pub wiki_matches: Vec<MatchValue>,
    /// Needle positions whose verdict came from an unusable reply.
    pub irregular: BTreeSet<(NeedleKind, usize)>,
    /// Latest taste score per AI definition index.
    pub taste: BTreeMap<usize, i64>,
}

#[derive(Debug, Clone)]
pub struct Report {
    pub cards: Vec<WordCard>,
    pub accuracy: f64,
    pub coverage: f64,
    pub version: String,
}

/// Rejoin a results log with its entries and test data.
///
/// Only words present in the results are scored. Missing verdicts count
/// as no-match; the latest verdict for a position wins.
pub fn build_report(results: &ResultsLog, data: &EvalData) -> Result<Report, EvalError> {
    let mut by_word: BTreeMap<&str, Vec<&MatchResult>> = BTreeMap::new();
    for result in &results.matches {
        by_word.entry(result.word.as_str()).or_default().push(result);
    }

    let mut cards = Vec::with_capacity(by_word.len());
    let mut versions: BTreeMap<&str, usize> = BTreeMap::new();

    for (word, word_results) in by_word {
        let (Some(ai), Some(reference)) = (data.ai.get(word), data.reference_definitions(word))
        else {
            return Err(EvalError::UnknownWord(word.to_string()));
        };
        *versions.entry(ai.version.as_str()).or_default() += 1;

        let mut card = WordCard {
            word: word.to_string(),
            definitions: ai.entry.definitions.clone(),
            reference: reference.to_vec(),
            ai_matches: vec![MatchValue::NoMatch; ai.entry.definitions.len()],
            wiki_matches: vec![MatchValue::NoMatch; reference.len()],
            irregular: BTreeSet::new(),
            taste: BTreeMap::new(),
        };

        for result in word_results {
            let slots = match result.kind {
                NeedleKind::AiDefn => &mut card.ai_matches,
                NeedleKind::WikiDefn => &mut card.wiki_matches,
            };
            let Some(slot) = slots.get_mut(result.index) else {
                tracing::warn!(
                    "{} {} of \"{}\" is out of range, skipping",
                    result.kind.key(),
                    result.index,
                    word
                );
                continue;
            };
            *slot = result.matched;
            if result.irregular {
                card.irregular.insert((result.kind, result.index));
            } else {
                card.irregular.remove(&(result.kind, result.index));
            }
        }

        cards.push(card);
    }

    for score in &results.tastes {
        if let Some(card) = cards.iter_mut().find(|c| c.word == score.word) {
            card.taste.insert(score.ai_defn, score.taste_score);
        }
    }

    let (ai_total, ai_hits) = tally(cards.iter().map(|c| c.ai_matches.as_slice()));
    let (wiki_total, wiki_hits) = tally(cards.iter().map(|c| c.wiki_matches.as_slice()));

    Ok(Report {
        accuracy: ratio(ai_hits, ai_total),
        coverage: ratio(wiki_hits, wiki_total),
        version: summarize_versions(&versions),
        cards,
    })
}

fn tally<'a>(lists: impl Iterator<Item = &'a [MatchValue]>) -> (usize, usize) {
    lists.fold((0, 0), |(total, hits), list| {
        (
            total + list.len(),
            hits + list.iter().filter(|m| m.is_match()).count(),
        )
    })
}

fn ratio(hits: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    hits as f64 / total as f64
}

fn summarize_versions(versions: &BTreeMap<&str, usize>) -> String {
    let mut counts: Vec<(&str, usize)> = versions.iter().map(|(v, n)| (*v, *n)).collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));

    match counts.as_slice() {
        [] => "unknown".to_string(),
        [(only, _)] => only.to_string(),
        [(most, n), ..] => {
            tracing::warn!("multiple entry versions in this data: {:?}", counts);
            format!("(mixed, ~{most} x{n})")
        }
    }
}

/// Map `value` in [0, 1] to a dark red → yellow → green hex colour.
pub fn red_to_green(value: f64) -> String {
    let hue = value.clamp(0.0, 1.0) * 100.0;
    let sat = 1.0;
    let val = 0.7;

    let c = sat * val;
    let x = c * (1.0 - ((hue / 60.0) % 2.0 - 1.0).abs());
    let m = val - c;
    let (r, g, b) = if hue < 60.0 { (c, x, 0.0) } else { (x, c, 0.0) };

    let channel = |v: f64| ((v + m) * 255.0) as u8;
    format!("#{:02x}{:02x}{:02x}", channel(r), channel(g), channel(b))
}

pub fn render_html(report: &Report) -> String {
    let mut parts = vec![top_results(report)];
    parts.extend(report.cards.iter().map(word_table));
    let body = parts.join("\n\n");

    render(
        TEMPLATE,
        &[("VERSION", &escape(&report.version)), ("BODY", &body)],
    )
}

fn top_results(report: &Report) -> String {
    let block = |label: &str, value: f64| {
        format!(
            r#"<div class="top-result">{label}
    <div style="background-color: {}" class="result-num">{:5.2}%</div></div>"#,
            red_to_green(value),
            value * 100.0
        )
    };
    format!(
        r#"<div class="centered top-results">{}{}</div>"#,
        block("Accuracy", report.accuracy),
        block("Coverage", report.coverage)
    )
}

struct Grid {
    parts: Vec<String>,
}

impl Grid {
    fn item(&mut self, body: &str, class: &str, style: &str) {
        let class = if class.is_empty() {
            "grid-item".to_string()
        } else {
            format!("grid-item {class}")
        };
        self.parts
            .push(format!(r#"<div class="{class}" style="{style}">{body}</div>"#));
    }
}

fn word_table(card: &WordCard) -> String {
    let word = escape(&card.word);
    let mut grid = Grid { parts: Vec::new() };
    grid.parts.push(r#"<div class="table-holder"><div class="table-left">"#.to_string());
    grid.parts.push(format!(
        r#"<div class="grid-container" style="grid-template-rows: repeat({}, auto)">"#,
        2 * card.definitions.len() + 2
    ));

    grid.item(&word, "word", "");
    grid.item("AI Definitions", "subheader", "");
    for (i, item) in card.definitions.iter().enumerate() {
        grid.item("", "hrule", &format!("grid-row:{}", 2 * i + 3));
        grid.item(&format!("<b>ai{}.</b> {}", i + 1, escape(&item.definition)), "", "");
    }

    grid.item("Flavor Text", "header", "");
    grid.item("Flavor Score", "subheader", "");
    for (i, item) in card.definitions.iter().enumerate() {
        let poetic = item
            .poetic_definition
            .as_deref()
            .map(escape)
            .unwrap_or_else(|| "&lt;none&gt;".to_string());
        let current = card.taste.get(&i).map(i64::to_string).unwrap_or_default();
        let buttons: String = TASTE_SCORES
            .iter()
            .map(|s| format!(r#"<button value="{s}">{s}</button>"#))
            .collect();
        grid.item(
            &format!(
                r#"<div class="taste_score" data-word="{word}" data-defn="{i}">{buttons}<span class="current">{current}</span></div>
{poetic}"#
            ),
            "",
            "",
        );
    }

    grid.item("Accuracy", "header", "");
    grid.item("Matches wiki defn?", "subheader", "");
    for (i, matched) in card.ai_matches.iter().enumerate() {
        let mut text = verdict_badge(*matched, "");
        if let Some(j) = matched.index() {
            if let Some(defn) = card.reference.get(j) {
                text.push_str(&format!(" matches:<br> <b>wiki{}.</b> {}", j + 1, escape(defn)));
            }
        }
        if card.irregular.contains(&(NeedleKind::AiDefn, i)) {
            text.push_str(r#"<div class="irregular">(unusable matcher reply)</div>"#);
        }
        grid.item(&text, "", "");
    }

    grid.parts.push("</div>".to_string());
    grid.parts.push("</div>".to_string());

    grid.parts.push(r#"<div class="table-right">"#.to_string());
    grid.parts.push(format!(
        r#"<div class="grid-container" style="grid-template-rows: repeat({}, auto);grid-template-columns: 1fr;">"#,
        2 * card.reference.len() + 2
    ));

    grid.item("Wiktionary Coverage", "header", "");
    grid.item("Wiki defn is covered by an AI defn?", "subheader", "");
    for (i, defn) in card.reference.iter().enumerate() {
        let matched = card.wiki_matches.get(i).copied().unwrap_or(MatchValue::NoMatch);
        let mut text = format!("<br>{}", verdict_badge(matched, " wiki_match"));
        if let Some(j) = matched.index() {
            if let Some(item) = card.definitions.get(j) {
                text.push_str(&format!(
                    " matches:<br> <b>ai{}.</b> {}",
                    j + 1,
                    escape(&item.definition)
                ));
            }
        }
        if card.irregular.contains(&(NeedleKind::WikiDefn, i)) {
            text.push_str(r#"<div class="irregular">(unusable matcher reply)</div>"#);
        }
        grid.item("", "hrule", &format!("grid-row:{}", 2 * i + 3));
        grid.item(&format!("<b>wiki{}.</b> {}{}", i + 1, escape(defn), text), "", "");
    }

    grid.parts.push("</div>".to_string());
    grid.parts.push("</div>".to_string());
    grid.parts.push("</div>".to_string());

    grid.parts.join("\n")
}

fn verdict_badge(matched: MatchValue, extra_class: &str) -> String {
    let text = if matched.is_match() { "yes" } else { "no" };
    format!(r#"<div class="match_{text}{extra_class}">{text}</div>"#)
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
