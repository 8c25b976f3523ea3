use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// A line of a test set file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestRecord {
    pub word: String,
    #[serde(flatten)]
    pub body: TestBody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TestBody {
    Defined { wiktionary_definitions: Vec<String> },
    Failed { error: String },
}

/// Which list the checked definition was drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NeedleKind {
    AiDefn,
    WikiDefn,
}

impl NeedleKind {
    pub fn key(&self) -> &'static str {
        match self {
            NeedleKind::AiDefn => "ai_defn",
            NeedleKind::WikiDefn => "wiki_defn",
        }
    }
}

/// `false` on the wire when nothing matched, otherwise the index into the
/// opposite list. Index 0 is a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMatch", into = "RawMatch")]
pub enum MatchValue {
    NoMatch,
    Index(usize),
}

impl MatchValue {
    pub fn is_match(&self) -> bool {
        matches!(self, MatchValue::Index(_))
    }

    pub fn index(&self) -> Option<usize> {
        match self {
            MatchValue::Index(i) => Some(*i),
            MatchValue::NoMatch => None,
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawMatch {
    Flag(bool),
    Index(usize),
}

impl TryFrom<RawMatch> for MatchValue {
    type Error = String;

    fn try_from(raw: RawMatch) -> Result<Self, Self::Error> {
        match raw {
            RawMatch::Flag(false) => Ok(MatchValue::NoMatch),
            RawMatch::Flag(true) => Err("match must be false or an index".to_string()),
            RawMatch::Index(i) => Ok(MatchValue::Index(i)),
        }
    }
}

impl From<MatchValue> for RawMatch {
    fn from(value: MatchValue) -> Self {
        match value {
            MatchValue::NoMatch => RawMatch::Flag(false),
            MatchValue::Index(i) => RawMatch::Index(i),
        }
    }
}

/// One matcher verdict: `{word, ai_defn|wiki_defn, match}`.
///
/// `irregular` marks a no-match forced by an unusable model reply, so audits
/// can tell it apart from a clean no-match.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "MatchResultRepr")]
pub struct MatchResult {
    pub word: String,
    pub kind: NeedleKind,
    pub index: usize,
    pub matched: MatchValue,
    pub irregular: bool,
}

impl Serialize for MatchResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.irregular { 4 } else { 3 };
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("word", &self.word)?;
        map.serialize_entry(self.kind.key(), &self.index)?;
        map.serialize_entry("match", &self.matched)?;
        if self.irregular {
            map.serialize_entry("irregular", &true)?;
        }
        map.end()
    }
}

#[derive(Deserialize)]
struct MatchResultRepr {
    word: String,
    #[serde(default)]
    ai_defn: Option<usize>,
    #[serde(default)]
    wiki_defn: Option<usize>,
    #[serde(rename = "match")]
    matched: MatchValue,
    #[serde(default)]
    irregular: bool,
}

impl TryFrom<MatchResultRepr> for MatchResult {
    type Error = String;

    fn try_from(repr: MatchResultRepr) -> Result<Self, Self::Error> {
        let (kind, index) = match (repr.ai_defn, repr.wiki_defn) {
            (Some(i), None) => (NeedleKind::AiDefn, i),
            (None, Some(i)) => (NeedleKind::WikiDefn, i),
            _ => return Err("expected exactly one of ai_defn or wiki_defn".to_string()),
        };

        Ok(MatchResult {
            word: repr.word,
            kind,
            index,
            matched: repr.matched,
            irregular: repr.irregular,
        })
    }
}

/// Human rating of a poetic definition, appended by the review server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TasteScore {
    pub word: String,
    pub ai_defn: usize,
    pub taste_score: i64,
}

/// Any line of a results log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResultsLine {
    Header { test_file: String },
    Taste(TasteScore),
    Match(MatchResult),
}
