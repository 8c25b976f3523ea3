use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor {
    // Default word-list cleanup
    fn process(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        // Unicode normalization (NFC) keeps case and accents as typed
        text.nfc().collect::<String>().replace(['\n', '\r'], "")
    }
}

pub struct WordPreprocessor;
impl Preprocessor for WordPreprocessor {}

/// Clean a raw word list, dropping blank lines.
pub fn prepare_words<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .map(|line| WordPreprocessor.process(line.as_ref()))
        .filter(|word| !word.is_empty())
        .collect()
}
