//! Prompt templates. Any wording change here changes what the builder
//! produces, so it goes with a bump of [`VERSION`].
//!
//! Use a.b for tagged releases and a.b.c while a change is in progress.

pub const VERSION: &str = "0.2";

pub const ENGLISH_CHECK: &str =
    "Is \"$WORD$\" a word in English language? Answer with only a yes or a no.";

pub const DERIVED_CHECK: &str = r#"
Is "$WORD$" a word that is a direct conjugation of another word?
For example, it may be a plural, a gerund, or a past tense version
of a root word. Please reply with a JSON object like {"is_derived",
"root_word"}; the "root_word" key is optional; omit it if the word "$WORD$" is
not directly derived (such as a plural or past tense, etc). For borderline cases
like "educational" please say the word is not derived.
"#;

pub const DICTIONARY_ENTRY: &str = r#"
Please provide a dictionary entry for the word "$WORD$" in JSON format.
It should include each of these JSON keys:
* word
* pronunciation
* definitions - the value here is a list of objects with keys
  "part_of_speech", "definition", and "example"
* origin
* synonyms
* antonyms
The JSON string may include unicode characters, which is useful for the
pronunciation key. Please produce only a JSON string with no decorations or
other text.
"#;

pub const REPHRASE: &str = r#"
Below is a definition for the word "$WORD$":

$DEFN$

Can you please rephrase this definition, keeping the meaning the same? My only
goal is to avoid a copyright violation because this phrasing is too similar to
someone else's definition. Keep the meaning the same, but significantly alter
the wording. Reply with only the new definition and nothing else.
"#;

pub const POETIC: &str = r#"
$DEFN$
The above is a json list of base definitions for the word "$WORD$".
Please add a new key "is_poetic" for each definition entry.
Do not add new base definitions, or delete any. Do not edit the base
definitions at all. Instead, only add entries per base definition.
At first, only add the key "is_poetic" with a
true/false value to indicate if this is poetry-worthy definition. Boring
ideas or concepts are not poetic. Especially interesting words or ideas are.

If a base definition is_poetic, then also add a new key "poetic_definition"
for each definition entry.
Aim to write each new poetic definition in the style of a good journalist
with personality. Concise like Strunk and White, and interesting.
Aim for a definition
that is not too long but also almost inspiring and fun in its expression.
Each poetic definition should be short. Do not use flowery language.
Minimize adverbs and adjectives. Only use one clause, not multiple clauses.
Metaphors are fine; no similes.

Don't repeat the word in the poetic definition. Avoid repetition. Try to
use at most one adjective. These words are not allowed (DO NOT USE THEM)
at all in the poetic
definition: tarry, dance, cosmic, whisper, symphony, tapestry, weave,
embrace, secret, soul, eternal. Do not use any words derived from the banned
words. They are too cliched. Let's be more sophisticated.
Do not be grandiose. You don't need to use big words. Keep it simple
yet not plain. Not flowery, not like a beginner's poem. Simply creative,
fascinating, unusual, with personality.

Aim for natural, direct, and precise language. Almost no adjectives.

Even though it may not be a complete sentence, begin the poetic definition
with a capital letter, and end it with a final punctuation (like a sentence).

Here are some good poetic definitions:

"eon:" time beyond reckoning (very short yet meaningful and a nod to an
    emotion)
"autumn:" the wind blows, a leaf falls (haiku-ish, no simile)
"cat:" furry knaves of pomp and flounce (humorous use of slightly formal
    terms, funny bc they are at odds with the cute and accessible nature of
    the subject)

Here are some bad poetic definitions:

DON'T DO THIS "storm:" The sky unfurled its dark wings, a somber dance of
    shadows and eternal whispers. (bad: flowery, florid, too long, a full
    sentence, multiple clauses)

Please reply only with a JSON list, one object per base definition and in
the same order, no other text.
"#;
