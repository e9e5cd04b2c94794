//! Rule-based polarity scoring for sports headlines.
//!
//! Each known word carries a polarity in [-1, 1]. A negation word in front of
//! a sentiment word flips it and halves it, an intensifier scales it. The
//! headline's polarity is the mean over matched words, 0.0 when nothing matches.

use anyhow::{Context, Result};
use regex::Regex;
use std::collections::{HashMap, HashSet};

use crate::sentiment::SentimentScorer;

const TOKEN_PATTERN: &str = r"[a-z]+(?:'[a-z]+)?";

const NEGATION_FACTOR: f64 = -0.5;

const POSITIVE_WORDS: &[(&str, f64)] = &[
    ("win", 0.6),
    ("wins", 0.6),
    ("won", 0.6),
    ("winning", 0.5),
    ("victory", 0.7),
    ("triumph", 0.8),
    ("champion", 0.6),
    ("beat", 0.4),
    ("beats", 0.4),
    ("thrash", 0.5),
    ("thrashes", 0.5),
    ("clinch", 0.5),
    ("clinches", 0.5),
    ("secure", 0.4),
    ("secures", 0.4),
    ("comeback", 0.5),
    ("unbeaten", 0.5),
    ("promoted", 0.4),
    ("dominant", 0.6),
    ("dominate", 0.5),
    ("brilliant", 0.9),
    ("superb", 0.9),
    ("great", 0.8),
    ("good", 0.7),
    ("best", 1.0),
    ("perfect", 1.0),
    ("impressive", 1.0),
    ("stunning", 0.6),
    ("strong", 0.43),
    ("boost", 0.5),
    ("boosts", 0.5),
    ("hero", 0.6),
    ("glory", 0.7),
    ("historic", 0.3),
    ("record", 0.3),
    ("masterclass", 0.8),
    ("happy", 0.8),
    ("delight", 0.8),
    ("delighted", 0.7),
    ("celebrate", 0.6),
    ("celebrates", 0.6),
    ("love", 0.5),
];

const NEGATIVE_WORDS: &[(&str, f64)] = &[
    ("lose", -0.5),
    ("loses", -0.5),
    ("lost", -0.4),
    ("loss", -0.5),
    ("defeat", -0.6),
    ("defeated", -0.5),
    ("injured", -0.6),
    ("injury", -0.5),
    ("injuries", -0.5),
    ("concern", -0.4),
    ("concerns", -0.4),
    ("crisis", -0.7),
    ("sack", -0.5),
    ("sacked", -0.6),
    ("relegated", -0.6),
    ("relegation", -0.5),
    ("ban", -0.5),
    ("banned", -0.6),
    ("suspended", -0.5),
    ("suspension", -0.5),
    ("fined", -0.4),
    ("blow", -0.4),
    ("setback", -0.5),
    ("slump", -0.5),
    ("collapse", -0.6),
    ("struggle", -0.4),
    ("struggles", -0.4),
    ("fail", -0.5),
    ("fails", -0.5),
    ("failure", -0.6),
    ("miss", -0.3),
    ("misses", -0.3),
    ("blunder", -0.6),
    ("error", -0.4),
    ("poor", -0.4),
    ("bad", -0.7),
    ("worst", -1.0),
    ("awful", -1.0),
    ("terrible", -1.0),
    ("disappointing", -0.6),
    ("disappointed", -0.6),
    ("humiliating", -0.8),
    ("humiliation", -0.8),
    ("controversy", -0.5),
    ("controversial", -0.4),
    ("fury", -0.6),
    ("furious", -0.7),
    ("angry", -0.5),
    ("abuse", -0.7),
    ("racism", -0.8),
    ("racist", -0.8),
    ("arrested", -0.6),
    ("tragic", -0.9),
    ("death", -0.8),
    ("died", -0.8),
    ("dies", -0.8),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "neither", "nor", "without", "hardly", "barely", "cannot", "can't",
    "won't", "don't", "doesn't", "didn't", "isn't", "aren't", "wasn't", "weren't",
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.3),
    ("extremely", 1.5),
    ("incredibly", 1.5),
    ("hugely", 1.4),
    ("slightly", 0.5),
    ("somewhat", 0.7),
];

pub struct LexiconScorer {
    tokenizer: Regex,
    words: HashMap<&'static str, f64>,
    negations: HashSet<&'static str>,
    intensifiers: HashMap<&'static str, f64>,
}

impl LexiconScorer {
    pub fn new() -> Result<Self> {
        let tokenizer = Regex::new(TOKEN_PATTERN).context("Failed to compile tokenizer")?;

        Ok(LexiconScorer {
            tokenizer,
            words: POSITIVE_WORDS
                .iter()
                .chain(NEGATIVE_WORDS.iter())
                .copied()
                .collect(),
            negations: NEGATIONS.iter().copied().collect(),
            intensifiers: INTENSIFIERS.iter().copied().collect(),
        })
    }

    pub fn word_score(&self, word: &str) -> Option<f64> {
        self.words.get(word.to_lowercase().as_str()).copied()
    }

    pub fn polarity(&self, text: &str) -> f64 {
        let lowered = text.to_lowercase().replace('\u{2019}', "'");
        let mut scores: Vec<f64> = Vec::new();
        let mut negate_next = false;
        let mut intensifier = 1.0;

        for token in self.tokenizer.find_iter(&lowered) {
            let word = token.as_str();

            if self.negations.contains(word) {
                negate_next = true;
                continue;
            }

            if let Some(&mult) = self.intensifiers.get(word) {
                intensifier = mult;
                continue;
            }

            if let Some(&base) = self.words.get(word) {
                let mut score = base * intensifier;
                if negate_next {
                    score *= NEGATION_FACTOR;
                }
                scores.push(score);
            }

            negate_next = false;
            intensifier = 1.0;
        }

        if scores.is_empty() {
            return 0.0;
        }
        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        mean.clamp(-1.0, 1.0)
    }
}

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> f64 {
        self.polarity(text)
    }
}
