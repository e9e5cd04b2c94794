use std::fmt;
use tracing::{debug, info};

/// Anything that maps text to a polarity in [-1.0, 1.0].
pub trait SentimentScorer {
    fn score(&self, text: &str) -> f64;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Strictly above zero is positive, strictly below is negative. No band
    /// around zero.
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > 0.0 {
            SentimentLabel::Positive
        } else if polarity < 0.0 {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SentimentLabel::Positive => write!(f, "Positive"),
            SentimentLabel::Negative => write!(f, "Negative"),
            SentimentLabel::Neutral => write!(f, "Neutral"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SentimentResult {
    pub label: SentimentLabel,
    pub polarity: f64,
    pub headline: String,
}

impl fmt::Display for SentimentResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} (Polarity: {:.2})",
            self.label, self.headline, self.polarity
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SentimentSummary {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl SentimentSummary {
    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }

    /// (positive, negative, neutral) as percentages. An empty batch divides
    /// by 1, so every share is 0.0.
    pub fn percentages(&self) -> (f64, f64, f64) {
        let total = self.total().max(1) as f64;
        (
            self.positive as f64 / total * 100.0,
            self.negative as f64 / total * 100.0,
            self.neutral as f64 / total * 100.0,
        )
    }

    fn record(&mut self, label: SentimentLabel) {
        match label {
            SentimentLabel::Positive => self.positive += 1,
            SentimentLabel::Negative => self.negative += 1,
            SentimentLabel::Neutral => self.neutral += 1,
        }
    }
}

impl fmt::Display for SentimentSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (pos, neg, neu) = self.percentages();
        write!(
            f,
            "Sentiment Summary: {:.1}% Positive, {:.1}% Negative, {:.1}% Neutral",
            pos, neg, neu
        )
    }
}

#[derive(Debug, Clone)]
pub struct Analysis {
    pub results: Vec<SentimentResult>,
    pub summary: SentimentSummary,
}

impl Analysis {
    /// One annotated line per headline, in input order.
    pub fn lines(&self) -> Vec<String> {
        self.results.iter().map(|r| r.to_string()).collect()
    }
}

/// Keep scorer output inside the polarity range. NaN becomes 0.0 and
/// negative zero is folded into zero so it never prints as "-0.00".
fn normalize_polarity(raw: f64) -> f64 {
    if raw.is_nan() {
        return 0.0;
    }
    let clamped = raw.clamp(-1.0, 1.0);
    if clamped == 0.0 {
        0.0
    } else {
        clamped
    }
}

pub fn classify<S: SentimentScorer + ?Sized>(scorer: &S, headline: &str) -> SentimentResult {
    let polarity = normalize_polarity(scorer.score(headline));
    SentimentResult {
        label: SentimentLabel::from_polarity(polarity),
        polarity,
        headline: headline.to_string(),
    }
}

pub fn analyze<S: SentimentScorer + ?Sized>(scorer: &S, headlines: &[String]) -> Analysis {
    let mut summary = SentimentSummary::default();
    let results: Vec<SentimentResult> = headlines
        .iter()
        .map(|h| {
            let result = classify(scorer, h);
            debug!("{}", result);
            summary.record(result.label);
            result
        })
        .collect();

    info!(
        "Sentiment analysis: {} headlines -> {} positive, {} negative, {} neutral",
        summary.total(),
        summary.positive,
        summary.negative,
        summary.neutral,
    );

    Analysis { results, summary }
}
