use anyhow::Result;
use regex::Regex;

/// Pulls a numeric percentage out of a free-form text field. Concrete
/// extractors are tried in priority order; the first match wins and a
/// text matching no form simply yields no value.
pub trait StatExtractor {
    fn try_extract(&self, text: &str) -> Option<f64>;
}

/// Matches the long form, e.g. "Lv.5 is +12.5% Attack/Defense".
struct AttackDefenseForm(Regex);

impl StatExtractor for AttackDefenseForm {
    fn try_extract(&self, text: &str) -> Option<f64> {
        capture_number(&self.0, text)
    }
}

/// Matches a bare percentage anywhere in the text, e.g. "12.5%".
struct BarePercentForm(Regex);

impl StatExtractor for BarePercentForm {
    fn try_extract(&self, text: &str) -> Option<f64> {
        capture_number(&self.0, text)
    }
}

fn capture_number(pattern: &Regex, text: &str) -> Option<f64> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// The fixed priority list of stat extractors. Built once per run.
pub struct StatParser {
    extractors: Vec<Box<dyn StatExtractor>>,
}

impl StatParser {
    pub fn new() -> Result<Self> {
        Ok(StatParser {
            extractors: vec![
                Box::new(AttackDefenseForm(Regex::new(
                    r"is\s*\+([0-9]+(?:\.[0-9]+)?)%\s*Attack/Defense",
                )?)),
                Box::new(BarePercentForm(Regex::new(r"([0-9]+(?:\.[0-9]+)?)\s*%")?)),
            ],
        })
    }

    pub fn parse_stat(&self, text: &str) -> Option<f64> {
        self.extractors
            .iter()
            .find_map(|extractor| extractor.try_extract(text))
    }
}

/// Levels arrive as text and sometimes carry a decimal point ("12.0").
/// Parse as a float and truncate toward zero, matching the source
/// data's loose formatting. Unparseable text yields no level.
pub fn parse_level(text: &str) -> Option<i64> {
    text.trim().parse::<f64>().ok().map(|value| value as i64)
}
