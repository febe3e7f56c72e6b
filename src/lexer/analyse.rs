//! Language detection heuristic.
//!
//! Hosts call [`analyse_text`] on text of unknown language and rank
//! candidate lexers by the returned score. Each signature below is
//! searched for anywhere in the text and adds its weight once.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

pub struct Signature {
    pub name: &'static str,
    pub regex: Regex,
    pub weight: f64,
}

impl Signature {
    fn new(name: &'static str, pattern: &str, weight: f64) -> Signature {
        Signature {
            name,
            regex: Regex::new(pattern)
                .unwrap_or_else(|err| panic!("invalid signature {:?}: {}", name, err)),
            weight,
        }
    }
}

lazy_static! {
    pub static ref SIGNATURES: Vec<Signature> = vec![
        Signature::new("using-block", r"\busing\s*\{.*\}", 0.3),
        Signature::new("definition", r":=", 0.2),
        Signature::new("specifier", r"<(?:public|private|override|suspends|decides)>", 0.3),
        Signature::new("concurrency", r"\b(?:spawn|race|sync)\s*[:{]", 0.2),
        Signature::new("class-declaration", r"\bclass\s*\(.*\)\s*:", 0.2),
        // The only signature allowed to span lines.
        Signature::new("block-comment", r"(?s)<#.*#>", 0.1),
    ];
}

/// Scores how likely `text` is Verse source, from 0.0 to 1.0.
pub fn analyse_text(text: &str) -> f64 {
    let score: f64 = SIGNATURES
        .iter()
        .filter(|signature| signature.regex.is_match(text))
        .inspect(|signature| {
            debug!(
                signature = signature.name,
                weight = signature.weight,
                "signature matched"
            )
        })
        .fold(0.0_f64, |score, signature| score + signature.weight);

    score.min(1.0)
}
