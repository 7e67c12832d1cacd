use std::fmt;

use crate::{Scalar, ScalarKind, TagError};

/// A numeric rule parameter, kept together with its source text.
#[derive(Debug, Clone, PartialEq)]
pub struct Limit {
    raw: String,
    value: f64,
}

impl Limit {
    fn parse(tag: &str, rule: &str, raw: &str) -> Result<Self, TagError> {
        let value = raw
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| {
                TagError::new(tag, format!("rule '{}' expects a number, got '{}'", rule, raw))
            })?;

        Ok(Self {
            raw: raw.to_string(),
            value,
        })
    }

    /// The parameter as written in the tag.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The parsed parameter.
    pub fn value(&self) -> f64 {
        self.value
    }
}

/// One rule from a validation tag.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// Value must be present and non-zero
    Required,
    /// Skip the remaining rules when the value is absent or zero
    OmitEmpty,
    /// Length or value must not exceed the limit
    Max(Limit),
    /// Length or value must be at least the limit
    Min(Limit),
    /// Length or value must equal the limit
    Len(Limit),
}

impl Rule {
    /// Name of the rule as written in tags.
    pub fn tag(&self) -> &'static str {
        match self {
            Rule::Required => "required",
            Rule::OmitEmpty => "omitempty",
            Rule::Max(_) => "max",
            Rule::Min(_) => "min",
            Rule::Len(_) => "len",
        }
    }

    /// The rule's parameter, if it takes one.
    pub fn param(&self) -> Option<&str> {
        match self {
            Rule::Max(l) | Rule::Min(l) | Rule::Len(l) => Some(l.raw()),
            Rule::Required | Rule::OmitEmpty => None,
        }
    }

    /// Checks a present value against this rule.
    ///
    /// `OmitEmpty` always passes here; the engine handles it before calling.
    /// Returns `Err(kind)` when the rule cannot measure values of that kind.
    pub fn check(&self, value: &Scalar) -> Result<bool, ScalarKind> {
        match self {
            Rule::Required => Ok(!value.is_zero()),
            Rule::OmitEmpty => Ok(true),
            Rule::Max(l) => Ok(magnitude(value)? <= l.value),
            Rule::Min(l) => Ok(magnitude(value)? >= l.value),
            Rule::Len(l) => Ok(magnitude(value)? == l.value),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.param() {
            Some(param) => write!(f, "{}={}", self.tag(), param),
            None => write!(f, "{}", self.tag()),
        }
    }
}

// Text is measured in characters, bytes in bytes, numbers by value.
fn magnitude(value: &Scalar) -> Result<f64, ScalarKind> {
    match value {
        Scalar::Text(s) => Ok(s.chars().count() as f64),
        Scalar::Bytes(b) => Ok(b.len() as f64),
        Scalar::Int(n) => Ok(*n as f64),
        Scalar::Float(x) => Ok(*x),
        Scalar::Bool(_) | Scalar::Time(_) => Err(value.kind()),
    }
}

/// Parses a comma-separated validation tag such as `omitempty,max=1`.
///
/// An empty tag yields no rules.
///
/// # Errors
///
/// Returns [`TagError`] for unknown rules, missing or non-numeric
/// parameters, parameters on rules that take none, and empty segments.
///
/// # Examples
///
/// ```
/// use valuer_validate::engine::{parse_tag, Rule};
///
/// let rules = parse_tag("omitempty,max=1").unwrap();
/// assert_eq!(rules.len(), 2);
/// assert_eq!(rules[0], Rule::OmitEmpty);
/// assert_eq!(rules[1].to_string(), "max=1");
/// ```
pub fn parse_tag(tag: &str) -> Result<Vec<Rule>, TagError> {
    if tag.trim().is_empty() {
        return Ok(Vec::new());
    }

    tag.split(',')
        .map(|segment| parse_rule(tag, segment.trim()))
        .collect()
}

fn parse_rule(tag: &str, segment: &str) -> Result<Rule, TagError> {
    let (name, param) = match segment.split_once('=') {
        Some((name, param)) => (name.trim(), Some(param.trim())),
        None => (segment, None),
    };

    match (name, param) {
        ("", _) => Err(TagError::new(tag, "empty rule")),
        ("required", None) => Ok(Rule::Required),
        ("omitempty", None) => Ok(Rule::OmitEmpty),
        ("required" | "omitempty", Some(_)) => Err(TagError::new(
            tag,
            format!("rule '{}' takes no parameter", name),
        )),
        ("max", Some(raw)) => Ok(Rule::Max(Limit::parse(tag, name, raw)?)),
        ("min", Some(raw)) => Ok(Rule::Min(Limit::parse(tag, name, raw)?)),
        ("len", Some(raw)) => Ok(Rule::Len(Limit::parse(tag, name, raw)?)),
        ("max" | "min" | "len", None) => Err(TagError::new(
            tag,
            format!("rule '{}' requires a parameter", name),
        )),
        (other, _) => Err(TagError::new(tag, format!("unknown rule '{}'", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tag_has_no_rules() {
        assert_eq!(parse_tag(""), Ok(Vec::new()));
        assert_eq!(parse_tag("   "), Ok(Vec::new()));
    }

    #[test]
    fn parses_rules_in_order() {
        let rules = parse_tag("required, min=2 ,max=10").unwrap();
        let tags: Vec<_> = rules.iter().map(Rule::tag).collect();

        assert_eq!(tags, ["required", "min", "max"]);
        assert_eq!(rules[1].param(), Some("2"));
    }

    #[test]
    fn rejects_bad_tags() {
        assert_eq!(
            parse_tag("maximum=3").unwrap_err().message(),
            "unknown rule 'maximum'"
        );
        assert_eq!(
            parse_tag("max").unwrap_err().message(),
            "rule 'max' requires a parameter"
        );
        assert_eq!(
            parse_tag("required=1").unwrap_err().message(),
            "rule 'required' takes no parameter"
        );
        assert_eq!(
            parse_tag("len=two").unwrap_err().message(),
            "rule 'len' expects a number, got 'two'"
        );
        assert_eq!(parse_tag("required,,max=1").unwrap_err().message(), "empty rule");
        assert!(parse_tag("max=NaN").is_err());
    }

    #[test]
    fn text_is_measured_in_chars() {
        let max = parse_tag("max=3").unwrap().remove(0);

        assert_eq!(max.check(&Scalar::from("héé")), Ok(true));
        assert_eq!(max.check(&Scalar::from("four")), Ok(false));
    }

    #[test]
    fn numbers_are_compared_by_value() {
        let min = parse_tag("min=1.5").unwrap().remove(0);
        let len = parse_tag("len=4").unwrap().remove(0);

        assert_eq!(min.check(&Scalar::Float(1.5)), Ok(true));
        assert_eq!(min.check(&Scalar::Int(1)), Ok(false));
        assert_eq!(len.check(&Scalar::Int(4)), Ok(true));
        assert_eq!(len.check(&Scalar::Bytes(vec![0; 4])), Ok(true));
    }

    #[test]
    fn required_rejects_zero_values() {
        assert_eq!(Rule::Required.check(&Scalar::from("")), Ok(false));
        assert_eq!(Rule::Required.check(&Scalar::Int(0)), Ok(false));
        assert_eq!(Rule::Required.check(&Scalar::Bool(true)), Ok(true));
    }

    #[test]
    fn size_rules_reject_bool() {
        let max = parse_tag("max=1").unwrap().remove(0);

        assert_eq!(max.check(&Scalar::Bool(true)), Err(ScalarKind::Bool));
    }
}
