// crates/infra/src/subset/compiled.rs
use evalexpr::{ContextWithMutableVariables, HashMapContext, Node, Value};
use year_range_filter_domain::{AttributeMap, AttributeValue};
use year_range_filter_shared_kernel::{DomainError, DomainResult};

use super::{
    lexer::tokenize,
    parser::{FieldVars, Parser},
};

/// Outcome of testing one feature against a subset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Match,
    NoMatch,
    /// An attribute could not take part in the comparison (e.g. text against a number).
    Malformed { reason: String },
}

/// A parsed subset string, ready to be evaluated per feature.
#[derive(Debug, Clone)]
pub struct CompiledSubset {
    expression: String,
    translated: String,
    fields: Vec<String>,
    /// Parallel to `fields`: compared against an integer literal somewhere.
    integer: Vec<bool>,
    node: Option<Node>,
}

impl CompiledSubset {
    /// A subset that lets every feature through.
    pub fn unfiltered() -> Self {
        Self {
            expression: String::new(),
            translated: String::new(),
            fields: Vec::new(),
            integer: Vec::new(),
            node: None,
        }
    }

    /// Compiles `expression`; a blank string compiles to "no filter".
    pub fn compile(expression: &str) -> DomainResult<Self> {
        if expression.trim().is_empty() {
            return Ok(Self::unfiltered());
        }

        let invalid = |details: String| DomainError::InvalidFilterExpression {
            expression: expression.to_string(),
            details,
        };

        let tokens = tokenize(expression).map_err(invalid)?;
        let ast = Parser::new(tokens).parse().map_err(invalid)?;

        let mut vars = FieldVars::default();
        let mut translated = String::new();
        ast.emit(&mut vars, &mut translated);

        let node: Node = evalexpr::build_operator_tree(&translated).map_err(|e| {
            match DomainError::from(e) {
                DomainError::InvalidFilterExpression { details, .. } => invalid(details),
                other => other,
            }
        })?;

        let (fields, integer) = vars.into_parts();
        Ok(Self {
            expression: expression.to_string(),
            translated,
            fields,
            integer,
            node: Some(node),
        })
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// The expression rewritten in `evalexpr` syntax.
    pub fn translated(&self) -> &str {
        &self.translated
    }

    /// Field names the expression references, in first-use order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn is_unfiltered(&self) -> bool {
        self.node.is_none()
    }

    /// Tests one feature.
    ///
    /// Integer fields are coerced the same way direct evaluation coerces years,
    /// so a value that is not a whole number is `Malformed` regardless of the
    /// other attributes. After that, an absent or NULL attribute makes a failing
    /// comparison a plain non-match.
    pub fn evaluate(&self, attributes: &AttributeMap) -> Verdict {
        let Some(node) = &self.node else {
            return Verdict::Match;
        };

        let mut values = Vec::with_capacity(self.fields.len());
        for (field, &integer) in self.fields.iter().zip(&self.integer) {
            let value = match attributes.get(field) {
                None => Value::Empty,
                Some(attribute) if integer => match attribute.as_year(field) {
                    Ok(Some(year)) => Value::Int(year),
                    Ok(None) => Value::Empty,
                    Err(e) => return Verdict::Malformed { reason: e.to_string() },
                },
                Some(attribute) => to_value(attribute),
            };
            values.push(value);
        }

        let saw_null = values.iter().any(|v| matches!(v, Value::Empty));
        let mut context: HashMapContext = HashMapContext::new();
        for (index, value) in values.into_iter().enumerate() {
            if let Err(e) = context.set_value(FieldVars::variable_name(index), value) {
                return Verdict::Malformed { reason: e.to_string() };
            }
        }

        match node.eval_boolean_with_context(&context) {
            Ok(true) => Verdict::Match,
            Ok(false) => Verdict::NoMatch,
            Err(_) if saw_null => Verdict::NoMatch,
            Err(e) => Verdict::Malformed { reason: e.to_string() },
        }
    }
}

/// Text that looks numeric is compared as a number, as the host does.
fn to_value(attribute: &AttributeValue) -> Value {
    match attribute {
        AttributeValue::Null => Value::Empty,
        AttributeValue::Bool(b) => Value::Boolean(*b),
        AttributeValue::Int(i) => Value::Int(*i),
        AttributeValue::Real(r) => Value::Float(*r),
        AttributeValue::Text(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Value::Empty
            } else if let Ok(i) = trimmed.parse::<i64>() {
                Value::Int(i)
            } else if let Ok(f) = trimmed.parse::<f64>() {
                Value::Float(f)
            } else {
                Value::String(s.clone())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, AttributeValue)]) -> AttributeMap {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    const REFERENCE: &str = r#""beginjaar" <= 1900 AND "eindjaar" >= 1842"#;

    #[test]
    fn blank_expression_matches_everything() {
        let subset = CompiledSubset::compile("  ").unwrap();
        assert!(subset.is_unfiltered());
        assert_eq!(subset.evaluate(&AttributeMap::new()), Verdict::Match);
    }

    #[test]
    fn reference_predicate_evaluates_overlap() {
        let subset = CompiledSubset::compile(REFERENCE).unwrap();
        assert_eq!(subset.fields(), ["beginjaar".to_string(), "eindjaar".to_string()]);

        let inside = attrs(&[("beginjaar", 1850.into()), ("eindjaar", 1860.into())]);
        let before = attrs(&[("beginjaar", 1800.into()), ("eindjaar", 1841.into())]);
        let text_years = attrs(&[("beginjaar", "1899".into()), ("eindjaar", "1950".into())]);
        assert_eq!(subset.evaluate(&inside), Verdict::Match);
        assert_eq!(subset.evaluate(&before), Verdict::NoMatch);
        assert_eq!(subset.evaluate(&text_years), Verdict::Match);
    }

    #[test]
    fn absent_or_null_field_does_not_match() {
        let subset = CompiledSubset::compile(REFERENCE).unwrap();
        let missing = attrs(&[("beginjaar", 1850.into())]);
        let null = attrs(&[("beginjaar", 1850.into()), ("eindjaar", AttributeValue::Null)]);
        assert_eq!(subset.evaluate(&missing), Verdict::NoMatch);
        assert_eq!(subset.evaluate(&null), Verdict::NoMatch);
    }

    #[test]
    fn non_numeric_text_is_malformed() {
        let subset = CompiledSubset::compile(REFERENCE).unwrap();
        let garbage = attrs(&[("beginjaar", "onbekend".into()), ("eindjaar", 1900.into())]);
        assert!(matches!(subset.evaluate(&garbage), Verdict::Malformed { .. }));
    }

    #[test]
    fn malformed_year_is_reported_even_next_to_null() {
        let subset = CompiledSubset::compile(REFERENCE).unwrap();
        let record = attrs(&[("beginjaar", "onbekend".into()), ("eindjaar", AttributeValue::Null)]);
        assert!(matches!(subset.evaluate(&record), Verdict::Malformed { .. }));
    }

    #[test]
    fn fractional_years_are_malformed() {
        let subset = CompiledSubset::compile(REFERENCE).unwrap();
        let real = attrs(&[("beginjaar", 1850.5.into()), ("eindjaar", 1860.into())]);
        let text = attrs(&[("beginjaar", "1850.0".into()), ("eindjaar", 1860.into())]);
        let whole = attrs(&[("beginjaar", 1850.0.into()), ("eindjaar", 1860.into())]);
        assert!(matches!(subset.evaluate(&real), Verdict::Malformed { .. }));
        assert!(matches!(subset.evaluate(&text), Verdict::Malformed { .. }));
        assert_eq!(subset.evaluate(&whole), Verdict::Match);
    }

    #[test]
    fn decimal_literals_compare_as_numbers() {
        let subset = CompiledSubset::compile(r#""oppervlak" > 2.5"#).unwrap();
        assert_eq!(subset.evaluate(&attrs(&[("oppervlak", 3.25.into())])), Verdict::Match);
        assert_eq!(subset.evaluate(&attrs(&[("oppervlak", "1.5".into())])), Verdict::NoMatch);
    }

    #[test]
    fn deep_nesting_is_an_invalid_expression() {
        let expression = format!("{}\"beginjaar\" <= 1900", "NOT ".repeat(100_000));
        let err = CompiledSubset::compile(&expression).unwrap_err();
        assert!(matches!(err, DomainError::InvalidFilterExpression { .. }));
    }

    #[test]
    fn false_literal_hides_everything() {
        let subset = CompiledSubset::compile("FALSE").unwrap();
        assert!(subset.fields().is_empty());
        assert_eq!(subset.evaluate(&AttributeMap::new()), Verdict::NoMatch);
    }

    #[test]
    fn text_equality_and_negation() {
        let subset = CompiledSubset::compile("NOT \"naam\" = 'Sittard'").unwrap();
        assert_eq!(subset.evaluate(&attrs(&[("naam", "Sittard".into())])), Verdict::NoMatch);
        assert_eq!(subset.evaluate(&attrs(&[("naam", "Born".into())])), Verdict::Match);
    }

    #[test]
    fn syntax_error_carries_expression() {
        let err = CompiledSubset::compile(r#""beginjaar" <="#).unwrap_err();
        match err {
            DomainError::InvalidFilterExpression { expression, .. } => {
                assert_eq!(expression, r#""beginjaar" <="#);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
