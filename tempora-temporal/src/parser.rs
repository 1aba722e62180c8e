//! Literal grammar of the temporal values.
//!
//! ```text
//! instant      := value "@" timestamp
//! instantset   := "{" instant {"," instant} "}"
//! sequence     := [interp] ("[" | "(") instant {"," instant} ("]" | ")")
//! sequenceset  := [interp] "{" sequence {"," sequence} "}"
//! interp       := "Interp=Stepwise;"
//! ```
//!
//! Whitespace between tokens is ignored and the marker is matched without
//! regard to case. Without a requested duration the shape is detected from
//! the first structural tokens.

use chrono::{FixedOffset, Offset, Utc};
use tempora_core::{Interpolation, Result, TemporaConfig, TemporalDuration, TemporalError};
use tempora_time::lexer::{Cursor, Token};
use tempora_time::parse::read_timestamp;
use tempora_time::parse_timestamp_with_offset;
use tracing::{debug, trace};

use crate::base::BaseValue;
use crate::instant::Instant;
use crate::instant_set::InstantSet;
use crate::sequence::Sequence;
use crate::sequence_set::SequenceSet;
use crate::temporal::Temporal;
use crate::value::TemporalValue;

/// Prefix selecting step interpolation for sequence literals.
pub const STEP_MARKER: &str = "Interp=Stepwise;";

/// Parser for temporal literals.
///
/// Timestamps written without a zone are read in `default_offset`.
#[derive(Debug, Clone, Copy)]
pub struct LiteralParser {
    default_offset: FixedOffset,
}

impl Default for LiteralParser {
    fn default() -> Self {
        Self::new(Utc.fix())
    }
}

impl LiteralParser {
    pub fn new(default_offset: FixedOffset) -> Self {
        Self { default_offset }
    }

    pub fn from_config(config: &TemporaConfig) -> Self {
        Self::new(config.default_offset)
    }

    pub fn default_offset(&self) -> FixedOffset {
        self.default_offset
    }

    /// Parses a whole literal. With `expected` set, a literal of any other
    /// shape fails at its first structural token.
    pub fn parse<V: BaseValue>(
        &self,
        text: &str,
        expected: Option<TemporalDuration>,
    ) -> Result<TemporalValue<V>> {
        let mut cursor = Cursor::new(text);
        let value = self.read_literal(&mut cursor, expected)?;
        cursor.finish()?;
        debug!(
            duration = %value.duration(),
            base = V::TYPE_NAME,
            instants = value.num_instants(),
            "parsed temporal literal"
        );
        Ok(value)
    }

    pub fn parse_instant<V: BaseValue>(&self, text: &str) -> Result<Instant<V>> {
        self.parse(text, Some(TemporalDuration::Instant))?
            .into_instant()
            .ok_or_else(|| shape_mismatch(TemporalDuration::Instant))
    }

    pub fn parse_instant_set<V: BaseValue>(&self, text: &str) -> Result<InstantSet<V>> {
        self.parse(text, Some(TemporalDuration::InstantSet))?
            .into_instant_set()
            .ok_or_else(|| shape_mismatch(TemporalDuration::InstantSet))
    }

    pub fn parse_sequence<V: BaseValue>(&self, text: &str) -> Result<Sequence<V>> {
        self.parse(text, Some(TemporalDuration::Sequence))?
            .into_sequence()
            .ok_or_else(|| shape_mismatch(TemporalDuration::Sequence))
    }

    pub fn parse_sequence_set<V: BaseValue>(&self, text: &str) -> Result<SequenceSet<V>> {
        self.parse(text, Some(TemporalDuration::SequenceSet))?
            .into_sequence_set()
            .ok_or_else(|| shape_mismatch(TemporalDuration::SequenceSet))
    }

    /// Builds an instant from a value text and a timestamp text given apart.
    pub fn parse_instant_parts<V: BaseValue>(&self, value: &str, timestamp: &str) -> Result<Instant<V>> {
        let value = V::parse_literal(value)
            .ok_or_else(|| TemporalError::malformed(0, value_expectation::<V>()))?;
        let timestamp = parse_timestamp_with_offset(timestamp, self.default_offset)?;
        Ok(Instant::new(value, timestamp))
    }

    fn read_literal<V: BaseValue>(
        &self,
        cursor: &mut Cursor<'_>,
        expected: Option<TemporalDuration>,
    ) -> Result<TemporalValue<V>> {
        let stepwise = cursor.eat_step_marker();
        let detected = detect(cursor);
        let start = cursor.position();
        trace!(detected = %detected, stepwise, "detected literal shape");

        if let Some(expected) = expected {
            if expected != detected {
                return Err(TemporalError::malformed(start, structural_expectation::<V>(expected)));
            }
        }

        let interpolation = if stepwise {
            Interpolation::Step
        } else {
            V::default_interpolation()
        };

        match detected {
            TemporalDuration::Instant | TemporalDuration::InstantSet if stepwise => Err(
                TemporalError::malformed(start, "sequence or sequence set after interpolation marker"),
            ),
            TemporalDuration::Instant => self.read_instant(cursor).map(TemporalValue::Instant),
            TemporalDuration::InstantSet => {
                self.read_instant_set(cursor).map(TemporalValue::InstantSet)
            }
            TemporalDuration::Sequence => self
                .read_sequence(cursor, interpolation)
                .map(TemporalValue::Sequence),
            TemporalDuration::SequenceSet => self
                .read_sequence_set(cursor, interpolation)
                .map(TemporalValue::SequenceSet),
        }
    }

    fn read_value<V: BaseValue>(&self, cursor: &mut Cursor<'_>) -> Result<V> {
        let (start, token) = cursor
            .take_quoted()
            .or_else(|| cursor.take_text())
            .ok_or_else(|| cursor.error(value_expectation::<V>()))?;
        V::parse_literal(token).ok_or_else(|| TemporalError::malformed(start, value_expectation::<V>()))
    }

    fn read_instant<V: BaseValue>(&self, cursor: &mut Cursor<'_>) -> Result<Instant<V>> {
        let value = self.read_value(cursor)?;
        cursor.expect(Token::At)?;
        let timestamp = read_timestamp(cursor, self.default_offset)?;
        Ok(Instant::new(value, timestamp))
    }

    fn read_instant_set<V: BaseValue>(&self, cursor: &mut Cursor<'_>) -> Result<InstantSet<V>> {
        cursor.expect(Token::LBrace)?;
        let instants = cursor.separated(|c| self.read_instant(c))?;
        cursor.expect(Token::RBrace)?;
        InstantSet::new(instants)
    }

    fn read_sequence<V: BaseValue>(
        &self,
        cursor: &mut Cursor<'_>,
        interpolation: Interpolation,
    ) -> Result<Sequence<V>> {
        let lower_inc = cursor.expect_open_bound()?;
        let instants = cursor.separated(|c| self.read_instant(c))?;
        let upper_inc = cursor.expect_close_bound()?;
        Sequence::new(instants, lower_inc, upper_inc, interpolation)
    }

    fn read_sequence_set<V: BaseValue>(
        &self,
        cursor: &mut Cursor<'_>,
        interpolation: Interpolation,
    ) -> Result<SequenceSet<V>> {
        cursor.expect(Token::LBrace)?;
        let sequences = cursor.separated(|c| self.read_sequence(c, interpolation))?;
        cursor.expect(Token::RBrace)?;
        SequenceSet::new(sequences)
    }
}

fn detect(cursor: &Cursor<'_>) -> TemporalDuration {
    match cursor.peek() {
        Some(Token::LBrace) => match cursor.peek_second() {
            Some(Token::LBracket) | Some(Token::LParen) => TemporalDuration::SequenceSet,
            _ => TemporalDuration::InstantSet,
        },
        Some(Token::LBracket) | Some(Token::LParen) => TemporalDuration::Sequence,
        _ => TemporalDuration::Instant,
    }
}

fn value_expectation<V: BaseValue>() -> String {
    format!("{} value", V::TYPE_NAME)
}

fn structural_expectation<V: BaseValue>(duration: TemporalDuration) -> String {
    match duration {
        TemporalDuration::Instant => value_expectation::<V>(),
        TemporalDuration::InstantSet => "'{' followed by an instant".to_string(),
        TemporalDuration::Sequence => "'[' or '('".to_string(),
        TemporalDuration::SequenceSet => "'{' followed by '[' or '('".to_string(),
    }
}

fn shape_mismatch(duration: TemporalDuration) -> TemporalError {
    TemporalError::GeneralError(format!("parser did not produce {}", duration))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempora_time::parse_timestamp;
    use test_case::test_case;

    fn malformed(position: usize, expected: &str) -> TemporalError {
        TemporalError::malformed(position, expected)
    }

    #[test_case("10@2019-09-08", TemporalDuration::Instant ; "instant")]
    #[test_case("{10@2019-09-08, 20@2019-09-09}", TemporalDuration::InstantSet ; "instant set")]
    #[test_case("(10@2019-09-08, 20@2019-09-09]", TemporalDuration::Sequence ; "sequence")]
    #[test_case("  { [10@2019-09-08, 20@2019-09-09] }", TemporalDuration::SequenceSet ; "sequence set")]
    #[test_case("interp=stepwise; [10@2019-09-08]", TemporalDuration::Sequence ; "lowercase marker")]
    fn detects_shape(text: &str, duration: TemporalDuration) {
        let value = LiteralParser::default().parse::<f64>(text, None).unwrap();
        assert_eq!(value.duration(), duration);
    }

    #[test_case("ten@2019-09-08", malformed(0, "float value") ; "bad value")]
    #[test_case("@2019-09-08", malformed(0, "float value") ; "missing value")]
    #[test_case("10 2019-09-08", malformed(0, "float value") ; "missing at sign")]
    #[test_case("10@2019-09-08}", malformed(13, "end of input") ; "trailing brace")]
    #[test_case("[10@2019-09-08, 20@2019-09-09", malformed(29, "']' or ')'") ; "unclosed sequence")]
    #[test_case("{10@2019-09-08", malformed(14, "'}'") ; "unclosed instant set")]
    #[test_case("Interp=Stepwise;10@2019-09-08", malformed(16, "sequence or sequence set after interpolation marker") ; "marker before instant")]
    fn reports_position_of_failure(text: &str, expected: TemporalError) {
        assert_eq!(LiteralParser::default().parse::<f64>(text, None).unwrap_err(), expected);
    }

    #[test]
    fn requested_duration_must_match() {
        let parser = LiteralParser::default();
        assert_eq!(
            parser.parse::<f64>(" [1@2019-09-08]", Some(TemporalDuration::Instant)),
            Err(malformed(1, "float value"))
        );
        assert_eq!(
            parser.parse::<f64>("{1@2019-09-08}", Some(TemporalDuration::SequenceSet)),
            Err(malformed(0, "'{' followed by '[' or '('"))
        );
        assert!(parser
            .parse::<f64>("{[1@2019-09-08]}", Some(TemporalDuration::SequenceSet))
            .is_ok());
    }

    #[test]
    fn construction_errors_surface_from_parser() {
        let parser = LiteralParser::default();
        assert!(matches!(
            parser.parse_sequence::<f64>("[1@2019-09-09, 2@2019-09-08]"),
            Err(TemporalError::NonMonotonicTime(_))
        ));
        assert!(matches!(
            parser.parse_instant_set::<i64>("{1@2019-09-08, 2@2019-09-08}"),
            Err(TemporalError::DuplicateTimestamp(_))
        ));
        assert!(matches!(
            parser.parse_instant::<f64>("1@not a date"),
            Err(TemporalError::MalformedTimestamp(_))
        ));
        assert!(matches!(
            parser.parse_sequence::<f64>("(1@2019-09-08]"),
            Err(TemporalError::InvalidInterval(_))
        ));
    }

    #[test]
    fn text_values_may_be_quoted() {
        let parser = LiteralParser::default();
        let inst = parser.parse_instant::<String>(r#""a, b"@2019-09-08"#).unwrap();
        assert_eq!(inst.value(), "a, b");
        let set = parser
            .parse_instant_set::<String>("{hello@2019-09-08, \"wor\\\"ld\"@2019-09-09}")
            .unwrap();
        assert_eq!(set.values(), vec!["hello".to_string(), "wor\"ld".to_string()]);
    }

    #[test]
    fn semicolon_ends_a_bare_token() {
        let parser = LiteralParser::default();
        assert_eq!(
            parser.parse::<f64>("[1@2019-09-08; 2@2019-09-09]", None),
            Err(malformed(13, "']' or ')'"))
        );
        assert_eq!(
            parser.parse_instant::<String>("a;b@2019-09-08"),
            Err(malformed(1, "'@'"))
        );
        let inst = parser.parse_instant::<String>("\"a;b\" @ 2019-09-08").unwrap();
        assert_eq!(inst.value(), "a;b");
    }

    #[test]
    fn zone_less_timestamps_use_default_offset() {
        let parser = LiteralParser::new(FixedOffset::east_opt(2 * 3600).unwrap());
        let inst = parser.parse_instant::<i64>("1@2019-09-08 02:00").unwrap();
        assert_eq!(inst.timestamp(), parse_timestamp("2019-09-08 00:00").unwrap());
        let zoned = parser.parse_instant::<i64>("1@2019-09-08 02:00+00:00").unwrap();
        assert_eq!(zoned.timestamp(), parse_timestamp("2019-09-08 02:00").unwrap());
    }

    #[test]
    fn parts_path_reports_bad_value() {
        let parser = LiteralParser::default();
        assert_eq!(
            parser.parse_instant_parts::<bool>("maybe", "2019-09-08"),
            Err(malformed(0, "bool value"))
        );
        assert!(*parser.parse_instant_parts::<bool>("t", "2019-09-08").unwrap().value());
    }
}
