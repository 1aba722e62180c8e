//! Literal grammar of the time primitives.
//!
//! ```text
//! period       := ("[" | "(") timestamp "," timestamp ("]" | ")")
//! periodset    := "{" period {"," period} "}"
//! timestampset := "{" timestamp {"," timestamp} "}"
//! ```

use chrono::{FixedOffset, Offset, Utc};
use tempora_core::Result;

use crate::lexer::{Cursor, Token};
use crate::period::Period;
use crate::period_set::PeriodSet;
use crate::timestamp::{parse_timestamp_with_offset, Timestamp};
use crate::timestamp_set::TimestampSet;

/// Reads one timestamp token and hands it to the date/time parser.
pub fn read_timestamp(cursor: &mut Cursor<'_>, offset: FixedOffset) -> Result<Timestamp> {
    let (_, token) = cursor
        .take_text()
        .ok_or_else(|| cursor.error("timestamp"))?;
    parse_timestamp_with_offset(token, offset)
}

pub fn read_period(cursor: &mut Cursor<'_>, offset: FixedOffset) -> Result<Period> {
    let lower_inc = cursor.expect_open_bound()?;
    let lower = read_timestamp(cursor, offset)?;
    cursor.expect(Token::Comma)?;
    let upper = read_timestamp(cursor, offset)?;
    let upper_inc = cursor.expect_close_bound()?;
    Period::new(lower, upper, lower_inc, upper_inc)
}

pub fn read_period_set(cursor: &mut Cursor<'_>, offset: FixedOffset) -> Result<PeriodSet> {
    cursor.expect(Token::LBrace)?;
    let periods = cursor.separated(|c| read_period(c, offset))?;
    cursor.expect(Token::RBrace)?;
    Ok(PeriodSet::new(periods))
}

pub fn read_timestamp_set(cursor: &mut Cursor<'_>, offset: FixedOffset) -> Result<TimestampSet> {
    cursor.expect(Token::LBrace)?;
    let timestamps = cursor.separated(|c| read_timestamp(c, offset))?;
    cursor.expect(Token::RBrace)?;
    Ok(TimestampSet::new(timestamps))
}

fn parse_whole<T>(
    text: &str,
    read: impl FnOnce(&mut Cursor<'_>, FixedOffset) -> Result<T>,
) -> Result<T> {
    let mut cursor = Cursor::new(text);
    let value = read(&mut cursor, Utc.fix())?;
    cursor.finish()?;
    Ok(value)
}

pub fn parse_period(text: &str) -> Result<Period> {
    parse_whole(text, read_period)
}

pub fn parse_period_set(text: &str) -> Result<PeriodSet> {
    parse_whole(text, read_period_set)
}

pub fn parse_timestamp_set(text: &str) -> Result<TimestampSet> {
    parse_whole(text, read_timestamp_set)
}
