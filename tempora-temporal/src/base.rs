use std::cmp::Ordering;
use std::fmt;

use tempora_core::Interpolation;

/// Scalar domain carried by a temporal value.
pub trait BaseValue: Clone + PartialEq + fmt::Debug {
    /// Name used in error messages (`float`, `int`, ...).
    const TYPE_NAME: &'static str;

    /// Whether values vary continuously, which enables linear interpolation.
    const CONTINUOUS: bool = false;

    /// Parses a value token as it appears before `@` in a literal.
    fn parse_literal(token: &str) -> Option<Self>;

    fn fmt_literal(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;

    /// `None` when the two values have no defined order.
    fn compare(&self, other: &Self) -> Option<Ordering>;

    /// Value at `fraction` (0..=1) of the way from `self` to `other`.
    fn interpolate(&self, _other: &Self, _fraction: f64) -> Option<Self> {
        None
    }

    fn default_interpolation() -> Interpolation {
        if Self::CONTINUOUS {
            Interpolation::Linear
        } else {
            Interpolation::Step
        }
    }

    fn supports(interpolation: Interpolation) -> bool {
        Self::CONTINUOUS || interpolation == Interpolation::Step
    }
}

/// Display adapter writing a base value in literal form.
pub(crate) struct Literal<'a, V>(pub &'a V);

impl<V: BaseValue> fmt::Display for Literal<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt_literal(f)
    }
}

impl BaseValue for f64 {
    const TYPE_NAME: &'static str = "float";
    const CONTINUOUS: bool = true;

    fn parse_literal(token: &str) -> Option<Self> {
        token.trim().parse().ok()
    }

    fn fmt_literal(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }

    fn compare(&self, other: &Self) -> Option<Ordering> {
        self.partial_cmp(other)
    }

    fn interpolate(&self, other: &Self, fraction: f64) -> Option<Self> {
        Some(self + (other - self) * fraction)
    }
}

impl BaseValue for i64 {
    const TYPE_NAME: &'static str = "int";

    fn parse_literal(token: &str) -> Option<Self> {
        token.trim().parse().ok()
    }

    fn fmt_literal(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }

    fn compare(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl BaseValue for bool {
    const TYPE_NAME: &'static str = "bool";

    fn parse_literal(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "t" | "true" => Some(true),
            "f" | "false" => Some(false),
            _ => None,
        }
    }

    fn fmt_literal(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if *self { "t" } else { "f" })
    }

    fn compare(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl BaseValue for String {
    const TYPE_NAME: &'static str = "text";

    /// Accepts a double-quoted token with `\"`/`\\` escapes, or bare text.
    fn parse_literal(token: &str) -> Option<Self> {
        let token = token.trim();
        let Some(inner) = token.strip_prefix('"') else {
            return (!token.is_empty() && !token.contains('"')).then(|| token.to_string());
        };
        let inner = inner.strip_suffix('"')?;

        let mut value = String::with_capacity(inner.len());
        let mut chars = inner.chars();
        while let Some(c) = chars.next() {
            match c {
                '\\' => value.push(chars.next()?),
                '"' => return None,
                _ => value.push(c),
            }
        }
        Some(value)
    }

    fn fmt_literal(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\"")?;
        for c in self.chars() {
            if matches!(c, '"' | '\\') {
                f.write_str("\\")?;
            }
            write!(f, "{}", c)?;
        }
        f.write_str("\"")
    }

    fn compare(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
