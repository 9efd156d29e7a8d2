//! Scalar and enumerated values.
//!
//! The functions here convert a single token; the methods on [`Tokens`] read
//! the token first. Every parse consumes exactly one token, whether or not it
//! succeeds.

use std::{fmt::Display, io::BufRead, str::FromStr};

use super::{Error, token::Tokens};

/// A type read from a fixed set of keywords.
pub trait Keyword: Copy + PartialEq + 'static {
    /// Keyword spellings and their values. Spellings are unique.
    const TABLE: &'static [(&'static str, Self)];

    /// Find the value spelled exactly as `token`.
    fn lookup(token: &str) -> Option<Self> {
        lookup(Self::TABLE, token)
    }

    /// The spelling of this value.
    fn name(self) -> &'static str {
        Self::TABLE
            .iter()
            .find(|(_, v)| *v == self)
            .map_or("", |(k, _)| *k)
    }
}

/// Find the value spelled exactly as `token` in a table.
pub fn lookup<T: Copy>(table: &[(&str, T)], token: &str) -> Option<T> {
    table.iter().find(|(k, _)| *k == token).map(|(_, v)| *v)
}

/// Order a pair of bounds.
pub fn normalize<T: PartialOrd>(a: T, b: T) -> (T, T) {
    if b < a { (b, a) } else { (a, b) }
}

/// Convert a token to a scalar, ignoring surrounding whitespace.
pub fn scalar<T: FromStr>(token: &str) -> Result<T, Error> {
    let token = token.trim();
    token.parse().map_err(|_| Error::Syntax(token.to_owned()))
}

/// Convert a token to a scalar lying between two bounds, inclusive.
///
/// The bounds may be given in either order.
pub fn bounded<T: FromStr + PartialOrd + Display>(token: &str, a: T, b: T) -> Result<T, Error> {
    let (min, max) = normalize(a, b);
    let value = scalar::<T>(token)?;

    // Written to also reject values that compare with neither bound (NaN).
    if !(min <= value && value <= max) {
        Err(Error::OutOfRange {
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        })?;
    }

    Ok(value)
}

/// Convert a token to the value it spells in a table.
pub fn enumerated<T: Copy>(token: &str, table: &[(&str, T)]) -> Result<T, Error> {
    let token = token.trim();
    lookup(table, token).ok_or_else(|| Error::UnknownEnumToken(token.to_owned()))
}

impl<R: BufRead> Tokens<R> {
    /// Read a token as a string, trimmed of surrounding whitespace.
    pub fn parse_string(&mut self) -> Result<String, Error> {
        let token = self.next_token()?.ok_or(Error::EndOfStream)?;
        Ok(token.trim().to_owned())
    }

    /// Read a token as a scalar.
    pub fn parse<T: FromStr>(&mut self) -> Result<T, Error> {
        scalar(&self.parse_string()?)
    }

    /// Read a token as a scalar lying between two bounds, inclusive.
    pub fn parse_bounded<T: FromStr + PartialOrd + Display>(
        &mut self,
        a: T,
        b: T,
    ) -> Result<T, Error> {
        bounded(&self.parse_string()?, a, b)
    }

    /// Read a token as the value it spells in a table.
    pub fn parse_enum<T: Copy>(&mut self, table: &[(&str, T)]) -> Result<T, Error> {
        enumerated(&self.parse_string()?, table)
    }

    /// Read a token as a keyword.
    pub fn parse_keyword<T: Keyword>(&mut self) -> Result<T, Error> {
        self.parse_enum(T::TABLE)
    }
}
