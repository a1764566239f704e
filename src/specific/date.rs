//! `DATE` (UNIVERSAL 31, primitive): a calendar date, `yyyymmdd`.

use crate::error::{Error, ErrorKind, Result};
use crate::node::Primitive;
use crate::specific::SpecificPrimitive;
use crate::tag::Tag;
use time::{Date as TimeDate, Month};

const WRONG_FORMAT: &str = "wrong format";

/// A decoded `DATE` value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Date {
    date: Option<TimeDate>,
    raw: String,
    findings: Vec<String>,
}

impl Date {
    /// Build a `DATE` from a calendar date.
    pub fn from_value(date: TimeDate) -> Self {
        Self {
            raw: format_yyyymmdd(date),
            date: Some(date),
            findings: Vec::new(),
        }
    }

    /// The decoded calendar date, if the source matched `yyyymmdd`.
    pub fn date(&self) -> Option<TimeDate> {
        self.date
    }

    /// Encode this value as its canonical node.
    ///
    /// Panics if constructed from a non-canonical source string (i.e.
    /// [`Self::date`] is `None`); use [`Self::from_value`] to build one for
    /// encoding.
    pub fn to_node(&self) -> Primitive {
        Primitive::new(Tag::DATE, self.raw.clone().into_bytes()).expect("DATE tag is always primitive")
    }
}

fn format_yyyymmdd(date: TimeDate) -> String {
    format!("{:04}{:02}{:02}", date.year(), date.month() as u8, date.day())
}

impl SpecificPrimitive for Date {
    const TAG_NUMBER: u64 = 31;
    const NAME: &'static str = "DATE";

    fn from_node(node: &Primitive) -> Result<Self> {
        let raw = core::str::from_utf8(node.value())
            .map_err(|_| Error::new(ErrorKind::TextCodec("DATE value is not ASCII")))?
            .to_string();

        let parsed = parse_yyyymmdd(&raw);
        let findings = if parsed.is_some() {
            Vec::new()
        } else {
            vec![WRONG_FORMAT.to_string()]
        };

        Ok(Self {
            date: parsed,
            raw,
            findings,
        })
    }

    fn findings(&self) -> &[String] {
        &self.findings
    }

    fn comment(&self) -> String {
        match self.date {
            Some(d) => format!("DATE := {}", format_yyyymmdd(d)),
            None => format!("DATE := {:?} (unparsed)", self.raw),
        }
    }
}

fn parse_yyyymmdd(s: &str) -> Option<TimeDate> {
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year: i32 = s[0..4].parse().ok()?;
    let month: u8 = s[4..6].parse().ok()?;
    let day: u8 = s[6..8].parse().ok()?;
    let month = Month::try_from(month).ok()?;
    TimeDate::from_calendar_date(year, month, day).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_date_roundtrip() {
        let node = Primitive::new(Tag::DATE, b"20210219".to_vec()).unwrap();
        let d = Date::from_node(&node).unwrap();
        assert!(d.is_valid());
        assert_eq!(
            d.date(),
            Some(TimeDate::from_calendar_date(2021, Month::February, 19).unwrap())
        );
    }

    #[test]
    fn wrong_format_is_a_finding() {
        let node = Primitive::new(Tag::DATE, b"2021-02-19".to_vec()).unwrap();
        let d = Date::from_node(&node).unwrap();
        assert!(!d.is_valid());
        assert_eq!(d.findings(), &[WRONG_FORMAT.to_string()]);
    }
}
