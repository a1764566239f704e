//! `UTCTime` (UNIVERSAL 23, primitive): a zoned date/time in
//! `yymmddHHMM[SS](Z|±HHMM)` form.

use crate::error::{Error, ErrorKind, Result};
use crate::node::Primitive;
use crate::specific::SpecificPrimitive;
use crate::tag::Tag;
use time::{Date as TimeDate, Month, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

const WRONG_FORMAT: &str = "wrong format";

/// A decoded `UTCTime` value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UtcTime {
    when: Option<OffsetDateTime>,
    raw: String,
    findings: Vec<String>,
}

impl UtcTime {
    /// Build a `UTCTime` from a zoned date/time.
    ///
    /// Per X.680/X.690, only whole seconds are representable; sub-second
    /// components of `when` are truncated.
    pub fn from_value(when: OffsetDateTime) -> Self {
        Self {
            raw: format_utc_time(when),
            when: Some(when),
            findings: Vec::new(),
        }
    }

    /// The decoded zoned date/time, if the source matched the accepted
    /// format.
    pub fn when(&self) -> Option<OffsetDateTime> {
        self.when
    }

    /// Encode this value as its canonical node.
    pub fn to_node(&self) -> Primitive {
        Primitive::new(Tag::UTC_TIME, self.raw.clone().into_bytes()).expect("UTCTime tag is always primitive")
    }
}

fn two_digit_year_to_full(yy: u8) -> i32 {
    // X.680 §47.3 / RFC 5280 §4.1.2.5.1: 00-49 -> 20xx, 50-99 -> 19xx.
    if yy < 50 {
        2000 + yy as i32
    } else {
        1900 + yy as i32
    }
}

fn format_utc_time(when: OffsetDateTime) -> String {
    let yy = when.year().rem_euclid(100);
    let offset = when.offset();
    let zone = if offset.is_utc() {
        "Z".to_string()
    } else {
        let (h, m, _) = offset.as_hms();
        format!("{}{:02}{:02}", if h < 0 || m < 0 { "-" } else { "+" }, h.abs(), m.abs())
    };
    format!(
        "{:02}{:02}{:02}{:02}{:02}{:02}{}",
        yy,
        when.month() as u8,
        when.day(),
        when.hour(),
        when.minute(),
        when.second(),
        zone
    )
}

impl SpecificPrimitive for UtcTime {
    const TAG_NUMBER: u64 = 23;
    const NAME: &'static str = "UTCTime";

    fn from_node(node: &Primitive) -> Result<Self> {
        let raw = core::str::from_utf8(node.value())
            .map_err(|_| Error::new(ErrorKind::TextCodec("UTCTime value is not ASCII")))?
            .to_string();

        let parsed = parse_utc_time(&raw);
        let findings = if parsed.is_some() {
            Vec::new()
        } else {
            vec![WRONG_FORMAT.to_string()]
        };

        Ok(Self {
            when: parsed,
            raw,
            findings,
        })
    }

    fn findings(&self) -> &[String] {
        &self.findings
    }

    fn comment(&self) -> String {
        match self.when {
            Some(w) => format!(
                "UTCTime := {:04}-{:02}-{:02}T{:02}:{:02}Z",
                w.year(),
                w.month() as u8,
                w.day(),
                w.hour(),
                w.minute()
            ),
            None => format!("UTCTime := {:?} (unparsed)", self.raw),
        }
    }
}

fn digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

fn parse_utc_time(s: &str) -> Option<OffsetDateTime> {
    if s.len() < 11 {
        return None;
    }
    let (date_time, zone) = s.split_at(10);
    if !digits(date_time) {
        return None;
    }

    let (seconds_str, zone) = if zone.len() >= 2 && digits(&zone[..2]) {
        (&zone[..2], &zone[2..])
    } else {
        ("", zone)
    };

    let yy: u8 = date_time[0..2].parse().ok()?;
    let month: u8 = date_time[2..4].parse().ok()?;
    let day: u8 = date_time[4..6].parse().ok()?;
    let hour: u8 = date_time[6..8].parse().ok()?;
    let minute: u8 = date_time[8..10].parse().ok()?;
    let second: u8 = if seconds_str.is_empty() {
        0
    } else {
        seconds_str.parse().ok()?
    };

    let month = Month::try_from(month).ok()?;
    let date = TimeDate::from_calendar_date(two_digit_year_to_full(yy), month, day).ok()?;
    let time = Time::from_hms(hour, minute, second).ok()?;
    let naive = PrimitiveDateTime::new(date, time);

    let offset = if zone == "Z" {
        UtcOffset::UTC
    } else if zone.len() == 5 && (zone.starts_with('+') || zone.starts_with('-')) {
        let sign: i8 = if zone.starts_with('-') { -1 } else { 1 };
        let oh: i8 = zone[1..3].parse().ok()?;
        let om: i8 = zone[3..5].parse().ok()?;
        UtcOffset::from_hms(sign * oh, sign * om, 0).ok()?
    } else {
        return None;
    };

    Some(naive.assume_offset(offset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::offset;

    #[test]
    fn utc_without_seconds() {
        let node = Primitive::new(Tag::UTC_TIME, b"2102191844Z".to_vec()).unwrap();
        let t = UtcTime::from_node(&node).unwrap();
        assert!(t.is_valid());
        let when = t.when().unwrap();
        assert_eq!(when.year(), 2021);
        assert_eq!(when.hour(), 18);
        assert_eq!(when.minute(), 44);
    }

    #[test]
    fn utc_with_seconds_and_offset() {
        let node = Primitive::new(Tag::UTC_TIME, b"970506120000+0430".to_vec()).unwrap();
        let t = UtcTime::from_node(&node).unwrap();
        assert!(t.is_valid());
        let when = t.when().unwrap();
        assert_eq!(when.year(), 1997);
        assert_eq!(when.offset(), offset!(+4:30));
    }

    #[test]
    fn wrong_format_is_a_finding() {
        let node = Primitive::new(Tag::UTC_TIME, b"not-a-time".to_vec()).unwrap();
        let t = UtcTime::from_node(&node).unwrap();
        assert!(!t.is_valid());
        assert_eq!(t.findings(), &[WRONG_FORMAT.to_string()]);
    }
}
