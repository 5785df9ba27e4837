//! Text encodings shared by the destination formats.
//!
//! Destinations parse these strings positionally, so the exact bytes matter:
//! - compact: JSON with no whitespace around `,` or `:`
//! - dash-joined: compact items joined with `-`
//! - spaced: JSON with a single space after `,` and `:`

use std::io;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::Formatter;

/// Encodes a value as JSON with no inserted whitespace.
pub fn to_compact<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(value)
}

/// Encodes each item compactly and joins them with `-`.
pub fn to_dash_joined<'a, T, I>(items: I) -> Result<String, serde_json::Error>
where
    T: Serialize + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let encoded = items
        .into_iter()
        .map(to_compact)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(encoded.join("-"))
}

/// Splits a dash-joined list of JSON arrays back into items.
///
/// Items are separated on `]-[`, so negative numbers inside items are safe.
/// An empty string is an empty list.
pub fn from_dash_joined<T: DeserializeOwned>(encoded: &str) -> Result<Vec<T>, serde_json::Error> {
    if encoded.is_empty() {
        return Ok(Vec::new());
    }

    let parts: Vec<&str> = encoded.split("]-[").collect();
    let last = parts.len() - 1;
    parts
        .iter()
        .enumerate()
        .map(|(i, part)| {
            let mut item = String::with_capacity(part.len() + 2);
            if i > 0 {
                item.push('[');
            }
            item.push_str(part);
            if i < last {
                item.push(']');
            }
            serde_json::from_str(&item)
        })
        .collect()
}

/// Formatter writing `", "` between elements and `": "` after keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }
}

/// Encodes a value as JSON with a space after every separator.
pub fn to_spaced<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let mut buf = Vec::with_capacity(128);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
    value.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(serde::ser::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_has_no_whitespace() {
        let encoded = to_compact(&vec![[10u32, 3], [12, 4]]).unwrap();
        assert_eq!(encoded, "[[10,3],[12,4]]");
        assert_eq!(to_compact(&vec![43.0, 42.87]).unwrap(), "[43.0,42.87]");
    }

    #[test]
    fn test_dash_joined() {
        let items = vec![[39986287i64, 116307141], [39986301, 116307150]];
        let encoded = to_dash_joined(&items).unwrap();
        assert_eq!(encoded, "[39986287,116307141]-[39986301,116307150]");

        let decoded: Vec<[i64; 2]> = from_dash_joined(&encoded).unwrap();
        assert_eq!(decoded, items);
    }

    #[test]
    fn test_dash_joined_with_negative_values() {
        let items = vec![[-33.5, 151.2], [-33.6, -0.5]];
        let encoded = to_dash_joined(&items).unwrap();
        let decoded: Vec<[f64; 2]> = from_dash_joined(&encoded).unwrap();
        assert_eq!(decoded, items);
    }

    #[test]
    fn test_empty_dash_joined() {
        let items: Vec<[u32; 2]> = Vec::new();
        assert_eq!(to_dash_joined(&items).unwrap(), "");
        assert!(from_dash_joined::<[u32; 2]>("").unwrap().is_empty());
    }

    #[test]
    fn test_spaced() {
        assert_eq!(
            to_spaced(&vec![[39.98, 116.31], [39.99, 116.32]]).unwrap(),
            "[[39.98, 116.31], [39.99, 116.32]]"
        );

        let mut map = std::collections::BTreeMap::new();
        map.insert("a", 1);
        map.insert("b", 2);
        assert_eq!(to_spaced(&map).unwrap(), r#"{"a": 1, "b": 2}"#);
    }
}
