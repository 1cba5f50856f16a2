use std::cell::Cell;
use std::fmt;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;
use serde::de::{self, DeserializeSeed, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use thiserror::Error;
use tracing::debug;

use crate::core::record::MatchRecord;
use crate::core::run::{MatchFile, RunMetadata};
use crate::utils::validation::{check_match_limit, find_unnamed_match, MAX_MATCHES};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid match file: {0}")]
    InvalidFormat(String),

    #[error("{0}")]
    TooManyMatches(String),
}

/// Parse a match file, gunzipping it first when the name ends in `.gz`
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, `ParseError::Json` if
/// it is not a valid match file, `ParseError::TooManyMatches` above
/// [`MAX_MATCHES`], or `ParseError::InvalidFormat` (see [`validate`]).
pub fn parse_match_file(path: &Path) -> Result<MatchFile, ParseError> {
    let is_gzipped = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("gz"));

    let file = std::fs::File::open(path)?;
    let match_file = if is_gzipped {
        parse_match_reader(GzDecoder::new(file))?
    } else {
        parse_match_reader(file)?
    };

    debug!(
        "Loaded {} matches from {} (matcher '{}')",
        match_file.matches.len(),
        path.display(),
        match_file.metadata.matcher_name
    );

    Ok(match_file)
}

/// Parse a match file from any reader, allowing at most [`MAX_MATCHES`] matches
///
/// # Errors
///
/// See [`parse_match_reader_with_limit`].
pub fn parse_match_reader<R: Read>(reader: R) -> Result<MatchFile, ParseError> {
    parse_match_reader_with_limit(reader, MAX_MATCHES)
}

/// Parse a match file from JSON text, allowing at most [`MAX_MATCHES`] matches
///
/// # Errors
///
/// See [`parse_match_reader_with_limit`].
pub fn parse_match_text(text: &str) -> Result<MatchFile, ParseError> {
    parse_match_reader_with_limit(text.as_bytes(), MAX_MATCHES)
}

/// Parse a match file from any reader, allowing at most `limit` matches.
///
/// Matches are counted while the array is read, so an oversized file is
/// rejected as soon as the limit is crossed instead of after it is loaded.
///
/// # Errors
///
/// Returns `ParseError::TooManyMatches` once more than `limit` matches are
/// read, `ParseError::Json` on malformed input, or `ParseError::InvalidFormat`
/// if a match has an empty pattern name.
pub fn parse_match_reader_with_limit<R: Read>(
    reader: R,
    limit: usize,
) -> Result<MatchFile, ParseError> {
    let overflow = Cell::new(None);
    let mut deserializer = serde_json::Deserializer::from_reader(BufReader::new(reader));

    let parsed = MatchFileSeed {
        limit,
        overflow: &overflow,
    }
    .deserialize(&mut deserializer)
    .and_then(|match_file| deserializer.end().map(|()| match_file));

    let match_file = parsed.map_err(|e| match overflow.take() {
        Some(message) => ParseError::TooManyMatches(message),
        None => ParseError::Json(e),
    })?;

    validate(&match_file)?;
    Ok(match_file)
}

/// Reject match files the evaluation cannot work with
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if a match has an empty pattern name.
pub fn validate(match_file: &MatchFile) -> Result<(), ParseError> {
    if let Some(i) = find_unnamed_match(&match_file.matches) {
        return Err(ParseError::InvalidFormat(format!(
            "Match {i} has an empty patternName"
        )));
    }

    Ok(())
}

/// Reads the top-level match file object.
///
/// Metadata fields are optional; `matches` is required and read through
/// [`MatchesSeed`].
struct MatchFileSeed<'a> {
    limit: usize,
    overflow: &'a Cell<Option<String>>,
}

impl<'de> DeserializeSeed<'de> for MatchFileSeed<'_> {
    type Value = MatchFile;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<MatchFile, D::Error> {
        deserializer.deserialize_map(self)
    }
}

impl<'de> Visitor<'de> for MatchFileSeed<'_> {
    type Value = MatchFile;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a match file object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<MatchFile, A::Error> {
        let mut metadata = RunMetadata::default();
        let mut matches: Option<Vec<MatchRecord>> = None;

        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "executableName" => metadata.executable_name = map.next_value()?,
                "matcherName" => metadata.matcher_name = map.next_value()?,
                "executableArchitecture" => metadata.executable_architecture = map.next_value()?,
                "realTime" => metadata.real_time = map.next_value()?,
                "cpuTime" => metadata.cpu_time = map.next_value()?,
                "matches" => {
                    if matches.is_some() {
                        return Err(de::Error::duplicate_field("matches"));
                    }
                    matches = Some(map.next_value_seed(MatchesSeed {
                        limit: self.limit,
                        overflow: self.overflow,
                    })?);
                }
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }

        let matches = matches.ok_or_else(|| de::Error::missing_field("matches"))?;
        Ok(MatchFile { metadata, matches })
    }
}

/// Reads the `matches` array, failing before the record past `limit` is kept
struct MatchesSeed<'a> {
    limit: usize,
    overflow: &'a Cell<Option<String>>,
}

impl<'de> DeserializeSeed<'de> for MatchesSeed<'_> {
    type Value = Vec<MatchRecord>;

    fn deserialize<D: Deserializer<'de>>(
        self,
        deserializer: D,
    ) -> Result<Vec<MatchRecord>, D::Error> {
        deserializer.deserialize_seq(self)
    }
}

impl<'de> Visitor<'de> for MatchesSeed<'_> {
    type Value = Vec<MatchRecord>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "an array of at most {} matches", self.limit)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Vec<MatchRecord>, A::Error> {
        let mut matches = Vec::new();

        while let Some(record) = seq.next_element::<MatchRecord>()? {
            // Check match limit for DOS protection
            if let Some(message) = check_match_limit(matches.len(), self.limit) {
                self.overflow.set(Some(message.clone()));
                return Err(de::Error::custom(message));
            }
            matches.push(record);
        }

        Ok(matches)
    }
}
