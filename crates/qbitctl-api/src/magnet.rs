// Magnet URI parsing and validation.
//
// A magnet link encodes the torrent's content hash (`xt=urn:btih:...`)
// plus optional display name and trackers. Validating here, before the
// daemon is consulted, keeps obviously malformed links out of the add
// flow and gives duplicate detection a well-defined key: two links are
// the same torrent iff their normalized info hashes match.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use url::Url;

const BTIH_PREFIX: &str = "urn:btih:";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MagnetError {
    #[error("not a magnet URI")]
    NotMagnet,

    #[error("magnet URI is unparseable: {0}")]
    Unparseable(String),

    #[error("magnet URI has no urn:btih exact topic")]
    MissingInfoHash,

    #[error("invalid info hash '{0}': expected 40 hex or 32 base32 characters")]
    InvalidInfoHash(String),
}

/// A BitTorrent v1 info hash, as carried in a magnet link.
///
/// Either 40 hex characters or the 32-character base32 form. Stored
/// normalized (hex lowercased, base32 uppercased) so equality and
/// hashing behave regardless of the casing a site used.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InfoHash {
    Hex(String),
    Base32(String),
}

impl InfoHash {
    fn parse(raw: &str) -> Result<Self, MagnetError> {
        if raw.len() == 40 && raw.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Ok(Self::Hex(raw.to_ascii_lowercase()));
        }
        if raw.len() == 32
            && raw
                .bytes()
                .all(|b| b.is_ascii_alphabetic() || (b'2'..=b'7').contains(&b))
        {
            return Ok(Self::Base32(raw.to_ascii_uppercase()));
        }
        Err(MagnetError::InvalidInfoHash(raw.to_owned()))
    }
}

impl fmt::Display for InfoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hex(s) | Self::Base32(s) => f.write_str(s),
        }
    }
}

/// A parsed, validated magnet link.
///
/// Keeps the original URI verbatim -- that exact string is what gets
/// forwarded to the daemon -- alongside the decoded fields.
#[derive(Debug, Clone)]
pub struct MagnetLink {
    raw: String,
    info_hash: InfoHash,
    display_name: Option<String>,
    trackers: Vec<String>,
}

impl MagnetLink {
    /// The URI as originally written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn info_hash(&self) -> &InfoHash {
        &self.info_hash
    }

    /// The `dn` field, percent-decoded.
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn trackers(&self) -> &[String] {
        &self.trackers
    }

    /// A human-readable label: the display name if present, otherwise
    /// the info hash.
    pub fn label(&self) -> String {
        self.display_name
            .clone()
            .unwrap_or_else(|| self.info_hash.to_string())
    }

    /// Same torrent as `other`?
    pub fn same_torrent(&self, other: &Self) -> bool {
        self.info_hash == other.info_hash
    }
}

impl FromStr for MagnetLink {
    type Err = MagnetError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        if !raw.starts_with("magnet:") {
            return Err(MagnetError::NotMagnet);
        }

        let url = Url::parse(raw).map_err(|e| MagnetError::Unparseable(e.to_string()))?;

        let mut info_hash = None;
        let mut display_name = None;
        let mut trackers = Vec::new();

        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                // First btih topic wins; hybrid links may carry several xt's.
                "xt" if info_hash.is_none() => {
                    if let Some(hash) = value.strip_prefix(BTIH_PREFIX) {
                        info_hash = Some(InfoHash::parse(hash)?);
                    }
                }
                "dn" if display_name.is_none() => {
                    display_name = Some(value.into_owned());
                }
                "tr" => trackers.push(value.into_owned()),
                _ => {}
            }
        }

        let info_hash = info_hash.ok_or(MagnetError::MissingInfoHash)?;

        Ok(Self {
            raw: raw.to_owned(),
            info_hash,
            display_name,
            trackers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEX_HASH: &str = "c9e15763f722f23e98a29decdfae341b98d53056";

    #[test]
    fn parses_hex_magnet() {
        let raw = format!(
            "magnet:?xt=urn:btih:{HEX_HASH}&dn=ubuntu-24.04&tr=udp%3A%2F%2Ftracker.example%3A6969"
        );
        let link: MagnetLink = raw.parse().expect("valid magnet");
        assert_eq!(link.info_hash(), &InfoHash::Hex(HEX_HASH.into()));
        assert_eq!(link.display_name(), Some("ubuntu-24.04"));
        assert_eq!(link.trackers(), ["udp://tracker.example:6969"]);
        assert_eq!(link.as_str(), raw);
    }

    #[test]
    fn parses_base32_magnet() {
        let link: MagnetLink = "magnet:?xt=urn:btih:ZOCMZQIPFFW7OLLMIC5HUB6BPCSDEOQU"
            .parse()
            .expect("valid magnet");
        assert!(matches!(link.info_hash(), InfoHash::Base32(_)));
        assert_eq!(link.display_name(), None);
    }

    #[test]
    fn hash_equality_ignores_case() {
        let a: MagnetLink = format!("magnet:?xt=urn:btih:{HEX_HASH}")
            .parse()
            .expect("valid");
        let b: MagnetLink = format!("magnet:?xt=urn:btih:{}", HEX_HASH.to_uppercase())
            .parse()
            .expect("valid");
        assert!(a.same_torrent(&b));
    }

    #[test]
    fn rejects_non_magnet() {
        let err = "https://example.com/file.torrent"
            .parse::<MagnetLink>()
            .expect_err("not a magnet");
        assert_eq!(err, MagnetError::NotMagnet);
    }

    #[test]
    fn rejects_missing_topic() {
        let err = "magnet:?dn=nameless"
            .parse::<MagnetLink>()
            .expect_err("missing xt");
        assert_eq!(err, MagnetError::MissingInfoHash);
    }

    #[test]
    fn rejects_malformed_hash() {
        let err = "magnet:?xt=urn:btih:nothex"
            .parse::<MagnetLink>()
            .expect_err("bad hash");
        assert!(matches!(err, MagnetError::InvalidInfoHash(_)));
    }

    #[test]
    fn label_falls_back_to_hash() {
        let link: MagnetLink = format!("magnet:?xt=urn:btih:{HEX_HASH}")
            .parse()
            .expect("valid");
        assert_eq!(link.label(), HEX_HASH);
    }
}
