// Response-body classification for the daemon's plain-text replies.
//
// qBittorrent answers mutating endpoints with bare strings: "Ok." for
// success and "Fails." for an already-queued torrent or denied login.
// The match is exact after trimming -- the daemon is not otherwise
// case- or punctuation-tolerant. Every string comparison against that
// wire contract lives in this module, so a daemon-side wording change
// only touches one mapping.

use crate::models::AddOutcome;

/// Success reply for login and torrents/add.
pub const BODY_OK: &str = "Ok.";

/// Add reply when the torrent is already queued.
pub const BODY_FAILS: &str = "Fails.";

/// Outcome of a login attempt, classified from the response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Body was exactly "Ok." -- the SID cookie is now in the jar.
    Accepted,
    /// Anything else: wrong credentials, account banned, etc.
    Denied { reason: String },
}

/// Classify a 2xx login response body.
pub fn classify_login(body: &str) -> LoginOutcome {
    if body.trim() == BODY_OK {
        LoginOutcome::Accepted
    } else {
        LoginOutcome::Denied {
            reason: body.trim().to_owned(),
        }
    }
}

/// Classify a 2xx torrents/add response body.
///
/// "Fails." is the daemon's documented reply for a duplicate; any other
/// non-"Ok." text is a rejection with the raw text preserved for
/// diagnostics.
pub fn classify_add(body: &str) -> AddOutcome {
    match body.trim() {
        BODY_OK => AddOutcome::Added,
        BODY_FAILS => AddOutcome::Duplicate,
        other => AddOutcome::Rejected {
            reason: other.to_owned(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_classification_table() {
        let cases = [
            ("Ok.", AddOutcome::Added),
            ("Ok.\n", AddOutcome::Added),
            ("  Ok.  ", AddOutcome::Added),
            ("Fails.", AddOutcome::Duplicate),
            ("Fails.\n", AddOutcome::Duplicate),
            (
                "Unsupported URL",
                AddOutcome::Rejected {
                    reason: "Unsupported URL".into(),
                },
            ),
            // The daemon's match is exact: near-misses are rejections.
            (
                "ok.",
                AddOutcome::Rejected {
                    reason: "ok.".into(),
                },
            ),
            (
                "Ok",
                AddOutcome::Rejected {
                    reason: "Ok".into(),
                },
            ),
            ("", AddOutcome::Rejected { reason: String::new() }),
        ];

        for (body, expected) in cases {
            assert_eq!(classify_add(body), expected, "body: {body:?}");
        }
    }

    #[test]
    fn login_classification_table() {
        assert_eq!(classify_login("Ok."), LoginOutcome::Accepted);
        assert_eq!(classify_login("Ok.\r\n"), LoginOutcome::Accepted);
        assert_eq!(
            classify_login("Fails."),
            LoginOutcome::Denied {
                reason: "Fails.".into()
            }
        );
        assert_eq!(
            classify_login("User's IP is banned for too many failed login attempts"),
            LoginOutcome::Denied {
                reason: "User's IP is banned for too many failed login attempts".into()
            }
        );
    }
}
