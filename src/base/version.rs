use std::fmt::{Display, Formatter};
use std::str::FromStr;

use semver::{Comparator, Op, Prerelease, Version, VersionReq};

use super::Error;

/// Version strings the agent reports when it does not know its own release.
const SENTINELS: [&str; 3] = ["", "0.0.0", "develop"];

/// The version of the agent a backup was taken with.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AgentVersion {
    /// One of the sentinels `""`, `"0.0.0"` or `"develop"`.
    Unknown,
    Release(Version),
}

impl AgentVersion {
    /// Whether this is a release no newer than `major.minor.patch`.
    ///
    /// Build metadata is ignored and pre-releases never match, so `1.2.0-rc.1` is not
    /// at most `1.2.0`. `Unknown` never matches.
    pub fn at_most(&self, major: u64, minor: u64, patch: u64) -> bool {
        let AgentVersion::Release(version) = self else {
            return false;
        };
        let req = VersionReq {
            comparators: vec![Comparator {
                op: Op::LessEq,
                major,
                minor: Some(minor),
                patch: Some(patch),
                pre: Prerelease::EMPTY,
            }],
        };
        req.matches(version)
    }
}

impl FromStr for AgentVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        if SENTINELS.contains(&s) {
            return Ok(AgentVersion::Unknown);
        }
        Version::parse(&normalize(s))
            .map(AgentVersion::Release)
            .map_err(|source| Error::VersionParse { version: s.to_owned(), source })
    }
}

impl Display for AgentVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentVersion::Unknown => f.write_str("unknown"),
            AgentVersion::Release(version) => write!(f, "{version}"),
        }
    }
}

/// Agent release tags come as `v1.10`, `1.2` or `1.02.0`; pad them to three numeric segments
/// without leading zeros.
fn normalize(s: &str) -> String {
    let s = s.strip_prefix('v').unwrap_or(s);
    let split = s.find(['-', '+']).unwrap_or(s.len());
    let (core, rest) = s.split_at(split);
    let segments = core.split('.').collect::<Vec<_>>();
    let numeric = segments.iter().all(|seg| !seg.is_empty() && seg.bytes().all(|c| c.is_ascii_digit()));
    if !numeric || segments.len() > 3 {
        return s.to_owned();
    }
    let mut padded = segments.into_iter()
        .map(|seg| match seg.trim_start_matches('0') {
            "" => "0",
            trimmed => trimmed
        })
        .collect::<Vec<_>>();
    padded.resize(3, "0");
    padded.join(".") + rest
}


#[cfg(test)]
mod tests {
    use super::*;

    fn release(s: &str) -> AgentVersion {
        s.parse().unwrap()
    }

    #[test]
    fn test_sentinels() {
        for s in ["", "0.0.0", "develop"] {
            assert_eq!(release(s), AgentVersion::Unknown);
        }
        assert!(!AgentVersion::Unknown.at_most(1, 2, 0));
    }

    #[test]
    fn test_lenient_forms() {
        assert_eq!(release("1.10"), AgentVersion::Release(Version::new(1, 10, 0)));
        assert_eq!(release("v1.2.0"), AgentVersion::Release(Version::new(1, 2, 0)));
        assert_eq!(release("2"), AgentVersion::Release(Version::new(2, 0, 0)));
        assert_eq!(release("1.3-rc.1"), AgentVersion::Release(Version::parse("1.3.0-rc.1").unwrap()));
        assert_eq!(release("1.02.0"), AgentVersion::Release(Version::new(1, 2, 0)));
        assert_eq!(release("v01.010"), AgentVersion::Release(Version::new(1, 10, 0)));
        assert_eq!(release("1.2.00"), AgentVersion::Release(Version::new(1, 2, 0)));
        assert!(release("1.02.0").at_most(1, 2, 0));
    }

    #[test]
    fn test_malformed() {
        for s in ["latest", "1.x", "1..2", "1.2.3.4", " 1.2.0"] {
            match s.parse::<AgentVersion>() {
                Err(Error::VersionParse { version, .. }) => assert_eq!(version, s),
                other => panic!("{s}: {other:?}"),
            }
        }
    }

    #[test]
    fn test_at_most() {
        assert!(release("1.0.0").at_most(1, 2, 0));
        assert!(release("1.2.0").at_most(1, 2, 0));
        assert!(release("1.2.0+build.7").at_most(1, 2, 0));
        assert!(!release("1.2.1").at_most(1, 2, 0));
        assert!(!release("1.2.0-rc.1").at_most(1, 2, 0));
        assert!(!release("1.0.0-beta").at_most(1, 10, 0));
        assert!(release("1.9.9").at_most(1, 10, 0));
        assert!(!release("1.10.1").at_most(1, 10, 0));
    }
}
