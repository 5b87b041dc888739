//! Semantic version bumping.

use crate::error::{Error, Result};
use semver::{BuildMetadata, Prerelease, Version};
use serde::Serialize;
use std::str::FromStr;

/// Prerelease identifier used when neither the caller nor the current
/// version provides one.
pub const DEFAULT_PREID: &str = "edge";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseType {
    Major,
    Minor,
    Patch,
    Prerelease,
}

impl ReleaseType {
    pub const ALL: [ReleaseType; 4] = [
        ReleaseType::Major,
        ReleaseType::Minor,
        ReleaseType::Patch,
        ReleaseType::Prerelease,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseType::Major => "major",
            ReleaseType::Minor => "minor",
            ReleaseType::Patch => "patch",
            ReleaseType::Prerelease => "prerelease",
        }
    }
}

impl FromStr for ReleaseType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ReleaseType::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| {
                Error::validation_invalid_argument(
                    "release",
                    format!("Unknown release type: {}", s),
                    Some(s.to_string()),
                    Some(ReleaseType::ALL.iter().map(|r| r.as_str().to_string()).collect()),
                )
            })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BumpPlan {
    pub from: String,
    pub to: String,
    pub release: ReleaseType,
    pub preid: String,
}

fn parse(version: &str) -> Result<Version> {
    Version::parse(version.trim()).map_err(|e| {
        Error::validation_invalid_argument(
            "version",
            format!("Invalid semantic version: {}", e),
            Some(version.to_string()),
            None,
        )
    })
}

fn prerelease(value: &str) -> Result<Prerelease> {
    Prerelease::new(value).map_err(|e| {
        Error::validation_invalid_argument(
            "preid",
            format!("Invalid prerelease identifier: {}", e),
            Some(value.to_string()),
            None,
        )
    })
}

fn is_numeric(identifier: &str) -> bool {
    !identifier.is_empty() && identifier.chars().all(|c| c.is_ascii_digit())
}

/// Next prerelease string for a version that already has one.
fn next_prerelease(current: &str, preid: Option<&str>) -> Result<String> {
    let mut parts: Vec<String> = current.split('.').map(str::to_string).collect();

    if let Some(id) = preid {
        if parts.first().map(String::as_str) != Some(id) {
            return Ok(format!("{}.0", id));
        }
    }

    match parts.last().filter(|p| is_numeric(p)) {
        Some(last) => {
            let next = last
                .parse::<u64>()
                .ok()
                .and_then(|n| n.checked_add(1))
                .ok_or_else(|| overflow(current, "prerelease"))?;
            let index = parts.len() - 1;
            parts[index] = next.to_string();
        }
        None => parts.push("0".to_string()),
    }

    Ok(parts.join("."))
}

fn overflow(version: &str, component: &str) -> Error {
    Error::validation_invalid_argument(
        "version",
        format!("Cannot bump {}: {} component would overflow", version, component),
        Some(version.to_string()),
        None,
    )
}

fn increment(value: u64, version: &str, component: &str) -> Result<u64> {
    value
        .checked_add(1)
        .ok_or_else(|| overflow(version, component))
}

/// Bump `version` by `release`.
///
/// Pre-release versions follow npm: `1.2.0-x` bumped by patch or minor
/// becomes `1.2.0`, and `2.0.0-x` bumped by major becomes `2.0.0`.
pub fn bump_version(version: &str, release: ReleaseType, preid: Option<&str>) -> Result<String> {
    let mut v = parse(version)?;
    let was_pre = !v.pre.is_empty();
    v.build = BuildMetadata::EMPTY;

    match release {
        ReleaseType::Major => {
            if !(was_pre && v.minor == 0 && v.patch == 0) {
                v.major = increment(v.major, version, "major")?;
            }
            v.minor = 0;
            v.patch = 0;
            v.pre = Prerelease::EMPTY;
        }
        ReleaseType::Minor => {
            if !(was_pre && v.patch == 0) {
                v.minor = increment(v.minor, version, "minor")?;
            }
            v.patch = 0;
            v.pre = Prerelease::EMPTY;
        }
        ReleaseType::Patch => {
            if !was_pre {
                v.patch = increment(v.patch, version, "patch")?;
            }
            v.pre = Prerelease::EMPTY;
        }
        ReleaseType::Prerelease => {
            let next = if was_pre {
                next_prerelease(v.pre.as_str(), preid)?
            } else {
                v.patch = increment(v.patch, version, "patch")?;
                format!("{}.0", preid.unwrap_or(DEFAULT_PREID))
            };
            v.pre = prerelease(&next)?;
        }
    }

    Ok(v.to_string())
}

/// `prerelease` for versions that already carry one, `patch` otherwise.
pub fn default_release(version: &str) -> Result<ReleaseType> {
    let v = parse(version)?;
    Ok(if v.pre.is_empty() {
        ReleaseType::Patch
    } else {
        ReleaseType::Prerelease
    })
}

/// The version's leading prerelease identifier when it is not numeric.
pub fn default_preid(version: &str) -> Result<String> {
    let v = parse(version)?;
    let first = v.pre.as_str().split('.').next().unwrap_or("");
    if first.is_empty() || is_numeric(first) {
        Ok(DEFAULT_PREID.to_string())
    } else {
        Ok(first.to_string())
    }
}

/// Fill in release type and preid defaults, then bump.
pub fn resolve_bump(
    version: &str,
    release: Option<ReleaseType>,
    preid: Option<&str>,
) -> Result<BumpPlan> {
    let release = match release {
        Some(release) => release,
        None => default_release(version)?,
    };
    let preid = match preid {
        Some(id) => id.to_string(),
        None => default_preid(version)?,
    };

    let to = bump_version(version, release, Some(&preid))?;

    Ok(BumpPlan {
        from: version.trim().to_string(),
        to,
        release,
        preid,
    })
}
