#![forbid(unsafe_code)]

//! Line parser for the `/proc/<pid>/maps` text format.
//!
//! The field layout is an external kernel contract: address range,
//! permissions, offset, device, inode, then an optional pathname padded
//! with a variable amount of whitespace. Pathnames can themselves contain
//! spaces, so the pathname is the untouched remainder of the line rather
//! than a whitespace-split token.

use crate::domain::{MappedRegion, Permissions};
use std::path::PathBuf;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("invalid address range: {0:?}")]
    InvalidAddressRange(String),

    #[error("invalid permission flags: {0:?}")]
    InvalidPermissions(String),

    #[error("invalid {field} value: {value:?}")]
    InvalidNumber {
        field: &'static str,
        value: String,
    },
}

/// Parse one maps line into a [`MappedRegion`].
///
/// Pseudo entries (`[heap]`, `[vdso]`, ...) and anonymous mappings parse
/// successfully with an absent path; only structurally broken lines fail.
pub fn parse_line(line: &str) -> Result<MappedRegion, ParseError> {
    let (range, rest) = take_token(line);
    if range.is_empty() {
        return Err(ParseError::MissingField("address range"));
    }
    let (start, end) = parse_range(range)?;

    let (perms, rest) = take_token(rest);
    let perms = parse_permissions(perms)?;

    let (offset, rest) = take_token(rest);
    let offset = parse_hex(offset, "offset")?;

    let (device, rest) = take_token(rest);
    let (dev_major, dev_minor) = parse_device(device)?;

    let (inode, rest) = take_token(rest);
    if inode.is_empty() {
        return Err(ParseError::MissingField("inode"));
    }
    let inode = inode
        .parse::<u64>()
        .map_err(|_| ParseError::InvalidNumber {
            field: "inode",
            value: inode.to_owned(),
        })?;

    Ok(MappedRegion {
        start,
        end,
        perms,
        offset,
        dev_major,
        dev_minor,
        inode,
        path: parse_pathname(rest),
    })
}

/// Next whitespace-delimited token and the remainder after it.
fn take_token(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(|c: char| c.is_ascii_whitespace()) {
        Some(idx) => (&s[..idx], &s[idx..]),
        None => (s, ""),
    }
}

fn parse_range(token: &str) -> Result<(u64, u64), ParseError> {
    let invalid = || ParseError::InvalidAddressRange(token.to_owned());
    let (start, end) = token.split_once('-').ok_or_else(invalid)?;
    let start = u64::from_str_radix(start, 16).map_err(|_| invalid())?;
    let end = u64::from_str_radix(end, 16).map_err(|_| invalid())?;
    if end < start {
        return Err(invalid());
    }
    Ok((start, end))
}

fn parse_permissions(token: &str) -> Result<Permissions, ParseError> {
    let invalid = || ParseError::InvalidPermissions(token.to_owned());
    let mut flags = token.chars();
    let read = match flags.next().ok_or_else(invalid)? {
        'r' => true,
        '-' => false,
        _ => return Err(invalid()),
    };
    let write = match flags.next().ok_or_else(invalid)? {
        'w' => true,
        '-' => false,
        _ => return Err(invalid()),
    };
    let execute = match flags.next().ok_or_else(invalid)? {
        'x' => true,
        '-' => false,
        _ => return Err(invalid()),
    };
    let shared = match flags.next().ok_or_else(invalid)? {
        's' => true,
        'p' => false,
        _ => return Err(invalid()),
    };
    Ok(Permissions {
        read,
        write,
        execute,
        shared,
    })
}

fn parse_hex(token: &str, field: &'static str) -> Result<u64, ParseError> {
    if token.is_empty() {
        return Err(ParseError::MissingField(field));
    }
    u64::from_str_radix(token, 16).map_err(|_| ParseError::InvalidNumber {
        field,
        value: token.to_owned(),
    })
}

fn parse_device(token: &str) -> Result<(u32, u32), ParseError> {
    let invalid = || ParseError::InvalidNumber {
        field: "device",
        value: token.to_owned(),
    };
    let (major, minor) = token.split_once(':').ok_or_else(invalid)?;
    let major = u32::from_str_radix(major, 16).map_err(|_| invalid())?;
    let minor = u32::from_str_radix(minor, 16).map_err(|_| invalid())?;
    Ok((major, minor))
}

/// The pathname column, when the remainder of the line holds a filesystem
/// path. A trailing `(deleted)` marker is stripped but the path is kept:
/// an unlinked artifact still mapped into the process is still evidence.
fn parse_pathname(rest: &str) -> Option<PathBuf> {
    let rest = rest.trim();
    if !rest.starts_with('/') {
        return None;
    }
    let path = rest.strip_suffix(" (deleted)").unwrap_or(rest);
    Some(PathBuf::from(path))
}
