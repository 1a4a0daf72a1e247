//! Substring lookup over the record store.

use crate::lookup::store::{Record, RecordStore};

/// Longest key considered. Longer input is silently clamped, never
/// rejected.
pub const KEY_MAX: usize = 5;

/// Strips the line terminator and clamps the key to [`KEY_MAX`] bytes.
///
/// Only a trailing `\n` is stripped; a CR in front of it stays part of the
/// key. The clamp backs off to a char boundary rather than splitting a
/// code point.
pub fn clamp_key(line: &str) -> &str {
    let key = line.strip_suffix('\n').unwrap_or(line);
    truncate_to(key, KEY_MAX)
}

fn truncate_to(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Records whose name or message contains `key`, in store order.
///
/// Matching is case-sensitive. The empty key matches every record.
pub fn query<'a>(
    store: &'a RecordStore,
    key: &'a str,
) -> impl Iterator<Item = (usize, &'a Record)> + 'a {
    store
        .scan()
        .filter(move |(_, rec)| rec.name.contains(key) || rec.msg.contains(key))
}

/// One protocol result line: index right-justified in four columns, fields
/// wrapped in literal braces.
pub fn format_match(index: usize, record: &Record) -> String {
    format!("{:>4}: {{{}}} said {{{}}}\n", index, record.name, record.msg)
}
