//! One-record-per-line text codec.
//!
//! A resource is an ordered sequence of encoded lines, preceded by a single
//! comment header describing the field layout. Decoding is best-effort by
//! design: blank lines, `#` comments, and malformed lines are skipped rather
//! than failing the whole decode, because the store offers no transactional
//! guarantee stronger than whole-file replace.

/// A record kind with a fixed, ordered, one-line textual encoding.
///
/// Ids are unique within a kind's resource (not across kinds) and are never
/// reclaimed; the store assigns `max(existing) + 1` at creation time.
///
/// Implementations must uphold round-trip fidelity:
/// `decode_line(&r.encode_line()) == Some(r)` for every representable `r`.
/// Field values containing the kind's separator are not representable.
pub trait Record: Sized {
    /// Display name of the kind, used in diagnostics.
    const KIND: &'static str;

    /// Comment line written at the top of a saved resource.
    const HEADER: &'static str;

    /// Field delimiter within an encoded line.
    const SEPARATOR: char;

    /// Per-kind unique identifier.
    fn id(&self) -> u32;

    /// Encode to a single line, without the trailing newline.
    fn encode_line(&self) -> String;

    /// Decode a single non-comment, non-blank line.
    ///
    /// Returns `None` for lines with too few fields or unparsable scalars;
    /// the caller skips those.
    fn decode_line(line: &str) -> Option<Self>;
}

/// Encode a sequence as full resource contents: header, then one line each.
pub fn encode_all<R: Record>(records: &[R]) -> String {
    let mut out = String::new();
    out.push_str(R::HEADER);
    out.push('\n');
    for record in records {
        out.push_str(&record.encode_line());
        out.push('\n');
    }
    out
}

/// Decode full resource contents into an ordered sequence.
///
/// Skips blank lines, `#` comment lines, and lines `decode_line` rejects.
/// Never fails: garbage in the resource costs those lines, nothing more.
pub fn decode_all<R: Record>(contents: &str) -> Vec<R> {
    let mut records = Vec::new();
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match R::decode_line(line) {
            Some(record) => records.push(record),
            None => log::warn!("skipping malformed {} line: {:?}", R::KIND, line),
        }
    }
    records
}

/// Next id for a new record: `1` when empty, else `max(existing) + 1`.
///
/// Not concurrency-safe on its own; callers racing on the same resource must
/// hold the exclusive lock around the whole load-mutate-save cycle.
pub fn next_id<R: Record>(records: &[R]) -> u32 {
    records.iter().map(Record::id).max().map_or(1, |max| max + 1)
}
