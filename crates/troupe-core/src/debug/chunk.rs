//! Splitting long messages for line-limited backends

/// Default maximum chunk length, in characters
pub const DEFAULT_MAX_CHUNK_LEN: usize = 4000;

/// Split `message` into emit-sized pieces.
///
/// The message is split on `\n` first, and every line longer than `max_len` characters is
/// cut into consecutive pieces of at most `max_len` characters. Newlines are dropped, and an
/// empty line produces one empty piece, except after a single trailing newline. A `max_len`
/// of zero is treated as one.
pub fn chunk(message: &str, max_len: usize) -> Vec<&str> {
    let max_len = max_len.max(1);
    let mut chunks = Vec::new();

    let body = message.strip_suffix('\n').unwrap_or(message);
    for line in body.split('\n') {
        let mut rest = line;
        loop {
            let end = rest
                .char_indices()
                .nth(max_len)
                .map_or(rest.len(), |(index, _)| index);
            let (piece, tail) = rest.split_at(end);
            chunks.push(piece);
            if tail.is_empty() {
                break;
            }
            rest = tail;
        }
    }

    chunks
}
