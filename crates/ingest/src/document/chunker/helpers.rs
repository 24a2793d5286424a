//! Text splitting utilities used by the splitter.

/// Length in characters; all chunk sizes are measured this way.
pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Byte offset where the last `overlap` characters before `end` begin.
/// Clamps to the start of the text when fewer characters precede `end`.
pub(crate) fn overlap_start(text: &str, end: usize, overlap: usize) -> usize {
    if overlap == 0 {
        return end;
    }
    text[..end]
        .char_indices()
        .rev()
        .nth(overlap - 1)
        .map_or(0, |(byte, _)| byte)
}

/// Recursively cut `text` into contiguous pieces no longer than `budget`
/// characters, trying `separators` from coarsest to finest.
///
/// Separators stay attached to the end of the piece they terminate, so the
/// pieces concatenate back to `text` exactly. A piece that no remaining
/// separator can subdivide is kept whole, even when oversized.
pub(crate) fn split_pieces<'a>(
    text: &'a str,
    separators: &[String],
    budget: usize,
    out: &mut Vec<&'a str>,
) {
    if text.is_empty() {
        return;
    }
    if char_len(text) <= budget {
        out.push(text);
        return;
    }

    let Some(pos) = separators.iter().position(|sep| text.contains(sep.as_str())) else {
        out.push(text);
        return;
    };

    let finer = &separators[pos + 1..];
    for piece in text.split_inclusive(separators[pos].as_str()) {
        split_pieces(piece, finer, budget, out);
    }
}
