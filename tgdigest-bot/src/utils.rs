use chrono::DateTime;
use chrono_tz::Tz;

// Telegram caps messages at 4096 characters; 4000 leaves room for the part
// label on multi-chunk digests.
pub(crate) const MAX_CHUNK_LENGTH: usize = 4000;

/// Cut a digest into fixed-size delivery chunks. Short text comes back as a
/// single untouched fragment; concatenating the fragments in order restores
/// the input exactly.
pub(crate) fn split_digest(text: &str) -> Vec<String> {
    if text.chars().count() <= MAX_CHUNK_LENGTH {
        return vec![text.to_string()];
    }

    let chars: Vec<char> = text.chars().collect();

    chars
        .chunks(MAX_CHUNK_LENGTH)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

pub(crate) fn format_part(index: usize, total: usize, text: &str) -> String {
    format!("Часть {index}/{total}:\n\n{text}")
}

pub(crate) fn format_instant(instant: DateTime<Tz>) -> String {
    instant.format("%H:%M %d.%m").to_string()
}
