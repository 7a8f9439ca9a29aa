//! Tag derivation over the free-form `tags` string of notes.
//!
//! There is no tag table: the tag vocabulary is whatever tokens currently
//! appear across all notes, computed on demand.

use std::collections::BTreeSet;

use tracing::trace;

use crate::models::Note;

/// Collect the sorted, deduplicated set of tag tokens across `notes`.
///
/// Each note's tags are split on `,` and trimmed. Empty tokens and notes
/// without tags contribute nothing. Comparison is exact (case-sensitive),
/// so `Work` and `work` are two tags.
pub fn collect_unique_tags<'a, I>(notes: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Note>,
{
    let mut unique = BTreeSet::new();
    for note in notes {
        for token in note.tag_tokens() {
            trace!(note_id = note.id, tag = token, "Collected tag token");
            unique.insert(token.to_string());
        }
    }
    unique.into_iter().collect()
}
