// Job catalog and match scoring.
// Implements: posting search over a pluggable source, skill-overlap match
// scoring, and the search endpoint that combines the two.

pub mod handlers;
pub mod matching;
pub mod postings;
pub mod source;
