//! Keep-the-best ranking for a movie's media variants.
//!
//! One comparator, [`keep_order`], encodes the whole policy: widest first,
//! ties broken by combined size, unknown width last. Callers that only care
//! about bulk can use [`compare_size`] on its own.

use std::cmp::Ordering;

use dupex_model::{MediaVariant, Movie};

/// Compare by combined part size, largest first.
pub fn compare_size(a: &MediaVariant, b: &MediaVariant) -> Ordering {
    b.total_size().cmp(&a.total_size())
}

/// Compare by width, widest first. A variant without a known width ranks
/// below any variant with one.
pub fn compare_width(a: &MediaVariant, b: &MediaVariant) -> Ordering {
    match (a.width, b.width) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// The keep policy: width decides, size breaks ties.
///
/// Variants equal under both keys compare `Equal`; [`rank`] resolves those
/// through sort stability, so backend order decides.
pub fn keep_order(a: &MediaVariant, b: &MediaVariant) -> Ordering {
    compare_width(a, b).then_with(|| compare_size(a, b))
}

/// Rank a movie's variants best-first, returning indices into `movie.media`.
///
/// The sort is stable: full ties keep their backend order, which makes the
/// pass deterministic for a given listing response.
pub fn rank(movie: &Movie) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..movie.media.len()).collect();
    indices.sort_by(|&a, &b| keep_order(&movie.media[a], &movie.media[b]));
    indices
}

/// Split a movie's variants into the one to keep and the rest.
///
/// Returns `None` for a movie with no variants. A single-variant movie keeps
/// it and discards nothing.
pub fn split_keep(movie: &Movie) -> Option<(usize, Vec<usize>)> {
    let ranked = rank(movie);
    let (keep, discard) = ranked.split_first()?;
    Some((*keep, discard.to_vec()))
}
