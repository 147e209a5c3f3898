use rand::seq::SliceRandom;
use rand::Rng;

/// Pick the item shown in the featured banner.
///
/// Uniform over every index in `[0, len)`; `None` only for an empty row.
pub fn pick_featured<'a, T, R: Rng + ?Sized>(items: &'a [T], rng: &mut R) -> Option<&'a T> {
    items.choose(rng)
}
