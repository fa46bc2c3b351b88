use crate::domain::booking::Booking;
use crate::domain::slot::MatchKind;
use crate::domain::utils::headcount::Headcount;

/// A pool member chosen by the search.
#[derive(Debug, Clone, Copy)]
pub struct Pick<'a> {
    /// Index into the pool slice given to [`find_combination`].
    pub position: usize,
    pub booking: &'a Booking,
}

/// One or two bookings proposed for a slot, borrowed from the pool.
#[derive(Debug, Clone, Copy)]
pub enum Combination<'a> {
    Single(Pick<'a>),
    Pair(Pick<'a>, Pick<'a>),
}

impl<'a> Combination<'a> {
    /// Picks in commit order ("Booking 1" first).
    pub fn picks(&self) -> Vec<Pick<'a>> {
        match *self {
            Combination::Single(pick) => vec![pick],
            Combination::Pair(first, second) => vec![first, second],
        }
    }

    pub fn bookings(&self) -> Vec<&'a Booking> {
        self.picks().iter().map(|p| p.booking).collect()
    }

    /// Pool positions of the bookings, in commit order.
    pub fn positions(&self) -> Vec<usize> {
        self.picks().iter().map(|p| p.position).collect()
    }
}

/// Result of a successful search.
#[derive(Debug, Clone, Copy)]
pub struct CombinationMatch<'a> {
    pub combination: Combination<'a>,

    /// Summed headcount of the combination.
    pub total: Headcount,

    pub kind: MatchKind,
}

/// Searches `pool` for the best single booking or pair of bookings for `target`.
///
/// Totals are preferred in this order: exactly `target`, `target + 1`, then
/// `target - 1`, `target - 2`, ... down to 1. For the chosen total a single
/// booking is preferred over a pair; among equal candidates the earliest in
/// pool order is taken (pairs in lexicographic `(i, j)` order). Pairs are only
/// built from bookings strictly smaller than the total.
///
/// Returns `None` for a zero target, an empty pool, or a pool with nothing
/// between 1 and `target + 1` people that can be combined.
///
/// The pool is only read; committing a match is the caller's job. The cost is
/// quadratic in the pool size and independent of the target value.
pub fn find_combination<'a>(target: Headcount, pool: &[&'a Booking]) -> Option<CombinationMatch<'a>> {
    if target == 0 {
        return None;
    }

    // Bookings above target + 1 can never be part of a match, and neither can
    // empty ones: alone they miss every positive total, and their partner
    // would have to equal the total, which pairs exclude.
    let ceiling = target.saturating_add(1);
    let candidates: Vec<Pick<'a>> = pool
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, b)| b.person_count > 0 && b.person_count <= ceiling)
        .map(|(position, booking)| Pick { position, booking })
        .collect();

    let total = best_total(target, &candidates)?;
    let kind = MatchKind::classify(target, total)?;
    let combination = find_single(total, &candidates).or_else(|| find_pair(total, &candidates))?;

    Some(CombinationMatch { combination, total, kind })
}

/// Most preferred total reachable by one candidate or two distinct candidates.
fn best_total(target: Headcount, candidates: &[Pick<'_>]) -> Option<Headcount> {
    let target = u64::from(target);
    let overfill_allowed = target < u64::from(Headcount::MAX);
    let mut overfill = false;
    let mut best_under = 0u64;

    for (i, first) in candidates.iter().enumerate() {
        let a = u64::from(first.booking.person_count);
        let sums = std::iter::once(a).chain(candidates[i + 1..].iter().map(|second| a + u64::from(second.booking.person_count)));

        for sum in sums {
            if sum == target {
                return Headcount::try_from(sum).ok();
            }
            if sum == target + 1 && overfill_allowed {
                overfill = true;
            } else if sum < target {
                best_under = best_under.max(sum);
            }
        }
    }

    if overfill {
        Headcount::try_from(target + 1).ok()
    } else if best_under > 0 {
        Headcount::try_from(best_under).ok()
    } else {
        None
    }
}

fn find_single<'a>(total: Headcount, candidates: &[Pick<'a>]) -> Option<Combination<'a>> {
    candidates.iter().copied().find(|p| p.booking.person_count == total).map(Combination::Single)
}

fn find_pair<'a>(total: Headcount, candidates: &[Pick<'a>]) -> Option<Combination<'a>> {
    for (i, first) in candidates.iter().copied().enumerate() {
        if first.booking.person_count >= total {
            continue;
        }
        let needed = total - first.booking.person_count;
        if let Some(second) = candidates[i + 1..].iter().copied().find(|p| p.booking.person_count == needed) {
            return Some(Combination::Pair(first, second));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::utils::id::BookingId;

    fn pool_of(counts: &[(&str, Headcount)]) -> Vec<Booking> {
        counts.iter().enumerate().map(|(row, (id, count))| Booking::new(BookingId::new(*id), row, *count)).collect()
    }

    fn ids(found: &CombinationMatch) -> Vec<String> {
        found.combination.bookings().iter().map(|b| b.id.to_string()).collect()
    }

    #[test]
    fn first_pair_in_pool_order_is_chosen() {
        let bookings = pool_of(&[("A", 5), ("B", 3), ("C", 3)]);
        let pool: Vec<&Booking> = bookings.iter().collect();

        let found = find_combination(8, &pool).unwrap();

        assert_eq!(ids(&found), vec!["A", "B"]);
        assert_eq!(found.total, 8);
        assert_eq!(found.kind, MatchKind::Exact);
    }

    #[test]
    fn single_beats_pair_for_the_same_variant() {
        let bookings = pool_of(&[("A", 2), ("B", 4), ("C", 6)]);
        let pool: Vec<&Booking> = bookings.iter().collect();

        let found = find_combination(6, &pool).unwrap();

        assert_eq!(ids(&found), vec!["C"]);
    }

    #[test]
    fn overfill_by_one_beats_underfill() {
        let bookings = pool_of(&[("A", 4), ("B", 6)]);
        let pool: Vec<&Booking> = bookings.iter().collect();

        let found = find_combination(5, &pool).unwrap();

        assert_eq!(ids(&found), vec!["B"]);
        assert_eq!(found.kind, MatchKind::Overfill);
    }

    #[test]
    fn overfill_pair_is_tried_before_underfill_single() {
        let bookings = pool_of(&[("A", 4), ("B", 3), ("C", 3)]);
        let pool: Vec<&Booking> = bookings.iter().collect();

        // 5 and 6 as singles fail, no pair sums to 5, B + C = 6.
        let found = find_combination(5, &pool).unwrap();

        assert_eq!(ids(&found), vec!["B", "C"]);
        assert_eq!(found.kind, MatchKind::Overfill);
    }

    #[test]
    fn smallest_underfill_wins() {
        let bookings = pool_of(&[("A", 4)]);
        let pool: Vec<&Booking> = bookings.iter().collect();

        let found = find_combination(5, &pool).unwrap();

        assert_eq!(ids(&found), vec!["A"]);
        assert_eq!(found.kind, MatchKind::Underfill { shortfall: 1 });
    }

    #[test]
    fn underfill_prefers_single_at_same_shortfall() {
        let bookings = pool_of(&[("A", 3), ("B", 3), ("C", 6)]);
        let pool: Vec<&Booking> = bookings.iter().collect();

        // A + B and C both make 6; the single is checked first.
        let found = find_combination(7, &pool).unwrap();

        assert_eq!(ids(&found), vec!["C"]);
        assert_eq!(found.kind, MatchKind::Underfill { shortfall: 1 });
    }

    #[test]
    fn underfill_falls_back_to_pair() {
        let bookings = pool_of(&[("A", 1), ("B", 6), ("C", 7)]);
        let pool: Vec<&Booking> = bookings.iter().collect();

        // Nothing makes 10, 11 or 9; A + C makes 8.
        let found = find_combination(10, &pool).unwrap();

        assert_eq!(ids(&found), vec!["A", "C"]);
        assert_eq!(found.kind, MatchKind::Underfill { shortfall: 2 });
    }

    #[test]
    fn empty_pool_has_no_match() {
        assert!(find_combination(6, &[]).is_none());
    }

    #[test]
    fn oversized_and_empty_bookings_never_match() {
        let bookings = pool_of(&[("A", 9), ("B", 0), ("C", 0)]);
        let pool: Vec<&Booking> = bookings.iter().collect();

        assert!(find_combination(6, &pool).is_none());
    }

    #[test]
    fn zero_target_has_no_match() {
        let bookings = pool_of(&[("A", 1)]);
        let pool: Vec<&Booking> = bookings.iter().collect();

        assert!(find_combination(0, &pool).is_none());
    }

    #[test]
    fn pair_cannot_reuse_the_same_booking() {
        let bookings = pool_of(&[("A", 3)]);
        let pool: Vec<&Booking> = bookings.iter().collect();

        // 3 + 3 would be exact for 6, but there is only one booking of 3.
        let found = find_combination(6, &pool).unwrap();

        assert_eq!(ids(&found), vec!["A"]);
        assert_eq!(found.kind, MatchKind::Underfill { shortfall: 3 });
    }

    #[test]
    fn repeated_calls_return_the_same_match() {
        let bookings = pool_of(&[("A", 2), ("B", 5), ("C", 2), ("D", 3)]);
        let pool: Vec<&Booking> = bookings.iter().collect();

        let first = find_combination(7, &pool).unwrap();
        let second = find_combination(7, &pool).unwrap();

        assert_eq!(first.combination.positions(), second.combination.positions());
        assert_eq!(first.kind, second.kind);
        assert!(bookings.iter().all(|b| !b.is_allocated()));
    }

    #[test]
    fn positions_point_into_the_given_pool() {
        let bookings = pool_of(&[("A", 9), ("B", 0), ("C", 2), ("D", 4)]);
        let pool: Vec<&Booking> = bookings.iter().collect();

        let found = find_combination(6, &pool).unwrap();

        assert_eq!(found.combination.positions(), vec![2, 3]);
        assert_eq!(ids(&found), vec!["C", "D"]);
    }

    #[test]
    fn huge_targets_are_searched_without_walking_every_shortfall() {
        let bookings = pool_of(&[("A", 1), ("B", 3)]);
        let pool: Vec<&Booking> = bookings.iter().collect();

        let found = find_combination(Headcount::MAX, &pool).unwrap();

        assert_eq!(ids(&found), vec!["A", "B"]);
        assert_eq!(found.total, 4);
        assert_eq!(found.kind, MatchKind::Underfill { shortfall: Headcount::MAX - 4 });
    }

    #[test]
    fn pair_sums_above_the_headcount_range_do_not_overflow() {
        let big = Headcount::MAX / 2 + 1;
        let bookings = pool_of(&[("A", big), ("B", big), ("C", 7)]);
        let pool: Vec<&Booking> = bookings.iter().collect();

        // A + B exceeds the headcount range; A alone is the closest fit.
        let found = find_combination(big + 1, &pool).unwrap();

        assert_eq!(ids(&found), vec!["A"]);
        assert_eq!(found.kind, MatchKind::Underfill { shortfall: 1 });
    }
}
