//! Category Allocation
//!
//! Distributes a block's bit budget across its regions by assigning each
//! region a quantization category. Regions are visited in an explicit
//! priority order (higher power first, lower region index first on ties);
//! each takes the finest category it can afford while still leaving room for
//! the cheapest coded category in every region after it.
//!
//! The decoder runs the same function on the transmitted power buckets, so
//! the result depends only on `(buckets, bit_budget)`.

use crate::types::Category;

/// Result of allocating a bit budget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    /// Category per region, in spectral order
    pub categories: Vec<Category>,
    /// Bits consumed by the chosen categories
    pub bits_used: u32,
    /// Budget left over
    pub bits_unused: u32,
    /// The budget could not cover the cheapest coded category everywhere
    pub degraded: bool,
}

/// Regions sorted by descending bucket, ascending region index on ties
pub fn priority_order(buckets: &[usize]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..buckets.len()).collect();
    order.sort_by(|&a, &b| buckets[b].cmp(&buckets[a]).then(a.cmp(&b)));
    order
}

/// Bits needed to code every region at the cheapest coded category
pub fn minimum_budget(regions: usize) -> u64 {
    u64::from(Category::CHEAPEST_CODED.expected_bits()) * regions as u64
}

/// Assign a category to each region
///
/// Never fails: a budget below [`minimum_budget`] sends every region to the
/// fallback category, and budget beyond what the finest categories need is
/// reported as unused.
pub fn allocate(buckets: &[usize], bit_budget: u32) -> Allocation {
    let regions = buckets.len();
    let mut categories = vec![Category::FALLBACK; regions];

    if (bit_budget as u64) < minimum_budget(regions) {
        if regions > 0 {
            tracing::warn!(
                "bit budget {} below minimum {} for {} regions, coding nothing",
                bit_budget,
                minimum_budget(regions),
                regions
            );
        }
        return Allocation {
            categories,
            bits_used: 0,
            bits_unused: bit_budget,
            degraded: regions > 0,
        };
    }

    let floor_cost = u64::from(Category::CHEAPEST_CODED.expected_bits());
    let coded = &Category::ALL[..=Category::CHEAPEST_CODED.index()];
    let mut remaining = u64::from(bit_budget);
    let mut finest_allowed = Category::FINEST;

    for (rank, &region) in priority_order(buckets).iter().enumerate() {
        let reserve = floor_cost * (regions - rank - 1) as u64;
        let chosen = coded[finest_allowed.index()..]
            .iter()
            .copied()
            .find(|c| u64::from(c.expected_bits()) + reserve <= remaining)
            .unwrap_or(Category::CHEAPEST_CODED);

        remaining = remaining.saturating_sub(u64::from(chosen.expected_bits()));
        categories[region] = chosen;
        finest_allowed = chosen;
    }

    let bits_unused = remaining as u32;
    let bits_used = bit_budget - bits_unused;
    tracing::debug!(
        "allocated {} of {} bits across {} regions ({} unused)",
        bits_used,
        bit_budget,
        regions,
        bits_unused
    );

    Allocation {
        categories,
        bits_used,
        bits_unused,
        degraded: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indices(allocation: &Allocation) -> Vec<usize> {
        allocation.categories.iter().map(|c| c.index()).collect()
    }

    #[test]
    fn test_priority_order_ties_by_region() {
        assert_eq!(priority_order(&[10, 30, 30, 5, 30]), vec![1, 2, 4, 0, 3]);
        assert!(priority_order(&[]).is_empty());
    }

    #[test]
    fn test_insufficient_budget_falls_back() {
        let allocation = allocate(&[40, 30, 20], 47);
        assert!(allocation.degraded);
        assert_eq!(indices(&allocation), vec![7, 7, 7]);
        assert_eq!(allocation.bits_used, 0);
        assert_eq!(allocation.bits_unused, 47);
    }

    #[test]
    fn test_exact_minimum_budget() {
        let allocation = allocate(&[40, 30, 20], 48);
        assert!(!allocation.degraded);
        assert_eq!(indices(&allocation), vec![6, 6, 6]);
        assert_eq!(allocation.bits_used, 48);
        assert_eq!(allocation.bits_unused, 0);
    }

    #[test]
    fn test_excess_budget_reported() {
        let allocation = allocate(&[40, 30, 20], 1000);
        assert_eq!(indices(&allocation), vec![0, 0, 0]);
        assert_eq!(allocation.bits_used, 156);
        assert_eq!(allocation.bits_unused, 844);
    }

    #[test]
    fn test_higher_power_gets_finer_category() {
        // 52 for region 1, then 16 + 16 reserved
        let allocation = allocate(&[20, 40, 30], 84);
        assert_eq!(indices(&allocation), vec![6, 0, 6]);

        let allocation = allocate(&[20, 40, 30], 100);
        // region 1: 52 + 32 <= 100, region 2: 29 + 16 <= 48, region 0: 16 <= 19
        assert_eq!(indices(&allocation), vec![6, 0, 4]);
        assert_eq!(allocation.bits_used, 97);
        assert_eq!(allocation.bits_unused, 3);
    }

    #[test]
    fn test_tie_favours_lower_region_index() {
        let allocation = allocate(&[30, 30], 68);
        assert_eq!(indices(&allocation), vec![0, 6]);
    }

    #[test]
    fn test_empty_block() {
        let allocation = allocate(&[], 100);
        assert!(allocation.categories.is_empty());
        assert!(!allocation.degraded);
        assert_eq!(allocation.bits_unused, 100);
    }
}
