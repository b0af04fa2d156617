/// `min(ceil(0.6 * total), floor(0.7 * total))` in exact integer arithmetic.
///
/// The result is a point count, not a percentage of the maximum.
pub fn passing_score(total_points: u32) -> u32 {
    let total = u64::from(total_points);
    let at_least = (total * 6).div_ceil(10);
    let at_most = total * 7 / 10;
    // at_most <= total, so it always fits back into u32
    at_least.min(at_most) as u32
}
