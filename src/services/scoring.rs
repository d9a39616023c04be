/// Placement normalized to [0, 1]: first place is 1.0, last place is 0.0,
/// linear in between. A solo field has nothing to compare against and scores
/// a neutral 0.5.
///
/// Callers guarantee `1 <= rank <= field_size`; out of range input yields a
/// value outside [0, 1] rather than an error.
pub fn placement_score(rank: u32, field_size: u32) -> f64 {
    if field_size <= 1 {
        return 0.5;
    }

    (field_size as f64 - rank as f64) / (field_size as f64 - 1.0)
}

/// Weight of a competition by its size. A 64-player field weighs 6.0, a
/// head-to-head 1.0.
pub fn size_weight(field_size: u32) -> f64 {
    if field_size <= 1 {
        return 0.5;
    }

    (field_size.max(2) as f64).log2()
}
