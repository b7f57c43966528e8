/// Position of an index relative to the closed range `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeIndexRelationship {
    Before,
    Start,
    Within,
    End,
    After,
}

/// The 13 relations of Allen's interval algebra between a server range `s`
/// and a client range `c`, both closed. Each variant reads as "s <relation>
/// c", e.g. `Precedes` means that `s` ends before `c` starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeRangeRelationship {
    Precedes,
    PrecededBy,
    Meets,
    MetBy,
    Overlaps,
    OverlappedBy,
    Starts,
    StartedBy,
    Contains,
    ContainedBy,
    Finishes,
    FinishedBy,
    EqualTo,
}

/// Classifies `index` against the closed range `[start, end]`. When the range
/// is a single point, `Start` takes precedence over `End`.
#[must_use]
pub fn range_index_relationship(start: usize, end: usize, index: usize) -> RangeIndexRelationship {
    debug_assert!(start <= end, "Range start ({start}) must not exceed its end ({end})");

    if index < start {
        RangeIndexRelationship::Before
    } else if index == start {
        RangeIndexRelationship::Start
    } else if index < end {
        RangeIndexRelationship::Within
    } else if index == end {
        RangeIndexRelationship::End
    } else {
        RangeIndexRelationship::After
    }
}

/// Classifies the closed range `[s_start, s_end]` against `[c_start, c_end]`.
/// Ranges sharing a single boundary element `Meet`.
#[must_use]
pub fn range_range_relationship(
    s_start: usize,
    s_end: usize,
    c_start: usize,
    c_end: usize,
) -> RangeRangeRelationship {
    debug_assert!(s_start <= s_end, "Server range is inverted");
    debug_assert!(c_start <= c_end, "Client range is inverted");

    match s_start.cmp(&c_start) {
        std::cmp::Ordering::Equal => match s_end.cmp(&c_end) {
            std::cmp::Ordering::Equal => RangeRangeRelationship::EqualTo,
            std::cmp::Ordering::Less => RangeRangeRelationship::Starts,
            std::cmp::Ordering::Greater => RangeRangeRelationship::StartedBy,
        },
        std::cmp::Ordering::Greater => {
            if s_start > c_end {
                RangeRangeRelationship::PrecededBy
            } else if s_end == c_end {
                RangeRangeRelationship::Finishes
            } else if s_end < c_end {
                RangeRangeRelationship::ContainedBy
            } else if s_start == c_end {
                RangeRangeRelationship::MetBy
            } else {
                RangeRangeRelationship::OverlappedBy
            }
        }
        std::cmp::Ordering::Less => {
            if s_end < c_start {
                RangeRangeRelationship::Precedes
            } else if s_end == c_end {
                RangeRangeRelationship::FinishedBy
            } else if s_end > c_end {
                RangeRangeRelationship::Contains
            } else if s_end == c_start {
                RangeRangeRelationship::Meets
            } else {
                RangeRangeRelationship::Overlaps
            }
        }
    }
}
