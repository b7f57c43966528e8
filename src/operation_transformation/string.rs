//! Transformation functions for pairs of string operations targeting the same
//! string. Indices and lengths are counted in characters.

use log::debug;

use super::{
    TransformResult,
    conflict_resolution::{both_no_op, client_wins, indices, resolve_value_clash, server_wins},
};
use crate::{
    DiscreteOperation,
    utils::range_relationship::{RangeRangeRelationship, range_range_relationship},
};

pub(super) fn insert_insert(s: DiscreteOperation, c: DiscreteOperation) -> TransformResult {
    let (s_index, c_index) = indices(&s, &c)?;

    if s_index <= c_index {
        let offset = s.text_len() as isize;
        Ok((s, c.with_shifted_index(offset)))
    } else {
        let offset = c.text_len() as isize;
        Ok((s.with_shifted_index(offset), c))
    }
}

pub(super) fn insert_remove(s: DiscreteOperation, c: DiscreteOperation) -> TransformResult {
    let (insert, remove) = insert_against_remove(s, c)?;
    Ok((insert, remove))
}

pub(super) fn remove_insert(s: DiscreteOperation, c: DiscreteOperation) -> TransformResult {
    let (insert, remove) = insert_against_remove(c, s)?;
    Ok((remove, insert))
}

/// Transforms an insert and a concurrent remove of the same string against
/// each other, returning `(insert', remove')`. Text inserted into a removed
/// span is removed too.
fn insert_against_remove(insert: DiscreteOperation, remove: DiscreteOperation) -> TransformResult {
    let (insert_index, remove_index) = indices(&insert, &remove)?;
    let insert_len = insert.text_len();
    let remove_len = remove.text_len();

    if insert_index <= remove_index {
        Ok((insert, remove.with_shifted_index(insert_len as isize)))
    } else if insert_index >= remove_index + remove_len {
        Ok((insert.with_shifted_index(-(remove_len as isize)), remove))
    } else {
        let offset = insert_index - remove_index;
        let removed = remove.text().unwrap_or_default();
        let inserted = insert.text().unwrap_or_default();

        let text = removed
            .chars()
            .take(offset)
            .chain(inserted.chars())
            .chain(removed.chars().skip(offset))
            .collect::<String>();

        debug!("{insert} is inside of the span removed by {remove}");
        Ok((insert.with_no_op(), remove.with_text(text)))
    }
}

/// Each side keeps removing only the characters that the other side has not
/// removed yet. The spans are compared as closed ranges of character indices.
#[allow(clippy::too_many_lines)]
pub(super) fn remove_remove(s: DiscreteOperation, c: DiscreteOperation) -> TransformResult {
    let (s_index, c_index) = indices(&s, &c)?;
    let s_len = s.text_len();
    let c_len = c.text_len();

    if s_len == 0 || c_len == 0 {
        return Ok((s, c));
    }

    let s_text: Vec<char> = s.text().unwrap_or_default().chars().collect();
    let c_text: Vec<char> = c.text().unwrap_or_default().chars().collect();

    let s_end = s_index + s_len - 1;
    let c_end = c_index + c_len - 1;

    match range_range_relationship(s_index, s_end, c_index, c_end) {
        RangeRangeRelationship::Precedes => Ok((s, c.with_shifted_index(-(s_len as isize)))),
        RangeRangeRelationship::PrecededBy => Ok((s.with_shifted_index(-(c_len as isize)), c)),
        RangeRangeRelationship::Meets | RangeRangeRelationship::Overlaps => {
            let overlap = s_end - c_index + 1;
            Ok((
                s.with_text(collect(&s_text[..s_len - overlap])),
                c.with_index(s_index).with_text(collect(&c_text[overlap..])),
            ))
        }
        RangeRangeRelationship::MetBy | RangeRangeRelationship::OverlappedBy => {
            let overlap = c_end - s_index + 1;
            Ok((
                s.with_index(c_index).with_text(collect(&s_text[overlap..])),
                c.with_text(collect(&c_text[..c_len - overlap])),
            ))
        }
        RangeRangeRelationship::Starts => {
            let c = c.with_text(collect(&c_text[s_len..]));
            Ok((s.with_no_op(), c))
        }
        RangeRangeRelationship::StartedBy => {
            let s = s.with_text(collect(&s_text[c_len..]));
            Ok((s, c.with_no_op()))
        }
        RangeRangeRelationship::Contains => {
            let offset = c_index - s_index;
            let text = [&s_text[..offset], &s_text[offset + c_len..]].concat();
            Ok((s.with_text(collect(&text)), c.with_no_op()))
        }
        RangeRangeRelationship::ContainedBy => {
            let offset = s_index - c_index;
            let text = [&c_text[..offset], &c_text[offset + s_len..]].concat();
            Ok((s.with_no_op(), c.with_text(collect(&text))))
        }
        RangeRangeRelationship::Finishes => {
            let c = c.with_text(collect(&c_text[..c_len - s_len]));
            Ok((s.with_no_op(), c))
        }
        RangeRangeRelationship::FinishedBy => {
            let s = s.with_text(collect(&s_text[..s_len - c_len]));
            Ok((s, c.with_no_op()))
        }
        RangeRangeRelationship::EqualTo => both_no_op(s, c),
    }
}

fn collect(chars: &[char]) -> String { chars.iter().collect() }

pub(super) fn set_overwrites(s: DiscreteOperation, c: DiscreteOperation) -> TransformResult {
    server_wins(s, c)
}

pub(super) fn overwritten_by_set(s: DiscreteOperation, c: DiscreteOperation) -> TransformResult {
    client_wins(s, c)
}

pub(super) fn set_set(s: DiscreteOperation, c: DiscreteOperation) -> TransformResult {
    resolve_value_clash(s, c)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use crate::{DiscreteOperation, Operation, Path, transform};

    fn insert(index: usize, text: &str) -> DiscreteOperation {
        DiscreteOperation::string_insert(Path::root(), index, text)
    }

    fn remove(index: usize, text: &str) -> DiscreteOperation {
        DiscreteOperation::string_remove(Path::root(), index, text)
    }

    fn set(text: &str) -> DiscreteOperation { DiscreteOperation::string_set(Path::root(), text) }

    fn assert_transforms(
        s: DiscreteOperation,
        c: DiscreteOperation,
        expected_s: DiscreteOperation,
        expected_c: DiscreteOperation,
    ) {
        let (s, c) = transform(s.into(), c.into()).unwrap();
        assert_eq!((s, c), (Operation::from(expected_s), Operation::from(expected_c)));
    }

    #[test_case(insert(1, "ab"), insert(2, "x"), insert(1, "ab"), insert(4, "x"); "S-II-1")]
    #[test_case(insert(2, "ab"), insert(2, "x"), insert(2, "ab"), insert(4, "x"); "S-II-2")]
    #[test_case(insert(3, "ab"), insert(2, "xyz"), insert(6, "ab"), insert(2, "xyz"); "S-II-3")]
    #[test_case(insert(1, "ab"), remove(1, "cd"), insert(1, "ab"), remove(3, "cd"); "S-IR-1")]
    #[test_case(insert(5, "ab"), remove(1, "cd"), insert(3, "ab"), remove(1, "cd"); "S-IR-2")]
    #[test_case(insert(2, "XY"), remove(1, "bcd"), insert(2, "XY").with_no_op(), remove(1, "bXYcd"); "S-IR-3")]
    #[test_case(insert(1, "ab"), set("new"), insert(1, "ab").with_no_op(), set("new"); "S-IS-1")]
    fn test_insert(
        s: DiscreteOperation,
        c: DiscreteOperation,
        expected_s: DiscreteOperation,
        expected_c: DiscreteOperation,
    ) {
        assert_transforms(s, c, expected_s, expected_c);
    }

    #[test_case(remove(1, "cd"), insert(1, "ab"), remove(3, "cd"), insert(1, "ab"); "S-RI-1")]
    #[test_case(remove(1, "cd"), insert(3, "ab"), remove(1, "cd"), insert(1, "ab"); "S-RI-2")]
    #[test_case(remove(1, "bcd"), insert(3, "XY"), remove(1, "bcXYd"), insert(3, "XY").with_no_op(); "S-RI-3")]
    #[test_case(remove(1, "b"), set("new"), remove(1, "b").with_no_op(), set("new"); "S-RS-1")]
    fn test_remove(
        s: DiscreteOperation,
        c: DiscreteOperation,
        expected_s: DiscreteOperation,
        expected_c: DiscreteOperation,
    ) {
        assert_transforms(s, c, expected_s, expected_c);
    }

    // Removals from "abcdefgh".
    #[test_case(remove(0, "ab"), remove(4, "ef"), remove(0, "ab"), remove(2, "ef"); "S-RR-1")]
    #[test_case(remove(4, "ef"), remove(0, "ab"), remove(2, "ef"), remove(0, "ab"); "S-RR-2")]
    #[test_case(remove(0, "abc"), remove(2, "cde"), remove(0, "ab"), remove(0, "de"); "S-RR-3")]
    #[test_case(remove(2, "cde"), remove(0, "abc"), remove(0, "de"), remove(0, "ab"); "S-RR-4")]
    #[test_case(remove(0, "abcd"), remove(2, "cdef"), remove(0, "ab"), remove(0, "ef"); "S-RR-5")]
    #[test_case(remove(2, "cdef"), remove(0, "abcd"), remove(0, "ef"), remove(0, "ab"); "S-RR-6")]
    #[test_case(remove(1, "bc"), remove(1, "bcde"), remove(1, "bc").with_no_op(), remove(1, "de"); "S-RR-7")]
    #[test_case(remove(1, "bcde"), remove(1, "bc"), remove(1, "de"), remove(1, "bc").with_no_op(); "S-RR-8")]
    #[test_case(remove(0, "abcdef"), remove(2, "cd"), remove(0, "abef"), remove(2, "cd").with_no_op(); "S-RR-9")]
    #[test_case(remove(2, "cd"), remove(0, "abcdef"), remove(2, "cd").with_no_op(), remove(0, "abef"); "S-RR-10")]
    #[test_case(remove(3, "de"), remove(1, "bcde"), remove(3, "de").with_no_op(), remove(1, "bc"); "S-RR-11")]
    #[test_case(remove(1, "bcde"), remove(3, "de"), remove(1, "bc"), remove(3, "de").with_no_op(); "S-RR-12")]
    #[test_case(remove(1, "bc"), remove(1, "bc"), remove(1, "bc").with_no_op(), remove(1, "bc").with_no_op(); "S-RR-13")]
    #[test_case(remove(1, ""), remove(0, "ab"), remove(1, ""), remove(0, "ab"); "empty removal")]
    fn test_remove_remove(
        s: DiscreteOperation,
        c: DiscreteOperation,
        expected_s: DiscreteOperation,
        expected_c: DiscreteOperation,
    ) {
        assert_transforms(s, c, expected_s, expected_c);
    }

    #[test_case(set("new"), insert(1, "x"), set("new"), insert(1, "x").with_no_op(); "S-SI-1")]
    #[test_case(set("new"), remove(1, "x"), set("new"), remove(1, "x").with_no_op(); "S-SR-1")]
    #[test_case(set("new"), set("new"), set("new").with_no_op(), set("new").with_no_op(); "S-SS-1")]
    #[test_case(set("new"), set("old"), set("new"), set("old").with_no_op(); "S-SS-2")]
    fn test_set(
        s: DiscreteOperation,
        c: DiscreteOperation,
        expected_s: DiscreteOperation,
        expected_c: DiscreteOperation,
    ) {
        assert_transforms(s, c, expected_s, expected_c);
    }

    #[test]
    fn test_multibyte_characters() {
        assert_transforms(
            remove(0, "こんに"),
            remove(2, "にちは"),
            remove(0, "こん"),
            remove(0, "ちは"),
        );
    }
}
