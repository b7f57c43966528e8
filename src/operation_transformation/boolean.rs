use super::{TransformResult, conflict_resolution::resolve_value_clash};
use crate::DiscreteOperation;

pub(super) fn set_set(s: DiscreteOperation, c: DiscreteOperation) -> TransformResult {
    resolve_value_clash(s, c)
}
