pub mod array_move_helper;
pub mod range_relationship;
pub mod string_builder;
