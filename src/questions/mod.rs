//! Interview question bank
//!
//! A bank is an immutable, ordered list of questions split into a
//! text-answer subset (the first `K`) and a video-answer subset (the rest).

mod bank;

pub use bank::{Question, QuestionBank, QuestionKind, Subset};
