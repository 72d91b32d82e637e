//! Candidate ordering and Top-K collection.

pub(crate) mod topk;
