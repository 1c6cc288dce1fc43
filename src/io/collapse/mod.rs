//! COLLAPS input deck (`COLL.inp`): the group flux that the collapse step
//! folds with the cross-section library.

pub mod writer;

pub use writer::write;
