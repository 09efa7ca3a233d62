//! Basic PDF types used throughout the library.

mod object_id;

pub use object_id::ObjectId;
