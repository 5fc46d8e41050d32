//! Library half of the md2bbcode binary, exposed so the transforms can be unit tested.

pub mod transforms;
