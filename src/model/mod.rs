//! Domain model: post records and the block tree a post body is rendered from.

mod block;
pub mod blocks;
pub mod common;
mod post;

pub use block::Block;
pub use blocks::*;
pub use common::*;
pub use post::{Post, PostMetadata, RawRow};
