// Project team auto-generation: greedy role filling over the store traits.

pub mod allocator;
pub mod handlers;
