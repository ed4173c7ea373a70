/// Where a block sits in the chain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    /// Block height, zero for the genesis block.
    pub height: usize,
    /// Median time of the preceding blocks, in Unix seconds.
    pub median_time_past: u32,
}

impl Position {
    /// Creates a position.
    pub const fn new(height: usize, median_time_past: u32) -> Self {
        Self {
            height,
            median_time_past,
        }
    }
}
