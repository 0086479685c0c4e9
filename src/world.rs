//! World dimensions shared by the height and ore passes.

/// Total number of block layers in a column (`y` in `0..WORLD_HEIGHT`)
pub const WORLD_HEIGHT: i32 = 256;

/// Water surface level; the erosion and peaks/valleys math is relative to it
pub const SEA_LEVEL: i32 = 64;

/// Horizontal size of a chunk in blocks (chunks are `CHUNK_SIZE × WORLD_HEIGHT × CHUNK_SIZE`)
pub const CHUNK_SIZE: usize = 16;

/// Lowest height a column may be generated at
pub const MIN_SURFACE: i32 = 1;

/// Clamp a height into the valid surface range `[1, world_height - 1]`.
pub fn clamp_surface(height: i32, world_height: i32) -> i32 {
    height.clamp(MIN_SURFACE, world_height - 1)
}

/// World-space coordinate of the first block column of a chunk.
pub fn chunk_origin(chunk_coord: i32) -> i32 {
    chunk_coord * CHUNK_SIZE as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_surface() {
        assert_eq!(clamp_surface(-40, WORLD_HEIGHT), 1);
        assert_eq!(clamp_surface(0, WORLD_HEIGHT), 1);
        assert_eq!(clamp_surface(100, WORLD_HEIGHT), 100);
        assert_eq!(clamp_surface(9000, WORLD_HEIGHT), WORLD_HEIGHT - 1);
    }

    #[test]
    fn test_chunk_origin_negative() {
        assert_eq!(chunk_origin(0), 0);
        assert_eq!(chunk_origin(2), 32);
        assert_eq!(chunk_origin(-1), -16);
    }
}
