use std::fmt;

/// Why a glyph atlas or mip-mapped texture could not be produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AtlasError {
    /// A grid or cell dimension of zero.
    InvalidDimensions {
        columns: u32,
        rows: u32,
        cell_size: u32,
    },
    TextureTooLarge {
        width: u64,
        height: u64,
        max: u32,
    },
    /// The pixel data could not be packed into a GPU image.
    TextureCreation(String),
    EmptyAlphabet,
}

impl fmt::Display for AtlasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AtlasError::InvalidDimensions {
                columns,
                rows,
                cell_size,
            } => write!(
                f,
                "invalid atlas dimensions: {columns}x{rows} cells of {cell_size}px"
            ),
            AtlasError::TextureTooLarge { width, height, max } => {
                write!(f, "atlas texture {width}x{height} exceeds the {max}px limit")
            }
            AtlasError::TextureCreation(reason) => write!(f, "texture creation failed: {reason}"),
            AtlasError::EmptyAlphabet => write!(f, "no glyphs available to fill the atlas"),
        }
    }
}

impl std::error::Error for AtlasError {}
