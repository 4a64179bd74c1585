//! Typed, bounds-checked views over the raw byte buffers delivered by the scan source.
//!
//! Every read goes through `slice::get`, so an offset, stride or count that disagrees
//! with the buffer length yields fewer elements instead of an out-of-range read.

use bevy::math::Vec3;

const VEC3_BYTES: usize = std::mem::size_of::<[f32; 3]>();

/// A float3 vertex attribute stored with an arbitrary offset and stride.
#[derive(Debug, Clone, Default)]
pub struct GeometrySource {
    data: Vec<u8>,
    count: usize,
    offset: usize,
    stride: usize,
}

impl GeometrySource {
    /// Wraps a raw attribute buffer. Strides shorter than one element are widened to it.
    pub fn new(data: Vec<u8>, count: usize, offset: usize, stride: usize) -> Self {
        Self {
            data,
            count,
            offset,
            stride: stride.max(VEC3_BYTES),
        }
    }

    /// Tightly packed attribute built from vectors.
    pub fn from_vec3s(values: &[Vec3]) -> Self {
        let packed: Vec<[f32; 3]> = values.iter().map(|v| v.to_array()).collect();
        Self::new(
            bytemuck::cast_slice(packed.as_slice()).to_vec(),
            values.len(),
            0,
            VEC3_BYTES,
        )
    }

    /// Number of elements that are both declared and fully present in the buffer.
    pub fn len(&self) -> usize {
        let Some(usable) = self
            .offset
            .checked_add(VEC3_BYTES)
            .and_then(|end| self.data.len().checked_sub(end))
        else {
            return 0;
        };
        let available = usable / self.stride + 1;
        self.count.min(available)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<Vec3> {
        if index >= self.count {
            return None;
        }
        let start = index
            .checked_mul(self.stride)
            .and_then(|o| o.checked_add(self.offset))?;
        let bytes = self.data.get(start..start.checked_add(VEC3_BYTES)?)?;
        let value: [f32; 3] = bytemuck::pod_read_unaligned(bytes);
        Some(Vec3::from_array(value))
    }

    pub fn iter(&self) -> impl Iterator<Item = Vec3> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }
}

/// Byte width of one index in a face buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexWidth {
    U16,
    U32,
}

impl IndexWidth {
    pub fn bytes(self) -> usize {
        match self {
            IndexWidth::U16 => 2,
            IndexWidth::U32 => 4,
        }
    }
}

/// Triangle index buffer in either 16- or 32-bit encoding.
#[derive(Debug, Clone)]
pub struct GeometryElement {
    data: Vec<u8>,
    width: IndexWidth,
    primitive_count: usize,
}

impl GeometryElement {
    pub const INDICES_PER_PRIMITIVE: usize = 3;

    pub fn new(data: Vec<u8>, width: IndexWidth, primitive_count: usize) -> Self {
        Self {
            data,
            width,
            primitive_count,
        }
    }

    pub fn from_u16(indices: &[u16]) -> Self {
        Self::new(
            bytemuck::cast_slice(indices).to_vec(),
            IndexWidth::U16,
            indices.len() / Self::INDICES_PER_PRIMITIVE,
        )
    }

    pub fn from_u32(indices: &[u32]) -> Self {
        Self::new(
            bytemuck::cast_slice(indices).to_vec(),
            IndexWidth::U32,
            indices.len() / Self::INDICES_PER_PRIMITIVE,
        )
    }

    pub fn width(&self) -> IndexWidth {
        self.width
    }

    /// Whole triangles that are present in the buffer.
    pub fn triangle_count(&self) -> usize {
        let stored = self.data.len() / (self.width.bytes() * Self::INDICES_PER_PRIMITIVE);
        self.primitive_count.min(stored)
    }

    pub fn index_count(&self) -> usize {
        self.triangle_count() * Self::INDICES_PER_PRIMITIVE
    }

    /// Indices widened to 32 bits.
    pub fn indices(&self) -> impl Iterator<Item = u32> + '_ {
        let width = self.width.bytes();
        self.data
            .chunks_exact(width)
            .take(self.index_count())
            .map(move |chunk| match width {
                2 => u32::from(bytemuck::pod_read_unaligned::<u16>(chunk)),
                _ => bytemuck::pod_read_unaligned::<u32>(chunk),
            })
    }

    /// Index triples, one per triangle.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        let flat: Vec<u32> = self.indices().collect();
        (0..self.triangle_count()).map(move |t| [flat[t * 3], flat[t * 3 + 1], flat[t * 3 + 2]])
    }
}

impl Default for GeometryElement {
    fn default() -> Self {
        Self::from_u32(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strided_source_skips_interleaved_bytes() {
        // position followed by 4 bytes of padding per vertex
        let mut data = Vec::new();
        for v in [[1.0f32, 2.0, 3.0], [4.0, 5.0, 6.0]] {
            data.extend_from_slice(bytemuck::cast_slice(&v[..]));
            data.extend_from_slice(&[0xAA; 4]);
        }
        let source = GeometrySource::new(data, 2, 0, 16);

        assert_eq!(source.len(), 2);
        assert_eq!(source.get(1), Some(Vec3::new(4.0, 5.0, 6.0)));
        assert_eq!(source.get(2), None);
    }

    #[test]
    fn declared_count_beyond_buffer_is_truncated() {
        let source = GeometrySource::new(vec![0u8; 30], 10, 0, 12);
        assert_eq!(source.len(), 2);
        assert_eq!(source.iter().count(), 2);
        assert_eq!(source.get(5), None);
    }

    #[test]
    fn narrow_indices_widen_to_u32() {
        let element = GeometryElement::from_u16(&[0, 1, 2, 2, 1, 65535]);
        let indices: Vec<u32> = element.indices().collect();

        assert_eq!(element.width(), IndexWidth::U16);
        assert_eq!(element.triangle_count(), 2);
        assert_eq!(indices, vec![0, 1, 2, 2, 1, 65535]);
    }

    #[test]
    fn partial_triangle_is_dropped() {
        let element = GeometryElement::new(
            bytemuck::cast_slice(&[0u32, 1, 2, 3][..]).to_vec(),
            IndexWidth::U32,
            2,
        );
        assert_eq!(element.triangle_count(), 1);
        assert_eq!(element.triangles().collect::<Vec<_>>(), vec![[0, 1, 2]]);
    }
}
