//! Mip chain generation and packing into a sampled Bevy `Image`.

use bevy::asset::RenderAssetUsages;
use bevy::image::{ImageAddressMode, ImageFilterMode, ImageSampler, ImageSamplerDescriptor};
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use constants::texture::RGBA8_BYTES;
use image::RgbaImage;
use image::imageops::{self, FilterType};

use super::error::AtlasError;

/// Levels in a full chain down to 1×1.
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    let largest = width.max(height);
    if largest == 0 {
        return 0;
    }
    u32::BITS - largest.leading_zeros()
}

fn level_extent(base: u32, level: u32) -> u32 {
    (base >> level).max(1)
}

/// Base image followed by successively halved levels.
pub fn build_mip_chain(base: RgbaImage) -> Vec<RgbaImage> {
    let (width, height) = base.dimensions();
    let count = mip_level_count(width, height);
    let mut levels = Vec::with_capacity(count as usize);
    levels.push(base);

    for level in 1..count {
        let Some(previous) = levels.last() else {
            break;
        };
        let next = imageops::resize(
            previous,
            level_extent(width, level),
            level_extent(height, level),
            FilterType::Triangle,
        );
        levels.push(next);
    }
    levels
}

/// Bytes taken by a full RGBA8 chain for a `width × height` base.
pub fn estimate_rgba8_mip_chain(width: u32, height: u32) -> u64 {
    (0..mip_level_count(width, height))
        .map(|level| {
            u64::from(level_extent(width, level))
                * u64::from(level_extent(height, level))
                * RGBA8_BYTES
        })
        .sum()
}

/// Packs a mip chain into one repeat-sampled, trilinear-filtered image.
pub fn create_texture_with_mips(levels: &[RgbaImage]) -> Result<Image, AtlasError> {
    let Some(base) = levels.first() else {
        return Err(AtlasError::TextureCreation("empty mip chain".into()));
    };
    let (width, height) = base.dimensions();
    if width == 0 || height == 0 {
        return Err(AtlasError::TextureCreation("zero-sized base level".into()));
    }

    let mut data = Vec::with_capacity(estimate_rgba8_mip_chain(width, height) as usize);
    for (level, image) in levels.iter().enumerate() {
        let expected = (
            level_extent(width, level as u32),
            level_extent(height, level as u32),
        );
        if image.dimensions() != expected {
            return Err(AtlasError::TextureCreation(format!(
                "mip level {level} is {:?}, expected {expected:?}",
                image.dimensions()
            )));
        }
        data.extend_from_slice(image.as_raw());
    }

    let mut texture = Image::new_uninit(
        Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::default(),
    );
    texture.data = Some(data);
    texture.texture_descriptor.mip_level_count = levels.len() as u32;
    texture.sampler = ImageSampler::Descriptor(ImageSamplerDescriptor {
        address_mode_u: ImageAddressMode::Repeat,
        address_mode_v: ImageAddressMode::Repeat,
        mag_filter: ImageFilterMode::Linear,
        min_filter: ImageFilterMode::Linear,
        mipmap_filter: ImageFilterMode::Linear,
        ..default()
    });
    Ok(texture)
}
