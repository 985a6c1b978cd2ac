//! GPU hand-off for the engraving texture.
//!
//! The host binds the view/sampler pair as the roughness, displacement and
//! emissive input of its transmissive material. The texture is created once
//! at a fixed resolution and refreshed in place from the live canvas, so no
//! GPU resources are reallocated during a session.

use crate::data_structures::canvas::Canvas;

/// Fixed-size GPU mirror of the live canvas.
#[derive(Debug)]
pub struct EngravingTexture {
    #[allow(unused)]
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    queue: wgpu::Queue,
}

impl EngravingTexture {
    /// Create the texture and its view/sampler.
    ///
    /// # Arguments
    ///
    /// * `resolution` is the edge length in pixels, matching the canvas
    /// * `label` is used as a debug label for the GPU resource
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue, resolution: u32, label: &str) -> Self {
        let size = wgpu::Extent3d {
            width: resolution.max(1),
            height: resolution.max(1),
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Linear,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
            queue: queue.clone(),
        }
    }

    /// Push the full canvas contents to the GPU.
    ///
    /// Called by the animator after every tick that repainted the live
    /// canvas. The canvas resolution must match the texture's.
    pub fn upload(&self, canvas: &Canvas) {
        let resolution = canvas.resolution();
        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                aspect: wgpu::TextureAspect::All,
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
            },
            canvas.image().as_raw(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * resolution),
                rows_per_image: Some(resolution),
            },
            wgpu::Extent3d {
                width: resolution,
                height: resolution,
                depth_or_array_layers: 1,
            },
        );
    }
}
