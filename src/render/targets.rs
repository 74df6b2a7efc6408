use super::helpers::create_color_texture;

pub(crate) const SCENE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;
pub(crate) const BLOOM_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;

/// Offscreen color targets for the post chain.
///
/// - `scene` holds the particles at full resolution in HDR.
/// - `bloom_a`/`bloom_b` are half-res ping-pong buffers for the bright pass and blur.
///
/// Textures are kept alongside their views so they live as long as the bind groups
/// built from them.
pub(crate) struct RenderTargets {
    _scene_tex: wgpu::Texture,
    pub(crate) scene_view: wgpu::TextureView,
    _bloom_a: wgpu::Texture,
    pub(crate) bloom_a_view: wgpu::TextureView,
    _bloom_b: wgpu::Texture,
    pub(crate) bloom_b_view: wgpu::TextureView,
}

impl RenderTargets {
    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let (_scene_tex, scene_view) =
            create_color_texture(device, "scene_tex", width, height, SCENE_FORMAT);
        let (bw, bh) = bloom_size(width, height);
        let (_bloom_a, bloom_a_view) = create_color_texture(device, "bloom_a", bw, bh, BLOOM_FORMAT);
        let (_bloom_b, bloom_b_view) = create_color_texture(device, "bloom_b", bw, bh, BLOOM_FORMAT);
        Self {
            _scene_tex,
            scene_view,
            _bloom_a,
            bloom_a_view,
            _bloom_b,
            bloom_b_view,
        }
    }

    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        *self = Self::new(device, width, height);
    }
}

fn bloom_size(width: u32, height: u32) -> (u32, u32) {
    ((width.max(1) / 2).max(1), (height.max(1) / 2).max(1))
}
