use super::helpers::make_post_pipeline;
use super::targets::{RenderTargets, BLOOM_FORMAT};

pub(crate) static POST_WGSL: &str = include_str!("../../shaders/post.wgsl");

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PostUniforms {
    // x: threshold, y: threshold smoothing, z: intensity, w: blur spread
    pub(crate) bloom: [f32; 4],
    // x: vignette offset, y: vignette darkness, z: noise opacity, w: time
    pub(crate) grade: [f32; 4],
}

pub(crate) struct PostResources {
    bgl0: wgpu::BindGroupLayout, // tex+sampler+uniform
    bgl1: wgpu::BindGroupLayout, // tex+sampler
    sampler: wgpu::Sampler,
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) bright_pipeline: wgpu::RenderPipeline,
    pub(crate) blur_h_pipeline: wgpu::RenderPipeline,
    pub(crate) blur_v_pipeline: wgpu::RenderPipeline,
    pub(crate) composite_pipeline: wgpu::RenderPipeline,
}

/// Bind groups that reference the offscreen targets. Rebuilt whenever the
/// targets are recreated.
pub(crate) struct PostBindGroups {
    pub(crate) scene: wgpu::BindGroup,
    pub(crate) bloom_a: wgpu::BindGroup,
    pub(crate) bloom_b: wgpu::BindGroup,
    // composite's second input, the blurred bloom
    pub(crate) bloom_a_composite: wgpu::BindGroup,
}

fn texture_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            multisampled: false,
            view_dimension: wgpu::TextureViewDimension::D2,
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
        },
        count: None,
    }
}

fn sampler_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
        count: None,
    }
}

pub(crate) fn create_post_resources(
    device: &wgpu::Device,
    swap_format: wgpu::TextureFormat,
) -> PostResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("post_shader"),
        source: wgpu::ShaderSource::Wgsl(POST_WGSL.into()),
    });
    let bgl0 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("post_bgl0"),
        entries: &[
            texture_entry(0),
            sampler_entry(1),
            wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
        ],
    });
    let bgl1 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("post_bgl1"),
        entries: &[texture_entry(0), sampler_entry(1)],
    });
    let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("linear_sampler"),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Linear,
        ..Default::default()
    });
    let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("post_uniforms"),
        size: std::mem::size_of::<PostUniforms>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let pl_single = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("pl_post_0"),
        bind_group_layouts: &[&bgl0],
        push_constant_ranges: &[],
    });
    let pl_composite = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("pl_post_comp"),
        bind_group_layouts: &[&bgl0, &bgl1],
        push_constant_ranges: &[],
    });
    // Blur direction is fixed per pipeline, so one uniform write covers every pass.
    let bright_pipeline =
        make_post_pipeline(device, &pl_single, &shader, "fs_bright", BLOOM_FORMAT, None);
    let blur_h_pipeline =
        make_post_pipeline(device, &pl_single, &shader, "fs_blur_h", BLOOM_FORMAT, None);
    let blur_v_pipeline =
        make_post_pipeline(device, &pl_single, &shader, "fs_blur_v", BLOOM_FORMAT, None);
    let composite_pipeline = make_post_pipeline(
        device,
        &pl_composite,
        &shader,
        "fs_composite",
        swap_format,
        Some(wgpu::BlendState::REPLACE),
    );

    PostResources {
        bgl0,
        bgl1,
        sampler,
        uniform_buffer,
        bright_pipeline,
        blur_h_pipeline,
        blur_v_pipeline,
        composite_pipeline,
    }
}

impl PostResources {
    fn source_group(&self, device: &wgpu::Device, label: &str, view: &wgpu::TextureView) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &self.bgl0,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: self.uniform_buffer.as_entire_binding(),
                },
            ],
        })
    }

    pub(crate) fn bind_targets(&self, device: &wgpu::Device, targets: &RenderTargets) -> PostBindGroups {
        let bloom_a_composite = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("bg_bloom_a_comp"),
            layout: &self.bgl1,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&targets.bloom_a_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });
        PostBindGroups {
            scene: self.source_group(device, "bg_scene", &targets.scene_view),
            bloom_a: self.source_group(device, "bg_bloom_a", &targets.bloom_a_view),
            bloom_b: self.source_group(device, "bg_bloom_b", &targets.bloom_b_view),
            bloom_a_composite,
        }
    }
}

pub(crate) fn blit(
    encoder: &mut wgpu::CommandEncoder,
    label: &str,
    target: &wgpu::TextureView,
    pipeline: &wgpu::RenderPipeline,
    bg0: &wgpu::BindGroup,
    bg1: Option<&wgpu::BindGroup>,
) {
    let mut r = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
    });
    r.set_pipeline(pipeline);
    r.set_bind_group(0, bg0, &[]);
    if let Some(g1) = bg1 {
        r.set_bind_group(1, g1, &[]);
    }
    r.draw(0..3, 0..1);
}
