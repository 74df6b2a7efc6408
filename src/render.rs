use crate::constants::{
    BLOOM_INTENSITY, BLOOM_SMOOTHING, BLOOM_SPREAD, BLOOM_THRESHOLD, CAMERA_EYE, CAMERA_FOVY_DEG,
    CAMERA_ZFAR, CAMERA_ZNEAR, CLEAR_RGBA, MAX_ROCKETS, NOISE_OPACITY, POINT_SCALE,
    VIGNETTE_DARKNESS, VIGNETTE_OFFSET,
};
use countdown_core::{CameraShake, ParticleVertex};
use glam::{Mat4, Vec3};
use web_sys as web;

mod helpers;
mod particles;
mod post;
mod targets;

use particles::{create_particle_resources, instance_offset, ParticleResources, ParticleUniforms};
use post::{blit, create_post_resources, PostBindGroups, PostResources, PostUniforms};
use targets::{RenderTargets, SCENE_FORMAT};

/// Where each particle source lives in the shared instance buffer:
/// `[pool slots | rockets | embers]`.
#[derive(Clone, Copy, Debug)]
struct InstanceLayout {
    pool: usize,
    rockets: usize,
    embers: usize,
}

impl InstanceLayout {
    fn total(&self) -> usize {
        self.pool + self.rockets + self.embers
    }
    fn rockets_start(&self) -> usize {
        self.pool
    }
    fn embers_start(&self) -> usize {
        self.pool + self.rockets
    }
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    particles: ParticleResources,
    post: PostResources,
    targets: RenderTargets,
    post_groups: PostBindGroups,
    shake: CameraShake,
    layout: InstanceLayout,
    // unused rocket slots are padded with retired vertices each frame
    rocket_scratch: Vec<ParticleVertex>,
    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl<'a> GpuState<'a> {
    pub async fn new(
        canvas: &'a web::HtmlCanvasElement,
        pool_capacity: usize,
        ember_count: usize,
    ) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        // Premultiplied alpha lets the page background show through the clear.
        let alpha_mode = caps
            .alpha_modes
            .iter()
            .copied()
            .find(|m| *m == wgpu::CompositeAlphaMode::PreMultiplied)
            .or_else(|| caps.alpha_modes.first().copied())
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let layout = InstanceLayout {
            pool: pool_capacity,
            rockets: MAX_ROCKETS,
            embers: ember_count,
        };
        // Particles draw into the HDR scene target; only the composite touches the surface.
        let particles = create_particle_resources(&device, SCENE_FORMAT, layout.total());
        let post = create_post_resources(&device, format);
        let targets = RenderTargets::new(&device, width, height);
        let post_groups = post.bind_targets(&device, &targets);
        log::info!(
            "[gpu] format={:?} alpha={:?} instances={} ({} pool, {} rockets, {} embers)",
            format,
            alpha_mode,
            layout.total(),
            layout.pool,
            layout.rockets,
            layout.embers
        );

        let [r, g, b, a] = CLEAR_RGBA;
        let mut state = Self {
            surface,
            device,
            queue,
            config,
            particles,
            post,
            targets,
            post_groups,
            shake: CameraShake::default(),
            layout,
            rocket_scratch: Vec::with_capacity(MAX_ROCKETS),
            width,
            height,
            clear_color: wgpu::Color { r, g, b, a },
        };
        state.upload_rockets(&[]);
        Ok(state)
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.targets.recreate(&self.device, width, height);
            self.post_groups = self.post.bind_targets(&self.device, &self.targets);
        }
    }

    /// Re-upload every pool slot. Callers only do this when the pool is dirty.
    pub fn upload_pool(&self, vertices: &[ParticleVertex]) {
        let n = vertices.len().min(self.layout.pool);
        self.queue.write_buffer(
            &self.particles.instance_buffer,
            0,
            bytemuck::cast_slice(&vertices[..n]),
        );
    }

    pub fn upload_rockets(&mut self, rockets: &[ParticleVertex]) {
        let n = rockets.len().min(self.layout.rockets);
        self.rocket_scratch.clear();
        self.rocket_scratch.extend_from_slice(&rockets[..n]);
        self.rocket_scratch
            .resize(self.layout.rockets, ParticleVertex::RETIRED);
        self.queue.write_buffer(
            &self.particles.instance_buffer,
            instance_offset(self.layout.rockets_start()),
            bytemuck::cast_slice(&self.rocket_scratch),
        );
    }

    pub fn upload_embers(&self, embers: &[ParticleVertex]) {
        let n = embers.len().min(self.layout.embers);
        if n == 0 {
            return;
        }
        self.queue.write_buffer(
            &self.particles.instance_buffer,
            instance_offset(self.layout.embers_start()),
            bytemuck::cast_slice(&embers[..n]),
        );
    }

    fn camera_uniforms(&self, brightness: f32, elapsed_sec: f32) -> ParticleUniforms {
        let aspect = self.width as f32 / self.height.max(1) as f32;
        // sway rotates the camera in its own frame, so its inverse lands on the left
        let sway = Mat4::from_quat(self.shake.rotation(elapsed_sec).inverse());
        let view = sway * Mat4::look_at_rh(CAMERA_EYE, Vec3::ZERO, Vec3::Y);
        let proj = Mat4::perspective_rh(
            CAMERA_FOVY_DEG.to_radians(),
            aspect,
            CAMERA_ZNEAR,
            CAMERA_ZFAR,
        );
        ParticleUniforms {
            view: view.to_cols_array_2d(),
            proj: proj.to_cols_array_2d(),
            params: [POINT_SCALE, brightness.max(0.0), 0.0, 0.0],
        }
    }

    fn post_uniforms(elapsed_sec: f32) -> PostUniforms {
        PostUniforms {
            bloom: [BLOOM_THRESHOLD, BLOOM_SMOOTHING, BLOOM_INTENSITY, BLOOM_SPREAD],
            grade: [VIGNETTE_OFFSET, VIGNETTE_DARKNESS, NOISE_OPACITY, elapsed_sec],
        }
    }

    /// Particles into the scene target, then bright pass, blur (h, v) and
    /// composite onto the surface.
    pub fn render(&mut self, brightness: f32, elapsed_sec: f32) -> Result<(), wgpu::SurfaceError> {
        let uniforms = self.camera_uniforms(brightness, elapsed_sec);
        self.queue.write_buffer(
            &self.particles.uniform_buffer,
            0,
            bytemuck::bytes_of(&uniforms),
        );
        self.queue.write_buffer(
            &self.post.uniform_buffer,
            0,
            bytemuck::bytes_of(&Self::post_uniforms(elapsed_sec)),
        );

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("particles_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.scene_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.particles.pipeline);
            rpass.set_bind_group(0, &self.particles.bind_group, &[]);
            rpass.set_vertex_buffer(0, self.particles.instance_buffer.slice(..));
            rpass.draw(0..6, 0..self.particles.instance_count);
        }

        let (post, groups, targets) = (&self.post, &self.post_groups, &self.targets);
        blit(
            &mut encoder,
            "bright_pass",
            &targets.bloom_a_view,
            &post.bright_pipeline,
            &groups.scene,
            None,
        );
        blit(
            &mut encoder,
            "blur_h",
            &targets.bloom_b_view,
            &post.blur_h_pipeline,
            &groups.bloom_a,
            None,
        );
        blit(
            &mut encoder,
            "blur_v",
            &targets.bloom_a_view,
            &post.blur_v_pipeline,
            &groups.bloom_b,
            None,
        );
        blit(
            &mut encoder,
            "composite",
            &view,
            &post.composite_pipeline,
            &groups.scene,
            Some(&groups.bloom_a_composite),
        );

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
