// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Render helper: draws the uploaded patches, overlays and egui.

use crate::{
    geometry::{LineVertex, MarkerInstance, PatchInstance},
    gpu::CURVE_SAMPLES,
    viewport::Viewport,
};
use egui_wgpu::wgpu;

/// Outcome of one render attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStatus {
    Presented,
    Skipped,
    OutOfMemory,
}

/// Draw the geometry already uploaded to `vp.gpu`, then the HUD on top.
pub fn render_frame(
    vp: &mut Viewport,
    paint_jobs: &[egui::epaint::ClippedPrimitive],
    textures_delta: egui::TexturesDelta,
    screen_desc: &egui_wgpu::ScreenDescriptor,
) -> RenderStatus {
    let gpu = &mut vp.gpu;

    let frame = match gpu.surface.get_current_texture() {
        Ok(f) => f,
        Err(wgpu::SurfaceError::Lost) => {
            gpu.resize(egui_winit::winit::dpi::PhysicalSize::new(
                gpu.config.width,
                gpu.config.height,
            ));
            match gpu.surface.get_current_texture() {
                Ok(f) => f,
                Err(_) => return RenderStatus::Skipped,
            }
        }
        Err(wgpu::SurfaceError::OutOfMemory) => return RenderStatus::OutOfMemory,
        Err(_) => return RenderStatus::Skipped,
    };
    let view = frame
        .texture
        .create_view(&wgpu::TextureViewDescriptor::default());
    let (color_view, resolve_view) = if let Some(msaa) = &gpu.msaa_view {
        (msaa, Some(&view))
    } else {
        (&view, None)
    };

    let mut encoder = gpu
        .device
        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("main-encoder"),
        });

    {
        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("main"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: color_view,
                resolve_target: resolve_view,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            occlusion_query_set: None,
            timestamp_writes: None,
        });
        rpass.set_bind_group(0, &gpu.bind_group, &[]);

        // control polygon under the curves
        if gpu.lines.len > 0 {
            rpass.set_pipeline(&gpu.pipelines.lines);
            rpass.set_vertex_buffer(
                0,
                gpu.lines
                    .buf
                    .slice(..gpu.lines.used_bytes::<LineVertex>()),
            );
            rpass.draw(0..gpu.lines.len, 0..1);
        }

        if gpu.patches.len > 0 {
            rpass.set_pipeline(&gpu.pipelines.patch);
            rpass.set_vertex_buffer(
                0,
                gpu.patches
                    .buf
                    .slice(..gpu.patches.used_bytes::<PatchInstance>()),
            );
            rpass.draw(0..CURVE_SAMPLES, 0..gpu.patches.len);
        }

        if gpu.markers.len > 0 {
            rpass.set_pipeline(&gpu.pipelines.markers);
            rpass.set_vertex_buffer(
                0,
                gpu.markers
                    .buf
                    .slice(..gpu.markers.used_bytes::<MarkerInstance>()),
            );
            rpass.draw(0..6, 0..gpu.markers.len);
        }
    }

    let cmd_main = encoder.finish();

    let egui_renderer = &mut vp.egui_renderer;
    let cmd_ui = {
        let mut egui_encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui-encoder"),
            });

        for (id, delta) in textures_delta.set {
            egui_renderer.update_texture(&gpu.device, &gpu.queue, id, &delta);
        }
        egui_renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
            &mut egui_encoder,
            paint_jobs,
            screen_desc,
        );
        {
            let rpass = egui_encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            let mut rpass = rpass.forget_lifetime();
            egui_renderer.render(&mut rpass, paint_jobs, screen_desc);
        }
        for id in textures_delta.free {
            egui_renderer.free_texture(&id);
        }

        egui_encoder.finish()
    };

    gpu.queue.submit([cmd_main, cmd_ui]);
    frame.present();
    RenderStatus::Presented
}
