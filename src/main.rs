// main.rs: 窗口事件循环，驱动视角控制器并在标题栏显示当前视角

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // 在 Release 模式下隐藏控制台窗口

use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;

use log::{info, warn};
use panorama_view::{
    angle::rad_to_deg, Config, Controller, Gallery, GyroPermission, GyroToggle, InputHandler,
    ViewSnapshot,
};
use winit::{
    dpi::LogicalSize,
    event::*,
    event_loop::{ControlFlow, EventLoop},
    window::{Fullscreen, Window, WindowBuilder},
};

struct Args {
    config: Option<PathBuf>,
    images: Vec<PathBuf>,
}

/// `panorama-view [--config settings.json] [image ...]`
fn parse_args() -> Args {
    let mut config = None;
    let mut images = Vec::new();
    let mut it = std::env::args().skip(1);
    while let Some(a) = it.next() {
        if a == "--config" {
            config = it.next().map(PathBuf::from);
        } else {
            images.push(PathBuf::from(a));
        }
    }
    Args { config, images }
}

/// 桌面端 winit 没有设备方向传感器
fn query_orientation_permission() -> GyroPermission {
    GyroPermission::Unavailable
}

fn update_title(window: &Window, view: &ViewSnapshot, gallery: &Gallery<PathBuf>) {
    let mut title = format!(
        "Panorama | Yaw: {:.1}° | Pitch: {:.1}° | FOV: {:.1}°",
        rad_to_deg(view.yaw),
        rad_to_deg(view.pitch),
        view.fov
    );
    if let (Some((i, n)), Some(path)) = (gallery.position(), gallery.current()) {
        title.push_str(&format!(" | {i} / {n} {}", path.display()));
    }
    window.set_title(&title);
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args = parse_args();
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    info!("{config:?}");

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title("Panorama")
        .with_inner_size(LogicalSize::new(1280, 720))
        .build(&event_loop)?;

    let mut controller = Controller::new(config, Gallery::new(args.images));
    let mut input = InputHandler::new(Instant::now());
    let mut is_fullscreen = false;

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;

        match event {
            Event::WindowEvent { event, .. } => {
                let before = controller.navigator().position();
                if input.handle_event(&mut controller, &event, Instant::now()) {
                    // 切换图片后重置视角
                    if controller.navigator().position() != before {
                        controller.reset_view();
                        if let Some(path) = controller.navigator().current() {
                            info!("switched to {}", path.display());
                        }
                    }
                    return;
                }

                match event {
                    WindowEvent::CloseRequested => {
                        *control_flow = ControlFlow::Exit;
                    }

                    WindowEvent::DroppedFile(path) => {
                        // 拖入的图片追加到列表末尾并立即显示
                        info!("added {}", path.display());
                        let gallery = controller.navigator_mut();
                        gallery.extend([path]);
                        let last = gallery.len() - 1;
                        if gallery.select(last) {
                            controller.reset_view();
                        }
                    }

                    WindowEvent::KeyboardInput { input: key, .. } => {
                        if key.state != ElementState::Pressed {
                            return;
                        }
                        match key.virtual_keycode {
                            Some(VirtualKeyCode::G) => {
                                match controller.toggle_gyro(query_orientation_permission()) {
                                    GyroToggle::Enabled => info!("gyroscope on"),
                                    GyroToggle::Disabled => info!("gyroscope off"),
                                    GyroToggle::PermissionDenied => {
                                        warn!("gyroscope permission is required")
                                    }
                                    GyroToggle::Unsupported => {
                                        warn!("this device has no gyroscope")
                                    }
                                }
                            }
                            Some(VirtualKeyCode::R) => controller.recalibrate_gyro(),
                            Some(VirtualKeyCode::Home) => controller.reset_view(),
                            Some(VirtualKeyCode::PageUp) => {
                                if controller.navigator_mut().select(0) {
                                    controller.reset_view();
                                }
                            }
                            Some(VirtualKeyCode::PageDown) => {
                                let gallery = controller.navigator_mut();
                                let last = gallery.len().saturating_sub(1);
                                if gallery.select(last) {
                                    controller.reset_view();
                                }
                            }
                            Some(VirtualKeyCode::Left) => {
                                if controller.navigator_mut().prev() {
                                    controller.reset_view();
                                }
                            }
                            Some(VirtualKeyCode::Right) => {
                                if controller.navigator_mut().next() {
                                    controller.reset_view();
                                }
                            }
                            Some(VirtualKeyCode::F11) => {
                                is_fullscreen = !is_fullscreen;
                                if is_fullscreen {
                                    window.set_fullscreen(Some(Fullscreen::Borderless(None)));
                                } else {
                                    window.set_fullscreen(None);
                                }
                            }
                            _ => {}
                        }
                    }

                    _ => {}
                }
            }

            Event::RedrawRequested(_) => {
                let view = controller.tick();
                update_title(&window, &view, controller.navigator());
            }

            Event::MainEventsCleared => {
                window.request_redraw();
            }

            _ => {}
        }
    });
}
