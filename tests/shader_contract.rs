//! Shader program contract tests.
//!
//! These need a live OpenGL driver, so they are ignored by default; run them
//! with `cargo test -- --ignored` on a machine with a display.

use glutin::{
    config::ConfigTemplateBuilder,
    context::{ContextApi, ContextAttributesBuilder, GlProfile, Version},
    display::{GetGlDisplay, GlDisplay},
    prelude::*,
};
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::HasRawWindowHandle;
use snowgl::{CompiledShader, Mesh, ShaderKind, ShaderProgram, VertexLayout};
use std::ffi::CString;
use winit::{dpi::LogicalSize, event_loop::EventLoopBuilder, window::WindowBuilder};

const VALID_VERTEX: &str = r#"
#version 330 core
layout (location = 0) in vec3 aPos;
void main() {
    gl_Position = vec4(aPos, 1.0);
}
"#;

const VALID_FRAGMENT: &str = r#"
#version 330 core
out vec4 FragColor;
void main() {
    FragColor = vec4(1.0, 0.5, 0.2, 1.0);
}
"#;

const BROKEN_VERTEX: &str = r#"
#version 330 core
layout (location = 0) in vec3 aPos;
void main() {
    gl_Position = vec4(aPos, 1.0)
}
"#;

// Statically uses a varying the vertex stage never writes, which must fail
// at link time even though both stages compile on their own.
const MISMATCHED_FRAGMENT: &str = r#"
#version 330 core
in vec3 missingVarying;
out vec4 FragColor;
void main() {
    FragColor = vec4(missingVarying, 1.0);
}
"#;

/// Creates a hidden window with a current GL 3.3 core context for the
/// duration of the test process.
fn init_gl_context() {
    let mut builder = EventLoopBuilder::new();
    #[cfg(all(unix, not(target_os = "macos")))]
    {
        use winit::platform::x11::EventLoopBuilderExtX11;
        builder.with_any_thread(true);
    }
    let event_loop = builder.build().unwrap();

    let window_builder = WindowBuilder::new()
        .with_visible(false)
        .with_inner_size(LogicalSize::new(64, 64));

    let template = ConfigTemplateBuilder::new();
    let (window, gl_config) = DisplayBuilder::new()
        .with_window_builder(Some(window_builder))
        .build(&event_loop, template, |configs| {
            configs.reduce(|accum, _| accum).unwrap()
        })
        .unwrap();
    let window = window.unwrap();

    let context_attributes = ContextAttributesBuilder::new()
        .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
        .with_profile(GlProfile::Core)
        .build(Some(window.raw_window_handle()));

    let gl_display = gl_config.display();
    let gl_context =
        unsafe { gl_display.create_context(&gl_config, &context_attributes) }.unwrap();

    let attrs = window.build_surface_attributes(<_>::default());
    let gl_surface = unsafe { gl_display.create_window_surface(&gl_config, &attrs) }.unwrap();
    let gl_context = gl_context.make_current(&gl_surface).unwrap();

    gl::load_with(|symbol| {
        let symbol = CString::new(symbol).unwrap();
        gl_display.get_proc_address(symbol.as_c_str()) as *const _
    });

    // Keep everything alive for the rest of the process.
    std::mem::forget((window, gl_context, gl_surface, event_loop));
}

#[test]
#[ignore = "requires an OpenGL driver and display"]
fn shader_program_contract() {
    init_gl_context();

    valid_pair_links_cleanly();
    broken_vertex_is_flagged_with_log();
    mismatched_stages_fail_to_link();
    program_outlives_deleted_stages_and_renders();
}

fn valid_pair_links_cleanly() {
    let vertex = CompiledShader::compile(VALID_VERTEX, ShaderKind::Vertex).unwrap();
    let fragment = CompiledShader::compile(VALID_FRAGMENT, ShaderKind::Fragment).unwrap();
    assert!(vertex.is_valid());
    assert!(fragment.is_valid());

    let program = ShaderProgram::link(vertex, fragment);
    assert!(program.is_valid());
    assert!(program.log().is_empty());
}

fn broken_vertex_is_flagged_with_log() {
    let vertex = CompiledShader::compile(BROKEN_VERTEX, ShaderKind::Vertex).unwrap();
    assert!(!vertex.is_valid());
    assert!(!vertex.log().is_empty());

    // Linking with a flagged-invalid stage still runs, and must fail.
    let fragment = CompiledShader::compile(VALID_FRAGMENT, ShaderKind::Fragment).unwrap();
    let program = ShaderProgram::link(vertex, fragment);
    assert!(!program.is_valid());

    // The checked path reports the compile failure instead.
    assert!(ShaderProgram::from_sources(BROKEN_VERTEX, VALID_FRAGMENT).is_err());
}

fn mismatched_stages_fail_to_link() {
    let vertex = CompiledShader::compile(VALID_VERTEX, ShaderKind::Vertex).unwrap();
    let fragment = CompiledShader::compile(MISMATCHED_FRAGMENT, ShaderKind::Fragment).unwrap();
    assert!(vertex.is_valid());
    assert!(fragment.is_valid());

    let program = ShaderProgram::link(vertex, fragment);
    assert!(!program.is_valid());
    assert!(!program.log().is_empty());
}

/// Links a program (dropping both stage objects in the process), renders a
/// triangle with it into an offscreen buffer and checks the covered pixels
/// are the shader's literal color and the rest is the clear color.
fn program_outlives_deleted_stages_and_renders() {
    const SIZE: i32 = 64;

    // Stages are deleted inside from_sources once the link has run.
    let program = ShaderProgram::from_sources(VALID_VERTEX, VALID_FRAGMENT).unwrap();

    let vertices: [f32; 9] = [
        -0.8, -0.8, 0.0, //
        0.8, -0.8, 0.0, //
        0.0, 0.8, 0.0,
    ];
    let mesh = Mesh::upload(&vertices, None, &VertexLayout::position());

    let mut fbo = 0;
    let mut color = 0;
    unsafe {
        gl::GenTextures(1, &mut color);
        gl::BindTexture(gl::TEXTURE_2D, color);
        gl::TexImage2D(
            gl::TEXTURE_2D,
            0,
            gl::RGBA8 as i32,
            SIZE,
            SIZE,
            0,
            gl::RGBA,
            gl::UNSIGNED_BYTE,
            std::ptr::null(),
        );
        gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, gl::NEAREST as i32);
        gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, gl::NEAREST as i32);

        gl::GenFramebuffers(1, &mut fbo);
        gl::BindFramebuffer(gl::FRAMEBUFFER, fbo);
        gl::FramebufferTexture2D(
            gl::FRAMEBUFFER,
            gl::COLOR_ATTACHMENT0,
            gl::TEXTURE_2D,
            color,
            0,
        );
        assert_eq!(
            gl::CheckFramebufferStatus(gl::FRAMEBUFFER),
            gl::FRAMEBUFFER_COMPLETE
        );

        gl::Viewport(0, 0, SIZE, SIZE);
        gl::ClearColor(0.2, 0.3, 0.3, 1.0);
        gl::Clear(gl::COLOR_BUFFER_BIT);
    }

    program.use_program();
    mesh.draw();

    let mut pixels = vec![0u8; (SIZE * SIZE * 4) as usize];
    unsafe {
        gl::ReadPixels(
            0,
            0,
            SIZE,
            SIZE,
            gl::RGBA,
            gl::UNSIGNED_BYTE,
            pixels.as_mut_ptr() as *mut _,
        );
        gl::BindFramebuffer(gl::FRAMEBUFFER, 0);
        gl::DeleteFramebuffers(1, &fbo);
        gl::DeleteTextures(1, &color);
    }

    // Well inside the triangle.
    assert_color_eq(pixel(&pixels, 32, 20), [255, 128, 51, 255]);
    // Corner, untouched by the triangle.
    assert_color_eq(pixel(&pixels, 1, 62), [51, 77, 77, 255]);
}

fn pixel(pixels: &[u8], x: i32, y: i32) -> [u8; 4] {
    let i = ((y * 64 + x) * 4) as usize;
    [pixels[i], pixels[i + 1], pixels[i + 2], pixels[i + 3]]
}

fn assert_color_eq(got: [u8; 4], want: [u8; 4]) {
    for (g, w) in got.iter().zip(want.iter()) {
        // One step of float-to-unorm rounding slack.
        assert!(
            (*g as i16 - *w as i16).abs() <= 1,
            "pixel mismatch: got {:?}, want {:?}",
            got,
            want
        );
    }
}
