//! Draws a quad with per-vertex colors modulating a sampled texture.
//!
//! A missing or undecodable image is logged and the demo keeps running with
//! whatever texture state the driver provides.

use anyhow::Result;
use log::LevelFilter;
use simple_logger::SimpleLogger;
use snowgl::{DemoWindow, Mesh, ShaderProgram, Texture, VertexLayout, WindowConfig};

const TEXTURE_PATH: &str = "assets/textures/container.png";

const VERTEX_SRC: &str = r#"
#version 330 core
layout (location = 0) in vec3 aPos;
layout (location = 1) in vec3 aColor;
layout (location = 2) in vec2 aTexCoord;

out vec3 ourColor;
out vec2 TexCoord;

void main() {
    gl_Position = vec4(aPos, 1.0);
    ourColor = aColor;
    TexCoord = aTexCoord;
}
"#;

const FRAGMENT_SRC: &str = r#"
#version 330 core
out vec4 FragColor;

in vec3 ourColor;
in vec2 TexCoord;

uniform sampler2D texture1;

void main() {
    FragColor = texture(texture1, TexCoord) * vec4(ourColor, 1.0);
}
"#;

fn main() -> Result<()> {
    SimpleLogger::new().with_level(LevelFilter::Info).init()?;

    let config = WindowConfig::default();
    let (window, event_loop) = DemoWindow::new(&config)?;

    let program = ShaderProgram::from_sources(VERTEX_SRC, FRAGMENT_SRC)?;

    let vertices: [f32; 32] = [
        // positions      colors         texture coords
        0.5, 0.5, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, // top right
        0.5, -0.5, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0, // bottom right
        -0.5, -0.5, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, // bottom left
        -0.5, 0.5, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, // top left
    ];
    let indices: [u32; 6] = [0, 1, 3, 1, 2, 3];

    let mesh = Mesh::upload(
        &vertices,
        Some(&indices),
        &VertexLayout::position_color_texcoord(),
    );

    let texture = match Texture::from_file(TEXTURE_PATH) {
        Ok(texture) => Some(texture),
        Err(e) => {
            log::error!("Failed to load texture: {:#}", e);
            None
        }
    };

    window.run(event_loop, move || {
        if let Some(texture) = &texture {
            texture.bind();
        }
        program.use_program();
        mesh.draw();
    })?;
    Ok(())
}
