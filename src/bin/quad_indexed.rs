//! Draws an orange quad as two indexed triangles sharing vertices.

use anyhow::Result;
use log::LevelFilter;
use simple_logger::SimpleLogger;
use snowgl::{DemoWindow, Mesh, ShaderProgram, VertexLayout, WindowConfig};

const VERTEX_SRC: &str = r#"
#version 330 core
layout (location = 0) in vec3 aPos;
void main() {
    gl_Position = vec4(aPos.x, aPos.y, aPos.z, 1.0);
}
"#;

const FRAGMENT_SRC: &str = r#"
#version 330 core
out vec4 FragColor;
void main() {
    FragColor = vec4(1.0, 0.5, 0.2, 1.0);
}
"#;

fn main() -> Result<()> {
    SimpleLogger::new().with_level(LevelFilter::Info).init()?;

    let config = WindowConfig::default();
    let (window, event_loop) = DemoWindow::new(&config)?;

    // An invalid program never reaches the render loop.
    let program = ShaderProgram::from_sources(VERTEX_SRC, FRAGMENT_SRC)?;

    let vertices: [f32; 12] = [
        0.5, 0.5, 0.0, // top right
        -0.5, 0.5, 0.0, // top left
        -0.5, -0.5, 0.0, // bottom left
        0.5, -0.5, 0.0, // bottom right
    ];
    let indices: [u32; 6] = [0, 1, 2, 0, 3, 2];

    let mesh = Mesh::upload(&vertices, Some(&indices), &VertexLayout::position());

    window.run(event_loop, move || {
        program.use_program();
        mesh.draw();
    })?;
    Ok(())
}
