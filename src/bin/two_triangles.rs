//! Draws two triangles from separate vertex arrays, one orange and one
//! yellow, using two programs that share the same vertex shader source.

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

const ORANGE_FRAGMENT_SRC: &str = r#"
#version 330 core
out vec4 FragColor;
void main() {
    FragColor = vec4(1.0, 0.5, 0.2, 1.0);
}
"#;

const YELLOW_FRAGMENT_SRC: &str = r#"
#version 330 core
out vec4 FragColor;
void main() {
    FragColor = vec4(1.0, 1.0, 0.0, 1.0);
}
"#;

fn main() -> Result<()> {
    SimpleLogger::new().with_level(LevelFilter::Info).init()?;

    let config = WindowConfig {
        title: "Snow".to_string(),
        clear_color: [0.1, 0.3, 0.4, 1.0],
        ..WindowConfig::default()
    };
    let (window, event_loop) = DemoWindow::new(&config)?;

    let orange = ShaderProgram::from_sources(VERTEX_SRC, ORANGE_FRAGMENT_SRC)?;
    let yellow = ShaderProgram::from_sources(VERTEX_SRC, YELLOW_FRAGMENT_SRC)?;

    let first_triangle: [f32; 9] = [
        0.7, 0.8, 0.0, //
        0.4, 0.3, 0.0, //
        -0.2, -0.2, 0.0,
    ];
    let second_triangle: [f32; 9] = [
        0.4, 0.3, 0.1, //
        0.3, 0.4, 0.1, //
        -0.3, -0.3, 0.1,
    ];

    let layout = VertexLayout::position();
    let first = Mesh::upload(&first_triangle, None, &layout);
    let second = Mesh::upload(&second_triangle, None, &layout);

    window.run(event_loop, move || {
        orange.use_program();
        first.draw();

        yellow.use_program();
        second.draw();
    })?;
    Ok(())
}
