use gl::types::*;
use std::ffi::{CString, NulError};
use std::ptr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("Shader compilation failed: {0}")]
    Compilation(String),
    #[error("Program linking failed: {0}")]
    Linking(String),
    #[error("Null byte in shader source: {0}")]
    Nul(#[from] NulError),
}

/// Pipeline stage a shader object belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderKind {
    Vertex,
    Fragment,
}

impl ShaderKind {
    fn gl_enum(self) -> GLenum {
        match self {
            ShaderKind::Vertex => gl::VERTEX_SHADER,
            ShaderKind::Fragment => gl::FRAGMENT_SHADER,
        }
    }

    fn name(self) -> &'static str {
        match self {
            ShaderKind::Vertex => "vertex",
            ShaderKind::Fragment => "fragment",
        }
    }
}

/// A single compiled shader stage.
///
/// Compilation failure does not abort anything at this layer: the handle is
/// returned flagged invalid with the driver log captured, and the failure is
/// written to the log stream. The stage is only useful as link input.
pub struct CompiledShader {
    id: GLuint,
    kind: ShaderKind,
    valid: bool,
    log: String,
}

impl CompiledShader {
    pub fn compile(source: &str, kind: ShaderKind) -> Result<Self, ShaderError> {
        let c_source = CString::new(source.as_bytes())?;

        let id = unsafe { gl::CreateShader(kind.gl_enum()) };
        unsafe {
            gl::ShaderSource(id, 1, &c_source.as_ptr(), ptr::null());
            gl::CompileShader(id);
        }

        let mut success = 1;
        unsafe {
            gl::GetShaderiv(id, gl::COMPILE_STATUS, &mut success);
        }

        let log = if success == 0 {
            let log = shader_info_log(id);
            log::error!("{} shader compilation failed:\n{}", kind.name(), log);
            log
        } else {
            String::new()
        };

        Ok(CompiledShader {
            id,
            kind,
            valid: success != 0,
            log,
        })
    }

    pub fn kind(&self) -> ShaderKind {
        self.kind
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn log(&self) -> &str {
        &self.log
    }
}

impl Drop for CompiledShader {
    fn drop(&mut self) {
        unsafe { gl::DeleteShader(self.id) };
    }
}

/// A linked shader program.
pub struct ShaderProgram {
    id: GLuint,
    valid: bool,
    log: String,
}

impl ShaderProgram {
    /// Links two compiled stages into a program.
    ///
    /// Both stages are attached whether or not they compiled cleanly; an
    /// invalid stage simply surfaces as a link failure. The stage objects are
    /// consumed and deleted once the link has run, the program keeps its own
    /// copy of the executable.
    pub fn link(vertex: CompiledShader, fragment: CompiledShader) -> Self {
        let id = unsafe { gl::CreateProgram() };
        unsafe {
            gl::AttachShader(id, vertex.id);
            gl::AttachShader(id, fragment.id);
            gl::LinkProgram(id);
        }

        let mut success = 1;
        unsafe {
            gl::GetProgramiv(id, gl::LINK_STATUS, &mut success);
        }

        let log = if success == 0 {
            let log = program_info_log(id);
            log::error!("shader program linking failed:\n{}", log);
            log
        } else {
            String::new()
        };

        // `vertex` and `fragment` drop here, releasing the stage objects.
        ShaderProgram {
            id,
            valid: success != 0,
            log,
        }
    }

    /// Compiles both stages and links them, turning any flagged failure into
    /// an error. Demos use this path so an unusable program never reaches a
    /// draw call.
    pub fn from_sources(vertex_source: &str, fragment_source: &str) -> Result<Self, ShaderError> {
        let vertex = CompiledShader::compile(vertex_source, ShaderKind::Vertex)?;
        let fragment = CompiledShader::compile(fragment_source, ShaderKind::Fragment)?;

        if !vertex.is_valid() {
            return Err(ShaderError::Compilation(vertex.log().to_owned()));
        }
        if !fragment.is_valid() {
            return Err(ShaderError::Compilation(fragment.log().to_owned()));
        }

        let program = Self::link(vertex, fragment);
        if !program.is_valid() {
            return Err(ShaderError::Linking(program.log().to_owned()));
        }
        Ok(program)
    }

    pub fn id(&self) -> GLuint {
        self.id
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn log(&self) -> &str {
        &self.log
    }

    pub fn use_program(&self) {
        unsafe {
            gl::UseProgram(self.id);
        }
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        unsafe { gl::DeleteProgram(self.id) };
    }
}

fn shader_info_log(id: GLuint) -> String {
    let mut len = 0;
    unsafe {
        gl::GetShaderiv(id, gl::INFO_LOG_LENGTH, &mut len);
    }
    let buffer = whitespace_cstring(len as usize);
    unsafe {
        gl::GetShaderInfoLog(id, len, ptr::null_mut(), buffer.as_ptr() as *mut GLchar);
    }
    buffer.to_string_lossy().trim_end().to_owned()
}

fn program_info_log(id: GLuint) -> String {
    let mut len = 0;
    unsafe {
        gl::GetProgramiv(id, gl::INFO_LOG_LENGTH, &mut len);
    }
    let buffer = whitespace_cstring(len as usize);
    unsafe {
        gl::GetProgramInfoLog(id, len, ptr::null_mut(), buffer.as_ptr() as *mut GLchar);
    }
    buffer.to_string_lossy().trim_end().to_owned()
}

fn whitespace_cstring(len: usize) -> CString {
    let mut buffer: Vec<u8> = Vec::with_capacity(len + 1);
    buffer.extend([b' '].iter().cycle().take(len));
    unsafe { CString::from_vec_unchecked(buffer) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shader_kind_names() {
        assert_eq!(ShaderKind::Vertex.name(), "vertex");
        assert_eq!(ShaderKind::Fragment.name(), "fragment");
        assert_eq!(ShaderKind::Vertex.gl_enum(), gl::VERTEX_SHADER);
        assert_eq!(ShaderKind::Fragment.gl_enum(), gl::FRAGMENT_SHADER);
    }

    #[test]
    fn test_error_display() {
        let err = ShaderError::Compilation("0:1(1): error: syntax error".into());
        assert!(err.to_string().contains("compilation failed"));

        let err = ShaderError::Linking("undefined reference".into());
        assert!(err.to_string().contains("linking failed"));
    }

    #[test]
    fn test_nul_in_source_is_rejected_before_gl() {
        // CString conversion fails without touching the driver.
        let err = CString::new("void main() {\0}").unwrap_err();
        assert!(matches!(ShaderError::from(err), ShaderError::Nul(_)));
    }

    #[test]
    fn test_whitespace_cstring_len() {
        assert_eq!(whitespace_cstring(0).as_bytes().len(), 0);
        assert_eq!(whitespace_cstring(16).as_bytes().len(), 16);
    }
}
