use std::rc::Rc;
use web_sys::{
    WebGl2RenderingContext, WebGlBuffer, WebGlProgram, WebGlVertexArrayObject,
    WebGlUniformLocation,
};
use crate::mesh::{Mesh, VERTEX_STRIDE};
use crate::model::Group;
use super::camera::PerspectiveCamera;
use super::lights::LightingParams;
use super::webgl::WebGLContext;
use super::shaders::*;

/// Cached uniform locations for the mesh shader
struct MeshUniforms {
    model: Option<WebGlUniformLocation>,
    view: Option<WebGlUniformLocation>,
    projection: Option<WebGlUniformLocation>,
    camera_pos: Option<WebGlUniformLocation>,
    color: Option<WebGlUniformLocation>,
    metalness: Option<WebGlUniformLocation>,
    roughness: Option<WebGlUniformLocation>,
    clearcoat: Option<WebGlUniformLocation>,
    clearcoat_roughness: Option<WebGlUniformLocation>,
    ambient: Option<WebGlUniformLocation>,
    light_dir: Option<WebGlUniformLocation>,
    light_color: Option<WebGlUniformLocation>,
}

/// One geometry resident on the GPU
struct GpuMesh {
    source: Rc<Mesh>,
    vao: WebGlVertexArrayObject,
    // Held so the buffers live as long as the VAO that references them
    _vertex_buffer: WebGlBuffer,
    _index_buffer: WebGlBuffer,
    index_count: i32,
}

/// Forward renderer for a single model group
pub struct RenderPipeline {
    ctx: WebGLContext,
    program: WebGlProgram,
    uniforms: MeshUniforms,

    meshes: Vec<GpuMesh>,
    /// For each child of the uploaded group, the index of its GPU mesh
    slots: Vec<usize>,

    width: i32,
    height: i32,
}

impl RenderPipeline {
    pub fn new(gl: WebGl2RenderingContext, width: i32, height: i32) -> Result<Self, String> {
        let ctx = WebGLContext::new(gl);

        let program = ctx.create_program(MESH_VERTEX_SHADER, MESH_FRAGMENT_SHADER)?;

        let uniforms = MeshUniforms {
            model: ctx.get_uniform_location(&program, "u_model"),
            view: ctx.get_uniform_location(&program, "u_view"),
            projection: ctx.get_uniform_location(&program, "u_projection"),
            camera_pos: ctx.get_uniform_location(&program, "u_camera_pos"),
            color: ctx.get_uniform_location(&program, "u_color"),
            metalness: ctx.get_uniform_location(&program, "u_metalness"),
            roughness: ctx.get_uniform_location(&program, "u_roughness"),
            clearcoat: ctx.get_uniform_location(&program, "u_clearcoat"),
            clearcoat_roughness: ctx.get_uniform_location(&program, "u_clearcoat_roughness"),
            ambient: ctx.get_uniform_location(&program, "u_ambient"),
            light_dir: ctx.get_uniform_location(&program, "u_light_dir"),
            light_color: ctx.get_uniform_location(&program, "u_light_color"),
        };

        Ok(Self {
            ctx,
            program,
            uniforms,
            meshes: Vec::new(),
            slots: Vec::new(),
            width,
            height,
        })
    }

    /// Upload every distinct geometry of the group. Children sharing an `Rc<Mesh>` share one VAO.
    pub fn upload_model(&mut self, model: &Group) -> Result<(), String> {
        self.meshes.clear();
        self.slots.clear();

        for child in &model.children {
            let existing = self.meshes.iter().position(|m| Rc::ptr_eq(&m.source, &child.geometry));
            let slot = match existing {
                Some(slot) => slot,
                None => {
                    let gpu = self.upload_mesh(&child.geometry)?;
                    self.meshes.push(gpu);
                    self.meshes.len() - 1
                }
            };
            self.slots.push(slot);
        }

        log::info!(
            "Uploaded {} meshes for {} instances",
            self.meshes.len(),
            self.slots.len()
        );

        Ok(())
    }

    fn upload_mesh(&self, mesh: &Rc<Mesh>) -> Result<GpuMesh, String> {
        let gl = &self.ctx.gl;

        let vao = self.ctx.create_vao()?;
        gl.bind_vertex_array(Some(&vao));

        let vertex_buffer = self.ctx.create_vertex_buffer(&mesh.vertex_data())?;
        let index_buffer = self.ctx.create_index_buffer(mesh.index_data())?;

        // Layout: position(3) + normal(3) + uv(2)
        self.ctx.float_attribute(0, 3, VERTEX_STRIDE, 0);
        self.ctx.float_attribute(1, 3, VERTEX_STRIDE, 3);
        self.ctx.float_attribute(2, 2, VERTEX_STRIDE, 6);

        gl.bind_vertex_array(None);

        Ok(GpuMesh {
            source: Rc::clone(mesh),
            vao,
            _vertex_buffer: vertex_buffer,
            _index_buffer: index_buffer,
            index_count: mesh.index_data().len() as i32,
        })
    }

    /// Draw one frame of the model as seen by the camera
    pub fn render(&self, model: &Group, camera: &PerspectiveCamera, lighting: &LightingParams) {
        let gl = &self.ctx.gl;

        self.ctx.viewport(0, 0, self.width, self.height);
        self.ctx.clear(lighting.background_rgb());
        self.ctx.enable_depth_test();

        gl.use_program(Some(&self.program));

        let view = camera.view_matrix();
        self.ctx.uniform_matrix4fv(self.uniforms.view.as_ref(), view.as_slice());
        self.ctx.uniform_matrix4fv(self.uniforms.projection.as_ref(), camera.projection_matrix().as_slice());
        self.ctx.uniform_vec3(self.uniforms.camera_pos.as_ref(), camera.position());
        self.ctx.uniform_vec3(self.uniforms.ambient.as_ref(), lighting.ambient());
        self.ctx.uniform_vec3(self.uniforms.light_dir.as_ref(), lighting.to_light());
        self.ctx.uniform_vec3(self.uniforms.light_color.as_ref(), lighting.directional());

        for (child, &slot) in model.children.iter().zip(&self.slots) {
            let Some(gpu) = self.meshes.get(slot) else { continue };

            let world = model.world_matrix(child);
            self.ctx.uniform_matrix4fv(self.uniforms.model.as_ref(), world.as_slice());

            let material = &child.material;
            self.ctx.uniform_vec3(self.uniforms.color.as_ref(), material.rgb());
            self.ctx.uniform_1f(self.uniforms.metalness.as_ref(), material.metalness);
            self.ctx.uniform_1f(self.uniforms.roughness.as_ref(), material.roughness);
            self.ctx.uniform_1f(self.uniforms.clearcoat.as_ref(), material.clearcoat);
            self.ctx.uniform_1f(self.uniforms.clearcoat_roughness.as_ref(), material.clearcoat_roughness);

            gl.bind_vertex_array(Some(&gpu.vao));
            gl.draw_elements_with_i32(
                WebGl2RenderingContext::TRIANGLES,
                gpu.index_count,
                WebGl2RenderingContext::UNSIGNED_INT,
                0,
            );
        }

        gl.bind_vertex_array(None);
    }

    /// Resize the drawing area (device pixels)
    pub fn resize(&mut self, width: i32, height: i32) {
        self.width = width.max(1);
        self.height = height.max(1);
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }
}
