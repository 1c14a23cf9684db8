/// Vertex shader shared by every tulip part
pub const MESH_VERTEX_SHADER: &str = r#"#version 300 es
precision highp float;

layout(location = 0) in vec3 a_position;
layout(location = 1) in vec3 a_normal;
layout(location = 2) in vec2 a_uv;

uniform mat4 u_model;
uniform mat4 u_view;
uniform mat4 u_projection;

out vec3 v_normal;
out vec3 v_world_position;
out vec2 v_uv;

void main() {
    vec4 world_pos = u_model * vec4(a_position, 1.0);

    v_world_position = world_pos.xyz;
    // Model matrices carry rotation and translation only
    v_normal = mat3(u_model) * a_normal;
    v_uv = a_uv;

    gl_Position = u_projection * u_view * world_pos;
}
"#;

/// Fragment shader: metal/rough base layer with an optional clearcoat
pub const MESH_FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;

in vec3 v_normal;
in vec3 v_world_position;
in vec2 v_uv;

uniform vec3 u_camera_pos;
uniform vec3 u_color;
uniform float u_metalness;
uniform float u_roughness;
uniform float u_clearcoat;
uniform float u_clearcoat_roughness;
uniform vec3 u_ambient;
uniform vec3 u_light_dir;
uniform vec3 u_light_color;

out vec4 fragColor;

const float PI = 3.14159265;

// GGX distribution
float distribution(float n_dot_h, float roughness) {
    float a = max(roughness * roughness, 0.002);
    float a2 = a * a;
    float d = n_dot_h * n_dot_h * (a2 - 1.0) + 1.0;
    return a2 / (PI * d * d);
}

vec3 fresnel(float cos_theta, vec3 f0) {
    return f0 + (1.0 - f0) * pow(1.0 - cos_theta, 5.0);
}

void main() {
    vec3 normal = normalize(v_normal);
    // Petals are thin and visible from both sides
    if (!gl_FrontFacing) {
        normal = -normal;
    }

    vec3 view_dir = normalize(u_camera_pos - v_world_position);
    vec3 light_dir = normalize(u_light_dir);
    vec3 half_dir = normalize(light_dir + view_dir);

    float n_dot_l = max(dot(normal, light_dir), 0.0);
    float n_dot_h = max(dot(normal, half_dir), 0.0);
    float v_dot_h = max(dot(view_dir, half_dir), 0.0);

    vec3 diffuse_color = u_color * (1.0 - u_metalness);
    vec3 f0 = mix(vec3(0.04), u_color, u_metalness);

    vec3 f = fresnel(v_dot_h, f0);
    vec3 specular = f * distribution(n_dot_h, u_roughness) * 0.25;
    vec3 base = (diffuse_color * (1.0 - f) + specular * PI) * n_dot_l;

    vec3 coat_f = fresnel(v_dot_h, vec3(0.04)) * u_clearcoat;
    float coat = distribution(n_dot_h, u_clearcoat_roughness) * 0.25 * PI * n_dot_l;

    vec3 direct = u_light_color * (base * (1.0 - coat_f) + coat_f * coat);
    vec3 ambient = u_ambient * diffuse_color;

    vec3 color = ambient + direct;

    // Tone mapping
    color = color / (color + vec3(1.0));

    // Gamma correction
    color = pow(color, vec3(1.0 / 2.2));

    fragColor = vec4(color, 1.0);
}
"#;
