/// Size of the `FrameParams` uniform block declared by [`SCENE_SHADER`].
pub const FRAME_BLOCK_SIZE: usize = 160;

/// Member offsets of `FrameParams` in [`SCENE_SHADER`], following WGSL
/// uniform layout rules.
pub const FRAME_LAYOUT: [(&str, usize); 6] = [
    ("view_matrix", 0),
    ("camera_model_matrix", 64),
    ("camera_position", 128),
    ("camera_fov", 140),
    ("screen_size", 144),
    ("time", 152),
];

/// Look up a `FrameParams` member offset by name.
pub fn frame_offset(name: &str) -> Option<usize> {
    FRAME_LAYOUT
        .iter()
        .find(|(member, _)| *member == name)
        .map(|(_, offset)| *offset)
}

const MAX_SLOTS_PLACEHOLDER: &str = "{MAX_SLOTS}";

/// Build the scene shader for a primitive array of `max_slots` entries.
pub fn scene_shader(max_slots: usize) -> String {
    SCENE_SHADER.replace(MAX_SLOTS_PLACEHOLDER, &max_slots.to_string())
}

/// Full-screen ray tracer over the encoded primitive slots.
///
/// `Primitive` mirrors the 128-byte slot layout field for field.
pub const SCENE_SHADER: &str = r#"
const MAX_SLOTS: u32 = {MAX_SLOTS}u;
const MAX_BOUNCES: u32 = 6u;
const EPSILON: f32 = 0.001;
const FAR: f32 = 1.0e9;

const SHAPE_SPHERE: u32 = 1u;
const SHAPE_PLANE: u32 = 2u;
const SHAPE_RECTANGLE: u32 = 3u;
const SHAPE_BOX: u32 = 4u;

const MATERIAL_EMITTER: u32 = 0u;
const MATERIAL_LAMBERT: u32 = 1u;
const MATERIAL_METAL: u32 = 2u;
const MATERIAL_DIELECTRIC: u32 = 3u;

struct FrameParams {
    view_matrix: mat4x4<f32>,
    camera_model_matrix: mat4x4<f32>,
    camera_position: vec3<f32>,
    camera_fov: f32,
    screen_size: vec2<f32>,
    time: f32,
};

struct Primitive {
    kind: u32,
    position: vec3<f32>,
    orientation: vec3<f32>,
    shape_scalar: f32,
    shape_vec3: vec3<f32>,
    shape_vec2: vec2<f32>,
    shape_vec3b: vec3<f32>,
    material_type: u32,
    albedo: vec3<f32>,
    roughness: f32,
    refraction_index: f32,
};

struct Header {
    count: u32,
    _pad0: u32,
    _pad1: u32,
    _pad2: u32,
};

@group(0) @binding(0)
var<uniform> frame: FrameParams;

@group(0) @binding(1)
var<uniform> primitives: array<Primitive, MAX_SLOTS>;

@group(0) @binding(2)
var<uniform> header: Header;

struct Hit {
    t: f32,
    normal: vec3<f32>,
    index: u32,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
};

@vertex
fn vs_main(@builtin(vertex_index) index: u32) -> VertexOutput {
    // One triangle covering the viewport.
    let uv = vec2<f32>(f32((index << 1u) & 2u), f32(index & 2u));
    var out: VertexOutput;
    out.clip_position = vec4<f32>(uv * 2.0 - 1.0, 0.0, 1.0);
    return out;
}

// Rz * Ry * Rx from Euler degrees, matching the CPU-side convention.
fn rotation(degrees: vec3<f32>) -> mat3x3<f32> {
    let r = radians(degrees);
    let cx = cos(r.x);
    let sx = sin(r.x);
    let cy = cos(r.y);
    let sy = sin(r.y);
    let cz = cos(r.z);
    let sz = sin(r.z);
    let rx = mat3x3<f32>(vec3<f32>(1.0, 0.0, 0.0), vec3<f32>(0.0, cx, sx), vec3<f32>(0.0, -sx, cx));
    let ry = mat3x3<f32>(vec3<f32>(cy, 0.0, -sy), vec3<f32>(0.0, 1.0, 0.0), vec3<f32>(sy, 0.0, cy));
    let rz = mat3x3<f32>(vec3<f32>(cz, sz, 0.0), vec3<f32>(-sz, cz, 0.0), vec3<f32>(0.0, 0.0, 1.0));
    return rz * ry * rx;
}

fn hash(p: vec3<f32>) -> f32 {
    var q = fract(p * 0.1031);
    q += dot(q, q.zyx + 31.32);
    return fract((q.x + q.y) * q.z);
}

fn intersect_sphere(o: vec3<f32>, d: vec3<f32>, p: Primitive) -> vec4<f32> {
    let oc = o - p.position;
    let b = dot(oc, d);
    let c = dot(oc, oc) - p.shape_scalar * p.shape_scalar;
    let disc = b * b - c;
    if disc < 0.0 {
        return vec4<f32>(FAR, 0.0, 0.0, 0.0);
    }
    let s = sqrt(disc);
    var t = -b - s;
    if t < EPSILON {
        t = -b + s;
    }
    if t < EPSILON {
        return vec4<f32>(FAR, 0.0, 0.0, 0.0);
    }
    let n = normalize(o + d * t - p.position);
    return vec4<f32>(t, n);
}

fn intersect_plane(o: vec3<f32>, d: vec3<f32>, p: Primitive) -> vec4<f32> {
    let n = normalize(p.shape_vec3);
    let denom = dot(d, n);
    if abs(denom) < 1.0e-6 {
        return vec4<f32>(FAR, 0.0, 0.0, 0.0);
    }
    let t = dot(p.position - o, n) / denom;
    if t < EPSILON {
        return vec4<f32>(FAR, 0.0, 0.0, 0.0);
    }
    return vec4<f32>(t, n);
}

// Local rectangle lies in the XY plane facing +Z; size is the full extent.
fn intersect_rectangle(o: vec3<f32>, d: vec3<f32>, p: Primitive) -> vec4<f32> {
    let r = rotation(p.orientation);
    let inv = transpose(r);
    let lo = inv * (o - p.position);
    let ld = inv * d;
    if abs(ld.z) < 1.0e-6 {
        return vec4<f32>(FAR, 0.0, 0.0, 0.0);
    }
    let t = -lo.z / ld.z;
    let q = lo + ld * t;
    let half_size = p.shape_vec2 * 0.5;
    if t < EPSILON || abs(q.x) > half_size.x || abs(q.y) > half_size.y {
        return vec4<f32>(FAR, 0.0, 0.0, 0.0);
    }
    return vec4<f32>(t, r * vec3<f32>(0.0, 0.0, 1.0));
}

// Slab test in the box's local frame; size is the full extent.
fn intersect_box(o: vec3<f32>, d: vec3<f32>, p: Primitive) -> vec4<f32> {
    let r = rotation(p.orientation);
    let inv = transpose(r);
    let lo = inv * (o - p.position);
    let ld = inv * d;
    let half_size = p.shape_vec3b * 0.5;
    let inv_d = 1.0 / ld;
    let t0 = (-half_size - lo) * inv_d;
    let t1 = (half_size - lo) * inv_d;
    let t_min = min(t0, t1);
    let t_max = max(t0, t1);
    let t_near = max(max(t_min.x, t_min.y), t_min.z);
    let t_far = min(min(t_max.x, t_max.y), t_max.z);
    if t_near > t_far || t_far < EPSILON {
        return vec4<f32>(FAR, 0.0, 0.0, 0.0);
    }
    var t = t_near;
    if t < EPSILON {
        t = t_far;
    }
    let q = (lo + ld * t) / half_size;
    let a = abs(q);
    var n = vec3<f32>(0.0, 0.0, sign(q.z));
    if a.x > a.y && a.x > a.z {
        n = vec3<f32>(sign(q.x), 0.0, 0.0);
    } else if a.y > a.z {
        n = vec3<f32>(0.0, sign(q.y), 0.0);
    }
    return vec4<f32>(t, r * n);
}

fn intersect(o: vec3<f32>, d: vec3<f32>, p: Primitive) -> vec4<f32> {
    switch p.kind {
        case SHAPE_SPHERE: { return intersect_sphere(o, d, p); }
        case SHAPE_PLANE: { return intersect_plane(o, d, p); }
        case SHAPE_RECTANGLE: { return intersect_rectangle(o, d, p); }
        case SHAPE_BOX: { return intersect_box(o, d, p); }
        default: { return vec4<f32>(FAR, 0.0, 0.0, 0.0); }
    }
}

fn primitive_count() -> u32 {
    return min(header.count, MAX_SLOTS);
}

fn trace(o: vec3<f32>, d: vec3<f32>) -> Hit {
    var best = Hit(FAR, vec3<f32>(0.0), 0u);
    for (var i = 0u; i < primitive_count(); i++) {
        let h = intersect(o, d, primitives[i]);
        if h.x < best.t {
            best = Hit(h.x, h.yzw, i);
        }
    }
    return best;
}

fn sky(d: vec3<f32>) -> vec3<f32> {
    let k = 0.5 * (d.y + 1.0);
    return mix(vec3<f32>(0.02, 0.02, 0.03), vec3<f32>(0.10, 0.12, 0.18), k);
}

// Direct light from every emitter, with a hard shadow test.
fn direct_light(point: vec3<f32>, normal: vec3<f32>) -> vec3<f32> {
    var light = vec3<f32>(0.0);
    for (var i = 0u; i < primitive_count(); i++) {
        let emitter = primitives[i];
        if emitter.material_type != MATERIAL_EMITTER {
            continue;
        }
        let to_light = emitter.position - point;
        let dist = length(to_light);
        let l = to_light / dist;
        let n_dot_l = dot(normal, l);
        if n_dot_l <= 0.0 {
            continue;
        }
        let blocker = trace(point + normal * EPSILON, l);
        if blocker.t < dist - EPSILON && blocker.index != i {
            continue;
        }
        light += emitter.albedo * n_dot_l / (1.0 + 0.1 * dist * dist);
    }
    return light;
}

fn schlick(cosine: f32, ior: f32) -> f32 {
    var r0 = (1.0 - ior) / (1.0 + ior);
    r0 = r0 * r0;
    return r0 + (1.0 - r0) * pow(1.0 - cosine, 5.0);
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let aspect = frame.screen_size.x / max(frame.screen_size.y, 1.0);
    let ndc = vec2<f32>(
        in.clip_position.x / frame.screen_size.x * 2.0 - 1.0,
        1.0 - in.clip_position.y / frame.screen_size.y * 2.0,
    );
    let scale = tan(radians(frame.camera_fov) * 0.5);
    let local_dir = normalize(vec3<f32>(ndc.x * aspect * scale, ndc.y * scale, -1.0));

    var origin = frame.camera_position;
    var dir = normalize((frame.camera_model_matrix * vec4<f32>(local_dir, 0.0)).xyz);
    var throughput = vec3<f32>(1.0);
    var color = vec3<f32>(0.0);
    let seed = vec3<f32>(in.clip_position.xy, frame.time);

    for (var bounce = 0u; bounce < MAX_BOUNCES; bounce++) {
        let hit = trace(origin, dir);
        if hit.t >= FAR {
            color += throughput * sky(dir);
            break;
        }
        let p = primitives[hit.index];
        let point = origin + dir * hit.t;
        var normal = hit.normal;
        let entering = dot(dir, normal) < 0.0;
        if !entering {
            normal = -normal;
        }

        if p.material_type == MATERIAL_EMITTER {
            color += throughput * p.albedo;
            break;
        }
        if p.material_type == MATERIAL_LAMBERT {
            color += throughput * p.albedo * (direct_light(point, normal) + sky(normal));
            break;
        }
        if p.material_type == MATERIAL_METAL {
            let jitter = vec3<f32>(
                hash(seed + f32(bounce)),
                hash(seed.yzx + f32(bounce)),
                hash(seed.zxy + f32(bounce)),
            ) * 2.0 - 1.0;
            dir = normalize(reflect(dir, normal) + jitter * p.roughness);
            origin = point + normal * EPSILON;
            throughput *= p.albedo;
            continue;
        }
        // Dielectric
        var eta = 1.0 / p.refraction_index;
        if !entering {
            eta = p.refraction_index;
        }
        let cosine = min(dot(-dir, normal), 1.0);
        let refracted = refract(dir, normal, eta);
        let cannot_refract = dot(refracted, refracted) == 0.0;
        if cannot_refract || schlick(cosine, eta) > hash(seed + f32(bounce) * 7.0) {
            dir = reflect(dir, normal);
            origin = point + normal * EPSILON;
        } else {
            dir = normalize(refracted);
            origin = point - normal * EPSILON;
        }
        throughput *= p.albedo;
    }

    return vec4<f32>(color, 1.0);
}
"#;
