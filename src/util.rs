use glam::Vec3;

use crate::core::ParticleField;

pub fn format_vec3(v: Vec3) -> String {
    format!("[{:8.3},{:8.3},{:8.3}]", v.x, v.y, v.z)
}

/// One-line description of a field for the log.
pub fn format_field_summary(field: &ParticleField) -> String {
    match field.bounds() {
        Some((min, max)) => format!(
            "{} particles, bounds min {} max {}",
            field.len(),
            format_vec3(min),
            format_vec3(max)
        ),
        None => "empty field".to_string(),
    }
}
