/// Longest diagnostic retained when shader or pipeline validation fails.
pub const MAX_DIAGNOSTIC_LENGTH: usize = 512;

pub const VERTEX_SHADER_SOURCE: &str = "\
@vertex
fn vs_main(@location(0) position: vec3<f32>) -> @builtin(position) vec4<f32> {
    return vec4<f32>(position.x, position.y, position.z, 1.0);
}
";

pub const FRAGMENT_SHADER_SOURCE: &str = "\
@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return vec4<f32>(1.0, 0.5, 0.2, 1.0);
}
";

pub struct ShaderModulePackage {
    pub vertex_shader_module: wgpu::ShaderModule,
    pub fragment_shader_module: wgpu::ShaderModule,
}

impl ShaderModulePackage {
    /// Compiles the two fixed shader stages.
    ///
    /// A compilation failure is logged once, with the diagnostic capped at
    /// [`MAX_DIAGNOSTIC_LENGTH`] characters, and execution continues with
    /// whatever module object resulted.
    pub async fn from_sources(device: &wgpu::Device) -> Self {
        let vertex_shader_module = ShaderModulePackage::create_shader_module(
            device,
            "TRIANGLE_VERTEX_SHADER_MODULE",
            VERTEX_SHADER_SOURCE,
        )
        .await;

        let fragment_shader_module = ShaderModulePackage::create_shader_module(
            device,
            "TRIANGLE_FRAGMENT_SHADER_MODULE",
            FRAGMENT_SHADER_SOURCE,
        )
        .await;

        ShaderModulePackage {
            vertex_shader_module,
            fragment_shader_module,
        }
    }

    async fn create_shader_module(
        device: &wgpu::Device,
        label: &str,
        source: &str,
    ) -> wgpu::ShaderModule {
        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let shader_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });

        if let Some(error) = device.pop_error_scope().await {
            log::error!(
                "Shader compilation failed for {label}: {}",
                truncate_diagnostic(&error.to_string())
            );
        }

        shader_module
    }
}

pub fn truncate_diagnostic(message: &str) -> String {
    message.chars().take(MAX_DIAGNOSTIC_LENGTH).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shader_sources_contain_entry_points() {
        assert!(VERTEX_SHADER_SOURCE.contains("fn vs_main"));
        assert!(FRAGMENT_SHADER_SOURCE.contains("fn fs_main"));
    }

    #[test]
    fn test_short_diagnostics_pass_through() {
        assert_eq!(truncate_diagnostic(""), "");
        assert_eq!(truncate_diagnostic("bad shader"), "bad shader");
    }

    #[test]
    fn test_long_diagnostics_are_capped() {
        let long = "x".repeat(2 * MAX_DIAGNOSTIC_LENGTH);
        let truncated = truncate_diagnostic(&long);
        assert_eq!(truncated.chars().count(), MAX_DIAGNOSTIC_LENGTH);
    }

    #[test]
    fn test_truncation_respects_character_boundaries() {
        let long = "é".repeat(MAX_DIAGNOSTIC_LENGTH + 7);
        let truncated = truncate_diagnostic(&long);
        assert_eq!(truncated.chars().count(), MAX_DIAGNOSTIC_LENGTH);
    }
}
