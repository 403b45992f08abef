/// Composes `{base}/{type}-{version}.{extension}`. Values are interpolated as-is.
pub fn build_url(base: &str, artifact_type: &str, version: &str, extension: &str) -> String {
    format!("{base}/{artifact_type}-{version}.{extension}")
}
