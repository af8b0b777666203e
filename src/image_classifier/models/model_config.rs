#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub onnx_model_path: String,
    /// One label per line, line `i` names output index `i`.
    pub labels_path: String,
    /// (height, width)
    pub input_shape: (u32, u32),
    pub top_k: usize,
}
